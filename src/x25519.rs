//! X25519 public key derivation for URL-safe Base64 encoded keys.
//!
//! Proxy configurations carry X25519 keys as unpadded URL-safe Base64 strings.
//! The private half is supplied by the operator; the public half is derived here
//! and handed to clients.

use std::fmt;

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{CredKitError, Result};

/// Length in bytes of X25519 private and public keys.
pub const X25519_KEY_LEN: usize = 32;

/// URL-safe decoder for padded input. Non-zero trailing bits in the last
/// symbol are tolerated, as the wider Base64 ecosystem does.
const URL_SAFE_PADDED_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Appends the `=` padding a Base64 string is missing.
///
/// Strings whose length is already a multiple of four are returned unchanged.
pub fn add_base64_padding(b64: &str) -> String {
    let missing = b64.len() % 4;
    let mut padded = String::with_capacity(b64.len() + 3);
    padded.push_str(b64);
    if missing != 0 {
        padded.extend(std::iter::repeat_n('=', 4 - missing));
    }
    padded
}

/// Derives the X25519 public key for a URL-safe Base64 encoded private key.
///
/// The input may omit its padding. The result is URL-safe Base64 without padding.
/// Any malformed input, whether bad characters or a decoded length other than
/// 32 bytes, fails with [`CredKitError::InvalidKey`].
pub fn get_x25519_public_key(private_key_b64: &str) -> Result<String> {
    let secret = decode_private_key(private_key_b64)?;
    Ok(URL_SAFE_NO_PAD.encode(derive_public(&secret)))
}

/// Clamped scalar multiplication of the base point. The secret is wiped when
/// the `StaticSecret` drops.
fn derive_public(secret: &Zeroizing<[u8; X25519_KEY_LEN]>) -> [u8; X25519_KEY_LEN] {
    let secret = x25519_dalek::StaticSecret::from(**secret);
    x25519_dalek::PublicKey::from(&secret).to_bytes()
}

fn decode_private_key(private_key_b64: &str) -> Result<Zeroizing<[u8; X25519_KEY_LEN]>> {
    let decoded = Zeroizing::new(
        URL_SAFE_PADDED_LENIENT
            .decode(add_base64_padding(private_key_b64))
            .map_err(|e| {
                debug!(error = %e, "rejected private key encoding");
                CredKitError::InvalidKey("not valid URL-safe Base64".to_string())
            })?,
    );

    let bytes: [u8; X25519_KEY_LEN] = decoded.as_slice().try_into().map_err(|_| {
        debug!(len = decoded.len(), "rejected private key length");
        CredKitError::InvalidKey(format!(
            "must be {X25519_KEY_LEN} bytes after decoding, got {}",
            decoded.len()
        ))
    })?;
    Ok(Zeroizing::new(bytes))
}

/// An X25519 key pair in its URL-safe Base64 wire form.
#[derive(Clone, PartialEq, Eq)]
pub struct X25519KeyPair {
    private_key: String,
    public_key: String,
}

impl X25519KeyPair {
    /// Builds the pair from an encoded private key, deriving the public half.
    ///
    /// The stored private key is re-encoded without padding.
    pub fn from_private_key_b64(private_key_b64: &str) -> Result<Self> {
        let secret = decode_private_key(private_key_b64)?;
        Ok(Self {
            private_key: URL_SAFE_NO_PAD.encode(secret.as_slice()),
            public_key: URL_SAFE_NO_PAD.encode(derive_public(&secret)),
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl fmt::Debug for X25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X25519KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Drop for X25519KeyPair {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.private_key.zeroize();
    }
}
