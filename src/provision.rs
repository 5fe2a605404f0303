//! Default transport credentials for proxy configurations.

use std::fmt;

use bon::Builder;
use tracing::debug;

use crate::cert::extensions::{AltName, SubjectAltName};
use crate::cert::params::{CertificationRequestInfo, DistinguishedName, ExtensionParam, Validity};
use crate::cert::{Certificate, SignatureAlgorithm};
use crate::error::{CredKitError, Result};
use crate::key::KeyPair;

/// Common name used for both subject and issuer of generated certificates.
pub const DEFAULT_COMMON_NAME: &str = "Gozargah";

pub const DEFAULT_KEY_BITS: usize = 4096;

/// One hundred years of 365 days.
pub const DEFAULT_VALIDITY_DAYS: i64 = 100 * 365;

/// Parameters for [`generate_certificate_with`].
///
/// The defaults produce the disposable certificate handed out by
/// [`generate_certificate`].
#[derive(Clone, Debug, Builder)]
pub struct CertificateProfile {
    #[builder(default = DEFAULT_COMMON_NAME.to_string())]
    pub common_name: String,
    #[builder(default = DEFAULT_KEY_BITS)]
    pub key_bits: usize,
    #[builder(default = DEFAULT_VALIDITY_DAYS)]
    pub validity_days: i64,
    #[builder(default = SignatureAlgorithm::Sha512WithRSA)]
    pub signature_algorithm: SignatureAlgorithm,
    #[builder(default)]
    pub subject_alt_names: Vec<AltName>,
}

impl Default for CertificateProfile {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A PEM encoded certificate together with its PKCS#8 private key.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateBundle {
    certificate_pem: String,
    private_key_pem: String,
}

impl CertificateBundle {
    pub fn certificate_pem(&self) -> &str {
        &self.certificate_pem
    }

    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    /// Splits the bundle into `(certificate_pem, private_key_pem)`.
    pub fn into_parts(mut self) -> (String, String) {
        (
            std::mem::take(&mut self.certificate_pem),
            std::mem::take(&mut self.private_key_pem),
        )
    }
}

impl fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("certificate_pem", &self.certificate_pem)
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}

impl Drop for CertificateBundle {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.private_key_pem.zeroize();
    }
}

/// Generates a self-signed certificate for `CN=Gozargah`, valid for 100 years,
/// with a fresh 4096-bit RSA key and a SHA-512 signature.
///
/// Every call produces a new key pair. Errors only arise from the environment
/// (entropy source or encoder failures) and are not worth retrying.
pub fn generate_certificate() -> Result<CertificateBundle> {
    generate_certificate_with(&CertificateProfile::default())
}

/// Generates a self-signed certificate described by `profile`.
pub fn generate_certificate_with(profile: &CertificateProfile) -> Result<CertificateBundle> {
    // Everything that can reject the profile runs before the key is generated.
    let validity = Validity::for_days(profile.validity_days)?;

    let subject = DistinguishedName::builder()
        .common_name(profile.common_name.clone())
        .build();
    subject.as_x509_name()?;

    let mut extensions = Vec::new();
    if !profile.subject_alt_names.is_empty() {
        let san = SubjectAltName {
            names: profile.subject_alt_names.clone(),
        };
        extensions.push(ExtensionParam::from_extension(san, false)?);
    }

    let key = KeyPair::generate_rsa(profile.key_bits)?;

    let cert_info = CertificationRequestInfo::builder()
        .subject(subject)
        .subject_public_key_info(key.as_spki()?)
        .extensions(extensions)
        .build();

    let certificate = Certificate::new_self_signed(
        &cert_info,
        &key,
        validity,
        profile.signature_algorithm,
    )?;

    let bundle = CertificateBundle {
        certificate_pem: certificate.to_pem()?,
        private_key_pem: (*key.private_key_pem()?).clone(),
    };

    debug!(
        common_name = %profile.common_name,
        key_bits = profile.key_bits,
        not_after = %certificate.not_after(),
        "generated self-signed certificate"
    );
    Ok(bundle)
}

/// Returns the text values of a PEM certificate's Subject Alternative Names.
///
/// Order follows the certificate. A certificate without the extension yields
/// an empty list. Input that is not a PEM X.509 certificate fails with
/// [`CredKitError::CertificateParseError`].
pub fn get_cert_sans(certificate_pem: &[u8]) -> Result<Vec<String>> {
    let certificate = Certificate::from_pem(certificate_pem)?;
    let names: Vec<String> = certificate
        .subject_alt_names()?
        .iter()
        .map(ToString::to_string)
        .collect();
    debug!(count = names.len(), "extracted subject alternative names");
    Ok(names)
}
