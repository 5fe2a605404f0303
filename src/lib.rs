//! # CredKit - Transport Credentials for Proxy Configurations
//!
//! CredKit provisions the credentials a proxy configuration needs, built entirely
//! on RustCrypto libraries with no OpenSSL or ring dependency (except for testing):
//!
//! - [`generate_certificate`]: a fresh self-signed TLS certificate and PKCS#8 private key
//! - [`get_cert_sans`]: the Subject Alternative Names of a PEM certificate
//! - [`add_base64_padding`]: restores `=` padding stripped from Base64 text
//! - [`get_x25519_public_key`]: the X25519 public key for a URL-safe Base64 private key
//!
//! All operations are synchronous and stateless and may be called from any thread.
//! Certificate generation is the only one that draws randomness, from the
//! operating system CSPRNG.
//!
//! ## Quick Start
//!
//! ### Generating the default certificate
//!
//! ```rust,no_run
//! # fn main() -> Result<(), credkit::CredKitError> {
//! let bundle = credkit::generate_certificate()?;
//! println!("{}", bundle.certificate_pem());
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom profiles
//!
//! ```rust,no_run
//! use credkit::{CertificateProfile, cert::extensions::AltName};
//!
//! # fn main() -> Result<(), credkit::CredKitError> {
//! let profile = CertificateProfile::builder()
//!     .common_name("edge.example.com".to_string())
//!     .key_bits(2048)
//!     .validity_days(365)
//!     .subject_alt_names(vec![AltName::Dns("edge.example.com".to_string())])
//!     .build();
//! let bundle = credkit::generate_certificate_with(&profile)?;
//! let sans = credkit::get_cert_sans(bundle.certificate_pem().as_bytes())?;
//! assert_eq!(sans, ["edge.example.com"]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Deriving an X25519 public key
//!
//! ```rust
//! let public = credkit::get_x25519_public_key("dwdtCnMYpX08FsFyUbJmRd9ML4frwJkqsXf7pR25LCo").unwrap();
//! assert_eq!(public, "hSDwCYkwp1R0i33ctD73Wg2_Og0mOBr066SpjqqbTmo");
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use credkit::{CredKitError, ErrorKind};
//!
//! match credkit::get_x25519_public_key("too short") {
//!     Ok(public) => println!("public key: {public}"),
//!     Err(e @ CredKitError::InvalidKey(_)) => assert_eq!(e.kind(), ErrorKind::InvalidKey),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`]; install a subscriber to see them.
//! Key material is never logged.
//!
//! ## Module Organization
//!
//! - [`provision`]: the certificate operations and their configuration
//! - [`x25519`]: padding normalization and X25519 key derivation
//! - [`cert`]: certificate model, parameters and extensions
//! - [`key`]: RSA key generation, export and signing
//! - [`issuer`]: certificate signing
//! - [`error`]: error types

pub mod cert;
pub mod error;
pub mod issuer;
pub mod key;
pub mod pem_utils;
pub mod provision;
pub mod tbs_certificate;
pub mod x25519;

pub use error::{CredKitError, ErrorKind};
pub use provision::{
    CertificateBundle, CertificateProfile, generate_certificate, generate_certificate_with,
    get_cert_sans,
};
pub use x25519::{X25519KeyPair, add_base64_padding, get_x25519_public_key};
