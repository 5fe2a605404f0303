//! use credkit::error::CredKitError;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, CredKitError>;

/// Represents errors that can occur in the CredKit library.
///
/// Messages never contain private key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredKitError {
    /// The supplied bytes are not a PEM encoded X.509 certificate.
    #[error("Failed to parse certificate: {0}")]
    CertificateParseError(String),

    /// The supplied X25519 private key is malformed or has the wrong length.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during key generation.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error from RSA signing operations.
    #[error("RSA error: {0}")]
    RsaError(String),
}

/// Short machine-readable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CertificateParse,
    InvalidKey,
    InvalidInput,
    KeyGeneration,
    Encoding,
    Rsa,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::CertificateParse => "certificate_parse_error",
            ErrorKind::InvalidKey => "invalid_key",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::KeyGeneration => "key_generation_error",
            ErrorKind::Encoding => "encoding_error",
            ErrorKind::Rsa => "rsa_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CredKitError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CredKitError::CertificateParseError(_) => ErrorKind::CertificateParse,
            CredKitError::InvalidKey(_) => ErrorKind::InvalidKey,
            CredKitError::InvalidInput(_) => ErrorKind::InvalidInput,
            CredKitError::KeyGenerationError(_) => ErrorKind::KeyGeneration,
            CredKitError::EncodingError(_) => ErrorKind::Encoding,
            CredKitError::RsaError(_) => ErrorKind::Rsa,
        }
    }
}

impl From<der::Error> for CredKitError {
    /// Converts a `der::Error` into a `CredKitError`.
    ///
    /// Decoding paths map their own failures explicitly, so anything reaching
    /// this conversion happened while building DER output.
    fn from(err: der::Error) -> Self {
        CredKitError::EncodingError(err.to_string())
    }
}

impl From<x509_cert::spki::Error> for CredKitError {
    fn from(err: x509_cert::spki::Error) -> Self {
        CredKitError::EncodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for CredKitError {
    fn from(err: pkcs8::Error) -> Self {
        CredKitError::EncodingError(err.to_string())
    }
}

impl From<rsa::Error> for CredKitError {
    fn from(err: rsa::Error) -> Self {
        CredKitError::RsaError(err.to_string())
    }
}
