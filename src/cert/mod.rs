pub mod extensions;
pub mod params;

use der::{Decode, Encode, EncodePem};
use extensions::{AltName, SubjectAltName, ToAndFromX509Extension};
use params::{CertificationRequestInfo, DistinguishedName, Validity};
use rand_core::RngCore;
use time::OffsetDateTime;
use x509_cert::certificate::CertificateInner;

use crate::error::{CredKitError, Result};
use crate::issuer::Issuer;
use crate::key::KeyPair;
use crate::pem_utils;
use crate::tbs_certificate::from_x509_time;

/// PEM label of an X.509 certificate.
pub const CERTIFICATE_PEM_LABEL: &str = "CERTIFICATE";

/// Represents the supported signature algorithms for certificates.
///
/// All variants are RSASSA-PKCS1-v1_5 over the named digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption.
    Sha256WithRSA,
    /// SHA-384 with RSA encryption.
    Sha384WithRSA,
    /// SHA-512 with RSA encryption.
    Sha512WithRSA,
}

impl From<SignatureAlgorithm> for x509_cert::spki::AlgorithmIdentifierOwned {
    /// RFC 4055 requires an explicit NULL parameter for the RSA PKCS#1 v1.5 algorithms.
    fn from(value: SignatureAlgorithm) -> Self {
        let oid = match value {
            SignatureAlgorithm::Sha256WithRSA => const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha384WithRSA => const_oid::db::rfc5912::SHA_384_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha512WithRSA => const_oid::db::rfc5912::SHA_512_WITH_RSA_ENCRYPTION,
        };
        x509_cert::spki::AlgorithmIdentifierOwned {
            oid,
            parameters: Some(der::Any::from(der::asn1::AnyRef::NULL)),
        }
    }
}

/// Represents an X.509 certificate.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Parses a DER encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der)
            .map_err(|e| CredKitError::CertificateParseError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses a PEM encoded certificate.
    ///
    /// The input must hold a `CERTIFICATE` block; other PEM labels are rejected.
    pub fn from_pem(pem: impl AsRef<[u8]>) -> Result<Self> {
        let (label, der) = pem_utils::pem_to_der(pem)
            .map_err(|e| CredKitError::CertificateParseError(e.to_string()))?;
        if label != CERTIFICATE_PEM_LABEL {
            return Err(CredKitError::CertificateParseError(format!(
                "expected a {CERTIFICATE_PEM_LABEL} PEM block, found {label}"
            )));
        }
        Self::from_der(&der)
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CredKitError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| CredKitError::EncodingError(e.to_string()))
    }

    /// The subject name in RFC 4514 form.
    pub fn subject(&self) -> String {
        self.inner.tbs_certificate.subject.to_string()
    }

    /// The issuer name in RFC 4514 form.
    pub fn issuer(&self) -> String {
        self.inner.tbs_certificate.issuer.to_string()
    }

    pub fn subject_common_name(&self) -> Option<String> {
        params::common_name_of(&self.inner.tbs_certificate.subject)
    }

    pub fn issuer_common_name(&self) -> Option<String> {
        params::common_name_of(&self.inner.tbs_certificate.issuer)
    }

    /// True when issuer and subject are the same name.
    pub fn is_self_issued(&self) -> bool {
        self.inner.tbs_certificate.issuer == self.inner.tbs_certificate.subject
    }

    pub fn not_before(&self) -> OffsetDateTime {
        from_x509_time(&self.inner.tbs_certificate.validity.not_before)
    }

    pub fn not_after(&self) -> OffsetDateTime {
        from_x509_time(&self.inner.tbs_certificate.validity.not_after)
    }

    /// Returns the entries of the SubjectAltName extension, in certificate order.
    ///
    /// A certificate without the extension yields an empty list. RFC 5280 allows
    /// each extension once, so a repeated SubjectAltName is a parse error.
    pub fn subject_alt_names(&self) -> Result<Vec<AltName>> {
        let mut san_extensions = self
            .inner
            .tbs_certificate
            .extensions
            .iter()
            .flatten()
            .filter(|ext| ext.extn_id == SubjectAltName::OID);

        let Some(ext) = san_extensions.next() else {
            return Ok(Vec::new());
        };
        if san_extensions.next().is_some() {
            return Err(CredKitError::CertificateParseError(
                "duplicate SubjectAltName extension".to_string(),
            ));
        }

        let san = SubjectAltName::from_x509_extension_value(ext.extn_value.as_bytes())?;
        Ok(san.names)
    }

    /// Creates a new self-signed certificate.
    ///
    /// The issuer is the subject of `cert_info` and the certificate is signed by `key`.
    pub fn new_self_signed(
        cert_info: &CertificationRequestInfo,
        key: &KeyPair,
        validity: Validity,
        signature_algorithm: SignatureAlgorithm,
    ) -> Result<Self> {
        let self_issuer = SelfIssuer {
            name: cert_info.subject.clone(),
            key,
            signature_algorithm,
        };
        self_issuer.issue(cert_info, validity)
    }
}

// Helper struct for self-signed certificates
struct SelfIssuer<'a> {
    name: DistinguishedName,
    key: &'a KeyPair,
    signature_algorithm: SignatureAlgorithm,
}

impl Issuer for SelfIssuer<'_> {
    fn issuer_name(&self) -> DistinguishedName {
        self.name.clone()
    }

    fn signing_key(&self) -> &KeyPair {
        self.key
    }

    fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.signature_algorithm
    }

    /// 16 random bytes, forced positive and non-zero.
    fn serial_number(&self) -> Vec<u8> {
        let mut serial = vec![0u8; 16];
        rand_core::OsRng.fill_bytes(&mut serial);
        serial[0] = (serial[0] & 0x7f) | 0x40;
        serial
    }
}
