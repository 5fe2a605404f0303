use der::Encode;
use x509_cert::certificate::CertificateInner;

use crate::cert::Certificate;
use crate::cert::SignatureAlgorithm;
use crate::cert::params::{CertificationRequestInfo, DistinguishedName, Validity};
use crate::error::Result;
use crate::key::KeyPair;
use crate::tbs_certificate::TbsCertificate;

/// Represents an entity capable of issuing certificates.
pub trait Issuer {
    /// Returns the distinguished name of the issuer.
    fn issuer_name(&self) -> DistinguishedName;

    /// Returns the signing key of the issuer.
    fn signing_key(&self) -> &KeyPair;

    /// Returns the algorithm used to sign issued certificates.
    fn signature_algorithm(&self) -> SignatureAlgorithm;

    /// Returns the serial number for the next issued certificate.
    fn serial_number(&self) -> Vec<u8>;

    /// Issues a certificate based on the provided certification request information.
    fn issue(&self, cert_request: &CertificationRequestInfo, validity: Validity) -> Result<Certificate> {
        let signature_algorithm = self.signature_algorithm();

        let tbs_cert = TbsCertificate {
            serial_number: self.serial_number(),
            signature_algorithm,
            issuer: self.issuer_name(),
            not_before: validity.not_before,
            not_after: validity.not_after,
            subject: cert_request.subject.clone(),
            subject_public_key_info: cert_request.subject_public_key_info.clone(),
            extensions: cert_request.extensions.clone(),
        };

        let tbs_cert_inner = tbs_cert.to_tbs_certificate_inner()?;
        let signature = self
            .signing_key()
            .sign_data(&tbs_cert_inner.to_der()?, &signature_algorithm)?;

        let cert_inner = CertificateInner {
            tbs_certificate: tbs_cert_inner,
            signature_algorithm: signature_algorithm.into(),
            signature: der::asn1::BitString::from_bytes(&signature)?,
        };

        Ok(Certificate { inner: cert_inner })
    }
}
