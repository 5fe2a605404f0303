use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use const_oid::AssociatedOid;
use der::{
    Decode, Encode,
    asn1::{Ia5String, OctetString},
    oid::ObjectIdentifier,
};
use tracing::debug;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::name::RdnSequence;

use crate::error::CredKitError;

/// Trait for converting to and from X.509 extensions.
///
/// This trait provides methods to encode and decode X.509 extension values.
///
/// # Example
/// ```
/// use credkit::cert::extensions::{AltName, SubjectAltName, ToAndFromX509Extension};
/// let san = SubjectAltName { names: vec![AltName::Dns("example.com".to_string())] };
/// let encoded = san.to_x509_extension_value().unwrap();
/// let decoded = SubjectAltName::from_x509_extension_value(&encoded).unwrap();
/// assert_eq!(san.names, decoded.names);
/// ```
pub trait ToAndFromX509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Encodes the extension into a DER-encoded byte vector.
    fn to_x509_extension_value(&self) -> Result<Vec<u8>, CredKitError>;

    /// Decodes the extension from a DER-encoded byte slice.
    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, CredKitError>
    where
        Self: Sized;
}

/// A single Subject Alternative Name entry.
///
/// `Display` renders the entry's plain text value, e.g. `example.com`,
/// `10.0.0.1` or `admin@example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltName {
    Dns(String),
    Email(String),
    Uri(String),
    Ip(IpAddr),
    /// Directory name in RFC 4514 form.
    Directory(String),
    RegisteredId(ObjectIdentifier),
}

impl fmt::Display for AltName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltName::Dns(v) | AltName::Email(v) | AltName::Uri(v) | AltName::Directory(v) => {
                f.write_str(v)
            }
            AltName::Ip(ip) => write!(f, "{ip}"),
            AltName::RegisteredId(oid) => write!(f, "{oid}"),
        }
    }
}

impl AltName {
    fn to_general_name(&self) -> Result<GeneralName, CredKitError> {
        fn ia5(v: &str) -> Result<Ia5String, CredKitError> {
            Ia5String::new(v).map_err(|e| CredKitError::InvalidInput(format!("{v:?}: {e}")))
        }

        Ok(match self {
            AltName::Dns(v) => GeneralName::DnsName(ia5(v)?),
            AltName::Email(v) => GeneralName::Rfc822Name(ia5(v)?),
            AltName::Uri(v) => GeneralName::UniformResourceIdentifier(ia5(v)?),
            AltName::Ip(ip) => {
                let octets = match ip {
                    IpAddr::V4(v4) => v4.octets().to_vec(),
                    IpAddr::V6(v6) => v6.octets().to_vec(),
                };
                GeneralName::IpAddress(OctetString::new(octets)?)
            }
            AltName::Directory(v) => GeneralName::DirectoryName(
                RdnSequence::from_str(v)
                    .map_err(|e| CredKitError::InvalidInput(format!("{v:?}: {e}")))?,
            ),
            AltName::RegisteredId(oid) => GeneralName::RegisteredId(*oid),
        })
    }

    /// Returns `None` for entry types without a text value (`otherName`, `ediPartyName`).
    fn from_general_name(name: &GeneralName) -> Result<Option<Self>, CredKitError> {
        Ok(match name {
            GeneralName::DnsName(v) => Some(AltName::Dns(v.to_string())),
            GeneralName::Rfc822Name(v) => Some(AltName::Email(v.to_string())),
            GeneralName::UniformResourceIdentifier(v) => Some(AltName::Uri(v.to_string())),
            GeneralName::IpAddress(octets) => Some(AltName::Ip(ip_from_octets(octets.as_bytes())?)),
            GeneralName::DirectoryName(dn) => Some(AltName::Directory(dn.to_string())),
            GeneralName::RegisteredId(oid) => Some(AltName::RegisteredId(*oid)),
            GeneralName::OtherName(other) => {
                debug!(type_id = %other.type_id, "skipping otherName SAN entry");
                None
            }
            GeneralName::EdiPartyName(_) => {
                debug!("skipping ediPartyName SAN entry");
                None
            }
        })
    }
}

fn ip_from_octets(octets: &[u8]) -> Result<IpAddr, CredKitError> {
    if let Ok(v4) = <[u8; 4]>::try_from(octets) {
        return Ok(IpAddr::V4(Ipv4Addr::from(v4)));
    }
    if let Ok(v6) = <[u8; 16]>::try_from(octets) {
        return Ok(IpAddr::V6(Ipv6Addr::from(v6)));
    }
    Err(CredKitError::CertificateParseError(format!(
        "invalid IP address length {} in subject alternative name",
        octets.len()
    )))
}

/// Represents the Subject Alternative Name (SAN) extension.
///
/// Entries keep the order they have in the certificate.
#[derive(Debug, Clone, Default)]
pub struct SubjectAltName {
    pub names: Vec<AltName>,
}

impl ToAndFromX509Extension for SubjectAltName {
    const OID: ObjectIdentifier = <x509_cert::ext::pkix::SubjectAltName as AssociatedOid>::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, CredKitError> {
        let san = x509_cert::ext::pkix::SubjectAltName(
            self.names
                .iter()
                .map(AltName::to_general_name)
                .collect::<Result<Vec<_>, _>>()?,
        );

        Ok(san.to_der()?)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, CredKitError> {
        let san = x509_cert::ext::pkix::SubjectAltName::from_der(extension)
            .map_err(|e| CredKitError::CertificateParseError(e.to_string()))?;
        let mut names = Vec::with_capacity(san.0.len());
        for name in &san.0 {
            if let Some(alt) = AltName::from_general_name(name)? {
                names.push(alt);
            }
        }
        Ok(Self { names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::asn1::Any;
    use x509_cert::ext::pkix::name::OtherName;

    #[test]
    fn test_subject_alt_name_keeps_order_and_types() {
        let original = SubjectAltName {
            names: vec![
                AltName::Dns("example.com".to_string()),
                AltName::Dns("*.example.com".to_string()),
                AltName::Ip("10.0.0.1".parse().unwrap()),
                AltName::Ip("::1".parse().unwrap()),
                AltName::Email("admin@example.com".to_string()),
                AltName::Uri("https://example.com/".to_string()),
            ],
        };
        let encoded = original.to_x509_extension_value().unwrap();
        let decoded = SubjectAltName::from_x509_extension_value(&encoded).unwrap();
        assert_eq!(original.names, decoded.names);

        let text: Vec<String> = decoded.names.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            [
                "example.com",
                "*.example.com",
                "10.0.0.1",
                "::1",
                "admin@example.com",
                "https://example.com/",
            ]
        );
    }

    #[test]
    fn test_other_name_entries_are_skipped() {
        let san = x509_cert::ext::pkix::SubjectAltName(vec![
            GeneralName::OtherName(OtherName {
                type_id: ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.20.2.3"),
                value: Any::encode_from(&der::asn1::Utf8StringRef::new("upn@example.com").unwrap())
                    .unwrap(),
            }),
            GeneralName::DnsName(Ia5String::new("example.com").unwrap()),
        ]);
        let decoded = SubjectAltName::from_x509_extension_value(&san.to_der().unwrap()).unwrap();
        assert_eq!(decoded.names, vec![AltName::Dns("example.com".to_string())]);
    }

    #[test]
    fn test_invalid_ip_length_is_a_parse_error() {
        let san = x509_cert::ext::pkix::SubjectAltName(vec![GeneralName::IpAddress(
            OctetString::new(vec![10, 0, 0]).unwrap(),
        )]);
        let err = SubjectAltName::from_x509_extension_value(&san.to_der().unwrap()).unwrap_err();
        assert!(matches!(err, CredKitError::CertificateParseError(_)));
    }

    #[test]
    fn test_garbage_extension_value_is_a_parse_error() {
        let err = SubjectAltName::from_x509_extension_value(&[0x04, 0x01]).unwrap_err();
        assert!(matches!(err, CredKitError::CertificateParseError(_)));
    }

    #[test]
    fn test_non_ascii_dns_name_is_rejected() {
        let san = SubjectAltName {
            names: vec![AltName::Dns("exämple.com".to_string())],
        };
        let err = san.to_x509_extension_value().unwrap_err();
        assert!(matches!(err, CredKitError::InvalidInput(_)));
    }
}
