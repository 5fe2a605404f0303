use std::str::FromStr;

use bon::Builder;
use const_oid::ObjectIdentifier;
use der::Tag;
use der::Tagged;
use time::Duration;
use time::OffsetDateTime;
use x509_cert::name::RdnSequence;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use super::extensions::ToAndFromX509Extension;
use crate::error::{CredKitError, Result};

/// Parameters for building an X.509 certificate.
///
/// # Fields
/// * `subject` - The distinguished name of the certificate subject.
/// * `subject_public_key_info` - The public key of the certificate subject.
/// * `extensions` - Additional X.509 extensions.
#[derive(Clone, Debug, Builder)]
pub struct CertificationRequestInfo {
    pub subject: DistinguishedName,
    pub subject_public_key_info: SubjectPublicKeyInfoOwned,
    #[builder(default)]
    pub extensions: Vec<ExtensionParam>,
}

/// Distinguished name parameters for building an X.509 certificate.
///
/// Only the attributes that are set end up in the encoded name.
#[derive(Clone, Debug, Builder, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
}

impl DistinguishedName {
    /// Renders the name as an RFC 4514 string, most specific attribute first.
    pub fn to_rfc4514(&self) -> String {
        let optional = [
            ("OU", &self.organization_unit),
            ("O", &self.organization),
            ("L", &self.locality),
            ("ST", &self.state),
            ("C", &self.country),
        ];

        std::iter::once(format!("CN={}", escape_attribute_value(&self.common_name)))
            .chain(optional.iter().filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(|v| format!("{key}={}", escape_attribute_value(v)))
            }))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Converts the distinguished name to an X.509-compatible format.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::DistinguishedName> {
        if self.common_name.is_empty() {
            return Err(CredKitError::InvalidInput(
                "common name must not be empty".to_string(),
            ));
        }
        RdnSequence::from_str(&self.to_rfc4514())
            .map_err(|e| CredKitError::InvalidInput(format!("invalid distinguished name: {e}")))
    }
}

fn escape_attribute_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        let leading = i == 0 && (c == ' ' || c == '#');
        if leading || matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Returns the first common name attribute of `name`, if any.
///
/// Accepts the string types CAs actually use for CN values.
pub fn common_name_of(name: &x509_cert::name::DistinguishedName) -> Option<String> {
    name.0
        .iter()
        .flat_map(|rdn| rdn.0.iter())
        .find(|attr| attr.oid == const_oid::db::rfc4519::CN)
        .and_then(|attr| match attr.value.tag() {
            Tag::Utf8String | Tag::PrintableString | Tag::Ia5String | Tag::TeletexString => {
                String::from_utf8(attr.value.value().to_vec()).ok()
            }
            _ => None,
        })
}

const SECONDS_PER_DAY: i64 = 86_400;

/// Four-digit years only.
const MAX_GENERALIZED_TIME_YEAR: i32 = 9999;

/// Certificate validity period.
///
/// This struct represents the `notBefore` and `notAfter` fields in a certificate.
#[derive(Clone, Debug)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Creates a validity period starting now for the given number of days.
    ///
    /// Fails when `days` is not positive or the end date falls after the last
    /// instant GeneralizedTime can encode.
    pub fn for_days(days: i64) -> Result<Self> {
        if days <= 0 {
            return Err(CredKitError::InvalidInput(format!(
                "validity must be at least one day, got {days}"
            )));
        }

        let now = OffsetDateTime::now_utc();
        let not_after = days
            .checked_mul(SECONDS_PER_DAY)
            .map(Duration::seconds)
            .and_then(|span| now.checked_add(span))
            .filter(|end| end.year() <= MAX_GENERALIZED_TIME_YEAR)
            .ok_or_else(|| {
                CredKitError::InvalidInput(format!(
                    "validity of {days} days ends after {MAX_GENERALIZED_TIME_YEAR}-12-31"
                ))
            })?;

        Ok(Self {
            not_before: now,
            not_after,
        })
    }
}

/// Represents an X.509 extension.
///
/// # Fields
/// * `oid` - The object identifier of the extension.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded value of the extension.
#[derive(Clone, Debug)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: E, critical: bool) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }
}
