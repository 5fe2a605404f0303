/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(&pem, pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF))
}

/// Convert the first PEM block of `input` into its label and DER‑encoded bytes.
pub fn pem_to_der(input: impl AsRef<[u8]>) -> Result<(String, Vec<u8>), pem::PemError> {
    let pem = pem::parse(input)?;
    Ok((pem.tag().to_string(), pem.into_contents()))
}
