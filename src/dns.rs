//! Optional DNS label grammar check for `reg-name` hosts.
//!
//! `<let-dig> (<let-dig-hyp>)* <let-dig>` relaxed from the historical
//! "must start with a letter" rule to "must start with a letter or
//! digit", per the spec. Not applied during grammar parsing — only when
//! a caller explicitly asks for a host-name check (e.g. as part of the
//! `http`/`https` scheme-specific rules).

use crate::error::IriError;

pub(crate) fn validate_labels(host: &str) -> Result<(), IriError> {
    if host.is_empty() {
        return Ok(());
    }
    for label in host.split('.') {
        validate_label(label)?;
    }
    Ok(())
}

fn validate_label(label: &str) -> Result<(), IriError> {
    if label.is_empty() {
        return Err(IriError::grammar(None, "DNS label must not be empty"));
    }
    let bytes = label.as_bytes();
    if bytes[0] == b'-' || *bytes.last().unwrap() == b'-' {
        return Err(IriError::grammar(
            None,
            "DNS label must not start or end with '-'",
        ));
    }
    if !bytes
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'%')
    {
        return Err(IriError::grammar(
            None,
            "DNS label must contain only letters, digits, hyphens or percent-encoding",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_plain_host() {
        assert!(validate_labels("example.com").is_ok());
    }

    #[test]
    fn rejects_leading_hyphen() {
        assert!(validate_labels("-example.com").is_err());
    }

    #[test]
    fn rejects_empty_label() {
        assert!(validate_labels("example..com").is_err());
    }

    #[test]
    fn rejects_trailing_dot_label() {
        assert!(validate_labels("example.com.").is_err());
    }

    #[test]
    fn empty_host_is_allowed() {
        assert!(validate_labels("").is_ok());
    }
}
