//! Scheme-specific validation — run only when a caller opts in via
//! [`crate::Iri::check_scheme_specific_rules`], never during grammar
//! parsing itself. Each scheme's rule set is independent; unknown
//! schemes are accepted unconditionally.

use crate::context::{Context, FileStrictness, UrnStrictness};
use crate::dns;
use crate::error::IriError;
use crate::Iri;

pub(crate) fn check(iri: &Iri<'_>, ctx: &Context) -> Result<(), IriError> {
    match iri.scheme() {
        Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https") => {
            check_http(iri)
        }
        Some(s) if s.eq_ignore_ascii_case("file") => check_file(iri, ctx),
        Some(s) if s.eq_ignore_ascii_case("urn") => check_urn(iri, ctx),
        Some(s) if s.eq_ignore_ascii_case("uuid") => check_uuid(iri),
        _ => Ok(()),
    }
}

/// http/https: authority is required, host must be non-empty, and
/// userinfo (the deprecated `user:pass@` form) is rejected.
fn check_http(iri: &Iri<'_>) -> Result<(), IriError> {
    if !iri.has_authority() {
        return Err(IriError::scheme("http(s) URIs require an authority"));
    }
    let host = iri.host().unwrap_or("");
    if host.is_empty() {
        return Err(IriError::scheme("http(s) URIs require a non-empty host"));
    }
    if iri.user_info().is_some() {
        return Err(IriError::scheme("http(s) URIs must not carry userinfo"));
    }
    if !host.starts_with('[') {
        dns::validate_labels(host)
            .map_err(|_| IriError::scheme("http(s) host is not a valid DNS name"))?;
    }
    Ok(())
}

/// file: only an empty authority (`file:///path` or `file:/path`) is
/// permitted by default; a non-empty host is allowed only under
/// [`FileStrictness::NotStrict`].
fn check_file(iri: &Iri<'_>, ctx: &Context) -> Result<(), IriError> {
    if let Some(host) = iri.host() {
        if !host.is_empty() && ctx.file_strictness == FileStrictness::Strict {
            return Err(IriError::scheme(
                "file URIs require an empty authority in strict mode",
            ));
        }
    }
    Ok(())
}

/// urn:<NID>:<NSS>[?+rq-components][?=q-components][#fragment]
fn check_urn(iri: &Iri<'_>, ctx: &Context) -> Result<(), IriError> {
    if iri.scheme() != Some("urn") {
        return Err(IriError::scheme("urn scheme must be lowercase"));
    }
    if iri.has_authority() {
        return Err(IriError::scheme("urn must not have an authority"));
    }
    let path = iri.path();
    let Some(colon) = path.find(':') else {
        return Err(IriError::scheme("urn requires a <NID>:<NSS> path"));
    };
    let nid = &path[..colon];
    let nss = &path[colon + 1..];
    validate_nid(nid, ctx.urn_strictness)?;
    if nss.is_empty() && ctx.urn_strictness == UrnStrictness::Strict {
        return Err(IriError::scheme("urn NSS must not be empty in strict mode"));
    }

    if nid.eq_ignore_ascii_case("uuid") {
        check_urn_uuid_remainder(nss)?;
    }

    if let Some(q) = iri.query() {
        if !(q.starts_with('+') || q.starts_with('=')) {
            return Err(IriError::scheme(
                "urn rq-components must begin with '+' or '=' per RFC 8141",
            ));
        }
        if !q.is_ascii() {
            return Err(IriError::scheme("urn query component must be ASCII"));
        }
    }
    if let Some(f) = iri.fragment() {
        if !f.is_ascii() {
            return Err(IriError::scheme("urn fragment must be ASCII"));
        }
    }
    Ok(())
}

/// NID = 1*32(ALPHA / DIGIT / "-"), must not start with "urn-" case
/// insensitively unless strictness is relaxed (informal registrations).
/// Strict mode additionally requires at least 2 characters and an
/// alphanumeric first and last byte, per RFC 8141 §2.
fn validate_nid(nid: &str, strictness: UrnStrictness) -> Result<(), IriError> {
    let min_len = match strictness {
        UrnStrictness::Strict => 2,
        UrnStrictness::NotStrict => 1,
    };
    if nid.len() < min_len || nid.len() > 32 {
        return Err(IriError::scheme(format!(
            "urn NID must be {}-32 characters",
            min_len
        )));
    }
    if !nid.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(IriError::scheme(
            "urn NID must contain only letters, digits or '-'",
        ));
    }
    let bytes = nid.as_bytes();
    if !bytes[0].is_ascii_alphanumeric() || !bytes[bytes.len() - 1].is_ascii_alphanumeric() {
        return Err(IriError::scheme(
            "urn NID must start and end with a letter or digit",
        ));
    }
    if strictness == UrnStrictness::Strict && nid.to_ascii_lowercase().starts_with("urn-") {
        return Err(IriError::scheme(
            "urn NID must not start with the reserved 'urn-' prefix in strict mode",
        ));
    }
    Ok(())
}

fn check_urn_uuid_remainder(nss: &str) -> Result<(), IriError> {
    validate_uuid_36(nss)
}

/// Bare `uuid:<uuid>` references (as opposed to `urn:uuid:<uuid>`).
fn check_uuid(iri: &Iri<'_>) -> Result<(), IriError> {
    if iri.has_authority() {
        return Err(IriError::scheme("uuid must not have an authority"));
    }
    if iri.has_query() || iri.has_fragment() {
        return Err(IriError::scheme("uuid must not have a query or fragment"));
    }
    validate_uuid_36(iri.path())
}

/// Exactly 36 characters: `8-4-4-4-12` lowercase hex digits joined by
/// hyphens at fixed positions.
fn validate_uuid_36(s: &str) -> Result<(), IriError> {
    if s.len() != 36 {
        return Err(IriError::scheme(format!(
            "UUID must be exactly 36 characters, found {}",
            s.len()
        )));
    }
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if b != b'-' {
                    return Err(IriError::scheme("UUID must have '-' at positions 8,13,18,23"));
                }
            }
            _ => {
                if !(b.is_ascii_hexdigit() && (b.is_ascii_digit() || b.is_ascii_lowercase())) {
                    return Err(IriError::scheme(
                        "UUID hex digits must be lowercase",
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn http_requires_authority() {
        let iri = parse("http:/path").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn http_rejects_userinfo() {
        let iri = parse("http://user@host/path").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn http_accepts_plain_authority() {
        let iri = parse("http://example.com/path").unwrap();
        assert!(check(&iri, &Context::new()).is_ok());
    }

    #[test]
    fn file_rejects_nonempty_host_by_default() {
        let iri = parse("file://host/path").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn file_accepts_nonempty_host_when_not_strict() {
        let iri = parse("file://host/path").unwrap();
        let ctx = Context::new().with_file_strictness(FileStrictness::NotStrict);
        assert!(check(&iri, &ctx).is_ok());
    }

    #[test]
    fn file_accepts_empty_authority() {
        let iri = parse("file:///path").unwrap();
        assert!(check(&iri, &Context::new()).is_ok());
    }

    #[test]
    fn urn_requires_nid_and_nss() {
        let iri = parse("urn:example:a123,z456").unwrap();
        assert!(check(&iri, &Context::new()).is_ok());
    }

    #[test]
    fn urn_rejects_missing_nss() {
        let iri = parse("urn:example").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn urn_nid_too_short_is_rejected_in_strict_mode() {
        let iri = parse("urn:x:abc").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
        let ctx = Context::new().with_urn_strictness(UrnStrictness::NotStrict);
        assert!(check(&iri, &ctx).is_ok());
    }

    #[test]
    fn urn_nss_may_be_empty_when_not_strict() {
        let iri = parse("urn:example:").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
        let ctx = Context::new().with_urn_strictness(UrnStrictness::NotStrict);
        assert!(check(&iri, &ctx).is_ok());
    }

    #[test]
    fn urn_nid_rejects_leading_or_trailing_hyphen() {
        let iri = parse("urn:-ab-:xyz").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn urn_scheme_must_be_lowercase() {
        let iri = parse("URN:example:a123").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn urn_rejects_non_ascii_query_and_fragment() {
        let iri = parse("urn:example:a123?=q\u{e9}").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
        let iri = parse("urn:example:a123#fr\u{e9}ag").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn urn_uuid_requires_valid_uuid() {
        let iri = parse("urn:uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6").unwrap();
        assert!(check(&iri, &Context::new()).is_ok());
        let bad = parse("urn:uuid:not-a-uuid").unwrap();
        assert!(check(&bad, &Context::new()).is_err());
    }

    #[test]
    fn uuid_scheme_rejects_query_or_fragment() {
        let iri = parse("uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6?x").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }

    #[test]
    fn uuid_scheme_accepts_bare_uuid() {
        let iri = parse("uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6").unwrap();
        assert!(check(&iri, &Context::new()).is_ok());
    }

    #[test]
    fn uuid_rejects_uppercase_hex() {
        let iri = parse("uuid:F81D4FAE-7dec-11d0-a765-00a0c91e6bf6").unwrap();
        assert!(check(&iri, &Context::new()).is_err());
    }
}
