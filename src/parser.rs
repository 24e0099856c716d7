//! Top-level grammar parser — RFC 3986 §3 / RFC 3987 §2.2, generalized
//! over `IRI-reference`:
//!
//! ```text
//! IRI-reference = IRI / irelative-ref
//! IRI           = scheme ":" ihier-part [ "?" iquery ] [ "#" ifragment ]
//! irelative-ref = irelative-part [ "?" iquery ] [ "#" ifragment ]
//! ```
//!
//! A single left-to-right scan over `char_indices`, never backtracking,
//! recording only offsets. Mirrors the regex-equivalent cross-check in
//! the interface spec:
//! `^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?`

use std::borrow::Cow;

use crate::authority;
use crate::classify;
use crate::cursor::{check_pct_encoded, char_pos, Component, Cursor, EOF};
use crate::error::IriError;
use crate::offsets::{Offsets, Span};
use crate::Iri;

pub(crate) fn parse<'a>(input: &'a str) -> Result<Iri<'a>, IriError> {
    crate::log_ext::iri_trace!("parsing {:?}", input);
    let offsets = scan(input);
    match &offsets {
        Ok(_) => crate::log_ext::iri_trace!("parsed {:?} ok", input),
        Err(e) => crate::log_ext::iri_debug!("parse of {:?} failed: {}", input, e),
    }
    let offsets = offsets?;
    Ok(Iri {
        source: Cow::Borrowed(input),
        offsets,
    })
}

pub(crate) fn parse_owned(s: String) -> Result<Iri<'static>, IriError> {
    crate::log_ext::iri_trace!("parsing owned {:?}", s);
    let offsets = scan(&s);
    match &offsets {
        Ok(_) => crate::log_ext::iri_trace!("parsed owned {:?} ok", s),
        Err(e) => crate::log_ext::iri_debug!("parse of owned {:?} failed: {}", s, e),
    }
    let offsets = offsets?;
    Ok(Iri {
        source: Cow::Owned(s),
        offsets,
    })
}

fn scan(input: &str) -> Result<Offsets, IriError> {
    let mut cur = Cursor::new(input);
    let mut offsets = Offsets::default();

    offsets.scheme = scan_scheme(&mut cur);

    let has_authority = cur.starts_with("//");
    if has_authority {
        cur.advance_by(2);
        let authority_start = cur.pos;
        let parts = authority::scan(&mut cur)?;
        offsets.authority = Some(Span::new(authority_start, cur.pos));
        offsets.userinfo = parts.userinfo;
        offsets.host = Some(parts.host);
        offsets.port = parts.port;
    }

    let path_start = cur.pos;
    scan_path(&mut cur, offsets.scheme.is_some(), has_authority)?;
    offsets.path = Span::new(path_start, cur.pos);

    if offsets.scheme.is_some() && !has_authority && offsets.path.as_str(input).starts_with("//") {
        return Err(IriError::grammar(
            Some(char_pos(input, path_start)),
            "path cannot start with '//' when no authority is present",
        ));
    }

    if cur.peek() == '?' {
        cur.bump();
        let query_start = cur.pos;
        scan_query(&mut cur)?;
        offsets.query = Some(Span::new(query_start, cur.pos));
    }

    if cur.peek() == '#' {
        cur.bump();
        let fragment_start = cur.pos;
        scan_fragment(&mut cur)?;
        offsets.fragment = Some(Span::new(fragment_start, cur.pos));
    }

    if !cur.is_eof() {
        return Err(IriError::grammar(
            Some(cur.char_pos()),
            format!("unexpected character '{}'", cur.peek()),
        ));
    }

    Ok(offsets)
}

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
///
/// Looked ahead on a throwaway cursor so a scheme-less reference (no
/// terminating `:`, or a first character that isn't `ALPHA`) leaves the
/// real cursor untouched.
fn scan_scheme(cur: &mut Cursor<'_>) -> Option<Span> {
    let start = cur.pos;
    if !classify::is_alpha(cur.peek()) {
        return None;
    }
    let mut probe = *cur;
    probe.bump();
    while classify::is_scheme_char(probe.peek()) {
        probe.bump();
    }
    if probe.peek() == ':' {
        let end = probe.pos;
        probe.bump();
        *cur = probe;
        Some(Span::new(start, end))
    } else {
        None
    }
}

/// Scans the path component. When neither a scheme nor an authority is
/// present, the first segment must not contain a bare `:`
/// (`segment-nz-nc`), to avoid it being reparsed as a scheme on a later
/// pass.
fn scan_path(cur: &mut Cursor<'_>, has_scheme: bool, has_authority: bool) -> Result<(), IriError> {
    let restrict_first_segment = !has_scheme && !has_authority;
    let mut in_first_segment = true;

    loop {
        let c = cur.peek();
        match c {
            EOF | '?' | '#' => return Ok(()),
            '/' => {
                in_first_segment = false;
                cur.bump();
            }
            ' ' => {
                return Err(IriError::grammar(Some(cur.char_pos()), "space is not permitted in path"))
            }
            '%' => {
                check_pct_encoded(cur, Component::Path)?;
            }
            ':' if restrict_first_segment && in_first_segment => {
                return Err(IriError::grammar(
                    Some(cur.char_pos()),
                    "a bare ':' is not permitted in the first segment of a scheme-less reference",
                ));
            }
            c if classify::is_ipchar(c) => {
                cur.bump();
            }
            _ => {
                return Err(IriError::grammar(
                    Some(cur.char_pos()),
                    format!("illegal character '{c}' in path"),
                ))
            }
        }
    }
}

/// query = *( ipchar / iprivate / "/" / "?" )
fn scan_query(cur: &mut Cursor<'_>) -> Result<(), IriError> {
    loop {
        let c = cur.peek();
        match c {
            EOF | '#' => return Ok(()),
            ' ' => {
                return Err(IriError::grammar(Some(cur.char_pos()), "space is not permitted in query"))
            }
            '%' => {
                check_pct_encoded(cur, Component::Query)?;
            }
            c if classify::is_iquery_char(c) => {
                cur.bump();
            }
            _ => {
                return Err(IriError::grammar(
                    Some(cur.char_pos()),
                    format!("illegal character '{c}' in query"),
                ))
            }
        }
    }
}

/// fragment = *( ipchar / "/" / "?" )  — note: no iprivate here.
fn scan_fragment(cur: &mut Cursor<'_>) -> Result<(), IriError> {
    loop {
        let c = cur.peek();
        match c {
            EOF => return Ok(()),
            ' ' => {
                return Err(IriError::grammar(
                    Some(cur.char_pos()),
                    "space is not permitted in fragment",
                ))
            }
            '%' => {
                check_pct_encoded(cur, Component::Fragment)?;
            }
            c if classify::is_ifragment_char(c) => {
                cur.bump();
            }
            _ => {
                return Err(IriError::grammar(
                    Some(cur.char_pos()),
                    format!("illegal character '{c}' in fragment"),
                ))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parsed(s: &str) -> Iri<'_> {
        parse(s).unwrap_or_else(|e| panic!("expected {s:?} to parse, got {e:?}"))
    }

    #[test]
    fn full_uri() {
        let iri = parsed("http://user@host:8081/abc/def?qs=ghi#jkl");
        assert_eq!(iri.scheme(), Some("http"));
        assert_eq!(iri.authority(), Some("user@host:8081"));
        assert_eq!(iri.path(), "/abc/def");
        assert_eq!(iri.query(), Some("qs=ghi"));
        assert_eq!(iri.fragment(), Some("jkl"));
    }

    #[test]
    fn mailto_has_no_authority() {
        let iri = parsed("mailto:support@example.com");
        assert_eq!(iri.scheme(), Some("mailto"));
        assert!(!iri.has_authority());
        assert_eq!(iri.path(), "support@example.com");
        assert_eq!(iri.query(), None);
        assert_eq!(iri.fragment(), None);
    }

    #[test]
    fn empty_string_is_valid() {
        let iri = parsed("");
        assert!(!iri.has_scheme());
        assert!(!iri.has_authority());
        assert_eq!(iri.path(), "");
        assert!(!iri.has_query());
        assert!(!iri.has_fragment());
    }

    #[test]
    fn bare_fragment_marker_is_present_but_empty() {
        let iri = parsed("#");
        assert!(iri.has_fragment());
        assert_eq!(iri.fragment(), Some(""));
        assert_eq!(iri.path(), "");
    }

    #[test]
    fn dot_and_dotdot_are_valid_relative_paths() {
        assert_eq!(parsed(".").path(), ".");
        assert_eq!(parsed("..").path(), "..");
    }

    #[test]
    fn ipv6_host_offsets_cover_brackets() {
        let iri = parsed("http://[::1]:8080/");
        assert_eq!(iri.host(), Some("[::1]"));
        assert_eq!(iri.port(), Some("8080"));
    }

    #[test]
    fn empty_authority_is_legal() {
        let iri = parsed("http://");
        assert_eq!(iri.authority(), Some(""));
        assert_eq!(iri.host(), Some(""));
        assert_eq!(iri.path(), "");
    }

    #[test]
    fn rejects_leading_colon() {
        assert!(parse(":segment").is_err());
    }

    #[test]
    fn rejects_empty_scheme_with_authority_marker() {
        assert!(parse("://host/xyz").is_err());
    }

    #[test]
    fn rejects_scheme_starting_with_digit() {
        assert!(parse("1://host/xyz").is_err());
    }

    #[test]
    fn rejects_illegal_scheme_char() {
        assert!(parse("a~b://host/xyz").is_err());
    }

    #[test]
    fn rejects_stray_space_in_path() {
        assert!(parse("http://abcdef:80/xyz /abc").is_err());
    }

    #[test]
    fn rejects_bad_host_port_syntax() {
        assert!(parse("http://abc:def:80/abc").is_err());
    }

    #[test]
    fn rejects_multiple_at_signs() {
        assert!(parse("ftp://abc@def@host/abc").is_err());
    }

    #[test]
    fn rejects_unterminated_ipv6_bracket() {
        assert!(parse("http://[::80/xyz").is_err());
    }

    #[test]
    fn rejects_empty_brackets() {
        assert!(parse("http://[]/xyz").is_err());
    }

    #[test]
    fn rejects_bad_pct_encoding_in_path() {
        assert!(parse("/abc%ZZdef").is_err());
    }

    #[test]
    fn rejects_truncated_pct_encoding() {
        assert!(parse("http://example/xyz%").is_err());
    }

    #[test]
    fn rejects_unescaped_gen_delims_in_fragment() {
        assert!(parse("http://eg.com/test.txt#xpointer(/unit[5])").is_err());
    }

    #[test]
    fn extra_leading_slash_is_part_of_path_not_authority() {
        // the first "//" right after ':' is the only authority marker; a
        // third '/' just starts an empty path segment.
        assert!(parse("scheme:////abc").is_ok());
    }

    #[test]
    fn scheme_less_first_segment_cannot_contain_colon() {
        assert!(parse("a:b/c").is_err());
        assert!(parse("a/b:c").is_ok());
    }
}
