//! Syntax-based normalization — RFC 3986 §6.2.2.
//!
//! Case normalization of scheme and percent-encoding triplets,
//! percent-decoding of unreserved octets, removal of dot segments, and
//! default-port elision. Never touches scheme-specific semantics (e.g.
//! it does not know `http` defaults to port 80 independently of the
//! scheme rules module re-checking the result).

use crate::classify;
use crate::Iri;

pub(crate) fn normalize(iri: &Iri<'_>) -> Iri<'static> {
    crate::log_ext::iri_trace!("normalizing {:?}", iri.to_string());
    let scheme = iri.scheme().map(|s| s.to_ascii_lowercase());
    let userinfo = iri.user_info().map(normalize_pct_encoding);
    let host = iri.host().map(normalize_host);
    let port = iri.port().and_then(|p| strip_default_port(scheme.as_deref(), p));
    let path = remove_dot_segments(&normalize_pct_encoding(iri.path()));
    let path = if iri.has_authority() && path.is_empty() {
        "/".to_string()
    } else {
        path
    };
    let query = iri.query().map(normalize_pct_encoding);
    let fragment = iri.fragment().map(normalize_pct_encoding);

    let mut out = String::new();
    if let Some(s) = &scheme {
        out.push_str(s);
        out.push(':');
    }
    if iri.has_authority() {
        out.push_str("//");
        if let Some(ui) = &userinfo {
            out.push_str(ui);
            out.push('@');
        }
        if let Some(h) = &host {
            out.push_str(h);
        }
        if let Some(p) = &port {
            out.push(':');
            out.push_str(p);
        }
    }
    out.push_str(&path);
    if let Some(q) = &query {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = &fragment {
        out.push('#');
        out.push_str(f);
    }

    let result = crate::parser::parse_owned(out)
        .expect("normalization must preserve grammar validity");
    crate::log_ext::iri_trace!("normalized to {:?}", result.to_string());
    result
}

/// Lower-cases a host; an IP-literal's hex digits are lower-cased too,
/// but the IPvFuture version tag and bracket characters are left alone.
fn normalize_host(host: &str) -> String {
    host.to_ascii_lowercase()
}

/// Decodes percent-triples that encode an `unreserved` octet, and
/// upper-cases the hex digits of every triple that remains encoded.
pub(crate) fn normalize_pct_encoding(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h1), Some(h2)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                let byte = (h1 << 4) | h2;
                if byte.is_ascii() && classify::is_unreserved(byte as char) {
                    out.push(byte as char);
                } else {
                    out.push('%');
                    out.push(bytes[i + 1].to_ascii_uppercase() as char);
                    out.push(bytes[i + 2].to_ascii_uppercase() as char);
                }
                i += 3;
                continue;
            }
        }
        // Safe: we only ever skip whole UTF-8 scalar values via chars().
        let ch = s[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn strip_default_port(scheme: Option<&str>, port: &str) -> Option<String> {
    let is_default = match scheme {
        Some("http") => port == "80",
        Some("https") => port == "443",
        _ => false,
    };
    if port.is_empty() || is_default {
        None
    } else {
        Some(port.to_string())
    }
}

/// RFC 3986 §5.2.4, the canonical input/output buffer algorithm. A
/// segment-based rewrite is tempting but wrong: it naturally eats
/// interior empty segments (consecutive slashes), which the buffer
/// algorithm preserves verbatim.
pub(crate) fn remove_dot_segments(path: &str) -> String {
    let mut input = path.to_string();
    let mut output = String::new();

    while !input.is_empty() {
        if input.starts_with("../") {
            input.replace_range(..3, "");
        } else if input.starts_with("./") {
            input.replace_range(..2, "");
        } else if input.starts_with("/./") {
            input.replace_range(..3, "/");
        } else if input == "/." {
            input.replace_range(..2, "/");
        } else if input.starts_with("/../") {
            input.replace_range(..4, "/");
            remove_last_segment(&mut output);
        } else if input == "/.." {
            input.replace_range(..3, "/");
            remove_last_segment(&mut output);
        } else if input == "." || input == ".." {
            input.clear();
        } else {
            // initial '/' (if any) plus everything up to, but not
            // including, the next '/'.
            let slash_end = if let Some(rest) = input.strip_prefix('/') {
                1 + rest.find('/').unwrap_or(rest.len())
            } else {
                input.find('/').unwrap_or(input.len())
            };
            let (segment, remainder) = input.split_at(slash_end);
            output.push_str(segment);
            input = remainder.to_string();
        }
    }

    output
}

/// Removes the last `"/segment"` from `output`, including its leading
/// `/` if present, per the "remove the last segment and its preceding
/// '/'" step of the dot-segment algorithm.
fn remove_last_segment(output: &mut String) {
    match output.rfind('/') {
        Some(idx) => output.truncate(idx),
        None => output.clear(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dot_segments_mid_path() {
        assert_eq!(remove_dot_segments("/a/./b/../b/c"), "/a/b/c");
    }

    #[test]
    fn trailing_dotdot_with_slash() {
        assert_eq!(remove_dot_segments("/a/../"), "/");
    }

    #[test]
    fn bare_dotdot() {
        assert_eq!(remove_dot_segments("/.."), "/");
    }

    #[test]
    fn runs_of_empty_segments_collapse_dots_only() {
        assert_eq!(remove_dot_segments("//.//..//"), "///");
    }

    #[test]
    fn pct_decodes_unreserved_and_uppercases_rest() {
        assert_eq!(normalize_pct_encoding("%41%2d%7e%2f"), "A-~%2F");
    }

    #[test]
    fn scheme_is_lowercased_and_default_port_elided() {
        let iri = crate::parser::parse("HTTP://Example.COM:80/a/./b").unwrap();
        let n = normalize(&iri);
        assert_eq!(n.to_string(), "http://example.com/a/b");
    }

    #[test]
    fn non_default_port_is_kept() {
        let iri = crate::parser::parse("http://example.com:8080/").unwrap();
        let n = normalize(&iri);
        assert_eq!(n.to_string(), "http://example.com:8080/");
    }

    #[test]
    fn empty_path_with_authority_becomes_slash() {
        let iri = crate::parser::parse("http://example.com").unwrap();
        let n = normalize(&iri);
        assert_eq!(n.to_string(), "http://example.com/");
    }
}
