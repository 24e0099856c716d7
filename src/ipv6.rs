//! IPv6 / IPvFuture literal grammar, per RFC 3986 §3.2.2:
//!
//! ```text
//! IP-literal  = "[" ( IPv6address / IPvFuture ) "]"
//! IPv6address = 6( h16 ":" ) ls32
//!             / "::" 5( h16 ":" ) ls32
//!             / [               h16 ] "::" 4( h16 ":" ) ls32
//!             / [ *1( h16 ":" ) h16 ] "::" 3( h16 ":" ) ls32
//!             / [ *2( h16 ":" ) h16 ] "::" 2( h16 ":" ) ls32
//!             / [ *3( h16 ":" ) h16 ] "::"    h16 ":"   ls32
//!             / [ *4( h16 ":" ) h16 ] "::"              ls32
//!             / [ *5( h16 ":" ) h16 ] "::"              h16
//!             / [ *6( h16 ":" ) h16 ] "::"
//! IPvFuture   = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
//! ```
//!
//! Rather than enumerate those nine alternatives (as a combinator parser
//! naturally would), this follows the design note in the spec: the
//! grammar is equivalent to a single `h16 (":" h16){0..6} ["::" (h16
//! (":" h16){0..6})?] [ls32]` scan with separately-checked field-count
//! constraints. One pass collects field counts before and after an
//! optional `"::"`; the constraints are then checked once at the end.

use crate::classify;
use crate::error::IriError;

/// `literal` includes the surrounding `[` and `]`. `base` is the 1-based
/// character position of `literal`'s first byte in the original input,
/// used to report accurate error positions.
pub(crate) fn validate(literal: &str, base_char_pos: usize) -> Result<(), IriError> {
    if literal.len() < 2 || !literal.starts_with('[') || !literal.ends_with(']') {
        return Err(IriError::ipv6(Some(base_char_pos), "IP-literal must be enclosed in '[' ']'"));
    }
    let inner = &literal[1..literal.len() - 1];
    let inner_pos = base_char_pos + 1;
    if inner.starts_with(['v', 'V']) {
        validate_ipv_future(inner, inner_pos)
    } else {
        validate_ipv6(inner, inner_pos)
    }
}

fn validate_ipv_future(s: &str, base_char_pos: usize) -> Result<(), IriError> {
    let rest = &s[1..]; // skip 'v'/'V'
    let dot = rest.find('.').ok_or_else(|| {
        IriError::ipv6(Some(base_char_pos), "IPvFuture requires a '.' after the version")
    })?;
    let version = &rest[..dot];
    if version.is_empty() || !version.chars().all(classify::is_hexdig) {
        return Err(IriError::ipv6(
            Some(base_char_pos),
            "IPvFuture version must be one or more hex digits",
        ));
    }
    let body = &rest[dot + 1..];
    if body.is_empty()
        || !body
            .chars()
            .all(|c| classify::is_unreserved(c) || classify::is_sub_delim(c) || c == ':')
    {
        return Err(IriError::ipv6(
            Some(base_char_pos),
            "IPvFuture body must be unreserved / sub-delims / ':'",
        ));
    }
    Ok(())
}

fn validate_ipv6(s: &str, base_char_pos: usize) -> Result<(), IriError> {
    if s.is_empty() {
        return Err(IriError::ipv6(Some(base_char_pos), "empty IPv6 literal"));
    }
    if !s.is_ascii() {
        return Err(IriError::ipv6(Some(base_char_pos), "IPv6 literal must be ASCII"));
    }
    let bytes = s.as_bytes();
    let n = bytes.len();
    let mut i = 0usize;
    let mut before_fields = 0u32;
    let mut after_fields = 0u32;
    let mut seen_double_colon = false;
    let mut has_ipv4_tail = false;

    if s.starts_with("::") {
        seen_double_colon = true;
        i = 2;
    }

    while i < n {
        let h16_start = i;
        let mut j = i;
        while j < n && j - i < 4 && is_hex_byte(bytes[j]) {
            j += 1;
        }
        if j == h16_start {
            return Err(IriError::ipv6(
                Some(base_char_pos + i),
                "expected 1-4 hex digits (h16)",
            ));
        }

        if j < n && bytes[j] == b'.' {
            // The field we just scanned is actually the first octet of an
            // embedded IPv4 dotted-quad that must close the literal.
            let quad = &s[h16_start..];
            validate_ipv4_dotted_quad(quad, base_char_pos + h16_start)?;
            has_ipv4_tail = true;
            if seen_double_colon {
                after_fields += 2;
            } else {
                before_fields += 2;
            }
            i = n;
            break;
        }

        if seen_double_colon {
            after_fields += 1;
        } else {
            before_fields += 1;
        }
        i = j;

        if i >= n {
            break;
        }
        if i + 1 < n && bytes[i] == b':' && bytes[i + 1] == b':' {
            if seen_double_colon {
                return Err(IriError::ipv6(
                    Some(base_char_pos + i),
                    "'::' may appear at most once in an IPv6 literal",
                ));
            }
            seen_double_colon = true;
            i += 2;
        } else if bytes[i] == b':' {
            i += 1;
        } else {
            return Err(IriError::ipv6(
                Some(base_char_pos + i),
                "unexpected character in IPv6 literal",
            ));
        }
    }

    let total = before_fields + after_fields;
    if !seen_double_colon {
        if total != 8 {
            return Err(IriError::ipv6(
                Some(base_char_pos),
                format!(
                    "IPv6 literal without '::' must have exactly 8 fields, found {total}"
                ),
            ));
        }
    } else {
        let max_total = if has_ipv4_tail { 6 } else { 7 };
        if total > max_total {
            return Err(IriError::ipv6(
                Some(base_char_pos),
                format!(
                    "compressed IPv6 literal has too many fields ({total} > {max_total})"
                ),
            ));
        }
    }

    Ok(())
}

#[inline]
fn is_hex_byte(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Four decimal octets, 1-3 digits each, 0-255, no leading zero unless the
/// octet is exactly "0".
fn validate_ipv4_dotted_quad(s: &str, base_char_pos: usize) -> Result<(), IriError> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return Err(IriError::ipv6(
            Some(base_char_pos),
            "embedded IPv4 address must have exactly four octets",
        ));
    }
    for part in parts {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IriError::ipv6(
                Some(base_char_pos),
                "IPv4 octet must be 1-3 decimal digits",
            ));
        }
        if part.len() > 1 && part.starts_with('0') {
            return Err(IriError::ipv6(
                Some(base_char_pos),
                "IPv4 octet must not have a leading zero",
            ));
        }
        let value: u32 = part.parse().unwrap();
        if value > 255 {
            return Err(IriError::ipv6(Some(base_char_pos), "IPv4 octet out of range 0-255"));
        }
    }
    Ok(())
}
