//! Character predicates over Unicode scalar values.
//!
//! These mirror the productions named in RFC 3986 §2 and RFC 3987 §2.2:
//! `ALPHA`, `DIGIT`, `HEXDIG`, `unreserved`, `sub-delims`, `ucschar` and
//! `iprivate`. Everything here operates on `char`, not bytes, so it is
//! correct for the full range of Unicode scalar values rather than only
//! the 16-bit code units the original URI RFCs were written against.

#[inline]
pub(crate) fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub(crate) fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub(crate) fn is_hexdig(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
#[inline]
pub(crate) fn is_scheme_char(c: char) -> bool {
    is_alpha(c) || is_digit(c) || c == '+' || c == '-' || c == '.'
}

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
#[inline]
pub(crate) fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
#[inline]
pub(crate) fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

/// gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"
#[inline]
pub(crate) fn is_gen_delim(c: char) -> bool {
    matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

/// RFC 3987 ucschar — the non-ASCII code points an IRI may carry directly
/// without percent-encoding. Ranges taken from RFC 3987 §2.2, operating on
/// full Unicode scalar values (no surrogate handling is needed in Rust:
/// `char` only ever holds a valid scalar value).
#[inline]
pub(crate) fn is_ucschar(c: char) -> bool {
    matches!(c,
        '\u{00A0}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFEF}'
        | '\u{10000}'..='\u{1FFFD}'
        | '\u{20000}'..='\u{2FFFD}'
        | '\u{30000}'..='\u{3FFFD}'
        | '\u{40000}'..='\u{4FFFD}'
        | '\u{50000}'..='\u{5FFFD}'
        | '\u{60000}'..='\u{6FFFD}'
        | '\u{70000}'..='\u{7FFFD}'
        | '\u{80000}'..='\u{8FFFD}'
        | '\u{90000}'..='\u{9FFFD}'
        | '\u{A0000}'..='\u{AFFFD}'
        | '\u{B0000}'..='\u{BFFFD}'
        | '\u{C0000}'..='\u{CFFFD}'
        | '\u{D0000}'..='\u{DFFFD}'
        | '\u{E0000}'..='\u{EFFFD}'
    )
}

/// RFC 3987 iprivate — allowed in query only, never in fragment.
#[inline]
pub(crate) fn is_iprivate(c: char) -> bool {
    matches!(c,
        '\u{E000}'..='\u{F8FF}'
        | '\u{F0000}'..='\u{FFFFD}'
        | '\u{100000}'..='\u{10FFFD}'
    )
}

#[inline]
pub(crate) fn is_iunreserved(c: char) -> bool {
    is_unreserved(c) || is_ucschar(c)
}

/// ipchar = iunreserved / pct-encoded / sub-delims / ":" / "@"
/// ('%' itself is handled by the caller, which validates the full triple.)
#[inline]
pub(crate) fn is_ipchar(c: char) -> bool {
    is_iunreserved(c) || is_sub_delim(c) || c == ':' || c == '@'
}

/// Characters allowed in userinfo, excluding the '%' escape (validated
/// separately) and the ':' / '@' delimiters (handled by the caller).
#[inline]
pub(crate) fn is_userinfo_char(c: char) -> bool {
    is_iunreserved(c) || is_sub_delim(c)
}

/// ireg-name = *( iunreserved / pct-encoded / sub-delims )
#[inline]
pub(crate) fn is_reg_name_char(c: char) -> bool {
    is_iunreserved(c) || is_sub_delim(c)
}

/// Query/fragment characters beyond ipchar: "/" and "?".
#[inline]
pub(crate) fn is_iquery_char(c: char) -> bool {
    is_ipchar(c) || is_iprivate(c) || c == '/' || c == '?'
}

#[inline]
pub(crate) fn is_ifragment_char(c: char) -> bool {
    is_ipchar(c) || c == '/' || c == '?'
}
