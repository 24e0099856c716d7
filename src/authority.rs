//! Authority scanner — RFC 3986 §3.2.
//!
//! ```text
//! authority = [ userinfo "@" ] host [ ":" port ]
//! ```
//!
//! A single pass over the authority substring records the position of
//! the (at most one) `@`, validates bracket balance for an IP-literal,
//! and defers the host/port split to a second, purely textual pass once
//! the substring's extent and `@` position are known. `ipv6::validate`
//! is invoked on any bracketed host.

use crate::classify;
use crate::cursor::{check_pct_encoded, Component, Cursor};
use crate::error::IriError;
use crate::ipv6;
use crate::offsets::Span;

pub(crate) struct AuthorityParts {
    pub userinfo: Option<Span>,
    pub host: Span,
    pub port: Option<Span>,
}

/// `cur` must be positioned right after the leading `"//"`. Advances `cur`
/// to the first byte not part of the authority (i.e. `/`, `?`, `#`, or
/// end of input).
pub(crate) fn scan<'a>(cur: &mut Cursor<'a>) -> Result<AuthorityParts, IriError> {
    let auth_start = cur.pos;
    let mut at_pos: Option<usize> = None;
    let mut in_brackets = false;
    let mut saw_brackets = false;

    loop {
        let c = cur.peek();
        match c {
            crate::cursor::EOF | '/' | '?' | '#' => break,
            '@' => {
                if in_brackets {
                    return Err(IriError::grammar(
                        Some(cur.char_pos()),
                        "'@' is not permitted inside an IP-literal",
                    ));
                }
                if at_pos.is_some() {
                    return Err(IriError::grammar(
                        Some(cur.char_pos()),
                        "authority must not contain more than one '@'",
                    ));
                }
                at_pos = Some(cur.pos);
                cur.bump();
            }
            '[' => {
                if saw_brackets {
                    return Err(IriError::grammar(Some(cur.char_pos()), "misplaced '['"));
                }
                in_brackets = true;
                saw_brackets = true;
                cur.bump();
            }
            ']' => {
                if !in_brackets {
                    return Err(IriError::grammar(Some(cur.char_pos()), "unmatched ']'"));
                }
                in_brackets = false;
                cur.bump();
            }
            '%' => {
                check_pct_encoded(cur, Component::Authority)?;
            }
            ':' => {
                cur.bump();
            }
            _ if in_brackets => {
                // IPv6/IPvFuture body characters are validated later, on
                // the extracted literal substring.
                cur.bump();
            }
            c if classify::is_unreserved(c) || classify::is_sub_delim(c) || classify::is_ucschar(c) => {
                cur.bump();
            }
            _ => {
                return Err(IriError::grammar(
                    Some(cur.char_pos()),
                    format!("illegal character '{c}' in authority"),
                ))
            }
        }
    }

    if in_brackets {
        return Err(IriError::grammar(Some(cur.char_pos()), "unmatched '['"));
    }

    let auth_end = cur.pos;
    let input = cur.input;

    if let Some(p) = at_pos {
        if p == auth_start {
            return Err(IriError::grammar(
                Some(crate::cursor::char_pos(input, auth_start)),
                "userinfo must not be empty before '@'",
            ));
        }
        let userinfo_str = &input[auth_start..p];
        if userinfo_str.matches(':').count() > 1 {
            return Err(IriError::grammar(
                Some(crate::cursor::char_pos(input, auth_start)),
                "multiple colons in userinfo",
            ));
        }
        let userinfo_span = Span::new(auth_start, p);
        let hostport_start = p + 1;
        let (host, port) = split_host_port(input, hostport_start, &input[hostport_start..auth_end])?;
        Ok(AuthorityParts {
            userinfo: Some(userinfo_span),
            host,
            port,
        })
    } else {
        let (host, port) = split_host_port(input, auth_start, &input[auth_start..auth_end])?;
        Ok(AuthorityParts {
            userinfo: None,
            host,
            port,
        })
    }
}

fn split_host_port(
    input: &str,
    base: usize,
    hostport: &str,
) -> Result<(Span, Option<Span>), IriError> {
    if let Some(rest_after_open) = hostport.strip_prefix('[') {
        let close = rest_after_open.find(']').ok_or_else(|| {
            IriError::grammar(Some(crate::cursor::char_pos(input, base)), "unmatched '['")
        })?;
        let literal_end = base + 1 + close + 1; // position just past ']'
        let literal = &hostport[..=1 + close];
        ipv6::validate(literal, crate::cursor::char_pos(input, base))?;

        let host_span = Span::new(base, literal_end);
        let rest = &hostport[1 + close + 1..];
        if rest.is_empty() {
            return Ok((host_span, None));
        }
        if let Some(port_str) = rest.strip_prefix(':') {
            validate_port_digits(input, literal_end + 1, port_str)?;
            let port_start = literal_end + 1;
            return Ok((host_span, Some(Span::new(port_start, port_start + port_str.len()))));
        }
        Err(IriError::grammar(
            Some(crate::cursor::char_pos(input, literal_end)),
            "illegal character after IP-literal",
        ))
    } else {
        match hostport.find(':') {
            None => Ok((Span::new(base, base + hostport.len()), None)),
            Some(idx) => {
                let host_span = Span::new(base, base + idx);
                let port_str = &hostport[idx + 1..];
                validate_port_digits(input, base + idx + 1, port_str)?;
                let port_start = base + idx + 1;
                Ok((host_span, Some(Span::new(port_start, port_start + port_str.len()))))
            }
        }
    }
}

fn validate_port_digits(input: &str, port_start: usize, port_str: &str) -> Result<(), IriError> {
    if port_str.contains(':') {
        return Err(IriError::grammar(
            Some(crate::cursor::char_pos(input, port_start)),
            "more than one ':' outside an IP-literal",
        ));
    }
    if !port_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IriError::grammar(
            Some(crate::cursor::char_pos(input, port_start)),
            "port must contain only digits",
        ));
    }
    Ok(())
}
