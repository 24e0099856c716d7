//! A single-pass, no-backtracking character cursor over `&str`.
//!
//! The grammar parser and the authority scanner both need to walk the
//! input left to right, peeking one code point at a time, without ever
//! stepping backwards. `Cursor::peek` returns a sentinel end-of-input
//! code point past the end of the string so boundary checks don't need a
//! separate `Option` dance at every call site.

use crate::classify;
use crate::error::IriError;

/// Sentinel returned by `peek`/`peek2` once the cursor runs past the end
/// of input. `'\0'` never appears as a legal character in any production
/// this crate parses, so it is safe to use as an out-of-band marker.
pub(crate) const EOF: char = '\u{0}';

#[derive(Debug, Clone, Copy)]
pub(crate) enum Component {
    Scheme,
    Authority,
    UserInfo,
    Host,
    Port,
    Path,
    Query,
    Fragment,
}

impl Component {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::Authority => "authority",
            Component::UserInfo => "userinfo",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    pub input: &'a str,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    #[inline]
    pub(crate) fn peek(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or(EOF)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub(crate) fn bump(&mut self) -> char {
        let c = self.peek();
        if c != EOF {
            self.pos += c.len_utf8();
        }
        c
    }

    pub(crate) fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    pub(crate) fn advance_by(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    /// 1-based character position for error reporting.
    pub(crate) fn char_pos(&self) -> usize {
        char_pos(self.input, self.pos)
    }
}

pub(crate) fn char_pos(input: &str, byte_pos: usize) -> usize {
    input[..byte_pos].chars().count() + 1
}

/// Validates and consumes a `%HH` triple. `cur` must be positioned on the
/// `%`. Returns an error naming `component` on a truncated or non-hex
/// continuation.
pub(crate) fn check_pct_encoded(cur: &mut Cursor<'_>, component: Component) -> Result<(), IriError> {
    let start = cur.char_pos();
    cur.bump(); // '%'
    let h1 = cur.peek();
    if h1 == EOF || !classify::is_hexdig(h1) {
        return Err(IriError::grammar(
            Some(start),
            format!(
                "truncated or invalid percent-encoded sequence in {}",
                component.name()
            ),
        ));
    }
    cur.bump();
    let h2 = cur.peek();
    if h2 == EOF || !classify::is_hexdig(h2) {
        return Err(IriError::grammar(
            Some(start),
            format!(
                "truncated or invalid percent-encoded sequence in {}",
                component.name()
            ),
        ));
    }
    cur.bump();
    Ok(())
}
