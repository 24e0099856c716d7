//! Error taxonomy: grammar errors, IPv6/IPvFuture errors and
//! scheme-specific errors, each optionally carrying a 1-based character
//! position.
//!
//! The teacher crate's `ParseError` carried only a `Failed` variant with
//! no position and no `std::error::Error` impl. `thiserror` replaces that
//! hand-rolled `Display`, matching how the rest of this pack (e.g.
//! `vice-core`, `tsue-rc`) derives its error enums.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IriError {
    /// A character is not permitted in the component currently being
    /// scanned, a malformed percent-encoding, a stray space, or any other
    /// violation of the top-level or authority grammar.
    #[error("grammar error: {message} (position {pos:?})")]
    Grammar { pos: Option<usize>, message: String },

    /// The IPv6/IPvFuture literal grammar (h16/"::"/ls32 field-count
    /// rules, embedded IPv4) was violated.
    #[error("IPv6 literal error: {message} (position {pos:?})")]
    Ipv6 { pos: Option<usize>, message: String },

    /// A scheme-specific rule (http/https, file, urn, uuid) rejected an
    /// otherwise grammatically valid IRI.
    #[error("scheme-specific error: {message}")]
    Scheme { message: String },

    /// An advisory violation that an installed `ErrorPolicy` chose to
    /// downgrade rather than reject.
    #[error("warning: {0}")]
    Warning(String),
}

impl IriError {
    pub(crate) fn grammar(pos: Option<usize>, message: impl Into<String>) -> Self {
        IriError::Grammar {
            pos,
            message: message.into(),
        }
    }

    pub(crate) fn ipv6(pos: Option<usize>, message: impl Into<String>) -> Self {
        IriError::Ipv6 {
            pos,
            message: message.into(),
        }
    }

    pub(crate) fn scheme(message: impl Into<String>) -> Self {
        IriError::Scheme {
            message: message.into(),
        }
    }

    /// The 1-based character position of the failure, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            IriError::Grammar { pos, .. } | IriError::Ipv6 { pos, .. } => *pos,
            IriError::Scheme { .. } | IriError::Warning(_) => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, IriError>;
