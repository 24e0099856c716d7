//! Process-independent configuration for scheme-specific checks.
//!
//! The source this crate's grammar was distilled from exposed URN/FILE
//! strictness as module-level switches. Per the design notes, those are
//! modeled here as fields on an explicit `Context` value passed to
//! `Iri::check_scheme_specific_rules`, rather than process-wide statics,
//! so callers can vary strictness per call without needing external
//! synchronization.

use crate::error::IriError;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrnStrictness {
    /// NID must be at least 2 characters; NSS must be non-empty.
    Strict,
    /// NID may be a single character; NSS may be empty.
    NotStrict,
}

impl Default for UrnStrictness {
    fn default() -> Self {
        UrnStrictness::Strict
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStrictness {
    /// `file://host/path` is rejected outright.
    Strict,
    /// A non-empty authority on a `file:` URI is downgraded to a warning
    /// via the installed `ErrorPolicy` instead of rejected.
    NotStrict,
}

impl Default for FileStrictness {
    fn default() -> Self {
        FileStrictness::Strict
    }
}

/// An installable policy that may upgrade, suppress, or pass through a
/// detected violation. Returning `None` suppresses the error entirely;
/// returning `Some` (typically the same error, or `IriError::Warning`)
/// keeps it in the result.
pub type ErrorPolicy = Arc<dyn Fn(IriError) -> Option<IriError> + Send + Sync>;

#[derive(Clone, Default)]
pub struct Context {
    pub urn_strictness: UrnStrictness,
    pub file_strictness: FileStrictness,
    error_policy: Option<ErrorPolicy>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_urn_strictness(mut self, strictness: UrnStrictness) -> Self {
        self.urn_strictness = strictness;
        self
    }

    pub fn with_file_strictness(mut self, strictness: FileStrictness) -> Self {
        self.file_strictness = strictness;
        self
    }

    pub fn with_error_policy<F>(mut self, policy: F) -> Self
    where
        F: Fn(IriError) -> Option<IriError> + Send + Sync + 'static,
    {
        self.error_policy = Some(Arc::new(policy));
        self
    }

    /// Runs `err` through the installed policy, if any. The default
    /// policy passes every error through unchanged.
    pub(crate) fn apply_policy(&self, err: IriError) -> Option<IriError> {
        match &self.error_policy {
            Some(policy) => policy(err),
            None => Some(err),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("urn_strictness", &self.urn_strictness)
            .field("file_strictness", &self.file_strictness)
            .field("error_policy", &self.error_policy.is_some())
            .finish()
    }
}
