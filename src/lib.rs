//! A parser, validator, normalizer, resolver and recomposer for
//! Internationalized Resource Identifiers (RFC 3987) and their ASCII
//! subset, Uniform Resource Identifiers (RFC 3986).
//!
//! ```
//! use iri::Iri;
//!
//! let iri = Iri::parse("http://example.com/a/b?q=1#frag").unwrap();
//! assert_eq!(iri.scheme(), Some("http"));
//! assert_eq!(iri.host(), Some("example.com"));
//! assert_eq!(iri.path(), "/a/b");
//! ```
//!
//! An [`Iri`] is an immutable view over either a borrowed `&str` (from
//! [`Iri::parse`], zero-copy) or an owned `String` (from
//! [`Iri::normalize`], [`Iri::resolve`], or [`Builder::build`]). Every
//! component accessor slices the underlying source lazily from a table
//! of byte offsets recorded once, during the initial scan.

mod authority;
mod builder;
mod classify;
mod context;
mod cursor;
mod dns;
mod error;
mod host;
mod ipv6;
mod log_ext;
mod normalize;
mod offsets;
mod parser;
mod resolve;
mod scheme_rules;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub use builder::Builder;
pub use context::{Context, ErrorPolicy, FileStrictness, UrnStrictness};
pub use error::{IriError, Result};
pub use host::Host;

use offsets::Offsets;

/// A parsed IRI or IRI-reference.
///
/// `'a` is the lifetime of the source text when `Iri` borrows it (e.g.
/// from [`Iri::parse`]); component accessors return `&str` slices tied
/// to that same lifetime. Operations that must synthesize new text
/// (`normalize`, `resolve`, `relativize`, `rebuild`, `Builder::build`)
/// return `Iri<'static>`, owning their backing string.
#[derive(Clone)]
pub struct Iri<'a> {
    pub(crate) source: Cow<'a, str>,
    pub(crate) offsets: Offsets,
}

impl<'a> Iri<'a> {
    /// Parses `s` without copying. Fails on any grammar violation;
    /// performs no scheme-specific validation (see
    /// [`Iri::check_scheme_specific_rules`]).
    pub fn parse(s: &'a str) -> Result<Self> {
        parser::parse(s)
    }

    /// Parses an owned `String`, producing an `Iri<'static>`.
    pub fn parse_owned(s: String) -> Result<Iri<'static>> {
        parser::parse_owned(s)
    }

    /// Entry point for component-by-component construction.
    pub fn builder() -> Builder {
        Builder::new()
    }

    fn src(&self) -> &str {
        self.source.as_ref()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.offsets.scheme.map(|sp| sp.as_str(self.src()))
    }

    pub fn authority(&self) -> Option<&str> {
        self.offsets.authority.map(|sp| sp.as_str(self.src()))
    }

    pub fn user_info(&self) -> Option<&str> {
        self.offsets.userinfo.map(|sp| sp.as_str(self.src()))
    }

    pub fn host(&self) -> Option<&str> {
        self.offsets.host.map(|sp| sp.as_str(self.src()))
    }

    /// Parses [`Iri::host`] into its concrete shape (domain / IPv4 /
    /// IPv6 / IPvFuture). Returns `None` when there is no host at all.
    pub fn host_kind(&self) -> Option<Host<'_>> {
        self.host().map(host::classify)
    }

    pub fn port(&self) -> Option<&str> {
        self.offsets.port.map(|sp| sp.as_str(self.src()))
    }

    /// The path component. Always present, possibly empty — unlike the
    /// other components there is no syntactic distinction between an
    /// absent and an empty path.
    pub fn path(&self) -> &str {
        self.offsets.path.as_str(self.src())
    }

    /// The path split on `/`, including empty segments (so
    /// `"/a//b"` yields `["", "a", "", "b"]`).
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.path().split('/')
    }

    pub fn query(&self) -> Option<&str> {
        self.offsets.query.map(|sp| sp.as_str(self.src()))
    }

    pub fn fragment(&self) -> Option<&str> {
        self.offsets.fragment.map(|sp| sp.as_str(self.src()))
    }

    pub fn has_scheme(&self) -> bool {
        self.offsets.scheme.is_some()
    }

    pub fn has_authority(&self) -> bool {
        self.offsets.authority.is_some()
    }

    pub fn has_user_info(&self) -> bool {
        self.offsets.userinfo.is_some()
    }

    pub fn has_port(&self) -> bool {
        self.offsets.port.is_some()
    }

    pub fn has_query(&self) -> bool {
        self.offsets.query.is_some()
    }

    pub fn has_fragment(&self) -> bool {
        self.offsets.fragment.is_some()
    }

    /// A scheme is present and no fragment is carried (an absolute-URI
    /// per the grammar, not merely any URI-reference with a scheme).
    pub fn is_absolute(&self) -> bool {
        self.has_scheme() && !self.has_fragment()
    }

    pub fn is_relative(&self) -> bool {
        !self.has_scheme()
    }

    /// The path is empty or begins with `/`, i.e. this is not a
    /// `rootless-path` reference like `mailto:a@b` or `urn:x:y`.
    pub fn is_hierarchical(&self) -> bool {
        self.has_authority() || self.path().is_empty() || self.path().starts_with('/')
    }

    pub fn is_rootless(&self) -> bool {
        !self.is_hierarchical()
    }

    /// Renders a strict RFC 3986 `URI` form: every non-ASCII scalar
    /// value is percent-encoded as its UTF-8 byte sequence. A no-op,
    /// and zero-copy, for an already-ASCII `Iri`.
    pub fn as3986(&self) -> Cow<'_, str> {
        let src = self.src();
        if src.is_ascii() {
            return Cow::Borrowed(src);
        }
        let mut out = String::with_capacity(src.len());
        for ch in src.chars() {
            if ch.is_ascii() {
                out.push(ch);
            } else {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).as_bytes() {
                    out.push('%');
                    out.push_str(&format!("{byte:02X}"));
                }
            }
        }
        Cow::Owned(out)
    }

    /// Syntax-based normalization per RFC 3986 §6.2.2: lower-cases
    /// scheme and host, decodes percent-triples that encode an
    /// `unreserved` octet, upper-cases the hex digits of any triple that
    /// remains encoded, removes dot segments, and elides a default
    /// `http`/`https` port.
    pub fn normalize(&self) -> Iri<'static> {
        normalize::normalize(self)
    }

    /// Resolves `reference` against `self` as the base IRI, per RFC
    /// 3986 §5.2 ("Transform References"), using the strict
    /// interpretation (a same-scheme reference is still treated as
    /// absolute, matching current parsers rather than the historical
    /// workaround for parsers that couldn't tell a scheme from a path
    /// segment).
    pub fn resolve(&self, reference: &Iri<'_>) -> Iri<'static> {
        resolve::resolve(self, reference, true)
    }

    /// As [`Iri::resolve`], but with `strict = false`: a reference whose
    /// scheme equals `self`'s is treated as schemeless, per the
    /// backward-compatibility note in RFC 3986 §5.2.2.
    pub fn resolve_loose(&self, reference: &Iri<'_>) -> Iri<'static> {
        resolve::resolve(self, reference, false)
    }

    /// Best-effort inverse of [`Iri::resolve`]: the shortest reference
    /// that resolves back to `target` against `self` as the base, or
    /// `None` if `target` doesn't share `self`'s scheme and authority.
    pub fn relativize(&self, target: &Iri<'_>) -> Option<Iri<'static>> {
        resolve::relativize(self, target)
    }

    /// Recomposition per RFC 3986 §5.3, from this value's own
    /// components. Mostly useful after building an `Iri` up through
    /// [`Builder`] calls that mutate components piecemeal — for a
    /// freshly parsed `Iri` this returns an equivalent (not necessarily
    /// byte-identical, since fragment/query absence-vs-emptiness is
    /// preserved but insignificant whitespace never was) value.
    pub fn rebuild(&self) -> Iri<'static> {
        builder::rebuild_owned(self)
    }

    /// Runs the scheme-specific rules (`http`/`https`, `file`, `urn`,
    /// `uuid`) for whichever scheme this value carries. Unknown or
    /// absent schemes always succeed. Errors are passed through `ctx`'s
    /// installed [`ErrorPolicy`], if any, before being returned.
    pub fn check_scheme_specific_rules(&self, ctx: &Context) -> Result<()> {
        match scheme_rules::check(self, ctx) {
            Ok(()) => Ok(()),
            Err(e) => match ctx.apply_policy(e) {
                Some(e) => Err(e),
                None => Ok(()),
            },
        }
    }
}

impl<'a> fmt::Display for Iri<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.src())
    }
}

impl<'a> fmt::Debug for Iri<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iri").field("source", &self.src()).finish()
    }
}

impl<'a> PartialEq for Iri<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.src() == other.src()
    }
}

impl<'a> Eq for Iri<'a> {}

impl FromStr for Iri<'static> {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self> {
        Iri::parse_owned(s.to_string())
    }
}

/// Parses `s` and, if it succeeds, also runs the default scheme-specific
/// rules (`Context::default()`). A convenience for callers who want a
/// single "is this IRI fully valid" check without an explicit `Context`.
pub fn check(s: &str) -> Result<()> {
    let iri = Iri::parse(s)?;
    iri.check_scheme_specific_rules(&Context::new())
}
