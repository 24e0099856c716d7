//! Recomposition (RFC 3986 §5.3) and the fluent `Builder` used to
//! construct an `Iri` component-by-component instead of from a single
//! source string.

use crate::error::IriError;
use crate::Iri;

/// §5.3 "Component Recomposition", applied to whatever components the
/// caller currently has set on `iri` (used by [`crate::Iri::rebuild`] to
/// round-trip through the same pseudocode the RFC gives for recomposing
/// a parsed reference back into a string).
pub(crate) fn rebuild_owned(iri: &Iri<'_>) -> Iri<'static> {
    let mut out = String::new();
    if let Some(scheme) = iri.scheme() {
        out.push_str(scheme);
        out.push(':');
    }
    if let Some(authority) = iri.authority() {
        out.push_str("//");
        out.push_str(authority);
    }
    out.push_str(iri.path());
    if let Some(query) = iri.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = iri.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    crate::parser::parse_owned(out).expect("rebuilt components must remain grammatically valid")
}

/// Fluent construction of an `Iri` from individually-supplied
/// components, recomposed and re-validated on [`Builder::build`].
#[derive(Debug, Default, Clone)]
pub struct Builder {
    scheme: Option<String>,
    userinfo: Option<String>,
    host: Option<String>,
    port: Option<String>,
    force_authority: bool,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn userinfo(mut self, userinfo: impl Into<String>) -> Self {
        self.userinfo = Some(userinfo.into());
        self.force_authority = true;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self.force_authority = true;
        self
    }

    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self.force_authority = true;
        self
    }

    /// Forces an (otherwise empty) authority to appear, as in
    /// `file:///path`.
    pub fn authority(mut self) -> Self {
        self.force_authority = true;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn build(self) -> Result<Iri<'static>, IriError> {
        let mut out = String::new();
        if let Some(scheme) = &self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        if self.force_authority {
            out.push_str("//");
            if let Some(userinfo) = &self.userinfo {
                out.push_str(userinfo);
                out.push('@');
            }
            if let Some(host) = &self.host {
                out.push_str(host);
            }
            if let Some(port) = &self.port {
                out.push(':');
                out.push_str(port);
            }
        }
        out.push_str(&self.path);
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        crate::parser::parse_owned(out)
    }
}
