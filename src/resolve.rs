//! Reference resolution — RFC 3986 §5.2 ("Transform References") — and
//! its best-effort inverse, relativization.

use crate::normalize::remove_dot_segments;
use crate::Iri;

/// Resolves `reference` against `self` as the base, per §5.2.2 (pseudocode
/// `T.*` assignments). `strict` controls the historical parser
/// workaround in §5.2.2: when `false`, a reference whose scheme matches
/// the base's scheme is treated as if no scheme were present, mirroring
/// old parsers that could not be trusted to omit the scheme component on
/// same-document relative references.
pub(crate) fn resolve(base: &Iri<'_>, reference: &Iri<'_>, strict: bool) -> Iri<'static> {
    crate::log_ext::iri_trace!(
        "resolving {:?} against base {:?}",
        reference.to_string(),
        base.to_string()
    );
    let r_has_scheme = reference.has_scheme() && (strict || reference.scheme() != base.scheme());
    crate::log_ext::iri_debug!("reference treated as having a scheme: {}", r_has_scheme);

    let (scheme, authority, path, query);

    if r_has_scheme {
        scheme = reference.scheme().map(str::to_string);
        authority = reference.authority().map(str::to_string);
        path = remove_dot_segments(reference.path());
        query = reference.query().map(str::to_string);
    } else if reference.has_authority() {
        scheme = base.scheme().map(str::to_string);
        authority = reference.authority().map(str::to_string);
        path = remove_dot_segments(reference.path());
        query = reference.query().map(str::to_string);
    } else if reference.path().is_empty() {
        scheme = base.scheme().map(str::to_string);
        authority = base.authority().map(str::to_string);
        path = base.path().to_string();
        query = reference.query().or(base.query()).map(str::to_string);
    } else {
        scheme = base.scheme().map(str::to_string);
        authority = base.authority().map(str::to_string);
        path = if reference.path().starts_with('/') {
            remove_dot_segments(reference.path())
        } else {
            remove_dot_segments(&merge(base, reference.path()))
        };
        query = reference.query().map(str::to_string);
    }

    let fragment = reference.fragment().map(str::to_string);

    let mut out = String::new();
    if let Some(s) = &scheme {
        out.push_str(s);
        out.push(':');
    }
    if let Some(a) = &authority {
        out.push_str("//");
        out.push_str(a);
        out.push_str(&path);
    } else {
        out.push_str(&path);
    }
    if let Some(q) = &query {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = &fragment {
        out.push('#');
        out.push_str(f);
    }

    let result = crate::parser::parse_owned(out).expect("resolution must preserve grammar validity");
    crate::log_ext::iri_trace!("resolved to {:?}", result.to_string());
    result
}

/// §5.3 "Merge Paths": if the base has an authority and an empty path,
/// the merge result is the reference path prefixed with "/"; otherwise
/// it is everything up to, and including, the base path's last "/",
/// followed by the reference path.
fn merge(base: &Iri<'_>, reference_path: &str) -> String {
    if base.has_authority() && base.path().is_empty() {
        format!("/{reference_path}")
    } else {
        match base.path().rfind('/') {
            Some(idx) => format!("{}{}", &base.path()[..=idx], reference_path),
            None => reference_path.to_string(),
        }
    }
}

/// Best-effort inverse of [`resolve`]: produces the shortest reference
/// that resolves back to `target` against `base`, or `None` when the
/// two don't share enough structure (different scheme or authority) to
/// be related by a relative reference at all.
pub(crate) fn relativize(base: &Iri<'_>, target: &Iri<'_>) -> Option<Iri<'static>> {
    crate::log_ext::iri_trace!(
        "relativizing {:?} against base {:?}",
        target.to_string(),
        base.to_string()
    );
    if base.scheme() != target.scheme() || base.authority() != target.authority() {
        crate::log_ext::iri_debug!("relativize bailed: scheme or authority differs");
        return None;
    }

    let base_segments: Vec<&str> = base.path().split('/').collect();
    let target_segments: Vec<&str> = target.path().split('/').collect();

    let base_dir = if base_segments.is_empty() {
        &base_segments[..]
    } else {
        &base_segments[..base_segments.len() - 1]
    };

    let common = base_dir
        .iter()
        .zip(target_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let up_count = base_dir.len().saturating_sub(common);
    let mut relative_path = String::new();
    for _ in 0..up_count {
        relative_path.push_str("../");
    }
    relative_path.push_str(&target_segments[common..].join("/"));
    if relative_path.is_empty() {
        relative_path.push('.');
    }

    // A first segment containing ':' would be re-parsed as a scheme by
    // `scan_scheme` on a later `resolve()` call; escape it with a
    // same-directory prefix so the round trip stays lossless.
    if up_count == 0 {
        let first_segment = relative_path.split('/').next().unwrap_or("");
        if first_segment.contains(':') {
            relative_path.insert_str(0, "./");
        }
    }

    let mut out = relative_path;
    if let Some(q) = target.query() {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = target.fragment() {
        out.push('#');
        out.push_str(f);
    }

    let result = crate::parser::parse_owned(out).ok();
    if let Some(r) = &result {
        crate::log_ext::iri_trace!("relativized to {:?}", r.to_string());
    }
    result
}

#[cfg(test)]
mod test {
    use crate::parser::parse;

    fn resolved(base: &str, reference: &str) -> String {
        let b = parse(base).unwrap();
        let r = parse(reference).unwrap();
        super::resolve(&b, &r, true).to_string()
    }

    const BASE: &str = "http://a/b/c/d;p?q";

    #[test]
    fn normal_examples() {
        assert_eq!(resolved(BASE, "g"), "http://a/b/c/g");
        assert_eq!(resolved(BASE, "./g"), "http://a/b/c/g");
        assert_eq!(resolved(BASE, "g/"), "http://a/b/c/g/");
        assert_eq!(resolved(BASE, "/g"), "http://a/g");
        assert_eq!(resolved(BASE, "//g"), "http://g");
        assert_eq!(resolved(BASE, "?y"), "http://a/b/c/d;p?y");
        assert_eq!(resolved(BASE, "g?y"), "http://a/b/c/g?y");
        assert_eq!(resolved(BASE, "#s"), "http://a/b/c/d;p?q#s");
        assert_eq!(resolved(BASE, "g#s"), "http://a/b/c/g#s");
        assert_eq!(resolved(BASE, ""), "http://a/b/c/d;p?q");
        assert_eq!(resolved(BASE, "."), "http://a/b/c/");
        assert_eq!(resolved(BASE, "./"), "http://a/b/c/");
        assert_eq!(resolved(BASE, ".."), "http://a/b/");
        assert_eq!(resolved(BASE, "../.."), "http://a/");
        assert_eq!(resolved(BASE, "../../g"), "http://a/g");
    }

    #[test]
    fn abnormal_examples() {
        assert_eq!(resolved(BASE, "../../../g"), "http://a/g");
        assert_eq!(resolved(BASE, "/./g"), "http://a/g");
        assert_eq!(resolved(BASE, "/../g"), "http://a/g");
        assert_eq!(resolved(BASE, "g."), "http://a/b/c/g.");
        assert_eq!(resolved(BASE, ".g"), "http://a/b/c/.g");
    }

    #[test]
    fn relativize_is_inverse_on_same_directory() {
        let base = parse("http://a/b/c/d").unwrap();
        let target = parse("http://a/b/c/g").unwrap();
        let rel = super::relativize(&base, &target).unwrap();
        assert_eq!(rel.to_string(), "g");
        let back = super::resolve(&base, &rel, true);
        assert_eq!(back.to_string(), target.to_string());
    }

    #[test]
    fn relativize_escapes_a_colon_bearing_first_segment() {
        let base = parse("http://a/b/c/d").unwrap();
        let target = parse("http://a/b/c/e:f").unwrap();
        let rel = super::relativize(&base, &target).unwrap();
        assert_eq!(rel.to_string(), "./e:f");
        let back = super::resolve(&base, &rel, true);
        assert_eq!(back.to_string(), target.to_string());
    }

    #[test]
    fn relativize_none_across_authorities() {
        let base = parse("http://a/b/c").unwrap();
        let target = parse("http://other/b/c").unwrap();
        assert!(super::relativize(&base, &target).is_none());
    }
}
