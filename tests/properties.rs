//! Property-based tests over a restricted-alphabet synthetic IRI
//! generator, exercising the invariants in the interface spec this
//! crate implements: rebuild round-trips a parsed value, normalize is
//! idempotent, and resolve/relativize are inverse to each other on
//! structurally related values.

use iri::Iri;
use proptest::prelude::*;

/// A small, deliberately restricted token alphabet keeps proptest's
/// shrinker useful — an unconstrained Unicode generator mostly produces
/// uninteresting rejected-at-parse-time noise.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,6}".prop_map(|s| s)
}

fn path_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment_strategy(), 0..4).prop_map(|segs| {
        let mut p = String::new();
        for seg in segs {
            p.push('/');
            p.push_str(&seg);
        }
        p
    })
}

fn http_iri_strategy() -> impl Strategy<Value = String> {
    (segment_strategy(), path_strategy(), proptest::option::of(segment_strategy())).prop_map(
        |(host, path, query)| {
            let mut s = format!("http://{host}.example{path}");
            if let Some(q) = query {
                s.push('?');
                s.push_str(&q);
            }
            s
        },
    )
}

proptest! {
    /// Invariant: a value built by `rebuild()` from an already-parsed
    /// `Iri`'s own components parses back to the same components.
    #[test]
    fn rebuild_round_trips(s in http_iri_strategy()) {
        let parsed = Iri::parse(&s).expect("generator must only produce valid IRIs");
        let rebuilt = parsed.rebuild();
        prop_assert_eq!(parsed.scheme(), rebuilt.scheme());
        prop_assert_eq!(parsed.authority(), rebuilt.authority());
        prop_assert_eq!(parsed.path(), rebuilt.path());
        prop_assert_eq!(parsed.query(), rebuilt.query());
    }

    /// Invariant: normalization is idempotent — normalizing twice gives
    /// the same result as normalizing once.
    #[test]
    fn normalize_is_idempotent(s in http_iri_strategy()) {
        let parsed = Iri::parse(&s).expect("generator must only produce valid IRIs");
        let once = parsed.normalize();
        let twice = once.normalize();
        prop_assert_eq!(once.to_string(), twice.to_string());
    }

    /// Invariant: for a target path reachable via the base's own
    /// directory, relativizing then resolving recovers the target.
    #[test]
    fn relativize_then_resolve_recovers_target(
        host in segment_strategy(),
        dir_segs in proptest::collection::vec(segment_strategy(), 0..3),
        leaf_a in segment_strategy(),
        leaf_b in segment_strategy(),
    ) {
        let dir: String = dir_segs.iter().map(|s| format!("/{s}")).collect();
        let base_str = format!("http://{host}.example{dir}/{leaf_a}");
        let target_str = format!("http://{host}.example{dir}/{leaf_b}");
        let base = Iri::parse(&base_str).unwrap();
        let target = Iri::parse(&target_str).unwrap();

        if let Some(rel) = base.relativize(&target) {
            let recovered = base.resolve(&rel);
            prop_assert_eq!(recovered.to_string(), target.to_string());
        }
    }

    /// Invariant: resolving an empty reference against a base recovers
    /// the base itself (modulo fragment, which the empty reference
    /// never carries).
    #[test]
    fn resolving_empty_reference_recovers_base(s in http_iri_strategy()) {
        let base = Iri::parse(&s).unwrap();
        let empty = Iri::parse("").unwrap();
        let resolved = base.resolve(&empty);
        prop_assert_eq!(resolved.scheme(), base.scheme());
        prop_assert_eq!(resolved.authority(), base.authority());
        prop_assert_eq!(resolved.path(), base.path());
        prop_assert_eq!(resolved.query(), base.query());
    }
}
