//! Property-based tests for keying, merging, enrichment and validation.

use proptest::prelude::*;
use sbom_forge::{
    enrich::enrich_component,
    merge::{component_key, merge_component_lists},
    validate::prune_dangling,
    Component, Dependency, SYSTEM_REF,
};

fn token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9._-]{0,15}"
}

fn optional_token() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(token())
}

prop_compose! {
    fn arb_component()(
        bom_ref in token(),
        name in token(),
        version in token(),
        component_type in optional_token(),
        license in optional_token(),
        purl in proptest::option::of("pkg:maven/[a-z]{1,8}\\.[a-z]{1,8}/[a-z]{1,8}@[0-9]\\.[0-9]"),
        vendor in optional_token(),
        source_repo in optional_token(),
    ) -> Component {
        let mut component = Component::new(bom_ref, name, version);
        component.component_type = component_type.unwrap_or_default();
        component.license = license;
        component.purl = purl;
        component.vendor = vendor;
        component.source_repo = source_repo;
        component
    }
}

proptest! {
    #[test]
    fn component_key_is_deterministic(component in arb_component()) {
        prop_assert_eq!(component_key(&component), component_key(&component));
    }

    #[test]
    fn component_key_ignores_identifier_case(component in arb_component()) {
        let mut shouted = component.clone();
        shouted.bom_ref = shouted.bom_ref.to_uppercase();
        shouted.name = shouted.name.to_uppercase();
        shouted.purl = shouted.purl.map(|p| p.to_uppercase());
        prop_assert_eq!(component_key(&component), component_key(&shouted));
    }

    #[test]
    fn enrichment_is_idempotent(component in arb_component()) {
        let mut once = component;
        enrich_component(&mut once);
        let mut twice = once.clone();
        enrich_component(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn enrichment_always_yields_a_license_and_cpe(component in arb_component()) {
        let mut enriched = component;
        enrich_component(&mut enriched);
        prop_assert!(enriched.license.as_deref().is_some_and(|l| !l.is_empty()));
        prop_assert!(enriched.cpe.as_deref().is_some_and(|c| !c.is_empty()));
    }

    #[test]
    fn merging_with_an_empty_scan_changes_nothing(components in proptest::collection::vec(arb_component(), 0..8)) {
        // deduplicate first so the baseline itself is stable under merging
        let baseline = merge_component_lists(vec![components]);
        let remerged = merge_component_lists(vec![baseline.clone(), Vec::new()]);
        prop_assert_eq!(baseline, remerged);
    }

    #[test]
    fn pruned_edges_only_reference_known_components(
        components in proptest::collection::vec(arb_component(), 0..6),
        edges in proptest::collection::vec(
            ("[a-f]{1,3}", proptest::collection::vec("[a-f]{1,3}", 0..4)),
            0..6,
        ),
    ) {
        let dependencies = edges
            .into_iter()
            .map(|(bom_ref, targets)| {
                let mut edge = Dependency::new(bom_ref);
                for target in targets {
                    edge.add_target(target);
                }
                edge
            })
            .collect();

        let report = prune_dangling(&components, dependencies);

        let known: Vec<&str> = components
            .iter()
            .map(|c| c.bom_ref.as_str())
            .chain(std::iter::once(SYSTEM_REF))
            .collect();
        for edge in &report.dependencies {
            prop_assert!(known.contains(&edge.bom_ref.as_str()));
            for target in &edge.depends_on {
                prop_assert!(known.contains(&target.as_str()));
            }
        }
    }
}
