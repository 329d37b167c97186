//! Integration tests for sbom-forge
//!
//! These tests verify end-to-end behavior of reconciliation, enrichment,
//! validation and the three exporters.

use chrono::Utc;
use sbom_forge::{
    export::{export_cyclonedx, from_custom_json, CustomDocument},
    export_sbom, Assembler, Component, Dependency, ExportFormat, GenerationRequest, ScanResult,
    Sbom, SourceInfo,
};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_test_writer(),
        )
        .try_init();
}

fn sbom_with(components: Vec<Component>, dependencies: Vec<Dependency>) -> Sbom {
    Sbom {
        id: 1,
        version: 1,
        name: "fixture".into(),
        timestamp: Utc::now(),
        namespace: "urn:sbom:fixture".into(),
        tool_name: "sbom-forge".into(),
        tool_version: "0.1.0".into(),
        spec_version: "CUSTOM-ENHANCED-1.0".into(),
        components,
        dependencies,
        source: Some(SourceInfo::filesystem("/scans/app", true)),
    }
}

fn scan(components: Vec<Component>, dependencies: Vec<Dependency>) -> ScanResult {
    ScanResult {
        components,
        dependencies,
        skipped: 0,
    }
}

// ============================================================================
// Reconciliation scenarios
// ============================================================================

mod reconciliation {
    use super::*;

    #[test]
    fn two_scans_same_purl_merge_into_one_component() {
        init_tracing();
        // one scanner saw no license, the other saw MIT
        let mut a = Component::new("", "lib", "1.0");
        a.purl = Some("pkg:maven/org.a/lib@1.0".into());
        let mut b = a.clone();
        b.license = Some("MIT".into());

        let sbom = Assembler::default().assemble(GenerationRequest {
            id: 1,
            name: "merge".into(),
            source: None,
            scans: vec![scan(vec![a], vec![]), scan(vec![b], vec![])],
        });

        assert_eq!(sbom.component_count(), 1);
        assert_eq!(sbom.components[0].license.as_deref(), Some("MIT"));
    }

    #[test]
    fn distinct_packages_with_shared_ref_survive_merging() {
        let mut a = Component::new("shared", "lib", "1.0");
        a.purl = None;
        a.source_repo = Some("filesystem:/scans/app".into());
        let mut b = Component::new("shared", "lib", "1.0");
        b.source_repo = Some("container-image:alpine".into());

        let sbom = Assembler::default().assemble(GenerationRequest {
            id: 1,
            name: "conflict".into(),
            source: None,
            scans: vec![scan(vec![a], vec![]), scan(vec![b], vec![])],
        });

        assert_eq!(sbom.component_count(), 2);
        let refs: Vec<&str> = sbom.components.iter().map(|c| c.bom_ref.as_str()).collect();
        assert_ne!(refs[0], refs[1], "re-keyed component must stay unique");
    }
}

// ============================================================================
// Validation scenarios
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn edge_whose_only_target_is_invalid_is_dropped() {
        init_tracing();
        let components = vec![Component::new("X", "x", "1"), Component::new("Z", "z", "1")];
        let mut dangling = Dependency::new("X");
        dangling.add_target("Y");
        let mut valid = Dependency::new("Z");
        valid.add_target("X");

        let sbom = Assembler::default().assemble(GenerationRequest {
            id: 1,
            name: "validation".into(),
            source: None,
            scans: vec![scan(components, vec![dangling, valid])],
        });

        assert!(sbom.get_dependency("X").is_none());
        let surviving = sbom.get_dependency("Z").expect("valid edge must remain");
        assert_eq!(surviving.depends_on, vec!["X".to_string()]);
    }
}

// ============================================================================
// Enrichment scenarios
// ============================================================================

mod enrichment {
    use super::*;

    #[test]
    fn component_without_identifiers_gets_unknown_markers() {
        let sbom = Assembler::default().assemble(GenerationRequest {
            id: 1,
            name: "enrichment".into(),
            source: None,
            scans: vec![scan(vec![Component::new("bare", "bare", "1.0")], vec![])],
        });

        let component = sbom.get_component("bare").unwrap();
        assert_eq!(component.cpe.as_deref(), Some("UNKNOWN"));
        assert_eq!(component.license.as_deref(), Some("unknown"));
    }
}

// ============================================================================
// Exporter scenarios
// ============================================================================

mod export {
    use super::*;

    #[test]
    fn cyclonedx_export_with_zero_dependencies_omits_the_key() {
        let sbom = sbom_with(vec![Component::new("a", "a", "1")], vec![]);
        let doc: Value = serde_json::from_str(&export_cyclonedx(&sbom).unwrap()).unwrap();
        assert!(doc.get("dependencies").is_none());
        assert_eq!(doc["components"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn custom_export_round_trips() {
        let mut component = Component::new("lib-a", "lib-a", "1.0");
        component.license = Some("MIT".into());
        component.purl = Some("pkg:maven/org.a/lib-a@1.0".into());
        component.vendor = Some("org.a".into());
        let mut edge = Dependency::new("system");
        edge.add_target("lib-a");

        let sbom = sbom_with(vec![component], vec![edge]);
        let json = export_sbom(&sbom, ExportFormat::Custom).unwrap();
        let parsed = from_custom_json(&json).unwrap();

        assert_eq!(parsed, CustomDocument::from_sbom(&sbom));
        assert_eq!(parsed.components[0].license.as_deref(), Some("MIT"));
        assert_eq!(parsed.dependencies[0].depends_on, vec!["lib-a".to_string()]);
    }

    #[test]
    fn unknown_format_string_exports_the_custom_schema() {
        let sbom = sbom_with(vec![Component::new("a", "a", "1")], vec![]);
        let format: ExportFormat = "totally-new-format".parse().unwrap();
        let json = export_sbom(&sbom, format).unwrap();
        let doc: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["sbom"]["id"], 1);
    }

    #[test]
    fn spdx_export_preserves_referential_integrity() {
        let mut edge = Dependency::new("a");
        edge.add_target("b");
        let sbom = sbom_with(
            vec![Component::new("a", "a", "1"), Component::new("b", "b", "1")],
            vec![edge],
        );

        let doc: Value =
            serde_json::from_str(&export_sbom(&sbom, ExportFormat::Spdx).unwrap()).unwrap();
        let ids: Vec<&str> = doc["packages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["SPDXID"].as_str().unwrap())
            .collect();
        for relationship in doc["relationships"].as_array().unwrap() {
            assert!(ids.contains(&relationship["spdxElementId"].as_str().unwrap()));
            assert!(ids.contains(&relationship["relatedSpdxElement"].as_str().unwrap()));
        }
    }
}
