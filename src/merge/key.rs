//! Canonical, comparable identity keys for components.
//!
//! The key uses a tiered fallback: purl when present (most reliable),
//! then the component ref, then a synthetic `type:name:version` key.
//! Two components with equal keys are candidates for merge, not
//! guaranteed identical; the reconciler's conflict pass decides.

use crate::model::{non_empty, Component, SYSTEM_REF};

/// Derive the canonical identity key for a component.
///
/// Deterministic and case-insensitive on purl, ref and name/version.
#[must_use]
pub fn component_key(component: &Component) -> String {
    if let Some(purl) = non_empty(&component.purl) {
        return format!("purl:{}", purl.to_lowercase());
    }

    let bom_ref = component.bom_ref.trim();
    if !bom_ref.is_empty() && bom_ref != SYSTEM_REF {
        return format!("ref:{}", bom_ref.to_lowercase());
    }

    let base = format!(
        "{}:{}",
        component.name.to_lowercase(),
        component.version.to_lowercase()
    );
    let kind = component.component_type.trim();
    if kind.is_empty() {
        base
    } else {
        format!("{}:{}", kind.to_lowercase(), base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purl_takes_precedence() {
        let mut c = Component::new("some-ref", "lib", "1.0");
        c.purl = Some("pkg:maven/org.a/lib@1.0".into());
        assert_eq!(component_key(&c), "purl:pkg:maven/org.a/lib@1.0");
    }

    #[test]
    fn test_ref_fallback() {
        let c = Component::new("Lib-A-Ref", "lib-a", "1.0");
        assert_eq!(component_key(&c), "ref:lib-a-ref");
    }

    #[test]
    fn test_system_ref_is_not_an_identity() {
        let mut c = Component::new(SYSTEM_REF, "Lib", "2.0");
        c.component_type = "library".into();
        assert_eq!(component_key(&c), "library:lib:2.0");
    }

    #[test]
    fn test_type_prefix_omitted_when_empty() {
        let c = Component::new("", "Lib", "2.0");
        assert_eq!(component_key(&c), "lib:2.0");
    }

    #[test]
    fn test_case_insensitive() {
        let mut a = Component::new("", "lib", "1.0");
        a.purl = Some("pkg:NPM/Lodash@4".into());
        let mut b = Component::new("", "lib", "1.0");
        b.purl = Some("pkg:npm/lodash@4".into());
        assert_eq!(component_key(&a), component_key(&b));
    }
}
