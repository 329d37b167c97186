//! Referential-integrity validation of the dependency graph.
//!
//! Dangling references are handled structurally, never raised as errors:
//! edges pointing at components that did not survive reconciliation are
//! pruned, and the dropped count is reported for observability.

use crate::model::{Component, Dependency, SYSTEM_REF};
use std::collections::HashSet;

/// Outcome of pruning: the surviving edges plus how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub dependencies: Vec<Dependency>,
    pub dropped_edges: usize,
}

/// Drop dependency edges that reference components absent from the final
/// component set.
///
/// An edge survives when its own ref is a known component (or the
/// `"system"` sentinel) and, after filtering targets, it still points at
/// something. An edge whose `dependsOn` was empty to begin with is kept:
/// "no known dependencies" is a valid statement, unlike "all of the
/// dependencies were invalid".
#[must_use]
pub fn prune_dangling(components: &[Component], dependencies: Vec<Dependency>) -> ValidationReport {
    let valid_refs: HashSet<&str> = components
        .iter()
        .map(|c| c.bom_ref.as_str())
        .chain(std::iter::once(SYSTEM_REF))
        .collect();

    let total = dependencies.len();
    let mut surviving = Vec::with_capacity(total);

    for mut edge in dependencies {
        if !valid_refs.contains(edge.bom_ref.as_str()) {
            continue;
        }

        let originally_empty = edge.depends_on.is_empty();
        edge.depends_on
            .retain(|target| valid_refs.contains(target.as_str()));

        if edge.depends_on.is_empty() && !originally_empty {
            continue;
        }
        surviving.push(edge);
    }

    let dropped_edges = total - surviving.len();
    if dropped_edges > 0 {
        tracing::info!(
            dropped_edges,
            "Pruned {} dependency edges referencing unknown components",
            dropped_edges
        );
    }

    ValidationReport {
        dependencies: surviving,
        dropped_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(refs: &[&str]) -> Vec<Component> {
        refs.iter()
            .map(|r| Component::new(*r, format!("{r}-name"), "1.0"))
            .collect()
    }

    fn edge(bom_ref: &str, targets: &[&str]) -> Dependency {
        Dependency {
            bom_ref: bom_ref.into(),
            depends_on: targets.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn test_unknown_source_ref_dropped() {
        let report = prune_dangling(&components(&["a"]), vec![edge("ghost", &["a"])]);
        assert!(report.dependencies.is_empty());
        assert_eq!(report.dropped_edges, 1);
    }

    #[test]
    fn test_invalid_targets_filtered() {
        let report = prune_dangling(&components(&["a", "b"]), vec![edge("a", &["b", "ghost"])]);
        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(report.dependencies[0].depends_on, vec!["b".to_string()]);
        assert_eq!(report.dropped_edges, 0);
    }

    #[test]
    fn test_edge_with_only_invalid_targets_dropped() {
        let report = prune_dangling(&components(&["x"]), vec![edge("x", &["y"])]);
        assert!(report.dependencies.is_empty());
        assert_eq!(report.dropped_edges, 1);
    }

    #[test]
    fn test_originally_empty_edge_survives() {
        let report = prune_dangling(&components(&["x"]), vec![edge("x", &[])]);
        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(report.dropped_edges, 0);
    }

    #[test]
    fn test_system_sentinel_is_valid_source() {
        let report = prune_dangling(&components(&["a"]), vec![edge(SYSTEM_REF, &["a", "ghost"])]);
        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(report.dependencies[0].depends_on, vec!["a".to_string()]);
    }
}
