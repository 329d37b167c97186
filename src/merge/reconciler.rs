//! Two-pass component and dependency reconciliation.

use super::component_key;
use crate::model::{non_empty, Component, Dependency};
use indexmap::IndexMap;
use xxhash_rust::xxh3::xxh3_64;

/// Merge two component lists into one canonical, duplicate-free list.
///
/// Pass one builds a key -> component union, filling empty fields from
/// later records without ever overwriting a populated one. Pass two
/// re-keys components that share a key but carry genuinely different
/// identities (differing purl or provenance), so distinct packages are
/// never silently collapsed.
#[must_use]
pub fn merge_components(first: Vec<Component>, second: Vec<Component>) -> Vec<Component> {
    merge_component_lists([first, second])
}

/// Merge any number of component lists; equivalent to iterated pairwise
/// merging in list order.
#[must_use]
pub fn merge_component_lists<I>(lists: I) -> Vec<Component>
where
    I: IntoIterator<Item = Vec<Component>>,
{
    let mut index: IndexMap<String, Component> = IndexMap::new();
    let mut conflicted: Vec<(String, Component)> = Vec::new();
    let mut seen = 0usize;

    for list in lists {
        for component in list {
            seen += 1;
            absorb(&mut index, &mut conflicted, component);
        }
    }

    let conflicts = conflicted.len();
    for (key, mut component) in conflicted {
        let salt = identity_salt(&component);
        // A shared key derived from the ref means the refs collide too;
        // the retained component gets a salted ref so the SBOM-level
        // ref-uniqueness invariant still holds.
        if index.values().any(|c| c.bom_ref == component.bom_ref) {
            component.bom_ref = format!("{}-{:016x}", component.bom_ref, salt);
        }
        index
            .entry(format!("{key}-{salt:016x}"))
            .or_insert(component);
    }

    if seen > index.len() {
        tracing::info!(
            input = seen,
            merged = index.len(),
            conflicts,
            "Reconciled components: {} records merged into {}",
            seen,
            index.len()
        );
    }

    index.into_values().collect()
}

fn absorb(
    index: &mut IndexMap<String, Component>,
    conflicted: &mut Vec<(String, Component)>,
    component: Component,
) {
    let key = component_key(&component);
    match index.get_mut(&key) {
        None => {
            index.insert(key, component);
        }
        Some(existing) => {
            if has_identity_conflict(existing, &component) {
                conflicted.push((key, component));
            } else {
                existing.fill_missing_from(&component);
            }
        }
    }
}

/// Two same-key components are genuinely distinct when both populate an
/// identity-bearing field with different values.
fn has_identity_conflict(a: &Component, b: &Component) -> bool {
    differs(&a.purl, &b.purl) || differs(&a.source_repo, &b.source_repo)
}

fn differs(a: &Option<String>, b: &Option<String>) -> bool {
    match (non_empty(a), non_empty(b)) {
        (Some(x), Some(y)) => !x.eq_ignore_ascii_case(y),
        _ => false,
    }
}

/// Stable salt over the full field set of a component.
fn identity_salt(component: &Component) -> u64 {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let rendered = [
        component.bom_ref.clone(),
        component.name.clone(),
        component.version.clone(),
        component.component_type.clone(),
        opt(&component.license),
        opt(&component.purl),
        opt(&component.cpe),
        opt(&component.vendor),
        opt(&component.home_page),
        opt(&component.source_repo),
        opt(&component.description),
        opt(&component.file_path),
    ]
    .join("\u{1f}");
    xxh3_64(rendered.as_bytes())
}

/// Merge two dependency lists: union by ref, with duplicate-free unions
/// of the target sets for matching refs.
#[must_use]
pub fn merge_dependencies(first: Vec<Dependency>, second: Vec<Dependency>) -> Vec<Dependency> {
    merge_dependency_lists([first, second])
}

/// Merge any number of dependency lists.
#[must_use]
pub fn merge_dependency_lists<I>(lists: I) -> Vec<Dependency>
where
    I: IntoIterator<Item = Vec<Dependency>>,
{
    let mut index: IndexMap<String, Dependency> = IndexMap::new();

    for list in lists {
        for edge in list {
            match index.get_mut(&edge.bom_ref) {
                None => {
                    index.insert(edge.bom_ref.clone(), edge);
                }
                Some(existing) => {
                    for target in edge.depends_on {
                        existing.add_target(target);
                    }
                }
            }
        }
    }

    index.into_values().collect()
}
