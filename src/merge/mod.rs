//! Reconciliation of component and dependency lists from multiple scans.
//!
//! Identity fields are optional and inconsistently populated across
//! scanners, so merging runs in two passes: a keyed union that fills
//! gaps non-destructively, then a conflict pass that re-keys components
//! whose stronger identity fields disagree. A single-pass merge would
//! either over-merge (losing distinct packages) or under-merge
//! (duplicating the same package).

mod key;
mod reconciler;

pub use key::component_key;
pub use reconciler::{merge_component_lists, merge_components, merge_dependencies, merge_dependency_lists};
