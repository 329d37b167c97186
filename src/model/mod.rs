//! Canonical data model for reconciled SBOMs.
//!
//! Scanner output from every source format is normalized into these
//! structures before reconciliation; the exporters read them back out.
//! Optional fields use `Option<String>` with whitespace-only values
//! treated as absent, never sentinel strings.

mod component;
mod sbom;

pub use component::*;
pub use sbom::*;

/// Returns the trimmed value of an optional field, or `None` when the
/// field is absent or blank.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Returns true when a mandatory string field is actually populated.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}
