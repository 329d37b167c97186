//! Component and dependency-edge records.

use super::non_empty;
use serde::{Deserialize, Serialize};

/// Sentinel ref used as the synthetic root of a dependency graph when no
/// finer-grained graph is available.
pub const SYSTEM_REF: &str = "system";

/// A single software component discovered by one or more scanners.
///
/// A component is owned exclusively by the SBOM that contains it; it is
/// created by a scan-ingestion adapter or by the reconciler when merging
/// and is never shared across SBOM instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Component {
    /// Component identity within the SBOM, preferably a package-URL-like
    /// string, otherwise a synthetic id.
    #[serde(rename = "ref")]
    pub bom_ref: String,
    pub name: String,
    pub version: String,
    /// Free-form classifier (library, application, container, ...)
    #[serde(rename = "type")]
    pub component_type: String,
    pub license: Option<String>,
    pub purl: Option<String>,
    pub cpe: Option<String>,
    pub vendor: Option<String>,
    pub home_page: Option<String>,
    /// Provenance tag, e.g. `filesystem:<path>` or `container-image:<name>`
    pub source_repo: Option<String>,
    pub description: Option<String>,
    pub file_path: Option<String>,
}

impl Component {
    /// Create a component with the mandatory identity fields set.
    pub fn new(
        bom_ref: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Fill empty optional fields from `other`, never overwriting a
    /// populated value. This is the non-destructive half of the merge:
    /// the first non-empty value wins.
    pub fn fill_missing_from(&mut self, other: &Component) {
        fill(&mut self.license, &other.license);
        fill(&mut self.purl, &other.purl);
        fill(&mut self.cpe, &other.cpe);
        fill(&mut self.vendor, &other.vendor);
        fill(&mut self.home_page, &other.home_page);
        fill(&mut self.source_repo, &other.source_repo);
        fill(&mut self.description, &other.description);
        fill(&mut self.file_path, &other.file_path);
        if !super::is_filled(&self.component_type) && super::is_filled(&other.component_type) {
            self.component_type = other.component_type.clone();
        }
    }
}

fn fill(target: &mut Option<String>, source: &Option<String>) {
    if non_empty(target).is_none() {
        if let Some(v) = non_empty(source) {
            *target = Some(v.to_string());
        }
    }
}

/// A directed dependency edge: `ref` depends on each entry in `depends_on`.
///
/// The ref `"system"` denotes the synthetic root. After validation, every
/// non-sentinel ref and every target corresponds to a component in the
/// same SBOM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependency {
    #[serde(rename = "ref")]
    pub bom_ref: String,
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

impl Dependency {
    /// Create an edge with no targets yet.
    pub fn new(bom_ref: impl Into<String>) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            depends_on: Vec::new(),
        }
    }

    /// Add a target, keeping the target set duplicate-free.
    pub fn add_target(&mut self, target: impl Into<String>) {
        let target = target.into();
        if !self.depends_on.contains(&target) {
            self.depends_on.push(target);
        }
    }
}
