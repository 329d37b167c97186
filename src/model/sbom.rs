//! The SBOM aggregate root and its provenance metadata.

use super::{Component, Dependency};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the scanned data came from: a filesystem tree, a container
/// image, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceInfo {
    pub filesystem: Option<FileSystemInfo>,
    pub image: Option<ImageInfo>,
}

impl SourceInfo {
    /// Source describing a filesystem scan.
    pub fn filesystem(path: impl Into<String>, recursive: bool) -> Self {
        Self {
            filesystem: Some(FileSystemInfo {
                path: path.into(),
                recursive,
            }),
            image: None,
        }
    }

    /// Source describing a container image scan.
    pub fn image(image_id: impl Into<String>, registry: impl Into<String>) -> Self {
        Self {
            filesystem: None,
            image: Some(ImageInfo {
                image_id: image_id.into(),
                registry: registry.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemInfo {
    pub path: String,
    pub recursive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub image_id: String,
    pub registry: String,
}

/// A reconciled, enriched, validated Software Bill of Materials.
///
/// Constructed once per generation request by the [`crate::pipeline::Assembler`],
/// persisted once, and immutable thereafter except for deletion. Within one
/// SBOM no two components share the same `ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sbom {
    /// Monotonically assigned id, allocated by the persistence collaborator
    pub id: u64,
    /// Document version, starts at 1
    pub version: u32,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    /// Globally unique URN, `urn:sbom:<uuid>`
    pub namespace: String,
    pub tool_name: String,
    pub tool_version: String,
    /// Format label, e.g. `CUSTOM-ENHANCED-1.0`
    pub spec_version: String,
    pub components: Vec<Component>,
    pub dependencies: Vec<Dependency>,
    pub source: Option<SourceInfo>,
}

impl Sbom {
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Look up a component by its ref.
    #[must_use]
    pub fn get_component(&self, bom_ref: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.bom_ref == bom_ref)
    }

    /// Dependency edge originating at the given ref, if any.
    #[must_use]
    pub fn get_dependency(&self, bom_ref: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.bom_ref == bom_ref)
    }
}
