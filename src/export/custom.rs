//! Custom JSON exporter: a direct structural projection of the
//! canonical SBOM. Unlike the standards-based formats this one round-trips,
//! which is what the persistence collaborator stores alongside the record.

use super::to_pretty_json;
use crate::error::{Result, SbomError, ScanErrorKind};
use crate::model::{FileSystemInfo, ImageInfo, Sbom};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDocument {
    pub sbom: CustomMeta,
    pub components: Vec<CustomComponent>,
    pub dependencies: Vec<CustomDependency>,
    pub source: CustomSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomMeta {
    pub id: u64,
    pub version: u32,
    pub name: String,
    pub timestamp: String,
    pub namespace: String,
    pub tool: CustomTool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTool {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomComponent {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub license: Option<String>,
    pub purl: Option<String>,
    pub cpe: Option<String>,
    pub description: Option<String>,
    pub source_repo: Option<String>,
    pub vendor: Option<String>,
    pub home_page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDependency {
    #[serde(rename = "ref")]
    pub bom_ref: String,
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSource {
    pub filesystem: FileSystemInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInfo>,
}

impl CustomDocument {
    /// Project the canonical SBOM into the custom schema.
    #[must_use]
    pub fn from_sbom(sbom: &Sbom) -> Self {
        let components = sbom
            .components
            .iter()
            .map(|c| CustomComponent {
                id: c.bom_ref.clone(),
                name: c.name.clone(),
                version: c.version.clone(),
                component_type: c.component_type.clone(),
                license: c.license.clone(),
                purl: c.purl.clone(),
                cpe: c.cpe.clone(),
                description: c.description.clone(),
                source_repo: c.source_repo.clone(),
                vendor: c.vendor.clone(),
                home_page: c.home_page.clone(),
            })
            .collect();

        let dependencies = sbom
            .dependencies
            .iter()
            .map(|d| CustomDependency {
                bom_ref: d.bom_ref.clone(),
                depends_on: d.depends_on.clone(),
            })
            .collect();

        let source = CustomSource {
            filesystem: sbom
                .source
                .as_ref()
                .and_then(|s| s.filesystem.clone())
                .unwrap_or(FileSystemInfo {
                    path: "unknown".into(),
                    recursive: false,
                }),
            image: sbom.source.as_ref().and_then(|s| s.image.clone()),
        };

        Self {
            sbom: CustomMeta {
                id: sbom.id,
                version: sbom.version,
                name: sbom.name.clone(),
                timestamp: sbom.timestamp.to_rfc3339(),
                namespace: sbom.namespace.clone(),
                tool: CustomTool {
                    name: sbom.tool_name.clone(),
                    version: sbom.tool_version.clone(),
                },
            },
            components,
            dependencies,
            source,
        }
    }
}

/// Export the canonical SBOM as the custom JSON schema.
pub fn export_custom(sbom: &Sbom) -> Result<String> {
    to_pretty_json(&CustomDocument::from_sbom(sbom), "custom")
}

/// Parse a custom-format document back into its typed form.
pub fn from_custom_json(json: &str) -> Result<CustomDocument> {
    serde_json::from_str(json).map_err(|e| {
        SbomError::scan(
            "custom document",
            ScanErrorKind::InvalidJson(e.to_string()),
        )
    })
}
