//! CycloneDX 1.4 JSON exporter.

use super::to_pretty_json;
use crate::error::Result;
use crate::model::{non_empty, Sbom};
use chrono::SecondsFormat;
use serde::Serialize;

const BOM_FORMAT: &str = "CycloneDX";
const SPEC_VERSION: &str = "1.4";
const TOOL_VENDOR: &str = "sbom-forge";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CdxBom {
    bom_format: &'static str,
    spec_version: &'static str,
    serial_number: String,
    version: u32,
    metadata: CdxMetadata,
    components: Vec<CdxComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<Vec<CdxDependency>>,
}

#[derive(Serialize)]
struct CdxMetadata {
    timestamp: String,
    component: CdxMetaComponent,
    tools: Vec<CdxTool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<CdxProperty>,
}

#[derive(Serialize)]
struct CdxMetaComponent {
    #[serde(rename = "type")]
    component_type: &'static str,
    name: String,
    #[serde(rename = "bom-ref")]
    bom_ref: String,
}

#[derive(Serialize)]
struct CdxTool {
    vendor: &'static str,
    name: String,
    version: String,
}

#[derive(Serialize)]
struct CdxProperty {
    name: String,
    value: String,
}

#[derive(Serialize)]
struct CdxComponent {
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    #[serde(rename = "type")]
    component_type: &'static str,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<Vec<CdxLicenseChoice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpe: Option<String>,
    #[serde(
        rename = "externalReferences",
        skip_serializing_if = "Vec::is_empty"
    )]
    external_references: Vec<CdxExternalReference>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum CdxLicenseChoice {
    Expression { expression: String },
    Id { license: CdxLicenseId },
}

#[derive(Serialize)]
struct CdxLicenseId {
    id: String,
}

#[derive(Serialize)]
struct CdxExternalReference {
    #[serde(rename = "type")]
    reference_type: &'static str,
    url: String,
}

#[derive(Serialize)]
struct CdxDependency {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(rename = "dependsOn")]
    depends_on: Vec<String>,
}

/// Map the free-form classifier onto the fixed CycloneDX component types.
/// Anything unrecognized or unset becomes `library`.
fn map_component_type(raw: &str) -> &'static str {
    match raw.trim().to_ascii_lowercase().as_str() {
        "application" | "app" => "application",
        "framework" => "framework",
        "container" => "container",
        "platform" => "platform",
        "operating-system" | "os" => "operating-system",
        "device" => "device",
        "firmware" => "firmware",
        "file" => "file",
        _ => "library",
    }
}

/// A license string with spaces or parentheses is an SPDX expression,
/// not a single license id.
fn license_choice(license: &str) -> CdxLicenseChoice {
    if license.contains(' ') || license.contains('(') || license.contains(')') {
        CdxLicenseChoice::Expression {
            expression: license.to_string(),
        }
    } else {
        CdxLicenseChoice::Id {
            license: CdxLicenseId {
                id: license.to_string(),
            },
        }
    }
}

fn source_properties(sbom: &Sbom) -> Vec<CdxProperty> {
    let mut properties = Vec::new();
    let Some(source) = &sbom.source else {
        return properties;
    };
    if let Some(fs) = &source.filesystem {
        properties.push(CdxProperty {
            name: "filesystem.path".into(),
            value: fs.path.clone(),
        });
        properties.push(CdxProperty {
            name: "filesystem.recursive".into(),
            value: fs.recursive.to_string(),
        });
    }
    if let Some(image) = &source.image {
        properties.push(CdxProperty {
            name: "image.id".into(),
            value: image.image_id.clone(),
        });
        properties.push(CdxProperty {
            name: "image.registry".into(),
            value: image.registry.clone(),
        });
    }
    properties
}

/// Export the canonical SBOM as a CycloneDX 1.4 JSON document.
pub fn export_cyclonedx(sbom: &Sbom) -> Result<String> {
    let components = sbom
        .components
        .iter()
        .map(|component| {
            let mut external_references = Vec::new();
            if let Some(home) = non_empty(&component.home_page) {
                external_references.push(CdxExternalReference {
                    reference_type: "website",
                    url: home.to_string(),
                });
            }
            if let Some(repo) = non_empty(&component.source_repo) {
                external_references.push(CdxExternalReference {
                    reference_type: "vcs",
                    url: repo.to_string(),
                });
            }

            CdxComponent {
                bom_ref: component.bom_ref.clone(),
                component_type: map_component_type(&component.component_type),
                name: component.name.clone(),
                version: component.version.clone(),
                publisher: non_empty(&component.vendor).map(String::from),
                description: non_empty(&component.description).map(String::from),
                licenses: non_empty(&component.license)
                    .map(|license| vec![license_choice(license)]),
                purl: non_empty(&component.purl).map(String::from),
                cpe: non_empty(&component.cpe).map(String::from),
                external_references,
            }
        })
        .collect();

    let dependencies = if sbom.dependencies.is_empty() {
        None
    } else {
        Some(
            sbom.dependencies
                .iter()
                .map(|edge| CdxDependency {
                    bom_ref: edge.bom_ref.clone(),
                    depends_on: edge.depends_on.clone(),
                })
                .collect(),
        )
    };

    let bom = CdxBom {
        bom_format: BOM_FORMAT,
        spec_version: SPEC_VERSION,
        serial_number: format!("urn:uuid:{}", sbom.id),
        version: sbom.version,
        metadata: CdxMetadata {
            timestamp: sbom.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            component: CdxMetaComponent {
                component_type: "application",
                name: sbom.name.clone(),
                bom_ref: format!("sbom-{}", sbom.id),
            },
            tools: vec![CdxTool {
                vendor: TOOL_VENDOR,
                name: sbom.tool_name.clone(),
                version: sbom.tool_version.clone(),
            }],
            properties: source_properties(sbom),
        },
        components,
        dependencies,
    };

    to_pretty_json(&bom, "cyclonedx")
}
