//! SPDX 2.3 JSON exporter.

use super::to_pretty_json;
use crate::error::Result;
use crate::model::{non_empty, Sbom};
use chrono::SecondsFormat;
use serde::Serialize;

const SPDX_VERSION: &str = "SPDX-2.3";
const DATA_LICENSE: &str = "CC0-1.0";
const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";
const NO_ASSERTION: &str = "NOASSERTION";
const SPDX_REF_PREFIX: &str = "SPDXRef-";

#[derive(Serialize)]
struct SpdxDocument {
    #[serde(rename = "SPDXVersion")]
    spdx_version: &'static str,
    #[serde(rename = "dataLicense")]
    data_license: &'static str,
    #[serde(rename = "SPDXID")]
    spdx_id: &'static str,
    name: String,
    #[serde(rename = "documentNamespace")]
    document_namespace: String,
    creator: Vec<String>,
    created: String,
    packages: Vec<SpdxPackage>,
    relationships: Vec<SpdxRelationship>,
}

#[derive(Serialize)]
struct SpdxPackage {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: String,
    #[serde(rename = "versionInfo")]
    version_info: String,
    #[serde(rename = "licenseConcluded")]
    license_concluded: String,
    #[serde(rename = "licenseDeclared")]
    license_declared: String,
    #[serde(rename = "downloadLocation")]
    download_location: String,
    #[serde(rename = "filesAnalyzed")]
    files_analyzed: bool,
    supplier: String,
    #[serde(rename = "primaryPackagePurpose")]
    primary_package_purpose: String,
    #[serde(rename = "externalRefs", skip_serializing_if = "Vec::is_empty")]
    external_refs: Vec<SpdxExternalRef>,
}

#[derive(Serialize)]
struct SpdxExternalRef {
    #[serde(rename = "referenceCategory")]
    reference_category: &'static str,
    #[serde(rename = "referenceType")]
    reference_type: &'static str,
    #[serde(rename = "referenceLocator")]
    reference_locator: String,
}

#[derive(Serialize)]
struct SpdxRelationship {
    #[serde(rename = "spdxElementId")]
    spdx_element_id: String,
    #[serde(rename = "relationshipType")]
    relationship_type: &'static str,
    #[serde(rename = "relatedSpdxElement")]
    related_spdx_element: String,
}

/// Prefix an element id with `SPDXRef-` unless it already carries it.
fn spdx_ref(id: &str) -> String {
    if id.starts_with(SPDX_REF_PREFIX) {
        id.to_string()
    } else {
        format!("{SPDX_REF_PREFIX}{id}")
    }
}

/// Export the canonical SBOM as an SPDX 2.3 JSON document.
pub fn export_spdx(sbom: &Sbom) -> Result<String> {
    let packages = sbom
        .components
        .iter()
        .map(|component| {
            let license = non_empty(&component.license)
                .unwrap_or(NO_ASSERTION)
                .to_string();
            let mut external_refs = Vec::new();
            if let Some(purl) = non_empty(&component.purl) {
                external_refs.push(SpdxExternalRef {
                    reference_category: "PACKAGE-MANAGER",
                    reference_type: "purl",
                    reference_locator: purl.to_string(),
                });
            }
            if let Some(cpe) = non_empty(&component.cpe) {
                external_refs.push(SpdxExternalRef {
                    reference_category: "SECURITY",
                    reference_type: "cpe23Type",
                    reference_locator: cpe.to_string(),
                });
            }

            SpdxPackage {
                spdx_id: spdx_ref(&component.bom_ref),
                name: component.name.clone(),
                version_info: component.version.clone(),
                license_concluded: license.clone(),
                license_declared: license,
                download_location: non_empty(&component.purl)
                    .unwrap_or(NO_ASSERTION)
                    .to_string(),
                files_analyzed: false,
                supplier: non_empty(&component.vendor)
                    .map_or_else(|| NO_ASSERTION.to_string(), |v| format!("Organization: {v}")),
                primary_package_purpose: component.component_type.clone(),
                external_refs,
            }
        })
        .collect();

    let relationships = sbom
        .dependencies
        .iter()
        .flat_map(|edge| {
            edge.depends_on.iter().map(|target| SpdxRelationship {
                spdx_element_id: spdx_ref(&edge.bom_ref),
                relationship_type: "DEPENDS_ON",
                related_spdx_element: spdx_ref(target),
            })
        })
        .collect();

    let document = SpdxDocument {
        spdx_version: SPDX_VERSION,
        data_license: DATA_LICENSE,
        spdx_id: DOCUMENT_ID,
        name: sbom.name.clone(),
        document_namespace: sbom.namespace.clone(),
        creator: vec![format!("Tool: {}-{}", sbom.tool_name, sbom.tool_version)],
        created: sbom.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        packages,
        relationships,
    };

    to_pretty_json(&document, "spdx")
}
