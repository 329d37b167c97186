//! SPDX 2.x JSON scan-output adapter.

use super::{clean, ScanResult, ScanTarget};
use crate::error::{Result, SbomError, ScanErrorKind};
use crate::model::{is_filled, Component, Dependency};
use indexmap::IndexMap;
use serde::Deserialize;

const SPDX_REF_PREFIX: &str = "SPDXRef-";
const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";

#[derive(Deserialize)]
struct SpdxFile {
    #[serde(default)]
    packages: Vec<SpdxPackage>,
    #[serde(default)]
    relationships: Vec<SpdxRelationship>,
}

#[derive(Deserialize)]
struct SpdxPackage {
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "versionInfo", default)]
    version_info: String,
    #[serde(default)]
    supplier: Option<String>,
    #[serde(rename = "licenseConcluded", default)]
    license_concluded: Option<String>,
    #[serde(rename = "licenseDeclared", default)]
    license_declared: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "primaryPackagePurpose", default)]
    primary_package_purpose: Option<String>,
    #[serde(rename = "externalRefs", default)]
    external_refs: Vec<SpdxExternalRef>,
}

#[derive(Deserialize)]
struct SpdxExternalRef {
    #[serde(rename = "referenceType", default)]
    reference_type: String,
    #[serde(rename = "referenceLocator", default)]
    reference_locator: String,
}

#[derive(Deserialize)]
struct SpdxRelationship {
    #[serde(rename = "spdxElementId", default)]
    spdx_element_id: String,
    #[serde(rename = "relationshipType", default)]
    relationship_type: String,
    #[serde(rename = "relatedSpdxElement", default)]
    related_spdx_element: String,
}

fn strip_ref(id: &str) -> &str {
    id.strip_prefix(SPDX_REF_PREFIX).unwrap_or(id)
}

pub(super) fn parse(content: &str, target: &ScanTarget) -> Result<ScanResult> {
    let file: SpdxFile = serde_json::from_str(content).map_err(|e| {
        SbomError::scan("spdx-json", ScanErrorKind::InvalidJson(e.to_string()))
    })?;

    let mut result = ScanResult::default();
    let source_repo = target.source_repo();

    for package in file.packages {
        if package.spdx_id == DOCUMENT_ID {
            continue;
        }

        let bom_ref = strip_ref(&package.spdx_id).to_string();
        if !is_filled(&bom_ref) || !is_filled(&package.name) || !is_filled(&package.version_info) {
            tracing::warn!(
                spdx_id = %package.spdx_id,
                name = %package.name,
                "Skipping SPDX package without name/version/identity"
            );
            result.skipped += 1;
            continue;
        }

        let mut component = Component::new(bom_ref, package.name, package.version_info);
        component.component_type = clean(package.primary_package_purpose)
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| "library".to_string());
        component.license =
            clean(package.license_concluded).or_else(|| clean(package.license_declared));
        component.vendor = clean(package.supplier)
            .map(|s| s.strip_prefix("Organization: ").unwrap_or(s.as_str()).to_string());
        component.description = clean(package.description);
        component.source_repo = Some(source_repo.clone());

        for ext in package.external_refs {
            match ext.reference_type.as_str() {
                "purl" if component.purl.is_none() => {
                    component.purl = clean(Some(ext.reference_locator));
                }
                "cpe23Type" | "cpe22Type" if component.cpe.is_none() => {
                    component.cpe = clean(Some(ext.reference_locator));
                }
                _ => {}
            }
        }

        result.components.push(component);
    }

    let mut edges: IndexMap<String, Dependency> = IndexMap::new();
    for relationship in file.relationships {
        if relationship.relationship_type != "DEPENDS_ON" {
            continue;
        }
        let source = strip_ref(&relationship.spdx_element_id);
        let dep_target = strip_ref(&relationship.related_spdx_element);
        if source.is_empty() || dep_target.is_empty() {
            continue;
        }
        edges
            .entry(source.to_string())
            .or_insert_with(|| Dependency::new(source))
            .add_target(dep_target);
    }
    result.dependencies = edges.into_values().collect();

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "SPDXID": "SPDXRef-DOCUMENT",
        "name": "scan",
        "packages": [
            {"SPDXID": "SPDXRef-DOCUMENT", "name": "scan", "versionInfo": ""},
            {
                "SPDXID": "SPDXRef-Package-commons",
                "name": "commons-lang3",
                "versionInfo": "3.12.0",
                "supplier": "Organization: Apache",
                "licenseConcluded": "NOASSERTION",
                "licenseDeclared": "Apache-2.0",
                "primaryPackagePurpose": "LIBRARY",
                "externalRefs": [
                    {"referenceCategory": "PACKAGE-MANAGER", "referenceType": "purl",
                     "referenceLocator": "pkg:maven/org.apache.commons/commons-lang3@3.12.0"},
                    {"referenceCategory": "SECURITY", "referenceType": "cpe23Type",
                     "referenceLocator": "cpe:2.3:a:apache:commons_lang3:3.12.0:*:*:*:*:*:*:*"}
                ]
            },
            {"SPDXID": "SPDXRef-Package-broken", "name": "", "versionInfo": "1.0"}
        ],
        "relationships": [
            {"spdxElementId": "SPDXRef-Package-commons", "relationshipType": "DEPENDS_ON",
             "relatedSpdxElement": "SPDXRef-Package-other"},
            {"spdxElementId": "SPDXRef-Package-commons", "relationshipType": "CONTAINS",
             "relatedSpdxElement": "SPDXRef-Package-other"}
        ]
    }"#;

    fn target() -> ScanTarget {
        ScanTarget::Filesystem {
            path: "/scans/app".into(),
        }
    }

    #[test]
    fn test_parses_packages_and_skips_document() {
        let result = parse(SAMPLE, &target()).unwrap();
        assert_eq!(result.components.len(), 1);
        assert_eq!(result.skipped, 1);

        let c = &result.components[0];
        assert_eq!(c.bom_ref, "Package-commons");
        assert_eq!(c.name, "commons-lang3");
        assert_eq!(c.version, "3.12.0");
        assert_eq!(c.component_type, "library");
        assert_eq!(c.vendor.as_deref(), Some("Apache"));
        // NOASSERTION concluded falls through to declared
        assert_eq!(c.license.as_deref(), Some("Apache-2.0"));
        assert_eq!(
            c.purl.as_deref(),
            Some("pkg:maven/org.apache.commons/commons-lang3@3.12.0")
        );
        assert!(c.cpe.is_some());
        assert_eq!(c.source_repo.as_deref(), Some("filesystem:/scans/app"));
    }

    #[test]
    fn test_only_depends_on_relationships_become_edges() {
        let result = parse(SAMPLE, &target()).unwrap();
        assert_eq!(result.dependencies.len(), 1);
        assert_eq!(result.dependencies[0].bom_ref, "Package-commons");
        assert_eq!(result.dependencies[0].depends_on, vec!["Package-other".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse("{not json", &target()).is_err());
    }
}
