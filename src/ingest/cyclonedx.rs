//! CycloneDX 1.x JSON scan-output adapter.

use super::{clean, ScanResult, ScanTarget};
use crate::error::{Result, SbomError, ScanErrorKind};
use crate::model::{is_filled, Component, Dependency};
use serde::Deserialize;

#[derive(Deserialize)]
struct CdxFile {
    #[serde(default)]
    components: Vec<CdxComponent>,
    #[serde(default)]
    dependencies: Vec<CdxDependency>,
}

#[derive(Deserialize)]
struct CdxComponent {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(rename = "type", default)]
    component_type: String,
    #[serde(rename = "bom-ref", default)]
    bom_ref: String,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    licenses: Vec<CdxLicenseChoice>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    purl: Option<String>,
    #[serde(default)]
    cpe: Option<String>,
}

#[derive(Deserialize)]
struct CdxLicenseChoice {
    #[serde(default)]
    license: Option<CdxLicense>,
    #[serde(default)]
    expression: Option<String>,
}

#[derive(Deserialize)]
struct CdxLicense {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct CdxDependency {
    #[serde(rename = "ref", default)]
    bom_ref: String,
    #[serde(rename = "dependsOn", default)]
    depends_on: Vec<String>,
}

fn first_license(choices: Vec<CdxLicenseChoice>) -> Option<String> {
    let choice = choices.into_iter().next()?;
    if let Some(license) = choice.license {
        clean(license.id).or_else(|| clean(license.name))
    } else {
        clean(choice.expression)
    }
}

pub(super) fn parse(content: &str, target: &ScanTarget) -> Result<ScanResult> {
    let file: CdxFile = serde_json::from_str(content).map_err(|e| {
        SbomError::scan("cyclonedx-json", ScanErrorKind::InvalidJson(e.to_string()))
    })?;

    let mut result = ScanResult::default();
    let source_repo = target.source_repo();

    for cdx in file.components {
        if !is_filled(&cdx.name) || !is_filled(&cdx.version) {
            tracing::warn!(
                name = %cdx.name,
                bom_ref = %cdx.bom_ref,
                "Skipping CycloneDX component without name/version"
            );
            result.skipped += 1;
            continue;
        }

        // A missing bom-ref gets a synthetic type/name/version identity
        let bom_ref = if is_filled(&cdx.bom_ref) {
            cdx.bom_ref.clone()
        } else {
            format!("pkg:{}/{}@{}", cdx.component_type, cdx.name, cdx.version)
        };

        let mut component = Component::new(bom_ref, cdx.name, cdx.version);
        component.component_type = cdx.component_type;
        component.vendor = clean(cdx.publisher);
        component.license = first_license(cdx.licenses);
        component.description = clean(cdx.description);
        component.purl = clean(cdx.purl);
        component.cpe = clean(cdx.cpe);
        component.source_repo = Some(source_repo.clone());

        result.components.push(component);
    }

    for dep in file.dependencies {
        if !is_filled(&dep.bom_ref) || dep.depends_on.is_empty() {
            continue;
        }
        let mut edge = Dependency::new(dep.bom_ref);
        for target_ref in dep.depends_on {
            edge.add_target(target_ref);
        }
        result.dependencies.push(edge);
    }

    Ok(result)
}
