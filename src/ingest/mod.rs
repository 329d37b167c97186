//! Scan-result ingestion.
//!
//! External scanners hand the core their output as SPDX-JSON or
//! CycloneDX-JSON documents; these adapters normalize either into a
//! [`ScanResult`] of canonical components and dependency edges. Records
//! missing mandatory name/version/identity are skipped and counted, not
//! fatal; a scan with no dependency information falls back to a single
//! `"system"` root that depends on every component.

mod cyclonedx;
mod spdx;

use crate::error::{Result, SbomError, ScanErrorKind};
use crate::model::{Component, Dependency, SYSTEM_REF};
use std::path::Path;
use std::str::FromStr;

/// One scanner invocation's worth of normalized data.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub components: Vec<Component>,
    pub dependencies: Vec<Dependency>,
    /// Malformed records dropped during ingestion
    pub skipped: usize,
}

impl ScanResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.dependencies.is_empty()
    }
}

/// Wire format of a scanner's output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFormat {
    SpdxJson,
    CycloneDxJson,
}

impl FromStr for ScanFormat {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spdx-json" | "spdx" => Ok(Self::SpdxJson),
            "cyclonedx-json" | "cyclonedx" => Ok(Self::CycloneDxJson),
            other => Err(SbomError::scan(
                "selecting scan parser",
                ScanErrorKind::UnknownFormat(other.to_string()),
            )),
        }
    }
}

/// What the scanner was pointed at; becomes the provenance tag on every
/// ingested component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    Filesystem { path: String },
    Image { name: String },
    ImageArchive,
}

impl ScanTarget {
    /// The `source_repo` provenance tag for components of this scan.
    #[must_use]
    pub fn source_repo(&self) -> String {
        match self {
            Self::Filesystem { path } => format!("filesystem:{path}"),
            Self::Image { name } => format!("container-image:{name}"),
            Self::ImageArchive => "container-image-archive".to_string(),
        }
    }
}

/// Parse scanner output into a scan result.
pub fn parse_scan(content: &str, format: ScanFormat, target: &ScanTarget) -> Result<ScanResult> {
    let mut result = match format {
        ScanFormat::SpdxJson => spdx::parse(content, target)?,
        ScanFormat::CycloneDxJson => cyclonedx::parse(content, target)?,
    };

    if result.dependencies.is_empty() && !result.components.is_empty() {
        tracing::info!("No dependency information in scan, synthesizing system root");
        result.dependencies.push(system_root(&result.components));
    }
    if result.skipped > 0 {
        tracing::warn!(
            skipped = result.skipped,
            "Skipped {} malformed scan records",
            result.skipped
        );
    }
    Ok(result)
}

/// Read and parse a scanner output file.
pub fn parse_scan_file(
    path: &Path,
    format: ScanFormat,
    target: &ScanTarget,
) -> Result<ScanResult> {
    let content = std::fs::read_to_string(path).map_err(|e| SbomError::io(path, e))?;
    parse_scan(&content, format, target)
}

/// The synthetic `"system"` root edge enumerating all components.
#[must_use]
pub fn system_root(components: &[Component]) -> Dependency {
    let mut root = Dependency::new(SYSTEM_REF);
    for component in components {
        root.add_target(component.bom_ref.clone());
    }
    root
}

/// Normalize an optional scanner string: trimmed, with empty values and
/// the SPDX `NOASSERTION` marker treated as absent.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "NOASSERTION" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_format_parses() {
        assert_eq!("spdx-json".parse::<ScanFormat>().unwrap(), ScanFormat::SpdxJson);
        assert_eq!(
            "CycloneDX-JSON".parse::<ScanFormat>().unwrap(),
            ScanFormat::CycloneDxJson
        );
        assert!("sarif".parse::<ScanFormat>().is_err());
    }

    #[test]
    fn test_target_tags() {
        assert_eq!(
            ScanTarget::Filesystem { path: "/scans/app".into() }.source_repo(),
            "filesystem:/scans/app"
        );
        assert_eq!(
            ScanTarget::Image { name: "alpine:latest".into() }.source_repo(),
            "container-image:alpine:latest"
        );
        assert_eq!(ScanTarget::ImageArchive.source_repo(), "container-image-archive");
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean(None), None);
        assert_eq!(clean(Some("  ".into())), None);
        assert_eq!(clean(Some("NOASSERTION".into())), None);
        assert_eq!(clean(Some(" MIT ".into())), Some("MIT".into()));
    }

    #[test]
    fn test_system_root_enumerates_components() {
        let components = vec![
            Component::new("a", "a", "1"),
            Component::new("b", "b", "2"),
        ];
        let root = system_root(&components);
        assert_eq!(root.bom_ref, SYSTEM_REF);
        assert_eq!(root.depends_on, vec!["a".to_string(), "b".to_string()]);
    }
}
