//! Configuration for SBOM generation.

use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};

/// Format label stamped on every generated SBOM.
pub const SPEC_VERSION: &str = "CUSTOM-ENHANCED-1.0";

/// Generation settings: tool identity and the format used when a caller
/// does not ask for one explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Tool name recorded in document metadata
    pub tool_name: String,
    /// Tool version recorded in document metadata
    pub tool_version: String,
    /// Spec label for generated SBOMs
    pub spec_version: String,
    /// Export format used when none is requested
    pub default_format: ExportFormat,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            tool_name: "sbom-forge".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            spec_version: SPEC_VERSION.to_string(),
            default_format: ExportFormat::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.tool_name, "sbom-forge");
        assert_eq!(config.spec_version, "CUSTOM-ENHANCED-1.0");
        assert_eq!(config.default_format, ExportFormat::Custom);
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: ForgeConfig =
            serde_json::from_str(r#"{"tool_name": "scanner-suite"}"#).unwrap();
        assert_eq!(config.tool_name, "scanner-suite");
        assert_eq!(config.spec_version, "CUSTOM-ENHANCED-1.0");
    }
}
