//! Generation pipeline: reconcile, enrich, validate, assemble.
//!
//! The pipeline is synchronous and pure per request: scan results come
//! in (possibly gathered concurrently by collaborators), a canonical
//! SBOM comes out. The SBOM id is an externally allocated precondition:
//! the persistence collaborator owns the sequence and must hand out ids
//! atomically; the core never computes one.

use crate::config::ForgeConfig;
use crate::enrich::enrich_components;
use crate::error::Result;
use crate::export::{export_custom, export_sbom, ExportFormat};
use crate::ingest::{system_root, ScanResult};
use crate::merge::{merge_component_lists, merge_dependency_lists};
use crate::model::{Sbom, SourceInfo};
use crate::store::SbomStore;
use crate::validate::prune_dangling;
use chrono::Utc;
use uuid::Uuid;

/// Everything needed to build one SBOM.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Pre-allocated id from the persistence collaborator's sequence
    pub id: u64,
    pub name: String,
    pub source: Option<SourceInfo>,
    /// One entry per scanner invocation; order decides merge precedence
    pub scans: Vec<ScanResult>,
}

/// Builds canonical SBOMs out of raw scan results.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    config: ForgeConfig,
}

impl Assembler {
    #[must_use]
    pub fn new(config: ForgeConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline: merge all scans into one canonical
    /// component/dependency set, enrich metadata, prune dangling edges,
    /// and wrap the result in an immutable [`Sbom`].
    #[must_use]
    pub fn assemble(&self, request: GenerationRequest) -> Sbom {
        let mut component_lists = Vec::with_capacity(request.scans.len());
        let mut dependency_lists = Vec::with_capacity(request.scans.len());
        for scan in request.scans {
            component_lists.push(scan.components);
            dependency_lists.push(scan.dependencies);
        }

        let mut components = merge_component_lists(component_lists);
        let mut dependencies = merge_dependency_lists(dependency_lists);

        // Scans with no dependency data at all still get a root edge
        if dependencies.is_empty() && !components.is_empty() {
            dependencies.push(system_root(&components));
        }

        enrich_components(&mut components);

        let report = prune_dangling(&components, dependencies);
        tracing::info!(
            components = components.len(),
            dependencies = report.dependencies.len(),
            dropped_edges = report.dropped_edges,
            "Assembled SBOM '{}'",
            request.name
        );

        Sbom {
            id: request.id,
            version: 1,
            name: request.name,
            timestamp: Utc::now(),
            namespace: format!("urn:sbom:{}", Uuid::new_v4()),
            tool_name: self.config.tool_name.clone(),
            tool_version: self.config.tool_version.clone(),
            spec_version: self.config.spec_version.clone(),
            components,
            dependencies: report.dependencies,
            source: request.source,
        }
    }

    /// Assemble an SBOM with an id drawn from the store's sequence, then
    /// persist both the structured record and its custom-JSON blob.
    pub fn assemble_and_store<S: SbomStore + ?Sized>(
        &self,
        store: &S,
        name: impl Into<String>,
        source: Option<SourceInfo>,
        scans: Vec<ScanResult>,
    ) -> Result<Sbom> {
        let id = store.next_id()?;
        let sbom = self.assemble(GenerationRequest {
            id,
            name: name.into(),
            source,
            scans,
        });
        let json = export_custom(&sbom)?;
        store.save(&sbom, &json)?;
        Ok(sbom)
    }

    /// Export an SBOM, falling back to the configured default format when
    /// the caller does not request one.
    pub fn export(&self, sbom: &Sbom, format: Option<ExportFormat>) -> Result<String> {
        export_sbom(sbom, format.unwrap_or(self.config.default_format))
    }
}
