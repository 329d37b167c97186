//! **Reconcile multi-scanner component data into one canonical SBOM and
//! export it in standards-compliant formats.**
//!
//! `sbom-forge` takes component and dependency lists produced by multiple
//! independent scanners over the same filesystem or container image,
//! merges them into a single duplicate-free graph, deterministically
//! fills metadata gaps, validates referential integrity, and serializes
//! the result as SPDX 2.3 JSON, CycloneDX 1.4 JSON, or a custom
//! round-trippable schema.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the canonical data model: [`Component`], [`Dependency`]
//!   and the [`Sbom`] aggregate every other module operates on.
//! - **[`ingest`]**: adapters that normalize scanner output (SPDX-JSON or
//!   CycloneDX-JSON) into a [`ScanResult`], skipping malformed records.
//! - **[`merge`]**: the reconciler, a keyed, non-destructive two-pass
//!   union that fills gaps without overwriting and re-keys genuine
//!   identity conflicts instead of collapsing them.
//! - **[`enrich`]**: idempotent metadata enrichment from existing
//!   identifiers (Maven purl → vendor/homepage, CPE synthesis, license
//!   defaulting).
//! - **[`validate`]**: prunes dependency edges that reference components
//!   absent from the final set, reporting the dropped count.
//! - **[`export`]**: pure exporters for each wire format; unknown format
//!   strings fall back to the custom format.
//! - **[`pipeline`]**: the [`Assembler`] that runs the whole chain per
//!   generation request.
//! - **[`store`]**: the persistence boundary ([`SbomStore`]) plus an
//!   in-memory implementation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use sbom_forge::{
//!     export_sbom, parse_scan_file, Assembler, ExportFormat, ForgeConfig,
//!     GenerationRequest, ScanFormat, ScanTarget, SourceInfo,
//! };
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let target = ScanTarget::Filesystem { path: "/scans/app".into() };
//!     let spdx = parse_scan_file(Path::new("scan.spdx.json"), ScanFormat::SpdxJson, &target)?;
//!     let cdx = parse_scan_file(Path::new("scan.cdx.json"), ScanFormat::CycloneDxJson, &target)?;
//!
//!     let assembler = Assembler::new(ForgeConfig::default());
//!     let sbom = assembler.assemble(GenerationRequest {
//!         id: 1, // allocated by the persistence collaborator
//!         name: "my-app".into(),
//!         source: Some(SourceInfo::filesystem("/scans/app", true)),
//!         scans: vec![spdx, cdx],
//!     });
//!
//!     let json = export_sbom(&sbom, ExportFormat::CycloneDx)?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod ingest;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod validate;

pub use config::ForgeConfig;
pub use error::{Result, SbomError};
pub use export::{export_sbom, ExportFormat};
pub use ingest::{parse_scan, parse_scan_file, ScanFormat, ScanResult, ScanTarget};
pub use model::{Component, Dependency, Sbom, SourceInfo, SYSTEM_REF};
pub use pipeline::{Assembler, GenerationRequest};
pub use store::{MemoryStore, SbomStore};
