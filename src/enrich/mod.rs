//! Deterministic metadata enrichment.
//!
//! Fills gaps (license, vendor, CPE, homepage) from identifiers that are
//! already present. Every rule only fires when its target field is empty,
//! so re-running enrichment on enriched data changes nothing.

use crate::model::{is_filled, non_empty, Component};
use packageurl::PackageUrl;
use std::str::FromStr;

/// License value assigned when no scanner reported one.
pub const UNKNOWN_LICENSE: &str = "unknown";

/// CPE value assigned when no purl exists to synthesize one from.
pub const UNKNOWN_CPE: &str = "UNKNOWN";

/// Enrich a component set in place. Idempotent.
pub fn enrich_components(components: &mut [Component]) {
    for component in components.iter_mut() {
        enrich_component(component);
    }
}

/// Apply all enrichment rules to a single component.
///
/// The license default runs last so it only covers fields still empty
/// after every other rule has had its chance.
pub fn enrich_component(component: &mut Component) {
    enrich_maven_metadata(component);
    synthesize_cpe(component);
    if non_empty(&component.license).is_none() {
        component.license = Some(UNKNOWN_LICENSE.to_string());
    }
}

/// Maven purls carry the vendor (group) and enough to build a canonical
/// search URL; use them to fill vendor and homepage.
fn enrich_maven_metadata(component: &mut Component) {
    let Some(purl_str) = non_empty(&component.purl) else {
        return;
    };
    if !purl_str.starts_with("pkg:maven/") {
        return;
    }
    let Ok(purl) = PackageUrl::from_str(purl_str) else {
        return;
    };
    let Some(group) = purl.namespace() else {
        return;
    };

    if non_empty(&component.vendor).is_none() {
        component.vendor = Some(group.to_string());
    }
    if non_empty(&component.home_page).is_none() {
        component.home_page = Some(format!(
            "https://search.maven.org/artifact/{}/{}",
            group,
            purl.name()
        ));
    }
}

/// Synthesize a CPE 2.3 string from the purl's namespace and name.
///
/// Without a namespace there is no credible vendor, so the CPE is left
/// empty; without any purl at all the literal `UNKNOWN` marks the gap.
fn synthesize_cpe(component: &mut Component) {
    if non_empty(&component.cpe).is_some() {
        return;
    }

    let Some(purl_str) = non_empty(&component.purl) else {
        component.cpe = Some(UNKNOWN_CPE.to_string());
        return;
    };
    let Ok(purl) = PackageUrl::from_str(purl_str) else {
        return;
    };
    let Some(vendor) = purl.namespace() else {
        return;
    };

    let version = if is_filled(&component.version) {
        component.version.trim()
    } else {
        "unknown"
    };
    component.cpe = Some(format!(
        "cpe:2.3:a:{}:{}:{}:*:*:*:*:*:*:*",
        vendor,
        purl.name(),
        version
    ));
}
