//! Representative license selection.

use crate::model::{ArtifactId, LibrarySlot};
use crate::store::FactStore;
use licguard_types::ids::{LICENSE_NOT_FOUND_ARTIFACT, LICENSE_NOT_FOUND_LIBRARY};

/// Pick one license for an artifact.
///
/// The first tag whose provenance matches an entry of `preference` (tried in order)
/// wins; otherwise the first tag in store order; otherwise the artifact sentinel.
pub fn resolve_license<S: FactStore + ?Sized>(
    store: &S,
    id: ArtifactId,
    preference: &[String],
) -> String {
    let tags = store.license_tags(id);
    for kind in preference {
        if let Some(tag) = tags.iter().find(|t| &t.provenance == kind) {
            return tag.license.clone();
        }
    }
    tags.first()
        .map(|t| t.license.clone())
        .unwrap_or_else(|| LICENSE_NOT_FOUND_ARTIFACT.to_string())
}

/// Pick one license for a library slot.
///
/// Providers are tried first. Some slots are only known by name, so artifacts whose
/// basename equals the slot name are tried next. Falls back to the library sentinel.
pub fn resolve_license_for_slot<S: FactStore + ?Sized>(
    store: &S,
    slot: &LibrarySlot,
    preference: &[String],
) -> String {
    let first_resolved = |candidates: Vec<ArtifactId>| {
        candidates
            .into_iter()
            .map(|id| resolve_license(store, id, preference))
            .find(|l| l != LICENSE_NOT_FOUND_ARTIFACT)
    };

    let providers = store.providers(slot.id).iter().map(|a| a.id).collect();
    if let Some(license) = first_resolved(providers) {
        return license;
    }

    let by_name = store
        .artifacts_by_basename(&slot.name)
        .iter()
        .map(|a| a.id)
        .collect();
    first_resolved(by_name).unwrap_or_else(|| LICENSE_NOT_FOUND_LIBRARY.to_string())
}
