//! Lazy, one-level-at-a-time browsing over the dependency graph.
//!
//! Each row carries a compatibility summary computed by a summary-only walk rooted
//! at that row's artifact. Summaries are cached for the lifetime of the browser and
//! dropped whenever the override table changes.

use crate::compat::{OverrideTable, is_compatible};
use crate::engine::select_roots;
use crate::license::{resolve_license, resolve_license_for_slot};
use crate::model::{Artifact, ArtifactId, LibrarySlot};
use crate::policy::{PathFilter, RootFilter};
use crate::store::FactStore;
use crate::walker::{NodeRef, TraversalResult, WalkOptions, walk};
use licguard_types::ids::{TAG_COMMENT, TAG_SIGNOFF};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseRow {
    pub node: NodeRef,
    pub name: String,
    pub full_path: String,
    pub license: String,
    pub signoff: Option<String>,
    pub comment: Option<String>,
    pub compatible: bool,
    /// The row's license is incompatible with the expanded parent's license.
    pub culprit: bool,
    pub incompatible_licenses: Vec<String>,
    pub has_children: bool,
}

pub struct Browser<'s, S: FactStore + ?Sized> {
    store: &'s S,
    overrides: OverrideTable,
    walk: WalkOptions,
    summaries: HashMap<(ArtifactId, bool), TraversalResult>,
}

impl<'s, S: FactStore + ?Sized> Browser<'s, S> {
    pub fn new(store: &'s S, overrides: OverrideTable, walk: WalkOptions) -> Self {
        Self {
            store,
            overrides,
            walk: WalkOptions {
                get_all: false,
                ..walk
            },
            summaries: HashMap::new(),
        }
    }

    /// Top-level rows.
    pub fn roots(&mut self, filter: RootFilter) -> Vec<BrowseRow> {
        let roots: Vec<ArtifactId> = select_roots(self.store, filter, &PathFilter::default())
            .into_iter()
            .map(|a| a.id)
            .collect();
        roots
            .into_iter()
            .filter_map(|id| self.artifact_row(id, false))
            .collect()
    }

    /// Children of `id`: every provider of each of its direct dependency slots, or a
    /// slot row when nobody provides the slot.
    pub fn expand(&mut self, id: ArtifactId) -> Vec<BrowseRow> {
        let store = self.store;
        let parent_license = resolve_license(store, id, &self.walk.preference);
        let mut rows = Vec::new();

        for slot in store.direct_dependencies(id) {
            let providers = store.providers(slot.id);
            if providers.is_empty() {
                rows.push(self.slot_row(slot, &parent_license));
                continue;
            }
            for child in providers {
                let child_license = resolve_license(store, child.id, &self.walk.preference);
                let culprit = !is_compatible(&parent_license, &child_license, &self.overrides);
                if let Some(row) = self.artifact_row(child.id, culprit) {
                    rows.push(row);
                }
            }
        }
        tracing::debug!(artifact = %id, rows = rows.len(), "expanded");
        rows
    }

    /// Cached summary-only walk rooted at `id`.
    pub fn summary(&mut self, id: ArtifactId, culprit: bool) -> TraversalResult {
        if let Some(hit) = self.summaries.get(&(id, culprit)) {
            return hit.clone();
        }
        let opts = WalkOptions {
            root_culprit: culprit,
            ..self.walk.clone()
        };
        let result = walk(self.store, id, &self.overrides, &opts)
            .pop()
            .unwrap_or_else(|| TraversalResult {
                level: 0,
                node: NodeRef::Artifact(id),
                via: None,
                license: resolve_license(self.store, id, &self.walk.preference),
                compatible: true,
                culprit,
                incompatible_licenses: Vec::new(),
                reused: false,
            });
        self.summaries.insert((id, culprit), result.clone());
        result
    }

    /// Declare `compatible` acceptable beneath `license` for the rest of the session.
    pub fn allow(&mut self, license: &str, compatible: &str) -> bool {
        let added = self.overrides.insert(license, compatible);
        if added {
            self.summaries.clear();
        }
        added
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn into_overrides(self) -> OverrideTable {
        self.overrides
    }

    fn artifact_row(&mut self, id: ArtifactId, culprit: bool) -> Option<BrowseRow> {
        let store = self.store;
        let artifact: &Artifact = store.artifact(id)?;
        let summary = self.summary(id, culprit);
        Some(BrowseRow {
            node: NodeRef::Artifact(id),
            name: artifact.basename.clone(),
            full_path: artifact.full_path.clone(),
            license: summary.license,
            signoff: artifact.tag(TAG_SIGNOFF).map(str::to_string),
            comment: artifact.tag(TAG_COMMENT).map(str::to_string),
            compatible: summary.compatible && !summary.culprit,
            culprit: summary.culprit,
            incompatible_licenses: summary.incompatible_licenses,
            has_children: !artifact.needs.is_empty(),
        })
    }

    fn slot_row(&self, slot: &LibrarySlot, parent_license: &str) -> BrowseRow {
        let license = resolve_license_for_slot(self.store, slot, &self.walk.preference);
        let culprit = !is_compatible(parent_license, &license, &self.overrides);
        BrowseRow {
            node: NodeRef::Slot(slot.id),
            name: slot.name.clone(),
            full_path: slot.name.clone(),
            culprit,
            license,
            signoff: None,
            comment: None,
            compatible: !culprit,
            incompatible_licenses: Vec::new(),
            has_children: false,
        }
    }
}
