use crate::model::ArtifactId;
use crate::store::{MemoryFactStore, node_names};
use crate::walker::TraversalResult;
use licguard_types::ids::PROVENANCE_PACKAGE_MANAGER;
use std::collections::HashMap;

/// Small builder for hand-written dependency graphs.
///
/// Artifacts are named by basename and live at `/usr/lib/<name>`. `edge(a, b)`
/// makes `a` need a slot named `b` that `b` provides.
#[derive(Default)]
pub struct GraphBuilder {
    store: MemoryFactStore,
    ids: HashMap<String, ArtifactId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifact(mut self, name: &str, license: &str) -> Self {
        let id = self.insert(name);
        self.store.add_license(id, license, PROVENANCE_PACKAGE_MANAGER);
        self
    }

    /// An artifact without any license tag.
    pub fn unlicensed(mut self, name: &str) -> Self {
        self.insert(name);
        self
    }

    pub fn edge(mut self, from: &str, to: &str) -> Self {
        let (from, to_id) = (self.id(from), self.id(to));
        self.store.add_need(from, to);
        self.store.add_provides(to_id, to);
        self
    }

    /// A dependency on a slot nobody provides.
    pub fn need(mut self, from: &str, soname: &str) -> Self {
        let from = self.id(from);
        self.store.add_need(from, soname);
        self
    }

    pub fn id(&self, name: &str) -> ArtifactId {
        self.ids[name]
    }

    pub fn store(&self) -> &MemoryFactStore {
        &self.store
    }

    pub fn name_of(&self, result: &TraversalResult) -> String {
        node_names(&self.store, result.node).0
    }

    fn insert(&mut self, name: &str) -> ArtifactId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = ArtifactId(self.ids.len() as u32 + 1);
        self.store
            .insert_artifact(id, name, &format!("/usr/lib/{name}"));
        self.ids.insert(name.to_string(), id);
        id
    }
}
