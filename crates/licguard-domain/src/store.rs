use crate::model::{Artifact, ArtifactId, LibrarySlot, LicenseTag, SlotId};
use crate::walker::NodeRef;
use std::collections::HashMap;

/// Read-only view over gathered dependency facts.
///
/// The walker only needs `direct_dependencies`, `providers`, `license_tags` and
/// `artifacts_by_basename`; the remaining methods serve root enumeration.
pub trait FactStore {
    fn artifact(&self, id: ArtifactId) -> Option<&Artifact>;

    /// All artifacts in store order.
    fn artifacts(&self) -> Vec<&Artifact>;

    /// All library slots in store order.
    fn slots(&self) -> Vec<&LibrarySlot>;

    fn slot(&self, id: SlotId) -> Option<&LibrarySlot>;

    fn direct_dependencies(&self, id: ArtifactId) -> Vec<&LibrarySlot>;

    fn providers(&self, slot: SlotId) -> Vec<&Artifact>;

    fn license_tags(&self, id: ArtifactId) -> &[LicenseTag];

    fn artifacts_by_basename(&self, name: &str) -> Vec<&Artifact>;
}

/// In-memory fact store, built once after ingestion and then only read.
#[derive(Clone, Debug, Default)]
pub struct MemoryFactStore {
    artifacts: Vec<Artifact>,
    artifact_index: HashMap<ArtifactId, usize>,
    slots: Vec<LibrarySlot>,
    slot_index: HashMap<String, SlotId>,
    basename_index: HashMap<String, Vec<ArtifactId>>,
}

impl MemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new artifact. Returns `false` (and changes nothing) if the id is taken.
    pub fn insert_artifact(&mut self, id: ArtifactId, basename: &str, full_path: &str) -> bool {
        if self.artifact_index.contains_key(&id) {
            return false;
        }
        self.artifact_index.insert(id, self.artifacts.len());
        self.artifacts.push(Artifact::new(id, basename, full_path));
        self.basename_index
            .entry(basename.to_string())
            .or_default()
            .push(id);
        true
    }

    pub fn add_license(&mut self, id: ArtifactId, license: &str, provenance: &str) -> bool {
        match self.artifact_mut(id) {
            Some(a) => {
                a.licenses.push(LicenseTag::new(license, provenance));
                true
            }
            None => false,
        }
    }

    pub fn set_tag(&mut self, id: ArtifactId, name: &str, value: &str) -> bool {
        match self.artifact_mut(id) {
            Some(a) => {
                a.tags.insert(name.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    /// Record that `id` needs the library slot named `soname`.
    pub fn add_need(&mut self, id: ArtifactId, soname: &str) -> bool {
        if !self.artifact_index.contains_key(&id) {
            return false;
        }
        let slot_id = self.slot_for(soname);
        let slot = &mut self.slots[slot_id.0 as usize];
        if !slot.needed_by.contains(&id) {
            slot.needed_by.push(id);
        }
        if let Some(a) = self.artifact_mut(id)
            && !a.needs.contains(&slot_id)
        {
            a.needs.push(slot_id);
        }
        true
    }

    /// Record that `id` implements the library slot named `soname`.
    pub fn add_provides(&mut self, id: ArtifactId, soname: &str) -> bool {
        if !self.artifact_index.contains_key(&id) {
            return false;
        }
        let slot_id = self.slot_for(soname);
        let slot = &mut self.slots[slot_id.0 as usize];
        if !slot.provides.contains(&id) {
            slot.provides.push(id);
        }
        true
    }

    pub fn slot_by_name(&self, name: &str) -> Option<&LibrarySlot> {
        self.slot_index
            .get(name)
            .map(|id| &self.slots[id.0 as usize])
    }

    fn slot_for(&mut self, name: &str) -> SlotId {
        if let Some(id) = self.slot_index.get(name) {
            return *id;
        }
        let id = SlotId(self.slots.len() as u32);
        self.slots.push(LibrarySlot {
            id,
            name: name.to_string(),
            needed_by: Vec::new(),
            provides: Vec::new(),
        });
        self.slot_index.insert(name.to_string(), id);
        id
    }

    fn artifact_mut(&mut self, id: ArtifactId) -> Option<&mut Artifact> {
        let idx = *self.artifact_index.get(&id)?;
        self.artifacts.get_mut(idx)
    }
}

impl FactStore for MemoryFactStore {
    fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifact_index.get(&id).map(|idx| &self.artifacts[*idx])
    }

    fn artifacts(&self) -> Vec<&Artifact> {
        self.artifacts.iter().collect()
    }

    fn slots(&self) -> Vec<&LibrarySlot> {
        self.slots.iter().collect()
    }

    fn slot(&self, id: SlotId) -> Option<&LibrarySlot> {
        self.slots.get(id.0 as usize)
    }

    fn direct_dependencies(&self, id: ArtifactId) -> Vec<&LibrarySlot> {
        self.artifact(id)
            .map(|a| {
                a.needs
                    .iter()
                    .filter_map(|s| self.slots.get(s.0 as usize))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn providers(&self, slot: SlotId) -> Vec<&Artifact> {
        self.slots
            .get(slot.0 as usize)
            .map(|s| s.provides.iter().filter_map(|id| self.artifact(*id)).collect())
            .unwrap_or_default()
    }

    fn license_tags(&self, id: ArtifactId) -> &[LicenseTag] {
        self.artifact(id).map(|a| a.licenses.as_slice()).unwrap_or(&[])
    }

    fn artifacts_by_basename(&self, name: &str) -> Vec<&Artifact> {
        self.basename_index
            .get(name)
            .map(|ids| ids.iter().filter_map(|id| self.artifact(*id)).collect())
            .unwrap_or_default()
    }
}

/// Display name and path of a walk node: basename and full path for artifacts,
/// the soname (twice) for unprovided slots.
pub fn node_names<S: FactStore + ?Sized>(store: &S, node: NodeRef) -> (String, String) {
    match node {
        NodeRef::Artifact(id) => store
            .artifact(id)
            .map(|a| (a.basename.clone(), a.full_path.clone()))
            .unwrap_or_else(|| (id.to_string(), id.to_string())),
        NodeRef::Slot(id) => {
            let name = store
                .slot(id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| format!("slot {}", id.0));
            (name.clone(), name)
        }
    }
}
