use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a scanned artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactId(pub u32);

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a library slot (soname) inside one fact store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LicenseTag {
    pub license: String,
    /// Where the tag came from, e.g. `manual` or `package-manager`.
    pub provenance: String,
}

impl LicenseTag {
    pub fn new(license: impl Into<String>, provenance: impl Into<String>) -> Self {
        Self {
            license: license.into(),
            provenance: provenance.into(),
        }
    }
}

/// A scanned binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub basename: String,
    pub full_path: String,

    /// License tags in store order.
    pub licenses: Vec<LicenseTag>,

    /// Outgoing dependency edges (DT_NEEDED), in store order, without duplicates.
    pub needs: Vec<SlotId>,

    /// Free-form tags collected during gathering (`FILE`, `SIGNOFF`, `COMMENT`, ...).
    pub tags: BTreeMap<String, String>,
}

impl Artifact {
    pub fn new(id: ArtifactId, basename: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            id,
            basename: basename.into(),
            full_path: full_path.into(),
            licenses: Vec::new(),
            needs: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }
}

/// A shared-library name referenced by artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibrarySlot {
    pub id: SlotId,
    pub name: String,
    pub needed_by: Vec<ArtifactId>,
    pub provides: Vec<ArtifactId>,
}
