use camino::{Utf8Path, Utf8PathBuf};
use licguard_domain::model::ArtifactId;
use licguard_domain::store::MemoryFactStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_FACTS_V1: &str = "licguard.facts.v1";

/// File name of the facts document inside a database directory.
pub const FACTS_FILE: &str = "facts.json";

/// Read-only snapshot of the gathered dependency facts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactsDocument {
    pub schema: String,
    #[serde(default)]
    pub artifacts: Vec<FactsArtifact>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactsArtifact {
    pub id: u32,
    pub basename: String,
    pub full_path: String,
    #[serde(default)]
    pub licenses: Vec<FactsLicense>,
    /// Sonames this artifact needs (DT_NEEDED), in link order.
    #[serde(default)]
    pub needs: Vec<String>,
    /// Sonames this artifact implements.
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactsLicense {
    pub license: String,
    pub provenance: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FactsError {
    #[error("facts document does not exist: {0}")]
    Missing(Utf8PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid facts document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported facts schema: {found} (expected licguard.facts.v1)")]
    Schema { found: String },

    #[error("duplicate artifact id {0}")]
    DuplicateId(u32),
}

/// Load `<database_dir>/facts.json` into an immutable store.
pub fn load_facts(database_dir: &Utf8Path) -> Result<MemoryFactStore, FactsError> {
    if !database_dir.is_dir() {
        return Err(FactsError::Missing(database_dir.to_path_buf()));
    }
    let path = database_dir.join(FACTS_FILE);
    if !path.is_file() {
        return Err(FactsError::Missing(path));
    }
    let text = std::fs::read_to_string(&path).map_err(|source| FactsError::Io {
        path: path.clone(),
        source,
    })?;
    let store = parse_facts(&text)?;
    tracing::debug!(path = %path, "loaded facts document");
    Ok(store)
}

pub fn parse_facts(text: &str) -> Result<MemoryFactStore, FactsError> {
    let doc: FactsDocument = serde_json::from_str(text)?;
    store_from_document(&doc)
}

/// Build a store from a parsed document.
///
/// Artifacts keep document order. Slots are created in first-seen order over each
/// artifact's `needs` followed by its `provides`.
pub fn store_from_document(doc: &FactsDocument) -> Result<MemoryFactStore, FactsError> {
    if doc.schema != SCHEMA_FACTS_V1 {
        return Err(FactsError::Schema {
            found: doc.schema.clone(),
        });
    }

    let mut store = MemoryFactStore::new();
    for a in &doc.artifacts {
        let id = ArtifactId(a.id);
        if !store.insert_artifact(id, &a.basename, &a.full_path) {
            return Err(FactsError::DuplicateId(a.id));
        }
        for l in &a.licenses {
            store.add_license(id, &l.license, &l.provenance);
        }
        for (name, value) in &a.tags {
            store.set_tag(id, name, value);
        }
    }

    for a in &doc.artifacts {
        let id = ArtifactId(a.id);
        for soname in &a.needs {
            store.add_need(id, soname);
        }
        for soname in &a.provides {
            store.add_provides(id, soname);
        }
    }

    tracing::debug!(
        artifacts = doc.artifacts.len(),
        "built fact store from document"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use licguard_domain::store::FactStore;

    #[test]
    fn document_builds_linked_store() {
        let store = parse_facts(
            r#"{
  "schema": "licguard.facts.v1",
  "artifacts": [
    {"id": 1, "basename": "app", "full_path": "/usr/bin/app",
     "licenses": [{"license": "MIT", "provenance": "package-manager"}],
     "needs": ["libfoo.so.1"], "tags": {"SIGNOFF": "jdoe"}},
    {"id": 2, "basename": "libfoo.so.1", "full_path": "/usr/lib/libfoo.so.1",
     "provides": ["libfoo.so.1"]}
  ]
}"#,
        )
        .expect("parse");

        assert_eq!(store.artifacts().len(), 2);
        assert_eq!(store.slots().len(), 1);
        let deps = store.direct_dependencies(ArtifactId(1));
        assert_eq!(deps[0].name, "libfoo.so.1");
        assert_eq!(store.providers(deps[0].id)[0].id, ArtifactId(2));
        assert_eq!(
            store.artifact(ArtifactId(1)).and_then(|a| a.tag("SIGNOFF")),
            Some("jdoe")
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_facts(
            r#"{"schema": "licguard.facts.v1", "artifacts": [
                {"id": 7, "basename": "a", "full_path": "/a"},
                {"id": 7, "basename": "b", "full_path": "/b"}]}"#,
        )
        .expect_err("duplicate");
        assert!(matches!(err, FactsError::DuplicateId(7)));
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let err = parse_facts(r#"{"schema": "other.v9", "artifacts": []}"#).expect_err("schema");
        assert!(err.to_string().contains("other.v9"));
    }
}
