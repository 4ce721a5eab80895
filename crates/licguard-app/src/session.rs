//! Loading everything a use case needs: config, facts, and the override table.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use licguard_domain::compat::OverrideTable;
use licguard_domain::license::resolve_license_for_slot;
use licguard_domain::model::{LibrarySlot, SlotId};
use licguard_domain::store::{FactStore, MemoryFactStore};
use licguard_settings::{Overrides, ResolvedConfig};
use licguard_types::ids::is_sentinel;

/// Input shared by every use case that reads the facts database.
#[derive(Clone, Debug)]
pub struct SessionInput<'a> {
    /// Directory holding `facts.json`.
    pub database_dir: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Directory that relative paths in the config file are resolved against.
    pub config_dir: Option<&'a Utf8Path>,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Extra `LIBRARY,APPLICABLE` files from the command line.
    pub signoff_files: Vec<Utf8PathBuf>,
    /// Extra `LICENSE,COMPAT_LICENSE` files from the command line.
    pub license_compat_files: Vec<Utf8PathBuf>,
}

pub struct Session {
    pub store: MemoryFactStore,
    pub resolved: ResolvedConfig,
    pub overrides: OverrideTable,
}

pub fn resolve_settings(
    config_text: &str,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    // Parse config (empty is allowed, defaults apply).
    let cfg = if config_text.trim().is_empty() {
        licguard_settings::LicguardConfigV1::default()
    } else {
        licguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    licguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

pub fn open_session(input: SessionInput<'_>) -> anyhow::Result<Session> {
    let resolved = resolve_settings(input.config_text, input.overrides.clone())?;

    let store = licguard_facts::load_facts(input.database_dir).context("load facts")?;

    let relative_to = |p: &String| -> Utf8PathBuf {
        let path = Utf8PathBuf::from(p);
        match input.config_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    };
    let compat_files: Vec<Utf8PathBuf> = resolved
        .license_compat_files
        .iter()
        .map(relative_to)
        .chain(input.license_compat_files.iter().cloned())
        .collect();
    let signoff_files: Vec<Utf8PathBuf> = resolved
        .signoff_files
        .iter()
        .map(relative_to)
        .chain(input.signoff_files.iter().cloned())
        .collect();

    let overrides = load_overrides(
        &store,
        &compat_files,
        &signoff_files,
        &resolved.effective.walk.preference,
    )?;
    tracing::info!(
        artifacts = store.artifacts().len(),
        overrides = overrides.len(),
        "session ready"
    );

    Ok(Session {
        store,
        resolved,
        overrides,
    })
}

/// Collapse license-compat pairs and library signoffs into one table.
///
/// A signoff `(library, applicable)` becomes `applicable -> license(library)`.
pub fn load_overrides<S: FactStore + ?Sized>(
    store: &S,
    compat_files: &[Utf8PathBuf],
    signoff_files: &[Utf8PathBuf],
    preference: &[String],
) -> anyhow::Result<OverrideTable> {
    let mut table = OverrideTable::new();

    for path in compat_files {
        let pairs = licguard_facts::read_license_compat(path)
            .with_context(|| format!("read license compat file {path}"))?;
        for (license, compat) in pairs {
            table.insert(&license, &compat);
        }
    }

    for path in signoff_files {
        let rows = licguard_facts::read_signoff(path)
            .with_context(|| format!("read signoff file {path}"))?;
        for row in rows {
            let license = library_license(store, &row.library, preference);
            if is_sentinel(&license) {
                // Allowing a sentinel would sign off every unresolved library at once.
                tracing::warn!(
                    file = %path,
                    library = %row.library,
                    applicable = %row.applicable,
                    "skipping signoff for a library with no resolvable license"
                );
                continue;
            }
            tracing::debug!(
                library = %row.library,
                license = %license,
                applicable = %row.applicable,
                "signoff"
            );
            table.insert(&row.applicable, &license);
        }
    }

    Ok(table)
}

fn library_license<S: FactStore + ?Sized>(
    store: &S,
    library: &str,
    preference: &[String],
) -> String {
    if let Some(slot) = store.slots().into_iter().find(|s| s.name == library) {
        return resolve_license_for_slot(store, slot, preference);
    }
    // Libraries nobody links against are still looked up by basename.
    let detached = LibrarySlot {
        id: SlotId(u32::MAX),
        name: library.to_string(),
        needed_by: Vec::new(),
        provides: Vec::new(),
    };
    resolve_license_for_slot(store, &detached, preference)
}
