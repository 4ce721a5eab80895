//! Operator override files.
//!
//! Both formats are headed CSV with `#` comment lines. Rows that cannot be read are
//! skipped with a warning; a missing file is not an error.

use anyhow::Context;
use camino::Utf8Path;
use licguard_domain::compat::OverrideTable;
use serde::Deserialize;
use std::io::{Read, Write};

#[derive(Debug, Deserialize)]
struct CompatRecord {
    #[serde(rename = "LICENSE")]
    license: String,
    #[serde(rename = "COMPAT_LICENSE")]
    compat_license: String,
}

#[derive(Debug, Deserialize)]
struct SignoffRecord {
    #[serde(rename = "LIBRARY")]
    library: String,
    #[serde(rename = "APPLICABLE")]
    applicable: String,
}

/// One signoff entry: `library` is approved beneath artifacts licensed `applicable`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignoffRow {
    pub library: String,
    pub applicable: String,
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Read `LICENSE,COMPAT_LICENSE` pairs. `origin` names the source in log events.
pub fn parse_license_compat<R: Read>(input: R, origin: &str) -> Vec<(String, String)> {
    let mut rdr = reader(input);
    let mut pairs = Vec::new();
    for (idx, row) in rdr.deserialize::<CompatRecord>().enumerate() {
        match row {
            Ok(r) if !r.license.is_empty() && !r.compat_license.is_empty() => {
                pairs.push((r.license, r.compat_license));
            }
            Ok(_) => {
                tracing::warn!(file = origin, row = idx + 1, "skipping row with empty license");
            }
            Err(err) => {
                tracing::warn!(file = origin, row = idx + 1, error = %err, "skipping malformed row");
            }
        }
    }
    pairs
}

/// Read `LIBRARY,APPLICABLE` rows. Extra columns are ignored.
pub fn parse_signoff<R: Read>(input: R, origin: &str) -> Vec<SignoffRow> {
    let mut rdr = reader(input);
    let mut rows = Vec::new();
    for (idx, row) in rdr.deserialize::<SignoffRecord>().enumerate() {
        match row {
            Ok(r) if !r.library.is_empty() && !r.applicable.is_empty() => {
                rows.push(SignoffRow {
                    library: r.library,
                    applicable: r.applicable,
                });
            }
            Ok(_) => {
                tracing::warn!(file = origin, row = idx + 1, "skipping row with empty field");
            }
            Err(err) => {
                tracing::warn!(file = origin, row = idx + 1, error = %err, "skipping malformed row");
            }
        }
    }
    rows
}

pub fn read_license_compat(path: &Utf8Path) -> anyhow::Result<Vec<(String, String)>> {
    match open_optional(path)? {
        Some(file) => Ok(parse_license_compat(file, path.as_str())),
        None => Ok(Vec::new()),
    }
}

pub fn read_signoff(path: &Utf8Path) -> anyhow::Result<Vec<SignoffRow>> {
    match open_optional(path)? {
        Some(file) => Ok(parse_signoff(file, path.as_str())),
        None => Ok(Vec::new()),
    }
}

fn open_optional(path: &Utf8Path) -> anyhow::Result<Option<std::fs::File>> {
    if !path.exists() {
        tracing::debug!(file = %path, "override file not found; skipping");
        return Ok(None);
    }
    let file = std::fs::File::open(path).with_context(|| format!("open {path}"))?;
    Ok(Some(file))
}

/// Write the table as `LICENSE,COMPAT_LICENSE` rows in deterministic order.
pub fn write_license_compat_to<W: Write>(out: W, table: &OverrideTable) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["LICENSE", "COMPAT_LICENSE"])
        .context("write header")?;
    for (license, compat) in table.pairs() {
        wtr.write_record([license, compat]).context("write row")?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

pub fn write_license_compat(path: &Utf8Path, table: &OverrideTable) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    let file = std::fs::File::create(path).with_context(|| format!("create {path}"))?;
    write_license_compat_to(file, table).with_context(|| format!("write {path}"))?;
    tracing::info!(file = %path, pairs = table.len(), "saved license compat overrides");
    Ok(())
}
