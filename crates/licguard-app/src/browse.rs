//! The `expand` and `allow` use cases: one browsing step and override edits.

use crate::session::Session;
use crate::tree::find_artifact;
use camino::Utf8Path;
use licguard_domain::browse::{BrowseRow, Browser};
use licguard_domain::policy::RootFilter;
use licguard_domain::walker::NodeRef;

/// List roots (no query) or the children of the queried artifact.
pub fn run_expand(
    session: &Session,
    query: Option<&str>,
    all: bool,
) -> anyhow::Result<Vec<BrowseRow>> {
    let mut browser = Browser::new(
        &session.store,
        session.overrides.clone(),
        session.resolved.effective.walk.clone(),
    );
    match query {
        None => {
            let filter = if all {
                RootFilter::All
            } else {
                session.resolved.effective.roots
            };
            Ok(browser.roots(filter))
        }
        Some(q) => {
            let id = find_artifact(&session.store, q)?;
            Ok(browser.expand(id))
        }
    }
}

pub fn format_rows(rows: &[BrowseRow]) -> String {
    let header = ["NAME", "LICENSE", "STATUS", "SIGNOFF", "COMMENT", "PATH"];
    let mut table: Vec<[String; 6]> = vec![header.map(str::to_string)];
    for row in rows {
        let status = if row.culprit {
            "culprit"
        } else if row.compatible {
            "ok"
        } else {
            "incompatible"
        };
        let name = match row.node {
            NodeRef::Artifact(_) if row.has_children => format!("{} +", row.name),
            _ => row.name.clone(),
        };
        table.push([
            name,
            row.license.clone(),
            status.to_string(),
            row.signoff.clone().unwrap_or_default(),
            row.comment.clone().unwrap_or_default(),
            row.full_path.clone(),
        ]);
    }

    let mut widths = [0usize; 6];
    for cols in &table {
        for (w, c) in widths.iter_mut().zip(cols.iter()) {
            *w = (*w).max(c.chars().count());
        }
    }

    let mut out = String::new();
    for cols in &table {
        let mut line = String::new();
        for (i, c) in cols.iter().enumerate() {
            if i + 1 == cols.len() {
                line.push_str(c);
            } else {
                line.push_str(&format!("{:<width$}  ", c, width = widths[i]));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowOutcome {
    /// False when the pair was already present.
    pub added: bool,
    pub pairs: usize,
}

/// Add `compatible` beneath `license` to the loaded table and save it to `out`.
pub fn run_allow(
    session: &Session,
    license: &str,
    compatible: &str,
    out: &Utf8Path,
) -> anyhow::Result<AllowOutcome> {
    let mut browser = Browser::new(
        &session.store,
        session.overrides.clone(),
        session.resolved.effective.walk.clone(),
    );
    let added = browser.allow(license, compatible);
    let table = browser.into_overrides();
    licguard_facts::write_license_compat(out, &table)?;
    Ok(AllowOutcome {
        added,
        pairs: table.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use licguard_domain::model::ArtifactId;

    fn row(name: &str, compatible: bool, culprit: bool) -> BrowseRow {
        BrowseRow {
            node: NodeRef::Artifact(ArtifactId(1)),
            name: name.to_string(),
            full_path: format!("/usr/lib/{name}"),
            license: "MIT".to_string(),
            signoff: Some("jdoe".to_string()),
            comment: None,
            compatible,
            culprit,
            incompatible_licenses: Vec::new(),
            has_children: false,
        }
    }

    #[test]
    fn rows_format_as_aligned_table() {
        let text = format_rows(&[row("libfoo", true, false), row("libbarbaz", false, true)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME       LICENSE  STATUS"));
        assert!(lines[1].starts_with("libfoo     MIT      ok"));
        assert!(lines[2].contains("culprit"));
        assert!(lines[2].ends_with("/usr/lib/libbarbaz"));
    }
}
