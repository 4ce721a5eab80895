//! The `tree` use case: render the full walk of one artifact.

use crate::session::Session;
use licguard_domain::model::ArtifactId;
use licguard_domain::store::{FactStore, node_names};
use licguard_domain::walker::{NodeStatus, TraversalResult, WalkOptions, walk};
use licguard_render::{RenderableNodeStatus, RenderableTreeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeFormat {
    Text,
    Html,
}

/// Find an artifact by numeric id, full path, or basename.
pub fn find_artifact<S: FactStore + ?Sized>(store: &S, query: &str) -> anyhow::Result<ArtifactId> {
    let query = query.trim_start_matches('#');
    if let Ok(n) = query.parse::<u32>()
        && store.artifact(ArtifactId(n)).is_some()
    {
        return Ok(ArtifactId(n));
    }

    let artifacts = store.artifacts();
    if let Some(a) = artifacts.iter().find(|a| a.full_path == query) {
        return Ok(a.id);
    }

    let by_name = store.artifacts_by_basename(query);
    match by_name.as_slice() {
        [] => anyhow::bail!("no artifact named {query}"),
        [one] => Ok(one.id),
        many => {
            let paths: Vec<&str> = many.iter().map(|a| a.full_path.as_str()).collect();
            anyhow::bail!(
                "artifact name {query} is ambiguous; use a full path: {}",
                paths.join(", ")
            )
        }
    }
}

/// Walk `id` fully and convert the records for rendering (deepest-first order kept).
pub fn tree_nodes<S: FactStore + ?Sized>(
    store: &S,
    id: ArtifactId,
    overrides: &licguard_domain::compat::OverrideTable,
    opts: &WalkOptions,
) -> Vec<RenderableTreeNode> {
    let opts = WalkOptions {
        get_all: true,
        ..opts.clone()
    };
    walk(store, id, overrides, &opts)
        .iter()
        .map(|r| renderable_node(store, r))
        .collect()
}

fn renderable_node<S: FactStore + ?Sized>(store: &S, r: &TraversalResult) -> RenderableTreeNode {
    let (name, full_path) = node_names(store, r.node);
    RenderableTreeNode {
        level: r.level,
        name,
        full_path,
        license: r.license.clone(),
        status: match r.status() {
            NodeStatus::Ok => RenderableNodeStatus::Ok,
            NodeStatus::Culprit => RenderableNodeStatus::Culprit,
            NodeStatus::Incompatible => RenderableNodeStatus::Incompatible,
        },
        incompatible_licenses: r.incompatible_licenses.clone(),
        reused: r.reused,
    }
}

pub fn run_tree(session: &Session, query: &str, format: TreeFormat) -> anyhow::Result<String> {
    let id = find_artifact(&session.store, query)?;
    let nodes = tree_nodes(
        &session.store,
        id,
        &session.overrides,
        &session.resolved.effective.walk,
    );
    tracing::debug!(artifact = %id, nodes = nodes.len(), "rendering tree");
    Ok(match format {
        TreeFormat::Text => licguard_render::render_tree_text(&nodes),
        TreeFormat::Html => licguard_render::render_tree_html(&nodes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use licguard_domain::compat::OverrideTable;
    use licguard_domain::store::MemoryFactStore;

    fn store() -> MemoryFactStore {
        let mut s = MemoryFactStore::new();
        s.insert_artifact(ArtifactId(1), "app", "/usr/bin/app");
        s.insert_artifact(ArtifactId(2), "libfoo.so.1", "/usr/lib/libfoo.so.1");
        s.insert_artifact(ArtifactId(3), "libfoo.so.1", "/opt/lib/libfoo.so.1");
        s.add_license(ArtifactId(1), "MIT", "package-manager");
        s.add_license(ArtifactId(2), "GPL", "package-manager");
        s.add_need(ArtifactId(1), "libfoo.so.1");
        s.add_provides(ArtifactId(2), "libfoo.so.1");
        s
    }

    #[test]
    fn artifacts_are_found_by_id_path_and_name() {
        let s = store();
        assert_eq!(find_artifact(&s, "1").expect("id"), ArtifactId(1));
        assert_eq!(find_artifact(&s, "#2").expect("id"), ArtifactId(2));
        assert_eq!(find_artifact(&s, "app").expect("name"), ArtifactId(1));
        assert_eq!(
            find_artifact(&s, "/opt/lib/libfoo.so.1").expect("path"),
            ArtifactId(3)
        );
        let err = find_artifact(&s, "libfoo.so.1").expect_err("ambiguous");
        assert!(err.to_string().contains("ambiguous"));
        assert!(find_artifact(&s, "nope").is_err());
    }

    #[test]
    fn tree_nodes_mark_culprit_and_incompatible() {
        let s = store();
        let nodes = tree_nodes(&s, ArtifactId(1), &OverrideTable::new(), &WalkOptions::default());
        let text = licguard_render::render_tree_text(&nodes);
        assert_eq!(
            text,
            "app [MIT] incompatible (GPL)\n  libfoo.so.1 [GPL] culprit\n"
        );
    }
}
