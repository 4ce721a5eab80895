//! Property-based tests for the walker.
//!
//! Random graphs (cycles and self-loops included) are checked for:
//! - termination with at most one expansion per artifact
//! - deepest-first ordering (every child precedes its parent)
//! - culprit flags matching pairwise compatibility on each edge
//! - summary-only walks agreeing with the full walk's root record

use crate::compat::{OverrideTable, is_compatible};
use crate::test_support::GraphBuilder;
use crate::walker::{Memo, NodeRef, WalkOptions, parent_indices, walk, walk_with_memo};
use proptest::prelude::*;
use std::collections::HashMap;

const LICENSES: &[&str] = &["MIT", "GPL", "BSD"];

#[derive(Clone, Debug)]
struct Graph {
    licenses: Vec<usize>,
    edges: Vec<(usize, usize)>,
}

fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(0..LICENSES.len(), n),
            prop::collection::vec((0..n, 0..n), 0..(n * 3)),
        )
            .prop_map(|(licenses, edges)| Graph { licenses, edges })
    })
}

fn arb_overrides() -> impl Strategy<Value = OverrideTable> {
    prop::collection::vec((0..LICENSES.len(), 0..LICENSES.len()), 0..3).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(a, b)| (LICENSES[a], LICENSES[b]))
            .collect()
    })
}

fn build(graph: &Graph) -> GraphBuilder {
    let mut g = GraphBuilder::new();
    for (i, lic) in graph.licenses.iter().enumerate() {
        g = g.artifact(&format!("n{i}"), LICENSES[*lic]);
    }
    for (from, to) in &graph.edges {
        g = g.edge(&format!("n{from}"), &format!("n{to}"));
    }
    g
}

proptest! {
    #[test]
    fn walk_terminates_and_expands_each_artifact_once(graph in arb_graph()) {
        let g = build(&graph);
        let mut memo = Memo::new();
        let results = walk_with_memo(
            g.store(),
            g.id("n0"),
            &OverrideTable::new(),
            &WalkOptions::default(),
            &mut memo,
        );

        prop_assert!(memo.len() <= graph.licenses.len());

        let mut expanded: HashMap<NodeRef, usize> = HashMap::new();
        for r in results.iter().filter(|r| !r.reused) {
            *expanded.entry(r.node).or_default() += 1;
        }
        prop_assert!(expanded.values().all(|count| *count == 1));
    }

    #[test]
    fn every_child_precedes_its_parent(graph in arb_graph()) {
        let g = build(&graph);
        let results = walk(g.store(), g.id("n0"), &OverrideTable::new(), &WalkOptions::default());

        let last = results.last().expect("root record");
        prop_assert_eq!(last.level, 0);
        prop_assert_eq!(results.iter().filter(|r| r.level == 0).count(), 1);

        for (i, parent) in parent_indices(&results).into_iter().enumerate() {
            if let Some(p) = parent {
                prop_assert!(p > i);
                prop_assert_eq!(results[p].level + 1, results[i].level);
            }
        }
    }

    #[test]
    fn culprit_flags_match_edge_compatibility(graph in arb_graph(), overrides in arb_overrides()) {
        let g = build(&graph);
        let results = walk(g.store(), g.id("n0"), &overrides, &WalkOptions::default());

        for (i, parent) in parent_indices(&results).into_iter().enumerate() {
            if let Some(p) = parent {
                let expected = !is_compatible(&results[p].license, &results[i].license, &overrides);
                prop_assert_eq!(results[i].culprit, expected);
                if expected {
                    prop_assert!(!results[p].compatible);
                }
            }
        }
    }

    #[test]
    fn summary_walk_matches_full_walk_root(graph in arb_graph(), overrides in arb_overrides()) {
        let g = build(&graph);
        let full = walk(g.store(), g.id("n0"), &overrides, &WalkOptions::default());
        let opts = WalkOptions { get_all: false, ..WalkOptions::default() };
        let summary = walk(g.store(), g.id("n0"), &overrides, &opts);

        prop_assert_eq!(summary.len(), 1);
        prop_assert_eq!(summary.last(), full.last());
    }
}
