//! Recursive dependency license compatibility walk.
//!
//! A walk starts at one root artifact, follows `artifact -> slot -> provider` edges
//! depth-first, and produces one [`TraversalResult`] per visited node. Results are
//! produced deepest-first: every child precedes its parent, and the root is last.
//! Renderers that want root-to-leaf order reverse the sequence themselves.
//!
//! Termination on cyclic graphs comes from the invocation-scoped [`Memo`]: a node is
//! recorded when it is entered, so reaching it again (a back-edge or a shared
//! descendant) reuses the recorded summary instead of recursing. The depth cap is a
//! safeguard against pathological graphs; nodes at the cap are emitted but not expanded.

use crate::compat::{OverrideTable, is_compatible};
use crate::license::{resolve_license, resolve_license_for_slot};
use crate::model::{ArtifactId, LibrarySlot, SlotId};
use crate::store::FactStore;
use licguard_types::ids::default_preference;
use std::collections::HashMap;

pub const DEFAULT_MAX_DEPTH: u32 = 32;

/// Early-exit policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakPolicy {
    /// Visit the full reachable subgraph.
    #[default]
    Never,
    /// Stop expanding a node's children at its first incompatible child.
    FirstIncompatible,
    /// Propagating stop signal: no node on the stack expands further siblings.
    /// Callers passing this get the same behavior as `FirstIncompatible`.
    Unwind,
}

impl BreakPolicy {
    /// Map the numeric `0|1|2` form.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => BreakPolicy::Never,
            1 => BreakPolicy::FirstIncompatible,
            _ => BreakPolicy::Unwind,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            BreakPolicy::Never => 0,
            BreakPolicy::FirstIncompatible => 1,
            BreakPolicy::Unwind => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkOptions {
    /// When false only the root's own summary record is produced.
    pub get_all: bool,
    pub break_on_incompatible: BreakPolicy,
    pub max_depth: u32,
    /// Provenance preference for license resolution.
    pub preference: Vec<String>,
    /// Culprit flag given to the root record.
    pub root_culprit: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            get_all: true,
            break_on_incompatible: BreakPolicy::Never,
            max_depth: DEFAULT_MAX_DEPTH,
            preference: default_preference(),
            root_culprit: false,
        }
    }
}

/// What a result refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeRef {
    Artifact(ArtifactId),
    /// A dependency slot with no recorded provider; always a leaf.
    Slot(SlotId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalResult {
    /// Depth relative to the walk root (root = 0).
    pub level: u32,
    pub node: NodeRef,
    /// Slot through which the parent reached this node. `None` for the root.
    pub via: Option<SlotId>,
    pub license: String,
    /// False when this node is a culprit or anything beneath it is incompatible.
    pub compatible: bool,
    /// True when this node is the direct cause of its parent's incompatibility.
    pub culprit: bool,
    /// Distinct incompatible licenses seen in this subtree, first-seen order.
    pub incompatible_licenses: Vec<String>,
    /// Served from the memo rather than expanded here.
    pub reused: bool,
}

impl TraversalResult {
    pub fn artifact(&self) -> Option<ArtifactId> {
        match self.node {
            NodeRef::Artifact(id) => Some(id),
            NodeRef::Slot(_) => None,
        }
    }

    pub fn status(&self) -> NodeStatus {
        if self.culprit {
            NodeStatus::Culprit
        } else if self.compatible {
            NodeStatus::Ok
        } else {
            NodeStatus::Incompatible
        }
    }
}

/// Display classification used by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Ok,
    Culprit,
    Incompatible,
}

impl NodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Ok => "ok",
            NodeStatus::Culprit => "culprit",
            NodeStatus::Incompatible => "incompatible",
        }
    }
}

/// Per-artifact outcome stored in the memo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSummary {
    pub license: String,
    pub compatible: bool,
    pub incompatible_licenses: Vec<String>,
    /// False while the node is still on the walk stack.
    pub complete: bool,
}

/// Invocation-scoped memo keyed by artifact id.
#[derive(Clone, Debug, Default)]
pub struct Memo {
    entries: HashMap<ArtifactId, NodeSummary>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ArtifactId) -> Option<&NodeSummary> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: ArtifactId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk from `root` with a fresh memo.
pub fn walk<S: FactStore + ?Sized>(
    store: &S,
    root: ArtifactId,
    overrides: &OverrideTable,
    opts: &WalkOptions,
) -> Vec<TraversalResult> {
    let mut memo = Memo::new();
    walk_with_memo(store, root, overrides, opts, &mut memo)
}

/// Walk from `root`, recording visited artifacts in `memo`.
pub fn walk_with_memo<S: FactStore + ?Sized>(
    store: &S,
    root: ArtifactId,
    overrides: &OverrideTable,
    opts: &WalkOptions,
    memo: &mut Memo,
) -> Vec<TraversalResult> {
    let break_policy = match opts.break_on_incompatible {
        BreakPolicy::Unwind => BreakPolicy::FirstIncompatible,
        other => other,
    };
    let mut walker = Walker {
        store,
        overrides,
        opts,
        memo,
        break_policy,
        out: Vec::new(),
    };
    walker.visit(root, None, 0, opts.root_culprit);
    tracing::trace!(
        root = %root,
        results = walker.out.len(),
        memo = walker.memo.len(),
        "walk finished"
    );
    walker.out
}

/// Index of each result's parent within a walk output, `None` for the root.
///
/// In deepest-first order a node's parent is the first later record one level up, so a
/// single backwards pass with a stack of open ancestors finds every parent.
pub fn parent_indices(results: &[TraversalResult]) -> Vec<Option<usize>> {
    let mut parents = vec![None; results.len()];
    let mut open: Vec<usize> = Vec::new();
    for (i, r) in results.iter().enumerate().rev() {
        while open.last().is_some_and(|&p| results[p].level >= r.level) {
            open.pop();
        }
        parents[i] = open.last().copied();
        open.push(i);
    }
    parents
}

enum Target<'a> {
    Provider(ArtifactId),
    Unprovided(&'a LibrarySlot),
}

struct Walker<'a, S: ?Sized> {
    store: &'a S,
    overrides: &'a OverrideTable,
    opts: &'a WalkOptions,
    memo: &'a mut Memo,
    break_policy: BreakPolicy,
    out: Vec<TraversalResult>,
}

impl<S: FactStore + ?Sized> Walker<'_, S> {
    fn visit(
        &mut self,
        id: ArtifactId,
        via: Option<SlotId>,
        level: u32,
        culprit: bool,
    ) -> TraversalResult {
        if let Some(summary) = self.memo.get(id) {
            let record = TraversalResult {
                level,
                node: NodeRef::Artifact(id),
                via,
                license: summary.license.clone(),
                compatible: summary.compatible,
                culprit,
                incompatible_licenses: summary.incompatible_licenses.clone(),
                reused: true,
            };
            self.emit(&record, level);
            return record;
        }

        let license = resolve_license(self.store, id, &self.opts.preference);
        self.memo.entries.insert(
            id,
            NodeSummary {
                license: license.clone(),
                compatible: true,
                incompatible_licenses: Vec::new(),
                complete: false,
            },
        );

        let mut compatible = true;
        let mut incompatible = Vec::new();

        if level < self.opts.max_depth {
            let store = self.store;
            let targets = store.direct_dependencies(id).into_iter().flat_map(|slot| {
                let providers = store.providers(slot.id);
                if providers.is_empty() {
                    vec![(slot.id, Target::Unprovided(slot))]
                } else {
                    providers
                        .into_iter()
                        .map(|p| (slot.id, Target::Provider(p.id)))
                        .collect()
                }
            });

            for (slot_id, target) in targets {
                let mut child = match target {
                    Target::Provider(child_id) => {
                        self.visit(child_id, Some(slot_id), level + 1, false)
                    }
                    Target::Unprovided(slot) => self.slot_leaf(slot, level + 1),
                };
                let slot_index = self.opts.get_all.then(|| self.out.len() - 1);

                let tripped = self.fold_child(
                    &license,
                    &mut child,
                    slot_index,
                    &mut compatible,
                    &mut incompatible,
                );
                if tripped && self.break_policy != BreakPolicy::Never {
                    self.break_policy = BreakPolicy::Unwind;
                }
                if self.break_policy == BreakPolicy::Unwind {
                    break;
                }
            }
        }

        self.memo.entries.insert(
            id,
            NodeSummary {
                license: license.clone(),
                compatible,
                incompatible_licenses: incompatible.clone(),
                complete: true,
            },
        );

        let record = TraversalResult {
            level,
            node: NodeRef::Artifact(id),
            via,
            license,
            compatible,
            culprit,
            incompatible_licenses: incompatible,
            reused: false,
        };
        self.emit(&record, level);
        record
    }

    fn slot_leaf(&mut self, slot: &LibrarySlot, level: u32) -> TraversalResult {
        let record = TraversalResult {
            level,
            node: NodeRef::Slot(slot.id),
            via: Some(slot.id),
            license: resolve_license_for_slot(self.store, slot, &self.opts.preference),
            compatible: true,
            culprit: false,
            incompatible_licenses: Vec::new(),
            reused: false,
        };
        self.emit(&record, level);
        record
    }

    /// Apply one child's outcome to its parent. Returns true if the child made the
    /// parent incompatible.
    fn fold_child(
        &mut self,
        parent_license: &str,
        child: &mut TraversalResult,
        emitted_at: Option<usize>,
        compatible: &mut bool,
        incompatible: &mut Vec<String>,
    ) -> bool {
        let mut tripped = false;

        // The memo summary is left alone: culprit belongs to this edge.
        if !is_compatible(parent_license, &child.license, self.overrides) {
            child.culprit = true;
            child.compatible = false;
            if let Some(i) = emitted_at {
                self.out[i].culprit = true;
                self.out[i].compatible = false;
            }
            push_distinct(incompatible, &child.license);
            tripped = true;
        }

        // Inherited incompatibility leaves the child's culprit flag alone.
        if !child.compatible {
            for license in &child.incompatible_licenses {
                push_distinct(incompatible, license);
            }
            tripped = true;
        }

        if tripped {
            *compatible = false;
        }
        tripped
    }

    fn emit(&mut self, record: &TraversalResult, level: u32) {
        if self.opts.get_all || level == 0 {
            self.out.push(record.clone());
        }
    }
}

fn push_distinct(list: &mut Vec<String>, license: &str) {
    if !list.iter().any(|l| l == license) {
        list.push(license.to_string());
    }
}
