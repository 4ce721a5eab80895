//! Pure license compatibility evaluation (no IO).
//!
//! Input: a fact store built elsewhere and an override table.
//! Output: attributed walk results, browse rows, or findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod browse;
pub mod compat;
pub mod license;
pub mod model;
pub mod policy;
pub mod report;
pub mod store;
pub mod walker;

mod engine;
mod fingerprint;

pub use browse::{BrowseRow, Browser};
pub use compat::{OverrideTable, is_compatible};
pub use engine::{evaluate, select_roots};
pub use fingerprint::fingerprint_for_edge;
pub use license::{resolve_license, resolve_license_for_slot};
pub use store::{FactStore, MemoryFactStore, node_names};
pub use walker::{
    BreakPolicy, Memo, NodeRef, NodeStatus, TraversalResult, WalkOptions, parent_indices, walk,
    walk_with_memo,
};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
