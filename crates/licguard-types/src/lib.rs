//! Stable DTOs and IDs used across the licguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs, finding codes, and license sentinels
//! - provenance and tag names shared by loaders and the resolver

#![forbid(unsafe_code)]

pub mod ids;
pub mod receipt;

pub use receipt::{
    Finding, LicguardData, LicguardReport, Location, ReportEnvelope, RootSummary, Severity,
    ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
