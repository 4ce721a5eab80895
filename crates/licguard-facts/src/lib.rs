//! IO adapters: the gathered facts document and operator override files.
//!
//! This crate is allowed to do filesystem IO. It never runs the metadata gatherer; it only
//! reads what the gatherer already committed.

#![forbid(unsafe_code)]

mod facts;
mod overrides;

pub use facts::{
    FACTS_FILE, FactsArtifact, FactsDocument, FactsError, FactsLicense, SCHEMA_FACTS_V1,
    load_facts, parse_facts, store_from_document,
};
pub use overrides::{
    SignoffRow, parse_license_compat, parse_signoff, read_license_compat, read_signoff,
    write_license_compat, write_license_compat_to,
};
