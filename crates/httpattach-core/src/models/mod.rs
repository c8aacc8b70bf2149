//! Data models for the import pipeline
//!
//! Each sub-module covers one side of an import: where the document lives,
//! what the host hands to the hooks, and what a claimed import resolves to.

mod import;
mod location;
mod replacement;

pub use import::{CompletionCallback, ImportRequest};
pub use location::{DocumentLocation, ImportContext};
pub use replacement::ReplacementEntry;
