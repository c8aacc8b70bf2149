//! httpattach Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! configuration-store seam shared by the upload client, the import hooks and
//! the CLI host.

pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod tiddler_file;

// Re-export commonly used types
pub use config::{AttachConfig, PathMode, DEFAULT_ENABLE_TITLE};
pub use error::{AttachError, AttachResult, LogLevel};
pub use hooks::{ConfigStore, MemoryConfigStore};
pub use models::{
    CompletionCallback, DocumentLocation, ImportContext, ImportRequest, ReplacementEntry,
};
pub use tiddler_file::TiddlerDirectoryStore;
