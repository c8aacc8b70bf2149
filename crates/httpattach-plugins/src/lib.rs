//! Import hooks
//!
//! The hook trait and registry the host drives for each imported file, plus
//! the built-in http-attachments hook.

#[cfg(feature = "plugin-http-attachments")]
pub mod http_attachments;
pub mod plugin;
pub mod registry;
#[cfg(feature = "plugin-http-attachments")]
pub mod startup;

#[cfg(all(test, feature = "plugin-http-attachments"))]
mod test_helpers;

#[cfg(feature = "plugin-http-attachments")]
pub use http_attachments::{
    GateRejection, HttpAttachmentsHook, InterceptionDecision, InterceptionGate,
    ResultMaterializer, UploadTransport,
};
pub use plugin::{ClaimHandle, HookInfo, HookOutcome, ImportHook};
pub use registry::{HookRegistry, IMPORTING_FILE};
#[cfg(feature = "plugin-http-attachments")]
pub use startup::register_http_attachments;
