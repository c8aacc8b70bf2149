//! Import hook core infrastructure
//!
//! A hook is offered every file the host imports. It either passes the file
//! through, leaving the host's default import untouched, or claims it. A
//! claim is final: the host runs no further hooks for that file and waits on
//! the returned [`ClaimHandle`] (or on the request's completion callback).

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::{self, Debug};
use std::future::Future;
use tokio::task::JoinHandle;

use httpattach_core::{AttachError, AttachResult, ImportContext, ImportRequest, ReplacementEntry};

/// Handle on the asynchronous work behind a claimed import.
///
/// Dropping the handle does not cancel the work; a claimed import cannot be
/// rescinded.
pub struct ClaimHandle {
    file_name: String,
    task: JoinHandle<AttachResult<Vec<ReplacementEntry>>>,
}

impl ClaimHandle {
    /// Run `work` on the tokio runtime and return immediately.
    pub fn spawn<F>(file_name: impl Into<String>, work: F) -> Self
    where
        F: Future<Output = AttachResult<Vec<ReplacementEntry>>> + Send + 'static,
    {
        Self {
            file_name: file_name.into(),
            task: tokio::spawn(work),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Wait for the claim to settle.
    ///
    /// `Ok` carries the entries that were delivered to the completion
    /// callback; `Err` means the callback was never invoked.
    pub async fn wait(self) -> AttachResult<Vec<ReplacementEntry>> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(AttachError::TaskFailed(format!(
                "upload of '{}' did not complete: {}",
                self.file_name, e
            ))),
        }
    }
}

impl Debug for ClaimHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimHandle")
            .field("file_name", &self.file_name)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

/// What a hook decided for one file
#[derive(Debug)]
pub enum HookOutcome {
    /// Not handled here; the host continues with the next hook or its default import
    PassThrough,
    /// Handled here; no further hooks run for this file
    Claimed(ClaimHandle),
}

impl HookOutcome {
    /// Boolean form of the outcome as the host's hook contract expects it.
    pub fn is_claimed(&self) -> bool {
        matches!(self, HookOutcome::Claimed(_))
    }

    pub fn into_claim(self) -> Option<ClaimHandle> {
        match self {
            HookOutcome::Claimed(handle) => Some(handle),
            HookOutcome::PassThrough => None,
        }
    }
}

/// Trait that all import hooks must implement
#[async_trait]
pub trait ImportHook: Send + Sync + Debug {
    /// Get the hook name/identifier
    fn name(&self) -> &str;

    /// Offer an imported file to the hook.
    ///
    /// Must not wait for network work: anything slow belongs inside the
    /// returned claim.
    async fn on_importing_file(
        &self,
        context: &ImportContext,
        request: &ImportRequest,
    ) -> HookOutcome;
}

/// Hook information for listing registered hooks
#[derive(Debug, Clone, Serialize)]
pub struct HookInfo {
    /// Hook name/identifier
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Extension point the hook is registered on (e.g. "th-importing-file")
    pub extension_point: String,
}
