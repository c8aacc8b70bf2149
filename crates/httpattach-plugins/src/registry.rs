//! Hook registry keyed by extension point

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use httpattach_core::{ImportContext, ImportRequest};

use crate::plugin::{HookInfo, HookOutcome, ImportHook};

/// Extension point offered every file the host imports.
pub const IMPORTING_FILE: &str = "th-importing-file";

/// Registry for the hooks of each extension point.
///
/// Thread-safe and async-compatible using tokio's RwLock. Hooks of one
/// extension point run in registration order.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Arc<RwLock<HashMap<String, Vec<Arc<dyn ImportHook>>>>>,
    hook_info: Arc<RwLock<Vec<HookInfo>>>,
}

impl HookRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook to an extension point
    pub async fn register(
        &self,
        extension_point: &str,
        hook: Arc<dyn ImportHook>,
        description: impl Into<String>,
    ) {
        let info = HookInfo {
            name: hook.name().to_string(),
            description: description.into(),
            extension_point: extension_point.to_string(),
        };

        let mut hooks = self.hooks.write().await;
        let mut hook_info = self.hook_info.write().await;

        tracing::debug!(hook = %info.name, extension_point, "Registered hook");
        hooks
            .entry(extension_point.to_string())
            .or_default()
            .push(hook);
        hook_info.push(info);
    }

    /// Offer a file to the hooks of `extension_point`.
    ///
    /// Stops at the first hook that claims the file. `PassThrough` means no
    /// hook claimed it and the host's default import should proceed.
    pub async fn invoke(
        &self,
        extension_point: &str,
        context: &ImportContext,
        request: &ImportRequest,
    ) -> HookOutcome {
        // Snapshot the chain so hooks run without holding the lock.
        let chain: Vec<Arc<dyn ImportHook>> = {
            let hooks = self.hooks.read().await;
            match hooks.get(extension_point) {
                Some(chain) => chain.clone(),
                None => return HookOutcome::PassThrough,
            }
        };

        for hook in chain {
            let outcome = hook.on_importing_file(context, request).await;
            if outcome.is_claimed() {
                tracing::debug!(
                    hook = hook.name(),
                    file_name = %request.file_name,
                    "Import claimed"
                );
                return outcome;
            }
        }

        HookOutcome::PassThrough
    }

    /// Shorthand for [`IMPORTING_FILE`]
    pub async fn importing_file(
        &self,
        context: &ImportContext,
        request: &ImportRequest,
    ) -> HookOutcome {
        self.invoke(IMPORTING_FILE, context, request).await
    }

    /// List all registered hooks in registration order
    pub async fn list(&self) -> Vec<HookInfo> {
        self.hook_info.read().await.clone()
    }

    /// Check if a hook with `name` is registered on any extension point
    pub async fn contains(&self, name: &str) -> bool {
        self.hook_info
            .read()
            .await
            .iter()
            .any(|info| info.name == name)
    }
}
