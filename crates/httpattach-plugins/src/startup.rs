//! Startup registration of the built-in hooks

use std::sync::Arc;

use httpattach_core::{AttachConfig, AttachResult, ConfigStore};

use crate::http_attachments::HttpAttachmentsHook;
use crate::registry::{HookRegistry, IMPORTING_FILE};

/// Register the http-attachments hook on the file-import extension point.
pub async fn register_http_attachments(
    registry: &HookRegistry,
    config: &AttachConfig,
    store: Arc<dyn ConfigStore>,
) -> AttachResult<Arc<HttpAttachmentsHook>> {
    let hook = Arc::new(HttpAttachmentsHook::new(config, store)?);

    registry
        .register(
            IMPORTING_FILE,
            hook.clone(),
            "Uploads binary imports to the document's server and imports a reference instead",
        )
        .await;

    tracing::info!(
        hook = HttpAttachmentsHook::NAME,
        enable_title = %config.enable_title,
        path_mode = ?config.path_mode,
        "Startup: import hook registered"
    );
    Ok(hook)
}
