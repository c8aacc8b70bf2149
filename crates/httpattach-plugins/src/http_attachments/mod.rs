//! http-attachments hook
//!
//! Redirects binary imports of a network-served document to an upload
//! endpoint at `/<file name>` on the document's origin, and replaces the
//! imported entry with a reference to the uploaded file.
//!
//! The pipeline per file is gate, then transport, then materializer. The
//! hook answers the host as soon as the gate has decided; the upload and the
//! completion callback run on a spawned task behind the returned claim.

mod gate;
mod materializer;
mod transport;

pub use gate::{GateRejection, InterceptionDecision, InterceptionGate, ENABLED_VALUE};
pub use materializer::ResultMaterializer;
pub use transport::UploadTransport;

use async_trait::async_trait;
use std::sync::Arc;

use httpattach_core::{AttachConfig, AttachResult, ConfigStore, ImportContext, ImportRequest};

use crate::plugin::{ClaimHandle, HookOutcome, ImportHook};

/// Import hook that uploads binary files instead of embedding them
#[derive(Debug, Clone)]
pub struct HttpAttachmentsHook {
    gate: InterceptionGate,
    transport: UploadTransport,
}

impl HttpAttachmentsHook {
    pub const NAME: &'static str = "http-attachments";

    pub fn new(config: &AttachConfig, store: Arc<dyn ConfigStore>) -> AttachResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            InterceptionGate::new(config.enable_title.clone(), store),
            UploadTransport::from_config(config)?,
        ))
    }

    pub fn from_parts(gate: InterceptionGate, transport: UploadTransport) -> Self {
        Self { gate, transport }
    }

    pub fn gate(&self) -> &InterceptionGate {
        &self.gate
    }
}

#[async_trait]
impl ImportHook for HttpAttachmentsHook {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_importing_file(
        &self,
        context: &ImportContext,
        request: &ImportRequest,
    ) -> HookOutcome {
        match self.gate.evaluate(context, request).await {
            InterceptionDecision::PassThrough(reason) => {
                tracing::trace!(
                    file_name = %request.file_name,
                    ?reason,
                    "Leaving import to the host"
                );
                HookOutcome::PassThrough
            }
            InterceptionDecision::Claim => {
                tracing::debug!(
                    location = %context.location,
                    file_name = %request.file_name,
                    mime_type = %request.mime_type,
                    bytes = request.payload.len(),
                    "Redirecting binary import to upload endpoint"
                );

                let transport = self.transport.clone();
                let context = context.clone();
                let request = request.clone();
                HookOutcome::Claimed(ClaimHandle::spawn(
                    request.file_name.clone(),
                    async move {
                        let outcome = transport.upload(&context, &request).await;
                        ResultMaterializer::settle(&request, outcome)
                    },
                ))
            }
        }
    }
}
