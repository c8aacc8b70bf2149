use httpattach_api_client::{build_http_client, UploadClient, UploadClientOptions, UploadReceipt};
use httpattach_core::{AttachConfig, AttachResult, ImportContext, ImportRequest, PathMode};

/// Sends a claimed file to the upload endpoint next to the document.
///
/// One attempt per file, no retry. The HTTP client is shared by all
/// requests; nothing else is.
#[derive(Clone, Debug)]
pub struct UploadTransport {
    client: reqwest::Client,
    path_mode: PathMode,
}

impl UploadTransport {
    pub fn new(options: &UploadClientOptions, path_mode: PathMode) -> AttachResult<Self> {
        Ok(Self {
            client: build_http_client(options)?,
            path_mode,
        })
    }

    pub fn from_config(config: &AttachConfig) -> AttachResult<Self> {
        Self::new(&UploadClientOptions::from(config), config.path_mode)
    }

    pub async fn upload(
        &self,
        context: &ImportContext,
        request: &ImportRequest,
    ) -> AttachResult<UploadReceipt> {
        let origin = context.location.origin()?;
        let client = UploadClient::with_client(self.client.clone(), origin);

        client
            .upload_attachment(
                &request.file_name,
                &request.mime_type,
                request.payload.clone(),
                self.path_mode,
            )
            .await
    }
}
