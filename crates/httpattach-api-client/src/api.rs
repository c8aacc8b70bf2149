//! Attachment upload on top of [`UploadClient`].
//!
//! The form carries a `name` text field and a `file` field holding the bytes,
//! posted to `/` followed by the file name.

use bytes::Bytes;
use httpattach_core::{AttachError, AttachResult, PathMode};
use reqwest::multipart::{Form, Part};

use crate::UploadClient;

/// What the server accepted. The response body is never parsed, so the
/// accepted name is the name that was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub accepted_name: String,
    pub path: String,
    pub status: u16,
}

/// Upload path for `file_name`.
pub fn attachment_path(file_name: &str, mode: PathMode) -> String {
    match mode {
        PathMode::Verbatim => format!("/{}", file_name),
        PathMode::Encoded => format!("/{}", urlencoding::encode(file_name)),
    }
}

fn file_part(file_name: &str, mime_type: &str, payload: Bytes) -> Part {
    let len = payload.len() as u64;
    let build = || {
        Part::stream_with_length(reqwest::Body::from(payload.clone()), len)
            .file_name(file_name.to_string())
    };

    if mime_type.is_empty() {
        return build();
    }

    match build().mime_str(mime_type) {
        Ok(part) => part,
        Err(e) => {
            tracing::warn!(mime_type, error = %e, "Ignoring unparsable mime type for upload");
            build()
        }
    }
}

impl UploadClient {
    /// Upload one file. A single attempt is made.
    pub async fn upload_attachment(
        &self,
        file_name: &str,
        mime_type: &str,
        payload: Bytes,
        mode: PathMode,
    ) -> AttachResult<UploadReceipt> {
        if file_name.is_empty() {
            return Err(AttachError::InvalidRequest(
                "Cannot upload a file without a name".to_string(),
            ));
        }

        let path = attachment_path(file_name, mode);
        let form = Form::new()
            .text("name", file_name.to_string())
            .part("file", file_part(file_name, mime_type, payload));

        tracing::debug!(url = %self.build_url(&path), "Uploading attachment");
        let status = self.post_multipart(&path, form).await?;

        Ok(UploadReceipt {
            accepted_name: file_name.to_string(),
            path,
            status: status.as_u16(),
        })
    }
}
