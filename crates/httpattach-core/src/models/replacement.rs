use serde::{Deserialize, Serialize};

use super::ImportRequest;

/// Entry handed back to the host in place of the inline import.
///
/// The host resolves the content through `canonical_reference` instead of
/// storing the bytes in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub title: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "_canonical_uri")]
    pub canonical_reference: String,
}

impl ReplacementEntry {
    /// Reference entry for an uploaded request: title and locator are the file name.
    pub fn for_request(request: &ImportRequest) -> Self {
        Self {
            title: request.file_name.clone(),
            mime_type: request.mime_type.clone(),
            canonical_reference: request.file_name.clone(),
        }
    }
}
