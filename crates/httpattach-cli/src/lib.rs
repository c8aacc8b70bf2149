//! Helpers for the httpattach command-line host.

use base64::Engine;
use httpattach_core::{
    AttachError, AttachResult, ConfigStore, ImportRequest, MemoryConfigStore, ReplacementEntry,
    TiddlerDirectoryStore,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Entry produced by the host's default import: content embedded inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineEntry {
    pub title: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub text: String,
}

/// Default import for a file no hook claimed. Binary content is base64-encoded.
pub fn inline_entry(request: &ImportRequest) -> InlineEntry {
    let text = if request.is_binary {
        base64::engine::general_purpose::STANDARD.encode(&request.payload)
    } else {
        String::from_utf8_lossy(&request.payload).into_owned()
    };

    InlineEntry {
        title: request.file_name.clone(),
        mime_type: request.mime_type.clone(),
        text,
    }
}

/// What the host ended up importing.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportReport {
    /// Claimed by a hook and uploaded; the entries reference the remote file
    Referenced { entries: Vec<ReplacementEntry> },
    /// Passed through to the default inline import
    Inline { entry: InlineEntry },
}

/// Final path component as the imported file name.
pub fn file_name_of(path: &Path) -> AttachResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| {
            AttachError::InvalidRequest(format!("No usable file name in {}", path.display()))
        })
}

/// Flag store for a run: a `.tid` directory, or memory with the flag set
/// to `yes` when `enable` is given (otherwise left unset).
pub async fn open_store(
    enable: bool,
    tiddlers: Option<&Path>,
    enable_title: &str,
) -> AttachResult<Arc<dyn ConfigStore>> {
    if let Some(dir) = tiddlers {
        return Ok(Arc::new(TiddlerDirectoryStore::open(dir).await?));
    }

    let store = MemoryConfigStore::new();
    if enable {
        store.set(enable_title, "yes").await;
    }
    Ok(Arc::new(store))
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpattach_core::{CompletionCallback, DEFAULT_ENABLE_TITLE};
    use tempfile::TempDir;

    fn request(is_binary: bool, payload: &[u8]) -> ImportRequest {
        let (callback, _rx) = CompletionCallback::channel();
        ImportRequest::new(
            "file.bin",
            "application/octet-stream",
            is_binary,
            payload.to_vec(),
            callback,
        )
    }

    #[test]
    fn inline_entry_encodes_binary_as_base64() {
        let entry = inline_entry(&request(true, b"\x00\x01hi"));
        assert_eq!(entry.text, "AAFoaQ==");
        assert_eq!(entry.title, "file.bin");
    }

    #[test]
    fn inline_entry_keeps_text_as_is() {
        let entry = inline_entry(&request(false, b"hello world"));
        assert_eq!(entry.text, "hello world");
    }

    #[test]
    fn report_is_tagged_by_status() {
        let report = ImportReport::Referenced {
            entries: vec![ReplacementEntry {
                title: "photo.png".to_string(),
                mime_type: "image/png".to_string(),
                canonical_reference: "photo.png".to_string(),
            }],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "referenced");
        assert_eq!(value["entries"][0]["_canonical_uri"], "photo.png");
    }

    #[test]
    fn file_name_of_takes_last_component() {
        assert_eq!(
            file_name_of(Path::new("/tmp/photos/photo.png")).unwrap(),
            "photo.png"
        );
        assert!(file_name_of(Path::new("/")).is_err());
    }

    #[tokio::test]
    async fn enable_sets_flag_in_memory_store() {
        let store = open_store(true, None, DEFAULT_ENABLE_TITLE).await.unwrap();
        assert_eq!(
            store.get_text(DEFAULT_ENABLE_TITLE).await.unwrap().as_deref(),
            Some("yes")
        );

        let store = open_store(false, None, DEFAULT_ENABLE_TITLE).await.unwrap();
        assert_eq!(store.get_text(DEFAULT_ENABLE_TITLE).await.unwrap(), None);
    }

    #[tokio::test]
    async fn tiddler_directory_is_used_when_given() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("enable.tid"),
            format!("title: {}\n\nyes\n", DEFAULT_ENABLE_TITLE),
        )
        .unwrap();

        let store = open_store(false, Some(dir.path()), DEFAULT_ENABLE_TITLE)
            .await
            .unwrap();
        assert_eq!(
            store.get_text(DEFAULT_ENABLE_TITLE).await.unwrap().as_deref(),
            Some("yes")
        );
    }
}
