//! `.tid` directory config store
//!
//! Reads configuration entries stored as `.tid` files: `key: value` header
//! lines, a blank line, then the entry text. The `title` header names the
//! entry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::error::{AttachError, AttachResult};
use crate::hooks::ConfigStore;

/// A parsed `.tid` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiddlerFile {
    pub fields: HashMap<String, String>,
    pub text: String,
}

impl TiddlerFile {
    pub fn parse(content: &str) -> Self {
        let (header, body) = split_header(content);

        let fields = header
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();

        // The newline that terminates the file is not part of the text.
        let text = body
            .strip_suffix("\r\n")
            .or_else(|| body.strip_suffix('\n'))
            .unwrap_or(body)
            .to_string();

        Self { fields, text }
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").map(String::as_str)
    }
}

/// Split at the first blank line, `\n\n` or `\r\n\r\n`. The body is left as written.
fn split_header(content: &str) -> (&str, &str) {
    let lf = content.find("\n\n").map(|at| (at, 2));
    let crlf = content.find("\r\n\r\n").map(|at| (at, 4));
    let separator = match (lf, crlf) {
        (Some(lf), Some(crlf)) => Some(if crlf.0 < lf.0 { crlf } else { lf }),
        (lf, crlf) => lf.or(crlf),
    };

    match separator {
        Some((at, len)) => (&content[..at], &content[at + len..]),
        None => (content, ""),
    }
}

/// Config store backed by a directory of `.tid` files
#[derive(Clone)]
pub struct TiddlerDirectoryStore {
    dir: PathBuf,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl TiddlerDirectoryStore {
    /// Load every `.tid` file in `dir`
    pub async fn open(dir: impl Into<PathBuf>) -> AttachResult<Self> {
        let store = Self {
            dir: dir.into(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        };
        store.reload().await?;
        Ok(store)
    }

    /// Re-read the directory, replacing all entries
    pub async fn reload(&self) -> AttachResult<usize> {
        let mut read_dir = fs::read_dir(&self.dir).await.map_err(|e| {
            AttachError::Store(format!(
                "Failed to read config directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut loaded = HashMap::new();
        while let Some(dir_entry) = read_dir.next_entry().await? {
            let path = dir_entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("tid") {
                continue;
            }

            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable .tid file"
                    );
                    continue;
                }
            };
            let tiddler = TiddlerFile::parse(&content);
            match tiddler.title() {
                Some(title) => {
                    loaded.insert(title.to_string(), tiddler.text.clone());
                }
                None => {
                    tracing::warn!(path = %path.display(), "Skipping .tid file without a title");
                }
            }
        }

        let count = loaded.len();
        *self.entries.write().await = loaded;
        tracing::debug!(dir = %self.dir.display(), count, "Loaded config entries");
        Ok(count)
    }
}

#[async_trait]
impl ConfigStore for TiddlerDirectoryStore {
    async fn get_text(&self, title: &str) -> AttachResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(title).cloned())
    }
}
