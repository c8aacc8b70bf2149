use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tokio::sync::oneshot;

use super::ReplacementEntry;

type Continuation = Box<dyn FnOnce(Vec<ReplacementEntry>) + Send>;

/// Continuation the host supplies to receive the entries of a claimed import.
///
/// Clones share one slot: whichever clone delivers first fires the
/// continuation, every later delivery is a no-op.
#[derive(Clone)]
pub struct CompletionCallback {
    slot: Arc<Mutex<Option<Continuation>>>,
}

impl CompletionCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Vec<ReplacementEntry>) + Send + 'static,
    {
        Self {
            slot: Arc::new(Mutex::new(Some(Box::new(f)))),
        }
    }

    /// Callback that forwards the delivered entries to a oneshot receiver.
    pub fn channel() -> (Self, oneshot::Receiver<Vec<ReplacementEntry>>) {
        let (tx, rx) = oneshot::channel();
        let callback = Self::new(move |entries| {
            // Receiver may be gone; the host no longer cares.
            let _ = tx.send(entries);
        });
        (callback, rx)
    }

    /// Fire the continuation. Returns `false` if it had already fired.
    pub fn deliver(&self, entries: Vec<ReplacementEntry>) -> bool {
        let continuation = {
            let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
            slot.take()
        };

        match continuation {
            Some(f) => {
                f(entries);
                true
            }
            None => false,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

impl Debug for CompletionCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CompletionCallback")
            .field("delivered", &self.is_delivered())
            .finish()
    }
}

/// A file the host is about to import.
#[derive(Clone)]
pub struct ImportRequest {
    pub file_name: String,
    pub mime_type: String,
    /// Host classification: opaque bytes rather than text
    pub is_binary: bool,
    pub payload: Bytes,
    pub callback: CompletionCallback,
}

impl ImportRequest {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        is_binary: bool,
        payload: impl Into<Bytes>,
        callback: CompletionCallback,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            is_binary,
            payload: payload.into(),
            callback,
        }
    }
}

impl Debug for ImportRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ImportRequest")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("is_binary", &self.is_binary)
            .field("payload_len", &self.payload.len())
            .field("callback", &self.callback)
            .finish()
    }
}
