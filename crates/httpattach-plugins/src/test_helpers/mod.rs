//! Test helpers for hook unit tests
//!
//! Fixtures for contexts, flag stores and requests with observable callbacks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use httpattach_core::{
    CompletionCallback, ConfigStore, ImportContext, ImportRequest, MemoryConfigStore,
    ReplacementEntry, DEFAULT_ENABLE_TITLE,
};
use tokio::sync::oneshot;

pub const SECURE_ORIGIN: &str = "https://wiki.example.com/index.html";
pub const PLAIN_ORIGIN: &str = "http://localhost:8080/";
pub const FILE_ORIGIN: &str = "file:///home/user/wiki.html";

pub fn context(location: &str) -> ImportContext {
    ImportContext::from_location(location).expect("test location must parse")
}

/// Store holding the enable flag with `text`
pub fn flag_store(text: &str) -> Arc<dyn ConfigStore> {
    Arc::new(MemoryConfigStore::with_entry(DEFAULT_ENABLE_TITLE, text))
}

/// Binary `image/png` request whose callback forwards to the returned receiver
pub fn binary_request(
    file_name: &str,
    payload: &[u8],
) -> (ImportRequest, oneshot::Receiver<Vec<ReplacementEntry>>) {
    let (callback, rx) = CompletionCallback::channel();
    let request = ImportRequest::new(file_name, "image/png", true, payload.to_vec(), callback);
    (request, rx)
}

/// Binary `image/png` request whose callback counts its invocations
pub fn counting_request(file_name: &str, payload: &[u8]) -> (ImportRequest, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let callback = CompletionCallback::new(move |_entries| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let request = ImportRequest::new(file_name, "image/png", true, payload.to_vec(), callback);
    (request, calls)
}
