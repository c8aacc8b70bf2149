use httpattach_api_client::UploadReceipt;
use httpattach_core::{AttachError, AttachResult, ImportRequest, LogLevel, ReplacementEntry};

/// Turns an upload outcome into the host's replacement entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMaterializer;

impl ResultMaterializer {
    /// One reference entry standing in for the uploaded file.
    pub fn materialize(request: &ImportRequest) -> Vec<ReplacementEntry> {
        vec![ReplacementEntry::for_request(request)]
    }

    /// Settle a claimed import.
    ///
    /// On success the completion callback fires with the replacement entries.
    /// On failure the error is logged and returned; the callback is left
    /// untouched and the import stays unresolved.
    pub fn settle(
        request: &ImportRequest,
        outcome: AttachResult<UploadReceipt>,
    ) -> AttachResult<Vec<ReplacementEntry>> {
        match outcome {
            Ok(receipt) => {
                let entries = Self::materialize(request);
                if !request.callback.deliver(entries.clone()) {
                    tracing::warn!(
                        file_name = %request.file_name,
                        "Completion callback already fired, entries not delivered again"
                    );
                }
                tracing::info!(
                    file_name = %receipt.accepted_name,
                    path = %receipt.path,
                    status = receipt.status,
                    "Attachment uploaded"
                );
                Ok(entries)
            }
            Err(e) => {
                log_failure(request, &e);
                Err(e)
            }
        }
    }
}

fn log_failure(request: &ImportRequest, error: &AttachError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(
                file_name = %request.file_name,
                code,
                error = %error,
                "Attachment upload failed, import left unresolved"
            );
        }
        LogLevel::Warn => {
            tracing::warn!(
                file_name = %request.file_name,
                code,
                error = %error,
                "Attachment upload failed, import left unresolved"
            );
        }
        LogLevel::Error => {
            tracing::error!(
                file_name = %request.file_name,
                code,
                error = %error,
                "Attachment upload failed, import left unresolved"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records the level of every event
    #[derive(Clone, Default)]
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn failure_levels(error: AttachError) -> Vec<Level> {
        let recorder = LevelRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        let (request, _calls) = counting_request("photo.png", b"PNG");

        tracing::subscriber::with_default(subscriber, || {
            assert!(ResultMaterializer::settle(&request, Err(error)).is_err());
        });

        let levels = recorder.0.lock().unwrap().clone();
        levels
    }

    fn receipt(name: &str) -> UploadReceipt {
        UploadReceipt {
            accepted_name: name.to_string(),
            path: format!("/{}", name),
            status: 200,
        }
    }

    #[test]
    fn materialize_builds_single_reference_entry() {
        let (request, _rx) = binary_request("photo.png", b"PNG");
        let entries = ResultMaterializer::materialize(&request);
        assert_eq!(
            entries,
            vec![ReplacementEntry {
                title: "photo.png".to_string(),
                mime_type: "image/png".to_string(),
                canonical_reference: "photo.png".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn success_delivers_once() {
        let (request, rx) = binary_request("photo.png", b"PNG");

        let entries = ResultMaterializer::settle(&request, Ok(receipt("photo.png"))).unwrap();

        assert_eq!(rx.await.unwrap(), entries);
        assert!(request.callback.is_delivered());
    }

    #[test]
    fn success_after_delivery_does_not_fire_again() {
        let (request, calls) = counting_request("photo.png", b"PNG");

        ResultMaterializer::settle(&request, Ok(receipt("photo.png"))).unwrap();
        ResultMaterializer::settle(&request, Ok(receipt("photo.png"))).unwrap();

        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn failure_leaves_callback_untouched() {
        let (request, calls) = counting_request("photo.png", b"PNG");

        let err = ResultMaterializer::settle(
            &request,
            Err(AttachError::UploadRejected {
                status: 500,
                body: "disk full".to_string(),
            }),
        )
        .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(!request.callback.is_delivered());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn upload_failures_are_logged_at_error_level() {
        let rejected = AttachError::UploadRejected {
            status: 507,
            body: "insufficient storage".to_string(),
        };
        assert_eq!(failure_levels(rejected), vec![Level::ERROR]);
        assert_eq!(
            failure_levels(AttachError::Transport("connection refused".to_string())),
            vec![Level::ERROR]
        );
    }

    #[test]
    fn failure_level_follows_error_metadata() {
        assert_eq!(
            failure_levels(AttachError::Store("offline".to_string())),
            vec![Level::WARN]
        );
        assert_eq!(
            failure_levels(AttachError::InvalidRequest("empty name".to_string())),
            vec![Level::DEBUG]
        );
    }
}
