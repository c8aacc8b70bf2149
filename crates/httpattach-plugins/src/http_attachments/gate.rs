use std::fmt::{self, Debug};
use std::sync::Arc;

use httpattach_core::{ConfigStore, ImportContext, ImportRequest};

/// The only flag text that enables interception. Case-sensitive, untrimmed.
pub const ENABLED_VALUE: &str = "yes";

/// Why the gate left an import to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// Document is not served over http(s)
    NonNetworkOrigin,
    NotBinary,
    MissingFileName,
    /// Flag entry missing, unreadable, or not exactly `yes`
    FeatureDisabled,
}

impl GateRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateRejection::NonNetworkOrigin => "non_network_origin",
            GateRejection::NotBinary => "not_binary",
            GateRejection::MissingFileName => "missing_file_name",
            GateRejection::FeatureDisabled => "feature_disabled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptionDecision {
    Claim,
    PassThrough(GateRejection),
}

impl InterceptionDecision {
    pub fn is_claimed(&self) -> bool {
        matches!(self, InterceptionDecision::Claim)
    }
}

/// Decides whether an import is redirected to the upload endpoint.
///
/// Evaluation reads the flag store and nothing else, so identical inputs
/// give identical decisions.
#[derive(Clone)]
pub struct InterceptionGate {
    enable_title: String,
    store: Arc<dyn ConfigStore>,
}

impl InterceptionGate {
    pub fn new(enable_title: impl Into<String>, store: Arc<dyn ConfigStore>) -> Self {
        Self {
            enable_title: enable_title.into(),
            store,
        }
    }

    pub fn enable_title(&self) -> &str {
        &self.enable_title
    }

    pub async fn evaluate(
        &self,
        context: &ImportContext,
        request: &ImportRequest,
    ) -> InterceptionDecision {
        if !context.location.is_network_origin() {
            return InterceptionDecision::PassThrough(GateRejection::NonNetworkOrigin);
        }
        if !request.is_binary {
            return InterceptionDecision::PassThrough(GateRejection::NotBinary);
        }
        if request.file_name.is_empty() {
            return InterceptionDecision::PassThrough(GateRejection::MissingFileName);
        }
        if !self.feature_enabled().await {
            return InterceptionDecision::PassThrough(GateRejection::FeatureDisabled);
        }
        InterceptionDecision::Claim
    }

    pub async fn feature_enabled(&self) -> bool {
        match self.store.get_text(&self.enable_title).await {
            Ok(Some(text)) => text == ENABLED_VALUE,
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(
                    title = %self.enable_title,
                    error = %e,
                    "Failed to read attachment flag, treating as disabled"
                );
                false
            }
        }
    }
}

impl Debug for InterceptionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptionGate")
            .field("enable_title", &self.enable_title)
            .finish()
    }
}
