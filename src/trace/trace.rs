use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::pom::pom_model::{GenerationRequest, Mode, Strategy};

/// One JSONL audit record per synthesis call.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    pub class_name: String,
    pub package_name: String,
    pub mode: Mode,
    pub strategy: Strategy,

    pub hierarchy_sha1: String,
    pub record_count: Option<usize>,

    pub synthesized_by: Option<String>,
    pub fallback_reason: Option<String>,
    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(request: &GenerationRequest, hierarchy: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            class_name: request.class.class_name.clone(),
            package_name: request.class.package_name.clone(),
            mode: request.mode,
            strategy: request.effective_strategy(),
            hierarchy_sha1: hierarchy_fingerprint(hierarchy),
            record_count: None,
            synthesized_by: None,
            fallback_reason: None,
            error: None,
        }
    }

    pub fn with_records(mut self, count: usize) -> Self {
        self.record_count = Some(count);
        self
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.synthesized_by = Some(style.to_string());
        self
    }

    pub fn with_fallback(mut self, reason: impl ToString) -> Self {
        self.fallback_reason = Some(reason.to_string());
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

/// SHA-1 of the raw hierarchy text, so traces can be matched to dumps
/// without storing the dumps.
pub fn hierarchy_fingerprint(text: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
