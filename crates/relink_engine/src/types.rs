use relink_core::Outcome;
use thiserror::Error;

use crate::driver::DriverError;

/// One input entry of the batch: the stored watch-page URL. The video id
/// and the target link are derived from it at processing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub video_url: String,
}

impl SourceRecord {
    pub fn new(video_url: impl Into<String>) -> Self {
        Self {
            video_url: video_url.into(),
        }
    }
}

/// Failure taxonomy for one record's processing. Every variant is caught
/// at the orchestrator boundary and becomes an outcome; none aborts the
/// batch.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Invalid URL")]
    InvalidIdentifier,
    #[error("Editor timeout")]
    NavigationTimeout(String),
    #[error("Textbox not found")]
    FieldNotFound,
    #[error("Link node not found")]
    AnchorNotFound,
    #[error("Save failed: {0}")]
    SaveFailed(String),
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl StepError {
    /// Diagnostic context that the fixed report reason omits. Logged, not
    /// reported.
    pub fn detail(&self) -> Option<&str> {
        match self {
            StepError::NavigationTimeout(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<DriverError> for StepError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::NavigationTimeout(msg) => StepError::NavigationTimeout(msg),
            other => StepError::Unexpected(other.to_string()),
        }
    }
}

/// Progress notifications emitted while the batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    RecordStarted {
        index: usize,
        total: usize,
        id: String,
    },
    /// An outcome was decided. Emitted as soon as it is known, so sinks
    /// can journal it before the run finishes.
    OutcomeDecided {
        index: usize,
        id: String,
        outcome: Outcome,
    },
}

pub trait BatchSink: Send + Sync {
    fn emit(&self, event: BatchEvent);
}

/// Sink that discards all events.
pub struct NullSink;

impl BatchSink for NullSink {
    fn emit(&self, _event: BatchEvent) {}
}
