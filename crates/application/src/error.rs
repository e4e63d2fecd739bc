//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::services::FlowStep;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level policy violation, surfaced unchanged
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A fatal orchestration step failed
    #[error("{step}: {source}")]
    StepFailed {
        step: FlowStep,
        source: Box<ApplicationError>,
    },

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested entity does not exist in the collaborator
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// The request deadline passed
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Wrap a collaborator failure with the step that produced it
    pub fn at_step(step: FlowStep, source: Self) -> Self {
        Self::StepFailed {
            step,
            source: Box::new(source),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ExternalService(_) | Self::DeadlineExceeded => true,
            Self::StepFailed { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// The step that failed, if this error came from an orchestration step
    pub const fn failed_step(&self) -> Option<FlowStep> {
        match self {
            Self::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Whether the failure was caused by cancellation or an expired deadline
    pub fn is_cancellation(&self) -> bool {
        match self {
            Self::Cancelled | Self::DeadlineExceeded => true,
            Self::StepFailed { source, .. } => source.is_cancellation(),
            _ => false,
        }
    }

    /// The domain policy violation behind this error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::StepFailed { source, .. } => source.as_domain(),
            _ => None,
        }
    }
}
