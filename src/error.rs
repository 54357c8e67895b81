//! Error types for the estimate intake.

use crate::intake::Step;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Advice error: {0}")]
    Advice(#[from] AdviceError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Refusals from the step controller.
///
/// None of these are fatal: the form state is left untouched and the
/// presentation layer decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Contact details incomplete: missing {}", missing.join(", "))]
    LeadIncomplete { missing: Vec<&'static str> },

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: Step, to: Step },

    #[error("Request already submitted; start a new estimate to make changes")]
    Finalized,

    #[error("A submission is in progress")]
    SubmissionPending,

    #[error("No photo at position {index} ({len} attached)")]
    PhotoIndexOutOfRange { index: usize, len: usize },
}

/// Errors building or handing off the estimate request.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Invalid mailbox address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Dispatch through {sink} failed: {reason}")]
    DispatchFailed { sink: String, reason: String },
}

/// Advice provider errors. These never leave `MaterialConsultant`.
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
