//! Dispatcher trait and the logging dispatcher used by the binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DeliveryError;
use crate::intake::FormData;
use crate::intake::summary::{RECIPIENT, format_summary};

/// A request captured at submit time. Later edits to the form do not
/// reach it.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateRequest {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub data: FormData,
}

impl EstimateRequest {
    pub fn new(data: FormData) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            data,
        }
    }

    /// Subject used for the team notification.
    pub fn subject(&self) -> String {
        format!("New Estimate Request - {}", self.data.lead.full_name())
    }

    pub fn body(&self) -> String {
        format_summary(&self.data)
    }
}

/// Receives captured requests.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    async fn dispatch(&self, request: &EstimateRequest) -> Result<(), DeliveryError>;
}

/// Writes the notification to the log instead of sending it. With
/// marketing consent it also records the confirmation email and SMS that
/// would be queued for the customer.
#[derive(Debug, Default)]
pub struct LogDispatcher;

impl LogDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dispatcher for LogDispatcher {
    fn name(&self) -> &str {
        "log"
    }

    async fn dispatch(&self, request: &EstimateRequest) -> Result<(), DeliveryError> {
        tracing::info!(
            request_id = %request.id,
            to = RECIPIENT,
            subject = %request.subject(),
            "Estimate request email (simulated)"
        );
        tracing::info!(request_id = %request.id, "Body:\n{}", request.body());

        let lead = &request.data.lead;
        if lead.marketing_consent {
            tracing::info!(to = %lead.email, "Queued confirmation email to client");
            tracing::info!(to = %lead.phone, "Queued confirmation SMS to client");
        }
        Ok(())
    }
}
