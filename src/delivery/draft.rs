//! RFC 5322 draft of the request email, built with lettre.

use lettre::Message;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;

use crate::error::DeliveryError;
use crate::intake::FormData;
use crate::intake::summary::{RECIPIENT, email_subject, format_summary};

/// Build the email the customer would send: from the lead, to the team,
/// with the same subject and body as the mail link.
pub fn compose_draft(data: &FormData) -> Result<Message, DeliveryError> {
    let lead = &data.lead;
    let name = lead.full_name().trim().to_string();

    let from = Mailbox::new(
        (!name.is_empty()).then_some(name),
        lead.email.trim().parse().map_err(|e| DeliveryError::InvalidAddress {
            address: lead.email.clone(),
            reason: format!("{e}"),
        })?,
    );
    let to: Mailbox = RECIPIENT.parse().map_err(|e| DeliveryError::InvalidAddress {
        address: RECIPIENT.to_string(),
        reason: format!("{e}"),
    })?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email_subject(data))
        .header(ContentType::TEXT_PLAIN)
        .body(format_summary(data))
        .map_err(|e| DeliveryError::Build(e.to_string()))
}

/// The draft as sendable message text.
pub fn draft_text(data: &FormData) -> Result<String, DeliveryError> {
    let message = compose_draft(data)?;
    Ok(String::from_utf8_lossy(&message.formatted()).into_owned())
}
