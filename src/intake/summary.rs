//! Plain-text rendering of a finished request and the `mailto:` link that
//! carries it.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::model::FormData;

/// Where estimate requests go.
pub const RECIPIENT: &str = "teamwin365@gmail.com";

/// Characters left alone by `encodeURIComponent`; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Render the request as the fixed-layout text block sent to the team.
pub fn format_summary(data: &FormData) -> String {
    let lead = &data.lead;
    let project = &data.project;

    let surfaces = if project.sub_area.is_empty() {
        "None specified".to_string()
    } else {
        project.sub_area.join(", ")
    };
    let start = if project.start_date.is_empty() {
        "Flexible"
    } else {
        project.start_date.as_str()
    };
    let description = if project.description.is_empty() {
        "No additional notes provided."
    } else {
        project.description.as_str()
    };
    let areas = project
        .area
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let text = format!(
        "New Estimate Request from Bbizness App
======================================

LEAD INFORMATION
----------------
Name:    {first} {last}
Email:   {email}
Phone:   {phone}
Address: {street}, {city}, {state} {zip}

PROJECT DETAILS
---------------
Areas:       {areas}
Surfaces:    {surfaces}
Material:    {material}
Approx Size: {size} sq ft
Demolition:  {demo}
Start Date:  {start}
Photos:      {photos} attached

Description:
{description}

Marketing Consent: {consent}",
        first = lead.first_name,
        last = lead.last_name,
        email = lead.email,
        phone = lead.phone,
        street = lead.street,
        city = lead.city,
        state = lead.state,
        zip = lead.zip,
        material = project.tile_type,
        size = project.approx_sq_ft,
        demo = yes_no(project.requires_demo),
        photos = project.photos.len(),
        consent = yes_no(lead.marketing_consent),
    );

    text.trim().to_string()
}

/// Subject line of the mail link and the email draft.
pub fn email_subject(data: &FormData) -> String {
    format!("Estimate Request: {}", data.lead.full_name())
}

/// `mailto:` link that opens a mail client with the summary filled in.
pub fn build_delivery_link(data: &FormData) -> String {
    let subject = email_subject(data);
    let body = format_summary(data);
    format!(
        "mailto:{RECIPIENT}?subject={}&body={}",
        utf8_percent_encode(&subject, COMPONENT),
        utf8_percent_encode(&body, COMPONENT)
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
