//! Text views of the form, one per step.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::intake::model::{MAX_SQ_FT, MIN_SQ_FT};
use crate::intake::selector::sub_area_id;
use crate::intake::{FormData, FormSnapshot, LeadInfo, ProjectArea, ProjectDetail, Step, TileType};

/// Render the view for the snapshot's step.
pub fn render(snapshot: &FormSnapshot) -> String {
    match snapshot.step {
        Step::LeadEntry => format!(
            "{}\n{}",
            progress(snapshot.step),
            lead_view(&snapshot.data.lead)
        ),
        Step::ProjectEntry => format!(
            "{}\n{}{}",
            progress(snapshot.step),
            project_view(&snapshot.data.project),
            if snapshot.submitting {
                "\nSubmitting your request..."
            } else {
                ""
            }
        ),
        Step::Complete => success_view(&snapshot.data),
    }
}

/// Two-segment progress bar; the current step number is in parentheses.
fn progress(step: Step) -> String {
    let lead = Step::LeadEntry.number();
    let project = Step::ProjectEntry.number();
    let (first, second) = match step {
        Step::LeadEntry => (format!("({lead}) Contact"), format!(" {project}  Details")),
        _ => ("(✓) Contact".to_string(), format!("({project}) Details")),
    };
    let bar = if step == Step::LeadEntry {
        "=====-----"
    } else {
        "=========="
    };
    format!("{first}  [{bar}]  {second}\n")
}

fn lead_view(lead: &LeadInfo) -> String {
    let mut out = String::from("Let's start with you\n");
    let field = |label: &str, value: &str| {
        if value.is_empty() {
            format!("  {label:<10} -\n")
        } else {
            format!("  {label:<10} {value}\n")
        }
    };
    out.push_str(&field("first", &lead.first_name));
    out.push_str(&field("last", &lead.last_name));
    out.push_str(&field("email", &lead.email));
    out.push_str(&field("phone", &lead.phone));
    out.push_str(&field("street", &lead.street));
    out.push_str(&field("city", &lead.city));
    out.push_str(&field("state", &lead.state));
    out.push_str(&field("zip", &lead.zip));
    let _ = writeln!(
        out,
        "  [{}] consent   I authorize the team to send me the detailed estimate \
         and project updates via email and SMS.",
        check(lead.marketing_consent)
    );

    let missing = lead.missing_fields();
    if missing.is_empty() {
        out.push_str("\nReady: type 'next' to continue to project details.");
    } else {
        let _ = write!(out, "\nStill needed: {}", missing.join(", "));
    }
    out
}

fn project_view(project: &ProjectDetail) -> String {
    let mut out = String::from("Project details\n\nAreas (area <name>):\n");
    for area in ProjectArea::ALL {
        let _ = writeln!(out, "  [{}] {area}", check(project.area.contains(&area)));
    }

    out.push_str("\nSurfaces (surface <area> <surface>):\n");
    for area in &project.area {
        let chips: Vec<String> = area
            .surfaces()
            .iter()
            .map(|s| {
                let selected = project.sub_area.contains(&sub_area_id(*area, s));
                format!("[{}] {s}", check(selected))
            })
            .collect();
        let _ = writeln!(out, "  {area}: {}", chips.join("  "));
    }
    if project.sub_area.is_empty() {
        out.push_str("  Please select at least one surface.\n");
    }

    let _ = writeln!(out, "\nDemolition:  {}", if project.requires_demo { "Yes" } else { "No" });
    let _ = writeln!(out, "Start date:  {}", or_blank(&project.start_date, "Flexible"));
    let _ = writeln!(out, "Material:    {}", project.tile_type);
    if project.tile_type == TileType::Unsure {
        out.push_str("             Not sure? Type 'ask <question>' for the material consultant.\n");
    }
    let _ = writeln!(
        out,
        "Size:        {} sq ft (between {MIN_SQ_FT} and {MAX_SQ_FT}+)",
        project.approx_sq_ft
    );

    if project.photos.is_empty() {
        out.push_str("Photos:      none\n");
    } else {
        out.push_str("Photos:\n");
        for (i, photo) in project.photos.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} ({})", i + 1, photo.name, photo.size_kb());
        }
    }

    let _ = write!(out, "Notes:       {}", or_blank(&project.description, "-"));
    out
}

fn success_view(data: &FormData) -> String {
    let lead = &data.lead;
    let project = &data.project;
    let mut out = String::from("Request received!\n\n");

    let _ = writeln!(out, "Thanks, {}. We have received your request.", lead.first_name);
    let _ = writeln!(
        out,
        "Our team will review your project details and contact you at {} within 24 hours.\n",
        lead.phone
    );
    let _ = writeln!(
        out,
        "Project location: {}, {}, {} {}",
        lead.street, lead.city, lead.state, lead.zip
    );
    let areas: Vec<&str> = project.area.iter().map(|a| a.as_str()).collect();
    let _ = writeln!(out, "Areas:       {}", areas.join(", "));
    if !project.sub_area.is_empty() {
        let _ = writeln!(out, "Surfaces:    {}", project.sub_area.join(", "));
    }
    let _ = writeln!(out, "Material:    {}", project.tile_type);
    let _ = writeln!(out, "Size:        {} sq ft", project.approx_sq_ft);
    let demolition = if project.requires_demo {
        "Yes, required"
    } else {
        "No, not needed"
    };
    let _ = writeln!(out, "Demolition:  {demolition}");
    let _ = writeln!(out, "Start date:  {}", display_date(&project.start_date));
    if !project.photos.is_empty() {
        let _ = writeln!(out, "Photos:      {} attached", project.photos.len());
    }

    out.push_str(
        "\nType 'link' for the email link, 'draft' for the email draft, \
         or 'new' to start a new estimate.",
    );
    out
}

/// `2026-11-02` → `11/2/2026`; anything else is shown as entered.
fn display_date(raw: &str) -> String {
    if raw.is_empty() {
        return "Flexible".to_string();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn or_blank<'a>(value: &'a str, blank: &'a str) -> &'a str {
    if value.is_empty() { blank } else { value }
}

fn check(on: bool) -> char {
    if on { 'x' } else { ' ' }
}

/// Commands available at `step`.
pub fn help(step: Step) -> &'static str {
    match step {
        Step::LeadEntry => "\
Contact details:
  first|last|email|phone|street|city|state|zip <value>
  consent yes|no
  next            continue to project details
  show, help, quit",
        Step::ProjectEntry => "\
Project details:
  area <name>                 toggle a room
  surface <area> <surface>    toggle a surface of a selected room
  tile <material>             set the material
  sqft <number>               approximate size
  demo yes|no                 demolition needed
  start YYYY-MM-DD|flexible   desired start date
  photo <path> [path...]      attach photos
  unphoto <number>            remove a photo
  notes <text>                describe your vision
  ask <question>              ask the material consultant
  back, submit, show, help, quit",
        Step::Complete => "\
Request sent:
  link     email link with the summary
  draft    email draft ready to send
  new      start a new estimate
  show, help, quit",
    }
}
