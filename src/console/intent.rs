//! Turns a line of terminal input into an `Intent`.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::intake::{LeadPatch, ProjectArea, ProjectPatch, TileType};

/// Something the user asked the form to do.
#[derive(Debug, Clone)]
pub enum Intent {
    Help,
    Show,
    Quit,
    /// Edit contact fields.
    SetLead(LeadPatch),
    /// Edit plain project fields.
    SetProject(ProjectPatch),
    ToggleArea(ProjectArea),
    ToggleSurface { area: ProjectArea, surface: String },
    AddPhotos(Vec<PathBuf>),
    /// 0-based index.
    RemovePhoto(usize),
    Ask(String),
    Next,
    Back,
    Submit,
    Link,
    Draft,
    NewEstimate,
    /// Input that could not be understood, with a hint for the user.
    Invalid(String),
}

/// Parses console input into intents.
pub struct IntentParser;

impl IntentParser {
    pub fn parse(line: &str) -> Intent {
        let trimmed = line.trim();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        match command.to_lowercase().as_str() {
            "help" | "?" => Intent::Help,
            "show" | "ls" => Intent::Show,
            "quit" | "exit" | "/quit" => Intent::Quit,
            "next" | "continue" => Intent::Next,
            "back" => Intent::Back,
            "submit" => Intent::Submit,
            "link" => Intent::Link,
            "draft" => Intent::Draft,
            "new" | "restart" => Intent::NewEstimate,

            "first" => lead_text(rest, "first", |p, v| p.first_name = Some(v)),
            "last" => lead_text(rest, "last", |p, v| p.last_name = Some(v)),
            "email" => lead_text(rest, "email", |p, v| p.email = Some(v)),
            "phone" => lead_text(rest, "phone", |p, v| p.phone = Some(v)),
            "street" => lead_text(rest, "street", |p, v| p.street = Some(v)),
            "city" => lead_text(rest, "city", |p, v| p.city = Some(v)),
            "state" => lead_text(rest, "state", |p, v| p.state = Some(v)),
            "zip" => lead_text(rest, "zip", |p, v| p.zip = Some(v)),
            "consent" => match parse_yes_no(rest) {
                Some(v) => Intent::SetLead(LeadPatch {
                    marketing_consent: Some(v),
                    ..Default::default()
                }),
                None => Intent::Invalid("usage: consent yes|no".into()),
            },

            "area" | "room" => match ProjectArea::from_name(rest) {
                Some(area) => Intent::ToggleArea(area),
                None => Intent::Invalid(format!(
                    "unknown area {rest:?}; try one of: {}",
                    area_names()
                )),
            },
            "surface" => parse_surface(rest),
            "tile" | "material" => match TileType::from_name(rest) {
                Some(tile) => project(ProjectPatch {
                    tile_type: Some(tile),
                    ..Default::default()
                }),
                None => Intent::Invalid(format!(
                    "unknown material {rest:?}; try one of: {}",
                    tile_names()
                )),
            },
            "sqft" | "size" => match rest.parse::<u32>() {
                Ok(n) => project(ProjectPatch {
                    approx_sq_ft: Some(n),
                    ..Default::default()
                }),
                Err(_) => Intent::Invalid("usage: sqft <number>".into()),
            },
            "demo" => match parse_yes_no(rest) {
                Some(v) => project(ProjectPatch {
                    requires_demo: Some(v),
                    ..Default::default()
                }),
                None => Intent::Invalid("usage: demo yes|no".into()),
            },
            "start" => parse_start(rest),
            "notes" | "description" => project(ProjectPatch {
                description: Some(rest.to_string()),
                ..Default::default()
            }),
            "photo" | "photos" => {
                let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
                if paths.is_empty() {
                    Intent::Invalid("usage: photo <path> [path...]".into())
                } else {
                    Intent::AddPhotos(paths)
                }
            }
            "unphoto" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Intent::RemovePhoto(n - 1),
                _ => Intent::Invalid("usage: unphoto <number shown in the photo list>".into()),
            },
            "ask" => Intent::Ask(rest.to_string()),

            "" => Intent::Show,
            other => Intent::Invalid(format!("unknown command {other:?}; type 'help'")),
        }
    }
}

fn lead_text(value: &str, field: &str, set: impl FnOnce(&mut LeadPatch, String)) -> Intent {
    if value.is_empty() {
        return Intent::Invalid(format!("usage: {field} <value>"));
    }
    let mut patch = LeadPatch::default();
    set(&mut patch, value.to_string());
    Intent::SetLead(patch)
}

fn project(patch: ProjectPatch) -> Intent {
    Intent::SetProject(patch)
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "y" | "true" | "on" => Some(true),
        "no" | "n" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// `surface <area> <surface>`, also accepting `Kitchen - Floor`.
fn parse_surface(rest: &str) -> Intent {
    let lower = rest.to_lowercase();
    let found = ProjectArea::ALL.into_iter().find_map(|area| {
        let name = area.as_str().to_lowercase();
        let tail = lower.strip_prefix(&name)?;
        if !tail.is_empty() && !tail.starts_with([' ', '-', ':']) {
            return None;
        }
        let surface = rest.get(name.len()..)?.trim_start_matches([' ', '-', ':']).trim();
        Some((area, surface.to_string()))
    });

    match found {
        Some((area, surface)) if !surface.is_empty() => Intent::ToggleSurface { area, surface },
        Some((area, _)) => Intent::Invalid(format!(
            "usage: surface {area} <surface>; {area} has: {}",
            area.surfaces().join(", ")
        )),
        None => Intent::Invalid(format!(
            "usage: surface <area> <surface>; areas: {}",
            area_names()
        )),
    }
}

fn parse_start(rest: &str) -> Intent {
    if rest.is_empty() || rest.eq_ignore_ascii_case("flexible") {
        return project(ProjectPatch {
            start_date: Some(String::new()),
            ..Default::default()
        });
    }
    match NaiveDate::parse_from_str(rest, "%Y-%m-%d") {
        Ok(date) => project(ProjectPatch {
            start_date: Some(date.format("%Y-%m-%d").to_string()),
            ..Default::default()
        }),
        Err(_) => Intent::Invalid("usage: start YYYY-MM-DD | flexible".into()),
    }
}

fn area_names() -> String {
    ProjectArea::ALL.map(|a| a.as_str()).join(", ")
}

fn tile_names() -> String {
    TileType::ALL.map(|t| t.as_str()).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_control_commands() {
        assert!(matches!(IntentParser::parse("help"), Intent::Help));
        assert!(matches!(IntentParser::parse("  NEXT "), Intent::Next));
        assert!(matches!(IntentParser::parse("back"), Intent::Back));
        assert!(matches!(IntentParser::parse("submit"), Intent::Submit));
        assert!(matches!(IntentParser::parse("/quit"), Intent::Quit));
        assert!(matches!(IntentParser::parse(""), Intent::Show));
        assert!(matches!(IntentParser::parse("new"), Intent::NewEstimate));
    }

    #[test]
    fn parse_lead_fields() {
        match IntentParser::parse("street 123 Main St") {
            Intent::SetLead(p) => {
                assert_eq!(p.street.as_deref(), Some("123 Main St"));
                assert!(p.first_name.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        match IntentParser::parse("consent yes") {
            Intent::SetLead(p) => assert_eq!(p.marketing_consent, Some(true)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(IntentParser::parse("first"), Intent::Invalid(_)));
        assert!(matches!(IntentParser::parse("consent maybe"), Intent::Invalid(_)));
    }

    #[test]
    fn parse_areas_and_surfaces() {
        assert!(matches!(
            IntentParser::parse("area living room"),
            Intent::ToggleArea(ProjectArea::LivingRoom)
        ));
        match IntentParser::parse("surface Living Room accent wall") {
            Intent::ToggleSurface { area, surface } => {
                assert_eq!(area, ProjectArea::LivingRoom);
                assert_eq!(surface, "accent wall");
            }
            other => panic!("unexpected {other:?}"),
        }
        match IntentParser::parse("surface Bathroom - Shower Walls") {
            Intent::ToggleSurface { area, surface } => {
                assert_eq!(area, ProjectArea::Bathroom);
                assert_eq!(surface, "Shower Walls");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(IntentParser::parse("surface kitchen"), Intent::Invalid(_)));
        assert!(matches!(IntentParser::parse("surface garage floor"), Intent::Invalid(_)));
        assert!(matches!(IntentParser::parse("area attic"), Intent::Invalid(_)));
    }

    #[test]
    fn parse_project_fields() {
        match IntentParser::parse("tile natural stone") {
            Intent::SetProject(p) => assert_eq!(p.tile_type, Some(TileType::NaturalStone)),
            other => panic!("unexpected {other:?}"),
        }
        match IntentParser::parse("sqft 350") {
            Intent::SetProject(p) => assert_eq!(p.approx_sq_ft, Some(350)),
            other => panic!("unexpected {other:?}"),
        }
        match IntentParser::parse("start flexible") {
            Intent::SetProject(p) => assert_eq!(p.start_date.as_deref(), Some("")),
            other => panic!("unexpected {other:?}"),
        }
        match IntentParser::parse("start 2026-11-02") {
            Intent::SetProject(p) => assert_eq!(p.start_date.as_deref(), Some("2026-11-02")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(IntentParser::parse("start next week"), Intent::Invalid(_)));
        assert!(matches!(IntentParser::parse("sqft lots"), Intent::Invalid(_)));
    }

    #[test]
    fn parse_photos() {
        match IntentParser::parse("photo a.jpg /tmp/b.png") {
            Intent::AddPhotos(paths) => assert_eq!(paths.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(IntentParser::parse("unphoto 1"), Intent::RemovePhoto(0)));
        assert!(matches!(IntentParser::parse("unphoto 0"), Intent::Invalid(_)));
    }

    #[test]
    fn unknown_command_is_invalid() {
        match IntentParser::parse("frobnicate now") {
            Intent::Invalid(msg) => assert!(msg.contains("frobnicate")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
