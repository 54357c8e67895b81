//! Room and surface multi-select.
//!
//! Rooms live in `ProjectDetail::area`, surfaces in `ProjectDetail::sub_area`
//! as composite ids (`"Kitchen - Floor"`). Removing a room drops its
//! surfaces, and the last room can never be removed.

use super::model::{ProjectArea, ProjectDetail};

/// Rooms and surfaces after a toggle, to be stored back as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaSelection {
    pub area: Vec<ProjectArea>,
    pub sub_area: Vec<String>,
}

impl AreaSelection {
    fn of(project: &ProjectDetail) -> Self {
        Self {
            area: project.area.clone(),
            sub_area: project.sub_area.clone(),
        }
    }
}

impl ProjectArea {
    /// Surfaces that can be tiled in this room.
    pub fn surfaces(&self) -> &'static [&'static str] {
        match self {
            Self::Kitchen => &["Floor", "Backsplash", "Countertop", "Island"],
            Self::Bathroom => &[
                "Floor",
                "Shower Walls",
                "Shower Floor",
                "Tub Surround",
                "Vanity Backsplash",
            ],
            Self::LivingRoom => &["Floor", "Fireplace", "Accent Wall"],
            Self::Bedroom => &["Floor", "Accent Wall", "Closet"],
            Self::Outdoor => &["Patio", "Pool Deck", "Walkway", "Facade"],
            Self::Other => &["Floor", "Wall", "Other"],
        }
    }

    /// Catalog spelling of `name` for this room, ignoring case.
    pub fn find_surface(&self, name: &str) -> Option<&'static str> {
        let name = name.trim();
        self.surfaces()
            .iter()
            .copied()
            .find(|s| s.eq_ignore_ascii_case(name))
    }
}

/// Composite id stored in `sub_area`.
pub fn sub_area_id(area: ProjectArea, surface: &str) -> String {
    format!("{area} - {surface}")
}

/// Whether a composite id belongs to `area`.
pub fn belongs_to(sub_area: &str, area: ProjectArea) -> bool {
    sub_area
        .strip_prefix(area.as_str())
        .is_some_and(|rest| rest.starts_with(" - "))
}

/// Select or deselect a room.
///
/// Deselecting the only selected room does nothing. Deselecting any other
/// room also drops every surface of that room. Newly selected rooms go to
/// the end.
pub fn toggle_area(project: &ProjectDetail, area: ProjectArea) -> AreaSelection {
    let mut selection = AreaSelection::of(project);

    if selection.area.contains(&area) {
        if selection.area.len() == 1 {
            return selection;
        }
        selection.area.retain(|a| *a != area);
        selection.sub_area.retain(|s| !belongs_to(s, area));
    } else {
        selection.area.push(area);
    }
    selection
}

/// Select or deselect one surface of a room.
///
/// A plain toggle: it does not check that `area` is selected.
pub fn toggle_sub_area(project: &ProjectDetail, area: ProjectArea, surface: &str) -> Vec<String> {
    let id = sub_area_id(area, surface);
    let mut sub_area = project.sub_area.clone();

    match sub_area.iter().position(|s| *s == id) {
        Some(index) => {
            sub_area.remove(index);
        }
        None => sub_area.push(id),
    }
    sub_area
}
