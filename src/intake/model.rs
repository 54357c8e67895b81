//! Lead and project data models.

use serde::{Deserialize, Serialize};

/// Smallest project size the form accepts, in square feet.
pub const MIN_SQ_FT: u32 = 20;
/// Largest project size the form accepts, in square feet.
pub const MAX_SQ_FT: u32 = 4000;
/// Granularity of the size input.
pub const SQ_FT_STEP: u32 = 10;
/// Initial project size.
pub const DEFAULT_SQ_FT: u32 = 100;

/// Who is asking for the estimate and where the job is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    pub zip: String,
    pub marketing_consent: bool,
}

impl LeadInfo {
    /// Labels of the required fields that are still empty, in form order.
    ///
    /// Consent counts as a required field.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text_fields = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ];

        let mut missing: Vec<&'static str> = text_fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(label, _)| *label)
            .collect();

        if !self.marketing_consent {
            missing.push("communication consent");
        }
        missing
    }

    /// Whether the contact step may be left.
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Room categories a project can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectArea {
    Kitchen,
    Bathroom,
    #[serde(rename = "Living Room")]
    LivingRoom,
    Bedroom,
    Outdoor,
    Other,
}

impl ProjectArea {
    /// Every area, in display order.
    pub const ALL: [ProjectArea; 6] = [
        Self::Kitchen,
        Self::Bathroom,
        Self::LivingRoom,
        Self::Bedroom,
        Self::Outdoor,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::LivingRoom => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::Outdoor => "Outdoor",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by display name. Spaces are optional, so
    /// `livingroom` and `Living Room` both match.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = squash(name);
        Self::ALL
            .into_iter()
            .find(|area| squash(area.as_str()) == wanted)
    }
}

impl std::fmt::Display for ProjectArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Material the customer wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileType {
    Ceramic,
    #[default]
    Porcelain,
    #[serde(rename = "Natural Stone")]
    NaturalStone,
    #[serde(rename = "Wood / Hardwood")]
    Wood,
    Mosaic,
    Glass,
    #[serde(rename = "Luxury Vinyl")]
    Vinyl,
    #[serde(rename = "I need advice")]
    Unsure,
}

impl TileType {
    pub const ALL: [TileType; 8] = [
        Self::Ceramic,
        Self::Porcelain,
        Self::NaturalStone,
        Self::Wood,
        Self::Mosaic,
        Self::Glass,
        Self::Vinyl,
        Self::Unsure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ceramic => "Ceramic",
            Self::Porcelain => "Porcelain",
            Self::NaturalStone => "Natural Stone",
            Self::Wood => "Wood / Hardwood",
            Self::Mosaic => "Mosaic",
            Self::Glass => "Glass",
            Self::Vinyl => "Luxury Vinyl",
            Self::Unsure => "I need advice",
        }
    }

    /// Lookup by display name or by its first word (`wood`, `luxury`,
    /// `natural`), ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = squash(name);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|tile| {
            let full = squash(tile.as_str());
            full == wanted || full.starts_with(&wanted)
        })
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded photo. Only metadata is tracked; content is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoHandle {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

impl PhotoHandle {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Size in kilobytes with one decimal, as shown next to the file name.
    pub fn size_kb(&self) -> String {
        format!("{:.1} KB", self.size as f64 / 1024.0)
    }
}

/// What the customer wants done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    /// Selected rooms in selection order. Never empty.
    pub area: Vec<ProjectArea>,
    /// Selected surfaces as `"<area> - <surface>"`, in selection order.
    pub sub_area: Vec<String>,
    pub tile_type: TileType,
    pub approx_sq_ft: u32,
    pub description: String,
    pub requires_demo: bool,
    /// Desired start date; empty means flexible.
    pub start_date: String,
    pub photos: Vec<PhotoHandle>,
}

impl Default for ProjectDetail {
    fn default() -> Self {
        Self {
            area: vec![ProjectArea::Kitchen],
            sub_area: Vec::new(),
            tile_type: TileType::default(),
            approx_sq_ft: DEFAULT_SQ_FT,
            description: String::new(),
            requires_demo: false,
            start_date: String::new(),
            photos: Vec::new(),
        }
    }
}

/// Everything the form collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub lead: LeadInfo,
    pub project: ProjectDetail,
}

/// Partial update for the contact step. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub marketing_consent: Option<bool>,
}

impl LeadPatch {
    /// Shallow-merge into `lead`. The state code keeps at most two characters.
    pub fn apply_to(self, lead: &mut LeadInfo) {
        if let Some(v) = self.first_name {
            lead.first_name = v;
        }
        if let Some(v) = self.last_name {
            lead.last_name = v;
        }
        if let Some(v) = self.email {
            lead.email = v;
        }
        if let Some(v) = self.phone {
            lead.phone = v;
        }
        if let Some(v) = self.street {
            lead.street = v;
        }
        if let Some(v) = self.city {
            lead.city = v;
        }
        if let Some(v) = self.state {
            lead.state = v.chars().take(2).collect();
        }
        if let Some(v) = self.zip {
            lead.zip = v;
        }
        if let Some(v) = self.marketing_consent {
            lead.marketing_consent = v;
        }
    }
}

/// Partial update for the plain project fields.
///
/// Rooms, surfaces and photos are absent on purpose: they change through
/// the controller's dedicated operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub tile_type: Option<TileType>,
    pub approx_sq_ft: Option<u32>,
    pub description: Option<String>,
    pub requires_demo: Option<bool>,
    pub start_date: Option<String>,
}

impl ProjectPatch {
    /// Shallow-merge into `project`. Sizes are clamped and snapped to the
    /// input's step.
    pub fn apply_to(self, project: &mut ProjectDetail) {
        if let Some(v) = self.tile_type {
            project.tile_type = v;
        }
        if let Some(v) = self.approx_sq_ft {
            project.approx_sq_ft = normalize_sq_ft(v);
        }
        if let Some(v) = self.description {
            project.description = v;
        }
        if let Some(v) = self.requires_demo {
            project.requires_demo = v;
        }
        if let Some(v) = self.start_date {
            project.start_date = v;
        }
    }
}

/// Clamp to the accepted range and round to the nearest step.
pub fn normalize_sq_ft(value: u32) -> u32 {
    let clamped = value.clamp(MIN_SQ_FT, MAX_SQ_FT);
    ((clamped + SQ_FT_STEP / 2) / SQ_FT_STEP * SQ_FT_STEP).min(MAX_SQ_FT)
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_lead() -> LeadInfo {
        LeadInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone: "(555) 123-4567".into(),
            street: "123 Main St".into(),
            city: "New York".into(),
            state: "NY".into(),
            zip: "10001".into(),
            marketing_consent: true,
        }
    }

    #[test]
    fn default_form_has_expected_values() {
        let form = FormData::default();
        assert_eq!(form.project.area, vec![ProjectArea::Kitchen]);
        assert!(form.project.sub_area.is_empty());
        assert_eq!(form.project.tile_type, TileType::Porcelain);
        assert_eq!(form.project.approx_sq_ft, 100);
        assert!(!form.project.requires_demo);
        assert!(form.project.start_date.is_empty());
        assert!(form.project.photos.is_empty());
        assert_eq!(form.lead, LeadInfo::default());
        assert!(!form.lead.marketing_consent);
    }

    #[test]
    fn empty_lead_reports_every_field() {
        let missing = LeadInfo::default().missing_fields();
        assert_eq!(missing.len(), 9);
        assert_eq!(missing[0], "first name");
        assert_eq!(missing[8], "communication consent");
    }

    #[test]
    fn consent_alone_decides_validity_of_filled_lead() {
        let mut lead = complete_lead();
        lead.marketing_consent = false;
        assert!(!lead.is_valid());
        assert_eq!(lead.missing_fields(), vec!["communication consent"]);

        lead.marketing_consent = true;
        assert!(lead.is_valid());
    }

    #[test]
    fn lead_patch_only_touches_given_fields() {
        let mut lead = complete_lead();
        LeadPatch {
            city: Some("Boston".into()),
            state: Some("Massachusetts".into()),
            ..Default::default()
        }
        .apply_to(&mut lead);

        assert_eq!(lead.city, "Boston");
        assert_eq!(lead.state, "Ma");
        assert_eq!(lead.first_name, "Jane");
        assert!(lead.marketing_consent);
    }

    #[test]
    fn project_patch_normalizes_size() {
        let mut project = ProjectDetail::default();
        ProjectPatch {
            approx_sq_ft: Some(5),
            ..Default::default()
        }
        .apply_to(&mut project);
        assert_eq!(project.approx_sq_ft, MIN_SQ_FT);

        ProjectPatch {
            approx_sq_ft: Some(99_999),
            ..Default::default()
        }
        .apply_to(&mut project);
        assert_eq!(project.approx_sq_ft, MAX_SQ_FT);

        assert_eq!(normalize_sq_ft(254), 250);
        assert_eq!(normalize_sq_ft(255), 260);
        assert_eq!(normalize_sq_ft(3999), 4000);
    }

    #[test]
    fn names_parse_loosely() {
        assert_eq!(ProjectArea::from_name("living room"), Some(ProjectArea::LivingRoom));
        assert_eq!(ProjectArea::from_name("LIVINGROOM"), Some(ProjectArea::LivingRoom));
        assert_eq!(ProjectArea::from_name("garage"), None);
        assert_eq!(TileType::from_name("wood"), Some(TileType::Wood));
        assert_eq!(TileType::from_name("luxury vinyl"), Some(TileType::Vinyl));
        assert_eq!(TileType::from_name("i need advice"), Some(TileType::Unsure));
        assert_eq!(TileType::from_name(""), None);
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&TileType::Vinyl).unwrap();
        assert_eq!(json, "\"Luxury Vinyl\"");
        let area: ProjectArea = serde_json::from_str("\"Living Room\"").unwrap();
        assert_eq!(area, ProjectArea::LivingRoom);

        for tile in TileType::ALL {
            let json = serde_json::to_string(&tile).unwrap();
            assert_eq!(json, format!("\"{tile}\""));
        }
    }

    #[test]
    fn lead_patch_deserializes_from_partial_json() {
        let patch: LeadPatch =
            serde_json::from_str(r#"{"firstName": "Ana", "marketingConsent": true}"#).unwrap();
        let mut lead = LeadInfo::default();
        patch.apply_to(&mut lead);
        assert_eq!(lead.first_name, "Ana");
        assert!(lead.marketing_consent);
        assert!(lead.last_name.is_empty());
    }

    #[test]
    fn photo_size_in_kb() {
        assert_eq!(PhotoHandle::new("a.jpg", 2048).size_kb(), "2.0 KB");
        assert_eq!(PhotoHandle::new("b.jpg", 1536).size_kb(), "1.5 KB");
    }
}
