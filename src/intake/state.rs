//! Form steps and the transitions between them.

use serde::{Deserialize, Serialize};

/// The three screens of the form.
///
/// LeadEntry → ProjectEntry → Complete, with a way back from ProjectEntry
/// to LeadEntry. Complete is terminal; only a full reset leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    LeadEntry,
    ProjectEntry,
    Complete,
}

impl Step {
    /// Check if a transition from `self` to `target` is allowed.
    pub fn can_transition_to(&self, target: Step) -> bool {
        use Step::*;
        matches!(
            (self, target),
            (LeadEntry, ProjectEntry) | (ProjectEntry, LeadEntry) | (ProjectEntry, Complete)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The next step forward, if any.
    pub fn next(&self) -> Option<Step> {
        match self {
            Self::LeadEntry => Some(Self::ProjectEntry),
            Self::ProjectEntry => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// 1-based position shown in the progress bar.
    pub fn number(&self) -> u8 {
        match self {
            Self::LeadEntry => 1,
            Self::ProjectEntry => 2,
            Self::Complete => 3,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::LeadEntry => "lead_entry",
            Self::ProjectEntry => "project_entry",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}
