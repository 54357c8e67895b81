//! Estimate intake — the multi-step form behind a renovation estimate
//! request.
//!
//! A lead first enters contact details, then describes the project (rooms,
//! surfaces, material, size, photos, notes), then submits. The controller
//! owns all form state; the summary module turns it into the text and mail
//! link that leave the system.

pub mod controller;
pub mod model;
pub mod selector;
pub mod state;
pub mod summary;

pub use controller::{FormSnapshot, StepController, SubmitOutcome};
pub use model::{
    FormData, LeadInfo, LeadPatch, PhotoHandle, ProjectArea, ProjectDetail, ProjectPatch,
    TileType,
};
pub use selector::{AreaSelection, toggle_area, toggle_sub_area};
pub use state::Step;
pub use summary::{build_delivery_link, email_subject, format_summary};
