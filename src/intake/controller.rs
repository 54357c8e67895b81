//! StepController — owns the form, the current step, and the submission
//! guard.
//!
//! The presentation layer never writes to the form directly. It calls the
//! typed operations here and renders the `FormSnapshot`s published on the
//! watch channel after every change.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::delivery::{Dispatcher, EstimateRequest};
use crate::error::{Error, FormError};

use super::model::{FormData, LeadPatch, PhotoHandle, ProjectArea, ProjectPatch};
use super::selector::{self, AreaSelection};
use super::state::Step;

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub step: Step,
    pub data: FormData,
    pub submitting: bool,
}

/// Result of a `submit` call that was not refused.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The request was handed off and the form is now complete.
    Completed(EstimateRequest),
    /// Another submission was already in flight; nothing happened.
    AlreadySubmitting,
}

#[derive(Debug, Default)]
struct FormState {
    step: Step,
    data: FormData,
}

impl FormState {
    fn snapshot(&self, submitting: bool) -> FormSnapshot {
        FormSnapshot {
            step: self.step,
            data: self.data.clone(),
            submitting,
        }
    }
}

/// Clears the submitting flag when the submission ends, however it ends.
/// A submission whose future is dropped mid-flight also clears the flag in
/// the last published snapshot.
struct PendingSubmission<'a> {
    flag: &'a AtomicBool,
    updates: &'a watch::Sender<FormSnapshot>,
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.updates
            .send_if_modified(|snapshot| std::mem::replace(&mut snapshot.submitting, false));
    }
}

/// Coordinates the form: merges, room/surface selection, navigation and
/// the simulated submission.
pub struct StepController {
    state: RwLock<FormState>,
    submitting: AtomicBool,
    dispatcher: Arc<dyn Dispatcher>,
    submit_delay: Duration,
    updates: watch::Sender<FormSnapshot>,
}

impl StepController {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, submit_delay: Duration) -> Self {
        let state = FormState::default();
        let (updates, _rx) = watch::channel(state.snapshot(false));
        Self {
            state: RwLock::new(state),
            submitting: AtomicBool::new(false),
            dispatcher,
            submit_delay,
            updates,
        }
    }

    /// Subscribe to snapshots. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        self.state.read().await.snapshot(self.is_submitting())
    }

    pub async fn step(&self) -> Step {
        self.state.read().await.step
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Whether the contact step is complete enough to move on.
    pub async fn is_lead_valid(&self) -> bool {
        self.state.read().await.data.lead.is_valid()
    }

    pub async fn missing_lead_fields(&self) -> Vec<&'static str> {
        self.state.read().await.data.lead.missing_fields()
    }

    /// Shallow-merge contact fields. No validation happens here.
    pub async fn merge_lead(&self, patch: LeadPatch) -> Result<(), FormError> {
        self.edit("merge_lead", |data| patch.apply_to(&mut data.lead))
            .await
    }

    /// Shallow-merge the plain project fields.
    pub async fn merge_project(&self, patch: ProjectPatch) -> Result<(), FormError> {
        self.edit("merge_project", |data| patch.apply_to(&mut data.project))
            .await
    }

    /// Select or deselect a room, dropping its surfaces on removal. The
    /// last selected room stays selected.
    pub async fn toggle_area(&self, area: ProjectArea) -> Result<AreaSelection, FormError> {
        self.edit("toggle_area", |data| {
            let selection = selector::toggle_area(&data.project, area);
            if selection.area == data.project.area {
                debug!(area = %area, "Last selected area kept");
            }
            data.project.area = selection.area.clone();
            data.project.sub_area = selection.sub_area.clone();
            selection
        })
        .await
    }

    /// Select or deselect a surface. Returns `false` without changing
    /// anything when the room is not selected or has no such surface.
    pub async fn toggle_sub_area(
        &self,
        area: ProjectArea,
        surface: &str,
    ) -> Result<bool, FormError> {
        self.edit("toggle_sub_area", |data| {
            if !data.project.area.contains(&area) {
                warn!(area = %area, "Surface toggle ignored: area not selected");
                return false;
            }
            let Some(surface) = area.find_surface(surface) else {
                warn!(area = %area, surface, "Surface toggle ignored: unknown surface");
                return false;
            };
            data.project.sub_area = selector::toggle_sub_area(&data.project, area, surface);
            true
        })
        .await
    }

    /// Append photos. Returns the new photo count.
    pub async fn add_photos(&self, photos: Vec<PhotoHandle>) -> Result<usize, FormError> {
        self.edit("add_photos", |data| {
            data.project.photos.extend(photos);
            data.project.photos.len()
        })
        .await
    }

    /// Remove the photo at `index` (0-based).
    pub async fn remove_photo(&self, index: usize) -> Result<PhotoHandle, FormError> {
        self.edit("remove_photo", |data| {
            let len = data.project.photos.len();
            if index >= len {
                return Err(FormError::PhotoIndexOutOfRange { index, len });
            }
            Ok(data.project.photos.remove(index))
        })
        .await?
    }

    /// Move from contact entry to project entry if the contact details are
    /// complete. Project entry only ends through `submit`.
    pub async fn advance(&self) -> Result<Step, FormError> {
        let mut state = self.state.write().await;
        let from = state.step;

        if from != Step::LeadEntry {
            let to = from.next().unwrap_or(from);
            warn!(%from, %to, "Advance refused");
            return Err(FormError::InvalidTransition { from, to });
        }

        let missing = state.data.lead.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "Advance refused: lead incomplete");
            return Err(FormError::LeadIncomplete { missing });
        }

        state.step = Step::ProjectEntry;
        info!(from = %from, to = %state.step, "Step advanced");
        let snapshot = state.snapshot(self.is_submitting());
        drop(state);
        self.publish(snapshot);
        Ok(Step::ProjectEntry)
    }

    /// Go back from project entry to contact entry.
    pub async fn retreat(&self) -> Result<Step, FormError> {
        let mut state = self.state.write().await;
        let from = state.step;

        if !from.can_transition_to(Step::LeadEntry) {
            warn!(%from, "Retreat refused");
            return Err(FormError::InvalidTransition {
                from,
                to: Step::LeadEntry,
            });
        }
        if self.is_submitting() {
            return Err(FormError::SubmissionPending);
        }

        state.step = Step::LeadEntry;
        info!(from = %from, to = %state.step, "Step retreated");
        let snapshot = state.snapshot(false);
        drop(state);
        self.publish(snapshot);
        Ok(Step::LeadEntry)
    }

    /// Capture the form and hand it to the dispatcher after the configured
    /// delay, then move to `Complete`.
    ///
    /// A call made while another submission is in flight does nothing and
    /// returns `AlreadySubmitting`. If the dispatcher fails, the form stays
    /// in project entry and may be submitted again.
    pub async fn submit(&self) -> Result<SubmitOutcome, Error> {
        let (request, pending) = {
            let state = self.state.write().await;
            if state.step != Step::ProjectEntry {
                warn!(step = %state.step, "Submit refused");
                return Err(FormError::InvalidTransition {
                    from: state.step,
                    to: Step::Complete,
                }
                .into());
            }
            if self
                .submitting
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                debug!("Submit ignored: already submitting");
                return Ok(SubmitOutcome::AlreadySubmitting);
            }
            let pending = PendingSubmission {
                flag: &self.submitting,
                updates: &self.updates,
            };
            let request = EstimateRequest::new(state.data.clone());
            self.publish(state.snapshot(true));
            (request, pending)
        };

        info!(
            request_id = %request.id,
            dispatcher = self.dispatcher.name(),
            "Submitting estimate request"
        );

        tokio::time::sleep(self.submit_delay).await;
        let result = self.dispatcher.dispatch(&request).await;

        let mut state = self.state.write().await;
        match &result {
            Ok(()) => {
                state.step = Step::Complete;
                info!(request_id = %request.id, "Estimate request complete");
            }
            Err(e) => {
                warn!(request_id = %request.id, error = %e, "Estimate request dispatch failed");
            }
        }
        self.publish(state.snapshot(false));
        drop(pending);
        drop(state);

        result.map_err(Error::from)?;
        Ok(SubmitOutcome::Completed(request))
    }

    /// Throw everything away and start again at contact entry.
    pub async fn reset(&self) -> Result<(), FormError> {
        let mut state = self.state.write().await;
        if self.is_submitting() {
            return Err(FormError::SubmissionPending);
        }
        *state = FormState::default();
        info!("Form reset");
        let snapshot = state.snapshot(false);
        drop(state);
        self.publish(snapshot);
        Ok(())
    }

    /// Apply `op` to the form unless it is finalized or being submitted.
    /// Subscribers are only notified when the data changed.
    async fn edit<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut FormData) -> T,
    ) -> Result<T, FormError> {
        let mut state = self.state.write().await;
        if self.is_submitting() {
            debug!(op, "Edit refused: submission pending");
            return Err(FormError::SubmissionPending);
        }
        if state.step.is_terminal() {
            debug!(op, "Edit refused: form finalized");
            return Err(FormError::Finalized);
        }

        let before = state.data.clone();
        let out = f(&mut state.data);
        if state.data == before {
            debug!(op, "Form unchanged");
            return Ok(out);
        }
        debug!(op, step = %state.step, "Form updated");
        let snapshot = state.snapshot(false);
        drop(state);
        self.publish(snapshot);
        Ok(out)
    }

    fn publish(&self, snapshot: FormSnapshot) {
        self.updates.send_replace(snapshot);
    }
}
