// Copyright (C) 2026 The kitgrid authors
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Assignment orchestration: analyze, resolve, allocate, commit.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::allocator::{calculate_target_slot, is_duplicate_sample, slot_occupied};
use super::analyzer::{analyze_stereo_assignment, StereoOverride};
use super::error::AssignmentError;
use super::resolver::{ConfirmationPort, ConflictResolution};
use crate::kit::{SampleOrigin, Voice};
use crate::notify::Notifier;
use crate::settings::Settings;
use crate::store::{AddOpts, SampleStore, StoreError};

/// One assignment attempt: a candidate file and where the caller aimed it.
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
    /// The kit receiving the sample.
    pub kit: String,
    /// The candidate file.
    pub path: PathBuf,
    /// The voice the caller targeted.
    pub voice: Voice,
    /// Channel count from the file's metadata; `None` when the metadata
    /// could not be read, which is treated as mono.
    pub channels: Option<u16>,
    /// Whether the file already belongs to the open kit.
    pub origin: SampleOrigin,
    /// A slot the caller has already chosen (reorder within the voice).
    pub explicit_slot: Option<usize>,
    /// The slot the file was dropped on; used only for local reorders.
    pub dropped_slot: usize,
    /// Per-call mono/stereo override.
    pub overrides: StereoOverride,
    /// The caller knows the destination is occupied and wants the occupant
    /// replaced (e.g. a drop onto an occupied slot).
    pub replace_existing: bool,
}

impl AssignmentRequest {
    /// A request with no overrides and no pre-chosen slot.
    pub fn new(kit: &str, path: PathBuf, voice: Voice) -> AssignmentRequest {
        AssignmentRequest {
            kit: kit.to_string(),
            path,
            voice,
            channels: None,
            origin: SampleOrigin::External,
            explicit_slot: None,
            dropped_slot: 0,
            overrides: StereoOverride::default(),
            replace_existing: false,
        }
    }
}

/// Terminal outcome of a successful (non-error) assignment flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// The placement was committed to the store.
    Committed {
        voice: Voice,
        slot: usize,
        /// The sample was committed as a stereo pair rooted at `voice`.
        stereo: bool,
    },
    /// The resolver cancelled the assignment; nothing was mutated.
    Cancelled,
}

/// Orchestrates sample slot assignment through the collaborator ports.
///
/// The engine holds no mutable state of its own: inventory is re-listed per
/// call and policy settings are passed in, so two engines over the same
/// store behave identically.
pub struct AssignmentEngine {
    store: Arc<dyn SampleStore>,
    confirm: Arc<dyn ConfirmationPort>,
    notifier: Arc<dyn Notifier>,
}

impl AssignmentEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        store: Arc<dyn SampleStore>,
        confirm: Arc<dyn ConfirmationPort>,
        notifier: Arc<dyn Notifier>,
    ) -> AssignmentEngine {
        AssignmentEngine {
            store,
            confirm,
            notifier,
        }
    }

    /// Processes one assignment attempt end to end.
    ///
    /// Validation and slot checks happen before any store mutation, so an
    /// error return means the store is untouched except for a commit that
    /// failed inside the store itself.
    pub async fn process_assignment(
        &self,
        request: &AssignmentRequest,
        settings: &Settings,
    ) -> Result<AssignmentOutcome, AssignmentError> {
        let channels = request.channels.unwrap_or(1);
        let samples = self
            .store
            .list_all(&request.kit)
            .map_err(|e| self.commit_failed(e))?;

        let decision = analyze_stereo_assignment(
            request.voice,
            channels,
            &samples,
            request.overrides,
            settings.default_to_mono_samples,
        );
        debug!(
            kit = %request.kit,
            voice = request.voice.get(),
            channels,
            as_mono = decision.assign_as_mono,
            needs_confirmation = decision.requires_confirmation,
            "Stereo assignment analyzed"
        );

        let mut assign_as_mono = decision.assign_as_mono;
        let mut replace_existing = request.replace_existing;

        if decision.requires_confirmation {
            if let Some(conflict) = &decision.conflict {
                let resolution = match self.confirm.present_conflict(conflict).await {
                    Ok(resolution) => resolution,
                    // The answering side went away without deciding.
                    Err(_) => ConflictResolution::cancelled(),
                };
                if resolution.cancel {
                    info!(kit = %request.kit, path = ?request.path, "Assignment cancelled");
                    return Ok(AssignmentOutcome::Cancelled);
                }
                assign_as_mono = assign_as_mono || resolution.force_mono;
                replace_existing = replace_existing || resolution.replace_existing;
            }
        }

        if is_duplicate_sample(&samples, &request.path, request.voice) {
            self.notifier.warn(
                "Duplicate sample",
                &format!(
                    "{} is already assigned to voice {}",
                    request.path.display(),
                    request.voice
                ),
            );
        }

        let slot = match calculate_target_slot(
            request.origin,
            request.explicit_slot,
            request.dropped_slot,
            &samples,
            request.voice,
        ) {
            Some(slot) => slot,
            None => {
                self.notifier.error(
                    "No slot available",
                    &format!("voice {} has no free sample slots", request.voice),
                );
                return Err(AssignmentError::SlotUnavailable {
                    voice: request.voice,
                });
            }
        };

        let stereo = channels > 1 && !assign_as_mono;
        let occupied = slot_occupied(&samples, request.voice, slot);

        let commit = if occupied && replace_existing {
            self.store.replace(request.voice, slot, &request.path)
        } else {
            let opts = AddOpts {
                force_mono: assign_as_mono && channels > 1,
                force_stereo: stereo && request.overrides.force_stereo,
            };
            self.store.add(request.voice, slot, &request.path, opts)
        };
        commit.map_err(|e| self.commit_failed(e))?;

        // A stereo pair is flagged against the left voice only; the right
        // voice's capacity is consumed without a second sample entry.
        if stereo {
            self.store
                .mark_stereo(request.voice)
                .map_err(|e| self.commit_failed(e))?;
        }

        info!(
            kit = %request.kit,
            voice = request.voice.get(),
            slot,
            stereo,
            path = ?request.path,
            "Sample assigned"
        );
        self.notifier.success(
            "Sample assigned",
            &format!(
                "{} -> voice {} slot {}{}",
                request.path.display(),
                request.voice,
                slot,
                if stereo { " (stereo pair)" } else { "" }
            ),
        );

        Ok(AssignmentOutcome::Committed {
            voice: request.voice,
            slot,
            stereo,
        })
    }

    /// Surfaces a store failure and converts it, keeping the store's message
    /// verbatim.
    fn commit_failed(&self, error: StoreError) -> AssignmentError {
        let message = error.to_string();
        self.notifier.error("Assignment failed", &message);
        AssignmentError::Failed { message }
    }
}
