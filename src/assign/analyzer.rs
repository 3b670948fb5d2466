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

//! Stereo assignment analysis.
//!
//! Given a candidate file's channel count, a target voice and the kit's
//! current inventory, decides mono-vs-stereo placement and detects conflicts
//! with already-occupied voices. Pure decision logic; nothing here mutates
//! the store.

use crate::kit::{SampleRef, Voice};

/// Per-call mono/stereo override, taking precedence over the global policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StereoOverride {
    /// Treat the file as mono even if it has two channels.
    pub force_mono: bool,
    /// Treat the file as a stereo pair even if the global policy says mono.
    /// Has no effect on mono files: a mono file cannot be forced into a
    /// stereo pair.
    pub force_stereo: bool,
}

/// Occupancy of one voice involved in a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceOccupants {
    /// The 1-based voice ordinal.
    pub voice: u8,
    /// Display names of the samples occupying the voice.
    pub sample_names: Vec<String>,
}

/// Describes why a stereo assignment cannot proceed without confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictDescriptor {
    /// The voice the caller targeted.
    pub target_voice: Voice,
    /// The ordinal of the voice the stereo pair would consume. May be 5,
    /// which does not exist: that is the voice-4 edge case.
    pub next_voice: u8,
    /// Only voices with at least one occupant are listed. Empty for the
    /// voice-4 edge case.
    pub existing_occupants: Vec<VoiceOccupants>,
}

/// The analyzer's verdict for one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoDecision {
    /// The voice the caller targeted.
    pub target_voice: Voice,
    /// Whether the sample should be placed as mono.
    pub assign_as_mono: bool,
    /// Whether the placement can proceed as-is.
    pub can_assign: bool,
    /// Whether the flow must pause for conflict resolution first.
    pub requires_confirmation: bool,
    /// Present exactly when confirmation is required.
    pub conflict: Option<ConflictDescriptor>,
}

impl StereoDecision {
    fn mono(target_voice: Voice) -> StereoDecision {
        StereoDecision {
            target_voice,
            assign_as_mono: true,
            can_assign: true,
            requires_confirmation: false,
            conflict: None,
        }
    }

    fn stereo_ok(target_voice: Voice) -> StereoDecision {
        StereoDecision {
            target_voice,
            assign_as_mono: false,
            can_assign: true,
            requires_confirmation: false,
            conflict: None,
        }
    }

    fn conflict(target_voice: Voice, conflict: ConflictDescriptor) -> StereoDecision {
        StereoDecision {
            target_voice,
            assign_as_mono: false,
            can_assign: false,
            requires_confirmation: true,
            conflict: Some(conflict),
        }
    }
}

/// Decides mono-vs-stereo placement for a candidate file.
///
/// Policy precedence, highest first: a mono file is always placed mono; then
/// the per-call override; then the global default-to-mono policy, which is
/// threaded in per call rather than read from ambient state.
pub fn analyze_stereo_assignment(
    target_voice: Voice,
    channels: u16,
    existing: &[SampleRef],
    overrides: StereoOverride,
    default_to_mono: bool,
) -> StereoDecision {
    let as_mono = if channels <= 1 {
        true
    } else if overrides.force_mono {
        true
    } else if overrides.force_stereo {
        false
    } else {
        default_to_mono
    };

    if as_mono {
        return StereoDecision::mono(target_voice);
    }

    // Stereo placement consumes the next voice up as the right channel.
    let next_voice = match target_voice.stereo_partner() {
        Some(next) => next,
        None => {
            // Voice 4 has no voice 5 to pair with.
            return StereoDecision::conflict(
                target_voice,
                ConflictDescriptor {
                    target_voice,
                    next_voice: target_voice.partner_ordinal(),
                    existing_occupants: Vec::new(),
                },
            );
        }
    };

    let occupants: Vec<VoiceOccupants> = [target_voice, next_voice]
        .into_iter()
        .filter_map(|voice| {
            let names: Vec<String> = existing
                .iter()
                .filter(|s| s.voice == voice)
                .map(SampleRef::name)
                .collect();
            (!names.is_empty()).then(|| VoiceOccupants {
                voice: voice.get(),
                sample_names: names,
            })
        })
        .collect();

    if !occupants.is_empty() {
        return StereoDecision::conflict(
            target_voice,
            ConflictDescriptor {
                target_voice,
                next_voice: next_voice.get(),
                existing_occupants: occupants,
            },
        );
    }

    StereoDecision::stereo_ok(target_voice)
}
