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

//! The sample slot assignment engine.
//!
//! This module decides where an incoming audio file lands in the voice/slot
//! grid and commits the placement through the sample store:
//! - stereo analysis: mono vs. stereo placement and conflict detection
//! - conflict resolution through an asynchronous confirmation port
//! - slot allocation within a voice's 12-slot sequence
//! - orchestration and commit
//!
//! The engine holds no cross-call state; inventory and policy settings are
//! passed per call, and callers serialize concurrent assignment attempts.

mod allocator;
mod analyzer;
mod error;
mod executor;
mod resolver;

pub use allocator::{calculate_target_slot, is_duplicate_sample, slot_occupied};
pub use analyzer::{
    analyze_stereo_assignment, ConflictDescriptor, StereoDecision, StereoOverride, VoiceOccupants,
};
pub use error::AssignmentError;
pub use executor::{AssignmentEngine, AssignmentOutcome, AssignmentRequest};
pub use resolver::{AutoMonoResolver, ConfirmationPort, ConflictResolution};
#[cfg(test)]
pub use resolver::ScriptedResolver;
