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

use crate::kit::{Voice, SLOTS_PER_VOICE};

/// Typed error for assignment processing so callers can distinguish a full
/// voice from a failed store commit without string matching.
///
/// Both variants are checked/raised before or at the commit boundary; an
/// assignment never leaves a partial multi-step commit behind.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    /// No free slot among the voice's 12 for an externally sourced file.
    #[error("no free slot in voice {voice}: all {SLOTS_PER_VOICE} slots are occupied")]
    SlotUnavailable { voice: Voice },

    /// The store collaborator refused or failed the commit. The message is
    /// the store's, passed through verbatim.
    #[error("assignment failed: {message}")]
    Failed { message: String },
}
