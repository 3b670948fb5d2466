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

//! Core kit model.
//!
//! A kit is a named collection of 4 voices identified by a bank+number slot
//! identifier. Each voice holds up to 12 sample slots.

mod sample;
mod slot_id;

pub use sample::{SampleOrigin, SampleRef, Voice, VoiceError, SLOTS_PER_VOICE, VOICE_COUNT};
pub use slot_id::{KitSlotId, SlotIdError, KIT_SLOT_SPACE};
