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

//! Voice and sample reference types shared by the assignment engine and the
//! sample store.

use std::fmt;
use std::path::{Path, PathBuf};

/// Number of voices in a kit.
pub const VOICE_COUNT: u8 = 4;

/// Number of sample slots per voice.
pub const SLOTS_PER_VOICE: usize = 12;

/// Error for voice ordinals outside 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("voice {0} is out of range 1-{VOICE_COUNT}")]
pub struct VoiceError(pub u8);

/// One of the kit's 4 fixed voices, 1-indexed like the hardware front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Voice(u8);

impl Voice {
    /// Creates a voice from its 1-based ordinal.
    pub fn new(ordinal: u8) -> Result<Voice, VoiceError> {
        if (1..=VOICE_COUNT).contains(&ordinal) {
            Ok(Voice(ordinal))
        } else {
            Err(VoiceError(ordinal))
        }
    }

    /// The 1-based ordinal of this voice.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// The voice paired with this one for stereo placement, i.e. the next
    /// voice up. Voice 4 has no successor: a stereo sample cannot be rooted
    /// there.
    pub fn stereo_partner(&self) -> Option<Voice> {
        Voice::new(self.0 + 1).ok()
    }

    /// The ordinal the stereo partner would have, whether or not it exists.
    /// Used in conflict reporting for the voice-4 edge case.
    pub fn partner_ordinal(&self) -> u8 {
        self.0 + 1
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a candidate file already belongs to the open kit's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOrigin {
    /// The file lives in the currently open kit; moving it is a reorder.
    Local,
    /// The file comes from outside the kit (drag-in, import).
    External,
}

impl SampleOrigin {
    /// Classifies a file path against the open kit's directory.
    pub fn classify(path: &Path, kit_dir: &Path) -> SampleOrigin {
        if path.starts_with(kit_dir) {
            SampleOrigin::Local
        } else {
            SampleOrigin::External
        }
    }
}

/// A sample occupying one slot of one voice, as reported by the sample store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRef {
    /// Path of the sample file within the store.
    pub path: PathBuf,
    /// The voice holding the sample.
    pub voice: Voice,
    /// The slot index within the voice (0-11).
    pub slot: usize,
}

impl SampleRef {
    /// A displayable name for the sample, derived from the file name.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
