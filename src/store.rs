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

//! Sample store port and implementations.
//!
//! The assignment engine never touches storage directly; it commits through
//! this trait. The store owns its own consistency guarantees.

use std::path::Path;

use crate::kit::{SampleRef, Voice};

pub mod dir;
#[cfg(test)]
pub mod mock;

pub use dir::DirectoryStore;

/// Typed error for store operations. The message is surfaced verbatim to the
/// notification surface when a commit fails.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sample store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("kit metadata error: {0}")]
    Metadata(String),

    #[error("{0}")]
    Rejected(String),
}

/// Bookkeeping tags attached to an `add` commit. These record how the caller
/// pinned the channel handling, for stores that track it downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOpts {
    /// The sample was pinned to mono despite having multiple channels.
    pub force_mono: bool,
    /// The sample was pinned to stereo against the global policy.
    pub force_stereo: bool,
}

/// The external sample store the engine commits placements through.
pub trait SampleStore: Send + Sync {
    /// Lists every sample currently stored for the named kit.
    fn list_all(&self, kit: &str) -> Result<Vec<SampleRef>, StoreError>;

    /// Adds a sample at the given voice and slot. Fails if the slot is
    /// already occupied.
    fn add(&self, voice: Voice, slot: usize, path: &Path, opts: AddOpts) -> Result<(), StoreError>;

    /// Replaces whatever occupies the given voice and slot with the sample.
    fn replace(&self, voice: Voice, slot: usize, path: &Path) -> Result<(), StoreError>;

    /// Records that the given voice plays a stereo pair rooted at it. The
    /// partner voice's capacity is consumed logically; no second sample
    /// entry is created.
    fn mark_stereo(&self, voice: Voice) -> Result<(), StoreError>;
}
