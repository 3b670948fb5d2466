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

//! A mock sample store. Doesn't actually store anything; records every
//! commit for inspection.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{AddOpts, SampleStore, StoreError};
use crate::kit::{SampleRef, Voice};

/// A recorded store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Add {
        voice: Voice,
        slot: usize,
        path: PathBuf,
        opts: AddOpts,
    },
    Replace {
        voice: Voice,
        slot: usize,
        path: PathBuf,
    },
    MarkStereo {
        voice: Voice,
    },
}

/// In-memory store with a fixed inventory and a call log.
#[derive(Debug, Default)]
pub struct MockStore {
    samples: Mutex<Vec<SampleRef>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_commits: Mutex<Option<String>>,
}

impl MockStore {
    pub fn new() -> MockStore {
        MockStore::default()
    }

    /// Creates a mock store whose inventory already contains the given
    /// samples.
    pub fn with_samples(samples: Vec<SampleRef>) -> MockStore {
        MockStore {
            samples: Mutex::new(samples),
            ..MockStore::default()
        }
    }

    /// Makes every subsequent commit fail with the given message.
    pub fn fail_commits(&self, message: &str) {
        *self.fail_commits.lock().expect("Error getting lock") = Some(message.to_string());
    }

    /// Returns every mutation recorded so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("Error getting lock").clone()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        if let Some(message) = self.fail_commits.lock().expect("Error getting lock").clone() {
            return Err(StoreError::Rejected(message));
        }
        Ok(())
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().expect("Error getting lock").push(call);
    }
}

impl SampleStore for MockStore {
    fn list_all(&self, _kit: &str) -> Result<Vec<SampleRef>, StoreError> {
        Ok(self.samples.lock().expect("Error getting lock").clone())
    }

    fn add(&self, voice: Voice, slot: usize, path: &Path, opts: AddOpts) -> Result<(), StoreError> {
        self.check_failure()?;
        self.record(StoreCall::Add {
            voice,
            slot,
            path: path.to_path_buf(),
            opts,
        });
        self.samples.lock().expect("Error getting lock").push(SampleRef {
            path: path.to_path_buf(),
            voice,
            slot,
        });
        Ok(())
    }

    fn replace(&self, voice: Voice, slot: usize, path: &Path) -> Result<(), StoreError> {
        self.check_failure()?;
        self.record(StoreCall::Replace {
            voice,
            slot,
            path: path.to_path_buf(),
        });
        let mut samples = self.samples.lock().expect("Error getting lock");
        samples.retain(|s| !(s.voice == voice && s.slot == slot));
        samples.push(SampleRef {
            path: path.to_path_buf(),
            voice,
            slot,
        });
        Ok(())
    }

    fn mark_stereo(&self, voice: Voice) -> Result<(), StoreError> {
        self.check_failure()?;
        self.record(StoreCall::MarkStereo { voice });
        Ok(())
    }
}
