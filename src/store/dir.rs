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

//! Directory-backed sample store.
//!
//! A kit is a directory named after its slot identifier. Each voice is a
//! `voice1`..`voice4` sub-directory holding at most 12 files named
//! `NN_<original name>`, where `NN` is the zero-padded slot index. Stereo
//! voice flags live in a `kit.yaml` metadata file next to the voice
//! directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AddOpts, SampleStore, StoreError};
use crate::kit::{SampleRef, Voice, SLOTS_PER_VOICE, VOICE_COUNT};

/// Name of the kit metadata file inside a kit directory.
const META_FILE: &str = "kit.yaml";

/// A YAML representation of the kit metadata.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct KitMeta {
    /// Voices that play a stereo pair rooted at them.
    #[serde(default)]
    stereo_voices: Vec<u8>,
}

/// Sample store rooted at a single kit directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens a store on the given kit directory. The directory does not need
    /// to exist yet; it is created on the first commit.
    pub fn open<P: Into<PathBuf>>(root: P) -> DirectoryStore {
        DirectoryStore { root: root.into() }
    }

    /// The kit name this store serves, derived from the directory name.
    pub fn kit_name(&self) -> String {
        self.root
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The kit directory this store is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The voices currently flagged as stereo pairs.
    pub fn stereo_voices(&self) -> Result<Vec<u8>, StoreError> {
        Ok(self.read_meta()?.stereo_voices)
    }

    fn voice_dir(&self, voice: Voice) -> PathBuf {
        self.root.join(format!("voice{}", voice))
    }

    /// Returns the file currently occupying the given voice and slot, if any.
    fn slot_file(&self, voice: Voice, slot: usize) -> Result<Option<PathBuf>, StoreError> {
        let dir = self.voice_dir(voice);
        if !dir.is_dir() {
            return Ok(None);
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if parse_slot(&path) == Some(slot) {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    fn destination(&self, voice: Voice, slot: usize, source: &Path) -> Result<PathBuf, StoreError> {
        let name = source
            .file_name()
            .ok_or_else(|| StoreError::Rejected(format!("{} has no file name", source.display())))?;
        Ok(self
            .voice_dir(voice)
            .join(format!("{:02}_{}", slot, name.to_string_lossy())))
    }

    fn check_slot(slot: usize) -> Result<(), StoreError> {
        if slot >= SLOTS_PER_VOICE {
            return Err(StoreError::Rejected(format!(
                "slot {} is out of range 0-{}",
                slot,
                SLOTS_PER_VOICE - 1
            )));
        }
        Ok(())
    }

    fn read_meta(&self) -> Result<KitMeta, StoreError> {
        let path = self.root.join(META_FILE);
        if !path.is_file() {
            return Ok(KitMeta::default());
        }
        serde_yml::from_str(&fs::read_to_string(&path)?)
            .map_err(|e| StoreError::Metadata(format!("{}: {}", path.display(), e)))
    }

    fn write_meta(&self, meta: &KitMeta) -> Result<(), StoreError> {
        let text = serde_yml::to_string(meta)
            .map_err(|e| StoreError::Metadata(e.to_string()))?;
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(META_FILE), text)?;
        Ok(())
    }
}

/// Parses the slot index from a stored file name (`NN_<name>`).
fn parse_slot(path: &Path) -> Option<usize> {
    let name = path.file_name()?.to_str()?;
    let (prefix, rest) = name.split_at_checked(2)?;
    if !rest.starts_with('_') {
        return None;
    }
    let slot: usize = prefix.parse().ok()?;
    (slot < SLOTS_PER_VOICE).then_some(slot)
}

impl SampleStore for DirectoryStore {
    fn list_all(&self, kit: &str) -> Result<Vec<SampleRef>, StoreError> {
        if kit != self.kit_name() {
            return Err(StoreError::Rejected(format!(
                "store is rooted at kit {:?}, not {:?}",
                self.kit_name(),
                kit
            )));
        }

        let mut samples = Vec::new();
        for ordinal in 1..=VOICE_COUNT {
            let voice = Voice::new(ordinal).expect("voice ordinal in range");
            let dir = self.voice_dir(voice);
            if !dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                match parse_slot(&path) {
                    Some(slot) => samples.push(SampleRef { path, voice, slot }),
                    None => {
                        warn!(path = ?path, "Ignoring file without a slot prefix");
                    }
                }
            }
        }

        samples.sort_by_key(|s| (s.voice, s.slot));
        Ok(samples)
    }

    fn add(&self, voice: Voice, slot: usize, path: &Path, opts: AddOpts) -> Result<(), StoreError> {
        Self::check_slot(slot)?;
        if let Some(existing) = self.slot_file(voice, slot)? {
            return Err(StoreError::Rejected(format!(
                "voice {} slot {} is already occupied by {}",
                voice,
                slot,
                existing.display()
            )));
        }

        let dest = self.destination(voice, slot, path)?;
        fs::create_dir_all(self.voice_dir(voice))?;
        fs::copy(path, &dest)?;

        debug!(
            voice = voice.get(),
            slot,
            dest = ?dest,
            force_mono = opts.force_mono,
            force_stereo = opts.force_stereo,
            "Sample added"
        );
        Ok(())
    }

    fn replace(&self, voice: Voice, slot: usize, path: &Path) -> Result<(), StoreError> {
        Self::check_slot(slot)?;
        let dest = self.destination(voice, slot, path)?;

        // Remove the current occupant first so the slot never holds two files.
        if let Some(existing) = self.slot_file(voice, slot)? {
            fs::remove_file(&existing)?;
        }
        fs::create_dir_all(self.voice_dir(voice))?;
        fs::copy(path, &dest)?;

        debug!(voice = voice.get(), slot, dest = ?dest, "Sample replaced");
        Ok(())
    }

    fn mark_stereo(&self, voice: Voice) -> Result<(), StoreError> {
        let mut meta = self.read_meta()?;
        if !meta.stereo_voices.contains(&voice.get()) {
            meta.stereo_voices.push(voice.get());
            meta.stereo_voices.sort_unstable();
            self.write_meta(&meta)?;
        }
        debug!(voice = voice.get(), "Voice marked stereo");
        Ok(())
    }
}
