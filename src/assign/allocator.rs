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

//! Slot allocation within a voice's 12-slot sequence.

use std::path::Path;

use crate::kit::{SampleOrigin, SampleRef, Voice, SLOTS_PER_VOICE};

/// Returns true if the given slot of the given voice holds a sample.
pub fn slot_occupied(samples: &[SampleRef], voice: Voice, slot: usize) -> bool {
    samples.iter().any(|s| s.voice == voice && s.slot == slot)
}

/// Computes the destination slot for a candidate file.
///
/// An explicit slot wins outright: the caller has already chosen (e.g. a
/// reorder within the voice). Files local to the open kit keep the slot they
/// were dropped on. External files take the first empty slot of the voice;
/// `None` means all 12 slots are occupied.
pub fn calculate_target_slot(
    origin: SampleOrigin,
    explicit_slot: Option<usize>,
    dropped_slot: usize,
    samples: &[SampleRef],
    voice: Voice,
) -> Option<usize> {
    if let Some(slot) = explicit_slot {
        return Some(slot);
    }
    if origin == SampleOrigin::Local {
        return Some(dropped_slot);
    }
    (0..SLOTS_PER_VOICE).find(|&slot| !slot_occupied(samples, voice, slot))
}

/// Returns true if the voice already holds a sample with the identical path.
/// Advisory only: the caller decides whether to proceed.
pub fn is_duplicate_sample(samples: &[SampleRef], path: &Path, voice: Voice) -> bool {
    samples.iter().any(|s| s.voice == voice && s.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn voice(n: u8) -> Voice {
        Voice::new(n).unwrap()
    }

    fn occupied_slots(v: u8, slots: &[usize]) -> Vec<SampleRef> {
        slots
            .iter()
            .map(|&slot| SampleRef {
                path: PathBuf::from(format!("/kits/A0/voice{v}/{slot:02}_s.wav")),
                voice: voice(v),
                slot,
            })
            .collect()
    }

    #[test]
    fn test_explicit_slot_wins() {
        let samples = occupied_slots(1, &[0, 1, 2]);
        assert_eq!(
            calculate_target_slot(SampleOrigin::External, Some(7), 0, &samples, voice(1)),
            Some(7)
        );
        // Even for local reorders.
        assert_eq!(
            calculate_target_slot(SampleOrigin::Local, Some(2), 9, &samples, voice(1)),
            Some(2)
        );
    }

    #[test]
    fn test_local_file_keeps_dropped_slot() {
        let samples = occupied_slots(1, &[0]);
        assert_eq!(
            calculate_target_slot(SampleOrigin::Local, None, 5, &samples, voice(1)),
            Some(5)
        );
    }

    #[test]
    fn test_external_file_takes_first_empty_slot() {
        let samples = occupied_slots(1, &[0]);
        assert_eq!(
            calculate_target_slot(SampleOrigin::External, None, 0, &samples, voice(1)),
            Some(1)
        );

        let gapped = occupied_slots(1, &[0, 1, 3]);
        assert_eq!(
            calculate_target_slot(SampleOrigin::External, None, 0, &gapped, voice(1)),
            Some(2)
        );
    }

    #[test]
    fn test_full_voice_has_no_slot() {
        let all: Vec<usize> = (0..SLOTS_PER_VOICE).collect();
        let samples = occupied_slots(1, &all);
        assert_eq!(
            calculate_target_slot(SampleOrigin::External, None, 5, &samples, voice(1)),
            None
        );
    }

    #[test]
    fn test_occupancy_is_per_voice() {
        // A full voice 2 does not affect allocation on voice 1.
        let all: Vec<usize> = (0..SLOTS_PER_VOICE).collect();
        let samples = occupied_slots(2, &all);
        assert_eq!(
            calculate_target_slot(SampleOrigin::External, None, 0, &samples, voice(1)),
            Some(0)
        );
    }

    #[test]
    fn test_duplicate_requires_same_voice_and_path() {
        let path = PathBuf::from("/imports/kick.wav");
        let samples = vec![SampleRef {
            path: path.clone(),
            voice: voice(1),
            slot: 0,
        }];

        assert!(is_duplicate_sample(&samples, &path, voice(1)));
        // Same path in a different voice is not a duplicate.
        assert!(!is_duplicate_sample(&samples, &path, voice(2)));
        assert!(!is_duplicate_sample(
            &samples,
            Path::new("/imports/other.wav"),
            voice(1)
        ));
    }
}
