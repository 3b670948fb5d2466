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

//! Conflict resolution port.
//!
//! Resolving a conflict may suspend while awaiting an external decision (a
//! human confirmation dialog or an automated policy). Implementations must
//! never mutate stored samples; they only answer.

use std::sync::Arc;

use tokio::sync::oneshot;

use super::analyzer::ConflictDescriptor;
use crate::notify::Notifier;

/// The answer to a presented conflict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictResolution {
    /// Abort the assignment with no side effects.
    pub cancel: bool,
    /// Proceed, but place the sample as mono.
    pub force_mono: bool,
    /// Proceed, replacing whatever occupies the target slot.
    pub replace_existing: bool,
}

impl ConflictResolution {
    /// The resolution used when the answering side goes away.
    pub fn cancelled() -> ConflictResolution {
        ConflictResolution {
            cancel: true,
            ..Default::default()
        }
    }
}

/// Where conflicts are presented for a decision.
///
/// The port hands back a receiver so an interactive surface can hold on to
/// the sender and answer later while the engine awaits. Dropping the sender
/// without answering reads as cancel.
pub trait ConfirmationPort: Send + Sync {
    fn present_conflict(&self, conflict: &ConflictDescriptor) -> oneshot::Receiver<ConflictResolution>;
}

/// Default policy: resolve every conflict to mono placement and tell the
/// user why, without blocking on input.
pub struct AutoMonoResolver {
    notifier: Arc<dyn Notifier>,
}

impl AutoMonoResolver {
    pub fn new(notifier: Arc<dyn Notifier>) -> AutoMonoResolver {
        AutoMonoResolver { notifier }
    }

    fn describe(conflict: &ConflictDescriptor) -> String {
        if conflict.existing_occupants.is_empty() {
            return format!(
                "voice {} does not exist, so voice {} cannot hold a stereo pair",
                conflict.next_voice, conflict.target_voice
            );
        }
        let occupied: Vec<String> = conflict
            .existing_occupants
            .iter()
            .map(|o| format!("voice {} ({})", o.voice, o.sample_names.join(", ")))
            .collect();
        format!("already occupied: {}", occupied.join("; "))
    }
}

impl ConfirmationPort for AutoMonoResolver {
    fn present_conflict(&self, conflict: &ConflictDescriptor) -> oneshot::Receiver<ConflictResolution> {
        self.notifier.warn(
            "Stereo assignment conflict",
            &format!("{}; assigning as mono", Self::describe(conflict)),
        );

        let (tx, rx) = oneshot::channel();
        let _ = tx.send(ConflictResolution {
            cancel: false,
            force_mono: true,
            replace_existing: false,
        });
        rx
    }
}

/// Port that always answers with a fixed resolution.
#[cfg(test)]
pub struct ScriptedResolver {
    resolution: ConflictResolution,
}

#[cfg(test)]
impl ScriptedResolver {
    pub fn new(resolution: ConflictResolution) -> ScriptedResolver {
        ScriptedResolver { resolution }
    }
}

#[cfg(test)]
impl ConfirmationPort for ScriptedResolver {
    fn present_conflict(&self, _: &ConflictDescriptor) -> oneshot::Receiver<ConflictResolution> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(self.resolution);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::Voice;
    use crate::notify::{MemoryNotifier, Severity};

    fn conflict_on_voice_2() -> ConflictDescriptor {
        ConflictDescriptor {
            target_voice: Voice::new(1).unwrap(),
            next_voice: 2,
            existing_occupants: vec![super::super::analyzer::VoiceOccupants {
                voice: 2,
                sample_names: vec!["00_hat.wav".to_string()],
            }],
        }
    }

    #[tokio::test]
    async fn test_auto_mono_resolver_forces_mono_and_warns() {
        let notifier = Arc::new(MemoryNotifier::new());
        let resolver = AutoMonoResolver::new(notifier.clone());

        let resolution = resolver
            .present_conflict(&conflict_on_voice_2())
            .await
            .unwrap();
        assert!(!resolution.cancel);
        assert!(resolution.force_mono);
        assert!(!resolution.replace_existing);

        let recorded = notifier.notifications();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].severity, Severity::Warn);
        assert!(recorded[0].description.contains("voice 2"));
        assert!(recorded[0].description.contains("00_hat.wav"));
    }

    #[tokio::test]
    async fn test_auto_mono_resolver_names_missing_voice_5() {
        let notifier = Arc::new(MemoryNotifier::new());
        let resolver = AutoMonoResolver::new(notifier.clone());

        let conflict = ConflictDescriptor {
            target_voice: Voice::new(4).unwrap(),
            next_voice: 5,
            existing_occupants: Vec::new(),
        };
        let resolution = resolver.present_conflict(&conflict).await.unwrap();
        assert!(resolution.force_mono);

        let recorded = notifier.notifications();
        assert!(recorded[0].description.contains("voice 5 does not exist"));
    }

    #[tokio::test]
    async fn test_dropped_sender_reads_as_cancel() {
        let (tx, rx) = oneshot::channel::<ConflictResolution>();
        drop(tx);

        let resolution = rx.await.unwrap_or_else(|_| ConflictResolution::cancelled());
        assert!(resolution.cancel);
    }
}
