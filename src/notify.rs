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

//! Notification surface for user-facing warnings and outcomes.
//!
//! Notifications are fire-and-forget: the engine never blocks on them and
//! never changes behavior based on whether anyone listened.

#[cfg(test)]
use std::sync::Mutex;

use tracing::{error, info, warn};

/// Where user-facing notifications land. A UI would show toasts; the CLI
/// logs them.
pub trait Notifier: Send + Sync {
    /// A non-fatal condition the user should know about.
    fn warn(&self, title: &str, description: &str);

    /// A failed operation.
    fn error(&self, title: &str, description: &str);

    /// A completed operation.
    fn success(&self, title: &str, description: &str);
}

/// Notifier that forwards everything to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn warn(&self, title: &str, description: &str) {
        warn!(title, "{}", description);
    }

    fn error(&self, title: &str, description: &str) {
        error!(title, "{}", description);
    }

    fn success(&self, title: &str, description: &str) {
        info!(title, "{}", description);
    }
}

/// Severity of a recorded notification.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
    Success,
}

/// A notification captured by [`MemoryNotifier`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

/// Notifier that records everything it is told, for inspection in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

#[cfg(test)]
impl MemoryNotifier {
    pub fn new() -> MemoryNotifier {
        MemoryNotifier::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("Error getting lock")
            .clone()
    }

    fn record(&self, severity: Severity, title: &str, description: &str) {
        self.notifications
            .lock()
            .expect("Error getting lock")
            .push(Notification {
                severity,
                title: title.to_string(),
                description: description.to_string(),
            });
    }
}

#[cfg(test)]
impl Notifier for MemoryNotifier {
    fn warn(&self, title: &str, description: &str) {
        self.record(Severity::Warn, title, description);
    }

    fn error(&self, title: &str, description: &str) {
        self.record(Severity::Error, title, description);
    }

    fn success(&self, title: &str, description: &str) {
        self.record(Severity::Success, title, description);
    }
}
