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

//! Policy settings consulted by the assignment engine.
//!
//! Settings are read at call time and threaded into the engine as plain
//! values; the engine never caches them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Typed error for settings load/parse failures so callers can distinguish
/// a missing file from a malformed one.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings load error: {0}")]
    Load(#[from] std::io::Error),
    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_yml::Error),
}

/// A YAML representation of the manager settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// When set, multi-channel files are assigned as mono unless the caller
    /// overrides per assignment.
    #[serde(default)]
    pub default_to_mono_samples: bool,
}

impl Settings {
    /// Loads settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Settings, SettingsError> {
        Ok(serde_yml::from_str(&fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_to_mono_samples: true").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert!(settings.default_to_mono_samples);
    }

    #[test]
    fn test_missing_fields_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert!(!settings.default_to_mono_samples);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Settings::from_file(Path::new("/does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::Load(_)));
    }
}
