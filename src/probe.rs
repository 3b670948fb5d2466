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

//! Channel-count probing for candidate audio files.
//!
//! Only container/codec metadata is inspected; nothing is decoded or played
//! back. Callers treat a probe failure as "mono" with a warning, since a
//! missing channel count must not block assignment.

use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::get_probe;

/// Typed error for probe failures.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio file error: {0}")]
    Format(#[from] symphonia::core::errors::Error),

    #[error("No audio track found in {0}")]
    NoAudioTrack(String),

    #[error("No channel information in {0}")]
    NoChannelInfo(String),
}

/// Probes the number of audio channels in the given file.
pub fn channel_count(path: &Path) -> Result<u16, ProbeError> {
    // Include the path in the error so the user sees which file failed.
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // A hint helps the format registry guess the format.
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let fmt_opts: FormatOptions = Default::default();
    let meta_opts: MetadataOptions = Default::default();
    let probed = get_probe().format(&hint, mss, &fmt_opts, &meta_opts)?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ProbeError::NoAudioTrack(path.display().to_string()))?;

    track
        .codec_params
        .channels
        .map(|channels| channels.count() as u16)
        .ok_or_else(|| ProbeError::NoChannelInfo(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::path::PathBuf;

    fn write_wav(dir: &Path, name: &str, channels: u16) -> PathBuf {
        let path = dir.join(name);
        let spec = WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..(441 * channels as usize) {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_mono_wav() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_wav(temp.path(), "mono.wav", 1);
        assert_eq!(channel_count(&path).unwrap(), 1);
    }

    #[test]
    fn test_stereo_wav() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_wav(temp.path(), "stereo.wav", 2);
        assert_eq!(channel_count(&path).unwrap(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = channel_count(Path::new("/does/not/exist.wav")).unwrap_err();
        assert!(matches!(err, ProbeError::Io(_)));
    }

    #[test]
    fn test_not_audio() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("notes.txt");
        std::fs::write(&path, "not audio").unwrap();
        assert!(channel_count(&path).is_err());
    }
}
