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
mod assign;
mod kit;
mod notify;
mod probe;
mod settings;
mod store;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{crate_version, Parser, Subcommand};
use tracing::warn;

use crate::assign::{
    AssignmentEngine, AssignmentOutcome, AssignmentRequest, AutoMonoResolver, StereoOverride,
};
use crate::kit::{KitSlotId, SampleOrigin, Voice};
use crate::notify::{LogNotifier, Notifier};
use crate::settings::Settings;
use crate::store::{DirectoryStore, SampleStore};

#[derive(Parser)]
#[clap(
    version = crate_version!(),
    about = "A sample kit manager for 4-voice hardware samplers."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the kits in the given directory and the next free kit slot.
    Kits {
        /// The path to the kits directory on disk.
        path: PathBuf,
    },
    /// Assigns an audio file to a voice of a kit.
    Assign {
        /// The path to the kit directory.
        kit: PathBuf,
        /// The audio file to assign.
        file: PathBuf,
        /// The target voice (1-4).
        #[arg(short, long)]
        voice: u8,
        /// An explicit slot (0-11). Without it, external files take the
        /// first free slot.
        #[arg(short, long)]
        slot: Option<usize>,
        /// Assign as mono even if the file has two channels.
        #[arg(long, conflicts_with = "stereo")]
        mono: bool,
        /// Assign as a stereo pair even if the settings default to mono.
        #[arg(long, conflicts_with = "mono")]
        stereo: bool,
        /// Replace the current occupant of the target slot.
        #[arg(long)]
        replace: bool,
        /// The path to a settings YAML file.
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Prints the probed channel count of an audio file.
    Probe {
        /// The audio file to probe.
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Kits { path } => {
            let mut kits: Vec<(KitSlotId, PathBuf)> = Vec::new();
            for entry in std::fs::read_dir(&path)? {
                let entry = entry?;
                if !entry.path().is_dir() {
                    continue;
                }
                if let Ok(id) = entry.file_name().to_string_lossy().parse::<KitSlotId>() {
                    kits.push((id, entry.path()));
                }
            }
            kits.sort_by_key(|(id, _)| *id);

            if kits.is_empty() {
                println!("No kits found in {}.", path.display());
            } else {
                println!("Kits (count: {}):", kits.len());
                for (id, kit_path) in kits.iter() {
                    let store = DirectoryStore::open(kit_path);
                    let samples = store.list_all(&id.to_string())?;
                    let stereo_voices = store.stereo_voices()?;
                    if stereo_voices.is_empty() {
                        println!("- {} ({} samples)", id, samples.len());
                    } else {
                        let voices: Vec<String> =
                            stereo_voices.iter().map(|v| v.to_string()).collect();
                        println!(
                            "- {} ({} samples, stereo voices: {})",
                            id,
                            samples.len(),
                            voices.join(", ")
                        );
                    }
                }
            }

            let names: Vec<String> = kits.iter().map(|(id, _)| id.to_string()).collect();
            match KitSlotId::next_free(names.iter().map(String::as_str)) {
                Some(next) => println!("\nNext free kit slot: {}", next),
                None => println!("\nKit slot space is exhausted."),
            }
        }
        Commands::Assign {
            kit,
            file,
            voice,
            slot,
            mono,
            stereo,
            replace,
            settings,
        } => {
            let settings = match settings {
                Some(path) => Settings::from_file(&path)?,
                None => Settings::default(),
            };

            let voice = Voice::new(voice)?;
            let store = DirectoryStore::open(&kit);
            let kit_name = store.kit_name();
            // Kit slot identifiers are validated before anything reaches the
            // engine.
            kit_name.parse::<KitSlotId>()?;

            let channels = match probe::channel_count(&file) {
                Ok(channels) => Some(channels),
                Err(e) => {
                    warn!(file = ?file, error = %e, "Could not probe channels, assuming mono");
                    None
                }
            };

            let file = file.canonicalize()?;
            let origin = match kit.canonicalize() {
                Ok(kit_dir) => SampleOrigin::classify(&file, &kit_dir),
                Err(_) => SampleOrigin::External,
            };

            let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
            let engine = AssignmentEngine::new(
                Arc::new(store),
                Arc::new(AutoMonoResolver::new(notifier.clone())),
                notifier,
            );

            let request = AssignmentRequest {
                channels,
                origin,
                explicit_slot: slot,
                dropped_slot: slot.unwrap_or(0),
                overrides: StereoOverride {
                    force_mono: mono,
                    force_stereo: stereo,
                },
                replace_existing: replace,
                ..AssignmentRequest::new(&kit_name, file, voice)
            };

            match engine.process_assignment(&request, &settings).await? {
                AssignmentOutcome::Committed {
                    voice,
                    slot,
                    stereo,
                } => {
                    println!(
                        "Assigned to voice {} slot {}{}.",
                        voice,
                        slot,
                        if stereo { " as a stereo pair" } else { "" }
                    );
                }
                AssignmentOutcome::Cancelled => println!("Assignment cancelled."),
            }
        }
        Commands::Probe { file } => {
            let channels = probe::channel_count(&file)?;
            println!("{}: {} channel(s)", file.display(), channels);
        }
    }

    Ok(())
}
