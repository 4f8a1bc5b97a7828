//! firedwires CLI entry point.
//!
//! Reads JSON event files and extracts the fired drift chamber wires of
//! every particle candidate.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use clap::{Parser, Subcommand};
use firedwires_core::{
    CategoryKey, Event, EventContext, FiredWireCollector, FiredWires, Plane, SegmentCategory,
};
use firedwires_io::{run_collect, tracks_of, EventFileReader, ProcessingConfig, TrackKind};
use log::info;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    FiredwiresIo(#[from] firedwires_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] firedwires_core::Error),

    #[error("event {event} out of range ({count} events in file)")]
    EventOutOfRange { event: usize, count: usize },
}

/// Fired wire extraction for drift chamber tracks.
#[derive(Parser)]
#[command(name = "firedwires")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect fired wires of all tracks and write them to a file
    Collect {
        /// Input event file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Output file path (.csv for CSV, anything else for JSON lines)
        #[arg(short, long)]
        output: PathBuf,

        /// Use simulated candidates instead of reconstructed ones
        #[arg(long)]
        sim: bool,

        /// Fail on tracks with missing segments instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Print the fired wires of every track, grouped by half
    Dump {
        /// Input event file
        input: PathBuf,

        /// Only dump this event
        #[arg(short, long)]
        event: Option<usize>,

        /// Use simulated candidates instead of reconstructed ones
        #[arg(long)]
        sim: bool,
    },

    /// Show information about an event file
    Info {
        /// Input event file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Collect {
            input,
            output,
            sim,
            strict,
        } => {
            let config = ProcessingConfig::new()
                .with_kind(track_kind(sim))
                .with_skip_missing_segments(!strict);

            let start = Instant::now();
            let totals = run_collect(input.as_slice(), &output, &config)?;
            info!("wrote {}", output.display());

            println!(
                "Processed {} files in {:.2}s",
                input.len(),
                start.elapsed().as_secs_f64()
            );
            println!("Events: {}", totals.events);
            println!("Tracks: {}", totals.tracks);
            println!("Skipped tracks: {}", totals.skipped_tracks);
            println!("Wires: {}", totals.wires);
        }

        Commands::Dump { input, event, sim } => {
            let events = EventFileReader::open(&input)?.read_all()?;
            let selected: Vec<usize> = match event {
                Some(index) if index >= events.len() => {
                    return Err(CliError::EventOutOfRange {
                        event: index,
                        count: events.len(),
                    });
                }
                Some(index) => vec![index],
                None => (0..events.len()).collect(),
            };

            for index in selected {
                let event = &events[index];
                let tracks = tracks_of(event, track_kind(sim));
                if tracks.is_empty() {
                    continue;
                }

                let mut collector = FiredWireCollector::connect(event)?;
                for (track_index, track) in tracks.into_iter().enumerate() {
                    println!("\n\nEvent {}, track {}", index, track_index);
                    match collector.collect(track) {
                        Ok(wires) => {
                            print!("{}", wires);
                            println!("Planes: {}", plane_summary(&wires));
                        }
                        Err(err) if err.is_per_track() => println!("skipped: {}", err),
                        Err(err) => return Err(err.into()),
                    }
                }
            }
        }

        Commands::Info { input } => {
            let reader = EventFileReader::open(&input)?;
            let file_size = reader.file_size();
            let events = reader.read_all()?;

            let candidates: usize = events.iter().map(|e| e.candidates.len()).sum();
            let sim_candidates: usize = events.iter().map(|e| e.sim_candidates.len()).sum();
            let segments: usize = events.iter().map(Event::segment_count).sum();
            let without_segments = events
                .iter()
                .filter(|e| e.category(CategoryKey::MDC_SEG).is_none())
                .count();
            let empty_categories = events
                .iter()
                .filter_map(|e| e.segments.as_ref())
                .filter(|table| table.is_empty())
                .count();
            let fired_cells: usize = events.iter().map(Event::fired_cell_count).sum();

            println!("File: {}", reader.path().display());
            println!(
                "Size: {} bytes ({:.2} MB)",
                file_size,
                file_size as f64 / 1_000_000.0
            );
            println!("Events: {}", events.len());
            println!("Candidates: {}", candidates);
            println!("Simulated candidates: {}", sim_candidates);
            println!("Segments: {}", segments);
            println!("Fired cells: {}", fired_cells);
            println!("Events without segment category: {}", without_segments);
            println!("Events with empty segment category: {}", empty_categories);
        }
    }

    Ok(())
}

fn track_kind(sim: bool) -> TrackKind {
    if sim {
        TrackKind::Sim
    } else {
        TrackKind::Reco
    }
}

/// Wire counts per plane, e.g. `I=3 II=1 III=0 IV=3`.
fn plane_summary(wires: &FiredWires) -> String {
    let counts = wires.plane_wire_counts();
    Plane::ALL
        .iter()
        .map(|plane| format!("{}={}", plane.label(), counts[plane.index()]))
        .collect::<Vec<_>>()
        .join(" ")
}
