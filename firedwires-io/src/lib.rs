//! firedwires-io: Event file I/O and batch processing for firedwires.
//!
//! This crate reads JSON event files through memory maps, runs the
//! fired wire collector over every candidate of every event, and writes
//! the resulting wire lists as CSV or JSON lines.
//!

mod error;
mod pipeline;
pub mod processing;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use pipeline::{collect_files, run_collect, OutputFormat};
pub use processing::{
    collect_event, collect_events, is_store_unavailable, tracks_of, ProcessingConfig,
    ProcessingStatistics, TrackKind, TrackWires,
};
pub use reader::{EventFileReader, EventStream};
pub use writer::WireListWriter;
