//! File-to-file collection runs.
//!
//! All inputs are read and collected before the output file is created, so
//! a run that fails on any input leaves no output behind.

use crate::processing::{collect_events, ProcessingConfig, ProcessingStatistics, TrackWires};
use crate::reader::EventFileReader;
use crate::writer::WireListWriter;
use crate::Result;
use log::info;
use std::path::Path;

/// Output format of a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `event,track,kind,layer,wire` row per wire, with a header.
    Csv,
    /// One JSON object per track.
    JsonLines,
}

impl OutputFormat {
    /// Picks CSV for a `.csv` extension (any case), JSON lines otherwise.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if csv {
            Self::Csv
        } else {
            Self::JsonLines
        }
    }
}

/// Reads and collects every input file in order.
///
/// Events are numbered continuously across files.
///
/// # Errors
/// Returns the first read or collection error. Later inputs are not read.
pub fn collect_files<P: AsRef<Path>>(
    inputs: &[P],
    config: &ProcessingConfig,
) -> Result<(Vec<TrackWires>, ProcessingStatistics)> {
    let mut all = Vec::new();
    let mut totals = ProcessingStatistics::default();

    for path in inputs {
        let path = path.as_ref();
        info!("reading {}", path.display());
        let events = EventFileReader::open(path)?.read_all()?;
        let (tracks, stats) = collect_events(&events, config)?;

        let offset = totals.events;
        all.extend(tracks.into_iter().map(|mut track| {
            track.event += offset;
            track
        }));

        info!(
            "{}: {} events, {} tracks, {} skipped",
            path.display(),
            stats.events,
            stats.tracks,
            stats.skipped_tracks
        );
        totals.merge(&stats);
    }

    Ok((all, totals))
}

/// Collects every input and writes the wire lists to `output` in one go.
///
/// The output file is only created once all inputs were collected.
///
/// # Errors
/// Returns any error of [`collect_files`], or a write error.
pub fn run_collect<P: AsRef<Path>>(
    inputs: &[P],
    output: &Path,
    config: &ProcessingConfig,
) -> Result<ProcessingStatistics> {
    let (tracks, stats) = collect_files(inputs, config)?;

    let format = OutputFormat::from_path(output);
    info!("writing {} tracks to {}", tracks.len(), output.display());
    let mut writer = WireListWriter::create(output)?;
    match format {
        OutputFormat::Csv => writer.write_csv(&tracks, true)?,
        OutputFormat::JsonLines => writer.write_json_lines(&tracks)?,
    }
    writer.flush()?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new("OUT.CSV")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_path(Path::new("out.jsonl")),
            OutputFormat::JsonLines
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out")),
            OutputFormat::JsonLines
        );
    }
}
