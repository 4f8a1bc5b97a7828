//! Wire list writers.

use crate::processing::TrackWires;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer for collected wire lists.
pub struct WireListWriter {
    writer: BufWriter<File>,
}

impl WireListWriter {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer })
    }

    /// Writes one CSV row per wire.
    ///
    /// Columns: `event,track,kind,layer,wire`, with 0-based absolute
    /// layers. Tracks without wires produce no rows.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_csv(&mut self, records: &[TrackWires], header: bool) -> Result<()> {
        if header {
            writeln!(self.writer, "event,track,kind,layer,wire")?;
        }

        for record in records {
            for (layer, wires) in record.wires.iter() {
                for wire in wires {
                    writeln!(
                        self.writer,
                        "{},{},{},{},{}",
                        record.event, record.track, record.kind, layer, wire
                    )?;
                }
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Writes one JSON object per track.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_json_lines(&mut self, records: &[TrackWires]) -> Result<()> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
