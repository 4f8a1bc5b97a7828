//! Memory-mapped event file reader.
//!
//! An event file is a sequence of JSON [`Event`] documents separated by
//! whitespace, usually one per line.

use crate::Result;
use firedwires_core::Event;
use memmap2::Mmap;
use serde_json::de::SliceRead;
use serde_json::StreamDeserializer;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A memory-mapped event file.
pub struct EventFileReader {
    mmap: Option<Mmap>,
    path: PathBuf,
}

impl EventFileReader {
    /// Opens an event file for memory-mapped reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        let mmap = if file.metadata()?.len() == 0 {
            None
        } else {
            // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
            // This is the standard safety contract for memory mapping.
            #[allow(unsafe_code)]
            let mmap = unsafe { Mmap::map(&file)? };
            Some(mmap)
        };
        Ok(Self {
            mmap,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Path the reader was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file contents as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn file_size(&self) -> usize {
        self.as_bytes().len()
    }

    /// Lazily parses the events in file order.
    #[must_use]
    pub fn events(&self) -> EventStream<'_> {
        EventStream {
            inner: serde_json::Deserializer::from_slice(self.as_bytes()).into_iter(),
        }
    }

    /// Parses all events of the file.
    ///
    /// # Errors
    /// Returns an error on the first malformed event.
    pub fn read_all(&self) -> Result<Vec<Event>> {
        let events = self.events().collect::<Result<Vec<_>>>()?;
        log::debug!("read {} events from {}", events.len(), self.path.display());
        Ok(events)
    }
}

/// Iterator over the events of an [`EventFileReader`].
///
/// Parsing stops after the first malformed document.
pub struct EventStream<'a> {
    inner: StreamDeserializer<'a, SliceRead<'a>, Event>,
}

impl Iterator for EventStream<'_> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|event| event.map_err(Into::into))
    }
}
