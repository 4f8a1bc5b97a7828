//! Two-level category lookup.
//!
//! An [`EventContext`] maps a [`CategoryKey`] to a category, and a
//! [`SegmentCategory`] maps an integer index to a segment record. The
//! collector depends only on this contract; [`Event`] and [`SegmentTable`]
//! are the in-memory implementation used by the file readers and tests.

use crate::record::{MdcSegment, ParticleCand, ParticleCandSim, SegmentRecord};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a data category within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoryKey(pub u16);

impl CategoryKey {
    /// Drift chamber segment category.
    pub const MDC_SEG: CategoryKey = CategoryKey(4);

    /// Well-known name of the category, if any.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::MDC_SEG => Some("catMdcSeg"),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "category #{}", self.0),
        }
    }
}

/// Category handing out segment records by index.
pub trait SegmentCategory {
    /// Segment record type stored in the category.
    type Segment: SegmentRecord;

    /// Returns the segment at `index`, or `None` if there is none.
    fn segment(&self, index: i32) -> Option<&Self::Segment>;

    /// Number of records in the category.
    fn len(&self) -> usize;

    /// Returns true if the category holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The current event as seen by the collector.
pub trait EventContext {
    /// Category type returned for segment lookups.
    type Category: SegmentCategory;

    /// Returns the category for `key`, or `None` if the event lacks it.
    fn category(&self, key: CategoryKey) -> Option<&Self::Category>;
}

impl<C: EventContext + ?Sized> EventContext for &C {
    type Category = C::Category;

    fn category(&self, key: CategoryKey) -> Option<&Self::Category> {
        (**self).category(key)
    }
}

/// Segment category backed by a vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SegmentTable {
    segments: Vec<MdcSegment>,
}

impl SegmentTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment and returns its index.
    pub fn push(&mut self, segment: MdcSegment) -> i32 {
        self.segments.push(segment);
        i32::try_from(self.segments.len() - 1).unwrap_or(i32::MAX)
    }

    /// Returns an iterator over the segments.
    pub fn iter(&self) -> impl Iterator<Item = &MdcSegment> {
        self.segments.iter()
    }
}

impl FromIterator<MdcSegment> for SegmentTable {
    fn from_iter<I: IntoIterator<Item = MdcSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl SegmentCategory for SegmentTable {
    type Segment = MdcSegment;

    #[inline]
    fn segment(&self, index: i32) -> Option<&MdcSegment> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.segments.get(idx))
    }

    fn len(&self) -> usize {
        self.segments.len()
    }
}

/// One event: its segment category and the candidates built from it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    /// Segment category, `None` if the event was written without it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub segments: Option<SegmentTable>,
    /// Reconstructed candidates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub candidates: Vec<ParticleCand>,
    /// Simulated candidates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sim_candidates: Vec<ParticleCandSim>,
}

impl Event {
    /// Creates an event with a segment category and no candidates.
    #[must_use]
    pub fn with_segments(segments: SegmentTable) -> Self {
        Self {
            segments: Some(segments),
            ..Self::default()
        }
    }

    /// Number of segments in the event, zero if the category is missing.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.as_ref().map_or(0, SegmentTable::len)
    }

    /// Fired cells over all segments of the event.
    #[must_use]
    pub fn fired_cell_count(&self) -> usize {
        self.segments
            .iter()
            .flat_map(SegmentTable::iter)
            .map(MdcSegment::total_cells)
            .sum()
    }
}

impl EventContext for Event {
    type Category = SegmentTable;

    fn category(&self, key: CategoryKey) -> Option<&SegmentTable> {
        if key == CategoryKey::MDC_SEG {
            self.segments.as_ref()
        } else {
            None
        }
    }
}
