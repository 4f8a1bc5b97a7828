//! Segment and track record traits and types.

use crate::layout::{Half, LAYERS_PER_HALF};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trait for a track that points at one inner and one outer segment.
///
/// Both reconstructed and simulated candidates implement this, so the
/// collector handles them identically.
pub trait TrackRecord {
    /// Index of the inner segment in the segment category.
    fn inner_segment_index(&self) -> i32;

    /// Index of the outer segment in the segment category.
    fn outer_segment_index(&self) -> i32;

    /// Segment index for the given half.
    #[inline]
    fn segment_index(&self, half: Half) -> i32 {
        match half {
            Half::Inner => self.inner_segment_index(),
            Half::Outer => self.outer_segment_index(),
        }
    }
}

impl<T: TrackRecord + ?Sized> TrackRecord for &T {
    #[inline]
    fn inner_segment_index(&self) -> i32 {
        (**self).inner_segment_index()
    }

    #[inline]
    fn outer_segment_index(&self) -> i32 {
        (**self).outer_segment_index()
    }
}

/// Trait for the hit pattern of one detector half.
///
/// Layers are addressed relative to the half, in `0..12`.
pub trait SegmentRecord {
    /// Number of hits in `layer`. Nonpositive values mean no data.
    fn hit_count(&self, layer: usize) -> i32;

    /// Wire id of hit `hit` in `layer`.
    ///
    /// # Panics
    /// Implementations may panic if `layer` or `hit` is out of range.
    fn wire_id(&self, layer: usize, hit: usize) -> i32;
}

/// Drift chamber segment: the fired cells of one half for one track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MdcSegment {
    /// Sector (0-5).
    #[cfg_attr(feature = "serde", serde(default))]
    pub sector: u8,
    /// Half of the detector the segment lives in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub half: Half,
    /// Fired cell numbers per relative layer, in hit order.
    pub cells: [Vec<i32>; LAYERS_PER_HALF],
}

impl MdcSegment {
    /// Creates an empty segment.
    #[must_use]
    pub fn new(sector: u8, half: Half) -> Self {
        Self {
            sector,
            half,
            cells: Default::default(),
        }
    }

    /// Appends fired cells to `layer`, builder style.
    ///
    /// # Panics
    /// Panics if `layer >= 12`.
    #[must_use]
    pub fn with_layer(mut self, layer: usize, cells: &[i32]) -> Self {
        self.cells[layer].extend_from_slice(cells);
        self
    }

    /// Total number of fired cells over all layers.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

impl SegmentRecord for MdcSegment {
    #[inline]
    fn hit_count(&self, layer: usize) -> i32 {
        i32::try_from(self.cells[layer].len()).unwrap_or(i32::MAX)
    }

    #[inline]
    fn wire_id(&self, layer: usize, hit: usize) -> i32 {
        self.cells[layer][hit]
    }
}

/// Reconstructed particle candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticleCand {
    /// Inner segment index, negative if none.
    pub inner_segment_index: i32,
    /// Outer segment index, negative if none.
    pub outer_segment_index: i32,
    /// Sector (0-5).
    #[cfg_attr(feature = "serde", serde(default))]
    pub sector: u8,
    /// Momentum in MeV/c.
    #[cfg_attr(feature = "serde", serde(default))]
    pub momentum: f32,
    /// Charge in units of e.
    #[cfg_attr(feature = "serde", serde(default))]
    pub charge: i8,
}

impl ParticleCand {
    /// Creates a candidate with the given segment indices.
    #[must_use]
    pub fn new(inner_segment_index: i32, outer_segment_index: i32) -> Self {
        Self {
            inner_segment_index,
            outer_segment_index,
            sector: 0,
            momentum: 0.0,
            charge: 0,
        }
    }
}

impl TrackRecord for ParticleCand {
    #[inline]
    fn inner_segment_index(&self) -> i32 {
        self.inner_segment_index
    }

    #[inline]
    fn outer_segment_index(&self) -> i32 {
        self.outer_segment_index
    }
}

/// Simulated particle candidate with its Geant truth information.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticleCandSim {
    /// Reconstructed part of the candidate.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub cand: ParticleCand,
    /// Geant track number, negative if unmatched.
    #[cfg_attr(feature = "serde", serde(default = "unmatched"))]
    pub geant_track: i32,
    /// Geant particle id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub geant_pid: i32,
}

#[cfg(feature = "serde")]
fn unmatched() -> i32 {
    -1
}

impl ParticleCandSim {
    /// Creates a simulated candidate with the given segment indices.
    #[must_use]
    pub fn new(inner_segment_index: i32, outer_segment_index: i32, geant_track: i32) -> Self {
        Self {
            cand: ParticleCand::new(inner_segment_index, outer_segment_index),
            geant_track,
            geant_pid: 0,
        }
    }
}

impl TrackRecord for ParticleCandSim {
    #[inline]
    fn inner_segment_index(&self) -> i32 {
        self.cand.inner_segment_index
    }

    #[inline]
    fn outer_segment_index(&self) -> i32 {
        self.cand.outer_segment_index
    }
}
