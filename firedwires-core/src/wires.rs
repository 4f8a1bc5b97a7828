//! Per-layer fired wire collection.

use crate::layout::{Half, LayerIndex, LAYERS_PER_HALF, PLANES, TOTAL_LAYERS};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fired wires of one track, one slot per absolute layer.
///
/// There are always 24 slots. Empty layers hold an empty vector. Wires keep
/// the order in which the segment reported them; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FiredWires {
    layers: [Vec<i32>; TOTAL_LAYERS],
}

impl FiredWires {
    /// Creates a collection with 24 empty slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn slot_mut(&mut self, layer: usize) -> &mut Vec<i32> {
        &mut self.layers[layer]
    }

    /// Wires fired in `layer`.
    #[inline]
    #[must_use]
    pub fn layer(&self, layer: LayerIndex) -> &[i32] {
        &self.layers[layer.get()]
    }

    /// All 24 slots in layer order.
    #[must_use]
    pub fn layers(&self) -> &[Vec<i32>; TOTAL_LAYERS] {
        &self.layers
    }

    /// The 12 slots of one half, in relative layer order.
    #[must_use]
    pub fn half(&self, half: Half) -> &[Vec<i32>] {
        let start = half.offset();
        &self.layers[start..start + LAYERS_PER_HALF]
    }

    /// Iterates over `(layer, wires)` pairs, including empty layers.
    pub fn iter(&self) -> impl Iterator<Item = (LayerIndex, &[i32])> {
        LayerIndex::all().zip(self.layers.iter().map(Vec::as_slice))
    }

    /// Total number of wires over all layers.
    #[must_use]
    pub fn total_wires(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Number of layers with at least one wire.
    #[must_use]
    pub fn fired_layers(&self) -> usize {
        self.layers.iter().filter(|wires| !wires.is_empty()).count()
    }

    /// Returns true if no layer holds a wire.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Vec::is_empty)
    }

    /// Number of wires per plane, indexed by [`crate::Plane::index`].
    #[must_use]
    pub fn plane_wire_counts(&self) -> [usize; PLANES] {
        let mut counts = [0; PLANES];
        for (layer, wires) in self.iter() {
            counts[layer.plane().index()] += wires.len();
        }
        counts
    }

    /// Human-readable listing grouped by half.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FiredWires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (layer, wires) in self.iter() {
            if layer.get() == Half::Inner.offset() {
                writeln!(f, "---=== Inner Segment ===---")?;
            } else if layer.get() == Half::Outer.offset() {
                writeln!(f, "---=== Outer Segment ===---")?;
            }

            write!(f, "Layer {}:\t", layer.get() + 1)?;
            for wire in wires {
                write!(f, "{wire}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
