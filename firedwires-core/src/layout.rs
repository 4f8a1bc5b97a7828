//! Drift chamber layer layout.
//!
//! The tracking system has 24 sense-wire layers. Layers `0..12` belong to
//! the inner half (planes I and II), layers `12..24` to the outer half
//! (planes III and IV). Each plane groups 6 consecutive layers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of layers in one detector half (one segment).
pub const LAYERS_PER_HALF: usize = 12;

/// Number of layers in the whole tracking system.
pub const TOTAL_LAYERS: usize = 2 * LAYERS_PER_HALF;

/// Number of layers in one plane.
pub const LAYERS_PER_PLANE: usize = 6;

/// Number of planes.
pub const PLANES: usize = TOTAL_LAYERS / LAYERS_PER_PLANE;

/// Absolute layer numbers of the inner half.
pub const INNER_LAYER_INDEXING: [usize; LAYERS_PER_HALF] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Absolute layer numbers of the outer half.
pub const OUTER_LAYER_INDEXING: [usize; LAYERS_PER_HALF] =
    [12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23];

/// Detector half a segment (and its layers) belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Half {
    /// Planes I and II, absolute layers `0..12`.
    #[default]
    Inner,
    /// Planes III and IV, absolute layers `12..24`.
    Outer,
}

impl Half {
    /// Both halves in layer order.
    pub const ALL: [Half; 2] = [Half::Inner, Half::Outer];

    /// Offset added to a relative layer to get the absolute layer.
    #[inline]
    #[must_use]
    pub fn offset(self) -> usize {
        match self {
            Self::Inner => 0,
            Self::Outer => LAYERS_PER_HALF,
        }
    }

    /// Absolute layer numbers of this half.
    #[must_use]
    pub fn layers(self) -> &'static [usize; LAYERS_PER_HALF] {
        match self {
            Self::Inner => &INNER_LAYER_INDEXING,
            Self::Outer => &OUTER_LAYER_INDEXING,
        }
    }

    /// Lowercase name, as used in messages and output files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four wire planes (chambers) along the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum Plane {
    /// Innermost plane, absolute layers `0..6`.
    I,
    /// Absolute layers `6..12`.
    II,
    /// Absolute layers `12..18`.
    III,
    /// Outermost plane, absolute layers `18..24`.
    IV,
}

impl Plane {
    /// All planes in layer order.
    pub const ALL: [Plane; PLANES] = [Plane::I, Plane::II, Plane::III, Plane::IV];

    /// Zero-based plane number.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Roman numeral label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
        }
    }
}

/// Absolute layer number in `0..24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct LayerIndex(usize);

impl LayerIndex {
    /// Creates a layer index, or `None` if `layer >= 24`.
    #[inline]
    #[must_use]
    pub fn new(layer: usize) -> Option<Self> {
        (layer < TOTAL_LAYERS).then_some(Self(layer))
    }

    /// Iterates over all 24 layers in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..TOTAL_LAYERS).map(Self)
    }

    /// Raw layer number.
    #[inline]
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// Half containing this layer.
    #[inline]
    #[must_use]
    pub fn half(self) -> Half {
        if self.0 < LAYERS_PER_HALF {
            Half::Inner
        } else {
            Half::Outer
        }
    }

    /// Plane containing this layer.
    #[must_use]
    pub fn plane(self) -> Plane {
        Plane::ALL[self.0 / LAYERS_PER_PLANE]
    }
}

impl TryFrom<usize> for LayerIndex {
    type Error = String;

    fn try_from(layer: usize) -> std::result::Result<Self, Self::Error> {
        Self::new(layer).ok_or_else(|| format!("layer {layer} out of range 0..{TOTAL_LAYERS}"))
    }
}

impl From<LayerIndex> for usize {
    fn from(layer: LayerIndex) -> Self {
        layer.0
    }
}

impl fmt::Display for LayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_index_bounds() {
        assert!(LayerIndex::new(0).is_some());
        assert!(LayerIndex::new(23).is_some());
        assert!(LayerIndex::new(24).is_none());
        assert_eq!(LayerIndex::all().count(), TOTAL_LAYERS);
    }

    #[test]
    fn test_half_from_range() {
        assert_eq!(LayerIndex::new(11).unwrap().half(), Half::Inner);
        assert_eq!(LayerIndex::new(12).unwrap().half(), Half::Outer);
    }

    #[test]
    fn test_plane_grouping() {
        let planes: Vec<Plane> = LayerIndex::all().map(LayerIndex::plane).collect();
        assert_eq!(planes[0], Plane::I);
        assert_eq!(planes[5], Plane::I);
        assert_eq!(planes[6], Plane::II);
        assert_eq!(planes[12], Plane::III);
        assert_eq!(planes[23], Plane::IV);

        for (i, plane) in Plane::ALL.into_iter().enumerate() {
            assert_eq!(plane.index(), i);
        }
        assert_eq!(Plane::III.label(), "III");
    }

    #[test]
    fn test_indexing_tables() {
        for half in Half::ALL {
            for (relative, &absolute) in half.layers().iter().enumerate() {
                assert_eq!(absolute, relative + half.offset());
            }
        }
    }
}
