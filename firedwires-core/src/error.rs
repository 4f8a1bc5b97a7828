//! Error types for firedwires-core.

use crate::layout::Half;
use crate::store::CategoryKey;
use thiserror::Error;

/// Result type alias for firedwires operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for fired wire extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The segment category is not present in the event context.
    ///
    /// No collector can operate without it.
    #[error("category {category} not available in current event")]
    StoreUnavailable { category: CategoryKey },

    /// A track's segment index does not resolve to a record.
    #[error("{half} segment {index} not found")]
    SegmentNotFound { half: Half, index: i32 },
}

impl Error {
    /// Returns true if the error only concerns a single track.
    ///
    /// Batch callers skip such tracks and continue with the next one.
    #[must_use]
    pub fn is_per_track(&self) -> bool {
        matches!(self, Self::SegmentNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::SegmentNotFound {
            half: Half::Outer,
            index: 7,
        };
        assert_eq!(err.to_string(), "outer segment 7 not found");
        assert!(err.is_per_track());

        let err = Error::StoreUnavailable {
            category: CategoryKey::MDC_SEG,
        };
        assert!(err.to_string().contains("catMdcSeg"));
        assert!(!err.is_per_track());
    }
}
