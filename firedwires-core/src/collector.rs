//! Fired wire collection for single tracks.
//!
//! A [`FiredWireCollector`] borrows one [`EventContext`] and binds the
//! segment category at most once. Every [`FiredWireCollector::collect`]
//! call resolves the track's inner and outer segment afresh and copies their
//! wire ids into a new [`FiredWires`]; segment references never outlive the
//! call.
//!
//! Collectors hold no locks. Workers processing events concurrently each
//! build their own collector.

use crate::error::{Error, Result};
use crate::layout::Half;
use crate::record::{SegmentRecord, TrackRecord};
use crate::store::{CategoryKey, EventContext, SegmentCategory};
use crate::wires::FiredWires;
use log::{debug, trace};

/// Binding state of a collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    /// Segment category not bound yet.
    Uninitialized,
    /// Segment category bound; tracks can be collected.
    Ready,
}

/// Extracts the fired wires of tracks from one event context.
pub struct FiredWireCollector<'ctx, C: EventContext + ?Sized> {
    context: &'ctx C,
    category: Option<&'ctx C::Category>,
}

impl<'ctx, C: EventContext + ?Sized> FiredWireCollector<'ctx, C> {
    /// Creates an unbound collector. The category is bound on first use.
    #[must_use]
    pub fn new(context: &'ctx C) -> Self {
        Self {
            context,
            category: None,
        }
    }

    /// Creates a collector and binds the segment category immediately.
    ///
    /// # Errors
    /// Returns [`Error::StoreUnavailable`] if the context has no segment
    /// category.
    pub fn connect(context: &'ctx C) -> Result<Self> {
        let mut collector = Self::new(context);
        collector.bind()?;
        Ok(collector)
    }

    /// Current binding state.
    #[must_use]
    pub fn state(&self) -> CollectorState {
        if self.category.is_some() {
            CollectorState::Ready
        } else {
            CollectorState::Uninitialized
        }
    }

    /// Binds the segment category if not already bound.
    ///
    /// Once bound, later calls return the cached category without another
    /// lookup.
    ///
    /// # Errors
    /// Returns [`Error::StoreUnavailable`] if the category is missing. The
    /// collector stays uninitialized in that case.
    pub fn bind(&mut self) -> Result<&'ctx C::Category> {
        if let Some(category) = self.category {
            return Ok(category);
        }

        let key = CategoryKey::MDC_SEG;
        let category = self
            .context
            .category(key)
            .ok_or(Error::StoreUnavailable { category: key })?;
        debug!("bound {key} with {} records", category.len());

        self.category = Some(category);
        Ok(category)
    }

    /// Collects the fired wires of one track.
    ///
    /// Inner segment layers land in slots `0..12`, outer segment layers in
    /// slots `12..24`. Layers with a nonpositive hit count stay empty.
    ///
    /// # Errors
    /// - [`Error::StoreUnavailable`] if the collector is unbound and the
    ///   category cannot be bound.
    /// - [`Error::SegmentNotFound`] if either segment index does not
    ///   resolve. No wires are returned in that case.
    pub fn collect<T: TrackRecord + ?Sized>(&mut self, track: &T) -> Result<FiredWires> {
        let category = self.bind()?;

        let inner = resolve_segment(category, track, Half::Inner)?;
        let outer = resolve_segment(category, track, Half::Outer)?;

        let mut wires = FiredWires::new();
        copy_segment_wires(inner, Half::Inner, &mut wires);
        copy_segment_wires(outer, Half::Outer, &mut wires);

        trace!(
            "track ({}, {}): {} wires in {} layers",
            track.inner_segment_index(),
            track.outer_segment_index(),
            wires.total_wires(),
            wires.fired_layers()
        );
        Ok(wires)
    }
}

fn resolve_segment<'a, K, T>(category: &'a K, track: &T, half: Half) -> Result<&'a K::Segment>
where
    K: SegmentCategory + ?Sized,
    T: TrackRecord + ?Sized,
{
    let index = track.segment_index(half);
    category
        .segment(index)
        .ok_or(Error::SegmentNotFound { half, index })
}

fn copy_segment_wires<S: SegmentRecord + ?Sized>(segment: &S, half: Half, wires: &mut FiredWires) {
    for (relative, &layer) in half.layers().iter().enumerate() {
        let count = segment.hit_count(relative);
        if count < 1 {
            continue;
        }

        let count = usize::try_from(count).unwrap_or(0);
        wires
            .slot_mut(layer)
            .extend((0..count).map(|hit| segment.wire_id(relative, hit)));
    }
}
