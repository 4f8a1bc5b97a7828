//! firedwires-core: Core traits and types for fired wire extraction.
//!
//! This crate provides the record abstractions for drift chamber segments
//! and particle candidates, the two-level category lookup used to resolve
//! them, and the [`FiredWireCollector`] that turns one track into a
//! per-layer list of fired wires.
//!
//! # Processing Pipeline
//!
//! 1. **Resolve**: bind the segment category once, then look up the inner
//!    and outer segment of each track
//! 2. **Extract**: copy the wire ids of both segments into a 24-slot
//!    [`FiredWires`] collection
//!

pub mod collector;
pub mod error;
pub mod layout;
pub mod record;
pub mod store;
pub mod wires;

pub use collector::{CollectorState, FiredWireCollector};
pub use error::{Error, Result};
pub use layout::{Half, LayerIndex, Plane, LAYERS_PER_HALF, TOTAL_LAYERS};
pub use record::{MdcSegment, ParticleCand, ParticleCandSim, SegmentRecord, TrackRecord};
pub use store::{CategoryKey, Event, EventContext, SegmentCategory, SegmentTable};
pub use wires::FiredWires;
