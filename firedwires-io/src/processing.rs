//! Batch processing of whole events.
//!
//! Every event gets its own [`FiredWireCollector`], so events can be
//! processed in parallel without sharing collector state.

use crate::Result;
use firedwires_core::{Error as CoreError, Event, FiredWireCollector, FiredWires, TrackRecord};
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which candidate list a track came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Reconstructed candidate.
    #[default]
    Reco,
    /// Simulated candidate.
    Sim,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reco => f.write_str("reco"),
            Self::Sim => f.write_str("sim"),
        }
    }
}

/// Fired wires of one track together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackWires {
    /// Event number within the input.
    pub event: usize,
    /// Track number within its candidate list.
    pub track: usize,
    /// Candidate list of the track.
    pub kind: TrackKind,
    /// Collected wires.
    pub wires: FiredWires,
}

/// Configuration for batch processing.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingConfig {
    /// Candidate list to process. Only one list is processed per run.
    pub kind: TrackKind,
    /// Skip tracks with missing segments instead of failing.
    pub skip_missing_segments: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            kind: TrackKind::Reco,
            skip_missing_segments: true,
        }
    }
}

impl ProcessingConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the candidate list to process.
    #[must_use]
    pub fn with_kind(mut self, kind: TrackKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets whether tracks with missing segments are skipped.
    #[must_use]
    pub fn with_skip_missing_segments(mut self, skip: bool) -> Self {
        self.skip_missing_segments = skip;
        self
    }
}

/// Counters for a processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStatistics {
    /// Events processed.
    pub events: usize,
    /// Tracks whose wires were collected.
    pub tracks: usize,
    /// Tracks skipped because a segment was missing.
    pub skipped_tracks: usize,
    /// Wires collected over all tracks.
    pub wires: usize,
}

impl ProcessingStatistics {
    /// Adds the counters of `other`.
    pub fn merge(&mut self, other: &Self) {
        self.events += other.events;
        self.tracks += other.tracks;
        self.skipped_tracks += other.skipped_tracks;
        self.wires += other.wires;
    }
}

/// Candidates of `event` from the list selected by `kind`.
#[must_use]
pub fn tracks_of(event: &Event, kind: TrackKind) -> Vec<&dyn TrackRecord> {
    match kind {
        TrackKind::Reco => event
            .candidates
            .iter()
            .map(|c| c as &dyn TrackRecord)
            .collect(),
        TrackKind::Sim => event
            .sim_candidates
            .iter()
            .map(|c| c as &dyn TrackRecord)
            .collect(),
    }
}

/// Collects the wires of every candidate of one event.
///
/// # Errors
/// - [`firedwires_core::Error::StoreUnavailable`] if the event has no
///   segment category and at least one candidate.
/// - [`firedwires_core::Error::SegmentNotFound`] for a broken track when
///   `skip_missing_segments` is off.
pub fn collect_event(
    event: &Event,
    index: usize,
    config: &ProcessingConfig,
) -> Result<(Vec<TrackWires>, ProcessingStatistics)> {
    let mut collector = FiredWireCollector::new(event);
    let mut stats = ProcessingStatistics {
        events: 1,
        ..ProcessingStatistics::default()
    };

    let kind = config.kind;
    let tracks = tracks_of(event, kind);

    let mut results = Vec::with_capacity(tracks.len());
    for (track_index, track) in tracks.into_iter().enumerate() {
        match collector.collect(track) {
            Ok(wires) => {
                stats.tracks += 1;
                stats.wires += wires.total_wires();
                results.push(TrackWires {
                    event: index,
                    track: track_index,
                    kind,
                    wires,
                });
            }
            Err(err) if err.is_per_track() && config.skip_missing_segments => {
                warn!("event {index}, {kind} track {track_index}: {err}, skipping");
                stats.skipped_tracks += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok((results, stats))
}

/// Collects the wires of all events in parallel.
///
/// Output keeps event order, then track order within each event.
///
/// # Errors
/// Returns the first error of [`collect_event`] in event order.
pub fn collect_events(
    events: &[Event],
    config: &ProcessingConfig,
) -> Result<(Vec<TrackWires>, ProcessingStatistics)> {
    let per_event: Vec<Result<(Vec<TrackWires>, ProcessingStatistics)>> = events
        .par_iter()
        .enumerate()
        .map(|(index, event)| collect_event(event, index, config))
        .collect();

    let mut results = Vec::new();
    let mut stats = ProcessingStatistics::default();
    for outcome in per_event {
        let (tracks, event_stats) = outcome?;
        results.extend(tracks);
        stats.merge(&event_stats);
    }

    Ok((results, stats))
}

/// Returns true if `err` came from a missing segment category.
#[must_use]
pub fn is_store_unavailable(err: &crate::Error) -> bool {
    matches!(
        err,
        crate::Error::CoreError(CoreError::StoreUnavailable { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use firedwires_core::{
        Half, LayerIndex, MdcSegment, ParticleCand, ParticleCandSim, SegmentTable,
    };

    fn make_event(wire: i32) -> Event {
        let segments: SegmentTable = [
            MdcSegment::new(0, Half::Inner).with_layer(0, &[wire]),
            MdcSegment::new(0, Half::Outer).with_layer(3, &[wire + 1]),
        ]
        .into_iter()
        .collect();
        let mut event = Event::with_segments(segments);
        event.candidates = vec![ParticleCand::new(0, 1), ParticleCand::new(0, 7)];
        event.sim_candidates = vec![ParticleCandSim::new(0, 1, 3)];
        event
    }

    #[test]
    fn test_collect_event_skips_broken_tracks() {
        let event = make_event(10);
        let (tracks, stats) = collect_event(&event, 4, &ProcessingConfig::default()).unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].event, 4);
        assert_eq!(tracks[0].track, 0);
        assert_eq!(tracks[0].kind, TrackKind::Reco);
        assert_eq!(tracks[0].wires.layer(LayerIndex::new(15).unwrap()), &[11]);
        assert_eq!(
            stats,
            ProcessingStatistics {
                events: 1,
                tracks: 1,
                skipped_tracks: 1,
                wires: 2,
            }
        );
    }

    #[test]
    fn test_strict_mode_fails_on_broken_track() {
        let event = make_event(10);
        let config = ProcessingConfig::new().with_skip_missing_segments(false);
        let err = collect_event(&event, 0, &config).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::CoreError(CoreError::SegmentNotFound {
                half: Half::Outer,
                index: 7
            })
        ));
    }

    #[test]
    fn test_simulated_candidates() {
        let event = make_event(20);
        let config = ProcessingConfig::new().with_kind(TrackKind::Sim);
        let (tracks, stats) = collect_event(&event, 0, &config).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].kind, TrackKind::Sim);
        assert_eq!(stats.skipped_tracks, 0);
    }

    #[test]
    fn test_default_kind_processes_reconstructed_only() {
        let event = make_event(20);
        assert_eq!(ProcessingConfig::default().kind, TrackKind::Reco);
        assert_eq!(tracks_of(&event, TrackKind::Reco).len(), 2);
        assert_eq!(tracks_of(&event, TrackKind::Sim).len(), 1);

        let (tracks, _) = collect_event(&event, 0, &ProcessingConfig::default()).unwrap();
        assert!(tracks.iter().all(|t| t.kind == TrackKind::Reco));
    }

    #[test]
    fn test_missing_category_aborts() {
        let mut event = Event::default();
        event.candidates.push(ParticleCand::new(0, 1));
        let err = collect_event(&event, 0, &ProcessingConfig::default()).unwrap_err();
        assert!(is_store_unavailable(&err));

        // Events without candidates never touch the category.
        let empty = Event::default();
        assert!(collect_event(&empty, 0, &ProcessingConfig::default()).is_ok());
    }

    #[test]
    fn test_collect_events_keeps_order() {
        let events: Vec<Event> = (0..16).map(|i| make_event(i * 100)).collect();
        let (tracks, stats) = collect_events(&events, &ProcessingConfig::default()).unwrap();

        assert_eq!(tracks.len(), 16);
        assert_eq!(stats.events, 16);
        assert_eq!(stats.skipped_tracks, 16);
        for (i, track) in tracks.iter().enumerate() {
            assert_eq!(track.event, i);
            let expected = i32::try_from(i).unwrap() * 100;
            assert_eq!(track.wires.layer(LayerIndex::new(0).unwrap()), &[expected]);
        }
    }
}
