use firedwires_core::{
    CollectorState, Error, Event, FiredWireCollector, Half, LayerIndex, MdcSegment, ParticleCand,
    ParticleCandSim, SegmentCategory, SegmentTable, TrackRecord, TOTAL_LAYERS,
};

fn layer(n: usize) -> LayerIndex {
    LayerIndex::new(n).unwrap()
}

// Segment 0: inner, wires 5,7 on layer 0
// Segment 1: outer, empty
// Segment 2: outer, wire 42 on relative layer 3
// Segment 3: inner, several layers
fn make_event() -> Event {
    let segments: SegmentTable = [
        MdcSegment::new(1, Half::Inner).with_layer(0, &[5, 7]),
        MdcSegment::new(1, Half::Outer),
        MdcSegment::new(1, Half::Outer).with_layer(3, &[42]),
        MdcSegment::new(1, Half::Inner)
            .with_layer(2, &[80, 81, 80])
            .with_layer(11, &[3]),
    ]
    .into_iter()
    .collect();

    let mut event = Event::with_segments(segments);
    event.candidates = vec![ParticleCand::new(0, 1), ParticleCand::new(3, 2)];
    event.sim_candidates = vec![ParticleCandSim::new(0, 2, 12)];
    event
}

#[test]
fn test_inner_wires_land_in_low_slots() {
    let event = make_event();
    let mut collector = FiredWireCollector::connect(&event).unwrap();

    let wires = collector.collect(&ParticleCand::new(0, 1)).unwrap();
    assert_eq!(wires.layers().len(), TOTAL_LAYERS);
    assert_eq!(wires.layer(layer(0)), &[5, 7]);
    for n in 1..TOTAL_LAYERS {
        assert!(wires.layer(layer(n)).is_empty(), "layer {n} should be empty");
    }
}

#[test]
fn test_outer_wires_are_offset_by_twelve() {
    let segments: SegmentTable = [
        MdcSegment::new(0, Half::Inner),
        MdcSegment::new(0, Half::Outer).with_layer(3, &[42]),
    ]
    .into_iter()
    .collect();
    let event = Event::with_segments(segments);

    let mut collector = FiredWireCollector::new(&event);
    let wires = collector.collect(&ParticleCand::new(0, 1)).unwrap();

    assert_eq!(wires.layer(layer(15)), &[42]);
    assert!(wires.layer(layer(3)).is_empty());
    assert_eq!(wires.total_wires(), 1);
}

#[test]
fn test_slot_lengths_match_hit_counts() {
    let event = make_event();
    let segments = event.segments.as_ref().unwrap();
    let mut collector = FiredWireCollector::connect(&event).unwrap();

    for track in &event.candidates {
        let wires = collector.collect(track).unwrap();
        let inner = segments.segment(track.inner_segment_index()).unwrap();
        let outer = segments.segment(track.outer_segment_index()).unwrap();

        for relative in 0..12 {
            assert_eq!(wires.half(Half::Inner)[relative], inner.cells[relative]);
            assert_eq!(wires.half(Half::Outer)[relative], outer.cells[relative]);
        }
    }
}

#[test]
fn test_order_and_duplicates_preserved() {
    let event = make_event();
    let mut collector = FiredWireCollector::connect(&event).unwrap();

    let wires = collector.collect(&ParticleCand::new(3, 2)).unwrap();
    assert_eq!(wires.layer(layer(2)), &[80, 81, 80]);
    assert_eq!(wires.layer(layer(11)), &[3]);
    assert_eq!(wires.layer(layer(15)), &[42]);
    assert_eq!(wires.fired_layers(), 3);
}

#[test]
fn test_simulated_and_reconstructed_tracks_match() {
    let event = make_event();
    let mut collector = FiredWireCollector::connect(&event).unwrap();

    let sim = collector.collect(&event.sim_candidates[0]).unwrap();
    let reco = collector.collect(&ParticleCand::new(0, 2)).unwrap();
    assert_eq!(sim, reco);

    let dynamic: &dyn TrackRecord = &event.sim_candidates[0];
    assert_eq!(collector.collect(dynamic).unwrap(), reco);
}

#[test]
fn test_missing_segment_aborts_track() {
    let event = make_event();
    let mut collector = FiredWireCollector::connect(&event).unwrap();

    let err = collector.collect(&ParticleCand::new(9, 1)).unwrap_err();
    assert_eq!(
        err,
        Error::SegmentNotFound {
            half: Half::Inner,
            index: 9
        }
    );

    let err = collector.collect(&ParticleCand::new(0, -1)).unwrap_err();
    assert!(matches!(
        err,
        Error::SegmentNotFound {
            half: Half::Outer,
            index: -1
        }
    ));

    // The collector keeps working for the next track.
    assert!(collector.collect(&ParticleCand::new(0, 1)).is_ok());
}

#[test]
fn test_lazy_collect_binds_on_first_use() {
    let event = make_event();
    let mut collector = FiredWireCollector::new(&event);
    assert_eq!(collector.state(), CollectorState::Uninitialized);

    collector.collect(&ParticleCand::new(0, 1)).unwrap();
    assert_eq!(collector.state(), CollectorState::Ready);
}

#[test]
fn test_lazy_collect_without_category() {
    let event = Event::default();
    let mut collector = FiredWireCollector::new(&event);

    let result = collector.collect(&ParticleCand::new(0, 1));
    assert!(matches!(result, Err(Error::StoreUnavailable { .. })));
    assert!(FiredWireCollector::connect(&event).is_err());
}

#[test]
fn test_sequential_collects_do_not_mix() {
    let event = make_event();
    let mut collector = FiredWireCollector::connect(&event).unwrap();

    let first = collector.collect(&ParticleCand::new(0, 1)).unwrap();
    let second = collector.collect(&ParticleCand::new(3, 2)).unwrap();

    assert_eq!(first.total_wires(), 2);
    assert_eq!(second.total_wires(), 5);
    for (_, wires) in second.iter() {
        assert!(!wires.contains(&5));
        assert!(!wires.contains(&7));
    }
}

#[test]
fn test_empty_segments_give_empty_slots() {
    let segments: SegmentTable = [MdcSegment::default(), MdcSegment::default()]
        .into_iter()
        .collect();
    let event = Event::with_segments(segments);
    let mut collector = FiredWireCollector::new(&event);

    let wires = collector.collect(&ParticleCand::new(0, 1)).unwrap();
    assert_eq!(wires.iter().count(), TOTAL_LAYERS);
    assert!(wires.is_empty());
}
