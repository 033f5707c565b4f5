//! Live tracking against routes planned on real floor plans.

mod common;

use std::thread;

use disha_nav::navigator::LIVE_NODE_ID;
use disha_nav::{NavConfig, PositionSample, ProgressTracker, TrackerEvent, TrackerState};

use common::*;

#[test]
fn test_walk_corridor_to_arrival() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let mut tracker = ProgressTracker::with_guidance(nav.config(), guidance);

    let samples = walk_x(&[0.0, 2.0, 4.0, 6.0, 8.0, 9.0, 10.0, 12.0, 14.0, 16.0, 18.0, 19.5, 20.0]);
    let events: Vec<TrackerEvent> = samples.into_iter().filter_map(|s| tracker.update(s)).collect();

    assert_eq!(
        events,
        vec![
            TrackerEvent::Advance { index: 1 },
            TrackerEvent::Advance { index: 2 },
            TrackerEvent::Arrived { index: 2 },
        ]
    );
    assert_eq!(tracker.state(), TrackerState::Arrived);
    assert_eq!(tracker.progress().last_confirmed_node.as_deref(), Some("R2"));
}

#[test]
fn test_overshooting_door_keeps_route() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let mut tracker = ProgressTracker::with_guidance(nav.config(), guidance);

    // Fixes straddle the door without landing inside its tolerance
    let xs = [0.0, 1.3, 2.6, 3.9, 5.2, 6.5, 7.8, 9.1, 10.8, 12.1, 13.4, 14.7, 16.0, 17.3, 18.6, 19.9];
    let events: Vec<TrackerEvent> = walk_x(&xs).into_iter().filter_map(|s| tracker.update(s)).collect();

    assert_eq!(
        events,
        vec![
            TrackerEvent::Advance { index: 1 },
            TrackerEvent::Advance { index: 2 },
            TrackerEvent::Arrived { index: 2 },
        ]
    );
    assert_eq!(tracker.state(), TrackerState::Arrived);
}

#[test]
fn test_reroute_after_arrival_is_ignored() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let (mut session, handle, _events) = nav.session(guidance);

    for sample in walk_x(&[0.0, 9.0, 10.0, 20.0]) {
        handle.send_position(sample).unwrap();
    }
    handle.reroute(nav.route("R2", "R1").unwrap()).unwrap();
    session.pump();

    assert_eq!(session.tracker().state(), TrackerState::Arrived);
    assert_eq!(session.tracker().guidance().map(|g| g.goal_node.as_str()), Some("R2"));
}

#[test]
fn test_arrival_reported_once() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let mut tracker = ProgressTracker::with_guidance(nav.config(), guidance);

    // Lingering at the destination keeps producing fixes
    let mut xs = vec![0.0, 9.5, 10.0];
    xs.extend(std::iter::repeat_n(20.0, 10));
    let events: Vec<TrackerEvent> = walk_x(&xs).into_iter().filter_map(|s| tracker.update(s)).collect();

    let arrivals = events.iter().filter(|e| matches!(e, TrackerEvent::Arrived { .. })).count();
    assert_eq!(arrivals, 1);

    // Indices only ever step forward by one
    let mut expected = 1;
    for event in &events {
        if let TrackerEvent::Advance { index } = event {
            assert_eq!(*index, expected);
            expected += 1;
        }
    }
}

#[test]
fn test_off_corridor_needs_replan() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let mut tracker = ProgressTracker::with_guidance(nav.config(), guidance);

    tracker.update(PositionSample::new(0.0, 0.0, 1));
    let event = tracker.update(PositionSample::new(5.0, 50.0, 2));

    let Some(TrackerEvent::ReplanNeeded(request)) = event else {
        panic!("expected replan, got {:?}", event);
    };
    assert_eq!(tracker.state(), TrackerState::Deviated);
    assert_eq!(request.last_confirmed_node.as_deref(), Some("R1"));
    assert_eq!(request.instruction_index, 0);
}

#[test]
fn test_duplicate_samples_are_noops() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let mut tracker = ProgressTracker::with_guidance(nav.config(), guidance);

    tracker.update(PositionSample::new(0.0, 0.0, 5));
    let before = tracker.progress().clone();

    assert_eq!(tracker.update(PositionSample::new(9.5, 0.0, 5)), None);
    assert_eq!(tracker.update(PositionSample::new(9.5, 0.0, 4)), None);
    assert_eq!(tracker.progress(), &before);
    assert_eq!(tracker.state(), TrackerState::OnInstruction(0));
}

#[test]
fn test_reroute_after_deviation() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let (mut session, handle, events) = nav.session(guidance);

    handle.send_position(PositionSample::new(0.0, 0.0, 1)).unwrap();
    handle.send_position(PositionSample::new(5.0, 50.0, 2)).unwrap();
    session.pump();

    let Ok(TrackerEvent::ReplanNeeded(request)) = events.try_recv() else {
        panic!("expected a replan signal");
    };

    // Outside the building nothing is visible, so the route starts at the
    // nearest node instead of the live position
    let new_route = nav.reroute(&request, "R2").unwrap();
    assert_ne!(new_route.start_node, LIVE_NODE_ID);
    assert_eq!(new_route.goal_node, "R2");

    handle.reroute(new_route).unwrap();
    session.pump();
    assert_eq!(session.tracker().state(), TrackerState::AwaitingPosition);
    assert_eq!(session.tracker().progress().last_timestamp, Some(2));

    // Stale fixes from before the reroute stay ignored
    handle.send_position(PositionSample::new(0.0, 0.0, 2)).unwrap();
    session.pump();
    assert_eq!(session.tracker().state(), TrackerState::AwaitingPosition);
}

#[test]
fn test_reroute_from_inside_room() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.reroute_from(p(-3.0, 2.0), "R2").unwrap();

    assert_eq!(guidance.start_node, LIVE_NODE_ID);
    assert!(guidance.path.iter().any(|id| id == "D"));
    assert!(!nav.graph().contains(LIVE_NODE_ID));
}

#[test]
fn test_concurrent_producers() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let (mut session, handle, events) = nav.session(guidance);

    let samples = walk_x(&[0.0, 3.0, 6.0, 9.0, 10.0, 13.0, 16.0, 19.0]);
    let (even, odd): (Vec<_>, Vec<_>) = samples.into_iter().partition(|s| s.timestamp % 2 == 0);

    let producers: Vec<_> = [even, odd]
        .into_iter()
        .map(|batch| {
            let handle = handle.clone();
            thread::spawn(move || {
                for sample in batch.into_iter().rev() {
                    handle.send_position(sample).unwrap();
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    // One batch, applied in timestamp order regardless of arrival order
    assert_eq!(session.pump(), 8);
    let signals: Vec<_> = events.try_iter().collect();
    assert_eq!(
        signals,
        vec![
            TrackerEvent::Advance { index: 1 },
            TrackerEvent::Advance { index: 2 },
            TrackerEvent::Arrived { index: 2 },
        ]
    );
}

#[test]
fn test_spawned_session_with_feeders() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let (session, handle, events) = nav.session(guidance);
    let worker = session.spawn().unwrap();

    let feeder = {
        let handle = handle.clone();
        thread::spawn(move || {
            for sample in walk_x(&[0.0, 5.0, 9.0, 10.0, 15.0, 20.0]) {
                if handle.send_position(sample).is_err() {
                    break;
                }
            }
        })
    };
    feeder.join().unwrap();

    assert_eq!(worker.join().unwrap(), TrackerState::Arrived);
    let signals: Vec<_> = events.try_iter().collect();
    assert_eq!(signals.last(), Some(&TrackerEvent::Arrived { index: 2 }));
    assert!(handle.send_position(PositionSample::new(0.0, 0.0, 99)).is_err());
}

#[test]
fn test_cancel_from_another_thread() {
    let nav = navigator(&corridor_plan());
    let guidance = nav.route("R1", "R2").unwrap();
    let (session, handle, _events) = nav.session(guidance);
    let worker = session.spawn().unwrap();

    let canceller = handle.clone();
    thread::spawn(move || canceller.cancel().unwrap()).join().unwrap();

    assert_eq!(worker.join().unwrap(), TrackerState::Cancelled);
}

#[test]
fn test_units_per_meter_scale() {
    // Same corridor drawn in centimetres
    let config = NavConfig::default().with_units_per_meter(100.0);
    let plan = box_walls(disha_nav::FloorPlan::new(), "outer", p(-1000.0, -500.0), p(3000.0, 500.0))
        .with_wall(disha_nav::floorplan::Wall::new("mid", p(1000.0, -500.0), p(1000.0, 500.0)))
        .with_door(disha_nav::floorplan::Opening::new("D", p(1000.0, 0.0), "mid", 100.0))
        .with_room(disha_nav::floorplan::Room::rect("R1", p(-1000.0, -500.0), p(1000.0, 500.0)))
        .with_room(disha_nav::floorplan::Room::rect("R2", p(1000.0, -500.0), p(3000.0, 500.0)));
    let nav = disha_nav::Navigator::with_floor_plan(config, &plan).unwrap();

    let guidance = nav.route("R1", "R2").unwrap();
    assert!((guidance.total_distance - 20.0).abs() < 1e-3);

    let mut tracker = ProgressTracker::with_guidance(nav.config(), guidance);
    tracker.update(PositionSample::new(0.0, 0.0, 1));
    // 1 m short of the door is within the 1.5 m straight tolerance
    assert_eq!(
        tracker.update(PositionSample::new(900.0, 0.0, 2)),
        Some(TrackerEvent::Advance { index: 1 })
    );
}
