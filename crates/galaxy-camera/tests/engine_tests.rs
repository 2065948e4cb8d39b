use galaxy_camera::{
    CameraContext, CameraEngine, CameraEvent, CameraMode, CameraPattern, CameraPose,
    CameraSettings, CameraState, Goal, MotionStyle,
};
use galaxy_gen::{GalaxyGenParams, generate_with};
use galaxy_geom::Vec3;
use galaxy_sim::{GalaxyScene, GravitySettings};

fn scene() -> GalaxyScene {
    GalaxyScene::new(generate_with(
        "camera-tests",
        &GalaxyGenParams::default().with_particle_count(800),
    ))
}

fn ctx(scene: &GalaxyScene, focus: Option<u32>) -> CameraContext<'_> {
    CameraContext::new(scene, scene.context(GravitySettings::default()), 5.0, focus)
}

fn start_pose() -> CameraPose {
    CameraPose::new(Vec3::new(0.0, 50.0, 120.0), Vec3::ZERO)
}

fn run(engine: &mut CameraEngine, ctx: &CameraContext<'_>, total_ms: f64) {
    let mut elapsed = 0.0;
    while elapsed < total_ms {
        let dt = (total_ms - elapsed).min(16.0);
        engine.advance(dt, Some(ctx));
        elapsed += dt;
    }
}

fn manual_engine(scene: &GalaxyScene) -> CameraEngine {
    let mut engine = CameraEngine::default();
    engine.attach(start_pose());
    engine.set_mode(CameraMode::Manual, Some(&ctx(scene, None)));
    engine.drain_events();
    engine
}

#[test]
fn eased_transition_terminates_on_target() {
    let s = scene();
    let c = ctx(&s, None);
    let mut engine = manual_engine(&s);
    let to = CameraPose::new(Vec3::new(80.0, 10.0, -30.0), Vec3::new(5.0, 0.0, 5.0));

    engine.request_transition(to, 500.0, Some(&c));
    assert!(engine.is_transitioning());
    let first = engine.pose().unwrap();
    let expected = start_pose().lerp(to, 0.05);
    assert!(first.position.distance(expected.position) < 1e-12);

    run(&mut engine, &c, 600.0);
    assert!(!engine.is_transitioning());
    let pose = engine.pose().unwrap();
    assert!(pose.position.distance(to.position) < 1e-6);
    assert!(pose.target.distance(to.target) < 1e-6);
    assert_eq!(engine.state(), CameraState::Manual);
    assert!(engine.drain_events().contains(&CameraEvent::TransitionCompleted));
}

#[test]
fn damped_transition_terminates_on_target() {
    let s = scene();
    let c = ctx(&s, None);
    let mut engine = manual_engine(&s);
    let to = CameraPose::new(Vec3::new(-300.0, 90.0, 10.0), Vec3::new(1.0, 2.0, 3.0));
    engine.request(Goal::Fixed(to), MotionStyle::Damped, 500.0, Some(&c));
    run(&mut engine, &c, 600.0);
    assert!(!engine.is_transitioning());
    let pose = engine.pose().unwrap();
    assert!(pose.position.distance(to.position) < 1e-6);
    assert!(pose.target.distance(to.target) < 1e-6);
}

#[test]
fn queued_request_latest_wins() {
    let s = scene();
    let c = ctx(&s, None);
    let mut engine = manual_engine(&s);
    let a = CameraPose::new(Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO);
    let b = CameraPose::new(Vec3::new(20.0, 20.0, 20.0), Vec3::ZERO);
    let last = CameraPose::new(Vec3::new(-40.0, 5.0, 60.0), Vec3::new(0.0, 1.0, 0.0));

    engine.request_transition(a, 300.0, Some(&c));
    engine.request_transition(b, 300.0, Some(&c));
    engine.request_transition(last, 300.0, Some(&c));
    assert!(engine.has_queued());
    let events = engine.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == CameraEvent::TransitionQueued)
            .count(),
        2
    );

    run(&mut engine, &c, 320.0);
    assert!(engine.is_transitioning());
    assert!(!engine.has_queued());

    run(&mut engine, &c, 400.0);
    assert!(!engine.is_transitioning());
    assert!(engine.pose().unwrap().position.distance(last.position) < 1e-6);
}

#[test]
fn missing_camera_or_scene_is_a_no_op() {
    let s = scene();
    let c = ctx(&s, None);

    let mut detached = CameraEngine::default();
    detached.request_transition(start_pose(), 500.0, Some(&c));
    detached.advance(16.0, Some(&c));
    detached.set_mode(CameraMode::Manual, Some(&c));
    detached.focus_star(1, Some(&c));
    assert!(detached.pose().is_none());
    assert!(!detached.is_transitioning());
    assert_eq!(detached.mode(), CameraMode::Automatic);
    assert!(detached.drain_events().is_empty());

    let mut sceneless = CameraEngine::default();
    sceneless.attach(start_pose());
    sceneless.request_transition(CameraPose::new(Vec3::ZERO, Vec3::UP), 500.0, None);
    sceneless.advance(16.0, None);
    sceneless.manual_rotate(30.0, 0.0, None);
    assert_eq!(sceneless.pose(), Some(start_pose()));
    assert_eq!(sceneless.now_ms(), 0.0);
    assert!(sceneless.drain_events().is_empty());
}

#[test]
fn mode_toggle_cancels_motion() {
    let s = scene();
    let c = ctx(&s, None);
    let mut engine = manual_engine(&s);
    engine.request_transition(CameraPose::new(Vec3::new(9.0, 9.0, 9.0), Vec3::ZERO), 800.0, Some(&c));
    engine.request_transition(CameraPose::new(Vec3::new(1.0, 9.0, 9.0), Vec3::ZERO), 800.0, Some(&c));
    engine.set_mode(CameraMode::Automatic, Some(&c));
    assert!(!engine.has_queued());
    // Re-entering automatic glides into the current pattern.
    assert!(engine.is_transitioning());
    engine.set_mode(CameraMode::Manual, Some(&c));
    assert!(!engine.is_transitioning());
    assert_eq!(engine.state(), CameraState::Manual);
}

#[test]
fn automatic_mode_cycles_patterns_smoothly() {
    let s = scene();
    let c = ctx(&s, None);
    let settings = CameraSettings {
        pattern_duration_ms: 1_000.0,
        pattern_transition_ms: 200.0,
        ..CameraSettings::default()
    };
    let mut engine = CameraEngine::new(settings);
    engine.attach(start_pose());
    engine.set_pattern(CameraPattern::ClassicOrbital, Some(&c));
    assert!(engine.is_transitioning());
    run(&mut engine, &c, 400.0);
    assert_eq!(
        engine.state(),
        CameraState::AutomaticIdle(CameraPattern::ClassicOrbital)
    );
    engine.drain_events();

    run(&mut engine, &c, 700.0);
    assert_eq!(engine.pattern(), CameraPattern::GalaxySynced);
    let events = engine.drain_events();
    assert!(events.contains(&CameraEvent::PatternChanged(CameraPattern::GalaxySynced)));
    assert!(events.iter().any(|e| matches!(e, CameraEvent::TransitionStarted { .. })));

    // Without a focus star the tracking slot orbits but keeps its place.
    run(&mut engine, &c, 1_100.0);
    let events = engine.drain_events();
    assert!(events.contains(&CameraEvent::PatternChanged(CameraPattern::StarTracking)));
    assert!(!events.iter().any(|e| matches!(e, CameraEvent::TrackingLost { .. })));
    assert_eq!(engine.pattern(), CameraPattern::StarTracking);
    assert!(engine.pose().unwrap().is_finite());

    run(&mut engine, &c, 1_000.0);
    assert_eq!(engine.pattern(), CameraPattern::SpiralApproach);
    run(&mut engine, &c, 1_000.0);
    assert_eq!(engine.pattern(), CameraPattern::ClassicOrbital);
}

#[test]
fn unfocused_cycle_visits_every_pattern_without_losing_tracking() {
    let s = scene();
    let c = ctx(&s, None);
    let settings = CameraSettings {
        pattern_duration_ms: 1_000.0,
        pattern_transition_ms: 200.0,
        ..CameraSettings::default()
    };
    let mut engine = CameraEngine::new(settings);
    engine.attach(start_pose());
    engine.set_pattern(CameraPattern::ClassicOrbital, Some(&c));

    let mut seen = vec![engine.pattern()];
    for _ in 0..1_000 {
        engine.advance(16.0, Some(&c));
        if seen.last() != Some(&engine.pattern()) {
            seen.push(engine.pattern());
        }
        assert!(engine.pose().unwrap().is_finite());
    }
    assert_eq!(
        &seen[..5],
        &[
            CameraPattern::ClassicOrbital,
            CameraPattern::GalaxySynced,
            CameraPattern::StarTracking,
            CameraPattern::SpiralApproach,
            CameraPattern::ClassicOrbital,
        ]
    );
    let events = engine.drain_events();
    assert!(!events.iter().any(|e| matches!(e, CameraEvent::TrackingLost { .. })));
}

#[test]
fn missing_focus_star_in_tracking_slot_is_reported_once() {
    let s = scene();
    let gone = ctx(&s, Some(u32::MAX));
    let settings = CameraSettings {
        pattern_duration_ms: 1_000.0,
        pattern_transition_ms: 200.0,
        ..CameraSettings::default()
    };
    let mut engine = CameraEngine::new(settings);
    engine.attach(start_pose());
    engine.set_pattern(CameraPattern::StarTracking, Some(&gone));
    run(&mut engine, &gone, 900.0);
    let lost = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, CameraEvent::TrackingLost { .. }))
        .count();
    assert_eq!(lost, 1);
    assert_eq!(engine.pattern(), CameraPattern::StarTracking);
    run(&mut engine, &gone, 200.0);
    assert_eq!(engine.pattern(), CameraPattern::SpiralApproach);
}

#[test]
fn automatic_fixed_move_glides_back_into_pattern() {
    let s = scene();
    let c = ctx(&s, None);
    let settings = CameraSettings {
        pattern_duration_ms: 10_000.0,
        pattern_transition_ms: 200.0,
        ..CameraSettings::default()
    };
    let mut engine = CameraEngine::new(settings);
    engine.attach(start_pose());
    let to = CameraPose::new(Vec3::new(40.0, 20.0, 40.0), Vec3::ZERO);
    engine.request_transition(to, 300.0, Some(&c));
    engine.drain_events();

    run(&mut engine, &c, 304.0);
    let events = engine.drain_events();
    let done = events
        .iter()
        .position(|e| *e == CameraEvent::TransitionCompleted)
        .unwrap();
    assert!(matches!(
        events[done + 1..].first(),
        Some(CameraEvent::TransitionStarted { duration_ms }) if *duration_ms == 200.0
    ));
    assert_eq!(engine.state(), CameraState::Transitioning);

    run(&mut engine, &c, 250.0);
    assert_eq!(
        engine.state(),
        CameraState::AutomaticIdle(CameraPattern::ClassicOrbital)
    );
}

#[test]
fn losing_the_star_mid_transition_degrades_to_orbit() {
    let s = scene();
    let star = s.particles()[s.len() / 2].index;
    let tracking = ctx(&s, Some(star));
    let mut engine = CameraEngine::default();
    engine.attach(start_pose());
    engine.focus_star(star, Some(&tracking));
    assert_eq!(engine.pattern(), CameraPattern::StarTracking);
    run(&mut engine, &tracking, 200.0);
    assert!(engine.is_transitioning());

    let untracked = ctx(&s, None);
    engine.drain_events();
    engine.advance(16.0, Some(&untracked));
    let events = engine.drain_events();
    assert!(events.contains(&CameraEvent::TrackingLost { index: Some(star) }));
    assert_eq!(engine.pattern(), CameraPattern::ClassicOrbital);

    run(&mut engine, &untracked, 2_000.0);
    assert!(!engine.is_transitioning());
    assert_eq!(
        engine.state(),
        CameraState::AutomaticIdle(CameraPattern::ClassicOrbital)
    );
}

#[test]
fn manual_orbit_keeps_distance_and_ignores_jitter() {
    let s = scene();
    let c = ctx(&s, None);
    let mut engine = manual_engine(&s);
    let before = engine.pose().unwrap();
    let r0 = before.position.distance(before.target);

    engine.manual_rotate(0.2, -0.3, Some(&c));
    assert_eq!(engine.pose(), Some(before));

    engine.manual_rotate(25.0, 4.0, Some(&c));
    let after = engine.pose().unwrap();
    assert_ne!(after, before);
    assert!((after.position.distance(after.target) - r0).abs() < 1e-9);

    engine.manual_zoom(2.0, Some(&c));
    let zoomed = engine.pose().unwrap();
    assert!((zoomed.position.distance(zoomed.target) - r0 * 0.8).abs() < 1e-9);

    let mut auto = CameraEngine::default();
    auto.attach(start_pose());
    auto.manual_rotate(25.0, 4.0, Some(&c));
    assert_eq!(auto.pose(), Some(start_pose()));
}
