use galaxy_gen::{GalaxyGenParams, generate_with};
use galaxy_sim::{GalaxyScene, GravitySettings, SimState, evolve_position, live_appearance};

fn scene(seed: &str) -> GalaxyScene {
    GalaxyScene::new(generate_with(seed, &GalaxyGenParams::default().with_particle_count(1_000)))
}

#[test]
fn index_lookup_survives_layer_sort() {
    let s = scene("lookup");
    for (slot, p) in s.particles().iter().enumerate() {
        assert_eq!(s.slot_of(p.index), Some(slot));
        assert_eq!(s.particle(p.index).map(|q| q.index), Some(p.index));
    }
    assert!(s.particle(u32::MAX).is_none());
}

#[test]
fn advance_matches_direct_evaluation() {
    let s = scene("advance");
    let gravity = GravitySettings {
        enabled: true,
        ..GravitySettings::default()
    };
    let mut sim = SimState::new(gravity);
    sim.time_scale = 2.0;
    for _ in 0..10 {
        sim.advance(&s, 0.05);
    }
    let t = sim.elapsed();
    assert!((t - 1.0).abs() < 1e-12);
    assert_eq!(sim.positions().len(), s.len());
    for (p, live) in s.particles().iter().zip(sim.positions()) {
        let direct = evolve_position(p, &s.physics, s.black_holes(), &gravity, t);
        assert_eq!(*live, direct);
        assert_eq!(sim.position_of(&s, p.index), Some(direct));
    }
    for ((p, live), look) in s.particles().iter().zip(sim.positions()).zip(sim.appearances()) {
        assert_eq!(*look, live_appearance(p, &s.physics, *live, t));
    }
}

#[test]
fn paused_state_keeps_time() {
    let s = scene("pause");
    let mut sim = SimState::default();
    sim.advance(&s, 0.5);
    sim.paused = true;
    sim.advance(&s, 3.0);
    assert_eq!(sim.elapsed(), 0.5);
    assert_eq!(sim.positions().len(), s.len());
}

#[test]
fn focus_prefers_tracked_over_selected_and_resets() {
    let s = scene("focus");
    let mut sim = SimState::default();
    assert_eq!(sim.focus_star(), None);
    sim.select(Some(4));
    assert_eq!(sim.focus_star(), Some(4));
    sim.track(Some(9));
    assert_eq!(sim.focus_star(), Some(9));
    sim.advance(&s, 1.0);
    sim.reset_for(&s);
    assert_eq!(sim.elapsed(), 0.0);
    assert_eq!(sim.focus_star(), None);
    assert_eq!(sim.positions().len(), s.len());
}
