use std::collections::HashSet;

use galaxy_gen::generator::clear_of_black_holes;
use galaxy_gen::{GalaxyGenParams, GalaxyType, StellarType, generate, generate_with};

#[test]
fn same_seed_twice_is_identical() {
    let a = generate("galaxy-42");
    let b = generate("galaxy-42");
    assert_eq!(a.particles[0].position, b.particles[0].position);
    assert_eq!(a.black_holes.len(), b.black_holes.len());
    assert_eq!(a.physics.arm_count, b.physics.arm_count);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_differ() {
    let params = GalaxyGenParams::default().with_particle_count(500);
    let a = generate_with("alpha", &params);
    let b = generate_with("beta", &params);
    assert_ne!(a.particles[0].position, b.particles[0].position);
}

#[test]
fn empty_seed_generates_deterministically() {
    let params = GalaxyGenParams::default().with_particle_count(800);
    let a = generate_with("", &params);
    let b = generate_with("", &params);
    assert_eq!(a, b);
    assert_eq!(a.particles.len(), 800);
}

#[test]
fn physics_parameters_within_ranges() {
    let params = GalaxyGenParams::default().with_particle_count(100);
    for i in 0..60 {
        let g = generate_with(&format!("range-{i}"), &params);
        let p = &g.physics;
        assert!((2..=4).contains(&p.arm_count));
        assert!((15.0..=35.0).contains(&p.pattern_speed));
        assert!((0.15..=0.4).contains(&p.arm_pitch));
        assert!((0.5..=1.5).contains(&p.arm_strength));
        assert!((200.0..=280.0).contains(&p.max_rotation_speed));
        assert!((40.0..=80.0).contains(&p.galaxy_radius));
        assert_eq!(p.bar.is_some(), g.galaxy_type.is_barred());
        assert!(GalaxyType::ALL.contains(&g.galaxy_type));
    }
}

#[test]
fn default_particle_count_and_populations() {
    let g = generate("populations");
    let n = g.particles.len();
    assert!((10_000..=20_000).contains(&n));

    let bulge = g.particles.iter().filter(|p| p.stellar_type == StellarType::Bulge).count();
    let halo = g.particles.iter().filter(|p| p.stellar_type == StellarType::Halo).count();
    let disk_like = n - bulge - halo;
    assert_eq!(bulge, (n as f64 * 0.15).floor() as usize);
    assert_eq!(halo, (n as f64 * 0.15).floor() as usize);
    assert!(disk_like > n / 2);
}

#[test]
fn particles_sorted_by_layer_and_indices_unique() {
    let g = generate_with("layers", &GalaxyGenParams::default().with_particle_count(3_000));
    let layers: Vec<u8> = g.particles.iter().map(|p| p.stellar_type.layer()).collect();
    assert!(layers.windows(2).all(|w| w[0] <= w[1]));

    let ids: HashSet<u32> = g.particles.iter().map(|p| p.index).collect();
    assert_eq!(ids.len(), g.particles.len());
    assert!(ids.iter().all(|&i| (i as usize) < g.particles.len()));
}

#[test]
fn young_arm_stars_sit_in_dense_regions() {
    let g = generate_with("arms", &GalaxyGenParams::default().with_particle_count(4_000));
    for p in &g.particles {
        match p.stellar_type {
            StellarType::YoungArm => assert!(p.arm_density > 1.3),
            StellarType::Disk => assert!(p.arm_density <= 1.3),
            _ => {}
        }
        assert!(p.arm_density >= 1.0);
        assert!(p.position.is_finite() && p.velocity.is_finite());
    }
}

#[test]
fn black_hole_index_convention() {
    let params = GalaxyGenParams::default().with_particle_count(50);
    for i in 0..80 {
        let g = generate_with(&format!("bh-{i}"), &params);
        assert!(g.black_holes.len() <= 6);
        for (slot, bh) in g.black_holes.iter().enumerate() {
            assert_eq!(bh.index as usize, slot);
            if bh.is_central() {
                assert_eq!(slot, 0);
                assert_eq!(bh.position, galaxy_geom::Vec3::ZERO);
            }
        }
    }
}

#[test]
fn particles_clear_black_holes_in_most_galaxies() {
    let mut clean = 0;
    let mut with_holes = 0;
    let total = 20;
    for i in 0..total {
        let g = generate(&format!("exclusion-{i}"));
        if !g.black_holes.is_empty() {
            with_holes += 1;
        }
        let violations = g
            .particles
            .iter()
            .filter(|p| !clear_of_black_holes(p.position, &g.black_holes, 2.0))
            .count();
        if violations == 0 {
            clean += 1;
        }
    }
    assert!(with_holes > 0);
    assert!(clean * 100 >= total * 95, "only {clean}/{total} galaxies were clean");
}
