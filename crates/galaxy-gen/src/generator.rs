//! Deterministic galaxy structure from a seed string.
//!
//! The RNG is consumed in a fixed order (type, physics, black holes, particles)
//! so the same `(seed, params)` pair always yields the same galaxy, element for
//! element. Reordering any draw below changes every galaxy downstream of it.

use std::f64::consts::TAU;

use galaxy_geom::Vec3;

use crate::config::GalaxyGenParams;
use crate::curve::rotation_speed;
use crate::density::{combined_density, density};
use crate::rng::SeededRandom;
use crate::types::{
    BarParams, BlackHole, GalaxyPhysics, GalaxyType, Oscillation, Particle, StellarType,
};

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedGalaxy {
    pub seed: String,
    pub galaxy_type: GalaxyType,
    pub physics: GalaxyPhysics,
    /// Sorted by draw layer: bulge, disk, young arm, halo.
    pub particles: Vec<Particle>,
    pub black_holes: Vec<BlackHole>,
}

impl GeneratedGalaxy {
    pub fn has_bar(&self) -> bool {
        self.physics.bar.is_some()
    }

    pub fn total_particles(&self) -> usize {
        self.particles.len()
    }
}

pub fn generate(seed: &str) -> GeneratedGalaxy {
    generate_with(seed, &GalaxyGenParams::default())
}

pub fn generate_with(seed: &str, params: &GalaxyGenParams) -> GeneratedGalaxy {
    let mut rng = SeededRandom::new(seed);
    let galaxy_type = rng.choice(&GalaxyType::ALL[..]).copied().unwrap_or(GalaxyType::Sb);
    let physics = sample_physics(&mut rng, galaxy_type);
    let black_holes = place_black_holes(&mut rng, galaxy_type, &physics, params);
    let mut particles = populate(&mut rng, galaxy_type, &physics, &black_holes, params);
    particles.sort_by_key(|p| p.stellar_type.layer());

    log::info!(
        "generated galaxy seed={:?} type={} arms={} particles={} black_holes={}",
        seed,
        galaxy_type.as_str(),
        physics.arm_count,
        particles.len(),
        black_holes.len()
    );
    log::debug!("galaxy physics {:?}", physics);

    GeneratedGalaxy {
        seed: seed.to_string(),
        galaxy_type,
        physics,
        particles,
        black_holes,
    }
}

fn sample_physics(rng: &mut SeededRandom, galaxy_type: GalaxyType) -> GalaxyPhysics {
    let arm_count = rng.int(2, 4) as u32;
    let pattern_speed = rng.range(15.0, 35.0);
    let arm_pitch = (rng.range(0.15, 0.4) * galaxy_type.pitch_factor()).clamp(0.15, 0.4);
    let arm_strength = rng.range(0.5, 1.5);
    let max_rotation_speed = rng.range(200.0, 280.0);
    let galaxy_radius = rng.range(40.0, 80.0);
    let bar = if galaxy_type.is_barred() {
        let length = galaxy_radius * rng.range(0.2, 0.35);
        let width = length * rng.range(0.25, 0.4);
        let angle = rng.range(0.0, TAU);
        let strength = rng.range(0.3, 0.8);
        Some(BarParams {
            length,
            width,
            angle,
            strength,
        })
    } else {
        None
    };
    GalaxyPhysics {
        pattern_speed,
        arm_pitch,
        arm_count,
        arm_strength,
        max_rotation_speed,
        galaxy_radius,
        bar,
    }
}

fn place_black_holes(
    rng: &mut SeededRandom,
    galaxy_type: GalaxyType,
    physics: &GalaxyPhysics,
    params: &GalaxyGenParams,
) -> Vec<BlackHole> {
    let mut holes = Vec::new();
    let central_chance = if galaxy_type.is_early_type() {
        params.central_chance_early
    } else {
        params.central_chance_late
    };
    if rng.chance(central_chance) {
        let radius = rng.range(0.5, 1.0);
        holes.push(BlackHole {
            position: Vec3::ZERO,
            mass: rng.range(50.0, 100.0),
            radius,
            influence_radius: radius * rng.range(8.0, 12.0),
            index: 0,
        });
    }

    if rng.chance(params.stellar_chance) {
        let count = rng.int(i64::from(params.stellar_min), i64::from(params.stellar_max));
        let r = physics.galaxy_radius;
        for _ in 0..count {
            // Rejection sample away from the arms; the last attempt is kept
            // whether or not it cleared the threshold.
            let mut position = Vec3::ZERO;
            for _ in 0..params.stellar_max_attempts {
                let radius = rng.range(0.2 * r, 0.9 * r);
                let theta = rng.range(0.0, TAU);
                let y = rng.range(-1.0, 1.0);
                position = Vec3::new(radius * theta.cos(), y, radius * theta.sin());
                let d = density(
                    radius,
                    theta,
                    physics.arm_count,
                    physics.arm_pitch,
                    physics.arm_strength,
                );
                if d < params.stellar_density_threshold {
                    break;
                }
            }
            let radius = rng.range(0.3, 0.6);
            holes.push(BlackHole {
                position,
                mass: rng.range(5.0, 15.0),
                radius,
                influence_radius: radius * rng.range(6.0, 10.0),
                index: holes.len() as u32,
            });
        }
    }
    holes
}

/// `true` when `pos` is outside every hole's keep-out sphere.
pub fn clear_of_black_holes(pos: Vec3, holes: &[BlackHole], clearance: f64) -> bool {
    holes
        .iter()
        .all(|h| pos.distance(h.position) >= clearance * h.radius)
}

fn place(
    rng: &mut SeededRandom,
    holes: &[BlackHole],
    params: &GalaxyGenParams,
    mut sample: impl FnMut(&mut SeededRandom) -> Vec3,
) -> Vec3 {
    let mut pos = sample(rng);
    for _ in 1..params.max_attempts {
        if clear_of_black_holes(pos, holes, params.black_hole_clearance) {
            break;
        }
        pos = sample(rng);
    }
    pos
}

fn populate(
    rng: &mut SeededRandom,
    galaxy_type: GalaxyType,
    physics: &GalaxyPhysics,
    holes: &[BlackHole],
    params: &GalaxyGenParams,
) -> Vec<Particle> {
    let total = rng.int(
        i64::from(params.min_particles),
        i64::from(params.max_particles),
    ) as usize;
    let bulge_n = (total as f64 * params.bulge_fraction).floor() as usize;
    let halo_n = ((total as f64 * params.halo_fraction).floor() as usize).min(total - bulge_n);
    let disk_n = total - bulge_n - halo_n;

    let mut out = Vec::with_capacity(total);
    for _ in 0..bulge_n {
        let pos = place(rng, holes, params, |rng| sample_bulge(rng, galaxy_type, physics));
        out.push(finish(rng, physics, params, pos, StellarType::Bulge, out.len()));
    }
    for _ in 0..disk_n {
        let pos = place(rng, holes, params, |rng| sample_disk(rng, physics));
        out.push(finish(rng, physics, params, pos, StellarType::Disk, out.len()));
    }
    for _ in 0..halo_n {
        let pos = place(rng, holes, params, |rng| sample_halo(rng, physics));
        out.push(finish(rng, physics, params, pos, StellarType::Halo, out.len()));
    }
    out
}

/// Sum of `k` unit exponential draws (a Gamma(k, 1) sample).
fn gamma_k(rng: &mut SeededRandom, k: u32) -> f64 {
    (0..k).map(|_| -(1.0 - rng.next_f64()).ln()).sum()
}

/// Spherical exponential density profile, flattened vertically.
fn sample_bulge(rng: &mut SeededRandom, galaxy_type: GalaxyType, physics: &GalaxyPhysics) -> Vec3 {
    let scale = physics.galaxy_radius * 0.05 * galaxy_type.bulge_factor();
    let r = (gamma_k(rng, 3) * scale).min(physics.galaxy_radius * 0.4);
    let theta = rng.range(0.0, TAU);
    let cos_phi = rng.range(-1.0, 1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * cos_phi * 0.6,
        r * sin_phi * theta.sin(),
    )
}

/// Exponential disk whose azimuth is biased toward the arms and bar.
fn sample_disk(rng: &mut SeededRandom, physics: &GalaxyPhysics) -> Vec3 {
    let big_r = physics.galaxy_radius;
    let mut r = gamma_k(rng, 2) * big_r / 3.5;
    if r > big_r {
        r = rng.range(0.0, big_r);
    }
    let peak = 1.0
        + physics.arm_strength * f64::from(physics.arm_count)
        + physics.bar.map_or(0.0, |b| b.strength);
    let mut theta = rng.range(0.0, TAU);
    for _ in 0..4 {
        if rng.next_f64() < combined_density(r, theta, physics) / peak {
            break;
        }
        theta = rng.range(0.0, TAU);
    }
    let thickness = big_r * 0.02 * (1.0 + r / big_r);
    let y = (rng.next_f64() + rng.next_f64() + rng.next_f64() - 1.5) * thickness;
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Spherical halo with an `r^0.25` radial law.
fn sample_halo(rng: &mut SeededRandom, physics: &GalaxyPhysics) -> Vec3 {
    let r = physics.galaxy_radius * 1.3 * rng.next_f64().powf(0.25);
    let theta = rng.range(0.0, TAU);
    let cos_phi = rng.range(-1.0, 1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * cos_phi,
        r * sin_phi * theta.sin(),
    )
}

fn finish(
    rng: &mut SeededRandom,
    physics: &GalaxyPhysics,
    params: &GalaxyGenParams,
    position: Vec3,
    population: StellarType,
    index: usize,
) -> Particle {
    let r = position.x.hypot(position.z);
    let theta = position.z.atan2(position.x);
    let arm_density = combined_density(r, theta, physics);
    let stellar_type = match population {
        StellarType::Disk if arm_density > params.young_arm_threshold => StellarType::YoungArm,
        other => other,
    };

    let (mass, color, size, brightness, amplitude, vy) = match stellar_type {
        StellarType::Bulge => (
            rng.range(0.8, 1.2),
            [1.0, rng.range(0.6, 0.8), rng.range(0.4, 0.55)],
            rng.range(0.6, 1.2),
            rng.range(0.5, 0.8),
            rng.range(0.05, 0.2),
            rng.range(-0.1, 0.1),
        ),
        StellarType::Disk => (
            rng.range(0.5, 1.5),
            [1.0, rng.range(0.85, 0.95), rng.range(0.7, 0.85)],
            rng.range(0.7, 1.4),
            rng.range(0.5, 0.8),
            rng.range(0.05, 0.15),
            rng.range(-0.05, 0.05),
        ),
        StellarType::YoungArm => {
            let boost = (arm_density - params.young_arm_threshold).clamp(0.0, 1.0);
            (
                rng.range(1.5, 3.0),
                [rng.range(0.6, 0.8), rng.range(0.75, 0.9), 1.0],
                rng.range(1.2, 2.2) + 0.3 * boost,
                (rng.range(0.8, 0.95) + 0.05 * boost).min(1.0),
                rng.range(0.05, 0.12),
                rng.range(-0.05, 0.05),
            )
        }
        StellarType::Halo => (
            rng.range(0.3, 0.8),
            [rng.range(0.9, 1.0), rng.range(0.5, 0.7), rng.range(0.3, 0.5)],
            rng.range(0.4, 0.9),
            rng.range(0.2, 0.45),
            rng.range(0.1, 0.3),
            rng.range(-0.3, 0.3),
        ),
    };
    let frequency = rng.range(0.5, 2.0);
    let phase = rng.range(0.0, TAU);

    let speed = rotation_speed(
        r,
        physics.max_rotation_speed,
        physics.core_radius(),
        physics.flat_radius(),
    );
    let velocity = Vec3::new(-theta.sin() * speed * 0.01, vy, theta.cos() * speed * 0.01);

    Particle {
        position,
        velocity,
        oscillation: Oscillation {
            amplitude,
            frequency,
            phase,
        },
        mass,
        stellar_type,
        arm_density,
        color,
        size,
        brightness,
        index: index as u32,
    }
}
