//! The one position-evolution routine.
//!
//! Rendering, click picking and camera star tracking all call
//! [`evolve_position`]; none of them keeps its own copy of the arithmetic.

use galaxy_gen::{BlackHole, GalaxyPhysics, Particle, evolution_rotation_speed};
use galaxy_geom::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravitySettings {
    pub enabled: bool,
    pub strength: f64,
    pub influence_radius: f64,
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: 1.0,
            influence_radius: 20.0,
        }
    }
}

/// Current position of `particle` after `t` seconds.
///
/// Pure: depends only on its arguments. Calling it twice with the same inputs
/// returns bit-identical coordinates.
pub fn evolve_position(
    particle: &Particle,
    physics: &GalaxyPhysics,
    black_holes: &[BlackHole],
    gravity: &GravitySettings,
    t: f64,
) -> Vec3 {
    let base = particle.position;
    let radius = base.x.hypot(base.z);
    let theta0 = base.z.atan2(base.x);

    // Differential rotation
    let speed = evolution_rotation_speed(radius, physics);
    let angular_velocity = speed / (radius + 0.1);
    let new_theta = theta0 + angular_velocity * t * 0.01;
    let (s, c) = (new_theta - theta0).sin_cos();
    let mut pos = Vec3::new(base.x * c - base.z * s, base.y, base.x * s + base.z * c);

    // Vertical drift
    pos.y += particle.velocity.y * t * 0.05;

    // Oscillatory jitter
    let osc = &particle.oscillation;
    pos.x += osc.amplitude * (osc.frequency * t + osc.phase).sin();
    pos.y += osc.amplitude * 0.5 * (osc.frequency * 1.3 * t + osc.phase).sin();
    pos.z += osc.amplitude * (osc.frequency * 0.8 * t + osc.phase).sin();

    if gravity.enabled {
        let mut total = Vec3::ZERO;
        for hole in black_holes {
            let to_hole = hole.position - pos;
            let distance = to_hole.length();
            if distance < gravity.influence_radius && distance > 0.0 {
                let force = gravity.strength * hole.mass * particle.mass
                    / (distance * distance + 0.1);
                let falloff = 1.0 - distance / gravity.influence_radius;
                total += to_hole.normalized() * (force * falloff);
            }
        }
        pos += total * t * 0.005;
    }

    pos
}

/// Borrowed bundle of the non-particle inputs of [`evolve_position`].
#[derive(Clone, Copy, Debug)]
pub struct EvolveContext<'a> {
    pub physics: &'a GalaxyPhysics,
    pub black_holes: &'a [BlackHole],
    pub gravity: GravitySettings,
}

impl EvolveContext<'_> {
    #[inline]
    pub fn position(&self, particle: &Particle, t: f64) -> Vec3 {
        evolve_position(particle, self.physics, self.black_holes, &self.gravity, t)
    }
}
