use galaxy_gen::{GalaxyPhysics, Particle, StellarType, combined_density};
use galaxy_geom::Vec3;

/// Per-frame size and brightness after density-wave modulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Appearance {
    pub size: f64,
    pub brightness: f64,
}

/// Rotation of the spiral pattern (radians) after `t` seconds.
#[inline]
pub fn pattern_angle(physics: &GalaxyPhysics, t: f64) -> f64 {
    physics.pattern_speed * t * 0.001
}

/// Modulate a star by the density wave it currently sits in.
///
/// The pattern turns at `pattern_speed` independently of the stars, so a star
/// brightens as an arm sweeps over it and dims once it has passed.
pub fn live_appearance(particle: &Particle, physics: &GalaxyPhysics, pos: Vec3, t: f64) -> Appearance {
    let radius = pos.x.hypot(pos.z);
    let theta = pos.z.atan2(pos.x) - pattern_angle(physics, t);
    let d = combined_density(radius, theta, physics);
    let peak = 1.0 + physics.arm_strength;
    let level = ((d - 1.0) / (peak - 1.0).max(1e-9)).clamp(0.0, 1.0);

    let mut size = particle.size * (0.85 + 0.15 * level);
    if particle.stellar_type == StellarType::YoungArm {
        size *= 1.0 + 0.15 * level;
    }
    Appearance {
        size,
        brightness: particle.brightness * (0.7 + 0.3 * level),
    }
}
