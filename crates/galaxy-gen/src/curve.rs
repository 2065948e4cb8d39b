//! Rotation curves: orbital speed as a function of galactic radius.
//!
//! Two shapes exist on purpose. [`rotation_speed`] seeds particle velocities at
//! generation time; [`evolution_rotation_speed`] is the simplified piecewise
//! linear form the position evolver applies every frame. They are not
//! interchangeable: swapping one for the other changes rendered orbits.

use crate::types::GalaxyPhysics;

/// Fraction of `v_max` reached at the edge of the solid-body core.
pub const CORE_EDGE_FRACTION: f64 = 0.6;
/// Fraction of `v_max` held on the outer plateau.
pub const PLATEAU_FRACTION: f64 = 0.95;

/// Generation-time curve: solid-body core, exponential rise (rate 3), flat
/// halo plateau. The rise is normalised so the three pieces meet exactly at
/// `r_core` and `r_flat`.
pub fn rotation_speed(radius: f64, v_max: f64, r_core: f64, r_flat: f64) -> f64 {
    let v_core = v_max * CORE_EDGE_FRACTION;
    let v_plateau = v_max * PLATEAU_FRACTION;
    if radius < r_core {
        v_core * radius / r_core
    } else if radius < r_flat {
        let x = (radius - r_core) / (r_flat - r_core);
        let rise = (1.0 - (-3.0 * x).exp()) / (1.0 - (-3.0f64).exp());
        v_core + (v_plateau - v_core) * rise
    } else {
        v_plateau
    }
}

/// Evolution-time curve with breakpoints at 0.1R and 0.8R.
pub fn evolution_rotation_speed(radius: f64, physics: &GalaxyPhysics) -> f64 {
    let v_max = physics.max_rotation_speed;
    let r_core = physics.galaxy_radius * 0.1;
    let r_flat = physics.galaxy_radius * 0.8;
    if radius < r_core {
        v_max * radius / r_core
    } else if radius < r_flat {
        v_max * (1.0 - 0.1 * (radius - r_core) / (r_flat - r_core))
    } else {
        0.9 * v_max
    }
}
