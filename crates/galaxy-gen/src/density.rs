//! Density-wave field: spiral-arm and bar enhancement at a polar coordinate.

use std::f64::consts::{PI, TAU};

use crate::types::{BarParams, GalaxyPhysics};

/// Angular half-width (radians) of the Gaussian arm profile.
pub const ARM_WIDTH: f64 = 0.3;

/// Wrap an angle into `[-π, π)`.
#[inline]
pub fn wrap_angle(a: f64) -> f64 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Spiral-arm density at `(radius, theta)`; always `>= 1.0`.
///
/// Each arm follows the logarithmic spiral `pitch·ln(r+1) + k·2π/arms` and
/// contributes additively, so overlapping arms stack.
pub fn density(radius: f64, theta: f64, arm_count: u32, arm_pitch: f64, arm_strength: f64) -> f64 {
    let spiral = arm_pitch * (radius + 1.0).ln();
    let spacing = TAU / f64::from(arm_count.max(1));
    let mut d = 1.0;
    for k in 0..arm_count {
        let arm_angle = spiral + f64::from(k) * spacing;
        let dt = wrap_angle(theta - arm_angle);
        d += arm_strength * (-(dt * dt) / (2.0 * ARM_WIDTH * ARM_WIDTH)).exp();
    }
    d
}

/// Bar enhancement inside the bar's rotated unit ellipse, else `1.0`.
pub fn bar_density(radius: f64, theta: f64, bar: &BarParams) -> f64 {
    let x = radius * theta.cos();
    let y = radius * theta.sin();
    let (s, c) = (-bar.angle).sin_cos();
    let bx = x * c - y * s;
    let by = x * s + y * c;
    let er = ((bx / bar.length).powi(2) + (by / bar.width).powi(2)).sqrt();
    if er < 1.0 {
        1.0 + bar.strength * (1.0 - er)
    } else {
        1.0
    }
}

/// Arm density plus the bar's excess over the neutral `1.0`.
pub fn combined_density(radius: f64, theta: f64, physics: &GalaxyPhysics) -> f64 {
    let arms = density(
        radius,
        theta,
        physics.arm_count,
        physics.arm_pitch,
        physics.arm_strength,
    );
    match &physics.bar {
        Some(bar) => arms + (bar_density(radius, theta, bar) - 1.0),
        None => arms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_range() {
        for i in -50..50 {
            let a = f64::from(i) * 0.77;
            let w = wrap_angle(a);
            assert!((-PI..PI).contains(&w), "{a} -> {w}");
            assert!(((a - w) / TAU - ((a - w) / TAU).round()).abs() < 1e-9);
        }
    }

    #[test]
    fn bar_center_is_peak() {
        let bar = BarParams {
            length: 10.0,
            width: 3.0,
            angle: 0.4,
            strength: 0.5,
        };
        assert!((bar_density(0.0, 0.0, &bar) - 1.5).abs() < 1e-12);
        // Along the minor axis, past the width, the bar has no effect.
        assert_eq!(bar_density(4.0, 0.4 + PI / 2.0, &bar), 1.0);
        // Along the major axis it is still inside.
        assert!(bar_density(8.0, 0.4, &bar) > 1.0);
    }
}
