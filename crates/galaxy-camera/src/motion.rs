use galaxy_geom::Vec3;

/// Where the eye sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    #[inline]
    pub fn lerp(self, to: CameraPose, t: f64) -> CameraPose {
        CameraPose {
            position: self.position.lerp(to.position, t),
            target: self.target.lerp(to.target, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.target.is_finite()
    }
}

/// Quintic ease-out over `[0, 1]`.
#[inline]
pub fn ease_out_quint(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(5)
}

/// Settle time (seconds) for a damped move of `distance` units.
#[inline]
pub fn motion_smooth_time(distance: f64) -> f64 {
    (0.1 + distance * 0.002).clamp(0.1, 0.3)
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries state between calls. Speed is clamped to `max_speed`
/// units per second and the result never passes `target`.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f64,
    max_speed: f64,
    dt: f64,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let mut change = current - target;
    let max_change = max_speed * smooth_time;
    if change.length_squared() > max_change * max_change {
        change = change.normalized() * max_change;
    }
    let clamped_target = current - change;

    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * decay;
    let mut out = clamped_target + (change + temp) * decay;

    if (target - current).dot(out - target) > 0.0 {
        out = target;
        *velocity = Vec3::ZERO;
    }
    out
}
