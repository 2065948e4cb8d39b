use galaxy_gen::GalaxyPhysics;
use galaxy_geom::Vec3;

use crate::motion::CameraPose;

/// Automatic camera movements, cycled in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraPattern {
    ClassicOrbital,
    GalaxySynced,
    StarTracking,
    SpiralApproach,
}

impl CameraPattern {
    pub const ALL: [CameraPattern; 4] = [
        CameraPattern::ClassicOrbital,
        CameraPattern::GalaxySynced,
        CameraPattern::StarTracking,
        CameraPattern::SpiralApproach,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CameraPattern::ClassicOrbital => "Classic Orbital",
            CameraPattern::GalaxySynced => "Galaxy-Synced",
            CameraPattern::StarTracking => "Star Tracking",
            CameraPattern::SpiralApproach => "Spiral Approach",
        }
    }

    pub fn next(self) -> CameraPattern {
        match self {
            CameraPattern::ClassicOrbital => CameraPattern::GalaxySynced,
            CameraPattern::GalaxySynced => CameraPattern::StarTracking,
            CameraPattern::StarTracking => CameraPattern::SpiralApproach,
            CameraPattern::SpiralApproach => CameraPattern::ClassicOrbital,
        }
    }
}

fn orbit(angle: f64, radius: f64, height: f64, target: Vec3) -> CameraPose {
    let (s, c) = angle.sin_cos();
    CameraPose::new(
        Vec3::new(target.x + radius * c, target.y + height, target.z + radius * s),
        target,
    )
}

/// Pose of an untracked pattern `elapsed_ms` after it began.
///
/// `StarTracking` has no pose without a star and yields the classic orbit;
/// callers with a star use [`tracking_pose`].
pub fn pattern_pose(
    pattern: CameraPattern,
    physics: &GalaxyPhysics,
    elapsed_ms: f64,
    cycle_ms: f64,
) -> CameraPose {
    let r = physics.galaxy_radius;
    match pattern {
        CameraPattern::ClassicOrbital | CameraPattern::StarTracking => {
            let angle = elapsed_ms * 0.0001;
            let height = r * (0.6 + 0.1 * (elapsed_ms * 0.00005).sin());
            orbit(angle, r * 1.8, height, Vec3::ZERO)
        }
        CameraPattern::GalaxySynced => {
            // Ride along with the spiral pattern.
            let angle = elapsed_ms * 0.001 * physics.pattern_speed * 0.004;
            orbit(angle, r * 1.4, r * 0.45, Vec3::ZERO)
        }
        CameraPattern::SpiralApproach => {
            let u = if cycle_ms > 0.0 {
                (elapsed_ms / cycle_ms).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let radius = r * (2.0 - 1.4 * u);
            let height = r * (0.8 * (1.0 - u) + 0.1);
            orbit(elapsed_ms * 0.0003, radius, height, Vec3::ZERO)
        }
    }
}

/// Desired pose looking at a star from just outside it.
pub fn tracking_pose(star: Vec3) -> CameraPose {
    let flat = Vec3::new(star.x, 0.0, star.z);
    let outward = if flat.length_squared() > 1e-12 {
        flat.normalized()
    } else {
        Vec3::new(1.0, 0.0, 0.0)
    };
    CameraPose::new(star + outward * 14.0 + Vec3::UP * 7.0, star)
}
