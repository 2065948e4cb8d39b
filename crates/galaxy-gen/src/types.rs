use galaxy_geom::Vec3;
use serde::{Deserialize, Serialize};

/// Hubble class of a spiral galaxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GalaxyType {
    Sa,
    Sb,
    Sc,
    SBa,
    SBb,
    SBc,
}

impl GalaxyType {
    pub const ALL: [GalaxyType; 6] = [
        GalaxyType::Sa,
        GalaxyType::Sb,
        GalaxyType::Sc,
        GalaxyType::SBa,
        GalaxyType::SBb,
        GalaxyType::SBc,
    ];

    pub fn is_barred(self) -> bool {
        matches!(self, GalaxyType::SBa | GalaxyType::SBb | GalaxyType::SBc)
    }

    /// Sa/SBa: large bulge, tightly wound arms.
    pub fn is_early_type(self) -> bool {
        matches!(self, GalaxyType::Sa | GalaxyType::SBa)
    }

    /// Multiplier on the sampled arm pitch (tight for a, open for c).
    pub fn pitch_factor(self) -> f64 {
        match self {
            GalaxyType::Sa | GalaxyType::SBa => 0.8,
            GalaxyType::Sb | GalaxyType::SBb => 1.0,
            GalaxyType::Sc | GalaxyType::SBc => 1.2,
        }
    }

    /// Multiplier on the bulge scale length.
    pub fn bulge_factor(self) -> f64 {
        match self {
            GalaxyType::Sa | GalaxyType::SBa => 1.4,
            GalaxyType::Sb | GalaxyType::SBb => 1.0,
            GalaxyType::Sc | GalaxyType::SBc => 0.7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GalaxyType::Sa => "Sa",
            GalaxyType::Sb => "Sb",
            GalaxyType::Sc => "Sc",
            GalaxyType::SBa => "SBa",
            GalaxyType::SBb => "SBb",
            GalaxyType::SBc => "SBc",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarParams {
    pub length: f64,
    pub width: f64,
    pub angle: f64,
    pub strength: f64,
}

/// Per-galaxy physics. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalaxyPhysics {
    pub pattern_speed: f64,
    pub arm_pitch: f64,
    pub arm_count: u32,
    pub arm_strength: f64,
    pub max_rotation_speed: f64,
    pub galaxy_radius: f64,
    #[serde(default, rename = "barParams", skip_serializing_if = "Option::is_none")]
    pub bar: Option<BarParams>,
}

impl GalaxyPhysics {
    /// Core radius used by the generation-time rotation curve.
    pub fn core_radius(&self) -> f64 {
        self.galaxy_radius * 0.15
    }

    /// Start of the flat plateau for the generation-time rotation curve.
    pub fn flat_radius(&self) -> f64 {
        self.galaxy_radius * 0.6
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StellarType {
    Bulge,
    Disk,
    YoungArm,
    Halo,
}

impl StellarType {
    /// Back-to-front draw layer.
    pub fn layer(self) -> u8 {
        match self {
            StellarType::Bulge => 0,
            StellarType::Disk => 1,
            StellarType::YoungArm => 2,
            StellarType::Halo => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
}

/// Immutable base record of one star. The live position is never stored;
/// it is recomputed from `position` and elapsed time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
    /// Position at `t = 0`.
    pub position: Vec3,
    pub velocity: Vec3,
    pub oscillation: Oscillation,
    pub mass: f64,
    pub stellar_type: StellarType,
    /// Density enhancement at creation; drives initial colour and brightness.
    pub arm_density: f64,
    pub color: [f64; 3],
    pub size: f64,
    pub brightness: f64,
    /// Stable identity, independent of array order.
    pub index: u32,
}

/// Lower bound on the mass of the central supermassive hole.
pub const SUPERMASSIVE_MIN_MASS: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackHole {
    pub position: Vec3,
    pub mass: f64,
    pub radius: f64,
    pub influence_radius: f64,
    pub index: u32,
}

impl BlackHole {
    /// The central hole is told apart by convention (index 0 and a
    /// supermassive mass), not by a type tag on the wire.
    pub fn is_central(&self) -> bool {
        self.index == 0 && self.mass >= SUPERMASSIVE_MIN_MASS
    }
}
