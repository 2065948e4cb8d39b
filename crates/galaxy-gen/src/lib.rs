//! Seeded procedural spiral-galaxy structure: RNG, rotation curves, density waves and the generator.
#![forbid(unsafe_code)]

pub mod config;
pub mod curve;
pub mod density;
pub mod generator;
pub mod rng;
pub mod types;

pub use config::{GalaxyGenConfig, GalaxyGenParams, load_params_from_path, params_from_toml_str};
pub use curve::{evolution_rotation_speed, rotation_speed};
pub use density::{bar_density, combined_density, density};
pub use generator::{GeneratedGalaxy, generate, generate_with};
pub use rng::SeededRandom;
pub use types::{
    BarParams, BlackHole, GalaxyPhysics, GalaxyType, Oscillation, Particle, StellarType,
};
