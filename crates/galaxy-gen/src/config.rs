use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GalaxyGenConfig {
    #[serde(default)]
    pub particles: Particles,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub black_holes: BlackHoles,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Particles {
    #[serde(default = "default_min_count")]
    pub min_count: u32,
    #[serde(default = "default_max_count")]
    pub max_count: u32,
    #[serde(default = "default_bulge_fraction")]
    pub bulge_fraction: f64,
    #[serde(default = "default_halo_fraction")]
    pub halo_fraction: f64,
}
fn default_min_count() -> u32 {
    10_000
}
fn default_max_count() -> u32 {
    20_000
}
fn default_bulge_fraction() -> f64 {
    0.15
}
fn default_halo_fraction() -> f64 {
    0.15
}
impl Default for Particles {
    fn default() -> Self {
        Self {
            min_count: default_min_count(),
            max_count: default_max_count(),
            bulge_fraction: default_bulge_fraction(),
            halo_fraction: default_halo_fraction(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Placement {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_young_arm_threshold")]
    pub young_arm_threshold: f64,
    /// Keep-out distance around a black hole, in multiples of its radius.
    #[serde(default = "default_clearance")]
    pub black_hole_clearance: f64,
}
fn default_max_attempts() -> u32 {
    10
}
fn default_young_arm_threshold() -> f64 {
    1.3
}
fn default_clearance() -> f64 {
    2.0
}
impl Default for Placement {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            young_arm_threshold: default_young_arm_threshold(),
            black_hole_clearance: default_clearance(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlackHoles {
    #[serde(default = "default_central_early")]
    pub central_chance_early: f64,
    #[serde(default = "default_central_late")]
    pub central_chance_late: f64,
    #[serde(default = "default_stellar_chance")]
    pub stellar_chance: f64,
    #[serde(default = "default_stellar_min")]
    pub stellar_min: u32,
    #[serde(default = "default_stellar_max")]
    pub stellar_max: u32,
    #[serde(default = "default_stellar_density")]
    pub stellar_density_threshold: f64,
    #[serde(default = "default_stellar_attempts")]
    pub stellar_max_attempts: u32,
}
fn default_central_early() -> f64 {
    0.9
}
fn default_central_late() -> f64 {
    0.6
}
fn default_stellar_chance() -> f64 {
    0.4
}
fn default_stellar_min() -> u32 {
    2
}
fn default_stellar_max() -> u32 {
    5
}
fn default_stellar_density() -> f64 {
    1.3
}
fn default_stellar_attempts() -> u32 {
    10
}
impl Default for BlackHoles {
    fn default() -> Self {
        Self {
            central_chance_early: default_central_early(),
            central_chance_late: default_central_late(),
            stellar_chance: default_stellar_chance(),
            stellar_min: default_stellar_min(),
            stellar_max: default_stellar_max(),
            stellar_density_threshold: default_stellar_density(),
            stellar_max_attempts: default_stellar_attempts(),
        }
    }
}

// Flattened params used by the generator (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyGenParams {
    pub min_particles: u32,
    pub max_particles: u32,
    pub bulge_fraction: f64,
    pub halo_fraction: f64,
    pub max_attempts: u32,
    pub young_arm_threshold: f64,
    pub black_hole_clearance: f64,
    pub central_chance_early: f64,
    pub central_chance_late: f64,
    pub stellar_chance: f64,
    pub stellar_min: u32,
    pub stellar_max: u32,
    pub stellar_density_threshold: f64,
    pub stellar_max_attempts: u32,
}

impl GalaxyGenParams {
    pub fn from_config(cfg: &GalaxyGenConfig) -> Self {
        let min_particles = cfg.particles.min_count.max(1);
        let stellar_min = cfg.black_holes.stellar_min;
        Self {
            min_particles,
            max_particles: cfg.particles.max_count.max(min_particles),
            bulge_fraction: cfg.particles.bulge_fraction.clamp(0.0, 1.0),
            halo_fraction: cfg.particles.halo_fraction.clamp(0.0, 1.0),
            max_attempts: cfg.placement.max_attempts.max(1),
            young_arm_threshold: cfg.placement.young_arm_threshold,
            black_hole_clearance: cfg.placement.black_hole_clearance,
            central_chance_early: cfg.black_holes.central_chance_early,
            central_chance_late: cfg.black_holes.central_chance_late,
            stellar_chance: cfg.black_holes.stellar_chance,
            stellar_min,
            stellar_max: cfg.black_holes.stellar_max.max(stellar_min),
            stellar_density_threshold: cfg.black_holes.stellar_density_threshold,
            stellar_max_attempts: cfg.black_holes.stellar_max_attempts.max(1),
        }
    }

    /// Same pipeline with a fixed particle count; handy for tools and tests.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.min_particles = count.max(1);
        self.max_particles = self.min_particles;
        self
    }
}

impl Default for GalaxyGenParams {
    fn default() -> Self {
        Self::from_config(&GalaxyGenConfig::default())
    }
}

pub fn params_from_toml_str(s: &str) -> Result<GalaxyGenParams, Box<dyn Error>> {
    let cfg: GalaxyGenConfig = toml::from_str(s)?;
    Ok(GalaxyGenParams::from_config(&cfg))
}

pub fn load_params_from_path(path: &Path) -> Result<GalaxyGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    params_from_toml_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let p = params_from_toml_str("").unwrap();
        assert_eq!(p, GalaxyGenParams::default());
        assert_eq!(p.min_particles, 10_000);
        assert_eq!(p.max_particles, 20_000);
        assert_eq!(p.max_attempts, 10);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let p = params_from_toml_str(
            r#"
            [particles]
            max_count = 500
            min_count = 200

            [black_holes]
            stellar_chance = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(p.min_particles, 200);
        assert_eq!(p.max_particles, 500);
        assert_eq!(p.stellar_chance, 1.0);
        assert_eq!(p.stellar_max, 5);
        assert_eq!(p.young_arm_threshold, 1.3);
    }

    #[test]
    fn inverted_ranges_are_repaired() {
        let p = params_from_toml_str("[particles]\nmin_count = 50\nmax_count = 10\n").unwrap();
        assert_eq!((p.min_particles, p.max_particles), (50, 50));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(params_from_toml_str("[particles\nmin_count = ").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("galaxy.toml");
        fs::write(&path, "[placement]\nmax_attempts = 3\n").unwrap();
        assert_eq!(load_params_from_path(&path).unwrap().max_attempts, 3);
        assert!(load_params_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
