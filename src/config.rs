use std::error::Error;
use std::fs;
use std::path::Path;

use galaxy_camera::CameraSettings;
use galaxy_sim::{GravitySettings, PickSettings};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub gravity: Gravity,
    #[serde(default)]
    pub time: Time,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub picker: Picker,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Gravity {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_gravity_strength")]
    pub strength: f64,
    #[serde(default = "default_influence_radius")]
    pub influence_radius: f64,
}
fn default_gravity_strength() -> f64 {
    1.0
}
fn default_influence_radius() -> f64 {
    20.0
}
impl Default for Gravity {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: default_gravity_strength(),
            influence_radius: default_influence_radius(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Time {
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
}
fn default_time_scale() -> f64 {
    1.0
}
impl Default for Time {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Camera {
    #[serde(default = "default_pattern_duration_ms")]
    pub pattern_duration_ms: f64,
    #[serde(default = "default_pattern_transition_ms")]
    pub pattern_transition_ms: f64,
    #[serde(default = "default_focus_transition_ms")]
    pub focus_transition_ms: f64,
    #[serde(default = "default_tracking_smooth_time")]
    pub tracking_smooth_time: f64,
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
}
fn default_pattern_duration_ms() -> f64 {
    20_000.0
}
fn default_pattern_transition_ms() -> f64 {
    3_000.0
}
fn default_focus_transition_ms() -> f64 {
    1_500.0
}
fn default_tracking_smooth_time() -> f64 {
    0.12
}
fn default_max_speed() -> f64 {
    400.0
}
impl Default for Camera {
    fn default() -> Self {
        Self {
            pattern_duration_ms: default_pattern_duration_ms(),
            pattern_transition_ms: default_pattern_transition_ms(),
            focus_transition_ms: default_focus_transition_ms(),
            tracking_smooth_time: default_tracking_smooth_time(),
            max_speed: default_max_speed(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Picker {
    #[serde(default = "default_min_size")]
    pub min_size: f64,
    #[serde(default = "default_min_brightness")]
    pub min_brightness: f64,
    #[serde(default = "default_near_miss")]
    pub near_miss_distance: f64,
}
fn default_min_size() -> f64 {
    0.3
}
fn default_min_brightness() -> f64 {
    0.1
}
fn default_near_miss() -> f64 {
    5.0
}
impl Default for Picker {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            min_brightness: default_min_brightness(),
            near_miss_distance: default_near_miss(),
        }
    }
}

// Flattened params used by the frame loop (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    pub gravity: GravitySettings,
    pub time_scale: f64,
    pub camera: CameraSettings,
    pub pick: PickSettings,
}

impl SimParams {
    pub fn from_config(cfg: &SimConfig) -> Self {
        let camera = CameraSettings {
            pattern_duration_ms: cfg.camera.pattern_duration_ms.max(1.0),
            pattern_transition_ms: cfg.camera.pattern_transition_ms.max(0.0),
            focus_transition_ms: cfg.camera.focus_transition_ms.max(0.0),
            tracking_smooth_time: cfg.camera.tracking_smooth_time.max(1e-3),
            max_speed: cfg.camera.max_speed.max(1.0),
            ..CameraSettings::default()
        };
        Self {
            gravity: GravitySettings {
                enabled: cfg.gravity.enabled,
                strength: cfg.gravity.strength,
                influence_radius: cfg.gravity.influence_radius.max(0.0),
            },
            time_scale: cfg.time.time_scale.max(0.0),
            camera,
            pick: PickSettings {
                min_size: cfg.picker.min_size,
                min_brightness: cfg.picker.min_brightness,
                near_miss_distance: cfg.picker.near_miss_distance.max(0.0),
            },
        }
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

pub fn params_from_toml_str(s: &str) -> Result<SimParams, Box<dyn Error>> {
    let cfg: SimConfig = toml::from_str(s)?;
    Ok(SimParams::from_config(&cfg))
}

pub fn load_params_from_path(path: &Path) -> Result<SimParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    params_from_toml_str(&s)
}
