//! Camera state machine: eased and damped transitions, automatic patterns, manual orbit.
#![forbid(unsafe_code)]

pub mod engine;
pub mod input;
pub mod motion;
pub mod pattern;

pub use engine::{
    CameraContext, CameraEngine, CameraEvent, CameraMode, CameraSettings, CameraState, Goal,
    MotionStyle,
};
pub use input::InputSmoother;
pub use motion::{CameraPose, ease_out_quint, motion_smooth_time, smooth_damp};
pub use pattern::{CameraPattern, pattern_pose, tracking_pose};
