//! Live galaxy state: shared position evolution, appearance, picking.
#![forbid(unsafe_code)]

pub mod appearance;
pub mod evolve;
pub mod picker;
pub mod scene;

pub use appearance::{Appearance, live_appearance, pattern_angle};
pub use evolve::{EvolveContext, GravitySettings, evolve_position};
pub use picker::{
    PickHit, PickKind, PickSettings, RandomPick, VISIBILITY_TIERS, pick_random_star, pick_star,
};
pub use scene::{GalaxyScene, SimState};
