use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use galaxy_camera::CameraEngine;
use galaxy_gen::{GalaxyGenParams, SeededRandom};
use galaxy_sim::{GalaxyScene, SimState};
use hashbrown::HashMap;

use crate::config::SimParams;
use crate::event::{EventQueue, GalaxyEvent};
use crate::material::StarMaterial;

/// Optional observer for the integration events.
pub type EventListener = Box<dyn FnMut(&GalaxyEvent)>;

/// Single owner of all per-frame state. Nothing here is global; the frame
/// loop passes pieces of it by reference to the simulation and camera.
pub struct App {
    pub scene: Option<GalaxyScene>,
    pub sim: SimState,
    pub camera: CameraEngine,
    pub queue: EventQueue,
    pub params: SimParams,
    pub gen_params: GalaxyGenParams,
    pub material: StarMaterial,
    pub debug_stats: DebugStats,
    pub(crate) status: Option<String>,
    pub(crate) rng: SeededRandom,
    pub(crate) listener: Option<EventListener>,
    pub(crate) evt_processed_total: usize,
    pub(crate) evt_processed_by: HashMap<&'static str, usize>,
    pub(crate) config_event_rx: Option<Receiver<()>>,
    pub(crate) config_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct DebugStats {
    pub frames: u64,
    pub events_processed: usize,
    pub events_by: Vec<(&'static str, usize)>,
    pub queued_events: usize,
}
