use std::path::PathBuf;

use galaxy_camera::{CameraEngine, CameraPattern, CameraPose};
use galaxy_gen::{GalaxyGenParams, SeededRandom};
use galaxy_geom::Vec3;
use galaxy_io::GalaxySource;
use galaxy_sim::{GalaxyScene, SimState};
use hashbrown::HashMap;

use super::step::camera_context;
use super::watchers::spawn_config_watcher;
use super::{App, DebugStats};
use crate::config::SimParams;
use crate::event::{EventQueue, GalaxyEvent};
use crate::material::{MaterialBackend, init_star_material};

impl App {
    pub fn new(
        params: SimParams,
        gen_params: GalaxyGenParams,
        backend: &mut dyn MaterialBackend,
    ) -> Self {
        let material = init_star_material(backend);
        log::info!("star material: {} ({})", material.tier.as_str(), material.label);
        let mut sim = SimState::new(params.gravity);
        sim.time_scale = params.time_scale;
        let camera = CameraEngine::new(params.camera);
        Self {
            scene: None,
            sim,
            camera,
            queue: EventQueue::new(),
            params,
            gen_params,
            material,
            debug_stats: DebugStats::default(),
            status: None,
            rng: SeededRandom::new("random-star"),
            listener: None,
            evt_processed_total: 0,
            evt_processed_by: HashMap::new(),
            config_event_rx: None,
            config_path: None,
        }
    }

    /// Reload the sim config whenever `path` changes on disk.
    pub fn watch_config(&mut self, path: PathBuf) {
        let rx = spawn_config_watcher(path.clone());
        self.set_config_channel(path, rx);
    }

    /// Replace the current galaxy. On failure the old galaxy (if any) stays
    /// up and the reason becomes the status message.
    pub fn load(&mut self, source: &GalaxySource) -> bool {
        let galaxy = match source.load(&self.gen_params) {
            Ok(g) => g,
            Err(e) => {
                log::warn!("galaxy load from {} failed: {}", source.describe(), e);
                self.queue.emit_now(GalaxyEvent::GalaxyLoadFailed {
                    reason: e.to_string(),
                });
                self.queue.emit_now(GalaxyEvent::StatusMessage {
                    text: format!("Could not load galaxy ({})", e),
                });
                return false;
            }
        };
        let seed = galaxy.seed.clone();
        let scene = GalaxyScene::new(galaxy);
        self.sim.reset_for(&scene);
        self.rng = SeededRandom::new(&format!("{}/random-star", seed));

        // A new galaxy cancels whatever the camera was doing.
        let pose = self.camera.pose().unwrap_or_else(|| default_pose(&scene));
        self.camera.detach();
        self.camera.attach(pose);

        let (particles, black_holes) = (scene.len(), scene.black_holes().len());
        let galaxy_type = scene.galaxy_type.as_str();
        let scene = self.scene.insert(scene);
        let ctx = camera_context(scene, &self.sim);
        self.camera.set_pattern(CameraPattern::ClassicOrbital, Some(&ctx));

        self.queue.emit_now(GalaxyEvent::GalaxyLoaded {
            seed: seed.clone(),
            particles,
            black_holes,
        });
        self.queue.emit_now(GalaxyEvent::StatusMessage {
            text: format!(
                "Galaxy {:?}: type {}, {} stars, {} black holes",
                seed, galaxy_type, particles, black_holes
            ),
        });
        true
    }
}

/// Starting viewpoint: above and in front of the disk.
pub(crate) fn default_pose(scene: &GalaxyScene) -> CameraPose {
    let r = scene.physics.galaxy_radius;
    CameraPose::new(Vec3::new(0.0, r * 0.8, r * 2.0), Vec3::ZERO)
}
