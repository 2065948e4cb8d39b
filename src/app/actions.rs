use galaxy_camera::{CameraMode, CameraPattern};
use galaxy_geom::{Ray, Vec3};
use galaxy_sim::{PickHit, pick_random_star, pick_star};

use super::App;
use super::step::camera_context;
use crate::event::GalaxyEvent;

impl App {
    pub fn set_listener(&mut self, listener: Option<super::EventListener>) {
        self.listener = listener;
    }

    /// Latest user-visible status line.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Select the star under `ray`. A miss clears the selection and is
    /// reported through the status line only.
    pub fn click(&mut self, ray: &Ray) -> Option<PickHit> {
        let scene = self.scene.as_ref()?;
        let ctx = scene.context(self.sim.gravity());
        let hit = pick_star(scene, &ctx, self.sim.elapsed(), ray, &self.params.pick);
        match hit {
            Some(h) => {
                self.sim.select(Some(h.index));
                self.queue.emit_now(GalaxyEvent::StarSelected {
                    index: h.index,
                    kind: h.kind,
                    camera_distance: h.camera_distance,
                });
                self.queue.emit_now(GalaxyEvent::StatusMessage {
                    text: format!("Selected star {} ({:.1} away)", h.index, h.camera_distance),
                });
            }
            None => {
                log::info!("pick: no star along ray");
                if self.sim.selected().is_some() {
                    self.sim.select(None);
                    self.queue.emit_now(GalaxyEvent::SelectionCleared);
                }
                self.queue.emit_now(GalaxyEvent::StatusMessage {
                    text: "No star there".to_string(),
                });
            }
        }
        hit
    }

    /// Follow star `index` with the camera. Unknown indices only update the
    /// status line.
    pub fn track(&mut self, index: u32) -> bool {
        let Some(scene) = self.scene.as_ref() else {
            return false;
        };
        if scene.particle(index).is_none() {
            self.queue.emit_now(GalaxyEvent::StatusMessage {
                text: format!("Star {} does not exist", index),
            });
            return false;
        }
        self.sim.select(Some(index));
        self.sim.track(Some(index));
        let ctx = camera_context(scene, &self.sim);
        self.camera.focus_star(index, Some(&ctx));
        self.queue.emit_now(GalaxyEvent::StarTracked { index });
        true
    }

    pub fn track_selected(&mut self) -> bool {
        match self.sim.selected() {
            Some(index) => self.track(index),
            None => {
                self.queue.emit_now(GalaxyEvent::StatusMessage {
                    text: "Select a star first".to_string(),
                });
                false
            }
        }
    }

    /// Pick a well-placed star near the camera and start tracking it.
    pub fn track_random_star(&mut self) -> Option<u32> {
        let scene = self.scene.as_ref()?;
        let from = self.camera.pose().map_or(Vec3::ZERO, |p| p.position);
        let ctx = scene.context(self.sim.gravity());
        let Some(pick) = pick_random_star(scene, &ctx, self.sim.elapsed(), from, &mut self.rng)
        else {
            self.queue.emit_now(GalaxyEvent::StatusMessage {
                text: "No visible star to track".to_string(),
            });
            return None;
        };
        self.track(pick.index).then_some(pick.index)
    }

    pub fn stop_tracking(&mut self) {
        if self.sim.tracked().is_none() {
            return;
        }
        self.sim.track(None);
        let following = self.camera.mode() == CameraMode::Automatic
            && self.camera.pattern() == CameraPattern::StarTracking;
        if let (Some(scene), true) = (self.scene.as_ref(), following) {
            let ctx = camera_context(scene, &self.sim);
            self.camera
                .set_pattern(CameraPattern::ClassicOrbital, Some(&ctx));
        }
        self.queue.emit_now(GalaxyEvent::TrackingStopped);
    }

    pub fn toggle_gravity(&mut self) -> bool {
        let enabled = !self.sim.gravity().enabled;
        self.sim.set_gravity_enabled(enabled);
        self.params.gravity.enabled = enabled;
        self.queue.emit_now(GalaxyEvent::GravityToggled { enabled });
        self.queue.emit_now(GalaxyEvent::StatusMessage {
            text: format!("Gravity {}", if enabled { "on" } else { "off" }),
        });
        enabled
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let ctx = camera_context(scene, &self.sim);
        self.camera.set_mode(mode, Some(&ctx));
    }

    /// Pointer drag in pixels; only moves the camera in manual mode.
    pub fn pointer_drag(&mut self, dx: f64, dy: f64) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let ctx = camera_context(scene, &self.sim);
        self.camera.manual_rotate(dx, dy, Some(&ctx));
    }

    pub fn zoom(&mut self, steps: f64) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let ctx = camera_context(scene, &self.sim);
        self.camera.manual_zoom(steps, Some(&ctx));
    }
}
