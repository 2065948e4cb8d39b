use galaxy_camera::{CameraContext, CameraEvent};
use galaxy_sim::{GalaxyScene, SimState};

use super::App;
use crate::event::GalaxyEvent;

/// Camera view of the frame: same scene, gravity and time the renderer used.
pub(crate) fn camera_context<'a>(scene: &'a GalaxyScene, sim: &SimState) -> CameraContext<'a> {
    CameraContext::new(
        scene,
        scene.context(sim.gravity()),
        sim.elapsed(),
        sim.focus_star(),
    )
}

impl App {
    /// One frame: reload config if it changed, advance every star, advance
    /// the camera against the same positions, then drain this tick's events.
    pub fn step(&mut self, dt: f64) {
        self.process_config_file_events();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if let Some(scene) = self.scene.as_ref() {
            self.sim.advance(scene, dt);
            let ctx = camera_context(scene, &self.sim);
            self.camera.advance(dt * 1000.0, Some(&ctx));
        }
        self.forward_camera_events();

        while let Some(env) = self.queue.pop_ready() {
            self.evt_processed_total = self.evt_processed_total.saturating_add(1);
            *self.evt_processed_by.entry(env.kind.label()).or_insert(0) += 1;
            self.handle_event(env);
        }

        self.debug_stats.frames += 1;
        self.debug_stats.events_processed = self.evt_processed_total;
        let mut by: Vec<(&'static str, usize)> =
            self.evt_processed_by.iter().map(|(k, v)| (*k, *v)).collect();
        by.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        self.debug_stats.events_by = by;
        self.debug_stats.queued_events = self.queue.pending();

        self.queue.advance_tick();
        let stale = self.queue.count_stale_events();
        if stale > 0 {
            log::warn!("{} event(s) left in past ticks will never be processed", stale);
        }
    }

    fn forward_camera_events(&mut self) {
        for ev in self.camera.drain_events() {
            let out = match ev {
                CameraEvent::ModeChanged(mode) => GalaxyEvent::CameraModeChanged { mode },
                CameraEvent::PatternChanged(pattern) => {
                    GalaxyEvent::CameraPatternChanged { pattern }
                }
                CameraEvent::TransitionStarted { duration_ms } => {
                    GalaxyEvent::CameraTransitionStarted { duration_ms }
                }
                CameraEvent::TransitionQueued => GalaxyEvent::CameraTransitionQueued,
                CameraEvent::TransitionCompleted => GalaxyEvent::CameraTransitionCompleted,
                CameraEvent::TrackingLost { index } => GalaxyEvent::TrackingLost { index },
            };
            let lost = matches!(out, GalaxyEvent::TrackingLost { .. });
            self.queue.emit_now(out);
            if lost {
                self.sim.track(None);
                self.queue.emit_now(GalaxyEvent::StatusMessage {
                    text: "Tracked star unavailable; returning to orbit".to_string(),
                });
            }
        }
    }
}
