use super::App;
use crate::event::{EventEnvelope, GalaxyEvent};

impl App {
    pub(super) fn handle_event(&mut self, env: EventEnvelope) {
        Self::log_event(env.tick, &env.kind);
        if let GalaxyEvent::StatusMessage { text } = &env.kind {
            self.status = Some(text.clone());
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(&env.kind);
        }
    }

    fn log_event(tick: u64, ev: &GalaxyEvent) {
        use crate::event::GalaxyEvent as E;
        match ev {
            E::GalaxyLoaded {
                seed,
                particles,
                black_holes,
            } => {
                log::info!(
                    target: "events",
                    "[tick {}] GalaxyLoaded seed={:?} particles={} black_holes={}",
                    tick,
                    seed,
                    particles,
                    black_holes
                );
            }
            E::GalaxyLoadFailed { reason } => {
                log::info!(target: "events", "[tick {}] GalaxyLoadFailed reason={}", tick, reason);
            }
            E::StarSelected {
                index,
                kind,
                camera_distance,
            } => {
                log::info!(
                    target: "events",
                    "[tick {}] StarSelected index={} kind={:?} dist={:.1}",
                    tick,
                    index,
                    kind,
                    camera_distance
                );
            }
            E::SelectionCleared => {
                log::info!(target: "events", "[tick {}] SelectionCleared", tick);
            }
            E::StarTracked { index } => {
                log::info!(target: "events", "[tick {}] StarTracked index={}", tick, index);
            }
            E::TrackingStopped => {
                log::info!(target: "events", "[tick {}] TrackingStopped", tick);
            }
            E::CameraModeChanged { mode } => {
                log::info!(target: "events", "[tick {}] CameraModeChanged mode={:?}", tick, mode);
            }
            E::CameraPatternChanged { pattern } => {
                log::info!(
                    target: "events",
                    "[tick {}] CameraPatternChanged pattern={}",
                    tick,
                    pattern.name()
                );
            }
            E::CameraTransitionStarted { duration_ms } => {
                log::debug!(
                    target: "events",
                    "[tick {}] CameraTransitionStarted duration_ms={:.0}",
                    tick,
                    duration_ms
                );
            }
            E::CameraTransitionQueued => {
                log::debug!(target: "events", "[tick {}] CameraTransitionQueued", tick);
            }
            E::CameraTransitionCompleted => {
                log::trace!(target: "events", "[tick {}] CameraTransitionCompleted", tick);
            }
            E::TrackingLost { index } => {
                log::info!(target: "events", "[tick {}] TrackingLost index={:?}", tick, index);
            }
            E::GravityToggled { enabled } => {
                log::info!(target: "events", "[tick {}] GravityToggled enabled={}", tick, enabled);
            }
            E::StatusMessage { text } => {
                log::trace!(target: "events", "[tick {}] StatusMessage {:?}", tick, text);
            }
        }
    }
}
