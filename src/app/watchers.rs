use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use super::App;
use crate::event::GalaxyEvent;

/// Watch `path` on a background thread; every change sends a `()`.
pub fn spawn_config_watcher(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_)
                    | EventKind::Create(_)
                    | EventKind::Remove(_)
                    | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                log::warn!("config watcher unavailable: {}", e);
                return;
            }
        };
        if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
            log::warn!("cannot watch {}: {}", path.display(), e);
            return;
        }
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}

impl App {
    /// Reload from `path` whenever `rx` yields.
    pub fn set_config_channel(&mut self, path: PathBuf, rx: Receiver<()>) {
        self.config_path = Some(path);
        self.config_event_rx = Some(rx);
    }

    pub fn process_config_file_events(&mut self) {
        let Some(rx) = self.config_event_rx.as_ref() else {
            return;
        };
        let mut changed = false;
        for _ in rx.try_iter() {
            changed = true;
        }
        if !changed {
            return;
        }
        let Some(path) = self.config_path.clone() else {
            return;
        };
        if !path.exists() {
            log::warn!("sim config missing: {}", path.display());
            return;
        }
        match crate::config::load_params_from_path(&path) {
            Ok(params) => {
                let was_enabled = self.params.gravity.enabled;
                self.sim.set_gravity(params.gravity);
                self.sim.time_scale = params.time_scale;
                self.camera.set_settings(params.camera);
                if params.gravity.enabled != was_enabled {
                    self.queue.emit_now(GalaxyEvent::GravityToggled {
                        enabled: params.gravity.enabled,
                    });
                }
                self.params = params;
                log::info!("sim config reloaded from {}", path.display());
            }
            Err(e) => {
                log::warn!("sim config reload failed ({}): {}", path.display(), e);
            }
        }
    }
}
