mod actions;
mod events;
mod init;
mod state;
mod step;
mod watchers;


pub use state::{App, DebugStats, EventListener};
