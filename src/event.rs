use std::collections::{BTreeMap, VecDeque};

use galaxy_camera::{CameraMode, CameraPattern};
use galaxy_sim::PickKind;

/// Integration points for surrounding UI code. Emitted by the app, drained
/// once per tick and handed to the optional listener.
#[derive(Clone, Debug, PartialEq)]
pub enum GalaxyEvent {
    GalaxyLoaded {
        seed: String,
        particles: usize,
        black_holes: usize,
    },
    GalaxyLoadFailed {
        reason: String,
    },
    StarSelected {
        index: u32,
        kind: PickKind,
        camera_distance: f64,
    },
    SelectionCleared,
    StarTracked {
        index: u32,
    },
    TrackingStopped,
    CameraModeChanged {
        mode: CameraMode,
    },
    CameraPatternChanged {
        pattern: CameraPattern,
    },
    CameraTransitionStarted {
        duration_ms: f64,
    },
    CameraTransitionQueued,
    CameraTransitionCompleted,
    TrackingLost {
        index: Option<u32>,
    },
    GravityToggled {
        enabled: bool,
    },
    StatusMessage {
        text: String,
    },
}

impl GalaxyEvent {
    pub fn label(&self) -> &'static str {
        match self {
            GalaxyEvent::GalaxyLoaded { .. } => "GalaxyLoaded",
            GalaxyEvent::GalaxyLoadFailed { .. } => "GalaxyLoadFailed",
            GalaxyEvent::StarSelected { .. } => "StarSelected",
            GalaxyEvent::SelectionCleared => "SelectionCleared",
            GalaxyEvent::StarTracked { .. } => "StarTracked",
            GalaxyEvent::TrackingStopped => "TrackingStopped",
            GalaxyEvent::CameraModeChanged { .. } => "CameraModeChanged",
            GalaxyEvent::CameraPatternChanged { .. } => "CameraPatternChanged",
            GalaxyEvent::CameraTransitionStarted { .. } => "CameraTransitionStarted",
            GalaxyEvent::CameraTransitionQueued => "CameraTransitionQueued",
            GalaxyEvent::CameraTransitionCompleted => "CameraTransitionCompleted",
            GalaxyEvent::TrackingLost { .. } => "TrackingLost",
            GalaxyEvent::GravityToggled { .. } => "GravityToggled",
            GalaxyEvent::StatusMessage { .. } => "StatusMessage",
        }
    }
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: GalaxyEvent,
}

pub struct EventQueue {
    // map of tick -> FIFO queue of events
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: GalaxyEvent) -> u64 {
        let id = self.alloc_id();
        let env = EventEnvelope {
            id,
            tick: self.now,
            kind,
        };
        self.by_tick.entry(self.now).or_default().push_back(env);
        id
    }

    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        self.by_tick
            .get_mut(&self.now)
            .and_then(|q| q.pop_front())
    }

    pub fn pending(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }

    pub fn advance_tick(&mut self) {
        if self.by_tick.get(&self.now).is_some_and(VecDeque::is_empty) {
            self.by_tick.remove(&self.now);
        }
        self.now = self.now.wrapping_add(1);
    }

    /// Events left behind in ticks that have already been drained.
    pub fn count_stale_events(&self) -> usize {
        self.by_tick
            .range(..self.now)
            .map(|(_, q)| q.len())
            .sum()
    }
}
