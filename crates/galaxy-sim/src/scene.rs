use galaxy_gen::{BlackHole, GalaxyPhysics, GalaxyType, GeneratedGalaxy, Particle};
use galaxy_geom::Vec3;
use hashbrown::HashMap;

use crate::appearance::{Appearance, live_appearance};
use crate::evolve::{EvolveContext, GravitySettings};

/// The immutable particle set of one galaxy plus an index → slot lookup.
pub struct GalaxyScene {
    pub seed: String,
    pub galaxy_type: GalaxyType,
    pub physics: GalaxyPhysics,
    particles: Vec<Particle>,
    black_holes: Vec<BlackHole>,
    slots: HashMap<u32, usize>,
}

impl GalaxyScene {
    pub fn new(galaxy: GeneratedGalaxy) -> Self {
        Self::from_parts(
            galaxy.seed,
            galaxy.galaxy_type,
            galaxy.physics,
            galaxy.particles,
            galaxy.black_holes,
        )
    }

    pub fn from_parts(
        seed: String,
        galaxy_type: GalaxyType,
        physics: GalaxyPhysics,
        particles: Vec<Particle>,
        black_holes: Vec<BlackHole>,
    ) -> Self {
        let slots = particles
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.index, slot))
            .collect();
        Self {
            seed,
            galaxy_type,
            physics,
            particles,
            black_holes,
            slots,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn black_holes(&self) -> &[BlackHole] {
        &self.black_holes
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Array slot of the star with stable identity `index`.
    pub fn slot_of(&self, index: u32) -> Option<usize> {
        self.slots.get(&index).copied()
    }

    pub fn particle(&self, index: u32) -> Option<&Particle> {
        self.slot_of(index).and_then(|s| self.particles.get(s))
    }

    pub fn context(&self, gravity: GravitySettings) -> EvolveContext<'_> {
        EvolveContext {
            physics: &self.physics,
            black_holes: &self.black_holes,
            gravity,
        }
    }
}

/// Mutable per-frame simulation state, owned by the frame loop and passed by
/// reference to every consumer.
pub struct SimState {
    elapsed: f64,
    pub time_scale: f64,
    pub paused: bool,
    gravity: GravitySettings,
    selected: Option<u32>,
    tracked: Option<u32>,
    positions: Vec<Vec3>,
    appearances: Vec<Appearance>,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(GravitySettings::default())
    }
}

impl SimState {
    pub fn new(gravity: GravitySettings) -> Self {
        Self {
            elapsed: 0.0,
            time_scale: 1.0,
            paused: false,
            gravity,
            selected: None,
            tracked: None,
            positions: Vec::new(),
            appearances: Vec::new(),
        }
    }

    /// Seconds of simulated time since the galaxy was loaded.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn gravity(&self) -> GravitySettings {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: GravitySettings) {
        self.gravity = gravity;
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity.enabled = enabled;
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn select(&mut self, index: Option<u32>) {
        self.selected = index;
    }

    pub fn tracked(&self) -> Option<u32> {
        self.tracked
    }

    pub fn track(&mut self, index: Option<u32>) {
        self.tracked = index;
    }

    /// Star the camera should follow: the tracked one, else the latest selection.
    pub fn focus_star(&self) -> Option<u32> {
        self.tracked.or(self.selected)
    }

    /// Forget per-galaxy state after a new galaxy replaces the old one.
    pub fn reset_for(&mut self, scene: &GalaxyScene) {
        self.elapsed = 0.0;
        self.selected = None;
        self.tracked = None;
        self.refresh(scene);
    }

    /// Advance simulated time by `dt` wall seconds and recompute every live
    /// position.
    pub fn advance(&mut self, scene: &GalaxyScene, dt: f64) {
        if !self.paused {
            self.elapsed += dt * self.time_scale;
        }
        self.refresh(scene);
    }

    /// Recompute live positions and appearance at the current elapsed time.
    pub fn refresh(&mut self, scene: &GalaxyScene) {
        let ctx = scene.context(self.gravity);
        let t = self.elapsed;
        self.positions.clear();
        self.appearances.clear();
        for p in scene.particles() {
            let pos = ctx.position(p, t);
            self.positions.push(pos);
            self.appearances.push(live_appearance(p, &scene.physics, pos, t));
        }
    }

    /// Live positions in particle slot order, as handed to the renderer.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn appearances(&self) -> &[Appearance] {
        &self.appearances
    }

    /// Freshly evaluated position of star `index` at the current time.
    pub fn position_of(&self, scene: &GalaxyScene, index: u32) -> Option<Vec3> {
        let p = scene.particle(index)?;
        Some(scene.context(self.gravity).position(p, self.elapsed))
    }
}
