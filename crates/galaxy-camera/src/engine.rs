//! The camera transition engine.
//!
//! One owner advances it once per tick with the same [`CameraContext`] the
//! renderer and picker see. Every operation is a no-op while there is no
//! camera pose attached or no scene in the context.

use galaxy_geom::Vec3;
use galaxy_sim::{EvolveContext, GalaxyScene};

use crate::input::InputSmoother;
use crate::motion::{CameraPose, ease_out_quint, motion_smooth_time, smooth_damp};
use crate::pattern::{CameraPattern, pattern_pose, tracking_pose};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Manual,
    Automatic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    Manual,
    AutomaticIdle(CameraPattern),
    Transitioning,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub pattern_duration_ms: f64,
    pub pattern_transition_ms: f64,
    pub focus_transition_ms: f64,
    /// Settle time (seconds) while following a tracked star.
    pub tracking_smooth_time: f64,
    /// Units per second.
    pub max_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pattern_duration_ms: 20_000.0,
            pattern_transition_ms: 3_000.0,
            focus_transition_ms: 1_500.0,
            tracking_smooth_time: 0.12,
            max_speed: 400.0,
            min_distance: 2.0,
            max_distance: 2_000.0,
        }
    }
}

/// Read-only view of the frame the camera is advanced in.
#[derive(Clone, Copy)]
pub struct CameraContext<'a> {
    pub scene: &'a GalaxyScene,
    pub evolve: EvolveContext<'a>,
    /// Simulated seconds, the same `t` the renderer evaluated.
    pub t: f64,
    /// Tracked star, else the most recently selected one.
    pub focus: Option<u32>,
}

impl<'a> CameraContext<'a> {
    pub fn new(
        scene: &'a GalaxyScene,
        evolve: EvolveContext<'a>,
        t: f64,
        focus: Option<u32>,
    ) -> Self {
        Self {
            scene,
            evolve,
            t,
            focus,
        }
    }

    /// Live position of star `index`.
    pub fn star_position(&self, index: u32) -> Option<Vec3> {
        let p = self.scene.particle(index)?;
        Some(self.evolve.position(p, self.t))
    }

    fn focus_position(&self) -> Option<Vec3> {
        self.focus.and_then(|i| self.star_position(i))
    }
}

/// What a transition is heading for. Only `Fixed` is a constant pose; the
/// others are re-resolved every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Goal {
    Fixed(CameraPose),
    Pattern(CameraPattern),
    /// Resolves only while the star is still the context's focus.
    Star(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionStyle {
    /// Quintic ease-out interpolation from the start pose.
    Eased,
    /// SmoothDamp toward a moving goal.
    Damped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraEvent {
    ModeChanged(CameraMode),
    PatternChanged(CameraPattern),
    TransitionStarted { duration_ms: f64 },
    TransitionQueued,
    TransitionCompleted,
    TrackingLost { index: Option<u32> },
}

#[derive(Clone, Copy, Debug)]
struct Request {
    goal: Goal,
    style: MotionStyle,
    duration_ms: f64,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    from: CameraPose,
    goal: Goal,
    style: MotionStyle,
    start_ms: f64,
    duration_ms: f64,
}

pub struct CameraEngine {
    settings: CameraSettings,
    pose: Option<CameraPose>,
    mode: CameraMode,
    pattern: CameraPattern,
    now_ms: f64,
    pattern_start_ms: f64,
    transition: Option<Transition>,
    queued: Option<Request>,
    velocity: Vec3,
    input: InputSmoother,
    events: Vec<CameraEvent>,
    /// Focus star already reported lost by the tracking slot.
    lost_focus: Option<u32>,
}

impl Default for CameraEngine {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraEngine {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            settings,
            pose: None,
            mode: CameraMode::Automatic,
            pattern: CameraPattern::ClassicOrbital,
            now_ms: 0.0,
            pattern_start_ms: 0.0,
            transition: None,
            queued: None,
            velocity: Vec3::ZERO,
            input: InputSmoother::default(),
            events: Vec::new(),
            lost_focus: None,
        }
    }

    pub fn attach(&mut self, pose: CameraPose) {
        self.pose = Some(pose);
        self.velocity = Vec3::ZERO;
    }

    pub fn detach(&mut self) {
        self.pose = None;
        self.transition = None;
        self.queued = None;
    }

    pub fn pose(&self) -> Option<CameraPose> {
        self.pose
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn pattern(&self) -> CameraPattern {
        self.pattern
    }

    pub fn state(&self) -> CameraState {
        match (self.transition, self.mode) {
            (Some(_), _) => CameraState::Transitioning,
            (None, CameraMode::Manual) => CameraState::Manual,
            (None, CameraMode::Automatic) => CameraState::AutomaticIdle(self.pattern),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn has_queued(&self) -> bool {
        self.queued.is_some()
    }

    /// Engine clock in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: CameraSettings) {
        self.settings = settings;
    }

    pub fn drain_events(&mut self) -> Vec<CameraEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move to a fixed pose over `duration_ms` with quintic easing.
    pub fn request_transition(
        &mut self,
        to: CameraPose,
        duration_ms: f64,
        ctx: Option<&CameraContext<'_>>,
    ) {
        self.request(Goal::Fixed(to), MotionStyle::Eased, duration_ms, ctx);
    }

    /// Start a motion, or park it in the single-slot queue if one is running.
    /// A newer queued request replaces an older one.
    pub fn request(
        &mut self,
        goal: Goal,
        style: MotionStyle,
        duration_ms: f64,
        ctx: Option<&CameraContext<'_>>,
    ) {
        let Some(ctx) = ctx else { return };
        if self.pose.is_none() {
            return;
        }
        let req = Request {
            goal,
            style,
            duration_ms: duration_ms.max(0.0),
        };
        if self.transition.is_some() {
            if self.queued.replace(req).is_some() {
                log::debug!("camera: replaced queued motion");
            }
            self.events.push(CameraEvent::TransitionQueued);
            return;
        }
        self.start(req, ctx);
    }

    /// Fly to star `index` and keep following it. Following stops, falling
    /// back to the classic orbit, once the star is no longer the context's focus.
    pub fn focus_star(&mut self, index: u32, ctx: Option<&CameraContext<'_>>) {
        let Some(ctx) = ctx else { return };
        if self.pose.is_none() {
            return;
        }
        self.lost_focus = None;
        if self.mode == CameraMode::Automatic {
            self.set_current_pattern(CameraPattern::StarTracking);
        }
        let focused = CameraContext {
            focus: Some(index),
            ..*ctx
        };
        let duration = self.settings.focus_transition_ms;
        self.request(Goal::Star(index), MotionStyle::Damped, duration, Some(&focused));
    }

    /// Switch between manual and automatic control. In-flight and queued
    /// motions are dropped.
    pub fn set_mode(&mut self, mode: CameraMode, ctx: Option<&CameraContext<'_>>) {
        let Some(ctx) = ctx else { return };
        if self.pose.is_none() || mode == self.mode {
            return;
        }
        self.transition = None;
        self.queued = None;
        self.velocity = Vec3::ZERO;
        self.input.clear();
        self.mode = mode;
        log::info!("camera mode -> {:?}", mode);
        self.events.push(CameraEvent::ModeChanged(mode));
        if mode == CameraMode::Automatic {
            self.pattern_start_ms = self.now_ms;
            self.enter_pattern(ctx);
        }
    }

    /// Jump the automatic cycle to `pattern`, transitioning into it. In manual
    /// mode the choice is only remembered.
    pub fn set_pattern(&mut self, pattern: CameraPattern, ctx: Option<&CameraContext<'_>>) {
        let Some(ctx) = ctx else { return };
        if self.pose.is_none() {
            return;
        }
        self.set_current_pattern(pattern);
        if self.mode == CameraMode::Automatic {
            self.enter_pattern(ctx);
        }
    }

    /// Orbit the manual camera around its target by a pointer delta in pixels.
    pub fn manual_rotate(&mut self, dx: f64, dy: f64, ctx: Option<&CameraContext<'_>>) {
        if ctx.is_none() || self.mode != CameraMode::Manual || self.transition.is_some() {
            return;
        }
        let Some(pose) = self.pose else { return };
        let Some((d_yaw, d_pitch)) = self.input.push(dx, dy) else {
            return;
        };
        let offset = pose.position - pose.target;
        let r = offset.length();
        if r <= f64::EPSILON {
            return;
        }
        let yaw = offset.z.atan2(offset.x) + d_yaw;
        let pitch = ((offset.y / r).clamp(-1.0, 1.0).asin() + d_pitch).clamp(-1.5, 1.5);
        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let position = pose.target + Vec3::new(cp * cy, sp, cp * sy) * r;
        self.pose = Some(CameraPose::new(position, pose.target));
    }

    /// Dolly the manual camera toward (positive `steps`) or away from its target.
    pub fn manual_zoom(&mut self, steps: f64, ctx: Option<&CameraContext<'_>>) {
        if ctx.is_none() || self.mode != CameraMode::Manual || self.transition.is_some() {
            return;
        }
        let Some(pose) = self.pose else { return };
        let offset = pose.position - pose.target;
        let r = offset.length();
        if r <= f64::EPSILON || !steps.is_finite() {
            return;
        }
        let wanted = (r * (1.0 - 0.1 * steps).clamp(0.5, 1.5))
            .clamp(self.settings.min_distance, self.settings.max_distance);
        let position = pose.target + offset * (wanted / r);
        self.pose = Some(CameraPose::new(position, pose.target));
    }

    /// Advance the engine clock by `dt_ms` and move the camera.
    pub fn advance(&mut self, dt_ms: f64, ctx: Option<&CameraContext<'_>>) {
        let Some(ctx) = ctx else { return };
        if self.pose.is_none() {
            return;
        }
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.now_ms += dt_ms;
        if self.transition.is_some() {
            self.step_transition(dt_ms, ctx);
        } else if self.mode == CameraMode::Automatic {
            self.step_pattern(dt_ms, ctx);
        }
    }

    fn pattern_elapsed(&self) -> f64 {
        self.now_ms - self.pattern_start_ms
    }

    fn set_current_pattern(&mut self, pattern: CameraPattern) {
        if self.pattern != pattern {
            log::info!("camera pattern -> {}", pattern.name());
            self.events.push(CameraEvent::PatternChanged(pattern));
        }
        self.pattern = pattern;
        self.pattern_start_ms = self.now_ms;
    }

    fn enter_pattern(&mut self, ctx: &CameraContext<'_>) {
        let style = if self.pattern == CameraPattern::StarTracking {
            MotionStyle::Damped
        } else {
            MotionStyle::Eased
        };
        let duration = self.settings.pattern_transition_ms;
        self.request(Goal::Pattern(self.pattern), style, duration, Some(ctx));
    }

    fn resolve(&self, goal: Goal, ctx: &CameraContext<'_>) -> Option<CameraPose> {
        match goal {
            Goal::Fixed(pose) => Some(pose),
            Goal::Pattern(CameraPattern::StarTracking) => match ctx.focus {
                Some(index) => ctx.star_position(index).map(tracking_pose),
                None => Some(self.classic_pose(ctx)),
            },
            Goal::Pattern(p) => Some(pattern_pose(
                p,
                &ctx.scene.physics,
                self.pattern_elapsed(),
                self.settings.pattern_duration_ms,
            )),
            Goal::Star(index) if ctx.focus == Some(index) => {
                ctx.star_position(index).map(tracking_pose)
            }
            Goal::Star(_) => None,
        }
    }

    fn classic_pose(&self, ctx: &CameraContext<'_>) -> CameraPose {
        pattern_pose(
            CameraPattern::ClassicOrbital,
            &ctx.scene.physics,
            self.pattern_elapsed(),
            self.settings.pattern_duration_ms,
        )
    }

    /// The tracking slot keeps its place in the cycle when its star is gone;
    /// only a star that was actually focused is reported, once.
    fn note_slot_lost(&mut self, focus: Option<u32>) {
        if focus.is_none() || self.lost_focus == focus {
            return;
        }
        log::warn!("camera lost focus star {:?}; orbiting instead", focus);
        self.events.push(CameraEvent::TrackingLost { index: focus });
        self.lost_focus = focus;
    }

    fn lose_tracking(&mut self, index: Option<u32>) {
        log::warn!("camera lost tracked star {:?}; falling back to orbit", index);
        self.events.push(CameraEvent::TrackingLost { index });
        self.set_current_pattern(CameraPattern::ClassicOrbital);
    }

    /// Resolve `goal`. A lost star goal degrades to the classic orbit; the
    /// tracking slot of the cycle borrows the classic pose but stays in place.
    fn resolve_or_degrade(&mut self, goal: &mut Goal, ctx: &CameraContext<'_>) -> CameraPose {
        if let Some(pose) = self.resolve(*goal, ctx) {
            return pose;
        }
        match *goal {
            Goal::Star(i) => {
                self.lose_tracking(Some(i));
                *goal = Goal::Pattern(CameraPattern::ClassicOrbital);
            }
            _ => self.note_slot_lost(ctx.focus),
        }
        self.classic_pose(ctx)
    }

    fn start(&mut self, req: Request, ctx: &CameraContext<'_>) {
        let Some(from) = self.pose else { return };
        let mut goal = req.goal;
        let to = self.resolve_or_degrade(&mut goal, ctx);
        // Small immediate step so the input feels answered this frame.
        self.pose = Some(from.lerp(to, 0.05));
        self.velocity = Vec3::ZERO;
        self.transition = Some(Transition {
            from,
            goal,
            style: req.style,
            start_ms: self.now_ms,
            duration_ms: req.duration_ms,
        });
        log::debug!(
            "camera transition {:?} {:?} over {:.0}ms",
            req.style,
            goal,
            req.duration_ms
        );
        self.events.push(CameraEvent::TransitionStarted {
            duration_ms: req.duration_ms,
        });
    }

    fn step_transition(&mut self, dt_ms: f64, ctx: &CameraContext<'_>) {
        let Some(mut tr) = self.transition.take() else {
            return;
        };
        let Some(current) = self.pose else { return };
        let to = self.resolve_or_degrade(&mut tr.goal, ctx);
        let progress = if tr.duration_ms > 0.0 {
            ((self.now_ms - tr.start_ms) / tr.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            self.pose = Some(to);
            self.velocity = Vec3::ZERO;
            self.events.push(CameraEvent::TransitionCompleted);
            log::debug!("camera transition complete at {:.0}ms", self.now_ms);
            if let Some(next) = self.queued.take() {
                self.start(next, ctx);
            } else if self.mode == CameraMode::Automatic && matches!(tr.goal, Goal::Fixed(_)) {
                // Glide back into the running pattern instead of jumping to it.
                self.pattern_start_ms = self.now_ms;
                self.enter_pattern(ctx);
            }
            return;
        }

        let eased = ease_out_quint(progress);
        let next = match tr.style {
            MotionStyle::Eased => tr.from.lerp(to, eased),
            MotionStyle::Damped => {
                let distance = current.position.distance(to.position);
                let position = smooth_damp(
                    current.position,
                    to.position,
                    &mut self.velocity,
                    motion_smooth_time(distance),
                    self.settings.max_speed,
                    dt_ms / 1000.0,
                );
                CameraPose::new(position, tr.from.target.lerp(to.target, eased))
            }
        };
        self.pose = Some(next);
        self.transition = Some(tr);
    }

    fn step_pattern(&mut self, dt_ms: f64, ctx: &CameraContext<'_>) {
        let Some(current) = self.pose else { return };
        if self.pattern_elapsed() >= self.settings.pattern_duration_ms {
            self.set_current_pattern(self.pattern.next());
            self.enter_pattern(ctx);
            return;
        }
        match self.pattern {
            CameraPattern::StarTracking => match ctx.focus_position() {
                Some(star) => {
                    self.lost_focus = None;
                    let desired = tracking_pose(star);
                    let position = smooth_damp(
                        current.position,
                        desired.position,
                        &mut self.velocity,
                        self.settings.tracking_smooth_time,
                        self.settings.max_speed,
                        dt_ms / 1000.0,
                    );
                    self.pose = Some(CameraPose::new(position, star));
                }
                None => {
                    self.note_slot_lost(ctx.focus);
                    let desired = self.classic_pose(ctx);
                    let dt = dt_ms / 1000.0;
                    let smooth = motion_smooth_time(current.position.distance(desired.position));
                    let position = smooth_damp(
                        current.position,
                        desired.position,
                        &mut self.velocity,
                        smooth,
                        self.settings.max_speed,
                        dt,
                    );
                    let blend = 1.0 - (-dt / smooth).exp();
                    let target = current.target.lerp(desired.target, blend);
                    self.pose = Some(CameraPose::new(position, target));
                }
            },
            p => {
                self.pose = Some(pattern_pose(
                    p,
                    &ctx.scene.physics,
                    self.pattern_elapsed(),
                    self.settings.pattern_duration_ms,
                ));
            }
        }
    }
}
