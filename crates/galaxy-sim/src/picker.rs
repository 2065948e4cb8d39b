//! Star selection by view ray and "pick a good random star".

use galaxy_gen::SeededRandom;
use galaxy_geom::{Ray, Vec3};

use crate::appearance::{Appearance, live_appearance};
use crate::evolve::EvolveContext;
use crate::scene::GalaxyScene;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickSettings {
    pub min_size: f64,
    pub min_brightness: f64,
    /// Ray distance accepted when nothing is hit directly.
    pub near_miss_distance: f64,
}

impl Default for PickSettings {
    fn default() -> Self {
        Self {
            min_size: 0.3,
            min_brightness: 0.1,
            near_miss_distance: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickKind {
    Direct,
    NearMiss,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub index: u32,
    pub position: Vec3,
    pub kind: PickKind,
    pub ray_distance: f64,
    pub camera_distance: f64,
}

/// On-screen radius a star of `size` covers for hit testing.
#[inline]
pub fn visual_radius(size: f64) -> f64 {
    (size * 0.6).max(0.5)
}

/// Cast `ray` (origin at the camera) into the live star field at time `t`.
///
/// Visibility and hit radius use the size and brightness the star is drawn
/// with at `t`, not its base values. Nearest direct hit by camera distance wins; failing that, the near miss
/// closest to the ray; failing that, `None`.
pub fn pick_star(
    scene: &GalaxyScene,
    ctx: &EvolveContext<'_>,
    t: f64,
    ray: &Ray,
    settings: &PickSettings,
) -> Option<PickHit> {
    let mut direct: Option<PickHit> = None;
    let mut near: Option<PickHit> = None;

    for p in scene.particles() {
        let pos = ctx.position(p, t);
        let look = live_appearance(p, ctx.physics, pos, t);
        if look.size < settings.min_size || look.brightness < settings.min_brightness {
            continue;
        }
        if ray.depth_of(pos) <= 0.0 {
            continue;
        }
        let ray_distance = ray.distance_to_point(pos);
        let camera_distance = pos.distance(ray.origin);
        if ray_distance <= visual_radius(look.size) {
            if direct.is_none_or(|d| camera_distance < d.camera_distance) {
                direct = Some(PickHit {
                    index: p.index,
                    position: pos,
                    kind: PickKind::Direct,
                    ray_distance,
                    camera_distance,
                });
            }
        } else if ray_distance <= settings.near_miss_distance
            && near.is_none_or(|n| ray_distance < n.ray_distance)
        {
            near = Some(PickHit {
                index: p.index,
                position: pos,
                kind: PickKind::NearMiss,
                ray_distance,
                camera_distance,
            });
        }
    }

    let hit = direct.or(near);
    match &hit {
        Some(h) => log::debug!(
            "picked star {} ({:?}) ray_d={:.3} cam_d={:.2}",
            h.index,
            h.kind,
            h.ray_distance,
            h.camera_distance
        ),
        None => log::debug!("pick: no star near ray"),
    }
    hit
}

/// Visibility gate for one tier of random star selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTier {
    pub min_size: f64,
    pub min_brightness: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

/// Primary thresholds followed by three progressively looser fallbacks.
pub const VISIBILITY_TIERS: [VisibilityTier; 4] = [
    VisibilityTier {
        min_size: 1.0,
        min_brightness: 0.6,
        min_distance: 5.0,
        max_distance: 150.0,
    },
    VisibilityTier {
        min_size: 0.6,
        min_brightness: 0.4,
        min_distance: 0.0,
        max_distance: 250.0,
    },
    VisibilityTier {
        min_size: 0.3,
        min_brightness: 0.1,
        min_distance: 0.0,
        max_distance: f64::INFINITY,
    },
    VisibilityTier {
        min_size: 0.0,
        min_brightness: 0.0,
        min_distance: 0.0,
        max_distance: f64::INFINITY,
    },
];

/// Candidates sampled uniformly from the best-scoring few.
pub const RANDOM_POOL: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomPick {
    pub index: u32,
    pub position: Vec3,
    /// 0 for the primary thresholds, 1..=3 for the fallbacks.
    pub tier: usize,
}

#[inline]
pub fn visibility_score(size: f64, brightness: f64, distance: f64) -> f64 {
    size * brightness / distance.max(1e-3).powf(1.3) * 100.0
}

/// Pick a star that will look good to fly to from `camera_pos`. Tiers gate
/// on the live appearance at `t`.
pub fn pick_random_star(
    scene: &GalaxyScene,
    ctx: &EvolveContext<'_>,
    t: f64,
    camera_pos: Vec3,
    rng: &mut SeededRandom,
) -> Option<RandomPick> {
    let live: Vec<(usize, Vec3, f64, Appearance)> = scene
        .particles()
        .iter()
        .enumerate()
        .map(|(slot, p)| {
            let pos = ctx.position(p, t);
            let look = live_appearance(p, ctx.physics, pos, t);
            (slot, pos, pos.distance(camera_pos), look)
        })
        .collect();

    for (tier_no, tier) in VISIBILITY_TIERS.iter().enumerate() {
        let mut ranked: Vec<(f64, usize, Vec3)> = live
            .iter()
            .filter_map(|&(slot, pos, d, look)| {
                let visible = look.size >= tier.min_size
                    && look.brightness >= tier.min_brightness
                    && d >= tier.min_distance
                    && d <= tier.max_distance;
                visible.then(|| (visibility_score(look.size, look.brightness, d), slot, pos))
            })
            .collect();
        if ranked.is_empty() {
            log::debug!("random star: tier {} has no candidates", tier_no);
            continue;
        }
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.truncate(RANDOM_POOL);
        let pick = rng.int(0, ranked.len() as i64 - 1) as usize;
        let (_, slot, position) = ranked[pick];
        let index = scene.particles()[slot].index;
        if tier_no > 0 {
            log::info!("random star {} chosen from fallback tier {}", index, tier_no);
        }
        return Some(RandomPick {
            index,
            position,
            tier: tier_no,
        });
    }
    None
}
