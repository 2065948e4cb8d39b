use galaxy_camera::{ease_out_quint, motion_smooth_time, smooth_damp};
use galaxy_geom::Vec3;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -500.0f64..500.0
}

proptest! {
    #[test]
    fn smooth_damp_from_rest_never_overshoots(
        sx in coord(), sy in coord(), sz in coord(),
        tx in coord(), ty in coord(), tz in coord(),
        dt_ms in 1.0f64..50.0,
    ) {
        let start = Vec3::new(sx, sy, sz);
        let target = Vec3::new(tx, ty, tz);
        let dir = target - start;
        let mut pos = start;
        let mut vel = Vec3::ZERO;
        let mut last = pos.distance(target);
        for _ in 0..200 {
            let st = motion_smooth_time(pos.distance(target));
            pos = smooth_damp(pos, target, &mut vel, st, 400.0, dt_ms / 1000.0);
            let d = pos.distance(target);
            prop_assert!(d <= last + 1e-9);
            prop_assert!(dir.dot(pos - target) <= 1e-9 * (1.0 + dir.length()));
            last = d;
        }
    }

    #[test]
    fn smooth_damp_speed_is_bounded(
        tx in coord(), tz in coord(),
        dt_ms in 1.0f64..50.0,
    ) {
        let target = Vec3::new(tx, 0.0, tz);
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::ZERO;
        let dt = dt_ms / 1000.0;
        for _ in 0..50 {
            let next = smooth_damp(pos, target, &mut vel, 0.3, 400.0, dt);
            prop_assert!(next.distance(pos) <= 400.0 * 0.3 + 1e-9);
            pos = next;
        }
    }

    #[test]
    fn ease_is_monotone(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ease_out_quint(lo) <= ease_out_quint(hi));
        prop_assert!((0.0..=1.0).contains(&ease_out_quint(a)));
    }
}
