use galaxy_geom::{Ray, Vec3};
use proptest::prelude::*;
use proptest_derive::Arbitrary;

/// A point placed at a known depth and perpendicular offset from a ray.
#[derive(Debug, Arbitrary)]
struct OffsetCase {
    #[proptest(strategy = "(-500.0..500.0f64, -500.0..500.0f64, -500.0..500.0f64)")]
    origin: (f64, f64, f64),
    #[proptest(strategy = "(-1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64)")]
    dir: (f64, f64, f64),
    #[proptest(strategy = "-200.0..800.0f64")]
    depth: f64,
    #[proptest(strategy = "0.0..50.0f64")]
    offset: f64,
}

impl OffsetCase {
    fn ray(&self) -> Option<Ray> {
        let (ox, oy, oz) = self.origin;
        let (dx, dy, dz) = self.dir;
        if Vec3::new(dx, dy, dz).length() < 1e-3 {
            return None;
        }
        Ray::new(Vec3::new(ox, oy, oz), Vec3::new(dx, dy, dz))
    }

    fn point(&self, ray: &Ray) -> Vec3 {
        let axis = if ray.dir.y.abs() < 0.9 { Vec3::UP } else { Vec3::new(1.0, 0.0, 0.0) };
        let side = ray.dir.cross(axis).normalized();
        ray.at(self.depth) + side * self.offset
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn ray_recovers_depth_and_offset(case in any::<OffsetCase>()) {
        let Some(ray) = case.ray() else {
            return Ok(());
        };
        let p = case.point(&ray);
        prop_assert!((ray.depth_of(p) - case.depth).abs() < 1e-6);
        prop_assert!((ray.distance_to_point(p) - case.offset).abs() < 1e-6);
    }

    #[test]
    fn towards_passes_through_target(case in any::<OffsetCase>()) {
        let Some(ray) = case.ray() else {
            return Ok(());
        };
        let p = case.point(&ray);
        if let Some(aimed) = Ray::towards(ray.origin, p) {
            prop_assert!(aimed.distance_to_point(p) < 1e-6);
            prop_assert!(aimed.depth_of(p) >= 0.0);
        }
    }
}
