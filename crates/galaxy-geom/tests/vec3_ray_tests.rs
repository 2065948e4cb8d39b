use galaxy_geom::{Ray, Vec3};

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f64) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-12));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-12));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-12));
    assert!(vec3_approx_eq(c - a, b, 1e-12));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-12));

    let mut v = Vec3::new(1.0, 1.0, 1.0);
    v += Vec3::new(2.0, 3.0, 4.0);
    v -= Vec3::new(1.0, 2.0, 3.0);
    assert!(vec3_approx_eq(v, Vec3::new(2.0, 2.0, 2.0), 1e-12));
}

#[test]
fn vec3_dot_length_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.dot(v), 25.0, 1e-12));
    assert!(approx_eq(v.length(), 5.0, 1e-12));
    assert!(approx_eq(v.length_squared(), 25.0, 1e-12));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-12));

    // Zero vector normalization is a no-op (not NaN)
    let zn = Vec3::ZERO.normalized();
    assert!(vec3_approx_eq(zn, Vec3::ZERO, 1e-12));
}

#[test]
fn vec3_cross_basis() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-12));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-12));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-12));
}

#[test]
fn vec3_lerp_and_distance() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(10.0, -20.0, 4.0);
    assert!(vec3_approx_eq(a.lerp(b, 0.25), Vec3::new(2.5, -5.0, 1.0), 1e-12));
    assert!(approx_eq(a.distance(Vec3::new(3.0, 0.0, 4.0)), 5.0, 1e-12));
}

#[test]
fn ray_rejects_degenerate_direction() {
    assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    assert!(Ray::new(Vec3::ZERO, Vec3::new(f64::NAN, 0.0, 0.0)).is_none());
    assert!(Ray::towards(Vec3::UP, Vec3::UP).is_none());
}

#[test]
fn ray_distance_and_depth() {
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)).unwrap();
    assert!(approx_eq(ray.dir.length(), 1.0, 1e-12));

    let ahead = Vec3::new(3.0, 4.0, -10.0);
    assert!(approx_eq(ray.distance_to_point(ahead), 5.0, 1e-12));
    assert!(approx_eq(ray.depth_of(ahead), 10.0, 1e-12));

    let behind = Vec3::new(0.0, 0.0, 7.0);
    assert!(ray.depth_of(behind) < 0.0);
    assert!(vec3_approx_eq(ray.at(2.0), Vec3::new(0.0, 0.0, -2.0), 1e-12));
}
