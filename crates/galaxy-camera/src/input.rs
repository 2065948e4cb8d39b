use std::collections::VecDeque;

/// Sliding-window average of pointer deltas for manual orbiting.
///
/// Raw deltas under `pixel_threshold` on both axes never enter the window;
/// averaged rotations under `angle_threshold` radians are dropped.
#[derive(Clone, Debug)]
pub struct InputSmoother {
    window: VecDeque<(f64, f64)>,
    capacity: usize,
    pub pixel_threshold: f64,
    pub angle_threshold: f64,
    /// Radians per pixel.
    pub sensitivity: f64,
}

impl Default for InputSmoother {
    fn default() -> Self {
        Self::new(5)
    }
}

impl InputSmoother {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            pixel_threshold: 0.5,
            angle_threshold: 1e-4,
            sensitivity: 0.005,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Feed one pointer delta in pixels; returns the smoothed (yaw, pitch)
    /// rotation to apply, if any.
    pub fn push(&mut self, dx: f64, dy: f64) -> Option<(f64, f64)> {
        if !(dx.is_finite() && dy.is_finite()) {
            return None;
        }
        if dx.abs() < self.pixel_threshold && dy.abs() < self.pixel_threshold {
            return None;
        }
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back((dx, dy));

        let n = self.window.len() as f64;
        let (sx, sy) = self
            .window
            .iter()
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        let yaw = sx / n * self.sensitivity;
        let pitch = sy / n * self.sensitivity;
        if yaw.abs() < self.angle_threshold && pitch.abs() < self.angle_threshold {
            return None;
        }
        Some((yaw, pitch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_below_pixel_threshold_is_dropped() {
        let mut s = InputSmoother::default();
        assert_eq!(s.push(0.3, -0.2), None);
        assert!(s.is_empty());
    }

    #[test]
    fn window_averages_last_five() {
        let mut s = InputSmoother::default();
        for _ in 0..5 {
            s.push(10.0, 0.0);
        }
        let (yaw, pitch) = s.push(40.0, 0.0).unwrap();
        assert_eq!(s.len(), 5);
        assert!((yaw - 16.0 * 0.005).abs() < 1e-12);
        assert_eq!(pitch, 0.0);
    }

    #[test]
    fn tiny_averaged_rotation_is_dropped() {
        let mut s = InputSmoother::default();
        s.sensitivity = 1e-5;
        assert_eq!(s.push(2.0, 2.0), None);
        assert_eq!(s.len(), 1);
    }
}
