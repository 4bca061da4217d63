//! Sensor sinks fed from the physics tick.
//!
//! Each sensor records what the state-update thread publishes and serves
//! it back to control code through its own lock. Nothing here is updated
//! from the display tick.

use std::sync::Arc;

use parking_lot::Mutex;
use simcore::normalize_radians;

/// Range reported when a distance ray hits nothing inside the sensor's
/// envelope.
pub const MAX_DISTANCE: f64 = 200.0;

#[derive(Debug, Default)]
struct DistanceInner {
    x: f64,
    y: f64,
    heading: f64,
    distance: f64,
}

/// Time-of-flight style distance sensor.
///
/// The physics tick publishes the ray origin and heading; the sensor casts
/// the ray against the four field walls and keeps the measured range.
#[derive(Debug, Clone)]
pub struct DistanceSensor {
    half_field_width: f64,
    inner: Arc<Mutex<DistanceInner>>,
}

impl DistanceSensor {
    pub fn new(half_field_width: f64) -> Self {
        DistanceSensor {
            half_field_width,
            inner: Arc::new(Mutex::new(DistanceInner {
                distance: MAX_DISTANCE,
                ..DistanceInner::default()
            })),
        }
    }

    /// Publish a new ray origin and heading, recomputing the range.
    ///
    /// The ray direction for heading `h` is `(-sin h, cos h)`, matching
    /// the field frame where heading 0 faces +y.
    pub fn update_distance(&self, x: f64, y: f64, heading_radians: f64) {
        let heading = normalize_radians(heading_radians);
        let distance = self.range_to_walls(x, y, heading);
        let mut inner = self.inner.lock();
        inner.x = x;
        inner.y = y;
        inner.heading = heading;
        inner.distance = distance;
    }

    /// Latest measured range, saturating at [`MAX_DISTANCE`].
    pub fn distance(&self) -> f64 {
        self.inner.lock().distance
    }

    /// Ray origin and heading from the latest publication.
    pub fn ray(&self) -> (f64, f64, f64) {
        let inner = self.inner.lock();
        (inner.x, inner.y, inner.heading)
    }

    fn range_to_walls(&self, x: f64, y: f64, heading: f64) -> f64 {
        let (dir_x, dir_y) = (-heading.sin(), heading.cos());
        let h = self.half_field_width;
        let mut range = MAX_DISTANCE;
        for (origin, dir) in [(x, dir_x), (y, dir_y)] {
            if dir.abs() < 1e-12 {
                continue;
            }
            let wall = if dir > 0.0 { h } else { -h };
            let t = (wall - origin) / dir;
            if t >= 0.0 && t < range {
                range = t;
            }
        }
        range
    }
}

/// Color sensor mounted at the chassis centroid.
///
/// The arena owns the mapping from field position to reflected color, so
/// the sink records the sampled point for the host to translate.
#[derive(Debug, Clone, Default)]
pub struct ColorSensor {
    sample: Arc<Mutex<Option<(f64, f64)>>>,
}

impl ColorSensor {
    pub fn new() -> Self {
        ColorSensor::default()
    }

    pub fn update_color(&self, x: f64, y: f64) {
        *self.sample.lock() = Some((x, y));
    }

    /// Field point sampled on the most recent physics tick.
    pub fn last_sample(&self) -> Option<(f64, f64)> {
        *self.sample.lock()
    }
}

#[derive(Debug, Default)]
struct ImuInner {
    heading: f64,
    closed: bool,
    close_calls: u32,
}

/// Inertial measurement unit reduced to its heading channel.
#[derive(Debug, Clone, Default)]
pub struct Imu {
    inner: Arc<Mutex<ImuInner>>,
}

impl Imu {
    pub fn new() -> Self {
        Imu::default()
    }

    /// Publish a new heading. Ignored once the IMU is closed.
    pub fn update_heading_radians(&self, heading: f64) {
        let mut inner = self.inner.lock();
        if !inner.closed {
            inner.heading = heading;
        }
    }

    pub fn heading_radians(&self) -> f64 {
        self.inner.lock().heading
    }

    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.close_calls += 1;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn close_calls(&self) -> u32 {
        self.inner.lock().close_calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_distance_straight_to_wall() {
        let sensor = DistanceSensor::new(72.0);
        // Front sensor of a bot at the origin: origin (0, 9), facing +y.
        sensor.update_distance(0.0, 9.0, 0.0);
        assert_relative_eq!(sensor.distance(), 63.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_left_ray() {
        let sensor = DistanceSensor::new(72.0);
        // Heading pi/2 points toward -x.
        sensor.update_distance(-9.0, 0.0, FRAC_PI_2);
        assert_relative_eq!(sensor.distance(), 63.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_diagonal_picks_nearest_wall() {
        let sensor = DistanceSensor::new(72.0);
        // 45 degrees between +y and -x from a point close to the -x wall.
        sensor.update_distance(-60.0, 0.0, PI / 4.0);
        let expected = 12.0 / (PI / 4.0).sin();
        assert_relative_eq!(sensor.distance(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_color_sample_recorded() {
        let sensor = ColorSensor::new();
        assert_eq!(sensor.last_sample(), None);
        sensor.update_color(3.0, -4.0);
        assert_eq!(sensor.last_sample(), Some((3.0, -4.0)));
    }

    #[test]
    fn test_imu_close_latches() {
        let imu = Imu::new();
        imu.update_heading_radians(1.0);
        imu.close();
        imu.update_heading_radians(2.0);
        assert_eq!(imu.heading_radians(), 1.0);
        assert!(imu.is_closed());
        assert_eq!(imu.close_calls(), 1);
    }
}
