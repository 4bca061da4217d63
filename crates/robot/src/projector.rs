//! Projection of the integrated pose onto the sensor suite.

use std::f64::consts::FRAC_PI_2;

use hardware::{ColorSensor, DistanceSensor, Imu};
use simcore::{normalize_radians, Pose};

/// Publishes pose-dependent observations after each physics tick.
///
/// The four distance sensors sit at the cardinal robot headings in the
/// order front, left, back, right; each ray originates half a bot width
/// out from the centroid along its outward normal. The color sensor
/// samples the centroid and the IMU republishes the heading.
#[derive(Debug, Clone)]
pub struct SensorProjector {
    distance_sensors: [DistanceSensor; 4],
    color_sensor: ColorSensor,
    imu: Imu,
    half_bot_width: f64,
}

impl SensorProjector {
    pub fn new(
        distance_sensors: [DistanceSensor; 4],
        color_sensor: ColorSensor,
        imu: Imu,
        half_bot_width: f64,
    ) -> Self {
        SensorProjector {
            distance_sensors,
            color_sensor,
            imu,
            half_bot_width,
        }
    }

    /// Push the current pose out to every sensor sink.
    pub fn project(&self, pose: Pose) {
        self.imu.update_heading_radians(pose.heading);
        self.color_sensor.update_color(pose.x, pose.y);

        for (i, sensor) in self.distance_sensors.iter().enumerate() {
            let sensor_heading = normalize_radians(pose.heading + i as f64 * FRAC_PI_2);
            sensor.update_distance(
                pose.x - self.half_bot_width * sensor_heading.sin(),
                pose.y + self.half_bot_width * sensor_heading.cos(),
                sensor_heading,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn projector() -> (SensorProjector, [DistanceSensor; 4], ColorSensor, Imu) {
        let sensors = [
            DistanceSensor::new(72.0),
            DistanceSensor::new(72.0),
            DistanceSensor::new(72.0),
            DistanceSensor::new(72.0),
        ];
        let color = ColorSensor::new();
        let imu = Imu::new();
        let projector = SensorProjector::new(sensors.clone(), color.clone(), imu.clone(), 9.0);
        (projector, sensors, color, imu)
    }

    #[test]
    fn test_static_projection_at_origin() {
        let (projector, sensors, color, imu) = projector();
        projector.project(Pose::default());

        assert_eq!(imu.heading_radians(), 0.0);
        assert_eq!(color.last_sample(), Some((0.0, 0.0)));

        let (x, y, h) = sensors[0].ray();
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 9.0, epsilon = 1e-12);
        assert_relative_eq!(h, 0.0, epsilon = 1e-12);

        let (x, y, h) = sensors[1].ray();
        assert_relative_eq!(x, -9.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(h, FRAC_PI_2, epsilon = 1e-12);

        let (x, y, h) = sensors[2].ray();
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, -9.0, epsilon = 1e-12);
        assert_relative_eq!(h, PI, epsilon = 1e-12);

        let (x, y, h) = sensors[3].ray();
        assert_relative_eq!(x, 9.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(h, -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_rotated_projection_wraps_headings() {
        let (projector, sensors, _, imu) = projector();
        let heading = PI - 0.1;
        projector.project(Pose::new(2.0, -3.0, heading));

        assert_relative_eq!(imu.heading_radians(), heading, epsilon = 1e-12);
        // The back sensor heading wraps past pi.
        let (_, _, h) = sensors[2].ray();
        assert_relative_eq!(h, -0.1, epsilon = 1e-12);
        // Every origin sits half a bot width from the centroid.
        for sensor in &sensors {
            let (x, y, _) = sensor.ray();
            let r = ((x - 2.0).powi(2) + (y + 3.0).powi(2)).sqrt();
            assert_relative_eq!(r, 9.0, epsilon = 1e-9);
        }
    }
}
