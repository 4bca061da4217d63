//! Mecanum forward kinematics.
//!
//! Four wheel linear displacements go in, one robot-frame displacement
//! comes out, through a fixed 4x4 mixing matrix derived once from the
//! chassis geometry.

use log::debug;
use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};
use simcore::BodyDelta;

/// Chassis constants derived from the overall bot width.
///
/// Immutable once built; every ratio here is fixed by the frame and wheel
/// hardware of this robot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChassisGeometry {
    pub bot_width: f64,
    pub wheel_circumference: f64,
    pub inter_wheel_width: f64,
    pub inter_wheel_length: f64,
    pub wl_average: f64,
}

impl ChassisGeometry {
    pub fn new(bot_width: f64) -> Self {
        let inter_wheel_width = bot_width * 8.0 / 9.0;
        let inter_wheel_length = bot_width * 7.0 / 9.0;
        ChassisGeometry {
            bot_width,
            wheel_circumference: std::f64::consts::PI * bot_width / 4.5,
            inter_wheel_width,
            inter_wheel_length,
            wl_average: (inter_wheel_width + inter_wheel_length) / 2.0,
        }
    }

    pub fn half_bot_width(&self) -> f64 {
        self.bot_width / 2.0
    }
}

/// Wheel-to-robot mixing for a four-wheel mecanum platform.
///
/// Wheel order is back-left, front-left, front-right, back-right, with
/// left-side travel already sign-corrected by the caller for the mirrored
/// mounting. Output rows are robot-frame `dx`, `dy`, heading change
/// (1/length units from the rotation row), and the strain scalar.
#[derive(Debug, Clone)]
pub struct MecanumKinematics {
    geometry: ChassisGeometry,
    t_wr: Matrix4<f64>,
}

impl MecanumKinematics {
    pub fn new(geometry: ChassisGeometry) -> Self {
        let q = 0.25 / geometry.wl_average;
        #[rustfmt::skip]
        let t_wr = Matrix4::new(
            -0.25, 0.25, -0.25,  0.25,
             0.25, 0.25,  0.25,  0.25,
               -q,   -q,     q,     q,
            -0.25, 0.25,  0.25, -0.25,
        );
        debug!(
            "mecanum mixing matrix built: wl_average = {:.4}, wheel_circumference = {:.4}",
            geometry.wl_average, geometry.wheel_circumference
        );
        MecanumKinematics { geometry, t_wr }
    }

    pub fn geometry(&self) -> &ChassisGeometry {
        &self.geometry
    }

    /// Convert an encoder tick delta to wheel linear travel in field units.
    pub fn ticks_to_travel(&self, tick_delta: f64, ticks_per_rotation: f64) -> f64 {
        tick_delta * self.geometry.wheel_circumference / ticks_per_rotation
    }

    /// Mix four wheel travels into the robot-frame displacement.
    pub fn body_delta(&self, wheel_travel: [f64; 4]) -> BodyDelta {
        let delta = self.t_wr
            * Vector4::new(
                wheel_travel[0],
                wheel_travel[1],
                wheel_travel[2],
                wheel_travel[3],
            );
        BodyDelta {
            dx: delta[0],
            dy: delta[1],
            dtheta: delta[2],
            strain: delta[3],
        }
    }
}
