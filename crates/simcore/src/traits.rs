use serde::{Deserialize, Serialize};

// Robot State

/// Planar robot pose in the field frame.
///
/// `x`/`y` are in field length units, `heading` in radians within
/// `(-pi, pi]`, counter-clockwise positive, zero facing +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Pose { x, y, heading }
    }
}

/// Robot-frame displacement produced by one kinematics pass.
///
/// `dx`/`dy` are the robot-frame translation components, `dtheta` the
/// heading change. `strain` is the fourth mixing-matrix output: a
/// wheel-slip indicator that no integrator consumes, kept as a diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyDelta {
    pub dx: f64,
    pub dy: f64,
    pub dtheta: f64,
    pub strain: f64,
}

/// Scalar state snapshot shared between the physics and display ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BotState {
    pub pose: Pose,
    /// Arm pivot angle in degrees, 0 = stowed.
    pub arm_rotation: f64,
    /// Arm extension in length units.
    pub arm_extension: f64,
    /// Cumulative display angles of the four wheels, degrees.
    pub wheel_rotations: [f64; 4],
}

/// Anything with resettable internal state.
pub trait Model {
    fn reset(&mut self);
}
