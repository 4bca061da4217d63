//! Display adapter contract.
//!
//! The physics side never touches a scene graph. Each display tick the
//! robot writes plain numbers into a [`DisplaySink`]; a graphics frontend
//! maps them onto its own transforms. [`DisplayFrame`] is the bundled
//! recording sink used by tests and headless hosts.

use log::warn;
use serde::{Deserialize, Serialize};

/// Write-only surface the robot fills on every display tick.
///
/// All values are scalars: angles in degrees (wheel and arm rotations) or
/// radians (chassis heading), translations in field length units.
pub trait DisplaySink {
    /// Chassis position and heading on the field.
    fn set_chassis_pose(&mut self, x: f64, y: f64, heading_radians: f64);

    /// Arm pivot angle about the chassis mount, degrees.
    fn set_arm_rotation(&mut self, degrees: f64);

    /// Mid-arm segment translation along the arm axis.
    fn set_mid_arm_translation(&mut self, y: f64);

    /// Fore-arm segment translation along the arm axis.
    fn set_fore_arm_translation(&mut self, y: f64);

    /// Finger translations; the fingers mirror about the hand center.
    fn set_finger_translations(&mut self, left_x: f64, right_x: f64);

    /// Cumulative spin angle of one wheel, degrees.
    fn set_wheel_rotation(&mut self, wheel: usize, degrees: f64);
}

/// A [`DisplaySink`] that just records the last written values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub chassis_x: f64,
    pub chassis_y: f64,
    pub chassis_heading: f64,
    pub arm_rotation: f64,
    pub mid_arm_y: f64,
    pub fore_arm_y: f64,
    pub left_finger_x: f64,
    pub right_finger_x: f64,
    pub wheel_rotations: [f64; 4],
}

impl DisplaySink for DisplayFrame {
    fn set_chassis_pose(&mut self, x: f64, y: f64, heading_radians: f64) {
        self.chassis_x = x;
        self.chassis_y = y;
        self.chassis_heading = heading_radians;
    }

    fn set_arm_rotation(&mut self, degrees: f64) {
        self.arm_rotation = degrees;
    }

    fn set_mid_arm_translation(&mut self, y: f64) {
        self.mid_arm_y = y;
    }

    fn set_fore_arm_translation(&mut self, y: f64) {
        self.fore_arm_y = y;
    }

    fn set_finger_translations(&mut self, left_x: f64, right_x: f64) {
        self.left_finger_x = left_x;
        self.right_finger_x = right_x;
    }

    fn set_wheel_rotation(&mut self, wheel: usize, degrees: f64) {
        if let Some(angle) = self.wheel_rotations.get_mut(wheel) {
            *angle = degrees;
        } else {
            warn!("display frame: no wheel {wheel}, dropping rotation write");
        }
    }
}
