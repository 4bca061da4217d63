//! Arm joint integration with hard limits.

use simcore::Model;

/// Degrees of arm pivot per rotation-motor tick.
const ROTATION_DEG_PER_TICK: f64 = 0.05;
/// Length units of extension per extension-motor tick.
const EXTENSION_UNITS_PER_TICK: f64 = 0.01;

const MAX_ROTATION_DEG: f64 = 90.0;
const MAX_EXTENSION: f64 = 22.0;

/// One saturating joint: accumulates scaled motor ticks between zero and a
/// hard stop, no wrap.
#[derive(Debug, Clone, Copy)]
struct ArmJoint {
    value: f64,
    units_per_tick: f64,
    max: f64,
}

impl ArmJoint {
    fn new(units_per_tick: f64, max: f64) -> Self {
        ArmJoint {
            value: 0.0,
            units_per_tick,
            max,
        }
    }

    fn integrate(&mut self, tick_delta: f64) {
        self.value = (self.value + self.units_per_tick * tick_delta).clamp(0.0, self.max);
    }
}

/// The articulated arm: a rotating pivot and a linear extension, each fed
/// by its own motor. The per-tick coefficients encode the gear ratio and
/// lead of the two joints.
#[derive(Debug, Clone, Copy)]
pub struct Arm {
    rotation: ArmJoint,
    extension: ArmJoint,
}

impl Arm {
    pub fn new() -> Self {
        Arm {
            rotation: ArmJoint::new(ROTATION_DEG_PER_TICK, MAX_ROTATION_DEG),
            extension: ArmJoint::new(EXTENSION_UNITS_PER_TICK, MAX_EXTENSION),
        }
    }

    /// Apply one tick's motor deltas to both joints.
    pub fn integrate(&mut self, rotation_ticks: f64, extension_ticks: f64) {
        self.rotation.integrate(rotation_ticks);
        self.extension.integrate(extension_ticks);
    }

    /// Pivot angle in degrees, `[0, 90]`.
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.value
    }

    /// Extension in length units, `[0, 22]`.
    pub fn extension(&self) -> f64 {
        self.extension.value
    }
}

impl Default for Arm {
    fn default() -> Self {
        Arm::new()
    }
}

impl Model for Arm {
    fn reset(&mut self) {
        self.rotation.value = 0.0;
        self.extension.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_scale() {
        let mut arm = Arm::new();
        arm.integrate(100.0, 0.0);
        assert_relative_eq!(arm.rotation_degrees(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(arm.extension(), 0.0);
    }

    #[test]
    fn test_extension_scale() {
        let mut arm = Arm::new();
        arm.integrate(0.0, 100.0);
        assert_relative_eq!(arm.extension(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_saturates_at_upper_stops() {
        let mut arm = Arm::new();
        arm.integrate(10_000.0, 10_000.0);
        assert_relative_eq!(arm.rotation_degrees(), 90.0);
        assert_relative_eq!(arm.extension(), 22.0);
        // Further positive drive stays pinned.
        arm.integrate(10_000.0, 10_000.0);
        assert_relative_eq!(arm.rotation_degrees(), 90.0);
        assert_relative_eq!(arm.extension(), 22.0);
    }

    #[test]
    fn test_saturates_at_zero() {
        let mut arm = Arm::new();
        arm.integrate(10_000.0, 10_000.0);
        arm.integrate(-10_000.0, -10_000.0);
        assert_relative_eq!(arm.rotation_degrees(), 0.0);
        assert_relative_eq!(arm.extension(), 0.0);
        arm.integrate(-1.0, -1.0);
        assert_relative_eq!(arm.rotation_degrees(), 0.0);
        assert_relative_eq!(arm.extension(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut arm = Arm::new();
        arm.integrate(500.0, 500.0);
        arm.reset();
        assert_eq!(arm.rotation_degrees(), 0.0);
        assert_eq!(arm.extension(), 0.0);
    }
}
