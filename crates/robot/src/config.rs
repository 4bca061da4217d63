use hardware::MotorType;
use serde::{Deserialize, Serialize};

/// Who advances the chassis pose each physics tick.
///
/// `Internal` runs the pose integrator inside `update_state_and_sensors`.
/// `External` is for hosts that own pose themselves and position the robot
/// through `set_pose`; sensors are still projected from the current pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoseIntegration {
    #[default]
    Internal,
    External,
}

/// Static configuration of one robot instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Overall chassis width in field length units.
    pub bot_width: f64,
    /// Half-width of the square playable field.
    pub half_field_width: f64,
    /// Motor profile for the four drive wheels.
    pub drive_motor: MotorType,
    /// Motor profile for the arm rotation and extension motors.
    pub arm_motor: MotorType,
    pub pose_integration: PoseIntegration,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            bot_width: 18.0,
            half_field_width: 72.0,
            drive_motor: MotorType::neverest40(),
            arm_motor: MotorType::neverest40(),
            pose_integration: PoseIntegration::Internal,
        }
    }
}

impl BotConfig {
    pub fn with_bot_width(mut self, bot_width: f64) -> Self {
        self.bot_width = bot_width;
        self
    }

    pub fn with_half_field_width(mut self, half_field_width: f64) -> Self {
        self.half_field_width = half_field_width;
        self
    }

    pub fn with_drive_motor(mut self, motor: MotorType) -> Self {
        self.drive_motor = motor;
        self
    }

    pub fn with_arm_motor(mut self, motor: MotorType) -> Self {
        self.arm_motor = motor;
        self
    }

    pub fn with_pose_integration(mut self, mode: PoseIntegration) -> Self {
        self.pose_integration = mode;
        self
    }

    pub fn half_bot_width(&self) -> f64 {
        self.bot_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.bot_width, 18.0);
        assert_eq!(config.half_field_width, 72.0);
        assert_eq!(config.half_bot_width(), 9.0);
        assert_eq!(config.pose_integration, PoseIntegration::Internal);
    }

    #[test]
    fn test_builder_chain() {
        let config = BotConfig::default()
            .with_bot_width(16.0)
            .with_pose_integration(PoseIntegration::External);
        assert_eq!(config.bot_width, 16.0);
        assert_eq!(config.pose_integration, PoseIntegration::External);
    }
}
