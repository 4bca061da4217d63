use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::{ColorSensor, DcMotor, DistanceSensor, Imu, Servo};

/// Configuration failure surfaced at robot init. Not recoverable by the
/// robot; the host reports it to the user.
#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("no device named `{0}` in the hardware map")]
    Missing(String),
    #[error("device `{name}` is a {found}, expected a {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Any device a hardware map can hold.
#[derive(Debug, Clone)]
pub enum Device {
    Motor(DcMotor),
    Servo(Servo),
    Distance(DistanceSensor),
    Color(ColorSensor),
    Imu(Imu),
}

impl Device {
    fn kind(&self) -> &'static str {
        match self {
            Device::Motor(_) => "motor",
            Device::Servo(_) => "servo",
            Device::Distance(_) => "distance sensor",
            Device::Color(_) => "color sensor",
            Device::Imu(_) => "imu",
        }
    }
}

/// Name-keyed device registry shared between the robot model and user
/// control code.
///
/// Lookups clone the handle; all handles alias the same underlying device
/// state.
#[derive(Debug, Clone, Default)]
pub struct HardwareMap {
    devices: HashMap<String, Device>,
}

impl HardwareMap {
    pub fn new() -> Self {
        HardwareMap::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, device: Device) {
        let name = name.into();
        debug!("hardware map: registering {} `{}`", device.kind(), name);
        self.devices.insert(name, device);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.devices.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn get(&self, name: &str) -> Result<&Device, HardwareError> {
        self.devices
            .get(name)
            .ok_or_else(|| HardwareError::Missing(name.to_string()))
    }

    pub fn motor(&self, name: &str) -> Result<DcMotor, HardwareError> {
        match self.get(name)? {
            Device::Motor(motor) => Ok(motor.clone()),
            other => Err(HardwareError::WrongType {
                name: name.to_string(),
                expected: "motor",
                found: other.kind(),
            }),
        }
    }

    pub fn servo(&self, name: &str) -> Result<Servo, HardwareError> {
        match self.get(name)? {
            Device::Servo(servo) => Ok(servo.clone()),
            other => Err(HardwareError::WrongType {
                name: name.to_string(),
                expected: "servo",
                found: other.kind(),
            }),
        }
    }

    pub fn distance_sensor(&self, name: &str) -> Result<DistanceSensor, HardwareError> {
        match self.get(name)? {
            Device::Distance(sensor) => Ok(sensor.clone()),
            other => Err(HardwareError::WrongType {
                name: name.to_string(),
                expected: "distance sensor",
                found: other.kind(),
            }),
        }
    }

    pub fn color_sensor(&self, name: &str) -> Result<ColorSensor, HardwareError> {
        match self.get(name)? {
            Device::Color(sensor) => Ok(sensor.clone()),
            other => Err(HardwareError::WrongType {
                name: name.to_string(),
                expected: "color sensor",
                found: other.kind(),
            }),
        }
    }

    pub fn imu(&self, name: &str) -> Result<Imu, HardwareError> {
        match self.get(name)? {
            Device::Imu(imu) => Ok(imu.clone()),
            other => Err(HardwareError::WrongType {
                name: name.to_string(),
                expected: "imu",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MotorType;

    #[test]
    fn test_lookup_clones_share_state() {
        let mut map = HardwareMap::new();
        map.insert("lift", Device::Motor(DcMotor::new(MotorType::neverest40())));
        let a = map.motor("lift").unwrap();
        let b = map.motor("lift").unwrap();
        a.set_power(0.5);
        assert_eq!(b.power(), 0.5);
    }

    #[test]
    fn test_missing_device() {
        let map = HardwareMap::new();
        let err = map.imu("imu").unwrap_err();
        assert!(matches!(err, HardwareError::Missing(name) if name == "imu"));
    }

    #[test]
    fn test_wrong_type() {
        let mut map = HardwareMap::new();
        map.insert("finger_servo", Device::Servo(Servo::new()));
        let err = map.motor("finger_servo").unwrap_err();
        assert!(matches!(
            err,
            HardwareError::WrongType {
                expected: "motor",
                found: "servo",
                ..
            }
        ));
    }
}
