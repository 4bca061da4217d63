//! Simulated devices: motors, servos, sensors, and the named hardware map.
//!
//! Every handle is a cheap clone around shared interior state, so the same
//! device can be held by the robot model, the hardware map, and user
//! control code on another thread. Handles synchronize themselves; callers
//! never need an outer lock.

pub mod map;
pub mod motor;
pub mod sensor;
pub mod servo;

pub use map::{Device, HardwareError, HardwareMap};
pub use motor::{DcMotor, Direction, MotorType};
pub use sensor::{ColorSensor, DistanceSensor, Imu};
pub use servo::Servo;
