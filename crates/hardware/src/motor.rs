use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use simcore::Model;

/// Encoder and speed constants for a class of DC motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorType {
    /// Encoder ticks per full output-shaft rotation.
    pub ticks_per_rotation: f64,
    /// Tick rate at full commanded power.
    pub max_ticks_per_second: f64,
}

impl MotorType {
    pub fn new(ticks_per_rotation: f64, max_ticks_per_second: f64) -> Self {
        MotorType {
            ticks_per_rotation,
            max_ticks_per_second,
        }
    }

    /// NeveRest 40 gearmotor, the stock drive and arm motor.
    pub fn neverest40() -> Self {
        MotorType::new(1120.0, 2500.0)
    }
}

impl Default for MotorType {
    fn default() -> Self {
        MotorType::neverest40()
    }
}

/// Rotation sense of positive power, settable by user control code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

#[derive(Debug, Default)]
struct MotorInner {
    power: f64,
    direction: Direction,
    ticks: f64,
}

/// Simulated DC motor: commanded power in `[-1, 1]` integrated into
/// encoder ticks over each update interval.
///
/// The handle is `Clone` and thread-safe; control code sets power while
/// the physics tick drains tick deltas.
#[derive(Debug, Clone, Default)]
pub struct DcMotor {
    motor_type: MotorType,
    inner: Arc<Mutex<MotorInner>>,
}

impl DcMotor {
    pub fn new(motor_type: MotorType) -> Self {
        DcMotor {
            motor_type,
            inner: Arc::new(Mutex::new(MotorInner::default())),
        }
    }

    pub fn motor_type(&self) -> MotorType {
        self.motor_type
    }

    /// Command motor power, clamped to `[-1, 1]`.
    pub fn set_power(&self, power: f64) {
        self.inner.lock().power = power.clamp(-1.0, 1.0);
    }

    pub fn power(&self) -> f64 {
        self.inner.lock().power
    }

    pub fn set_direction(&self, direction: Direction) {
        self.inner.lock().direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.inner.lock().direction
    }

    /// Cumulative encoder position in ticks.
    pub fn current_position(&self) -> f64 {
        self.inner.lock().ticks
    }

    /// Advance the motor by `dt_millis` and return the tick delta.
    ///
    /// The delta is `power * max_ticks_per_second * dt`, signed by the
    /// configured direction, and is also accumulated into the encoder.
    pub fn update(&self, dt_millis: f64) -> f64 {
        let mut inner = self.inner.lock();
        let delta = inner.power
            * inner.direction.sign()
            * self.motor_type.max_ticks_per_second
            * dt_millis
            / 1000.0;
        inner.ticks += delta;
        delta
    }

    /// Zero the commanded power and the encoder. A no-op on an already
    /// stopped motor.
    pub fn stop_and_reset(&self) {
        let mut inner = self.inner.lock();
        inner.power = 0.0;
        inner.ticks = 0.0;
    }
}

impl Model for DcMotor {
    fn reset(&mut self) {
        self.stop_and_reset();
    }
}
