//! The robot orchestrator.
//!
//! One physics tick runs motor updates, kinematics, pose integration, arm
//! integration, and sensor projection, in that order. The display tick
//! reads the resulting scalars and writes them to a [`DisplaySink`]. The
//! two serialize on the instance's state lock so the display always sees a
//! coherent snapshot.

use log::{info, trace};
use parking_lot::Mutex;

use hardware::{
    ColorSensor, DcMotor, Device, DistanceSensor, HardwareError, HardwareMap, Imu, Servo,
};
use mechanics::{Arm, ChassisGeometry, FieldBounds, MecanumKinematics, PoseIntegrator, WheelSpin};
use simcore::{BodyDelta, BotState, DisplaySink, Model, Pose};

use crate::config::{BotConfig, PoseIntegration};
use crate::projector::SensorProjector;

/// Drive motor names in wheel order: back-left, front-left, front-right,
/// back-right.
pub const DRIVE_MOTOR_NAMES: [&str; 4] = [
    "back_left_motor",
    "front_left_motor",
    "front_right_motor",
    "back_right_motor",
];

/// Distance sensor names in projection order: front, left, back, right.
pub const DISTANCE_SENSOR_NAMES: [&str; 4] = [
    "front_distance",
    "left_distance",
    "back_distance",
    "right_distance",
];

pub const ARM_ROTATION_MOTOR_NAME: &str = "arm_rotation_motor";
pub const ARM_EXTENSION_MOTOR_NAME: &str = "arm_extension_motor";
pub const IMU_NAME: &str = "imu";
pub const COLOR_SENSOR_NAME: &str = "color_sensor";
pub const FINGER_SERVO_NAME: &str = "finger_servo";

/// Everything the physics tick mutates, behind one lock.
#[derive(Debug)]
struct CoreState {
    pose: PoseIntegrator,
    arm: Arm,
    wheels: WheelSpin,
    last_delta: BodyDelta,
}

/// Four-wheel mecanum robot with an articulated arm and a sensor suite.
///
/// Built against a [`HardwareMap`]; the map (and user control code holding
/// clones of the same handles) stays outside. Both tick entry points take
/// `&self` and serialize internally.
#[derive(Debug)]
pub struct MecanumBot {
    config: BotConfig,
    kinematics: MecanumKinematics,
    drive_motors: [DcMotor; 4],
    arm_rotation_motor: DcMotor,
    arm_extension_motor: DcMotor,
    finger_servo: Servo,
    imu: Imu,
    projector: SensorProjector,
    state: Mutex<CoreState>,
}

impl MecanumBot {
    /// Pre-populate a hardware map with default-constructed devices under
    /// the names [`init`](MecanumBot::init) resolves.
    pub fn create_hardware_map(config: &BotConfig) -> HardwareMap {
        let mut map = HardwareMap::new();
        for name in DRIVE_MOTOR_NAMES {
            map.insert(name, Device::Motor(DcMotor::new(config.drive_motor)));
        }
        map.insert(
            ARM_ROTATION_MOTOR_NAME,
            Device::Motor(DcMotor::new(config.arm_motor)),
        );
        map.insert(
            ARM_EXTENSION_MOTOR_NAME,
            Device::Motor(DcMotor::new(config.arm_motor)),
        );
        for name in DISTANCE_SENSOR_NAMES {
            map.insert(
                name,
                Device::Distance(DistanceSensor::new(config.half_field_width)),
            );
        }
        map.insert(IMU_NAME, Device::Imu(Imu::new()));
        map.insert(COLOR_SENSOR_NAME, Device::Color(ColorSensor::new()));
        map.insert(FINGER_SERVO_NAME, Device::Servo(Servo::new()));
        map
    }

    /// Resolve every named handle and build the kinematic core.
    ///
    /// A missing or wrong-typed device is fatal; the error carries the
    /// offending name for the host to report.
    pub fn init(config: BotConfig, map: &HardwareMap) -> Result<Self, HardwareError> {
        let drive_motors = [
            map.motor(DRIVE_MOTOR_NAMES[0])?,
            map.motor(DRIVE_MOTOR_NAMES[1])?,
            map.motor(DRIVE_MOTOR_NAMES[2])?,
            map.motor(DRIVE_MOTOR_NAMES[3])?,
        ];
        let arm_rotation_motor = map.motor(ARM_ROTATION_MOTOR_NAME)?;
        let arm_extension_motor = map.motor(ARM_EXTENSION_MOTOR_NAME)?;
        let distance_sensors = [
            map.distance_sensor(DISTANCE_SENSOR_NAMES[0])?,
            map.distance_sensor(DISTANCE_SENSOR_NAMES[1])?,
            map.distance_sensor(DISTANCE_SENSOR_NAMES[2])?,
            map.distance_sensor(DISTANCE_SENSOR_NAMES[3])?,
        ];
        let imu = map.imu(IMU_NAME)?;
        let color_sensor = map.color_sensor(COLOR_SENSOR_NAME)?;
        let finger_servo = map.servo(FINGER_SERVO_NAME)?;

        let geometry = ChassisGeometry::new(config.bot_width);
        let half_bot_width = geometry.half_bot_width();
        let kinematics = MecanumKinematics::new(geometry);
        let bounds = FieldBounds::new(config.half_field_width, half_bot_width);
        let projector =
            SensorProjector::new(distance_sensors, color_sensor, imu.clone(), half_bot_width);

        info!(
            "mecanum bot initialized: bot_width = {}, field limit = {}",
            config.bot_width,
            bounds.limit()
        );

        Ok(MecanumBot {
            config,
            kinematics,
            drive_motors,
            arm_rotation_motor,
            arm_extension_motor,
            finger_servo,
            imu,
            projector,
            state: Mutex::new(CoreState {
                pose: PoseIntegrator::new(bounds),
                arm: Arm::new(),
                wheels: WheelSpin::new(),
                last_delta: BodyDelta::default(),
            }),
        })
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// One physics tick of `dt_millis`.
    ///
    /// Runs on the step thread; excludes the display tick for its whole
    /// duration.
    pub fn update_state_and_sensors(&self, dt_millis: f64) {
        let mut state = self.state.lock();

        let mut wheel_travel = [0.0; 4];
        for (i, motor) in self.drive_motors.iter().enumerate() {
            let tick_delta = motor.update(dt_millis);
            let ticks_per_rotation = motor.motor_type().ticks_per_rotation;
            let mut travel = self.kinematics.ticks_to_travel(tick_delta, ticks_per_rotation);
            let mut spin_degrees = 360.0 * tick_delta / ticks_per_rotation;
            if i < 2 {
                // Left-side wheels are mirror mounted.
                travel = -travel;
                spin_degrees = -spin_degrees;
            }
            wheel_travel[i] = travel;
            state.wheels.accumulate(i, spin_degrees);
        }

        let delta = self.kinematics.body_delta(wheel_travel);
        state.last_delta = delta;
        trace!(
            "body delta: dx = {:+.6}, dy = {:+.6}, dtheta = {:+.6}, strain = {:+.6}",
            delta.dx,
            delta.dy,
            delta.dtheta,
            delta.strain
        );

        if self.config.pose_integration == PoseIntegration::Internal {
            state.pose.step(&delta);
        }

        let rotation_ticks = self.arm_rotation_motor.update(dt_millis);
        let extension_ticks = self.arm_extension_motor.update(dt_millis);
        state.arm.integrate(rotation_ticks, extension_ticks);

        self.projector.project(state.pose.pose());
    }

    /// One display tick.
    ///
    /// Runs on the presentation thread; reads the scalar snapshot under
    /// the state lock and only writes through the sink.
    pub fn update_display(&self, sink: &mut dyn DisplaySink) {
        let state = self.state.lock();

        let pose = state.pose.pose();
        sink.set_chassis_pose(pose.x, pose.y, pose.heading);

        sink.set_arm_rotation(state.arm.rotation_degrees());
        sink.set_mid_arm_translation(state.arm.extension() / 2.0);
        sink.set_fore_arm_translation(state.arm.extension() / 2.0);

        let finger = self.finger_servo.internal_position();
        sink.set_finger_translations(finger, -finger);

        for (i, angle) in state.wheels.angles().into_iter().enumerate() {
            sink.set_wheel_rotation(i, angle);
        }
    }

    /// Stop and zero the drive motors and close the IMU.
    ///
    /// Safe to call more than once; repeat calls are no-ops.
    pub fn power_down_and_reset(&self) {
        for motor in &self.drive_motors {
            motor.stop_and_reset();
        }
        if !self.imu.is_closed() {
            self.imu.close();
        }
        info!("mecanum bot powered down");
    }

    /// Reposition the robot; the next sensor projection uses this pose.
    pub fn set_pose(&self, pose: Pose) {
        self.state.lock().pose.set_pose(pose);
    }

    pub fn pose(&self) -> Pose {
        self.state.lock().pose.pose()
    }

    /// Robot-frame displacement (including strain) from the most recent
    /// physics tick.
    pub fn last_body_delta(&self) -> BodyDelta {
        self.state.lock().last_delta
    }

    /// Coherent copy of the scalar state.
    pub fn state_snapshot(&self) -> BotState {
        let state = self.state.lock();
        BotState {
            pose: state.pose.pose(),
            arm_rotation: state.arm.rotation_degrees(),
            arm_extension: state.arm.extension(),
            wheel_rotations: state.wheels.angles(),
        }
    }

    /// Return the integrators to their zero state, e.g. when the host
    /// repositions the robot between runs.
    pub fn reset_state(&self) {
        let mut state = self.state.lock();
        state.pose.reset();
        state.arm.reset();
        state.wheels.reset();
        state.last_delta = BodyDelta::default();
    }
}
