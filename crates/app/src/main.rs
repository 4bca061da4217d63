//! Headless demo host for the mecanum robot model.
//!
//! Runs the two-surface split the way a real simulator would: the main
//! thread steps `update_state_and_sensors` at 50 Hz of simulated time and
//! plays the role of user control code driving the motor and servo
//! handles, while a display thread concurrently drains `update_display`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, LevelFilter};
use parking_lot::Mutex;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use hardware::Direction;
use robot::bot::{ARM_ROTATION_MOTOR_NAME, DRIVE_MOTOR_NAMES, FINGER_SERVO_NAME};
use robot::{BotConfig, MecanumBot};
use simcore::DisplayFrame;

const PHYSICS_DT_MILLIS: f64 = 20.0; // 50 Hz step thread
const PHASE_STEPS: u32 = 100; // 2 s of simulated time per drive phase

/// Drive power patterns in wheel order (back-left, front-left,
/// front-right, back-right), assuming the left side is set to reverse.
const PHASES: [(&str, [f64; 4]); 4] = [
    ("forward", [0.5, 0.5, 0.5, 0.5]),
    ("strafe right", [-0.5, 0.5, -0.5, 0.5]),
    ("spin", [-0.5, -0.5, 0.5, 0.5]),
    ("hold", [0.0, 0.0, 0.0, 0.0]),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config: BotConfig = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => BotConfig::default(),
    };

    let map = MecanumBot::create_hardware_map(&config);
    let bot = Arc::new(MecanumBot::init(config, &map)?);

    // What user control code does first on this chassis: reverse the left
    // side so positive power drives every wheel forward.
    for name in &DRIVE_MOTOR_NAMES[..2] {
        map.motor(name)?.set_direction(Direction::Reverse);
    }

    let running = Arc::new(AtomicBool::new(true));
    let frame = Arc::new(Mutex::new(DisplayFrame::default()));

    let display_thread = {
        let bot = Arc::clone(&bot);
        let running = Arc::clone(&running);
        let frame = Arc::clone(&frame);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                let mut local = DisplayFrame::default();
                bot.update_display(&mut local);
                *frame.lock() = local;
                thread::sleep(Duration::from_millis(5));
            }
        })
    };

    let arm_motor = map.motor(ARM_ROTATION_MOTOR_NAME)?;
    let finger = map.servo(FINGER_SERVO_NAME)?;
    arm_motor.set_power(0.4);

    for (label, powers) in PHASES {
        info!("phase: {label}");
        for (name, power) in DRIVE_MOTOR_NAMES.iter().zip(powers) {
            map.motor(name)?.set_power(power);
        }
        if label == "hold" {
            // Drive phases are over: close the gripper on whatever is
            // in front of the bot.
            finger.set_position(0.3);
        }

        for _ in 0..PHASE_STEPS {
            bot.update_state_and_sensors(PHYSICS_DT_MILLIS);
            thread::sleep(Duration::from_millis(1));
        }
        info!("pose after {label}: {:?}", bot.pose());
    }

    running.store(false, Ordering::Relaxed);
    display_thread.join().expect("display thread panicked");

    bot.power_down_and_reset();

    let snapshot = bot.state_snapshot();
    info!("final snapshot:\n{}", serde_json::to_string_pretty(&snapshot)?);
    info!(
        "final display frame:\n{}",
        serde_json::to_string_pretty(&*frame.lock())?
    );

    Ok(())
}
