//! The mecanum robot model: configuration, sensor projection, and the
//! orchestrator that ties motors, kinematics, integrators, and sensors
//! into the physics/display tick pair.

pub mod bot;
pub mod config;
pub mod projector;

pub use bot::MecanumBot;
pub use config::{BotConfig, PoseIntegration};
pub use projector::SensorProjector;
