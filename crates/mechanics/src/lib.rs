pub mod arm;
pub mod kinematics;
pub mod pose;
pub mod wheels;

pub use arm::Arm;
pub use kinematics::{ChassisGeometry, MecanumKinematics};
pub use pose::{FieldBounds, PoseIntegrator};
pub use wheels::WheelSpin;
