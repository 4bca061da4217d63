pub mod angle;
pub mod display;
pub mod traits;

pub use angle::normalize_radians;
pub use display::{DisplayFrame, DisplaySink};
pub use traits::{BodyDelta, BotState, Model, Pose};
