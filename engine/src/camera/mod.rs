//! Camera Module
//!
//! Control rotation, aim zoom and the third-person camera boom.
//! Window-system agnostic: it only deals with camera state and math.

pub mod boom;
pub mod look;
pub mod zoom;

pub use boom::{BoomCollisionConfig, BoomConfig, CameraBoom};
pub use look::{ControlRotation, LookConfig, LookRates, PITCH_LIMIT_MAX, PITCH_LIMIT_MIN};
pub use zoom::{CameraZoom, ZoomConfig};
