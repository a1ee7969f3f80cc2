//! Camera math and the input-driven camera rig.

pub mod core;
pub mod rig;

pub use self::core::{Camera, CameraUniform};
pub use rig::CameraRig;
