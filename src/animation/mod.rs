//! Retargetable property tweens.
//!
//! Camera follow, camera yaw, camera depth, and text tilt are all driven
//! by [`Glide`] values: short eased transitions whose goal is replaced
//! every frame (or on every wheel event) rather than spawning a new
//! animation per update.

pub mod easing;
pub mod glide;

pub use easing::EasingFunction;
pub use glide::Glide;
