//! Platform-agnostic input events and the frame-visible input state.

pub mod event;
pub mod tracker;

pub use event::{InputEvent, MouseButton};
pub use tracker::{InputTracker, INITIAL_SCROLL_Y, WHEEL_ZOOM_DIVISOR};
