// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Decorative 3D marquee scene rendered with wgpu.
//!
//! An extruded text mesh floats at the origin among scattered
//! donut/cuboid pairs, all driven by pointer position: the camera glides
//! toward the pointer, holding the mouse orbits the view, and the scroll
//! wheel eases the camera depth.
//!
//! # Key entry points
//!
//! - [`Viewer`] - standalone window that runs the scene
//! - [`engine::SceneEngine`] - GPU resources plus the frame loop facade
//! - [`scene::Scene`] - text and decorative-pair state
//! - [`options::Options`] - runtime configuration (assets, camera, scene,
//!   display)
//!
//! # Architecture
//!
//! Everything runs on the main thread. Input handlers fold winit events
//! into an [`input::InputTracker`]; each frame the
//! [`camera::CameraRig`] and [`scene::Scene`] read it, advance their
//! easing state, and the renderer re-uploads instance matrices before a
//! single forward pass.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod font;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
pub mod viewer;

pub use engine::SceneEngine;
pub use error::MarqueeError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use viewer::Viewer;
