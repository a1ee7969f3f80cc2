//! Standalone scene window backed by winit.
//!
//! ```no_run
//! # use marquee::Viewer;
//! Viewer::builder()
//!     .with_title("marquee")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::MarqueeError, options::Options, InputEvent, MouseButton,
    SceneEngine,
};

/// Device pixel ratios above this render more pixels than they add
/// sharpness; the surface is capped accordingly.
const MAX_PIXEL_RATIO: f64 = 2.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Marquee".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the marquee scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Option<Options>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), MarqueeError> {
        let event_loop = EventLoop::new()
            .map_err(|e| MarqueeError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MarqueeError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    options: Option<Options>,
    title: String,
}

/// Compute the wgpu surface size, capping the device pixel ratio at
/// [`MAX_PIXEL_RATIO`].
fn surface_size(
    inner: winit::dpi::PhysicalSize<u32>,
    scale_factor: f64,
) -> (u32, u32) {
    let factor = if scale_factor > MAX_PIXEL_RATIO {
        MAX_PIXEL_RATIO / scale_factor
    } else {
        1.0
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |v: u32| ((f64::from(v) * factor) as u32).max(1);
    (scaled(inner.width), scaled(inner.height))
}

impl ViewerApp {
    fn resize_to_window(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        // Only the render surface is capped; cursor events stay in window
        // pixels, so the tracker must keep the full window size.
        let inner = window.inner_size();
        let surface = surface_size(inner, window.scale_factor());
        if let Some(engine) = &mut self.engine {
            engine.resize((inner.width, inner.height), surface);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let surface = surface_size(inner, window.scale_factor());
        let options = self.options.take().unwrap_or_default();

        let engine = match pollster::block_on(SceneEngine::new(
            window.clone(),
            (inner.width, inner.height),
            surface,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(_)
            | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_to_window();
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    let dt = engine.tick();
                    engine.update(dt);
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            engine.reconfigure_surface();
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed: state == ElementState::Pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Winit reports scroll-down as negative; zooming out on
                // scroll-down needs the depth target to grow, so flip the
                // sign. Line deltas are scaled to a nominal pixel height.
                #[allow(clippy::cast_possible_truncation)]
                let (delta_x, delta_y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        (-x * 100.0, -y * 100.0)
                    }
                    MouseScrollDelta::PixelDelta(pos) => {
                        (-pos.x as f32, -pos.y as f32)
                    }
                };
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::Wheel {
                        delta_x,
                        delta_y,
                    });
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_caps_pixel_ratio() {
        let inner = winit::dpi::PhysicalSize::new(3000, 2100);
        // DPR 3 renders at the DPR-2 equivalent.
        assert_eq!(surface_size(inner, 3.0), (2000, 1400));
        // DPR 2 and below pass through untouched.
        assert_eq!(surface_size(inner, 2.0), (3000, 2100));
        assert_eq!(surface_size(inner, 1.0), (3000, 2100));
    }

    #[test]
    fn surface_size_never_zero() {
        let inner = winit::dpi::PhysicalSize::new(0, 0);
        assert_eq!(surface_size(inner, 1.0), (1, 1));
    }

    #[test]
    fn pointer_normalization_unaffected_by_surface_cap() {
        use crate::input::InputTracker;

        // DPR 3 shrinks the surface, but cursor events stay in window
        // pixels. A cursor in the bottom-right corner must still land on
        // the normalization bounds, not past them.
        let inner = winit::dpi::PhysicalSize::new(3000, 2100);
        assert_eq!(surface_size(inner, 3.0), (2000, 1400));

        let mut tracker = InputTracker::new(inner.width, inner.height);
        tracker.handle_event(InputEvent::CursorMoved {
            x: 3000.0,
            y: 2100.0,
        });
        let p = tracker.pointer();
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y + 0.5).abs() < 1e-6);
    }
}
