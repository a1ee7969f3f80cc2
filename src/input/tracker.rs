//! Frame-visible input state.
//!
//! The tracker is the only mutable state shared between the event handlers
//! and the per-frame update: normalized pointer position, the
//! held-button flag, and the scroll/rotation accumulators. Handlers
//! mutate it; the frame updater reads it.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};

/// Vertical wheel deltas are divided by this before accumulating; it sets
/// the zoom sensitivity.
pub const WHEEL_ZOOM_DIVISOR: f32 = 200.0;

/// Initial vertical scroll accumulator, which doubles as the camera's
/// starting depth.
pub const INITIAL_SCROLL_Y: f32 = 4.0;

/// Accumulated raw input state read by the frame updater.
pub struct InputTracker {
    /// Normalized pointer position, both axes in [-0.5, 0.5].
    pointer: Vec2,
    /// Whether the primary button is held.
    held: bool,
    /// Running scroll deltas; `y` drives camera depth.
    scroll: Vec2,
    /// Running yaw accumulator, fed by the frame updater while held.
    rotation: f32,
    /// Live viewport size in physical pixels.
    viewport: (u32, u32),
}

impl InputTracker {
    /// Create a tracker for the given initial viewport size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pointer: Vec2::ZERO,
            held: false,
            scroll: Vec2::new(0.0, INITIAL_SCROLL_Y),
            rotation: 0.0,
            viewport: (width.max(1), height.max(1)),
        }
    }

    /// Feed a platform event into the tracker.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => self.on_pointer_move(x, y),
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.held = pressed;
                }
            }
            InputEvent::Wheel { delta_x, delta_y } => {
                self.on_wheel(delta_x, delta_y);
            }
        }
    }

    /// Normalize a raw pixel position against the current viewport.
    ///
    /// x maps to [-0.5, 0.5] left-to-right; y is flipped so positive is up.
    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32) {
        let (w, h) = self.viewport;
        self.pointer.x = raw_x / w as f32 - 0.5;
        self.pointer.y = -(raw_y / h as f32 - 0.5);
    }

    /// Accumulate a wheel event. Vertical deltas are scaled down by
    /// [`WHEEL_ZOOM_DIVISOR`].
    pub fn on_wheel(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll.x += delta_x;
        self.scroll.y += delta_y / WHEEL_ZOOM_DIVISOR;
    }

    /// Record the new viewport size. Subsequent pointer normalization uses
    /// this value, never a cached one.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
    }

    /// Add the pointer's x to the rotation accumulator.
    ///
    /// Called by the frame updater, once per frame, only while held.
    pub fn accumulate_rotation(&mut self) {
        self.rotation += self.pointer.x;
    }

    /// Normalized pointer position.
    #[must_use]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn held(&self) -> bool {
        self.held
    }

    /// Accumulated scroll deltas (y is the camera depth target).
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Accumulated rotation scalar.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Live viewport size.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_normalization_bounds() {
        let mut t = InputTracker::new(800, 600);
        for (x, y) in [(0.0, 0.0), (800.0, 600.0), (400.0, 300.0), (123.0, 456.0)] {
            t.on_pointer_move(x, y);
            let p = t.pointer();
            assert!(p.x >= -0.5 && p.x <= 0.5, "x out of range: {}", p.x);
            assert!(p.y >= -0.5 && p.y <= 0.5, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn pointer_normalization_values() {
        let mut t = InputTracker::new(800, 600);
        t.on_pointer_move(800.0, 0.0);
        assert_eq!(t.pointer(), Vec2::new(0.5, 0.5));
        t.on_pointer_move(0.0, 600.0);
        assert_eq!(t.pointer(), Vec2::new(-0.5, -0.5));
        t.on_pointer_move(400.0, 300.0);
        assert_eq!(t.pointer(), Vec2::ZERO);
    }

    #[test]
    fn resize_changes_normalization_basis() {
        let mut t = InputTracker::new(800, 600);
        t.on_resize(400, 300);
        t.on_pointer_move(400.0, 0.0);
        assert_eq!(t.pointer().x, 0.5);
    }

    #[test]
    fn wheel_is_additive() {
        let mut a = InputTracker::new(100, 100);
        a.on_wheel(3.0, 120.0);
        a.on_wheel(5.0, 80.0);

        let mut b = InputTracker::new(100, 100);
        b.on_wheel(8.0, 200.0);

        assert!((a.scroll().x - b.scroll().x).abs() < 1e-6);
        assert!((a.scroll().y - b.scroll().y).abs() < 1e-6);
    }

    #[test]
    fn wheel_divisor_applies_to_y_only() {
        let mut t = InputTracker::new(100, 100);
        t.on_wheel(200.0, 200.0);
        assert_eq!(t.scroll().x, 200.0);
        assert_eq!(t.scroll().y, INITIAL_SCROLL_Y + 1.0);
    }

    #[test]
    fn scroll_y_starts_at_default_depth() {
        let t = InputTracker::new(100, 100);
        assert_eq!(t.scroll().y, 4.0);
    }

    #[test]
    fn rotation_only_changes_when_fed() {
        let mut t = InputTracker::new(100, 100);
        t.on_pointer_move(100.0, 0.0); // pointer.x = 0.5
        assert_eq!(t.rotation(), 0.0);

        // Press and release without an accumulate call: unchanged.
        t.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        t.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert_eq!(t.rotation(), 0.0);

        t.accumulate_rotation();
        assert_eq!(t.rotation(), 0.5);
        t.accumulate_rotation();
        assert_eq!(t.rotation(), 1.0);
    }

    #[test]
    fn only_left_button_sets_held() {
        let mut t = InputTracker::new(100, 100);
        t.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        assert!(!t.held());
        t.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert!(t.held());
    }
}
