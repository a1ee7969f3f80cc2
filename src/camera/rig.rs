//! Eased camera rig driven by pointer, hold, and scroll state.

use glam::Vec3;

use super::core::Camera;
use crate::animation::Glide;
use crate::input::InputTracker;

/// Divisor applied to the accumulated hold rotation before it becomes
/// camera yaw.
pub const YAW_DIVISOR: f32 = 10.0;

/// Smoothed camera state.
///
/// Each axis is an independent [`Glide`] so a new input retargets the
/// easing mid-flight instead of snapping. The rig never touches the GPU;
/// [`crate::renderer::SceneRenderer`] uploads the resulting matrices.
#[derive(Debug, Clone)]
pub struct CameraRig {
    camera: Camera,
    x: Glide,
    y: Glide,
    z: Glide,
    yaw: Glide,
}

impl CameraRig {
    /// A rig at the initial viewpoint, backed off along +Z.
    #[must_use]
    pub fn new(aspect: f32, fovy: f32, znear: f32, zfar: f32) -> Self {
        let z = crate::input::INITIAL_SCROLL_Y;
        Self {
            camera: Camera {
                position: Vec3::new(0.0, 0.0, z),
                yaw: 0.0,
                aspect,
                fovy,
                znear,
                zfar,
            },
            x: Glide::at(0.0),
            y: Glide::at(0.0),
            z: Glide::at(z),
            yaw: Glide::at(0.0),
        }
    }

    /// Advance one frame.
    ///
    /// While the mouse is held the rig accumulates rotation and eases
    /// yaw toward it; otherwise it eases position toward the pointer.
    /// The two branches are exclusive, so releasing the button leaves
    /// the last yaw in place.
    pub fn update(&mut self, tracker: &mut InputTracker, dt: f32) {
        if tracker.held() {
            tracker.accumulate_rotation();
            self.yaw.retarget(tracker.rotation() / YAW_DIVISOR);
        } else {
            let pointer = tracker.pointer();
            self.x.retarget(pointer.x);
            self.y.retarget(pointer.y);
        }

        self.x.advance(dt);
        self.y.advance(dt);
        self.z.advance(dt);
        self.yaw.advance(dt);

        self.camera.position =
            Vec3::new(self.x.value(), self.y.value(), self.z.value());
        self.camera.yaw = self.yaw.value();
    }

    /// Ease the camera depth toward the new scroll total.
    pub fn on_wheel(&mut self, scroll_y: f32) {
        self.z.retarget(scroll_y);
    }

    /// Track a viewport resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// The camera in its current eased state.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use crate::input::{InputEvent, MouseButton};

    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(16.0 / 9.0, 75.0, 0.1, 100.0)
    }

    fn settle(rig: &mut CameraRig, tracker: &mut InputTracker) {
        for _ in 0..120 {
            rig.update(tracker, 1.0 / 60.0);
        }
    }

    #[test]
    fn starts_backed_off_on_z() {
        let r = rig();
        assert_eq!(r.camera().position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(r.camera().yaw, 0.0);
    }

    #[test]
    fn glides_toward_pointer_when_released() {
        let mut r = rig();
        let mut tracker = InputTracker::new(800, 600);
        tracker.handle_event(InputEvent::CursorMoved { x: 600.0, y: 360.0 });

        settle(&mut r, &mut tracker);
        let p = r.camera().position;
        assert!((p.x - 0.25).abs() < 1e-3);
        assert!((p.y - -0.1).abs() < 1e-3);
    }

    #[test]
    fn holding_rotates_instead_of_panning() {
        let mut r = rig();
        let mut tracker = InputTracker::new(800, 600);
        tracker.handle_event(InputEvent::CursorMoved { x: 800.0, y: 300.0 });
        tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });

        r.update(&mut tracker, 1.0 / 60.0);
        // Rotation accumulated once and position was not retargeted.
        assert_eq!(tracker.rotation(), 0.5);
        assert_eq!(r.camera().position.x, 0.0);
        assert!(r.yaw.target() > 0.0);
    }

    #[test]
    fn yaw_converges_to_rotation_over_divisor() {
        let mut r = rig();
        let mut tracker = InputTracker::new(800, 600);
        tracker.handle_event(InputEvent::CursorMoved { x: 800.0, y: 300.0 });
        tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });

        r.update(&mut tracker, 1.0 / 60.0);
        tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        tracker.handle_event(InputEvent::CursorMoved { x: 400.0, y: 300.0 });

        settle(&mut r, &mut tracker);
        // One accumulation of pointer.x = 0.5, divided by 10.
        assert!((r.camera().yaw - 0.05).abs() < 1e-4);
    }

    #[test]
    fn depth_holds_without_wheel_input() {
        let mut r = rig();
        let mut tracker = InputTracker::new(800, 600);
        settle(&mut r, &mut tracker);
        assert_eq!(r.camera().position.z, 4.0);
    }

    #[test]
    fn wheel_eases_depth_toward_scroll_total() {
        let mut r = rig();
        let mut tracker = InputTracker::new(800, 600);
        tracker.handle_event(InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: 200.0,
        });
        r.on_wheel(tracker.scroll().y);

        let before = r.camera().position.z;
        r.update(&mut tracker, 1.0 / 60.0);
        assert!(r.camera().position.z > before);

        settle(&mut r, &mut tracker);
        assert!((r.camera().position.z - 5.0).abs() < 1e-3);
    }
}
