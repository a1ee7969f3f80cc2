//! Scene state: the optional text object and the decorative pairs.

pub mod builder;
pub mod drift;
pub mod object;

use glam::{Vec2, Vec3};
use rand::Rng;

pub use object::{DecorPair, TextObject, Transform};

/// All animated scene state.
///
/// Built once after asset load; the engine mutates it every frame. The
/// text object is absent until (and unless) the font produced a mesh.
pub struct Scene {
    text: Option<TextObject>,
    pairs: Vec<DecorPair>,
    built: bool,
}

impl Scene {
    /// An empty, unbuilt scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: None,
            pairs: Vec::new(),
            built: false,
        }
    }

    /// Populate the scene: the text object (when its mesh exists) and the
    /// decorative pairs. A second call is a no-op, so a double-fired
    /// load callback cannot duplicate objects.
    pub fn build(
        &mut self,
        has_text_mesh: bool,
        pair_count: usize,
        rng: &mut impl Rng,
    ) {
        if self.built {
            log::warn!("scene already built, ignoring rebuild");
            return;
        }
        self.built = true;

        if has_text_mesh {
            self.text = Some(TextObject::new());
        }
        self.pairs = builder::scatter_pairs(pair_count, rng);
    }

    /// Advance all scene animation by one frame.
    ///
    /// `t` is seconds since startup (the phase for periodic motion),
    /// `dt` the frame delta, `pointer` the normalized cursor position.
    pub fn update(&mut self, t: f32, dt: f32, pointer: Vec2) {
        if let Some(text) = &mut self.text {
            // Absolute assignment, not additive: the text bobs on a
            // fixed circle around the origin.
            text.position = Vec3::new(t.cos() / 10.0, t.sin() / 10.0, 0.0);
            text.tilt_x.retarget(pointer.y / 2.0);
            text.tilt_y.retarget(pointer.x / 2.0);
            text.tilt_x.advance(dt);
            text.tilt_y.advance(dt);
        }

        if !self.pairs.is_empty() {
            drift::apply(&mut self.pairs, t);
        }
    }

    /// The text object, if its mesh was built.
    #[must_use]
    pub fn text(&self) -> Option<&TextObject> {
        self.text.as_ref()
    }

    /// The decorative pairs in creation order.
    #[must_use]
    pub fn pairs(&self) -> &[DecorPair] {
        &self.pairs
    }

    /// Whether `build` has run.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn build_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = Scene::new();
        scene.build(true, 70, &mut rng);
        assert_eq!(scene.pairs().len(), 70);
        let first = scene.pairs()[0].clone();

        scene.build(true, 70, &mut rng);
        assert_eq!(scene.pairs().len(), 70);
        assert_eq!(scene.pairs()[0], first);
    }

    #[test]
    fn text_absent_without_mesh() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = Scene::new();
        scene.build(false, 10, &mut rng);
        assert!(scene.text().is_none());

        // Update must tolerate the missing text object.
        scene.update(1.0, 1.0 / 60.0, Vec2::new(0.3, -0.2));
        assert_eq!(scene.pairs().len(), 10);
    }

    #[test]
    fn text_position_at_t_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = Scene::new();
        scene.build(true, 0, &mut rng);
        scene.update(0.0, 1.0 / 60.0, Vec2::ZERO);
        let text = scene.text().unwrap();
        // cos(0)/10 on x is 0.1; y is exactly 0.
        assert!((text.position.x - 0.1).abs() < 1e-6);
        assert_eq!(text.position.y, 0.0);
    }

    #[test]
    fn text_position_is_absolute_not_additive() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = Scene::new();
        scene.build(true, 0, &mut rng);
        scene.update(1.5, 1.0 / 60.0, Vec2::ZERO);
        let once = scene.text().unwrap().position;
        scene.update(1.5, 1.0 / 60.0, Vec2::ZERO);
        assert_eq!(scene.text().unwrap().position, once);
    }
}
