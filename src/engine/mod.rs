//! The scene engine: owns GPU resources, scene state, and the frame loop
//! internals behind a small facade the viewer drives.

use crate::camera::CameraRig;
use crate::error::MarqueeError;
use crate::font::Typeface;
use crate::geometry::{cuboid, text, torus, MeshData, TorusParams};
use crate::gpu::{MatcapTexture, RenderContext};
use crate::input::{InputEvent, InputTracker};
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::Scene;
use crate::util::FrameTiming;

/// The decorative scene engine.
///
/// Construction acquires the GPU, tessellates the meshes, and scatters
/// the decorative pairs. Missing assets degrade instead of failing: no
/// font means no text mesh, no matcap image means the normal material.
///
/// # Frame loop
///
/// Per frame the viewer calls [`handle_input`](Self::handle_input) for
/// each event, then [`update`](Self::update) with the frame delta, then
/// [`render`](Self::render).
pub struct SceneEngine {
    context: RenderContext,
    renderer: SceneRenderer,
    rig: CameraRig,
    tracker: InputTracker,
    scene: Scene,
    timing: FrameTiming,
    options: Options,
}

impl SceneEngine {
    /// Create the engine for the given window surface.
    ///
    /// `window_size` is the window's physical size and `surface_size` the
    /// (possibly pixel-ratio-capped) render surface size. Cursor events
    /// arrive in window pixels, so pointer normalization must use the
    /// window size even when the surface renders smaller.
    ///
    /// # Errors
    ///
    /// Returns `MarqueeError::Gpu` if GPU initialization fails. Asset
    /// failures are logged and degrade the scene instead.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        window_size: (u32, u32),
        surface_size: (u32, u32),
        options: Options,
    ) -> Result<Self, MarqueeError> {
        let context = RenderContext::new(window, surface_size).await?;

        let text_mesh = load_text_mesh(&options);
        let matcap = match MatcapTexture::load(
            &context.device,
            &context.queue,
            &options.assets.matcap_path,
        ) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!(
                    "matcap texture {:?} unavailable ({e}); using normal \
                     material",
                    options.assets.matcap_path
                );
                None
            }
        };

        let donut_mesh = torus::generate(&TorusParams::default());
        let cuboid_mesh = cuboid::unit();

        let mut scene = Scene::new();
        scene.build(
            text_mesh.is_some(),
            options.scene.pair_count,
            &mut rand::rng(),
        );

        let renderer = SceneRenderer::new(
            &context,
            &donut_mesh,
            &cuboid_mesh,
            text_mesh.as_ref(),
            matcap.as_ref(),
            options.display.material,
            options.scene.pair_count,
        );

        let rig = CameraRig::new(
            window_size.0 as f32 / window_size.1.max(1) as f32,
            options.camera.fovy,
            options.camera.znear,
            options.camera.zfar,
        );

        Ok(Self {
            context,
            renderer,
            rig,
            tracker: InputTracker::new(window_size.0, window_size.1),
            scene,
            timing: FrameTiming::new(),
            options,
        })
    }

    /// Feed one input event into the tracker.
    pub fn handle_input(&mut self, event: InputEvent) {
        let is_wheel = matches!(event, InputEvent::Wheel { .. });
        self.tracker.handle_event(event);
        if is_wheel {
            self.rig.on_wheel(self.tracker.scroll().y);
        }
    }

    /// Resize the surface and dependent resources.
    ///
    /// The surface gets the pixel-ratio-capped size; the tracker and the
    /// camera aspect follow the window, where cursor events live.
    pub fn resize(
        &mut self,
        window_size: (u32, u32),
        surface_size: (u32, u32),
    ) {
        self.context.resize(surface_size.0, surface_size.1);
        self.renderer.resize(&self.context);
        self.tracker.on_resize(window_size.0, window_size.1);
        self.rig.set_aspect(window_size.0, window_size.1);
    }

    /// Advance scene and camera state by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let t = self.timing.elapsed();
        self.rig.update(&mut self.tracker, dt);
        self.scene.update(t, dt, self.tracker.pointer());
    }

    /// Draw and present one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot
    /// be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.update_camera(&self.context, self.rig.camera());
        self.renderer.write_instances(&self.context, &self.scene);
        self.renderer.draw(&self.context)
    }

    /// Reconfigure a lost or outdated surface.
    pub fn reconfigure_surface(&mut self) {
        self.context.reconfigure();
        self.renderer.resize(&self.context);
    }

    /// The engine's options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Record a frame boundary and return its delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.timing.tick()
    }
}

/// Load the typeface and tessellate the label, degrading to `None` on any
/// failure.
fn load_text_mesh(options: &Options) -> Option<MeshData> {
    let typeface =
        match Typeface::load(std::path::Path::new(&options.assets.font_path)) {
        Ok(typeface) => typeface,
        Err(e) => {
            log::warn!(
                "font {:?} unavailable ({e}); rendering without text",
                options.assets.font_path
            );
            return None;
        }
    };

    let mesh = text::build_text_mesh(
        &typeface,
        &options.scene.label,
        &text::TextStyle::default(),
    );
    if mesh.vertices.is_empty() {
        log::warn!(
            "label {:?} produced no geometry; rendering without text",
            options.scene.label
        );
        return None;
    }
    log::info!(
        "text mesh: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Some(mesh)
}
