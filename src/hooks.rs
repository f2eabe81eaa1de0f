//! The three entry points a host binds to: `gl_init`, `gl_step_frame` and
//! `random_string`.
//!
//! Hosts such as an Android `GLSurfaceView.Renderer` call these from the GL
//! thread and only understand booleans and strings, so every error stops here
//! and is logged.

use crate::demo::DemoConfig;
use crate::driver::Driver;
use crate::phrase;
use crate::renderer::FrameRenderer;

pub struct DemoHooks<D: Driver> {
    gl: D,
    demo: DemoConfig,
    renderer: Option<FrameRenderer<D>>,
}

impl<D: Driver> DemoHooks<D> {
    pub fn new(gl: D, demo: DemoConfig) -> Self {
        Self {
            gl,
            demo,
            renderer: None,
        }
    }

    pub fn demo(&self) -> &DemoConfig {
        &self.demo
    }

    pub fn is_initialized(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn driver(&self) -> &D {
        &self.gl
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.gl
    }

    /// Initializes the renderer, or resizes it if already initialized.
    ///
    /// Hosts resend the surface size on every surface change, so only the
    /// first successful call builds GL objects.
    pub fn gl_init(&mut self, width: i32, height: i32) -> bool {
        if let Some(renderer) = self.renderer.as_mut() {
            return match renderer.resize(&mut self.gl, width, height) {
                Ok(()) => true,
                Err(err) => {
                    log::error!("gl_init: resize failed: {err}");
                    false
                }
            };
        }

        match FrameRenderer::initialize(&mut self.gl, self.demo.clone(), width, height) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                true
            }
            Err(err) => {
                log::error!("gl_init: {err}");
                false
            }
        }
    }

    /// Renders one frame. Does nothing until `gl_init` has succeeded.
    pub fn gl_step_frame(&mut self) {
        self.step(None);
    }

    /// Like [`gl_step_frame`](Self::gl_step_frame), but animates as if
    /// `elapsed` seconds had passed since `gl_init`.
    pub fn gl_step_frame_at(&mut self, elapsed: f32) {
        self.step(Some(elapsed));
    }

    fn step(&mut self, elapsed: Option<f32>) {
        let Some(renderer) = self.renderer.as_mut() else {
            log::warn!("gl_step_frame called before a successful gl_init");
            return;
        };
        let result = match elapsed {
            Some(elapsed) => renderer.render_frame_at(&mut self.gl, elapsed),
            None => renderer.render_frame(&mut self.gl),
        };
        if let Err(err) = result {
            log::warn!("frame rendered with GL error: {err}");
        }
    }

    /// Tears down the renderer so a fresh context can be initialized.
    pub fn gl_deinit(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.destroy(&mut self.gl);
        }
    }
}

pub fn random_string() -> String {
    phrase::random_phrase()
}
