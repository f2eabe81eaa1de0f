use std::time::Instant;

use crate::demo::DemoConfig;
use crate::driver::{check_error, log_gl_strings, Driver};
use crate::error::{GlError, InitError};
use crate::program::link_program;
use crate::shader::{COLOR_UNIFORM, TRANSFORM_UNIFORM};

/// Snapshot returned by a successfully rendered frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameStats {
    pub frame_index: u64,
    /// Seconds since [`FrameRenderer::initialize`].
    pub elapsed: f32,
}

/// Owns every GL object the demo draws with.
///
/// Constructed once per context by [`initialize`](Self::initialize); the
/// driver is passed back in on every call and must be the same context.
pub struct FrameRenderer<D: Driver> {
    demo: DemoConfig,
    program: D::Program,
    vertex_buffer: D::Buffer,
    position: u32,
    vertex_count: i32,
    color_location: Option<D::UniformLocation>,
    transform_location: Option<D::UniformLocation>,
    started: Instant,
    frame_index: u64,
}

fn driver_step<D: Driver>(gl: &mut D, op: &'static str) -> Result<(), InitError> {
    check_error(gl, op).map_err(|source| InitError::Driver { op, source })
}

fn lookup_uniform<D: Driver>(
    gl: &D,
    program: D::Program,
    name: &str,
) -> Option<D::UniformLocation> {
    let location = gl.uniform_location(program, name);
    if location.is_none() {
        log::debug!("program {program:?} has no active uniform `{name}`, skipping it");
    }
    location
}

impl<D: Driver> FrameRenderer<D> {
    /// Sets the viewport, uploads the triangle and builds the demo program.
    pub fn initialize(
        gl: &mut D,
        demo: DemoConfig,
        width: i32,
        height: i32,
    ) -> Result<Self, InitError> {
        log_gl_strings(gl);
        log::info!("initialize({width}, {height}) with demo `{}`", demo.name);

        if width <= 0 || height <= 0 {
            return Err(InitError::InvalidViewport { width, height });
        }
        let layout = &demo.layout;
        let vertex_count = layout.vertex_count().ok_or(InitError::InvalidLayout {
            components: layout.components,
            len: layout.vertices.len(),
        })?;

        gl.viewport(0, 0, width, height);
        driver_step(gl, "glViewport")?;

        let vertex_buffer = gl.create_buffer().map_err(InitError::Create)?;
        gl.bind_array_buffer(Some(vertex_buffer));
        gl.buffer_static_f32(&demo.layout.vertices);
        gl.bind_array_buffer(None);
        if let Err(err) = driver_step(gl, "glBufferData") {
            gl.delete_buffer(vertex_buffer);
            return Err(err);
        }

        let program = match link_program(gl, demo.vertex_source, demo.fragment_source) {
            Ok(program) => program,
            Err(err) => {
                log::error!("could not create program");
                gl.delete_buffer(vertex_buffer);
                return Err(err.into());
            }
        };

        let Some(position) = gl.attrib_location(program, demo.layout.attribute) else {
            log::error!("program has no attribute `{}`", demo.layout.attribute);
            gl.delete_program(program);
            gl.delete_buffer(vertex_buffer);
            return Err(InitError::MissingAttribute(demo.layout.attribute));
        };
        log::info!("glGetAttribLocation(\"{}\") = {position}", demo.layout.attribute);

        let color_location = match demo.color {
            Some(_) => lookup_uniform(gl, program, COLOR_UNIFORM),
            None => None,
        };
        let transform_location = match demo.transform {
            Some(_) => lookup_uniform(gl, program, TRANSFORM_UNIFORM),
            None => None,
        };

        Ok(Self {
            demo,
            program,
            vertex_buffer,
            position,
            vertex_count,
            color_location,
            transform_location,
            started: Instant::now(),
            frame_index: 0,
        })
    }

    pub fn demo(&self) -> &DemoConfig {
        &self.demo
    }

    pub fn program(&self) -> D::Program {
        self.program
    }

    /// Draws one frame using the wall clock since initialization.
    pub fn render_frame(&mut self, gl: &mut D) -> Result<FrameStats, GlError> {
        let elapsed = self.started.elapsed().as_secs_f32();
        self.render_frame_at(gl, elapsed)
    }

    /// Draws one frame as if `elapsed` seconds had passed since initialization.
    ///
    /// Every step runs even if an earlier one raised a GL error; the first
    /// error is returned once the draw has been issued.
    pub fn render_frame_at(&mut self, gl: &mut D, elapsed: f32) -> Result<FrameStats, GlError> {
        let mut first_error = None;
        let mut note = |result: Result<(), GlError>| {
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        };

        gl.clear_color(self.demo.clear_color_at(elapsed));
        note(check_error(gl, "glClearColor"));
        gl.clear_color_buffer();
        note(check_error(gl, "glClear"));

        gl.use_program(Some(self.program));
        note(check_error(gl, "glUseProgram"));

        if let (Some(color), Some(location)) =
            (self.demo.color_at(elapsed), &self.color_location)
        {
            gl.uniform_vec3(location, color);
            note(check_error(gl, "glUniform3f"));
        }

        if let (Some(transform), Some(location)) =
            (self.demo.transform_at(elapsed), &self.transform_location)
        {
            gl.uniform_mat4(location, &transform);
            note(check_error(gl, "glUniformMatrix4fv"));
        }

        let layout = &self.demo.layout;
        gl.bind_array_buffer(Some(self.vertex_buffer));
        gl.vertex_attrib_f32(self.position, layout.components, 0, 0);
        note(check_error(gl, "glVertexAttribPointer"));
        gl.enable_vertex_attrib_array(self.position);
        note(check_error(gl, "glEnableVertexAttribArray"));

        gl.draw_triangles(0, self.vertex_count);
        note(check_error(gl, "glDrawArrays"));

        let stats = FrameStats {
            frame_index: self.frame_index,
            elapsed,
        };
        self.frame_index += 1;
        log::trace!("frame {} at {elapsed:.3}s", stats.frame_index);

        match first_error {
            Some(err) => Err(err),
            None => Ok(stats),
        }
    }

    /// Re-issues the viewport after the host surface changed size.
    pub fn resize(&mut self, gl: &mut D, width: i32, height: i32) -> Result<(), InitError> {
        if width <= 0 || height <= 0 {
            return Err(InitError::InvalidViewport { width, height });
        }
        log::info!("resize({width}, {height})");
        gl.viewport(0, 0, width, height);
        driver_step(gl, "glViewport")
    }

    /// Deletes the program and vertex buffer.
    pub fn destroy(self, gl: &mut D) {
        gl.use_program(None);
        gl.delete_program(self.program);
        gl.delete_buffer(self.vertex_buffer);
        let _ = check_error(gl, "destroy");
    }
}
