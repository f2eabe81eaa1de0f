use std::fmt::Debug;

use glam::{Mat4, Vec3};

use crate::error::GlError;
use crate::program::ShaderKind;

/// Upper bound on codes drained per check. A lost context can keep
/// reporting the same error forever.
const MAX_DRAINED_ERRORS: usize = 16;

/// Strings reported by `glGetString`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlString {
    Version,
    Vendor,
    Renderer,
    Extensions,
}

impl GlString {
    pub const ALL: [GlString; 4] = [
        GlString::Version,
        GlString::Vendor,
        GlString::Renderer,
        GlString::Extensions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GlString::Version => "Version",
            GlString::Vendor => "Vendor",
            GlString::Renderer => "Renderer",
            GlString::Extensions => "Extensions",
        }
    }

    pub fn gl_enum(self) -> u32 {
        match self {
            GlString::Version => glow::VERSION,
            GlString::Vendor => glow::VENDOR,
            GlString::Renderer => glow::RENDERER,
            GlString::Extensions => glow::EXTENSIONS,
        }
    }
}

/// The slice of OpenGL ES the demos need.
///
/// Calls mirror their GL counterparts one to one and do not check the error
/// queue themselves; use [`check_error`] after each named operation.
pub trait Driver {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type UniformLocation: Clone + Debug;

    fn create_shader(&mut self, kind: ShaderKind) -> Result<Self::Shader, String>;
    fn shader_source(&mut self, shader: Self::Shader, source: &str);
    fn compile_shader(&mut self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&mut self, shader: Self::Shader);

    fn create_program(&mut self) -> Result<Self::Program, String>;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn link_program(&mut self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&mut self, program: Self::Program);
    fn use_program(&mut self, program: Option<Self::Program>);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    fn uniform_vec3(&mut self, location: &Self::UniformLocation, value: Vec3);
    fn uniform_mat4(&mut self, location: &Self::UniformLocation, value: &Mat4);

    fn create_buffer(&mut self) -> Result<Self::Buffer, String>;
    fn bind_array_buffer(&mut self, buffer: Option<Self::Buffer>);
    /// Uploads into the bound array buffer with static-draw usage.
    fn buffer_static_f32(&mut self, data: &[f32]);
    fn delete_buffer(&mut self, buffer: Self::Buffer);
    /// `glVertexAttribPointer` for float data, never normalized.
    fn vertex_attrib_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&mut self, index: u32);

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&mut self, rgba: [f32; 4]);
    fn clear_color_buffer(&mut self);
    fn draw_triangles(&mut self, first: i32, count: i32);

    fn get_error(&mut self) -> u32;
    fn get_string(&self, name: GlString) -> String;
}

/// Drains the GL error queue after `op`, logging every pending code.
///
/// Returns the first error seen so callers can decide whether to propagate.
pub fn check_error<D: Driver>(gl: &mut D, op: &str) -> Result<(), GlError> {
    let mut first = None;
    for _ in 0..MAX_DRAINED_ERRORS {
        let code = gl.get_error();
        let Some(err) = GlError::from_code(code) else {
            break;
        };
        log::warn!("after {op}() glError (0x{code:x})");
        first.get_or_insert(err);
    }
    match first {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Logs the driver identification strings at info level.
pub fn log_gl_strings<D: Driver>(gl: &D) {
    for name in GlString::ALL {
        // Queried even when info logging is off.
        let value = gl.get_string(name);
        log::info!("GL {} = {value}", name.label());
    }
}
