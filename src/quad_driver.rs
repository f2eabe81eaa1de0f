//! [`Driver`] over the GL context miniquad opens for its window.

use std::ffi::{c_void, CStr, CString};
use std::marker::PhantomData;
use std::os::raw::c_char;

use glam::{Mat4, Vec3};
use miniquad::gl::*;

use crate::driver::{Driver, GlString};
use crate::program::ShaderKind;

/// Issues raw GL calls on the context miniquad made current.
///
/// Handles are the plain GL object names.
pub struct QuadDriver {
    // The context is bound to the thread that created it.
    _not_send: PhantomData<*const ()>,
}

impl QuadDriver {
    /// # Safety
    ///
    /// miniquad must have loaded its GL entry points and made its context
    /// current on this thread. That holds inside the `miniquad::start`
    /// constructor closure and every `EventHandler` callback.
    pub unsafe fn new() -> Self {
        Self {
            _not_send: PhantomData,
        }
    }
}

/// `glGet*Location` reports inactive names as -1.
fn location(raw: GLint) -> Option<GLint> {
    (raw >= 0).then_some(raw)
}

/// Keeps the part of an info log buffer GL reported writing.
fn info_log(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf)
        .trim_end_matches('\0')
        .to_owned()
}

fn log_buffer(len: GLint) -> Option<Vec<u8>> {
    (len > 0).then(|| vec![0u8; len as usize])
}

// SAFETY (all blocks below): `new` requires miniquad's context to be current,
// and every handle passed back in was created through this driver.
impl Driver for QuadDriver {
    type Shader = GLuint;
    type Program = GLuint;
    type Buffer = GLuint;
    type UniformLocation = GLint;

    fn create_shader(&mut self, kind: ShaderKind) -> Result<GLuint, String> {
        match unsafe { glCreateShader(kind.gl_enum()) } {
            0 => Err(format!("glCreateShader({kind}) returned 0")),
            shader => Ok(shader),
        }
    }

    fn shader_source(&mut self, shader: GLuint, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe { glShaderSource(shader, 1, &ptr, &len) }
    }

    fn compile_shader(&mut self, shader: GLuint) {
        unsafe { glCompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut status: GLint = 0;
        unsafe { glGetShaderiv(shader, GL_COMPILE_STATUS, &mut status) };
        status != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe { glGetShaderiv(shader, GL_INFO_LOG_LENGTH, &mut len) };
        let Some(mut buf) = log_buffer(len) else {
            return String::new();
        };
        let mut written: GLsizei = 0;
        unsafe { glGetShaderInfoLog(shader, len, &mut written, buf.as_mut_ptr() as *mut GLchar) };
        info_log(buf, written)
    }

    fn delete_shader(&mut self, shader: GLuint) {
        unsafe { glDeleteShader(shader) }
    }

    fn create_program(&mut self) -> Result<GLuint, String> {
        match unsafe { glCreateProgram() } {
            0 => Err("glCreateProgram returned 0".into()),
            program => Ok(program),
        }
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { glAttachShader(program, shader) }
    }

    fn link_program(&mut self, program: GLuint) {
        unsafe { glLinkProgram(program) }
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut status: GLint = 0;
        unsafe { glGetProgramiv(program, GL_LINK_STATUS, &mut status) };
        status != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe { glGetProgramiv(program, GL_INFO_LOG_LENGTH, &mut len) };
        let Some(mut buf) = log_buffer(len) else {
            return String::new();
        };
        let mut written: GLsizei = 0;
        unsafe { glGetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr() as *mut GLchar) };
        info_log(buf, written)
    }

    fn delete_program(&mut self, program: GLuint) {
        unsafe { glDeleteProgram(program) }
    }

    fn use_program(&mut self, program: Option<GLuint>) {
        unsafe { glUseProgram(program.unwrap_or(0)) }
    }

    fn attrib_location(&self, program: GLuint, name: &str) -> Option<u32> {
        let name = CString::new(name).ok()?;
        location(unsafe { glGetAttribLocation(program, name.as_ptr()) }).map(|l| l as u32)
    }

    fn uniform_location(&self, program: GLuint, name: &str) -> Option<GLint> {
        let name = CString::new(name).ok()?;
        location(unsafe { glGetUniformLocation(program, name.as_ptr()) })
    }

    fn uniform_vec3(&mut self, location: &GLint, value: Vec3) {
        unsafe { glUniform3f(*location, value.x, value.y, value.z) }
    }

    fn uniform_mat4(&mut self, location: &GLint, value: &Mat4) {
        let columns = value.to_cols_array();
        unsafe { glUniformMatrix4fv(*location, 1, GL_FALSE as GLboolean, columns.as_ptr()) }
    }

    fn create_buffer(&mut self) -> Result<GLuint, String> {
        let mut buffer: GLuint = 0;
        unsafe { glGenBuffers(1, &mut buffer) };
        match buffer {
            0 => Err("glGenBuffers returned no buffer".into()),
            buffer => Ok(buffer),
        }
    }

    fn bind_array_buffer(&mut self, buffer: Option<GLuint>) {
        unsafe { glBindBuffer(GL_ARRAY_BUFFER, buffer.unwrap_or(0)) }
    }

    fn buffer_static_f32(&mut self, data: &[f32]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        unsafe {
            glBufferData(
                GL_ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const c_void,
                GL_STATIC_DRAW,
            )
        }
    }

    fn delete_buffer(&mut self, buffer: GLuint) {
        unsafe { glDeleteBuffers(1, &buffer) }
    }

    fn vertex_attrib_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            glVertexAttribPointer(
                index,
                components,
                GL_FLOAT,
                GL_FALSE as GLboolean,
                stride,
                offset as usize as *const c_void,
            )
        }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { glEnableVertexAttribArray(index) }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { glViewport(x, y, width, height) }
    }

    fn clear_color(&mut self, [r, g, b, a]: [f32; 4]) {
        unsafe { glClearColor(r, g, b, a) }
    }

    fn clear_color_buffer(&mut self) {
        unsafe { glClear(GL_COLOR_BUFFER_BIT) }
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { glDrawArrays(GL_TRIANGLES, first, count) }
    }

    fn get_error(&mut self) -> u32 {
        unsafe { glGetError() }
    }

    fn get_string(&self, name: GlString) -> String {
        let ptr = unsafe { glGetString(name.gl_enum()) };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr as *const c_char) }
            .to_string_lossy()
            .into_owned()
    }
}
