//! Shader compilation and program linking.
//!
//! Stages always run in the same order: vertex compile, fragment compile,
//! program creation, attach, link. The first failing stage ends the build,
//! its diagnostics are logged, and every object created so far is released.

use std::fmt;

use crate::driver::{check_error, Driver};
use crate::error::BuildError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderKind::Vertex => glow::VERTEX_SHADER,
            ShaderKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compiles one shader stage.
///
/// On failure the compiler log is logged and returned, and the shader object
/// is deleted before returning.
pub fn compile_shader<D: Driver>(
    gl: &mut D,
    kind: ShaderKind,
    source: &str,
) -> Result<D::Shader, BuildError> {
    let shader = gl.create_shader(kind).map_err(|e| {
        log::error!("glCreateShader({kind}) failed: {e}");
        BuildError::Create(e)
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        log::error!("could not compile {kind} shader:\n{log}");
        gl.delete_shader(shader);
        return Err(BuildError::Compile { kind, log });
    }

    Ok(shader)
}

/// Compiles both stages and links them into a program.
///
/// The intermediate shader objects are deleted once the program is linked.
pub fn link_program<D: Driver>(
    gl: &mut D,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<D::Program, BuildError> {
    let vertex = compile_shader(gl, ShaderKind::Vertex, vertex_source)?;

    let fragment = match compile_shader(gl, ShaderKind::Fragment, fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(vertex);
            return Err(err);
        }
    };

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(e) => {
            log::error!("glCreateProgram failed: {e}");
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            return Err(BuildError::Create(e));
        }
    };

    gl.attach_shader(program, vertex);
    let _ = check_error(gl, "glAttachShader");
    gl.attach_shader(program, fragment);
    let _ = check_error(gl, "glAttachShader");

    gl.link_program(program);
    let linked = gl.program_link_status(program);

    // Linked programs keep their own copy of the stages.
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    if !linked {
        let log = gl.program_info_log(program);
        log::error!("could not link program:\n{log}");
        gl.delete_program(program);
        return Err(BuildError::Link { log });
    }

    log::debug!("linked program {program:?}");
    Ok(program)
}
