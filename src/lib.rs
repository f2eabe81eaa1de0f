//! OpenGL ES triangle demos: shader program building, a per-frame triangle
//! renderer, and the host entry points that drive them.

pub mod demo;
pub mod driver;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod phrase;
pub mod program;
pub mod quad_driver;
pub mod renderer;
pub mod shader;
pub mod surface;
pub mod uniforms;

#[cfg(test)]
mod recording;

pub use demo::{DemoConfig, DemoVariant};
pub use driver::Driver;
pub use error::{BuildError, GlError, InitError};
pub use hooks::{random_string, DemoHooks};
pub use program::{compile_shader, link_program, ShaderKind};
pub use quad_driver::QuadDriver;
pub use renderer::{FrameRenderer, FrameStats};
