use thiserror::Error;

use crate::program::ShaderKind;

/// A code pulled off the GL error queue.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    #[error("invalid enum")]
    InvalidEnum,

    #[error("invalid value")]
    InvalidValue,

    #[error("invalid operation")]
    InvalidOperation,

    #[error("invalid framebuffer operation")]
    InvalidFramebufferOperation,

    #[error("out of memory")]
    OutOfMemory,

    #[error("unknown GL error 0x{0:x}")]
    Unknown(u32),
}

impl GlError {
    /// Maps a non-zero `glGetError` code. Returns `None` for `GL_NO_ERROR`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            glow::NO_ERROR => None,
            glow::INVALID_ENUM => Some(Self::InvalidEnum),
            glow::INVALID_VALUE => Some(Self::InvalidValue),
            glow::INVALID_OPERATION => Some(Self::InvalidOperation),
            glow::INVALID_FRAMEBUFFER_OPERATION => Some(Self::InvalidFramebufferOperation),
            glow::OUT_OF_MEMORY => Some(Self::OutOfMemory),
            other => Some(Self::Unknown(other)),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::InvalidEnum => glow::INVALID_ENUM,
            Self::InvalidValue => glow::INVALID_VALUE,
            Self::InvalidOperation => glow::INVALID_OPERATION,
            Self::InvalidFramebufferOperation => glow::INVALID_FRAMEBUFFER_OPERATION,
            Self::OutOfMemory => glow::OUT_OF_MEMORY,
            Self::Unknown(code) => code,
        }
    }
}

/// Failure while turning a shader source pair into a linked program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("driver refused to create object: {0}")]
    Create(String),

    #[error("could not compile {kind} shader: {log}")]
    Compile { kind: ShaderKind, log: String },

    #[error("could not link program: {log}")]
    Link { log: String },
}

/// Failure while bringing up a [`FrameRenderer`](crate::renderer::FrameRenderer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: i32, height: i32 },

    #[error("{op} failed: {source}")]
    Driver {
        op: &'static str,
        #[source]
        source: GlError,
    },

    #[error("driver refused to create object: {0}")]
    Create(String),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("linked program has no active attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("{components} components per vertex cannot describe {len} floats")]
    InvalidLayout { components: i32, len: usize },
}
