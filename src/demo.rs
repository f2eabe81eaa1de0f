//! Demo configuration: one shader pair, its uniforms, the vertex layout and
//! the background, bundled so a single renderer can drive every variant.

use std::f32::consts::PI;
use std::fmt;

use glam::{Mat4, Vec3};

use crate::shader;
use crate::uniforms::{oscillating_color, pulse_grey, rotation_z};

/// Triangle in normalized device coordinates, `(x, y)` per vertex.
pub const TRIANGLE: [f32; 6] = [0.0, 0.5, -0.5, -0.5, 0.5, -0.5];

/// Plum purple.
pub const PLUM: Vec3 = Vec3::new(0.917647, 0.678431, 0.917647);

#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    pub attribute: &'static str,
    pub components: i32,
    pub vertices: [f32; 6],
}

impl VertexLayout {
    /// Number of whole vertices in `vertices`.
    ///
    /// `None` unless `components` is a valid attribute size (1 to 4) that
    /// divides the data evenly.
    pub fn vertex_count(&self) -> Option<i32> {
        let len = self.vertices.len() as i32;
        if !(1..=4).contains(&self.components) || len % self.components != 0 {
            return None;
        }
        Some(len / self.components)
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self {
            attribute: shader::POSITION,
            components: 2,
            vertices: TRIANGLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    Constant(Vec3),
    Oscillating,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformSource {
    RotateZ { radians_per_second: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Constant([f32; 4]),
    Pulse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub name: &'static str,
    pub vertex_source: &'static str,
    pub fragment_source: &'static str,
    pub layout: VertexLayout,
    pub color: Option<ColorSource>,
    pub transform: Option<TransformSource>,
    pub background: Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoVariant {
    #[default]
    StaticColor,
    Spinning,
}

impl DemoVariant {
    pub const ALL: [DemoVariant; 2] = [DemoVariant::StaticColor, DemoVariant::Spinning];

    pub fn name(self) -> &'static str {
        match self {
            DemoVariant::StaticColor => "static",
            DemoVariant::Spinning => "spinning",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    pub fn config(self) -> DemoConfig {
        match self {
            DemoVariant::StaticColor => DemoConfig {
                name: self.name(),
                vertex_source: shader::VERTEX_FLAT,
                fragment_source: shader::FRAGMENT_UNIFORM_COLOR,
                layout: VertexLayout::default(),
                color: Some(ColorSource::Constant(PLUM)),
                transform: None,
                background: Background::Constant([0.0, 0.0, 0.0, 1.0]),
            },
            DemoVariant::Spinning => DemoConfig {
                name: self.name(),
                vertex_source: shader::VERTEX_TRANSFORMED,
                fragment_source: shader::FRAGMENT_UNIFORM_COLOR,
                layout: VertexLayout::default(),
                color: Some(ColorSource::Oscillating),
                transform: Some(TransformSource::RotateZ {
                    radians_per_second: PI / 2.0,
                }),
                background: Background::Pulse,
            },
        }
    }
}

impl fmt::Display for DemoVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl DemoConfig {
    pub fn clear_color_at(&self, elapsed: f32) -> [f32; 4] {
        match self.background {
            Background::Constant(rgba) => rgba,
            Background::Pulse => {
                let grey = pulse_grey(elapsed);
                [grey, grey, grey, 1.0]
            }
        }
    }

    /// Value for `u_triangleColor`, if this demo drives it.
    pub fn color_at(&self, elapsed: f32) -> Option<Vec3> {
        self.color.map(|source| match source {
            ColorSource::Constant(color) => color,
            ColorSource::Oscillating => oscillating_color(elapsed),
        })
    }

    /// Value for `u_transformationMat`, if this demo drives it.
    pub fn transform_at(&self, elapsed: f32) -> Option<Mat4> {
        self.transform.map(|source| match source {
            TransformSource::RotateZ { radians_per_second } => {
                rotation_z(elapsed, radians_per_second)
            }
        })
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoVariant::default().config()
    }
}
