/// Attribute every demo vertex shader reads its 2D position from.
pub const POSITION: &str = "position";
pub const TRANSFORM_UNIFORM: &str = "u_transformationMat";
pub const COLOR_UNIFORM: &str = "u_triangleColor";

/// Passes the vertex through untouched.
pub const VERTEX_FLAT: &str = r#"#version 100
  attribute vec2 position;

  void main() {
      gl_Position = vec4(position, 0.0, 1.0);
  }
  "#;

/// Rotates the triangle by `u_transformationMat` before output.
pub const VERTEX_TRANSFORMED: &str = r#"#version 100
  attribute vec2 position;

  uniform mat4 u_transformationMat;

  void main() {
      gl_Position = u_transformationMat * vec4(position, 0.0, 1.0);
  }
  "#;

pub const FRAGMENT_UNIFORM_COLOR: &str = r#"#version 100
  precision mediump float;

  uniform vec3 u_triangleColor;

  void main() {
      gl_FragColor = vec4(u_triangleColor, 1.0);
  }
  "#;
