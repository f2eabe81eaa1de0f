//! In-memory [`Driver`] for tests.
//!
//! Records every call in order and keeps just enough object state to behave
//! like a real context: shaders compile when they contain `void main` and
//! balanced brackets, links expose the `attribute`/`in` and `uniform`
//! declarations of the attached stages, and errors can be queued or injected
//! after specific calls.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use glam::{Mat4, Vec3};

use crate::driver::{Driver, GlString};
use crate::program::ShaderKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderKind),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformVec3(i32, Vec3),
    UniformMat4(i32, Mat4),
    CreateBuffer,
    BindArrayBuffer(Option<u32>),
    BufferStatic(Vec<f32>),
    DeleteBuffer(u32),
    VertexAttrib {
        index: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    DrawTriangles(i32, i32),
    GetError,
}

#[derive(Debug)]
struct ShaderState {
    kind: ShaderKind,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct ProgramState {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

type Injection = (fn(&Call) -> bool, u32);

#[derive(Default)]
pub struct RecordingDriver {
    next_id: u32,
    shaders: HashMap<u32, ShaderState>,
    programs: HashMap<u32, ProgramState>,
    buffers: HashSet<u32>,
    current_program: Option<u32>,
    errors: VecDeque<u32>,
    sticky_error: Option<u32>,
    injections: Vec<Injection>,
    link_failure: Option<String>,
    create_shader_fails: bool,
    calls: Vec<Call>,
    string_queries: RefCell<Vec<GlString>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn draw_calls(&self) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::DrawTriangles(first, count) => Some((*first, *count)),
                _ => None,
            })
            .collect()
    }

    pub fn string_queries(&self) -> Vec<GlString> {
        self.string_queries.borrow().clone()
    }

    pub fn push_error(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    pub fn set_sticky_error(&mut self, code: Option<u32>) {
        self.sticky_error = code;
    }

    /// Queues `code` every time a call matching `pred` is recorded.
    pub fn inject_after(&mut self, pred: fn(&Call) -> bool, code: u32) {
        self.injections.push((pred, code));
    }

    pub fn fail_link(&mut self, log: Option<&str>) {
        self.link_failure = log.map(str::to_owned);
    }

    pub fn fail_create_shader(&mut self, fail: bool) {
        self.create_shader_fails = fail;
    }

    pub fn is_live_shader(&self, shader: u32) -> bool {
        self.shaders.contains_key(&shader)
    }

    pub fn live_shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_linked_program(&self, program: u32) -> bool {
        self.programs.get(&program).map_or(false, |p| p.linked)
    }

    pub fn live_program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.buffers.len()
    }

    fn record(&mut self, call: Call) {
        for (pred, code) in &self.injections {
            if pred(&call) {
                self.errors.push_back(*code);
            }
        }
        self.calls.push(call);
    }

    fn alloc(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn syntax_check(source: &str) -> Result<(), String> {
    if !source.contains("void main") {
        return Err("0:1: error: missing entry point `void main`".into());
    }
    let mut depth = [0i32; 2];
    for ch in source.chars() {
        match ch {
            '(' => depth[0] += 1,
            ')' => depth[0] -= 1,
            '{' => depth[1] += 1,
            '}' => depth[1] -= 1,
            _ => {}
        }
        if depth.iter().any(|d| *d < 0) {
            return Err(format!("0:1: error: unexpected '{ch}'"));
        }
    }
    if depth[0] != 0 {
        return Err("0:1: error: unbalanced '('".into());
    }
    if depth[1] != 0 {
        return Err("0:1: error: unbalanced '{'".into());
    }
    Ok(())
}

/// Names declared as `<keyword> <type> <name>;`.
fn declarations(source: &str, keywords: &[&str]) -> Vec<String> {
    let tokens: Vec<&str> = source
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|t| !t.is_empty())
        .collect();
    let mut names = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if !keywords.contains(token) {
            continue;
        }
        // Skip an optional precision qualifier.
        let mut j = i + 1;
        if matches!(tokens.get(j), Some(&("lowp" | "mediump" | "highp"))) {
            j += 1;
        }
        if let Some(name) = tokens.get(j + 1) {
            names.push((*name).to_owned());
        }
    }
    names
}

impl Driver for RecordingDriver {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = i32;

    fn create_shader(&mut self, kind: ShaderKind) -> Result<u32, String> {
        self.record(Call::CreateShader(kind));
        if self.create_shader_fails {
            return Err("out of shader objects".into());
        }
        let id = self.alloc();
        self.shaders.insert(
            id,
            ShaderState {
                kind,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader));
        if let Some(state) = self.shaders.get_mut(&shader) {
            state.source = source.to_owned();
        }
    }

    fn compile_shader(&mut self, shader: u32) {
        self.record(Call::CompileShader(shader));
        if let Some(state) = self.shaders.get_mut(&shader) {
            match syntax_check(&state.source) {
                Ok(()) => state.compiled = true,
                Err(log) => {
                    state.compiled = false;
                    state.log = log;
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.get(&shader).map_or(false, |s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.shaders.remove(&shader);
    }

    fn create_program(&mut self) -> Result<u32, String> {
        self.record(Call::CreateProgram);
        let id = self.alloc();
        self.programs.insert(id, ProgramState::default());
        Ok(id)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
        match self.programs.get_mut(&program) {
            Some(state) if self.shaders.contains_key(&shader) => state.attached.push(shader),
            _ => self.errors.push_back(glow::INVALID_VALUE),
        }
    }

    fn link_program(&mut self, program: u32) {
        self.record(Call::LinkProgram(program));
        if !self.programs.contains_key(&program) {
            self.errors.push_back(glow::INVALID_VALUE);
            return;
        }
        let state = &self.programs[&program];

        let stages: Vec<&ShaderState> = state
            .attached
            .iter()
            .filter_map(|id| self.shaders.get(id))
            .collect();
        let vertex = stages.iter().find(|s| s.kind == ShaderKind::Vertex);
        let fragment = stages.iter().find(|s| s.kind == ShaderKind::Fragment);

        let outcome = match (vertex, fragment, &self.link_failure) {
            (_, _, Some(log)) => Err(log.clone()),
            (Some(v), Some(f), None) if v.compiled && f.compiled => {
                let attributes = declarations(&v.source, &["attribute", "in"]);
                let mut uniforms = declarations(&v.source, &["uniform"]);
                uniforms.extend(declarations(&f.source, &["uniform"]));
                Ok((attributes, uniforms))
            }
            _ => Err("error: program needs a compiled vertex and fragment shader".into()),
        };

        if let Some(state) = self.programs.get_mut(&program) {
            match outcome {
                Ok((attributes, uniforms)) => {
                    state.linked = true;
                    state.attributes = attributes;
                    state.uniforms = uniforms;
                }
                Err(log) => {
                    state.linked = false;
                    state.log = log;
                }
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.is_linked_program(program)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&mut self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.programs.remove(&program);
        if self.current_program == Some(program) {
            self.current_program = None;
        }
    }

    fn use_program(&mut self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
        match program {
            Some(id) if !self.is_linked_program(id) => self.errors.push_back(glow::INVALID_OPERATION),
            _ => self.current_program = program,
        }
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.programs.get(&program).filter(|p| p.linked)?;
        state
            .attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        let state = self.programs.get(&program).filter(|p| p.linked)?;
        state
            .uniforms
            .iter()
            .position(|u| u == name)
            .map(|i| i as i32)
    }

    fn uniform_vec3(&mut self, location: &i32, value: Vec3) {
        self.record(Call::UniformVec3(*location, value));
        if self.current_program.is_none() {
            self.errors.push_back(glow::INVALID_OPERATION);
        }
    }

    fn uniform_mat4(&mut self, location: &i32, value: &Mat4) {
        self.record(Call::UniformMat4(*location, *value));
        if self.current_program.is_none() {
            self.errors.push_back(glow::INVALID_OPERATION);
        }
    }

    fn create_buffer(&mut self) -> Result<u32, String> {
        self.record(Call::CreateBuffer);
        let id = self.alloc();
        self.buffers.insert(id);
        Ok(id)
    }

    fn bind_array_buffer(&mut self, buffer: Option<u32>) {
        self.record(Call::BindArrayBuffer(buffer));
    }

    fn buffer_static_f32(&mut self, data: &[f32]) {
        self.record(Call::BufferStatic(data.to_vec()));
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.buffers.remove(&buffer);
    }

    fn vertex_attrib_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttrib {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
        if width < 0 || height < 0 {
            self.errors.push_back(glow::INVALID_VALUE);
        }
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear_color_buffer(&mut self) {
        self.record(Call::Clear);
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        self.record(Call::DrawTriangles(first, count));
        if self.current_program.is_none() {
            self.errors.push_back(glow::INVALID_OPERATION);
        }
    }

    fn get_error(&mut self) -> u32 {
        self.calls.push(Call::GetError);
        if let Some(code) = self.sticky_error {
            return code;
        }
        self.errors.pop_front().unwrap_or(glow::NO_ERROR)
    }

    fn get_string(&self, name: GlString) -> String {
        self.string_queries.borrow_mut().push(name);
        match name {
            GlString::Version => "OpenGL ES 3.0 (recording)".into(),
            GlString::Vendor => "glesdemo".into(),
            GlString::Renderer => "RecordingDriver".into(),
            GlString::Extensions => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_check_rejects_unbalanced_parens() {
        assert!(syntax_check("void main(){ f(; }").is_err());
        assert!(syntax_check("void main(){ }").is_ok());
    }

    #[test]
    fn declarations_skip_precision() {
        let src = "uniform mediump vec3 u_triangleColor; attribute vec2 position;";
        assert_eq!(declarations(src, &["uniform"]), vec!["u_triangleColor"]);
        assert_eq!(declarations(src, &["attribute", "in"]), vec!["position"]);
    }
}
