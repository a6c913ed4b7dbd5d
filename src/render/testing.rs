// testing.rs - A `Gpu` that records calls instead of talking to a driver

use super::backend::{Gpu, PolygonMode, ShaderStage};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    BindAttribLocation(u32, u32, String),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData(Vec<f32>),
    DeleteBuffer(u32),
    AttribPointer(u32, i32),
    EnableAttrib(u32),
    ConstantAttrib(u32, [f32; 3]),
    ClearColour([f32; 4]),
    Clear,
    DrawTriangles(i32, i32),
    PolygonMode(PolygonMode),
    Viewport(i32, i32),
}

/// Shared view of the calls made, readable after the backend is dropped.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

/// Sources containing `#error` or unbalanced braces fail to compile.
/// A program links only if every attached shader compiled.
#[derive(Default)]
pub struct RecordingGpu {
    journal: Journal,
    next_id: Cell<u32>,
    compiled: RefCell<HashMap<u32, bool>>,
    sources: RefCell<HashMap<u32, String>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    pub fail_vertex_arrays: Cell<bool>,
    pub fail_buffers: Cell<bool>,
    pub fail_link: Cell<bool>,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn source_is_valid(source: &str) -> bool {
        let open = source.matches('{').count();
        let close = source.matches('}').count();
        open == close && !source.contains("#error")
    }
}

impl Gpu for RecordingGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn version(&self) -> String {
        "4.1 Recording".to_string()
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.id();
        self.journal.push(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
        self.journal.push(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        let ok = self
            .sources
            .borrow()
            .get(&shader)
            .map(|s| Self::source_is_valid(s))
            .unwrap_or(false);
        self.compiled.borrow_mut().insert(shader, ok);
        self.journal.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.compiled.borrow().get(&shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:3(1): error: syntax error, unexpected end of file".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.journal.push(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.id();
        self.journal.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attached.borrow_mut().entry(program).or_default().push(shader);
        self.journal.push(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.journal.push(Call::DetachShader(program, shader));
    }

    fn bind_attrib_location(&self, program: u32, index: u32, name: &str) {
        self.journal
            .push(Call::BindAttribLocation(program, index, name.to_string()));
    }

    fn link_program(&self, program: u32) {
        self.journal.push(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        if self.fail_link.get() {
            return false;
        }
        self.attached
            .borrow()
            .get(&program)
            .map(|shaders| shaders.iter().all(|s| self.shader_compile_status(*s)))
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: linking with uncompiled/unspecialized shader".to_string()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.journal.push(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.journal.push(Call::DeleteProgram(program));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        if self.fail_vertex_arrays.get() {
            return Err("out of memory".to_string());
        }
        let id = self.id();
        self.journal.push(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.journal.push(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.journal.push(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffers.get() {
            return Err("out of memory".to_string());
        }
        let id = self.id();
        self.journal.push(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.journal.push(Call::BindArrayBuffer(buffer));
    }

    fn static_array_buffer_data(&self, data: &[f32]) {
        self.journal.push(Call::BufferData(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.journal.push(Call::DeleteBuffer(buffer));
    }

    fn float_attrib_pointer(&self, index: u32, components: i32) {
        self.journal.push(Call::AttribPointer(index, components));
    }

    fn enable_attrib_array(&self, index: u32) {
        self.journal.push(Call::EnableAttrib(index));
    }

    fn constant_attrib_3f(&self, index: u32, value: [f32; 3]) {
        self.journal.push(Call::ConstantAttrib(index, value));
    }

    fn clear_colour(&self, colour: [f32; 4]) {
        self.journal.push(Call::ClearColour(colour));
    }

    fn clear_colour_and_depth(&self) {
        self.journal.push(Call::Clear);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.journal.push(Call::DrawTriangles(first, count));
    }

    fn polygon_mode(&self, mode: PolygonMode) {
        self.journal.push(Call::PolygonMode(mode));
    }

    fn viewport(&self, width: i32, height: i32) {
        self.journal.push(Call::Viewport(width, height));
    }
}
