//! In-memory stand-ins for the driver and the windowing layer.

use crate::driver::{
    BufferTarget, BufferUsage, ClearMask, DriverString, GlDriver, Primitive, ShaderStage,
};
use crate::math::VertexAttribute;
use crate::system::{IoEvent, Platform};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Once;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GenBuffer(u32),
    BindBuffer(BufferTarget, u32),
    BufferData { target: BufferTarget, len: usize, usage: BufferUsage },
    DeleteBuffer(u32),
    GenVertexArray(u32),
    BindVertexArray(u32),
    DeleteVertexArray(u32),
    EnableAttrib(u32),
    AttribPointer(VertexAttribute),
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    ShaderStatus(u32),
    ShaderInfoLog(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    LinkStatus(u32),
    ProgramInfoLog(u32),
    ValidateProgram(u32),
    UseProgram(u32),
    DeleteProgram(u32),
    DrawArrays(Primitive, i32, i32),
    ClearColor([f32; 4]),
    Clear(ClearMask),
    GetError,
    GetString(DriverString),
}

/// Records every call and hands out increasing non-zero handles.
#[derive(Default)]
pub struct FakeGl {
    calls: RefCell<Vec<Call>>,
    last_id: Cell<u32>,
    errors: RefCell<VecDeque<u32>>,
    fail_compile: Cell<bool>,
}

impl FakeGl {
    pub fn failing_compiles() -> FakeGl {
        let gl = FakeGl::default();
        gl.fail_compile.set(true);
        gl
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next_id(&self) -> u32 {
        let id = self.last_id.get() + 1;
        self.last_id.set(id);
        id
    }

    pub fn push_error(&self, code: u32) {
        self.errors.borrow_mut().push_back(code);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(*c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl GlDriver for FakeGl {
    fn gen_buffer(&self) -> u32 {
        let id = self.next_id();
        self.record(Call::GenBuffer(id));
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.record(Call::BufferData { target, len: data.len(), usage });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn gen_vertex_array(&self) -> u32 {
        let id = self.next_id();
        self.record(Call::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, array: u32) {
        self.record(Call::BindVertexArray(array));
    }

    fn delete_vertex_array(&self, array: u32) {
        self.record(Call::DeleteVertexArray(array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn vertex_attrib_pointer(&self, attrib: &VertexAttribute) {
        self.record(Call::AttribPointer(*attrib));
    }

    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let id = self.next_id();
        self.record(Call::CreateShader(stage, id));
        id
    }

    fn shader_source(&self, shader: u32, _source: &str) {
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compiled(&self, shader: u32) -> bool {
        self.record(Call::ShaderStatus(shader));
        !self.fail_compile.get()
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.record(Call::ShaderInfoLog(shader));
        "0:1(1): error: syntax error".to_string()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> u32 {
        let id = self.next_id();
        self.record(Call::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_linked(&self, program: u32) -> bool {
        self.record(Call::LinkStatus(program));
        !self.fail_compile.get()
    }

    fn program_info_log(&self, program: u32) -> String {
        self.record(Call::ProgramInfoLog(program));
        "link failed".to_string()
    }

    fn validate_program(&self, program: u32) {
        self.record(Call::ValidateProgram(program));
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(Call::Clear(mask));
    }

    fn get_error(&self) -> u32 {
        self.record(Call::GetError);
        self.errors.borrow_mut().pop_front().unwrap_or(0)
    }

    fn get_string(&self, name: DriverString) -> String {
        self.record(Call::GetString(name));
        match name {
            DriverString::Version => "4.1 Fake-1.0",
            DriverString::Vendor => "Fake Vendor",
            DriverString::Renderer => "Fake Renderer",
            DriverString::ShadingLanguageVersion => "4.10",
        }
        .to_string()
    }
}

/// Delivers events in per-iteration batches: an exhausted batch ends the
/// current drain, the next poll starts on the following batch.
pub struct ScriptedPlatform {
    batches: VecDeque<VecDeque<IoEvent>>,
    pub presents: usize,
    pub pauses: Vec<Duration>,
}

impl ScriptedPlatform {
    pub fn new(batches: Vec<Vec<IoEvent>>) -> ScriptedPlatform {
        ScriptedPlatform {
            batches: batches.into_iter().map(VecDeque::from).collect(),
            presents: 0,
            pauses: Vec::new(),
        }
    }

    pub fn remaining_events(&self) -> usize {
        self.batches.iter().map(VecDeque::len).sum()
    }
}

impl Platform for ScriptedPlatform {
    fn poll_event(&mut self) -> Option<IoEvent> {
        let Some(batch) = self.batches.front_mut() else {
            panic!("event script ran out without a quit event");
        };
        match batch.pop_front() {
            Some(event) => Some(event),
            None => {
                self.batches.pop_front();
                None
            }
        }
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

thread_local! {
    static LINES: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps every record on the thread that logged it, so parallel tests stay apart.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        LINES.with(|lines| {
            lines
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Routes log records into a per-thread buffer and empties it.
pub fn capture_logs() {
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    LINES.with(|lines| lines.borrow_mut().clear());
}

/// Records logged on this thread since the last [`capture_logs`].
pub fn captured_logs() -> Vec<(log::Level, String)> {
    LINES.with(|lines| lines.borrow().clone())
}
