//! The slice of OpenGL the engine calls into.
//!
//! [`GlDriver`] names every driver function the backend uses, with typed
//! arguments instead of raw enum values. [`NativeGl`] forwards to the `gl`
//! crate once the entry points have been resolved.

use crate::error::BackendError;
use crate::math::VertexAttribute;
use gl::types::*;
use std::ffi::{c_void, CStr};
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    pub fn raw(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// How often a buffer's contents are expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferUsage {
    #[default]
    Static,
    Dynamic,
    Stream,
}

impl BufferUsage {
    pub fn raw(self) -> GLenum {
        match self {
            BufferUsage::Static => gl::STATIC_DRAW,
            BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
            BufferUsage::Stream => gl::STREAM_DRAW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn raw(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Primitive {
    pub fn raw(self) -> GLenum {
        match self {
            Primitive::Points => gl::POINTS,
            Primitive::Lines => gl::LINES,
            Primitive::LineStrip => gl::LINE_STRIP,
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::TriangleStrip => gl::TRIANGLE_STRIP,
            Primitive::TriangleFan => gl::TRIANGLE_FAN,
        }
    }
}

/// Component type of a vertex attribute or index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttribType {
    Float,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
}

impl AttribType {
    pub fn raw(self) -> GLenum {
        match self {
            AttribType::Float => gl::FLOAT,
            AttribType::UnsignedByte => gl::UNSIGNED_BYTE,
            AttribType::UnsignedShort => gl::UNSIGNED_SHORT,
            AttribType::UnsignedInt => gl::UNSIGNED_INT,
        }
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = gl::COLOR_BUFFER_BIT;
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        const STENCIL = gl::STENCIL_BUFFER_BIT;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverString {
    Version,
    Vendor,
    Renderer,
    ShadingLanguageVersion,
}

impl DriverString {
    pub fn raw(self) -> GLenum {
        match self {
            DriverString::Version => gl::VERSION,
            DriverString::Vendor => gl::VENDOR,
            DriverString::Renderer => gl::RENDERER,
            DriverString::ShadingLanguageVersion => gl::SHADING_LANGUAGE_VERSION,
        }
    }
}

/// Graphics driver entry points.
///
/// Every call acts on the context current on the calling thread, so methods
/// take `&self`: the state they touch lives in the driver, not in the value.
pub trait GlDriver {
    fn gen_buffer(&self) -> u32;
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: u32);

    fn gen_vertex_array(&self) -> u32;
    fn bind_vertex_array(&self, array: u32);
    fn delete_vertex_array(&self, array: u32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(&self, attrib: &VertexAttribute);

    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &str);
    fn compile_shader(&self, shader: u32);
    fn shader_compiled(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn program_linked(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn validate_program(&self, program: u32);
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&self, mask: ClearMask);

    /// Returns and resets the oldest pending error code, 0 when there is none.
    fn get_error(&self) -> u32;
    fn get_string(&self, name: DriverString) -> String;
}

type LoadCheck = fn() -> bool;

/// Entry points that must resolve before the driver is usable.
const REQUIRED: &[(&str, LoadCheck)] = &[
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glBindVertexArray", gl::BindVertexArray::is_loaded),
    ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
    ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glDetachShader", gl::DetachShader::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glValidateProgram", gl::ValidateProgram::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glDeleteProgram", gl::DeleteProgram::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glGetError", gl::GetError::is_loaded),
    ("glGetString", gl::GetString::is_loaded),
];

/// The process-wide OpenGL bindings of the `gl` crate.
///
/// Not `Send`: the context the pointers were resolved against is current on
/// one thread only.
pub struct NativeGl {
    _thread_bound: PhantomData<*const ()>,
}

impl NativeGl {
    /// Resolves every entry point through `loader`, failing with the names of
    /// those that could not be found.
    pub fn load<F>(loader: F) -> Result<NativeGl, BackendError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .filter(|(_, is_loaded)| !is_loaded())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(BackendError::EntryPoints { missing });
        }

        Ok(NativeGl {
            _thread_bound: PhantomData,
        })
    }
}

fn info_log(len: GLint, read: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    let mut v: Vec<u8> = vec![0; len.max(1) as usize];
    let mut written: GLsizei = 0;
    read(
        v.len() as GLsizei,
        &mut written as *mut GLsizei,
        v.as_mut_ptr() as *mut GLchar,
    );
    v.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&v).into_owned()
}

impl GlDriver for NativeGl {
    fn gen_buffer(&self) -> u32 {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe { gl::BindBuffer(target.raw(), buffer) };
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                target.raw(),
                data.len() as GLsizeiptr,
                data.as_ptr().cast(),
                usage.raw(),
            )
        };
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        id
    }

    fn bind_vertex_array(&self, array: u32) {
        unsafe { gl::BindVertexArray(array) };
    }

    fn delete_vertex_array(&self, array: u32) {
        unsafe { gl::DeleteVertexArrays(1, &array) };
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn vertex_attrib_pointer(&self, attrib: &VertexAttribute) {
        unsafe {
            gl::VertexAttribPointer(
                attrib.location,
                attrib.components as GLint,
                attrib.kind.raw(),
                if attrib.normalized { gl::TRUE } else { gl::FALSE },
                attrib.stride as GLsizei,
                attrib.offset as *const c_void,
            )
        };
    }

    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.raw()) }
    }

    fn shader_source(&self, shader: u32, source: &str) {
        unsafe {
            gl::ShaderSource(
                shader,
                1,
                &(source.as_bytes().as_ptr().cast()),
                &(source.len() as GLint),
            )
        };
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compiled(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        info_log(len, |cap, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, cap, written, buf)
        })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_linked(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        info_log(len, |cap, written, buf| unsafe {
            gl::GetProgramInfoLog(program, cap, written, buf)
        })
    }

    fn validate_program(&self, program: u32) {
        unsafe { gl::ValidateProgram(program) };
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        unsafe { gl::DrawArrays(mode.raw(), first, count) };
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) };
    }

    fn clear(&self, mask: ClearMask) {
        unsafe { gl::Clear(mask.bits()) };
    }

    fn get_error(&self) -> u32 {
        unsafe { gl::GetError() }
    }

    fn get_string(&self, name: DriverString) -> String {
        let ptr = unsafe { gl::GetString(name.raw()) };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr.cast()) }
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_hints_map_to_driver_constants() {
        assert_eq!(BufferUsage::Static.raw(), 0x88E4);
        assert_eq!(BufferUsage::Dynamic.raw(), 0x88E8);
        assert_eq!(BufferUsage::Stream.raw(), 0x88E0);
        assert_eq!(BufferUsage::default(), BufferUsage::Static);
    }

    #[test]
    fn targets_and_stages() {
        assert_eq!(BufferTarget::Array.raw(), 0x8892);
        assert_eq!(BufferTarget::ElementArray.raw(), 0x8893);
        assert_eq!(ShaderStage::Vertex.raw(), 0x8B31);
        assert_eq!(ShaderStage::Fragment.raw(), 0x8B30);
        assert_eq!(Primitive::Triangles.raw(), 0x0004);
    }

    #[test]
    fn clear_mask_bits() {
        assert_eq!(ClearMask::COLOR.bits(), 0x4000);
        assert_eq!((ClearMask::COLOR | ClearMask::DEPTH).bits(), 0x4100);
    }

    #[test]
    fn unresolvable_entry_points_fail_to_load() {
        let err = match NativeGl::load(|_| std::ptr::null()) {
            Ok(_) => panic!("null loader must not produce a driver"),
            Err(e) => e,
        };
        match err {
            BackendError::EntryPoints { missing } => {
                assert_eq!(missing.len(), REQUIRED.len());
                assert!(missing.contains(&"glGenBuffers"));
                assert!(missing.contains(&"glGetString"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
