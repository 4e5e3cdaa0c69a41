use crate::driver::{BufferTarget, DriverString, GlDriver};
use crate::math::Vertex;
use crate::term::{Color, Paint, DIVIDER};
use std::panic::Location;
use thiserror::Error;

/// Classification of a code returned by `glGetError`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("Invalid enum")]
    InvalidEnum,
    #[error("Invalid value")]
    InvalidValue,
    #[error("Invalid operation")]
    InvalidOperation,
    #[error("Stack overflow")]
    StackOverflow,
    #[error("Stack underflow")]
    StackUnderflow,
    #[error("Out of memory")]
    OutOfMemory,
    #[error("Invalid framebuffer operation")]
    InvalidFramebufferOperation,
    #[error("Context lost")]
    ContextLost,
    #[error("Unknown {0:#06x}")]
    Unknown(u32),
}

impl DriverError {
    /// `None` for `GL_NO_ERROR`.
    pub fn from_code(code: u32) -> Option<DriverError> {
        let err = match code {
            gl::NO_ERROR => return None,
            gl::INVALID_ENUM => DriverError::InvalidEnum,
            gl::INVALID_VALUE => DriverError::InvalidValue,
            gl::INVALID_OPERATION => DriverError::InvalidOperation,
            gl::STACK_OVERFLOW => DriverError::StackOverflow,
            gl::STACK_UNDERFLOW => DriverError::StackUnderflow,
            gl::OUT_OF_MEMORY => DriverError::OutOfMemory,
            gl::INVALID_FRAMEBUFFER_OPERATION => DriverError::InvalidFramebufferOperation,
            gl::CONTEXT_LOST => DriverError::ContextLost,
            other => DriverError::Unknown(other),
        };
        Some(err)
    }
}

/// Driver objects currently bound. Zero means nothing is bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub array_buffer: u32,
    pub element_buffer: u32,
    pub vertex_array: u32,
    pub program: u32,
}

/// The driver together with the binding state every draw depends on.
pub struct GlContext<D: GlDriver> {
    driver: D,
    verbose: bool,
    bindings: Bindings,
}

impl<D: GlDriver> GlContext<D> {
    pub fn new(driver: D, verbose: bool) -> GlContext<D> {
        GlContext {
            driver,
            verbose,
            bindings: Bindings::default(),
        }
    }

    pub fn gl(&self) -> &D {
        &self.driver
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn bindings(&self) -> Bindings {
        self.bindings
    }

    #[track_caller]
    pub fn bind_buffer(&mut self, target: BufferTarget, buffer: u32) {
        self.driver.bind_buffer(target, buffer);
        match target {
            BufferTarget::Array => self.bindings.array_buffer = buffer,
            BufferTarget::ElementArray => self.bindings.element_buffer = buffer,
        }
        self.check_errors();
    }

    /// Deleting a bound buffer reverts its binding point to zero.
    pub(crate) fn buffer_released(&mut self, buffer: u32) {
        if self.bindings.array_buffer == buffer {
            self.bindings.array_buffer = 0;
        }
        if self.bindings.element_buffer == buffer {
            self.bindings.element_buffer = 0;
        }
    }

    #[track_caller]
    pub fn bind_vertex_array(&mut self, array: u32) {
        self.driver.bind_vertex_array(array);
        self.bindings.vertex_array = array;
        self.check_errors();
    }

    pub(crate) fn vertex_array_released(&mut self, array: u32) {
        if self.bindings.vertex_array == array {
            self.bindings.vertex_array = 0;
        }
    }

    #[track_caller]
    pub fn use_program(&mut self, program: u32) {
        self.driver.use_program(program);
        self.bindings.program = program;
        self.check_errors();
    }

    pub(crate) fn program_released(&mut self, program: u32) {
        if self.bindings.program == program {
            self.bindings.program = 0;
        }
    }

    /// Describes every attribute of `V` against the bound array buffer.
    #[track_caller]
    pub fn describe_vertex<V: Vertex>(&self) {
        for attrib in V::ATTRIBUTES {
            self.driver.vertex_attrib_pointer(attrib);
            self.check_errors();
        }
    }

    /// Consumes one pending driver error and logs it with the caller's location.
    ///
    /// Does nothing, not even the query, unless verbose diagnostics are on.
    #[track_caller]
    pub fn check_errors(&self) -> Option<DriverError> {
        if !self.verbose {
            return None;
        }
        let err = DriverError::from_code(self.driver.get_error())?;
        let at = Location::caller();
        log::error!(
            "{} {} (file: {} line: {} column: {})",
            "GL error:".paint(Color::Red),
            err,
            at.file(),
            at.line(),
            at.column()
        );
        Some(err)
    }
}

/// Identification strings of the active driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
    pub shading_language: String,
}

impl DriverInfo {
    pub fn query<D: GlDriver>(ctx: &GlContext<D>) -> DriverInfo {
        let gl = ctx.gl();
        DriverInfo {
            version: gl.get_string(DriverString::Version),
            vendor: gl.get_string(DriverString::Vendor),
            renderer: gl.get_string(DriverString::Renderer),
            shading_language: gl.get_string(DriverString::ShadingLanguageVersion),
        }
    }

    /// The green startup banner.
    pub fn banner(&self) -> String {
        format!(
            "\n{DIVIDER}\nUsing OpenGL {}\nVendor:   {}\nRenderer: {}\nGLSL:     {}\n{DIVIDER}\n",
            self.version, self.vendor, self.renderer, self.shading_language
        )
        .paint(Color::Green)
    }
}
