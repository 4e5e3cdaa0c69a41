use super::driver::*;
use super::glutils::*;
use std::collections::HashMap;

struct ShaderSource {
    code: &'static str,
    stage: ShaderStage,
}

struct ProgramSource {
    vertex: ShaderSource,
    fragment: ShaderSource,
}

/// Every program the engine builds at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramName {
    /// Passes positions through and fills with opaque red.
    Debug,
}

impl ProgramName {
    pub const ALL: [ProgramName; 1] = [ProgramName::Debug];

    fn source(self) -> ProgramSource {
        match self {
            ProgramName::Debug => ProgramSource {
                vertex: ShaderSource {
                    code: include_str!("../shaders/debug.vert"),
                    stage: ShaderStage::Vertex,
                },
                fragment: ShaderSource {
                    code: include_str!("../shaders/debug.frag"),
                    stage: ShaderStage::Fragment,
                },
            },
        }
    }
}

/// Linked programs by name. Only obtainable through [`ShaderRegistry::initialize`].
#[derive(Debug)]
pub struct ShaderRegistry {
    programs: HashMap<ProgramName, u32>,
}

impl ShaderRegistry {
    /// Compiles and links every program in [`ProgramName::ALL`].
    ///
    /// Compile and link status are only checked with verbose diagnostics; a
    /// broken program otherwise surfaces as an invalid operation when used.
    pub fn initialize<D: GlDriver>(ctx: &GlContext<D>) -> ShaderRegistry {
        let programs = ProgramName::ALL
            .iter()
            .map(|&name| {
                let program = Self::create_program(ctx, &name.source());
                log::debug!("program {:?} -> {}", name, program);
                (name, program)
            })
            .collect();
        ShaderRegistry { programs }
    }

    fn create_program<D: GlDriver>(ctx: &GlContext<D>, source: &ProgramSource) -> u32 {
        let gl = ctx.gl();
        let program = gl.create_program();

        let vertex = Self::compile(ctx, &source.vertex);
        let fragment = Self::compile(ctx, &source.fragment);

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        ctx.check_errors();

        if ctx.verbose() {
            if !gl.program_linked(program) {
                log::error!("program link error: {}", gl.program_info_log(program));
            }
            gl.validate_program(program);
            ctx.check_errors();
        } else {
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
        }

        // not needed anymore; attached units stay alive until the program goes
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        program
    }

    fn compile<D: GlDriver>(ctx: &GlContext<D>, source: &ShaderSource) -> u32 {
        debug_assert!(source.code.is_ascii());
        let gl = ctx.gl();

        let shader = gl.create_shader(source.stage);
        gl.shader_source(shader, source.code);
        gl.compile_shader(shader);
        ctx.check_errors();

        if ctx.verbose() && !gl.shader_compiled(shader) {
            log::error!(
                "{:?} shader compilation error:\n{}",
                source.stage,
                gl.shader_info_log(shader)
            );
        }
        shader
    }

    /// Driver handle of `name`.
    ///
    /// # Panics
    ///
    /// If `name` was never registered.
    pub fn program(&self, name: ProgramName) -> u32 {
        self.programs[&name]
    }

    #[track_caller]
    pub fn use_program<D: GlDriver>(&self, ctx: &mut GlContext<D>, name: ProgramName) {
        ctx.use_program(self.program(name));
    }

    pub fn names(&self) -> impl Iterator<Item = ProgramName> + '_ {
        self.programs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn destroy<D: GlDriver>(self, ctx: &mut GlContext<D>) {
        for (_, program) in self.programs {
            ctx.gl().delete_program(program);
            ctx.program_released(program);
        }
    }
}
