//! Startup sequence and the frame loop.

use crate::buffers::{VertexArray, VertexBuffer};
use crate::config::BackendConfig;
use crate::driver::{BufferUsage, ClearMask, GlDriver, Primitive};
use crate::error::BackendError;
use crate::glutils::{DriverInfo, GlContext};
use crate::math::Vertex2D;
use crate::shaders::{ProgramName, ShaderRegistry};
use crate::state::GameState;
use crate::system::{IoEvent, Platform, System};
use crate::term::{Color, Paint};

const TRIANGLE: [Vertex2D; 3] = [
    Vertex2D::new(-0.5, -0.5),
    Vertex2D::new(0.0, 0.5),
    Vertex2D::new(0.5, -0.5),
];

/// GPU objects drawn every frame.
pub struct Renderer {
    vertex_array: VertexArray,
    shaders: ShaderRegistry,
    triangle: VertexBuffer<Vertex2D>,
}

impl Renderer {
    pub fn initialize<D: GlDriver>(ctx: &mut GlContext<D>, config: &BackendConfig) -> Renderer {
        // A core profile needs a bound vertex array; one is enough for everything.
        let vertex_array = VertexArray::new(ctx);
        vertex_array.enable_attribute(ctx, 0);

        let shaders = ShaderRegistry::initialize(ctx);

        let triangle = VertexBuffer::new(ctx, &TRIANGLE, BufferUsage::Static);
        ctx.describe_vertex::<Vertex2D>();

        let [r, g, b, a] = config.clear_color;
        ctx.gl().clear_color(r, g, b, a);
        ctx.check_errors();

        Renderer {
            vertex_array,
            shaders,
            triangle,
        }
    }

    pub fn draw_frame<D: GlDriver>(&self, ctx: &mut GlContext<D>) {
        ctx.gl().clear(ClearMask::COLOR);
        ctx.check_errors();
        self.shaders.use_program(ctx, ProgramName::Debug);
        ctx.gl()
            .draw_arrays(Primitive::Triangles, 0, self.triangle.len() as i32);
        ctx.check_errors();
    }

    /// Releases everything in reverse order of creation.
    pub fn destroy<D: GlDriver>(self, ctx: &mut GlContext<D>) {
        self.triangle.destroy(ctx);
        self.shaders.destroy(ctx);
        self.vertex_array.destroy(ctx);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    /// `Unknown event` lines logged at info level, one per unrecognized event.
    pub unknown_events: usize,
}

/// Runs frames until the platform delivers [`IoEvent::Quit`].
///
/// Each iteration drains every queued event, then clears, draws, pauses for
/// `config.frame_delay` and presents. Events queued behind a quit are dropped.
pub fn run_loop<P: Platform, D: GlDriver>(
    platform: &mut P,
    ctx: &mut GlContext<D>,
    renderer: &Renderer,
    state: &mut GameState,
    config: &BackendConfig,
) -> LoopStats {
    let mut unknown_events = 0;

    'running: loop {
        while let Some(event) = platform.poll_event() {
            match event {
                IoEvent::Quit => break 'running,
                other => {
                    if config.verbose_driver_diagnostics {
                        log::info!("Unknown event: {other:?}");
                        unknown_events += 1;
                    }
                }
            }
        }

        state.tick();
        renderer.draw_frame(ctx);

        // TODO: pace frames against the display refresh instead of a fixed pause
        platform.pause(config.frame_delay);
        platform.present();
    }

    LoopStats {
        frames: state.ticks(),
        unknown_events,
    }
}

/// Everything after the driver is loaded: banner, GPU setup, the loop and GPU teardown.
pub fn session<P: Platform, D: GlDriver>(
    platform: &mut P,
    ctx: &mut GlContext<D>,
    config: &BackendConfig,
) -> LoopStats {
    println!("{}", DriverInfo::query(ctx).banner());

    let renderer = Renderer::initialize(ctx, config);
    let mut state = GameState::default();

    log::info!("entering frame loop");
    let stats = run_loop(platform, ctx, &renderer, &mut state, config);
    log::info!(
        "quit after {} frames ({} unknown events)",
        stats.frames,
        stats.unknown_events
    );

    renderer.destroy(ctx);
    stats
}

/// Opens the window, loads the driver and runs until quit.
///
/// The context is dropped before the window and SDL itself.
pub fn run(config: &BackendConfig) -> Result<LoopStats, BackendError> {
    let mut system = System::new(config)?;
    let driver = system.load_driver()?;
    let mut ctx = GlContext::new(driver, config.verbose_driver_diagnostics);
    Ok(session(&mut system, &mut ctx, config))
}

/// The red console line printed when OpenGL cannot be started.
pub fn fatal_line(err: &BackendError) -> String {
    format!("Error: Could not start OpenGL ({err})").paint(Color::Red)
}

/// Process exit status for the outcome of [`run`].
///
/// Any startup failure prints [`fatal_line`] to stdout and maps to `-1`.
pub fn exit_status(outcome: &Result<LoopStats, BackendError>) -> i32 {
    match outcome {
        Ok(_) => 0,
        Err(err) => {
            println!("{}", fatal_line(err));
            -1
        }
    }
}
