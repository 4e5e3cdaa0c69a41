use crate::config::BackendConfig;
use crate::driver::NativeGl;
use crate::error::BackendError;
use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::MouseButton;
use sdl2::video::GLProfile;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MouseButtonId {
    // x, y
    Left(i32, i32),
    Right(i32, i32),
    Middle(i32, i32),
    Other(i32, i32),
}

impl MouseButtonId {
    fn new(button: MouseButton, x: i32, y: i32) -> MouseButtonId {
        match button {
            MouseButton::Left => MouseButtonId::Left(x, y),
            MouseButton::Right => MouseButtonId::Right(x, y),
            MouseButton::Middle => MouseButtonId::Middle(x, y),
            _ => MouseButtonId::Other(x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoEvent {
    Quit,
    // key name
    KeyDown(String),
    KeyUp(String),
    // x, y, xrel, yrel
    MouseMotion(i32, i32, i32, i32),
    MouseButtonUp(MouseButtonId),
    MouseButtonDown(MouseButtonId),
    // dx, dy (usually -1 or 1 based on direction)
    MouseWheel(i32, i32),
    // width, height
    WindowResized(i32, i32),
    /// Anything else, as SDL describes it.
    Other(String),
}

impl From<Event> for IoEvent {
    fn from(event: Event) -> IoEvent {
        match event {
            Event::Quit { .. } => IoEvent::Quit,
            Event::KeyDown {
                keycode: Some(key), ..
            } => IoEvent::KeyDown(key.name()),
            Event::KeyUp {
                keycode: Some(key), ..
            } => IoEvent::KeyUp(key.name()),
            Event::MouseMotion {
                x, y, xrel, yrel, ..
            } => IoEvent::MouseMotion(x, y, xrel, yrel),
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => IoEvent::MouseButtonDown(MouseButtonId::new(mouse_btn, x, y)),
            Event::MouseButtonUp {
                mouse_btn, x, y, ..
            } => IoEvent::MouseButtonUp(MouseButtonId::new(mouse_btn, x, y)),
            Event::MouseWheel { x, y, .. } => IoEvent::MouseWheel(x, y),
            Event::Window {
                win_event: WindowEvent::Resized(w, h),
                ..
            } => IoEvent::WindowResized(w, h),
            other => IoEvent::Other(format!("{other:?}")),
        }
    }
}

/// The windowing side of the frame loop.
pub trait Platform {
    /// Next queued event, without blocking.
    fn poll_event(&mut self) -> Option<IoEvent>;
    /// Swaps the back buffer onto the screen.
    fn present(&mut self);
    fn pause(&mut self, duration: Duration);
}

/// SDL window with its OpenGL context.
///
/// Fields drop in declaration order, which releases everything in reverse
/// order of acquisition.
pub struct System {
    event_pump: sdl2::EventPump,
    _gl_ctx: sdl2::video::GLContext,
    window: sdl2::video::Window,
    video_subsystem: sdl2::VideoSubsystem,
    _sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(config: &BackendConfig) -> Result<System, BackendError> {
        let sdl_context = sdl2::init().map_err(BackendError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(BackendError::Sdl)?;

        let ctx_cfg = config.context;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(ctx_cfg.major, ctx_cfg.minor);
        gl_attr.set_double_buffer(ctx_cfg.double_buffer);
        gl_attr.set_depth_size(ctx_cfg.depth_bits);

        let win_cfg = &config.window;
        let mut builder = video_subsystem.window(&win_cfg.title, win_cfg.width, win_cfg.height);
        builder.position_centered().opengl();
        if win_cfg.resizable {
            builder.resizable();
        }
        if win_cfg.high_dpi {
            builder.allow_highdpi();
        }
        let window = builder
            .build()
            .map_err(|e| BackendError::Window(e.to_string()))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(BackendError::Context)?;

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (ctx_cfg.major, ctx_cfg.minor));

        let event_pump = sdl_context.event_pump().map_err(BackendError::Sdl)?;

        log::info!(
            "window {}x{} with OpenGL {}.{} core context",
            win_cfg.width,
            win_cfg.height,
            ctx_cfg.major,
            ctx_cfg.minor
        );

        Ok(System {
            event_pump,
            _gl_ctx: gl_ctx,
            window,
            video_subsystem,
            _sdl_context: sdl_context,
        })
    }

    /// Resolves the OpenGL entry points against the current context.
    pub fn load_driver(&self) -> Result<NativeGl, BackendError> {
        let video = &self.video_subsystem;
        NativeGl::load(|name| video.gl_get_proc_address(name) as *const _)
    }
}

impl Platform for System {
    fn poll_event(&mut self) -> Option<IoEvent> {
        self.event_pump.poll_event().map(IoEvent::from)
    }

    fn present(&mut self) {
        self.window.gl_swap_window();
    }

    fn pause(&mut self, duration: Duration) {
        ::std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_recognized() {
        assert_eq!(IoEvent::from(Event::Quit { timestamp: 0 }), IoEvent::Quit);
    }

    #[test]
    fn unmapped_events_keep_a_description() {
        match IoEvent::from(Event::AppTerminating { timestamp: 7 }) {
            IoEvent::Other(desc) => assert!(desc.contains("AppTerminating")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn mouse_buttons() {
        assert_eq!(MouseButtonId::new(MouseButton::Left, 1, 2), MouseButtonId::Left(1, 2));
        assert_eq!(MouseButtonId::new(MouseButton::X1, 3, 4), MouseButtonId::Other(3, 4));
    }
}
