use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub high_dpi: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Blockcraft".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            high_dpi: true,
        }
    }
}

/// Attributes requested before the OpenGL context is created. The profile is always core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextConfig {
    pub major: u8,
    pub minor: u8,
    pub double_buffer: bool,
    pub depth_bits: u8,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            major: 4,
            minor: 1,
            double_buffer: true,
            depth_bits: 24,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub window: WindowConfig,
    pub context: ContextConfig,
    /// Fixed pause between drawing a frame and presenting it.
    pub frame_delay: Duration,
    pub clear_color: [f32; 4],
    /// Query and log driver errors, check shader status and log unknown events.
    pub verbose_driver_diagnostics: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            window: WindowConfig::default(),
            context: ContextConfig::default(),
            frame_delay: Duration::from_millis(33),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            verbose_driver_diagnostics: cfg!(debug_assertions)
                || cfg!(feature = "show-gl-errors"),
        }
    }
}
