pub mod app;
pub mod buffers;
pub mod config;
pub mod driver;
pub mod error;
pub mod glutils;
pub mod logging;
pub mod math;
pub mod shaders;
pub mod state;
pub mod system;
pub mod term;

#[cfg(test)]
mod testing;

pub use config::BackendConfig;
pub use error::BackendError;
