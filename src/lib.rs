pub mod config;
pub mod input;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::core::AppConfig;
pub use input::command_for_key;
pub use render::backend::{GlowBackend, Gpu};
pub use render::shaders::{ShaderError, ShaderProgramBuilder, ShaderSource};
pub use render::surface::{Frame, Surface, SurfaceCommand, SurfaceState};
pub use utils::error::{ConfigError, SurfaceError};
