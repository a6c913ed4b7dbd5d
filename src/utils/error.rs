use crate::render::shaders::ShaderError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Shader program could not be built: {0}")]
    Shader(#[from] ShaderError),

    #[error("GPU resource creation failed: {0}")]
    Resource(String),

    #[error("Surface has been destroyed")]
    Destroyed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Couldn't determine config directory")]
    NoConfigDir,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
