use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_colour: [f32; 4],
    /// Requested OpenGL core profile version, `[major, minor]`.
    pub gl_version: [u8; 2],
    pub vsync: bool,
    pub depth_bits: u8,
    pub shaders: ShaderConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_colour: [0.4, 0.4, 0.4, 1.0],
            gl_version: [4, 1],
            vsync: true,
            depth_bits: 24,
            shaders: ShaderConfig::default(),
        }
    }
}

/// Files replacing the built-in shader stages. Unset stages use the built-in source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<PathBuf>,
}
