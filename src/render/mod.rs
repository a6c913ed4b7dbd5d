pub mod backend;
pub mod mesh;
pub mod shaders;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{GlowBackend, Gpu, PolygonMode, ShaderStage};
pub use mesh::QuadMesh;
pub use shaders::{ShaderError, ShaderProgram, ShaderProgramBuilder, ShaderSource};
pub use surface::{Frame, Surface, SurfaceCommand, SurfaceState};
