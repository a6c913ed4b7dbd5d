// shaders.rs - Shader program compilation and linking

use super::backend::{Gpu, ShaderStage};
use crate::config::rendering::ShaderConfig;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to create {0}: {1}")]
    Creation(&'static str, String),
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(&'static str),
    #[error("{} shader compilation failed: {log}", .stage.name())]
    Compilation { stage: ShaderStage, log: String },
    #[error("Program linking failed: {0}")]
    Linking(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Location of `inPosition`, fed from the quad's vertex buffer.
pub const POSITION_ATTRIBUTE: u32 = 0;
/// Location of `inColour`, set as a constant attribute value.
pub const COLOUR_ATTRIBUTE: u32 = 1;

/// Attribute locations bound before linking, independent of any
/// `layout(location = ..)` qualifiers in the source.
pub const ATTRIBUTE_BINDINGS: [(u32, &str); 2] = [
    (POSITION_ATTRIBUTE, "inPosition"),
    (COLOUR_ATTRIBUTE, "inColour"),
];

/// Built-in shader sources
pub mod quad_shaders {
    pub const VERTEX_SRC: &str = r#"
    #version 400 core

    layout (location = 0) in vec3 inPosition;
    layout (location = 1) in vec3 inColour;
    out vec3 vertColour;

    void main() {
        gl_Position = vec4(inPosition, 1.0);
        if (inPosition.x > 0.0 && inPosition.y < 0.5)
            vertColour = inColour;
        else
            vertColour = vec3(1, 1, 1);
    }
    "#;

    pub const FRAGMENT_SRC: &str = r#"
    #version 400 core

    in vec3 vertColour;
    out vec4 fragColour;

    void main() {
        fragColour = vec4(vertColour, 1.0);
    }
    "#;
}

/// Vertex and fragment source text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl Default for ShaderSource {
    fn default() -> Self {
        Self {
            vertex: Cow::Borrowed(quad_shaders::VERTEX_SRC),
            fragment: Cow::Borrowed(quad_shaders::FRAGMENT_SRC),
        }
    }
}

impl ShaderSource {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// The built-in sources with each stage replaced by a file when the
    /// config names one.
    pub fn from_config(config: &ShaderConfig) -> Result<Self, ShaderError> {
        let mut source = Self::default();
        if let Some(path) = &config.vertex {
            source.vertex = Cow::Owned(Self::load(path)?);
        }
        if let Some(path) = &config.fragment {
            source.fragment = Cow::Owned(Self::load(path)?);
        }
        Ok(source)
    }

    fn load(path: &Path) -> Result<String, ShaderError> {
        log::info!("Loading shader source from {}", path.display());
        Ok(fs::read_to_string(path)?)
    }

    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

/// A linked program. Release it with [`ShaderProgram::delete`]; the handle
/// does not free itself because it does not own the context.
#[derive(Debug, PartialEq)]
pub struct ShaderProgram<P> {
    id: P,
}

impl<P: Copy> ShaderProgram<P> {
    pub fn id(&self) -> P {
        self.id
    }

    pub fn set_used<G: Gpu<Program = P>>(&self, gpu: &G) {
        gpu.use_program(Some(self.id));
    }

    pub fn delete<G: Gpu<Program = P>>(self, gpu: &G) {
        gpu.use_program(None);
        gpu.delete_program(self.id);
    }
}

/// Compiles, binds and links a [`ShaderSource`] into an active program.
pub struct ShaderProgramBuilder {
    source: ShaderSource,
}

impl ShaderProgramBuilder {
    pub fn new(source: ShaderSource) -> Self {
        Self { source }
    }

    /// On success the program is current. On failure every object created
    /// here has been released again.
    pub fn build<G: Gpu>(&self, gpu: &G) -> Result<ShaderProgram<G::Program>, ShaderError> {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if self.source.stage(stage).contains('\0') {
                return Err(ShaderError::InvalidSource(stage.name()));
            }
        }

        let vertex = Self::compile_shader(gpu, ShaderStage::Vertex, &self.source.vertex)?;
        let fragment = match Self::compile_shader(gpu, ShaderStage::Fragment, &self.source.fragment) {
            Ok(shader) => shader,
            Err(e) => {
                gpu.delete_shader(vertex);
                return Err(e);
            }
        };

        let result = Self::link_program(gpu, vertex, fragment);

        gpu.delete_shader(vertex);
        gpu.delete_shader(fragment);

        let program = result?;
        gpu.use_program(Some(program));
        Ok(ShaderProgram { id: program })
    }

    fn compile_shader<G: Gpu>(
        gpu: &G,
        stage: ShaderStage,
        source: &str,
    ) -> Result<G::Shader, ShaderError> {
        let shader = gpu
            .create_shader(stage)
            .map_err(|e| ShaderError::Creation("shader", e))?;

        log::debug!("Compiling {} shader", stage.name());
        gpu.shader_source(shader, source);
        gpu.compile_shader(shader);

        let info_log = gpu.shader_info_log(shader);
        let success = gpu.shader_compile_status(shader);

        if !info_log.trim().is_empty() {
            if success {
                log::warn!("{} shader compiler output:\n{}", stage.name(), info_log.trim_end());
            } else {
                log::error!("{} shader compiler output:\n{}", stage.name(), info_log.trim_end());
            }
        }

        if !success {
            gpu.delete_shader(shader);
            return Err(ShaderError::Compilation {
                stage,
                log: info_log,
            });
        }

        Ok(shader)
    }

    fn link_program<G: Gpu>(
        gpu: &G,
        vertex: G::Shader,
        fragment: G::Shader,
    ) -> Result<G::Program, ShaderError> {
        let program = gpu
            .create_program()
            .map_err(|e| ShaderError::Creation("program", e))?;

        gpu.attach_shader(program, vertex);
        gpu.attach_shader(program, fragment);
        for (index, name) in ATTRIBUTE_BINDINGS {
            gpu.bind_attrib_location(program, index, name);
        }
        gpu.link_program(program);

        let success = gpu.program_link_status(program);

        gpu.detach_shader(program, vertex);
        gpu.detach_shader(program, fragment);

        if !success {
            let info_log = gpu.program_info_log(program);
            log::error!("Program link output:\n{}", info_log.trim_end());
            gpu.delete_program(program);
            return Err(ShaderError::Linking(info_log));
        }

        Ok(program)
    }
}
