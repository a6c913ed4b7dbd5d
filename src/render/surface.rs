// surface.rs - Lifecycle of the drawing surface: init, redraw, teardown

use super::backend::{Gpu, PolygonMode};
use super::mesh::QuadMesh;
use super::shaders::{ShaderProgram, ShaderProgramBuilder, ShaderSource, COLOUR_ATTRIBUTE};
use crate::utils::error::SurfaceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Uninitialized,
    Initialized,
    /// Initialization failed; redraws only clear.
    Failed,
    Destroyed,
}

/// What the host asked the surface to do, usually from a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    Quit,
    Wireframe,
    Filled,
    /// Constant value for `inColour`.
    Colour([f32; 3]),
}

/// Result of one redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Drawn,
    Cleared,
}

struct Resources<G: Gpu> {
    mesh: QuadMesh<G>,
    program: ShaderProgram<G::Program>,
}

/// Owns the GPU backend and, once initialized, exactly one program and one
/// quad mesh. Both are released together, once, by [`Surface::destroy`] or
/// on drop.
pub struct Surface<G: Gpu> {
    gpu: G,
    builder: ShaderProgramBuilder,
    clear_colour: [f32; 4],
    state: SurfaceState,
    resources: Option<Resources<G>>,
    polygon_mode: PolygonMode,
    frames: u64,
}

impl<G: Gpu> Surface<G> {
    pub fn new(gpu: G, source: ShaderSource, clear_colour: [f32; 4]) -> Self {
        Self {
            gpu,
            builder: ShaderProgramBuilder::new(source),
            clear_colour,
            state: SurfaceState::Uninitialized,
            resources: None,
            polygon_mode: PolygonMode::Fill,
            frames: 0,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn gpu(&self) -> &G {
        &self.gpu
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    /// Frames in which the quad was actually drawn.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    pub fn program(&self) -> Option<&ShaderProgram<G::Program>> {
        self.resources.as_ref().map(|r| &r.program)
    }

    /// Uploads the quad, then builds the shader program.
    ///
    /// Does nothing once initialized. A failed attempt leaves nothing
    /// allocated and the surface in [`SurfaceState::Failed`]; calling this
    /// again retries.
    pub fn initialize(&mut self) -> Result<(), SurfaceError> {
        match self.state {
            SurfaceState::Initialized => return Ok(()),
            SurfaceState::Destroyed => return Err(SurfaceError::Destroyed),
            SurfaceState::Uninitialized | SurfaceState::Failed => {}
        }

        self.gpu.clear_colour(self.clear_colour);
        log::info!("OpenGL Version : {}", self.gpu.version());

        let mesh = match QuadMesh::upload(&self.gpu) {
            Ok(mesh) => mesh,
            Err(e) => {
                self.state = SurfaceState::Failed;
                return Err(e);
            }
        };

        let program = match self.builder.build(&self.gpu) {
            Ok(program) => program,
            Err(e) => {
                mesh.delete(&self.gpu);
                self.state = SurfaceState::Failed;
                return Err(e.into());
            }
        };

        self.resources = Some(Resources { mesh, program });
        self.state = SurfaceState::Initialized;
        log::info!("Surface initialized");
        Ok(())
    }

    /// Clears and draws the quad. Initializes on first use.
    ///
    /// The caller presents the frame afterwards.
    pub fn render(&mut self) -> Result<Frame, SurfaceError> {
        if self.state == SurfaceState::Uninitialized {
            self.initialize()?;
        }

        match (self.state, &self.resources) {
            (SurfaceState::Destroyed, _) => Err(SurfaceError::Destroyed),
            (SurfaceState::Initialized, Some(resources)) => {
                self.gpu.clear_colour_and_depth();
                resources.program.set_used(&self.gpu);
                resources.mesh.draw(&self.gpu);
                self.frames += 1;
                Ok(Frame::Drawn)
            }
            _ => {
                self.gpu.clear_colour_and_depth();
                Ok(Frame::Cleared)
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == SurfaceState::Destroyed {
            return;
        }
        let clamp = |v: u32| v.min(i32::MAX as u32) as i32;
        self.gpu.viewport(clamp(width), clamp(height));
    }

    /// Applies a rasterizer or colour command. `Quit` is for the host.
    pub fn apply(&mut self, command: SurfaceCommand) {
        if self.state == SurfaceState::Destroyed {
            log::warn!("Ignoring {:?} on destroyed surface", command);
            return;
        }

        match command {
            SurfaceCommand::Quit => {}
            SurfaceCommand::Wireframe => self.set_polygon_mode(PolygonMode::Line),
            SurfaceCommand::Filled => self.set_polygon_mode(PolygonMode::Fill),
            SurfaceCommand::Colour(rgb) => self.gpu.constant_attrib_3f(COLOUR_ATTRIBUTE, rgb),
        }
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.gpu.polygon_mode(mode);
        self.polygon_mode = mode;
    }

    /// Releases the program and the quad. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(resources) = self.resources.take() {
            resources.program.delete(&self.gpu);
            resources.mesh.delete(&self.gpu);
            log::debug!("Released surface resources after {} frames", self.frames);
        }
        self.state = SurfaceState::Destroyed;
    }

    /// Forgets the program and the quad without any GL call, for when the
    /// context can no longer be made current. The GPU objects leak.
    pub fn abandon(&mut self) {
        if self.resources.take().is_some() {
            log::warn!("Context lost, leaking surface resources");
        }
        self.state = SurfaceState::Destroyed;
    }
}

impl<G: Gpu> Drop for Surface<G> {
    fn drop(&mut self) {
        self.destroy();
    }
}
