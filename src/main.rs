use anyhow::{anyhow, Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface as GlutinSurface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{info, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32, path::PathBuf, sync::Arc};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{EventLoop, EventLoopWindowTarget},
    keyboard::PhysicalKey,
    window::{Window, WindowBuilder},
};

use quadshader::{
    command_for_key,
    utils::{init_logging, set_log_level},
    AppConfig, Frame, GlowBackend, ShaderSource, Surface, SurfaceCommand,
};

// `surface` must drop before the context it issues GL calls on.
struct App {
    surface: Surface<GlowBackend>,
    gl_surface: GlutinSurface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl App {
    fn new(event_loop: &EventLoop<()>, config: &AppConfig) -> Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(config.rendering.depth_bits);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                // glutin only calls the picker with a non-empty set.
                configs
                    .max_by_key(|config| config.num_samples())
                    .expect("glutin offers at least one config")
            })
            .map_err(|e| anyhow!("Failed to create window: {e}"))?;

        let window = window.context("Display builder returned no window")?;
        let raw_window_handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let [major, minor] = config.rendering.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("Failed to create OpenGL context")?;

        let attrs = window.build_surface_attributes(Default::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("Failed to create GL surface")?;

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        if config.rendering.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("Failed to enable vsync: {e}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                CString::new(symbol)
                    .map(|symbol| gl_display.get_proc_address(&symbol))
                    .unwrap_or(std::ptr::null())
            })
        };
        // The context was made current on this thread above and never leaves it.
        let gpu = unsafe { GlowBackend::new(Arc::new(gl)) };

        let source = ShaderSource::from_config(&config.rendering.shaders)?;
        let surface = Surface::new(gpu, source, config.rendering.clear_colour);

        Ok(Self {
            surface,
            gl_surface,
            gl_context,
            window,
        })
    }

    fn make_current(&self) -> bool {
        match self.gl_context.make_current(&self.gl_surface) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to make context current: {e}");
                false
            }
        }
    }

    fn handle_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => self.quit(elwt),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match command_for_key(key) {
                Some(SurfaceCommand::Quit) => self.quit(elwt),
                Some(command) => {
                    if self.make_current() {
                        self.surface.apply(command);
                    }
                    self.window.request_redraw();
                }
                None => {}
            },
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn redraw(&mut self) {
        if !self.make_current() {
            return;
        }

        match self.surface.render() {
            Ok(Frame::Drawn) => {}
            Ok(Frame::Cleared) => log::trace!("Surface not ready, frame only cleared"),
            Err(e) => log::error!("Render failed: {e}"),
        }

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::error!("Failed to present frame: {e}");
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        if self.make_current() {
            self.gl_surface.resize(&self.gl_context, w, h);
            self.surface.resize(width, height);
        }
    }

    fn quit(&mut self, elwt: &EventLoopWindowTarget<()>) {
        if self.make_current() {
            self.surface.destroy();
        } else {
            // No GL calls without a current context, not even from `Drop`.
            self.surface.abandon();
        }
        elwt.exit();
    }
}

fn main() -> Result<()> {
    init_logging(LevelFilter::Info)?;

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AppConfig::load_or_create_at(&path),
        None => AppConfig::load_or_create(),
    }
    .context("Failed to load config")?;

    set_log_level(config.log_level()?);
    info!("Initializing application...");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&event_loop, &config)?;

    event_loop.run(move |event, elwt| {
        if let Event::WindowEvent { event, window_id } = event {
            if window_id == app.window.id() {
                app.handle_window_event(event, elwt);
            }
        }
    })?;

    Ok(())
}
