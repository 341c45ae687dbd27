//! Windowed animator: builder and event loop.
//!
//! [`Animator`] configures a window plus a [`ParticleField`] and runs the
//! self-perpetuating redraw loop. Each redraw steps the simulation, paints
//! it into the CPU framebuffer, hands the framebuffer to the `pixels`
//! presenter, and immediately requests the next redraw.
//!
//! # Example
//!
//! ```ignore
//! Animator::new()
//!     .with_title("particle globe")
//!     .with_size(1280, 720)
//!     .with_field(|f| {
//!         f.particle_count(800);
//!     })
//!     .run()?;
//! ```

use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::canvas::PixelCanvas;
use crate::config::{FieldConfig, VisualConfig};
use crate::error::AnimatorError;
use crate::field::ParticleField;
use crate::input::PointerTracker;
use crate::time::FrameClock;

/// A windowed particle-globe animation builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Animator {
    title: String,
    size: (u32, u32),
    field_config: FieldConfig,
    visual_config: VisualConfig,
    seed: Option<u64>,
}

impl Animator {
    /// Create an animator with default settings.
    pub fn new() -> Self {
        Self {
            title: "globefield".to_string(),
            size: (1280, 720),
            field_config: FieldConfig::default(),
            visual_config: VisualConfig::default(),
            seed: None,
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    /// Adjust the physics configuration.
    pub fn with_field<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut FieldConfig),
    {
        configure(&mut self.field_config);
        self
    }

    /// Adjust the paint configuration.
    pub fn with_visuals<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut VisualConfig),
    {
        configure(&mut self.visual_config);
        self
    }

    /// Seed the field's sampling for a reproducible globe.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the animation. Blocks until the window is closed or Escape is
    /// pressed.
    pub fn run(self) -> Result<(), AnimatorError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything that only exists once the window is up.
struct Stage {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    canvas: PixelCanvas,
    field: ParticleField,
}

struct App {
    settings: Animator,
    stage: Option<Stage>,
    tracker: PointerTracker,
    clock: FrameClock,
    error: Option<AnimatorError>,
}

impl App {
    fn new(settings: Animator) -> Self {
        Self {
            settings,
            stage: None,
            tracker: PointerTracker::new(),
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AnimatorError> {
        let (width, height) = self.settings.size;
        let attrs = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_texture = SurfaceTexture::new(width, height, window.clone());
        let pixels = Pixels::new(width, height, surface_texture)?;

        let field = match self.settings.seed {
            Some(seed) => ParticleField::seeded(
                self.settings.field_config.clone(),
                self.settings.visual_config.clone(),
                width,
                height,
                seed,
            ),
            None => ParticleField::new(
                self.settings.field_config.clone(),
                self.settings.visual_config.clone(),
                width,
                height,
            ),
        };

        self.tracker.set_window_size(width, height);
        log::info!(
            "animator started at {}x{} with {} particles",
            width,
            height,
            field.particles().len()
        );

        window.request_redraw();
        self.stage = Some(Stage {
            window,
            pixels,
            canvas: PixelCanvas::new(width, height),
            field,
        });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), AnimatorError> {
        if let Some(stage) = &mut self.stage {
            stage.pixels.resize_surface(width, height)?;
            stage.pixels.resize_buffer(width, height)?;
            stage.canvas.resize(width, height);
            stage.field.resize(width, height);
            self.tracker.set_window_size(width, height);
            log::info!("surface resized to {}x{}, field reinitialized", width, height);
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AnimatorError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.stage.is_none() {
            if let Err(error) = self.init(event_loop) {
                self.fail(event_loop, error);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.tracker.handle_event(&event) {
            let centered = self.tracker.centered();
            if let Some(stage) = &mut self.stage {
                stage.field.pointer_moved(centered);
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                // Minimized windows report zero; keep the old surface.
                if new_size.width > 0 && new_size.height > 0 {
                    if let Err(error) = self.resize(new_size.width, new_size.height) {
                        self.fail(event_loop, error);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(stage) = &mut self.stage {
                    stage.field.frame(&mut stage.canvas);
                    stage.pixels.frame_mut().copy_from_slice(stage.canvas.as_bytes());

                    match stage.pixels.render() {
                        Ok(()) => {}
                        Err(pixels::Error::Surface(pixels::wgpu::SurfaceError::Lost)) => {
                            // Recreate the swapchain; the next frame retries.
                            let size = stage.window.inner_size();
                            if let Err(e) = stage
                                .pixels
                                .resize_surface(size.width.max(1), size.height.max(1))
                            {
                                let error = AnimatorError::from(e);
                                log::error!("{}", error);
                                self.error = Some(error);
                                event_loop.exit();
                                return;
                            }
                        }
                        Err(e @ pixels::Error::Surface(pixels::wgpu::SurfaceError::OutOfMemory)) => {
                            let error = AnimatorError::from(e);
                            log::error!("{}", error);
                            self.error = Some(error);
                            event_loop.exit();
                            return;
                        }
                        Err(e) => log::error!("render error: {}", e),
                    }

                    if self.clock.tick() {
                        let title =
                            format!("{} - {:.0} fps", self.settings.title, self.clock.fps());
                        stage.window.set_title(&title);
                    }
                    stage.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
