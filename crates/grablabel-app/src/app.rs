//! Application state and window lifecycle.

use grablabel_core::{ConfigError, LabelConfig, LabelWidget};
use grablabel_render::{LabelRenderer, RenderContext, RendererError, VelloLabelRenderer};
use kurbo::{Point, Size};
use peniko::Color;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::event_handler::EventHandler;

/// Errors that stop the application before or while running.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub background_color: Color,
    /// Initial label setup. Its screen size is also the initial window size.
    pub label: LabelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "GrabLabel".to_string(),
            background_color: Color::from_rgba8(250, 250, 250, 255),
            label: LabelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from command-line arguments.
    ///
    /// The first argument, when present, is a path to a label config file.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(path) = args.nth(1).map(PathBuf::from) {
            config.label = LabelConfig::load(&path)?;
        }
        Ok(config)
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    label_renderer: VelloLabelRenderer,
    /// Texture blitter for RGBA->surface format conversion.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    widget: LabelWidget,
    event_handler: EventHandler,
    /// Last cursor position in logical coordinates.
    cursor: Point,
}

impl AppState {
    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    fn to_logical(&self, position: winit::dpi::PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f64>(self.scale_factor());
        Point::new(logical.x, logical.y)
    }

    /// Ask the window for a frame if the widget changed.
    fn schedule_redraw(&self) {
        if self.widget.needs_redraw() {
            self.window.request_redraw();
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window closes.
    pub async fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    fn init_state(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        let mut widget = match LabelWidget::from_config(&self.config.label) {
            Ok(widget) => widget,
            Err(e) => {
                log::error!("Invalid label configuration, using defaults: {}", e);
                LabelWidget::new()
            }
        };
        let screen = widget.screen_size();

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(screen.width, screen.height));
        let window = event_loop
            .create_window(window_attrs)
            .map(Arc::new)
            .map_err(|e| RendererError::InitFailed(format!("window: {}", e)))?;

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (screen.width as u32, screen.height as u32)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::InitFailed(format!("surface: {:?}", e)))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("vello: {:?}", e)))?;
        // Vello renders to Rgba8Unorm; the surface format may differ.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let label_renderer = VelloLabelRenderer::new();

        let logical = size.to_logical::<f64>(window.scale_factor());
        if logical.width > 0.0 && logical.height > 0.0 {
            widget.set_screen_size(Size::new(logical.width, logical.height));
        }

        window.request_redraw();

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            label_renderer,
            texture_blitter,
            widget,
            event_handler: EventHandler::new(),
            cursor: Point::ZERO,
        })
    }

    fn paint(&mut self) -> Result<(), RendererError> {
        let Some(state) = &mut self.state else {
            return Ok(());
        };
        let Some(render_cx) = self.render_cx.as_ref() else {
            return Ok(());
        };

        state.widget.take_redraw_request();
        let ctx = RenderContext::new(&state.widget)
            .with_scale_factor(state.scale_factor())
            .with_background(self.config.background_color);
        state.label_renderer.build_scene(&ctx);
        let base_color = state.label_renderer.background_color(&ctx);
        let scene = state.label_renderer.take_scene();

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return Ok(());
            }
        };

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        state
            .vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut blit_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        state
            .texture_blitter
            .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(blit_encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.init_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::RedrawRequested) {
            if let Err(e) = self.paint() {
                log::error!("{}", e);
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                let logical = size.to_logical::<f64>(state.scale_factor());
                state.widget.set_screen_size(Size::new(logical.width, logical.height));

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.widget.request_redraw();
                state.schedule_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = state.to_logical(position);
                state.event_handler.pointer_moved(state.cursor, &mut state.widget);
                state.schedule_redraw();
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button: MouseButton::Left,
                ..
            } => {
                match btn_state {
                    ElementState::Pressed => {
                        state.event_handler.pointer_pressed(state.cursor, &mut state.widget);
                    }
                    ElementState::Released => {
                        state.event_handler.pointer_released(&mut state.widget);
                    }
                }
                state.schedule_redraw();
            }

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                if state.event_handler.pointer_cancelled(&mut state.widget) {
                    log::debug!("Drag cancelled");
                }
                state.schedule_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                state.widget.request_redraw();
                state.schedule_redraw();
            }

            _ => {}
        }
    }
}
