//! Core application state and lifecycle.

use crate::event_handler::{EventHandler, ViewState};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use shapepad_core::canvas::Canvas;
use shapepad_core::clock::{LocalClock, WallClock};
use shapepad_core::input::MouseButton;
use shapepad_core::shapes::SerializableColor;
use shapepad_core::tools::{CursorKind, Mode};
use shapepad_render::{
    DEFAULT_GRID_PITCH, DrawCommand, FrameOutcome, FramePresenter, GridStyle, RenderBackend,
    RenderContext, RenderResult, Renderer, RendererError, VelloRenderer,
};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::{PresentMode, SurfaceError};
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorIcon, Window, WindowId};

/// How often a visible clock is repainted.
const CLOCK_TICK: Duration = Duration::from_secs(1);

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Initial window width in device-independent units.
    pub width: u32,
    /// Initial window height in device-independent units.
    pub height: u32,
    pub background_color: SerializableColor,
    pub grid_style: GridStyle,
    pub grid_pitch: f64,
    pub show_clock: bool,
    pub initial_mode: Mode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "shapepad".to_string(),
            width: 600,
            height: 600,
            background_color: SerializableColor::white(),
            grid_style: GridStyle::Lines,
            grid_pitch: DEFAULT_GRID_PITCH,
            show_clock: true,
            initial_mode: Mode::Draw,
        }
    }
}

impl AppConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Vello/wgpu resources behind the window.
pub struct SurfaceBackend {
    window: Arc<Window>,
    render_cx: vello::util::RenderContext,
    surface: Option<RenderSurface<'static>>,
    vello_renderer: Option<vello::Renderer>,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: Option<vello::wgpu::util::TextureBlitter>,
    scene_builder: VelloRenderer,
    fallback_size: PhysicalSize<u32>,
}

impl SurfaceBackend {
    pub fn new(window: Arc<Window>, fallback_size: PhysicalSize<u32>) -> Self {
        Self {
            window,
            render_cx: vello::util::RenderContext::new(),
            surface: None,
            vello_renderer: None,
            texture_blitter: None,
            scene_builder: VelloRenderer::new(),
            fallback_size,
        }
    }
}

impl RenderBackend for SurfaceBackend {
    fn acquire_surface(&mut self) -> RenderResult<()> {
        let size = self.window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.fallback_size.width, self.fallback_size.height)
        } else {
            (size.width, size.height)
        };

        let surface = pollster::block_on(self.render_cx.create_surface(
            self.window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::InitFailed(format!("surface: {e:?}")))?;

        // The surface borrows the window, which the backend keeps alive
        let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };

        let device = &self.render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("renderer: {e:?}")))?;

        // Vello renders to Rgba8Unorm; the surface format may differ
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        log::info!("Surface created: {}x{}", width, height);
        self.vello_renderer = Some(vello_renderer);
        self.texture_blitter = Some(texture_blitter);
        self.surface = Some(surface);
        Ok(())
    }

    fn release_surface(&mut self) {
        self.texture_blitter = None;
        self.vello_renderer = None;
        if self.surface.take().is_some() {
            log::info!("Surface released");
        }
    }

    fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(surface) = self.surface.as_mut() {
            log::debug!("Surface resized: {}x{}", width, height);
            self.render_cx.resize_surface(surface, width, height);
        }
    }

    fn draw(&mut self, ctx: &RenderContext, commands: &[DrawCommand]) -> RenderResult<()> {
        let (Some(surface), Some(vello_renderer), Some(texture_blitter)) = (
            self.surface.as_mut(),
            self.vello_renderer.as_mut(),
            self.texture_blitter.as_ref(),
        ) else {
            return Err(RendererError::SurfaceLost);
        };

        let width = surface.config.width;
        let height = surface.config.height;
        if width == 0 || height == 0 {
            return Ok(());
        }

        let surface_texture = match surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(SurfaceError::Outdated) => {
                // Still valid, just configured for a stale size
                let size = self.window.inner_size();
                if size.width > 0 && size.height > 0 {
                    self.render_cx
                        .resize_surface(surface, size.width, size.height);
                }
                return Err(RendererError::SurfaceOutdated);
            }
            Err(SurfaceError::Lost) => return Err(RendererError::SurfaceLost),
            Err(e) => return Err(RendererError::Surface(format!("{e:?}"))),
        };

        self.scene_builder.build_scene(ctx, commands);
        let scene = self.scene_builder.take_scene();

        let device_handle = &self.render_cx.devices[surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let params = RenderParams {
            base_color: self.scene_builder.background_color(ctx),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Intermediate texture with StorageBinding usage for Vello
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

        vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{e:?}")))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut blit_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
        texture_blitter.copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(blit_encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

/// Runtime state for the application.
struct AppState {
    // Rendering; dropped before the window
    presenter: FramePresenter<SurfaceBackend>,

    // Windowing
    window: Arc<Window>,

    // State
    canvas: Canvas,
    view: ViewState,

    // Event handling
    event_handler: EventHandler,
    next_clock_tick: Instant,
}

impl AppState {
    fn sync_viewport(&mut self, size: PhysicalSize<u32>) {
        let scale = self.event_handler.scale().factor();
        let logical: LogicalSize<f64> = size.to_logical(scale);
        self.canvas.set_viewport_size(logical.width, logical.height);
    }

    fn sync_cursor(&self) {
        let icon = match self.canvas.mode().cursor() {
            CursorKind::Arrow => CursorIcon::Default,
            CursorKind::Crosshair => CursorIcon::Crosshair,
            CursorKind::Hand => CursorIcon::Grab,
        };
        self.window.set_cursor(icon);
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    clock: Box<dyn WallClock>,
    /// Fatal error that stopped the event loop.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            clock: Box::new(LocalClock),
            error: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let scale_factor = window.scale_factor();
        let fallback: PhysicalSize<u32> =
            LogicalSize::new(self.config.width, self.config.height).to_physical(scale_factor);

        let mut backend = SurfaceBackend::new(window.clone(), fallback);
        backend.acquire_surface()?;

        let mut state = AppState {
            presenter: FramePresenter::new(backend),
            window: window.clone(),
            canvas: Canvas::with_mode(self.config.initial_mode),
            view: ViewState {
                grid_style: self.config.grid_style,
                show_clock: self.config.show_clock,
            },
            event_handler: EventHandler::new(scale_factor),
            next_clock_tick: Instant::now(),
        };
        let size = window.inner_size();
        state.sync_viewport(if size.width == 0 { fallback } else { size });
        state.sync_cursor();
        Ok(state)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        let clock = state.view.show_clock.then(|| self.clock.now());
        let ctx = RenderContext::new(&state.canvas, state.canvas.viewport_size)
            .with_scale_factor(state.event_handler.scale().factor())
            .with_background(self.config.background_color)
            .with_grid(state.view.grid_style)
            .with_grid_pitch(self.config.grid_pitch)
            .with_clock(clock);

        match state.presenter.paint(&ctx) {
            Ok(FrameOutcome::Presented) => {}
            Ok(FrameOutcome::Abandoned) => {
                log::debug!(
                    "Frame abandoned ({} surface losses so far)",
                    state.presenter.surfaces_lost()
                );
                state.window.request_redraw();
            }
            Err(err @ RendererError::InitFailed(_)) => self.fail(event_loop, err.into()),
            Err(err) => log::warn!("Frame failed: {}", err),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw(event_loop);
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        let needs_redraw = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                false
            }

            WindowEvent::Resized(size) => {
                state.sync_viewport(size);
                if size.width > 0 && size.height > 0 {
                    state.presenter.resize(size.width, size.height);
                }
                true
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::info!("Scale factor changed: {}", scale_factor);
                state.event_handler.set_scale_factor(scale_factor);
                let size = state.window.inner_size();
                state.sync_viewport(size);
                true
            }

            WindowEvent::CursorMoved { position, .. } => state
                .event_handler
                .handle_cursor_moved(&mut state.canvas, Point::new(position.x, position.y)),

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return,
                };
                match btn_state {
                    ElementState::Pressed => {
                        state.event_handler.handle_press(&mut state.canvas, button)
                    }
                    ElementState::Released => {
                        let changed = state.event_handler.handle_release(&mut state.canvas, button);
                        // A drag restores its starting mode on release
                        state.sync_cursor();
                        changed
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let key = match &event.logical_key {
                    Key::Named(NamedKey::Escape) => "Escape",
                    Key::Named(NamedKey::Delete) => "Delete",
                    Key::Named(NamedKey::Backspace) => "Backspace",
                    Key::Character(c) => c.as_str(),
                    _ => return,
                };
                let changed =
                    state
                        .event_handler
                        .handle_key(&mut state.canvas, &mut state.view, key);
                state.sync_cursor();
                changed
            }

            WindowEvent::Focused(false) => {
                let changed = state.event_handler.cancel(&mut state.canvas);
                state.sync_cursor();
                changed
            }

            _ => false,
        };

        if needs_redraw {
            state.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        if !state.view.show_clock {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        let now = Instant::now();
        if now >= state.next_clock_tick {
            state.window.request_redraw();
            state.next_clock_tick = now + CLOCK_TICK;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(state.next_clock_tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = AppConfig::from_json(
            r#"{ "title": "pad", "grid_style": "Dots", "show_clock": false, "initial_mode": "Select" }"#,
        )
        .unwrap();
        assert_eq!(config.title, "pad");
        assert_eq!(config.grid_style, GridStyle::Dots);
        assert!(!config.show_clock);
        assert_eq!(config.initial_mode, Mode::Select);
        assert_eq!(config.width, 600);
        assert!((config.grid_pitch - DEFAULT_GRID_PITCH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            AppConfig::from_json("{ not json"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "width": "wide" }"#),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            AppConfig::from_file("/nonexistent/shapepad.json"),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = AppConfig {
            title: "Ellipses".to_string(),
            width: 800,
            height: 640,
            grid_style: GridStyle::None,
            grid_pitch: 25.0,
            show_clock: false,
            initial_mode: Mode::Drag,
            ..AppConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_default_window_size() {
        let config = AppConfig::default();
        assert_eq!((config.width, config.height), (600, 600));
        assert_eq!(config.background_color, SerializableColor::white());
        assert!(config.show_clock);
    }
}
