use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use orbitview_common::Viewport;
use orbitview_input::{PointerButton, PointerTracker};
use orbitview_render::{DriverConfig, FrameDriver, FrameStatus};
use orbitview_render_wgpu::WgpuRenderer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Browser-style pixels per scrolled line.
const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Parser)]
#[command(name = "orbitview-desktop", about = "Wireframe cube under orbit controls")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: f64,

    /// Slowly spin the camera around the cube
    #[arg(long)]
    auto_rotate: bool,

    /// Apply orbit input immediately instead of easing it out
    #[arg(long)]
    no_damping: bool,

    /// Longest frame delta handed to the controls, in seconds
    #[arg(long, default_value = "0.1")]
    max_frame_delta: f32,
}

/// Window, driver and input state. Everything GPU-bound is created on the
/// first `resumed` event.
struct OrbitApp {
    config: DriverConfig,
    initial_size: LogicalSize<f64>,
    window: Option<Arc<Window>>,
    driver: Option<FrameDriver<WgpuRenderer>>,
    pointer: PointerTracker,
    pan_modifier: bool,
    error: Option<anyhow::Error>,
}

impl OrbitApp {
    fn new(config: DriverConfig, initial_size: LogicalSize<f64>) -> Self {
        Self {
            config,
            initial_size,
            window: None,
            driver: None,
            pointer: PointerTracker::new(),
            pan_modifier: false,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("orbitview")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());
        let renderer = WgpuRenderer::new(window.clone(), viewport.buffer_size())?;
        let driver = FrameDriver::initialize(renderer, viewport, &self.config);

        window.request_redraw();
        self.window = Some(window);
        self.driver = Some(driver);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        if let Some(driver) = &mut self.driver {
            driver.on_resize(Viewport::from_physical(size.width, size.height, scale_factor));
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        if let Some(driver) = &mut self.driver {
            driver.stop();
        }
        self.error = Some(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        let Some(driver) = &mut self.driver else {
            return;
        };
        match key {
            KeyCode::KeyR => {
                driver.reset_view();
                tracing::info!("view reset");
            }
            KeyCode::Space => {
                let controls = driver.controls_mut();
                controls.auto_rotate = !controls.auto_rotate;
                tracing::info!("auto-rotate {}", controls.auto_rotate);
            }
            KeyCode::Escape => {
                driver.stop();
                event_loop.exit();
            }
            _ => {}
        }
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

impl ApplicationHandler for OrbitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e.context("failed to initialize viewer"));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                if let Some(driver) = &mut self.driver {
                    driver.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size, window.scale_factor());
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                tracing::debug!("scale factor changed to {scale_factor}");
                self.resize(window.inner_size(), scale_factor);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.pan_modifier = state.control_key() || state.shift_key() || state.super_key();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, key);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let Some(button) = pointer_button(button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => self.pointer.button_down(button, self.pan_modifier),
                    ElementState::Released => self.pointer.button_up(button),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(window.scale_factor());
                if let (Some(action), Some(driver)) = (
                    self.pointer.moved(Vec2::new(logical.x, logical.y)),
                    &mut self.driver,
                ) {
                    driver.handle_action(action);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up as positive; dolly expects
                // positive for scrolling down.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
                    MouseScrollDelta::PixelDelta(pos) => {
                        -pos.to_logical::<f32>(window.scale_factor()).y
                    }
                };
                if let (Some(action), Some(driver)) =
                    (self.pointer.wheel(delta_y), &mut self.driver)
                {
                    driver.handle_action(action);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(driver) = &mut self.driver else {
                    return;
                };
                match driver.tick() {
                    FrameStatus::Rendered(Ok(())) => window.request_redraw(),
                    FrameStatus::Rendered(Err(e)) => {
                        self.fail(event_loop, anyhow::Error::new(e).context("frame failed"));
                    }
                    FrameStatus::Stopped => {}
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("orbitview-desktop starting");

    let config = DriverConfig {
        enable_damping: !cli.no_damping,
        auto_rotate: cli.auto_rotate,
        max_frame_delta: Some(cli.max_frame_delta),
        ..DriverConfig::default()
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = OrbitApp::new(config, LogicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    if let Some(driver) = app.driver.take() {
        let stats = driver.stats();
        tracing::info!("rendered {} frames in {:.1}s", stats.frames, stats.elapsed);
        drop(driver.into_renderer());
    }

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
