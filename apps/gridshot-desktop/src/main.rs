use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use gridshot_common::Viewport;
use gridshot_input::{InputEvent, Key};
use gridshot_kernel::{
    Frame, FrameDriver, FullscreenError, PresentError, Presenter, Session, TickOutcome,
};
use gridshot_map::MapData;
use gridshot_render::{SceneRenderer, SceneStyle};
use gridshot_render_wgpu::WgpuRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

#[derive(Parser, Debug)]
#[command(name = "gridshot-desktop", about = "Top-down tile map demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Map file (JSON or YAML). Uses the built-in map when omitted.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Pixel size of one map tile
    #[arg(long, default_value_t = 40.0)]
    tile_size: f32,
}

/// Translate a physical key into the game's key space. Only keys the game
/// binds are translated; digits come from the top row only.
fn map_key(code: KeyCode) -> Key {
    let c = match code {
        KeyCode::Digit0 => '0',
        KeyCode::Digit1 => '1',
        KeyCode::Digit2 => '2',
        KeyCode::Digit3 => '3',
        KeyCode::Digit4 => '4',
        KeyCode::Digit5 => '5',
        KeyCode::Digit6 => '6',
        KeyCode::Digit7 => '7',
        KeyCode::Digit8 => '8',
        KeyCode::Digit9 => '9',
        KeyCode::KeyF => 'f',
        _ => return Key::Other,
    };
    Key::from_char(c)
}

/// Events the HUD may keep from the game when it handles them. Pointer
/// motion always reaches the game so aiming works over the HUD.
fn overlay_may_consume(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. }
    )
}

/// Debug overlay toggled with F1.
struct Hud {
    visible: bool,
    block_count: usize,
}

impl Hud {
    fn draw(&self, ctx: &EguiContext, frame: &Frame<'_>) {
        if !self.visible {
            return;
        }

        let player = frame.player;
        let viewport = frame.commands.viewport();
        egui::Window::new("gridshot")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Weapon: {}", player.weapon.slot()));
                ui.label(format!("Look angle: {:.2}", player.look_angle));
                ui.label(format!("Tile: ({:.1}, {:.1})", player.pos.x, player.pos.y));
                ui.label(format!("Surface: {}x{}", viewport.width, viewport.height));
                ui.label(format!("Frame: {}", frame.index));
                ui.label(format!("Blocks: {}", self.block_count));
                ui.separator();
                ui.small("1-5: Weapon | F: Fullscreen | F1: HUD");
            });
    }
}

/// Window, GPU surface and overlay. This is the drawing surface the frame
/// driver presents to.
struct Graphics {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_ctx: EguiContext,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    hud: Hud,
}

impl Graphics {
    fn new(window: Arc<Window>, block_count: usize) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("gridshot_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // Scene colors are sRGB values already, so write them unconverted.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format);

        let egui_ctx = EguiContext::default();
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_ctx,
            egui_winit,
            egui_renderer,
            hud: Hud {
                visible: false,
                block_count,
            },
        })
    }

    fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width, size.height)
    }

    fn draw_overlay(&mut self, view: &wgpu::TextureView, frame: &Frame<'_>) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.hud.draw(ctx, frame);
        });

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

impl Presenter for Graphics {
    fn resize(&mut self, viewport: Viewport) {
        self.config.width = viewport.width.max(1);
        self.config.height = viewport.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    fn present(&mut self, frame: &Frame<'_>) -> Result<(), PresentError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(PresentError::SurfaceLost);
            }
            Err(e) => return Err(PresentError::Surface(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.device, &self.queue, &view, frame.commands);
        self.draw_overlay(&view, frame);

        output.present();
        Ok(())
    }

    fn toggle_fullscreen(&mut self) -> Result<(), FullscreenError> {
        if self.window.current_monitor().is_none() {
            return Err(FullscreenError::Unsupported);
        }
        if self.window.fullscreen().is_some() {
            self.window.set_fullscreen(None);
            tracing::debug!("left fullscreen");
        } else {
            self.window
                .set_fullscreen(Some(Fullscreen::Borderless(None)));
            tracing::debug!("entered fullscreen");
        }
        Ok(())
    }
}

struct GpuApp {
    map: MapData,
    style: SceneStyle,
    initial_size: PhysicalSize<u32>,
    graphics: Option<Graphics>,
    driver: Option<FrameDriver>,
}

impl GpuApp {
    fn new(map: MapData, style: SceneStyle, initial_size: PhysicalSize<u32>) -> Self {
        Self {
            map,
            style,
            initial_size,
            graphics: None,
            driver: None,
        }
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(driver), Some(graphics)) = (&mut self.driver, &mut self.graphics) else {
            return;
        };
        if driver.tick(graphics) == TickOutcome::Stopped {
            event_loop.exit();
        }
    }

    fn push(&mut self, event: InputEvent) {
        if let Some(driver) = &mut self.driver {
            driver.push(event);
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("gridshot")
            .with_inner_size(self.initial_size);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                return;
            }
        };

        // Without a surface nothing is rendered, but the app keeps running.
        let mut graphics = match Graphics::new(window, self.map.blocks.len()) {
            Ok(g) => g,
            Err(e) => {
                tracing::error!("failed to set up drawing surface: {e:#}");
                return;
            }
        };

        let session = Session::new(self.map.clone(), graphics.viewport());
        let driver = FrameDriver::start(session, SceneRenderer::new(self.style), &mut graphics);
        graphics.window.request_redraw();

        self.graphics = Some(graphics);
        self.driver = Some(driver);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(graphics) = &mut self.graphics {
            let response = graphics
                .egui_winit
                .on_window_event(&graphics.window, &event);
            if response.consumed && overlay_may_consume(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(driver) = &self.driver {
                    driver.control().stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.push(InputEvent::Resized {
                    width: new_size.width,
                    height: new_size.height,
                });
                self.tick(event_loop);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::F1 {
                    if let Some(graphics) = &mut self.graphics {
                        graphics.hud.visible = !graphics.hud.visible;
                    }
                } else {
                    self.push(InputEvent::KeyDown(map_key(code)));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.push(InputEvent::PointerMoved {
                    x: position.x,
                    y: position.y,
                });
            }
            WindowEvent::RedrawRequested => {
                self.tick(event_loop);
                if let Some(graphics) = &self.graphics {
                    graphics.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("gridshot-desktop starting");

    let map = match &cli.map {
        Some(path) => MapData::load(path)
            .with_context(|| format!("failed to load map {}", path.display()))?,
        None => MapData::builtin(),
    };
    let style = SceneStyle {
        tile_size: cli.tile_size,
        ..SceneStyle::default()
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(map, style, PhysicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    Ok(())
}
