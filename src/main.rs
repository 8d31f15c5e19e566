//! Tetrasphere - drifting tetrahedra on a sphere
//!
//! Every tetrahedron has its four vertices gliding between random points of
//! a sphere. Hover one to highlight it, click it to add another.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use tetrasphere::{
    config::AppConfig,
    input::{InputAction, InputMapper},
    scene::{SceneBuilder, SceneLights},
    systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem},
};
use tetrasphere_core::{FrameObserver, FrameStats, TetraField};
use tetrasphere_input::PointerTracker;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    field: TetraField,
    lights: SceneLights,
    pointer: PointerTracker,
    /// Frame-rate observer, present while stats are shown
    stats: Option<Box<dyn FrameObserver>>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let field = SceneBuilder::from_config(&config.scene).build();
        let lights = SceneLights::from_config(&config.lighting);
        let stats = config.debug.show_stats.then(Self::new_stats);

        Self {
            config,
            window: None,
            render: None,
            simulation: SimulationSystem::new(),
            field,
            lights,
            pointer: PointerTracker::new(),
            stats,
        }
    }

    fn new_stats() -> Box<dyn FrameObserver> {
        Box::new(FrameStats::new())
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleStats => {
                self.stats = match self.stats.take() {
                    Some(_) => None,
                    None => Some(Self::new_stats()),
                };
                log::info!("Frame stats: {}", if self.stats.is_some() { "ON" } else { "OFF" });
            }
            InputAction::AddTetrahedron => {
                self.field.add();
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame_start = Instant::now();
        if let Some(stats) = &mut self.stats {
            stats.frame_begin(frame_start);
        }

        let pointer_ray = self.render.as_ref().and_then(|render| {
            let (width, height) = render.size();
            self.pointer
                .ndc(width, height)
                .map(|(x, y)| render.pick_ray(x, y))
        });

        self.simulation
            .update(&mut self.field, &mut self.lights, pointer_ray.as_ref());

        if let Some(render) = &mut self.render {
            match render.render_frame(&mut self.field, &self.lights.uniforms()) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("{}", RenderError::OutOfMemory);
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(stats) = &mut self.stats {
            stats.frame_end(Instant::now());
        }

        if let Some(window) = &self.window {
            let summary = self.stats.as_ref().and_then(|stats| stats.summary());
            window.update_title(self.field.len(), summary.as_deref());
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            &self.config.camera,
            self.config.window.vsync,
            self.config.scene.show_vertices,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer.process_cursor_left();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let click = self.pointer.process_mouse_button(button, state);
                let hovering = self.field.hovered().is_some();
                if let Some(action) = InputMapper::map_click(click, hovering) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Starting Tetrasphere");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
