//! fileorbit - directory entries orbiting on a sphere
//!
//! Drag with the left mouse button to turn the camera; see the input mapper
//! for the keyboard bindings.

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use fileorbit::cli::Cli;
use fileorbit::config::AppConfig;
use fileorbit::input::{InputAction, InputMapper};
use fileorbit::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use fileorbit_core::{DisplayFlags, FsLister, Scene, SceneCommand};
use fileorbit_input::ArcballController;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    scene: Scene,
    lister: FsLister,
    controller: ArcballController,
    simulation: SimulationSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let lister = config.scene.lister();
        let mut scene = config.scene.build_scene();

        if let Err(e) = scene.reload(&lister) {
            log::warn!("Failed to list {}: {}", scene.current_dir().display(), e);
        }

        let controller = ArcballController::new(config.window.width, config.window.height);
        let simulation = SimulationSystem::new(&config.simulation);

        Self {
            config,
            window: None,
            render: None,
            scene,
            lister,
            controller,
            simulation,
        }
    }

    fn handle_command(&mut self, command: SceneCommand) {
        if let Err(e) = self.scene.apply(command, &self.lister) {
            log::warn!("{:?} failed: {}", command, e);
        }
    }

    fn update_title(&mut self) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let selected = if self.scene.display().contains(DisplayFlags::LABELS) {
            self.scene.selected_entry().map(|e| e.name.as_str())
        } else {
            None
        };
        window.update_title(self.scene.current_dir(), selected);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.simulation.update(&mut self.scene, &mut self.controller);
        self.update_title();

        if let Some(render) = self.render.as_mut() {
            match render.render_frame(&self.scene) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
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

        let render = match RenderSystem::new(window.window().clone(), &self.config) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render.size();
        self.controller.resize(width, height);
        log::info!("Showing {} entries of {}", self.scene.len(), self.scene.current_dir().display());

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
                self.controller.resize(size.width, size.height);
            }

            WindowEvent::Focused(false) => {
                self.controller.release();
            }

            // Orbits do not jump ahead by the time spent hidden
            WindowEvent::Occluded(false) => {
                self.simulation.reset_clock();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match InputMapper::map_keyboard(key, event.state) {
                    Some(InputAction::Exit) => event_loop.exit(),
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    Some(InputAction::Scene(command)) => self.handle_command(command),
                    None => {}
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.controller.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let loaded = AppConfig::load_from(&cli.config_dir);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };
    cli.apply(&mut config);

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Err(e) = loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting fileorbit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
