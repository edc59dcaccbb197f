use crate::{core::Reveal, input::InputState, log, renderer::PanelRenderer, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    raw_window_handle::HasWindowHandle,
    window::{Window, WindowAttributes, WindowId},
};

pub struct App {
    window: Option<Window>,
    renderer: Option<PanelRenderer>,
    reveal: Reveal,
    input_state: InputState,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: None,
            renderer: None,
            reveal: Reveal::new(),
            input_state: InputState::new(),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new();
        event_loop.run_app(&mut app)?;
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
        if self.window.is_none() {
            let window_attributes = WindowAttributes::default()
                .with_title("Scroll Reveal")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            match event_loop.create_window(window_attributes) {
                Ok(window) => {
                    log!("Window created successfully");

                    match window.window_handle() {
                        Ok(handle) => {
                            let size = window.inner_size();
                            match PanelRenderer::new(handle.as_raw(), size.width, size.height) {
                                Ok(mut renderer) => {
                                    if let Err(e) =
                                        renderer.initialize_panels(self.reveal.panels())
                                    {
                                        log!("Failed to initialize panels: {}", e);
                                        event_loop.exit();
                                    } else {
                                        self.renderer = Some(renderer);
                                        self.reveal.start();
                                        log!("Renderer initialized successfully");
                                        window.request_redraw();
                                    }
                                }
                                Err(e) => {
                                    log!("Failed to create renderer: {}", e);
                                    event_loop.exit();
                                }
                            }
                        }
                        Err(e) => {
                            log!("Failed to get window handle: {}", e);
                            event_loop.exit();
                        }
                    }

                    self.window = Some(window);
                }
                Err(e) => {
                    log!("Failed to create window: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log!("Window close requested");
                self.reveal.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(renderer) = &mut self.renderer {
                        renderer.update_drawable_size(size.width, size.height);
                    }
                    log!("Window resized to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log!("Escape pressed, exiting");
                self.reveal.stop();
                event_loop.exit();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = self.input_state.wheel_delta(delta);
                self.reveal
                    .adjust_scroll(pixels * self.input_state.wheel_sensitivity());
            }
            WindowEvent::Touch(touch) => {
                let y = touch.location.y as f32;
                match touch.phase {
                    TouchPhase::Started => self.input_state.touch_started(touch.id, y),
                    TouchPhase::Moved => {
                        if let Some(delta) = self.input_state.touch_moved(touch.id, y) {
                            self.reveal
                                .adjust_scroll(delta * self.input_state.touch_sensitivity());
                        }
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        self.input_state.touch_ended(touch.id);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.reveal.tick();

                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.render(self.reveal.panels()) {
                        warn!("Render error: {}", e);
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
