use std::sync::Arc;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

// Import from the library crate
use floorwalk::{controller, logging, model, view, RenderError};

use controller::{CameraController, InputEvent, InputProcessor, InputState};
use model::{floor_mesh, Camera};
use view::render::{self, MvpUniform, RenderState};
use view::GpuContext;

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    size: winit::dpi::PhysicalSize<u32>,
    window: Arc<Window>,

    // Rendering state
    render_state: RenderState,
    depth_view: wgpu::TextureView,
    mvp_buffer: wgpu::Buffer,
    mvp_bind_group: wgpu::BindGroup,

    // Game state
    camera: Camera,
    input_state: InputState,
    camera_controller: CameraController,
    input_processor: InputProcessor,

    // Frame timing (logging only; movement is a fixed step per frame)
    last_frame_time: std::time::Instant,
    frame_count: u32,
    fps_timer: f32,
}

/// Map winit key codes onto the browser-style key names the input tracker
/// uses, so both platforms share one binding table.
fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::KeyW => Some("w"),
        KeyCode::KeyA => Some("a"),
        KeyCode::KeyS => Some("s"),
        KeyCode::KeyD => Some("d"),
        KeyCode::ArrowUp => Some("ArrowUp"),
        KeyCode::ArrowDown => Some("ArrowDown"),
        KeyCode::ArrowLeft => Some("ArrowLeft"),
        KeyCode::ArrowRight => Some("ArrowRight"),
        KeyCode::Escape => Some("Escape"),
        _ => None,
    }
}

impl App {
    async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let gpu = GpuContext::new_native(window.clone(), size.width, size.height).await?;
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        tracing::info!("gpu context ready, {}x{} {:?}", size.width, size.height, gpu.format);

        let camera = Camera::new(size.width, size.height);

        let mvp = render::create_mvp_resources(&device);
        let initial = MvpUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(&mvp.buffer, 0, bytemuck::bytes_of(&initial));

        let shader = render::create_floor_shader(&device).await?;
        let pipeline =
            render::create_floor_pipeline(&device, gpu.format, &shader, &mvp.bind_group_layout);
        let floor = floor_mesh().upload(&device);

        let (_, depth_view) = render::create_depth_texture(&device, size.width, size.height);

        let render_state = RenderState {
            format: gpu.format,
            alpha_mode: gpu.config.alpha_mode,
            width: size.width,
            height: size.height,
            pipeline,
            floor,
        };

        Ok(Self {
            surface: gpu.surface,
            device,
            queue,
            size,
            window,
            render_state,
            depth_view,
            mvp_buffer: mvp.buffer,
            mvp_bind_group: mvp.bind_group,
            camera,
            input_state: InputState::new(),
            camera_controller: CameraController::new(),
            input_processor: InputProcessor::default(),
            last_frame_time: std::time::Instant::now(),
            frame_count: 0,
            fps_timer: 0.0,
        })
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    if *code == KeyCode::Escape && *state == ElementState::Pressed {
                        self.release_pointer();
                        return true;
                    }
                    if let Some(key) = key_name(*code) {
                        let ev = match state {
                            ElementState::Pressed => InputEvent::KeyDown(key.to_string()),
                            ElementState::Released => InputEvent::KeyUp(key.to_string()),
                        };
                        self.input_state.process_event(&ev);
                    }
                }
                true
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.grab_pointer();
                true
            }
            WindowEvent::Focused(false) => {
                self.input_state.process_event(&InputEvent::FocusLost);
                true
            }
            _ => false,
        }
    }

    /// Enter mouse-look: the desktop equivalent of browser pointer lock.
    fn grab_pointer(&mut self) {
        let _ = self.window.set_cursor_visible(false);
        let _ = self
            .window
            .set_cursor_grab(winit::window::CursorGrabMode::Locked);
        self.input_state
            .process_event(&InputEvent::PointerLockChanged { locked: true });
    }

    fn release_pointer(&mut self) {
        let _ = self.window.set_cursor_visible(true);
        let _ = self
            .window
            .set_cursor_grab(winit::window::CursorGrabMode::None);
        self.input_state
            .process_event(&InputEvent::PointerLockChanged { locked: false });
    }

    fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.input_state.process_event(&InputEvent::MouseMove {
            dx: dx as f32,
            dy: dy as f32,
        });
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.render_state.width = new_size.width;
            self.render_state.height = new_size.height;
            self.surface
                .configure(&self.device, &self.render_state.surface_config());

            let (_, depth_view) =
                render::create_depth_texture(&self.device, new_size.width, new_size.height);
            self.depth_view = depth_view;
            self.camera.set_aspect(new_size.width, new_size.height);
        }
    }

    fn update(&mut self, dt: f32) {
        // FPS accounting, logged once per second
        self.frame_count += 1;
        self.fps_timer += dt;
        if self.fps_timer >= 1.0 {
            tracing::debug!("fps: {:.0}", self.frame_count as f32 / self.fps_timer);
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }

        let (dx, dy) = self.input_state.consume_look();
        self.camera_controller.apply_look(&mut self.camera, dx, dy);
        self.camera_controller
            .update_movement(&mut self.camera, &self.input_state, &self.input_processor);

        let mvp = MvpUniform {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.mvp_buffer, 0, bytemuck::bytes_of(&mvp));
    }

    fn render(&mut self) -> Result<(), RenderError> {
        self.render_state.draw_frame(
            &self.device,
            &self.queue,
            &self.surface,
            &self.depth_view,
            &self.mvp_bind_group,
        )
    }
}

fn main() {
    logging::init();

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let window_attributes = Window::default_attributes()
        .with_title("floorwalk")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = event_loop
        .create_window(window_attributes)
        .expect("failed to create window");
    let window = Arc::new(window);

    let mut app = match pollster::block_on(App::new(window.clone())) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            let now = std::time::Instant::now();
                            let dt = (now - app.last_frame_time).as_secs_f32();
                            app.last_frame_time = now;

                            app.update(dt);

                            match app.render() {
                                Ok(()) => {}
                                Err(e) if e.is_recoverable() => app.resize(app.size),
                                Err(e) => {
                                    tracing::error!("stopping frame loop: {e}");
                                    elwt.exit();
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent {
                event: winit::event::DeviceEvent::MouseMotion { delta },
                ..
            } => {
                app.handle_mouse_motion(delta.0, delta.1);
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        })
        .expect("event loop error");
}
