// Re-export all public modules so they can be used from main.rs
pub mod error;
pub mod logging;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

pub use error::RenderError;

#[cfg(target_arch = "wasm32")]
pub mod wasm_app {
    use crate::controller::{
        CameraController, FrameLoopContext, InputEvent, InputProcessor, InputState,
    };
    use crate::model::{floor_mesh, Camera};
    use crate::view::render::{self, MvpUniform, RenderState};
    use crate::view::GpuContext;
    use crate::logging;

    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{Document, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Window};

    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        logging::init();
        let (window, document, canvas) = init_canvas()?;
        setup_app(&window, &document, &canvas).await
    }

    /// One-time startup: GPU context, shader, floor geometry, input wiring
    /// and the self-rescheduling frame loop.
    async fn setup_app(
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), JsValue> {
        let width = canvas.width();
        let height = canvas.height();

        let gpu = GpuContext::new(canvas, width, height)
            .await
            .map_err(|e| js_error(e.to_string()))?;
        tracing::info!("gpu context ready, {width}x{height} {:?}", gpu.format);

        let cam = Rc::new(RefCell::new(Camera::new(width, height)));

        let mvp = render::create_mvp_resources(gpu.device.as_ref());
        let initial = MvpUniform {
            view_proj: cam.borrow().view_proj().to_cols_array_2d(),
        };
        gpu.queue
            .write_buffer(&mvp.buffer, 0, bytemuck::bytes_of(&initial));

        let shader = render::create_floor_shader(gpu.device.as_ref())
            .await
            .map_err(|e| js_error(e.to_string()))?;
        let pipeline =
            render::create_floor_pipeline(gpu.device.as_ref(), gpu.format, &shader, &mvp.bind_group_layout);
        let floor = floor_mesh().upload(gpu.device.as_ref());

        let (_, depth_view) = render::create_depth_texture(gpu.device.as_ref(), width, height);
        let depth_view_cell = Rc::new(RefCell::new(depth_view));

        let input_state = Rc::new(RefCell::new(InputState::new()));
        setup_input_listeners(document, window, canvas, input_state.clone())?;

        let mut render_state = RenderState {
            format: gpu.format,
            alpha_mode: gpu.config.alpha_mode,
            width,
            height,
            pipeline,
            floor,
        };

        let mut frame_ctx = FrameLoopContext {
            cam,
            mvp_buf: mvp.buffer,
            depth_view_cell,
            input_state,
            camera_controller: CameraController::new(),
            input_processor: InputProcessor::default(),
        };
        let mvp_bind_group = mvp.bind_group;

        // Continuous redraw using requestAnimationFrame
        let f = RcCellCallback::new(window.clone(), {
            let window_for_loop = window.clone();

            move || {
                frame_ctx.update(
                    gpu.device.as_ref(),
                    gpu.queue.as_ref(),
                    &window_for_loop,
                    &gpu.surface,
                    &mut render_state,
                );

                let dv = frame_ctx.depth_view_cell.borrow();
                match render_state.draw_frame(
                    gpu.device.as_ref(),
                    gpu.queue.as_ref(),
                    &gpu.surface,
                    &dv,
                    &mvp_bind_group,
                ) {
                    Ok(()) => true,
                    // A stale surface is reconfigured by the next frame's
                    // resize handling; keep the loop running.
                    Err(e) if e.is_recoverable() => {
                        tracing::warn!("skipping frame: {e}");
                        true
                    }
                    Err(e) => {
                        tracing::error!("stopping frame loop: {e}");
                        false
                    }
                }
            }
        });
        f.start();

        Ok(())
    }

    /// Wire DOM input events into the shared input state.
    fn setup_input_listeners(
        document: &Document,
        window: &Window,
        canvas: &HtmlCanvasElement,
        input_state: Rc<RefCell<InputState>>,
    ) -> Result<(), JsValue> {
        let input_processor = InputProcessor::default();

        // Keyboard down
        {
            let input_state = input_state.clone();
            let document_for_exit = document.clone();
            let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let key = e.key();

                if input_processor.is_escape(&key) {
                    document_for_exit.exit_pointer_lock();
                }

                // Keep movement keys from scrolling the page
                if matches!(
                    key.as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "w" | "a" | "s" | "d"
                        | "W" | "A" | "S" | "D"
                ) {
                    e.prevent_default();
                }

                input_state
                    .borrow_mut()
                    .process_event(&InputEvent::KeyDown(key));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
            keydown.forget();
        }

        // Keyboard up
        {
            let input_state = input_state.clone();
            let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                input_state
                    .borrow_mut()
                    .process_event(&InputEvent::KeyUp(e.key()));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
            keyup.forget();
        }

        // Focus loss - clear all keys
        {
            let input_state = input_state.clone();
            let blur = Closure::wrap(Box::new(move |_e: Event| {
                input_state.borrow_mut().process_event(&InputEvent::FocusLost);
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
            blur.forget();
        }

        // Visibility change - clear all keys
        {
            let input_state = input_state.clone();
            let visibility = Closure::wrap(Box::new(move |_e: Event| {
                input_state
                    .borrow_mut()
                    .process_event(&InputEvent::VisibilityChanged { visible: false });
            }) as Box<dyn FnMut(Event)>);
            document
                .add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
            visibility.forget();
        }

        // Pointer lock change
        {
            let input_state = input_state.clone();
            let doc_pl = document.clone();
            let plc = Closure::wrap(Box::new(move |_e: Event| {
                let locked = doc_pl.pointer_lock_element().is_some();
                input_state
                    .borrow_mut()
                    .process_event(&InputEvent::PointerLockChanged { locked });
            }) as Box<dyn FnMut(Event)>);
            document
                .add_event_listener_with_callback("pointerlockchange", plc.as_ref().unchecked_ref())?;
            plc.forget();
        }

        // Canvas click to enter pointer lock
        {
            let canvas_click = canvas.clone();
            let click = Closure::wrap(Box::new(move |_e: MouseEvent| {
                if let Ok(html_el) = canvas_click.clone().dyn_into::<HtmlElement>() {
                    html_el.request_pointer_lock();
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
            click.forget();
        }

        // Mouse move - only accumulates while pointer locked
        {
            let input_state = input_state.clone();
            let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
                input_state.borrow_mut().process_event(&InputEvent::MouseMove {
                    dx: e.movement_x() as f32,
                    dy: e.movement_y() as f32,
                });
            }) as Box<dyn FnMut(MouseEvent)>);
            document.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
            mm.forget();
        }

        Ok(())
    }

    /// Create a canvas sized to the full viewport.
    fn init_canvas() -> Result<(Window, Document, HtmlCanvasElement), JsValue> {
        let window = web_sys::window().ok_or(js_error("no global `window`"))?;
        let document = window.document().ok_or(js_error("no document on window"))?;
        let body = document.body().ok_or(js_error("no body on document"))?;
        let canvas_el = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error("failed to create canvas"))?;

        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(800.0) as u32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(600.0) as u32;
        canvas_el.set_width(width);
        canvas_el.set_height(height);
        body.append_child(&canvas_el)?;
        Ok((window, document, canvas_el))
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }

    /// requestAnimationFrame driver. The callback returns whether the loop
    /// should continue; a false return stops rescheduling for good.
    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut() -> bool>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() -> bool + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                if !inner.borrow_mut().as_mut()() {
                    return;
                }

                // Recursively schedule next frame
                let cb_ref = callback_clone.borrow();
                window
                    .request_animation_frame(cb_ref.as_ref().unwrap().as_ref().unchecked_ref())
                    .expect("RAF failed");
            }) as Box<dyn FnMut()>));

            self.window
                .request_animation_frame(
                    callback.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                )
                .expect("RAF start failed");

            // Leak the closure to keep it alive
            std::mem::forget(callback);
        }
    }
}
