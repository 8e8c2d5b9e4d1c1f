use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Window;
use wgpu::{Device, Queue, Surface, TextureView};

use crate::controller::{CameraController, InputProcessor, InputState};
use crate::model::Camera;
use crate::view::render::{self, MvpUniform, RenderState};

/// Per-frame state and update logic for the browser loop.
pub struct FrameLoopContext {
    pub cam: Rc<RefCell<Camera>>,
    pub mvp_buf: wgpu::Buffer,
    pub depth_view_cell: Rc<RefCell<TextureView>>,
    pub input_state: Rc<RefCell<InputState>>,
    pub camera_controller: CameraController,
    pub input_processor: InputProcessor,
}

impl FrameLoopContext {
    /// Integrate input into camera state and refresh the MVP uniform.
    /// Runs to completion before the frame is drawn; event handlers never
    /// interleave with it on the single-threaded browser runtime.
    pub fn update(
        &mut self,
        device: &Device,
        queue: &Queue,
        window: &Window,
        surface: &Surface,
        render_state: &mut RenderState,
    ) {
        let (dx, dy) = self.input_state.borrow_mut().consume_look();
        self.camera_controller
            .apply_look(&mut self.cam.borrow_mut(), dx, dy);

        {
            let input = self.input_state.borrow();
            self.camera_controller.update_movement(
                &mut self.cam.borrow_mut(),
                &input,
                &self.input_processor,
            );
        }

        self.handle_resize(window, device, surface, render_state);

        let mvp = MvpUniform {
            view_proj: self.cam.borrow().view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(&self.mvp_buf, 0, bytemuck::bytes_of(&mvp));
    }

    fn handle_resize(
        &self,
        window: &Window,
        device: &Device,
        surface: &Surface,
        render_state: &mut RenderState,
    ) {
        if let (Ok(w), Ok(h)) = (window.inner_width(), window.inner_height()) {
            let nw = w.as_f64().unwrap_or(800.0) as u32;
            let nh = h.as_f64().unwrap_or(600.0) as u32;
            if (nw != render_state.width || nh != render_state.height) && nw > 0 && nh > 0 {
                tracing::debug!("viewport resized to {nw}x{nh}");
                self.cam.borrow_mut().set_aspect(nw, nh);
                render_state.width = nw;
                render_state.height = nh;
                surface.configure(device, &render_state.surface_config());

                let (_, depth_view) = render::create_depth_texture(device, nw, nh);
                *self.depth_view_cell.borrow_mut() = depth_view;
            }
        }
    }
}
