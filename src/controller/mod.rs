// CONTROLLER: input tracking and the per-frame update
pub mod camera_controller;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod frame_loop;

pub use camera_controller::CameraController;
pub use input::{InputEvent, InputProcessor, InputState, KeyBindings};
#[cfg(target_arch = "wasm32")]
pub use frame_loop::FrameLoopContext;
