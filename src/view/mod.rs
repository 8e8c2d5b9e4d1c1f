// VIEW: Rendering and graphics
pub mod gpu_init;
pub mod render;

pub use gpu_init::GpuContext;
pub use render::{MvpResources, MvpUniform, RenderState, DEPTH_FORMAT, SKY_COLOR};
