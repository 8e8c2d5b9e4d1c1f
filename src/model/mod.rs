// MODEL: camera state and geometry
pub mod camera;
pub mod floor;

pub use camera::{Camera, PITCH_LIMIT};
pub use floor::{floor_mesh, Mesh, MeshBuffer, Vertex, FLOOR_EXTENT};
