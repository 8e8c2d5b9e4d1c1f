use glam::{Mat4, Vec3};

/// Vertical look limit in radians. Keeps the camera from flipping over.
pub const PITCH_LIMIT: f32 = 1.5;

/// First-person camera state: position plus yaw/pitch look angles, and the
/// projection parameters needed to build the per-frame transform.
///
/// Conventions: right-handed, +Y up, yaw 0 faces -Z. Pitch is kept inside
/// [-PITCH_LIMIT, PITCH_LIMIT] by the camera controller.
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 5.0),
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 1.2,
            aspect: width as f32 / height as f32,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }

    /// Look direction derived from yaw/pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Movement basis on the ground plane: ignores pitch so walking never
    /// pushes the camera off y.
    pub fn ground_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn ground_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Perspective projection, wgpu clip-space convention (depth 0..1:
    /// a point at -z_near maps to NDC depth 0, -z_far to 1).
    ///
    /// Degenerate parameters (z_near == z_far, aspect == 0) are the
    /// caller's responsibility and not validated here.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    /// View matrix, i.e. the inverse of the camera's world transform.
    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Combined transform uploaded to the shader, composed by matrix
    /// multiplication (projection * view).
    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_zero_faces_negative_z() {
        let cam = Camera::new(800, 600);
        let fwd = cam.forward();
        assert!(fwd.z < -0.999);
        assert!(fwd.x.abs() < 1e-6);
        assert!(fwd.y.abs() < 1e-6);
    }

    #[test]
    fn projection_depth_range() {
        let cam = Camera::new(600, 600);
        let proj = cam.projection();
        // wgpu convention: near plane at depth 0, far plane at depth 1
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -cam.z_near));
        assert!(near.z.abs() < 1e-4, "near plane depth was {}", near.z);
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -cam.z_far));
        assert!((far.z - 1.0).abs() < 1e-3, "far plane depth was {}", far.z);
    }

    #[test]
    fn view_proj_centers_point_straight_ahead() {
        let cam = Camera::new(800, 600);
        let vp = cam.view_proj();
        // A point 10 units along the look direction projects to NDC center.
        let target = cam.position + cam.forward() * 10.0;
        let ndc = vp.project_point3(target);
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn view_proj_is_a_true_product() {
        // Composition must be projection * view, not any element-wise merge:
        // applying view then projection by hand has to agree.
        let mut cam = Camera::new(800, 600);
        cam.yaw = 0.7;
        cam.pitch = -0.3;
        let p = Vec3::new(3.0, 0.0, -8.0);
        let staged = cam
            .projection()
            .project_point3(cam.view().transform_point3(p));
        let combined = cam.view_proj().project_point3(p);
        assert!((staged - combined).length() < 1e-4);
    }

    #[test]
    fn aspect_tracks_resize() {
        let mut cam = Camera::new(800, 600);
        cam.set_aspect(1920, 1080);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
