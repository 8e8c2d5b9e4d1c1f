use crate::controller::{InputProcessor, InputState};
use crate::model::{Camera, PITCH_LIMIT};
use glam::Vec3;

/// Handles camera movement and orientation
pub struct CameraController {
    /// Distance covered per frame while a movement key is held. The step is
    /// a constant per frame, not scaled by elapsed time, so movement speed
    /// is frame-rate-dependent. Known limitation, kept deliberately.
    pub move_step: f32,
    pub mouse_sensitivity: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            move_step: 0.1,
            mouse_sensitivity: 0.002,
        }
    }

    /// Apply mouse look delta to camera
    pub fn apply_look(&self, camera: &mut Camera, dx: f32, dy: f32) {
        camera.yaw -= dx * self.mouse_sensitivity;
        camera.pitch = (camera.pitch - dy * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Integrate camera position from the currently pressed keys.
    ///
    /// Each held key contributes a full step along its own axis, without
    /// normalization, so diagonals move faster. Only x/z are touched.
    pub fn update_movement(
        &self,
        camera: &mut Camera,
        input: &InputState,
        processor: &InputProcessor,
    ) {
        let mut delta = Vec3::ZERO;
        if processor.is_moving_forward(input) {
            delta += camera.ground_forward();
        }
        if processor.is_moving_backward(input) {
            delta -= camera.ground_forward();
        }
        if processor.is_moving_left(input) {
            delta -= camera.ground_right();
        }
        if processor.is_moving_right(input) {
            delta += camera.ground_right();
        }
        camera.position += delta * self.move_step;
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::InputEvent;
    use std::f32::consts::FRAC_PI_2;

    fn press(input: &mut InputState, key: &str) {
        input.process_event(&InputEvent::KeyDown(key.to_string()));
    }

    #[test]
    fn pitch_stays_clamped() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        controller.apply_look(&mut cam, 0.0, -1_000_000.0);
        assert_eq!(cam.pitch, PITCH_LIMIT);
        controller.apply_look(&mut cam, 0.0, 1_000_000.0);
        assert_eq!(cam.pitch, -PITCH_LIMIT);
        for _ in 0..100 {
            controller.apply_look(&mut cam, 3.0, -40.0);
            assert!(cam.pitch >= -PITCH_LIMIT && cam.pitch <= PITCH_LIMIT);
        }
    }

    #[test]
    fn forward_at_yaw_zero_walks_into_negative_z() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        let mut input = InputState::new();
        press(&mut input, "w");

        let start = cam.position;
        controller.update_movement(&mut cam, &input, &InputProcessor::default());
        assert!((cam.position.z - (start.z - 0.1)).abs() < 1e-6);
        assert_eq!(cam.position.x, start.x);
        assert_eq!(cam.position.y, start.y);
    }

    #[test]
    fn forward_at_quarter_turn_walks_into_positive_x() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        cam.yaw = FRAC_PI_2;
        let mut input = InputState::new();
        press(&mut input, "w");

        let start = cam.position;
        controller.update_movement(&mut cam, &input, &InputProcessor::default());
        assert!((cam.position.x - (start.x + 0.1)).abs() < 1e-6);
        assert!((cam.position.z - start.z).abs() < 1e-6);
    }

    #[test]
    fn strafe_is_perpendicular_to_forward() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        let mut input = InputState::new();
        press(&mut input, "d");

        let start = cam.position;
        controller.update_movement(&mut cam, &input, &InputProcessor::default());
        assert!((cam.position.x - (start.x + 0.1)).abs() < 1e-6);
        assert!((cam.position.z - start.z).abs() < 1e-6);
    }

    #[test]
    fn movement_never_leaves_the_walking_plane() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        // Looking down must not turn forward motion into descent.
        controller.apply_look(&mut cam, 0.0, 700.0);
        let mut input = InputState::new();
        press(&mut input, "w");

        for _ in 0..50 {
            controller.update_movement(&mut cam, &input, &InputProcessor::default());
        }
        assert!((cam.position.y - 1.6).abs() < 1e-6);
    }

    #[test]
    fn holding_forward_for_n_frames_covers_n_steps() {
        let controller = CameraController::new();
        let mut cam = Camera::new(800, 600);
        let mut input = InputState::new();
        press(&mut input, "w");

        let frames = 10;
        for _ in 0..frames {
            controller.update_movement(&mut cam, &input, &InputProcessor::default());
        }
        assert!((cam.position.z - (5.0 - frames as f32 * 0.1)).abs() < 1e-5);
        assert_eq!(cam.position.x, 0.0);
        assert_eq!(cam.position.y, 1.6);
    }
}
