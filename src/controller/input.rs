/// Platform-agnostic input handling system
use std::collections::HashSet;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    // Keyboard events
    KeyDown(String),
    KeyUp(String),

    // Mouse events
    MouseMove { dx: f32, dy: f32 },

    // Window events
    FocusLost,
    VisibilityChanged { visible: bool },
    PointerLockChanged { locked: bool },
}

/// Current input state. Event handlers write it, the frame loop reads it;
/// only the latest state matters, so there is no queuing beyond the
/// accumulated look delta that the frame loop drains once per iteration.
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    pub look_delta: (f32, f32),
    pub pointer_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            look_delta: (0.0, 0.0),
            pointer_locked: false,
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                // Releasing a key that was never pressed is a no-op.
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::MouseMove { dx, dy } => {
                if self.pointer_locked {
                    self.look_delta.0 += dx;
                    self.look_delta.1 += dy;
                }
            }
            InputEvent::FocusLost => {
                self.clear_keys();
            }
            InputEvent::VisibilityChanged { visible: _ } => {
                self.clear_keys();
            }
            InputEvent::PointerLockChanged { locked } => {
                self.pointer_locked = *locked;
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// Clear all keys, e.g. on focus loss so nothing stays stuck down.
    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    /// Drain the accumulated look delta for this frame.
    pub fn consume_look(&mut self) -> (f32, f32) {
        let result = self.look_delta;
        self.look_delta = (0.0, 0.0);
        result
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Key mapping configuration
#[derive(Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub escape: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            escape: "Escape".to_string(),
        }
    }
}

/// High-level input queries on top of the raw key state
#[derive(Clone)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn is_moving_forward(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.forward) || input.is_key_pressed("ArrowUp")
    }

    pub fn is_moving_backward(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.backward) || input.is_key_pressed("ArrowDown")
    }

    pub fn is_moving_left(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.left) || input.is_key_pressed("ArrowLeft")
    }

    pub fn is_moving_right(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.right) || input.is_key_pressed("ArrowRight")
    }

    pub fn is_escape(&self, key: &str) -> bool {
        key == self.bindings.escape
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_up_without_key_down_is_harmless() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyUp("w".to_string()));
        assert!(!input.is_key_pressed("w"));
    }

    #[test]
    fn key_down_then_up_round_trip() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("w".to_string()));
        assert!(input.is_key_pressed("w"));
        input.process_event(&InputEvent::KeyUp("w".to_string()));
        assert!(!input.is_key_pressed("w"));
    }

    #[test]
    fn mouse_deltas_ignored_without_pointer_lock() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::MouseMove { dx: 5.0, dy: -3.0 });
        assert_eq!(input.consume_look(), (0.0, 0.0));
    }

    #[test]
    fn mouse_deltas_accumulate_while_locked() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::PointerLockChanged { locked: true });
        input.process_event(&InputEvent::MouseMove { dx: 5.0, dy: -3.0 });
        input.process_event(&InputEvent::MouseMove { dx: 1.0, dy: 2.0 });
        assert_eq!(input.consume_look(), (6.0, -1.0));
        // consume_look drains
        assert_eq!(input.consume_look(), (0.0, 0.0));
    }

    #[test]
    fn focus_loss_clears_pressed_keys() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("w".to_string()));
        input.process_event(&InputEvent::KeyDown("d".to_string()));
        input.process_event(&InputEvent::FocusLost);
        assert!(input.pressed_keys.is_empty());
    }

    #[test]
    fn arrow_keys_alias_wasd() {
        let processor = InputProcessor::default();
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown("ArrowUp".to_string()));
        assert!(processor.is_moving_forward(&input));
        assert!(!processor.is_moving_backward(&input));
    }
}
