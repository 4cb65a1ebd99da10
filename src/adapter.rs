use glam::{UVec2, Vec2};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Action, Inputs};
use crate::manipulator::CameraManipulator;

/// Normalized displacement per second while a motion key is held.
pub const KEY_MOTION_RATE: f32 = 50.0;

/// Wheel clicks are amplified so one notch gives a noticeable dolly.
pub const WHEEL_STEP: f32 = 3.0;

/// Pressed state of the motion keys (WASD plus Q/E for vertical pan).
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    pub fn dolly_delta(&self) -> f32 {
        Self::to_direction(self.forward, self.backward)
    }

    pub fn pan_delta(&self) -> Vec2 {
        Vec2::new(
            Self::to_direction(self.right, self.left),
            Self::to_direction(self.up, self.down),
        )
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }
}

/// Translates winit window events into camera manipulator calls.
///
/// Owns the pieces of input state winit reports incrementally: the modifier
/// keys, which buttons are down, the cursor position, and the held motion
/// keys. Feed every window event to `process_event` and call `tick_keys`
/// once per frame with the frame time.
pub struct WinitInput {
    inputs: Inputs,
    keys: KeyState,
    cursor: Vec2,
}

impl WinitInput {
    pub fn new() -> Self {
        Self {
            inputs: Inputs::default(),
            keys: KeyState::default(),
            cursor: Vec2::ZERO,
        }
    }

    /// Buttons and modifiers as last reported by winit.
    pub fn inputs(&self) -> Inputs {
        self.inputs
    }

    /// Handles one window event, returning the camera action it triggered.
    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        camera: &mut CameraManipulator,
    ) -> Option<Action> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.inputs.shift = state.shift_key();
                self.inputs.ctrl = state.control_key();
                self.inputs.alt = state.alt_key();
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state.is_pressed();
                match button {
                    MouseButton::Left => self.inputs.lmb = pressed,
                    MouseButton::Middle => self.inputs.mmb = pressed,
                    MouseButton::Right => self.inputs.rmb = pressed,
                    _ => {}
                }
                // Anchor the drag so the first move has no jump.
                if pressed {
                    camera.set_mouse_position(self.cursor);
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                camera.mouse_move(self.cursor, self.inputs)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 120.0,
                };
                if steps != 0.0 {
                    camera.wheel(steps * WHEEL_STEP, self.inputs);
                }
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_keyboard(event);
                None
            }
            WindowEvent::Resized(size) => {
                camera.set_window_size(UVec2::new(size.width, size.height));
                None
            }
            _ => None,
        }
    }

    /// Applies the held motion keys for a frame of `dt_secs` seconds.
    pub fn tick_keys(&mut self, dt_secs: f32, camera: &mut CameraManipulator) {
        if !self.keys.any() {
            return;
        }
        let factor = dt_secs * KEY_MOTION_RATE;

        let dolly = self.keys.dolly_delta();
        if dolly != 0.0 {
            camera.key_motion(Vec2::new(dolly * factor, 0.0), Action::Dolly);
        }
        let pan = self.keys.pan_delta();
        if pan != Vec2::ZERO {
            camera.key_motion(pan * factor, Action::Pan);
        }
    }

    fn process_keyboard(&mut self, event: &KeyEvent) {
        let pressed = event.state == ElementState::Pressed;
        if let PhysicalKey::Code(code) = event.physical_key {
            match code {
                KeyCode::KeyW | KeyCode::ArrowUp => self.keys.forward = pressed,
                KeyCode::KeyS | KeyCode::ArrowDown => self.keys.backward = pressed,
                KeyCode::KeyA | KeyCode::ArrowLeft => self.keys.left = pressed,
                KeyCode::KeyD | KeyCode::ArrowRight => self.keys.right = pressed,
                KeyCode::KeyE => self.keys.up = pressed,
                KeyCode::KeyQ => self.keys.down = pressed,
                _ => {}
            }
        }
    }
}

impl Default for WinitInput {
    fn default() -> Self {
        Self::new()
    }
}
