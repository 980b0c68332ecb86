pub mod keybinds;

pub use keybinds::{Action, Keybinds};

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use glam::Vec2;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Raw hardware state for a single frame.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    /// Cursor position in logical frame-buffer pixels.
    pub mouse_pos: [f32; 2],
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,

    /// Printable characters typed this frame, for edit boxes.
    pub chars_typed: Vec<char>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget this frame's edges; held state carries over.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.chars_typed.clear();
    }

    // ── Event feeding ────────────────────────────────────────────────────────

    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
    }

    pub fn set_mouse_pos(&mut self, pos: Vec2) {
        self.mouse_pos = pos.to_array();
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
    pub fn is_mouse_released(&self, button: MouseButton) -> bool { self.mouse_released.contains(&button) }

    pub fn mouse(&self) -> Vec2 {
        Vec2::from_array(self.mouse_pos)
    }
}

/// Maps game actions to the keys that trigger them.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: KeyCode) {
        self.bindings.entry(action).or_default().push(key);
    }

    pub fn unbind(&mut self, action: A) {
        self.bindings.remove(&action);
    }

    pub fn keys(&self, action: A) -> &[KeyCode] {
        self.bindings.get(&action).map_or(&[], Vec::as_slice)
    }

    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|&k| input.is_key_pressed(k))
    }

    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|&k| input.is_key_held(k))
    }

    /// True if any bound key was released this frame.
    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.keys(action).iter().any(|&k| input.is_key_released(k))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self {
        Self::new()
    }
}
