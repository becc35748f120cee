//! Per-frame keyboard input resource.
//!
//! The engine does not poll any device. Whatever owns the window feeds key
//! transitions in with [`InputState::set_key`]; gameplay components read the
//! result through [`Context::input`](crate::components::Context::input). At
//! the end of every frame the engine calls [`InputState::rotate`], which
//! clears the edge flags so a press is "just pressed" for exactly one frame.

/// Keys the engine and the bundled components know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
    Enter,
    Escape,
    Ctrl,
    R,
}

impl Key {
    pub const COUNT: usize = 13;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Space,
        Key::Enter,
        Key::Escape,
        Key::Ctrl,
        Key::R,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state.
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,
}

/// Resource capturing the keyboard state relevant to gameplay.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: [BoolState; Key::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current level of `key`. Edges are derived from the
    /// previous level, so repeating the same level is harmless.
    pub fn set_key(&mut self, key: Key, down: bool) {
        let state = &mut self.keys[key.index()];
        if down && !state.active {
            state.just_pressed = true;
        } else if !down && state.active {
            state.just_released = true;
        }
        state.active = down;
    }

    pub fn state(&self, key: Key) -> BoolState {
        self.keys[key.index()]
    }

    /// Held down.
    pub fn down(&self, key: Key) -> bool {
        self.keys[key.index()].active
    }

    /// Not held down.
    pub fn up(&self, key: Key) -> bool {
        !self.down(key)
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.keys[key.index()].just_pressed
    }

    pub fn released(&self, key: Key) -> bool {
        self.keys[key.index()].just_released
    }

    /// -1, 0 or 1 from a pair of opposing keys.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        let mut value = 0.0;
        if self.down(negative) {
            value -= 1.0;
        }
        if self.down(positive) {
            value += 1.0;
        }
        value
    }

    /// End-of-frame buffer rotation: keep levels, drop edges.
    pub fn rotate(&mut self) {
        for state in &mut self.keys {
            state.just_pressed = false;
            state.just_released = false;
        }
    }
}
