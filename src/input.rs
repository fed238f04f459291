//! Keyboard input latch and rebindable key bindings
//!
//! The latch is a map from key identifier to a "currently pressed" bit,
//! updated by key-down/key-up events and read once per frame. Bindings
//! persist through the local store under the `Keybindings` key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical actions the actor responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
}

/// Action to key identifier bindings
///
/// Key identifiers are the host's key names (`"a"`, `"d"`, `" "` for
/// Space), matching what the latch receives in key events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub jump: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "a".to_string(),
            right: "d".to_string(),
            jump: " ".to_string(),
        }
    }
}

impl KeyBindings {
    /// The action a key currently drives, if any
    pub fn action_for(&self, key: &str) -> Option<Action> {
        if key == self.left {
            Some(Action::Left)
        } else if key == self.right {
            Some(Action::Right)
        } else if key == self.jump {
            Some(Action::Jump)
        } else {
            None
        }
    }

    /// Key bound to `action`
    pub fn key_for(&self, action: Action) -> &str {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Jump => &self.jump,
        }
    }

    pub fn set(&mut self, action: Action, key: impl Into<String>) {
        let key = key.into();
        match action {
            Action::Left => self.left = key,
            Action::Right => self.right = key,
            Action::Jump => self.jump = key,
        }
    }
}

/// Per-key pressed state, updated by key events
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    down: HashMap<String, bool>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.down.insert(key.to_string(), true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.down.insert(key.to_string(), false);
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.down.get(key).copied().unwrap_or(false)
    }

    /// Drop all pressed state (focus loss, level teardown)
    pub fn release_all(&mut self) {
        self.down.clear();
    }

    /// Sample the latch into a tick input using the current bindings
    pub fn sample(&self, bindings: &KeyBindings) -> TickInput {
        let mut axis = 0.0;
        if self.is_down(&bindings.left) {
            axis -= 1.0;
        }
        if self.is_down(&bindings.right) {
            axis += 1.0;
        }
        TickInput {
            axis,
            jump: self.is_down(&bindings.jump),
        }
    }
}

/// "Press the next key" rebinding flow
///
/// `begin` arms the capture; the next key-down fed to `capture` becomes
/// the new binding for that action instead of reaching the latch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rebinder {
    pending: Option<Action>,
}

impl Rebinder {
    pub fn begin(&mut self, action: Action) {
        self.pending = Some(action);
    }

    pub fn is_capturing(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed a key-down; returns the action that got rebound, if one was pending
    pub fn capture(&mut self, bindings: &mut KeyBindings, key: &str) -> Option<Action> {
        let action = self.pending.take()?;
        bindings.set(action, key);
        Some(action)
    }
}
