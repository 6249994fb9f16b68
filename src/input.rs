//! Keyboard input
//!
//! Tracks held keys and maps key presses to game commands. Key codes are the
//! DOM `KeyboardEvent.code` strings (`"Space"`, `"Escape"`, ...).

use std::collections::HashSet;

use crate::sim::{Action, GamePhase};

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    Action(Action),
    ToggleAutopilot,
}

/// Held-key set plus key -> command mapping
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    held: HashSet<String>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Record a key press and map it to a command for the current phase.
    ///
    /// Auto-repeat presses of a held key still map to a jump; the jump itself
    /// is ignored unless grounded.
    pub fn key_down(&mut self, code: &str, phase: GamePhase) -> Option<Command> {
        self.held.insert(code.to_string());
        match (code, phase) {
            ("Space", GamePhase::Playing) => Some(Command::Jump),
            ("Escape", GamePhase::Playing) => Some(Command::Action(Action::Pause)),
            ("Enter", GamePhase::Menu) => Some(Command::Action(Action::StartGame)),
            ("Enter", GamePhase::GameOver | GamePhase::Discount) => {
                Some(Command::Action(Action::Restart))
            }
            ("Escape", GamePhase::Discount) => Some(Command::Action(Action::CloseDiscount)),
            ("KeyI", _) => Some(Command::ToggleAutopilot),
            _ => None,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Forget everything held (window blur)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Whether the browser's default action for this key should be suppressed
/// (space would otherwise scroll the page)
pub fn suppress_default(code: &str, phase: GamePhase) -> bool {
    code == "Space" && phase == GamePhase::Playing
}
