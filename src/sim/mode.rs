//! Top-level game modes and the transition table
//!
//! All mode changes flow through [`transition`], which maps
//! `(current mode, event)` to a new mode plus an optional action for the
//! controller to execute. An event with no matching row is a no-op.

use serde::{Deserialize, Serialize};

/// Current top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Title menu (initial)
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay suspended; elapsed time does not advance
    Paused,
    /// All bricks destroyed, waiting to advance
    LevelClear,
    /// Run ended
    GameOver,
    /// Help screen
    Help,
    /// High score + recent scores screen
    Scoreboard,
    /// Music on/off sub-menu
    MusicMenu,
}

/// A trigger for a mode change: a discrete input, or a condition raised by
/// the simulation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Back/exit (Esc)
    Cancel,
    /// Advance/restart (Space)
    Confirm,
    /// Pause toggle (P)
    TogglePause,
    /// Restart the current level (R)
    RestartLevel,
    /// Menu digit selection
    Digit(u8),
    /// Raised by the tick when the last brick is destroyed
    BricksDepleted,
    /// Raised by the tick when lives reach zero
    LivesDepleted,
}

/// Side effect the controller must perform alongside a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fresh run from level 1
    StartGame,
    /// Regenerate at level + 1
    NextLevel,
    /// Regenerate the current level, keeping score and lives
    RestartLevel,
    /// Create the help file if needed and open it in a viewer
    OpenHelp,
    MusicOn,
    MusicOff,
    /// Terminate the process
    Exit,
}

/// Result of a valid transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub mode: Mode,
    pub action: Option<Action>,
}

impl Transition {
    fn to(mode: Mode) -> Self {
        Self { mode, action: None }
    }

    fn with(mode: Mode, action: Action) -> Self {
        Self {
            mode,
            action: Some(action),
        }
    }
}

/// The complete transition table. Returns `None` for invalid triggers.
pub fn transition(mode: Mode, event: Event) -> Option<Transition> {
    use Event::*;
    use Mode::*;

    match (mode, event) {
        // Menu selections
        (Menu, Digit(1)) => Some(Transition::with(Playing, Action::StartGame)),
        (Menu, Digit(2)) => Some(Transition::to(Scoreboard)),
        (Menu, Digit(3)) => Some(Transition::to(MusicMenu)),
        (Menu, Digit(4)) => Some(Transition::with(Help, Action::OpenHelp)),
        // Cancel from the menu exits the process; mode is unchanged
        (Menu, Cancel) => Some(Transition::with(Menu, Action::Exit)),

        // Music sub-menu
        (MusicMenu, Digit(1)) => Some(Transition::with(Menu, Action::MusicOn)),
        (MusicMenu, Digit(2)) => Some(Transition::with(Menu, Action::MusicOff)),

        // Pause toggle
        (Playing, TogglePause) => Some(Transition::to(Paused)),
        (Paused, TogglePause) => Some(Transition::to(Playing)),

        // Simulation-raised transitions
        (Playing, BricksDepleted) => Some(Transition::to(LevelClear)),
        (Playing, LivesDepleted) => Some(Transition::to(GameOver)),

        // Advance past a cleared level / restart after a lost run
        (LevelClear, Confirm) => Some(Transition::with(Playing, Action::NextLevel)),
        (GameOver, Confirm) => Some(Transition::with(Playing, Action::StartGame)),

        // Explicit level restart
        (Playing, RestartLevel) | (Paused, RestartLevel) => {
            Some(Transition::with(Playing, Action::RestartLevel))
        }

        // Cancel from any non-menu mode returns to the menu
        (_, Cancel) => Some(Transition::to(Menu)),

        _ => None,
    }
}
