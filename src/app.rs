//! Game controller
//!
//! Owns the session plus every I/O collaborator (score files, settings,
//! music) and runs the fixed-timestep accumulator. Discrete inputs flow
//! through the transition table; tick events flow back out to persistence
//! and logging. Single-threaded by design: input mutation, simulation, and
//! rendering all interleave on one thread.

use std::path::{Path, PathBuf};

use crate::audio::MusicPlayer;
use crate::consts::*;
use crate::help;
use crate::scores::ScoreBoard;
use crate::settings::Settings;
use crate::sim::mode::{self, Action, Event};
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{TickInput, tick};

/// Top-level game instance
pub struct Game {
    pub state: GameState,
    pub scores: ScoreBoard,
    pub settings: Settings,
    pub music: MusicPlayer,
    /// Input flags for the next tick; one-shots are cleared after each step
    pub input: TickInput,
    data_dir: PathBuf,
    accumulator: f32,
    should_exit: bool,
}

impl Game {
    /// Create a session, loading scores and settings from `data_dir`
    pub fn new(seed: u64, data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let settings = Settings::load(&data_dir.join(Settings::FILE_NAME));
        let scores = ScoreBoard::load(&data_dir);
        let mut music = MusicPlayer::new(settings.music_volume);
        if settings.music_enabled {
            music.play();
        }
        log::info!("New session, seed {seed}");
        Self {
            state: GameState::new(seed),
            scores,
            settings,
            music,
            input: TickInput::default(),
            data_dir,
            accumulator: 0.0,
            should_exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Advance the simulation by a frame's worth of fixed ticks.
    ///
    /// The frame delta is clamped so a stalled process cannot tunnel the
    /// ball through geometry when it wakes up.
    pub fn frame(&mut self, frame_dt: f32) {
        self.accumulator += frame_dt.min(MAX_FRAME_DT);
        while self.accumulator >= SIM_DT {
            self.accumulator -= SIM_DT;
            let events = tick(&mut self.state, &self.input, SIM_DT);
            self.handle_sim_events(&events);
            // Clear one-shot inputs after processing
            self.input.launch = false;
            self.input.fire = false;
        }
        self.input.pointer_x = None;
    }

    /// Feed a discrete input event through the transition table.
    /// Invalid triggers are no-ops.
    pub fn handle_event(&mut self, event: Event) {
        let Some(t) = mode::transition(self.state.mode, event) else {
            return;
        };
        log::debug!("{:?} + {:?} -> {:?}", self.state.mode, event, t.mode);
        self.state.mode = t.mode;
        if let Some(action) = t.action {
            self.perform(action);
        }
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::StartGame => self.state.start_new_game(),
            Action::NextLevel => self.state.next_level(),
            Action::RestartLevel => self.state.restart_level(),
            Action::OpenHelp => help::open_help(),
            Action::MusicOn => {
                self.settings.music_enabled = true;
                self.save_settings();
                self.music.play();
            }
            Action::MusicOff => {
                self.settings.music_enabled = false;
                self.save_settings();
                self.music.stop();
            }
            Action::Exit => self.should_exit = true,
        }
    }

    fn save_settings(&self) {
        self.settings.save(&self.data_dir.join(Settings::FILE_NAME));
    }

    /// Persistence and logging for events raised by the tick
    fn handle_sim_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::LifeLost => {
                    log::info!("Ball lost, {} lives remaining", self.state.lives);
                }
                GameEvent::PerkCaught(kind) => {
                    log::debug!("Perk caught: {}", kind.label());
                }
                GameEvent::LevelCleared { score } => {
                    log::info!("Level {} cleared with score {}", self.state.level, score);
                    self.scores.push_recent(score);
                }
                GameEvent::GameOver { score } => {
                    log::info!("Game over with score {}", score);
                    self.scores.push_recent(score);
                    if self.scores.maybe_update_high(score) {
                        log::info!("New high score: {}", score);
                    }
                }
            }
        }
    }
}

/// Convenience for the frontend: data files live in the working directory
pub fn default_data_dir() -> &'static Path {
    Path::new(".")
}
