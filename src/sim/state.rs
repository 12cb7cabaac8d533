//! Game state and core simulation types
//!
//! One session struct owns every entity; subsystems borrow it per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::mode::Mode;
use super::perk::PerkKind;
use crate::consts::*;

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed; `vel.length() == speed` whenever not stuck
    pub speed: f32,
    /// Riding the paddle, not yet launched
    pub stuck: bool,
    /// Destroys bricks on contact without bouncing
    pub fireball: bool,
    /// Remaining fireball duration in seconds
    pub fireball_timer: f32,
}

impl Ball {
    /// Fresh ball resting on the paddle
    pub fn new_on_paddle(paddle: &Paddle, speed: f32) -> Self {
        Self {
            pos: Vec2::new(
                paddle.pos.x + paddle.width / 2.0,
                paddle.pos.y - BALL_RADIUS - 1.0,
            ),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed,
            stuck: true,
            fireball: false,
            fireball_timer: 0.0,
        }
    }

    /// Rescale velocity to the current scalar speed without changing direction
    pub fn renormalize(&mut self) {
        let mag = self.vel.length();
        if mag > 0.0001 {
            self.vel *= self.speed / mag;
        }
    }

    /// Bounding box used for collision detection
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            self.pos - Vec2::splat(self.radius),
            Vec2::splat(self.radius * 2.0),
        )
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed for held-key movement
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (PLAYFIELD_W - PADDLE_W) / 2.0,
                PLAYFIELD_H - PADDLE_FLOOR_GAP - PADDLE_H,
            ),
            width: PADDLE_W,
            height: PADDLE_H,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Grow or shrink the paddle, clamped to [PADDLE_MIN_W, PADDLE_MAX_W]
    pub fn resize(&mut self, delta: f32) {
        self.width = (self.width + delta).clamp(PADDLE_MIN_W, PADDLE_MAX_W);
    }

    /// Keep the paddle fully inside the playfield horizontally
    pub fn clamp_to_playfield(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, PLAYFIELD_W - self.width);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }
}

/// A brick in the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Remaining hits to destroy (1, or 2 for tough bricks)
    pub hits: u8,
    pub alive: bool,
    /// Drops a perk when destroyed
    pub drops_perk: bool,
}

impl Brick {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perk {
    pub pos: Vec2,
    /// Downward fall speed (px/s)
    pub fall_speed: f32,
    pub kind: PerkKind,
    pub alive: bool,
}

/// A projectile fired from the paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Upward rise speed (px/s)
    pub rise_speed: f32,
    pub alive: bool,
}

/// Events raised by the simulation for the controller to act on
/// (persistence, logging); the sim itself performs no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LifeLost,
    PerkCaught(PerkKind),
    LevelCleared { score: u32 },
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Injectable PRNG driving brick toughness, perk drops, and launch jitter
    pub rng: Pcg32,
    /// Current top-level mode
    pub mode: Mode,
    /// Current level (starts at 1)
    pub level: u32,
    pub score: u32,
    pub lives: i32,
    /// Mirrors the count of alive bricks; level clears at 0
    pub bricks_remaining: u32,
    /// Seconds since level/game start, paused time excluded
    pub elapsed: f32,
    /// Seconds until the next fire action is allowed
    pub fire_cooldown: f32,
    /// Per-level base ball speed set by the level generator
    pub base_speed: f32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub perks: Vec<Perk>,
    pub projectiles: Vec<Projectile>,
}

impl GameState {
    /// Create a session in the menu with level 1 already generated
    pub fn new(seed: u64) -> Self {
        let paddle = Paddle::default();
        let ball = Ball::new_on_paddle(&paddle, BALL_BASE_SPEED);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: Mode::Menu,
            level: 1,
            score: 0,
            lives: START_LIVES,
            bricks_remaining: 0,
            elapsed: 0.0,
            fire_cooldown: 0.0,
            base_speed: BALL_BASE_SPEED,
            paddle,
            ball,
            bricks: Vec::new(),
            perks: Vec::new(),
            projectiles: Vec::new(),
        };
        super::level::generate_level(&mut state, 1);
        state
    }

    /// Restore the paddle to defaults and re-attach a fresh ball at base speed
    pub fn reset_paddle_and_ball(&mut self) {
        self.paddle = Paddle::default();
        self.ball = Ball::new_on_paddle(&self.paddle, self.base_speed);
    }

    /// Begin a run from level 1 with full lives and zero score
    pub fn start_new_game(&mut self) {
        self.level = 1;
        self.score = 0;
        self.lives = START_LIVES;
        self.start_level(1);
    }

    /// Regenerate the given level and reset the paddle/ball/clock
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        super::level::generate_level(self, level);
        self.reset_paddle_and_ball();
        self.elapsed = 0.0;
        self.fire_cooldown = 0.0;
        self.mode = Mode::Playing;
    }

    /// Advance past a cleared level
    pub fn next_level(&mut self) {
        self.start_level(self.level + 1);
    }

    /// Restart the current level, keeping score and lives
    pub fn restart_level(&mut self) {
        self.start_level(self.level);
    }
}
