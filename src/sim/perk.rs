//! Power-up kinds, weighted spawning, and effect application

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mode::{self, Event};
use super::state::{GameEvent, GameState, Perk};
use crate::consts::*;

/// Perk kinds, in descending draw weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerkKind {
    /// +1 life
    ExtraLife,
    /// +40 paddle width, capped
    WidePaddle,
    /// +15% ball speed, capped
    SpeedBall,
    /// Fireball mode for a fixed duration
    Fireball,
    /// -30 paddle width, floored
    ShrinkPaddle,
    /// -1 life; can end the game
    InstantDeath,
}

impl PerkKind {
    pub fn label(&self) -> &'static str {
        match self {
            PerkKind::ExtraLife => "Extra Life",
            PerkKind::WidePaddle => "Wide Paddle",
            PerkKind::SpeedBall => "Speed Ball",
            PerkKind::Fireball => "Fireball",
            PerkKind::ShrinkPaddle => "Shrink Paddle",
            PerkKind::InstantDeath => "Instant Death",
        }
    }
}

/// Draw a perk kind with weights 35/30/15/10/7/3
pub fn draw_kind<R: Rng>(rng: &mut R) -> PerkKind {
    let roll = rng.random_range(0..100u32);
    if roll < 35 {
        PerkKind::ExtraLife
    } else if roll < 65 {
        PerkKind::WidePaddle
    } else if roll < 80 {
        PerkKind::SpeedBall
    } else if roll < 90 {
        PerkKind::Fireball
    } else if roll < 97 {
        PerkKind::ShrinkPaddle
    } else {
        PerkKind::InstantDeath
    }
}

/// Spawn a perk falling from `pos` (a destroyed brick's center)
pub fn spawn_perk(state: &mut GameState, pos: Vec2) {
    let kind = draw_kind(&mut state.rng);
    state.perks.push(Perk {
        pos,
        fall_speed: PERK_FALL_SPEED,
        kind,
        alive: true,
    });
}

/// Apply a caught perk's effect to the session.
///
/// InstantDeath may end the game; the resulting transition and events are
/// raised here so the controller persists the score exactly once.
pub fn apply_perk(state: &mut GameState, kind: PerkKind, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::PerkCaught(kind));
    match kind {
        PerkKind::ExtraLife => state.lives += 1,
        PerkKind::WidePaddle => {
            state.paddle.resize(40.0);
            state.paddle.clamp_to_playfield();
        }
        PerkKind::ShrinkPaddle => state.paddle.resize(-30.0),
        PerkKind::SpeedBall => {
            state.ball.speed = (state.ball.speed * 1.15).min(BALL_SPEED_MAX);
            state.ball.renormalize();
        }
        PerkKind::Fireball => {
            state.ball.fireball = true;
            state.ball.fireball_timer = FIREBALL_DURATION;
        }
        PerkKind::InstantDeath => {
            state.lives -= 1;
            if state.lives <= 0 {
                events.push(GameEvent::GameOver { score: state.score });
                if let Some(t) = mode::transition(state.mode, Event::LivesDepleted) {
                    state.mode = t.mode;
                }
            } else {
                events.push(GameEvent::LifeLost);
                state.reset_paddle_and_ball();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mode::Mode;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.mode = Mode::Playing;
        state
    }

    #[test]
    fn test_draw_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(format!("{:?}", draw_kind(&mut rng)));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_draw_weights_roughly_hold() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut life = 0;
        let mut death = 0;
        let n = 10_000;
        for _ in 0..n {
            match draw_kind(&mut rng) {
                PerkKind::ExtraLife => life += 1,
                PerkKind::InstantDeath => death += 1,
                _ => {}
            }
        }
        // 35% and 3% nominal; allow generous slack
        assert!((3000..4000).contains(&life));
        assert!((150..600).contains(&death));
    }

    #[test]
    fn test_wide_paddle_caps() {
        let mut state = playing_state(1);
        let mut events = Vec::new();
        for _ in 0..10 {
            apply_perk(&mut state, PerkKind::WidePaddle, &mut events);
        }
        assert_eq!(state.paddle.width, PADDLE_MAX_W);
    }

    #[test]
    fn test_shrink_paddle_floors() {
        let mut state = playing_state(1);
        let mut events = Vec::new();
        for _ in 0..10 {
            apply_perk(&mut state, PerkKind::ShrinkPaddle, &mut events);
        }
        assert_eq!(state.paddle.width, PADDLE_MIN_W);
    }

    #[test]
    fn test_speed_ball_caps_and_renormalizes() {
        let mut state = playing_state(1);
        state.ball.stuck = false;
        state.ball.vel = glam::Vec2::new(0.0, -state.ball.speed);
        let mut events = Vec::new();
        for _ in 0..20 {
            apply_perk(&mut state, PerkKind::SpeedBall, &mut events);
        }
        assert_eq!(state.ball.speed, BALL_SPEED_MAX);
        assert!((state.ball.vel.length() - BALL_SPEED_MAX).abs() < 0.01);
    }

    #[test]
    fn test_fireball_sets_timer() {
        let mut state = playing_state(1);
        let mut events = Vec::new();
        apply_perk(&mut state, PerkKind::Fireball, &mut events);
        assert!(state.ball.fireball);
        assert_eq!(state.ball.fireball_timer, FIREBALL_DURATION);
    }

    #[test]
    fn test_extra_life() {
        let mut state = playing_state(1);
        let mut events = Vec::new();
        apply_perk(&mut state, PerkKind::ExtraLife, &mut events);
        assert_eq!(state.lives, START_LIVES + 1);
    }

    #[test]
    fn test_instant_death_with_spare_lives_resets() {
        let mut state = playing_state(1);
        state.paddle.resize(40.0);
        let mut events = Vec::new();
        apply_perk(&mut state, PerkKind::InstantDeath, &mut events);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.mode, Mode::Playing);
        // Paddle restored to defaults, ball re-attached
        assert_eq!(state.paddle.width, PADDLE_W);
        assert!(state.ball.stuck);
        assert!(events.contains(&GameEvent::LifeLost));
    }

    #[test]
    fn test_instant_death_on_last_life_ends_game() {
        let mut state = playing_state(1);
        state.lives = 1;
        state.score = 77;
        let mut events = Vec::new();
        apply_perk(&mut state, PerkKind::InstantDeath, &mut events);
        assert_eq!(state.lives, 0);
        assert_eq!(state.mode, Mode::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 77 }));
    }
}
