//! Procedural level generation
//!
//! Builds the brick grid for a level and resets the falling-object bags.
//! Toughness and perk-drop rolls come from the session PRNG so a seed fully
//! determines the layout.

use glam::Vec2;
use rand::Rng;

use super::state::{Brick, GameState};
use crate::consts::*;

/// Rows for a given level: one more per level, capped at the grid maximum
pub fn rows_for_level(level: u32) -> u32 {
    (3 + level).min(BRICK_MAX_ROWS)
}

/// Base ball speed for a given level, capped at the global maximum
pub fn base_speed_for_level(level: u32) -> f32 {
    (BALL_BASE_SPEED + BALL_SPEED_PER_LEVEL * (level - 1) as f32).min(BALL_SPEED_MAX)
}

/// Probability (percent) that a brick takes two hits; saturates past level ~7
fn tough_brick_pct(level: u32) -> u32 {
    level.saturating_sub(1) * 15
}

/// Probability that a destroyed brick drops a perk
fn perk_drop_prob(level: u32) -> f32 {
    PERK_DROP_PROB + PERK_DROP_PROB_PER_LEVEL * (level - 1) as f32
}

/// Populate the session with the brick grid for `level`.
///
/// Clears the perk and projectile bags, resets the bricks-remaining counter
/// to the total brick count, and stores the level's base ball speed on the
/// session.
pub fn generate_level(state: &mut GameState, level: u32) {
    state.bricks.clear();
    state.perks.clear();
    state.projectiles.clear();

    let rows = rows_for_level(level);
    let cols = BRICK_COLS;
    let brick_w = (PLAYFIELD_W - 2.0 * BRICK_MARGIN - (cols - 1) as f32 * BRICK_GAP) / cols as f32;

    let tough_pct = tough_brick_pct(level);
    let drop_prob = perk_drop_prob(level);

    for row in 0..rows {
        for col in 0..cols {
            let pos = Vec2::new(
                BRICK_MARGIN + col as f32 * (brick_w + BRICK_GAP),
                BRICK_TOP + row as f32 * (BRICK_H + BRICK_GAP),
            );
            let hits = if state.rng.random_range(0..100u32) < tough_pct {
                2
            } else {
                1
            };
            let drops_perk = state.rng.random::<f32>() < drop_prob;
            state.bricks.push(Brick {
                pos,
                width: brick_w,
                height: BRICK_H,
                hits,
                alive: true,
                drops_perk,
            });
        }
    }

    state.bricks_remaining = rows * cols;
    state.base_speed = base_speed_for_level(level);

    log::info!(
        "Level {}: {} bricks ({} rows), base speed {}",
        level,
        state.bricks_remaining,
        rows,
        state.base_speed
    );
}
