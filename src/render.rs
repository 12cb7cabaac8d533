//! Procedural drawing
//!
//! Pure read-only collaborator: consumes entity positions/flags/mode and
//! draws rectangles, circles, and text. No simulation state is mutated here.

use macroquad::prelude::*;

use crate::app::Game;
use crate::consts::*;
use crate::scores::ScoreBoard;
use crate::sim::mode::Mode;
use crate::sim::perk::PerkKind;
use crate::sim::state::GameState;

const BACKGROUND: Color = Color::new(0.05, 0.05, 0.15, 1.0);
const BRICK_NORMAL: Color = Color::new(0.2, 0.5, 1.0, 1.0);
const BRICK_TOUGH: Color = Color::new(0.75, 0.75, 0.75, 1.0);
const PADDLE_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const BALL_COLOR: Color = Color::new(1.0, 0.4, 0.2, 1.0);
const BALL_FIRE_COLOR: Color = Color::new(1.0, 0.8, 0.2, 1.0);
const PROJECTILE_COLOR: Color = Color::new(1.0, 1.0, 0.2, 1.0);

fn perk_color(kind: PerkKind) -> Color {
    match kind {
        PerkKind::ExtraLife => Color::new(1.0, 0.8, 0.2, 1.0),
        PerkKind::WidePaddle => Color::new(0.3, 0.8, 0.3, 1.0),
        PerkKind::SpeedBall => Color::new(1.0, 0.5, 0.3, 1.0),
        PerkKind::Fireball => Color::new(1.0, 0.1, 0.1, 1.0),
        PerkKind::ShrinkPaddle => Color::new(0.5, 0.2, 0.8, 1.0),
        PerkKind::InstantDeath => Color::new(0.1, 0.1, 0.1, 1.0),
    }
}

/// Draw one frame for the current mode
pub fn draw(game: &Game) {
    clear_background(BACKGROUND);
    match game.state.mode {
        Mode::Menu => draw_menu(),
        Mode::Help => draw_help(),
        Mode::Scoreboard => draw_scoreboard(&game.scores),
        Mode::MusicMenu => draw_music_menu(),
        Mode::Playing | Mode::Paused | Mode::LevelClear | Mode::GameOver => {
            draw_playfield(&game.state);
            draw_hud(&game.state);
            draw_overlay(&game.state);
        }
    }
    if game.settings.show_fps {
        draw_text(&format!("FPS {}", get_fps()), 10.0, PLAYFIELD_H - 12.0, 20.0, GRAY);
    }
}

fn draw_playfield(state: &GameState) {
    for brick in &state.bricks {
        if !brick.alive {
            continue;
        }
        let color = if brick.hits >= 2 {
            BRICK_TOUGH
        } else {
            BRICK_NORMAL
        };
        draw_rectangle(brick.pos.x, brick.pos.y, brick.width, brick.height, color);
    }

    for perk in &state.perks {
        if perk.alive {
            draw_circle(perk.pos.x, perk.pos.y, PERK_RADIUS, perk_color(perk.kind));
        }
    }

    for p in &state.projectiles {
        if p.alive {
            draw_rectangle(
                p.pos.x - PROJECTILE_W / 2.0,
                p.pos.y - PROJECTILE_H,
                PROJECTILE_W,
                PROJECTILE_H,
                PROJECTILE_COLOR,
            );
        }
    }

    let paddle = &state.paddle;
    draw_rectangle(
        paddle.pos.x,
        paddle.pos.y,
        paddle.width,
        paddle.height,
        PADDLE_COLOR,
    );

    let ball_color = if state.ball.fireball {
        BALL_FIRE_COLOR
    } else {
        BALL_COLOR
    };
    draw_circle(state.ball.pos.x, state.ball.pos.y, state.ball.radius, ball_color);
}

fn draw_hud(state: &GameState) {
    draw_text(&format!("Score: {}", state.score), 10.0, 24.0, 24.0, WHITE);
    draw_text(&format!("Lives: {}", state.lives), 10.0, 48.0, 24.0, WHITE);
    draw_text(
        &format!("Level: {}", state.level),
        PLAYFIELD_W - 120.0,
        24.0,
        24.0,
        WHITE,
    );
    draw_text(
        &format!("Time: {:.1}", state.elapsed),
        PLAYFIELD_W - 140.0,
        48.0,
        24.0,
        WHITE,
    );
}

fn draw_overlay(state: &GameState) {
    let cx = PLAYFIELD_W / 2.0;
    let cy = PLAYFIELD_H / 2.0;
    match state.mode {
        Mode::Paused => {
            draw_text("PAUSED", cx - 40.0, cy, 30.0, YELLOW);
        }
        Mode::LevelClear => {
            draw_text("LEVEL CLEARED!", cx - 90.0, cy - 20.0, 30.0, YELLOW);
            draw_text("Press SPACE for next level", cx - 160.0, cy + 10.0, 24.0, WHITE);
        }
        Mode::GameOver => {
            draw_text("GAME OVER", cx - 70.0, cy - 20.0, 30.0, RED);
            draw_text(&format!("Score: {}", state.score), cx - 40.0, cy + 10.0, 24.0, WHITE);
            draw_text("Press SPACE to restart", cx - 140.0, cy + 40.0, 24.0, WHITE);
        }
        _ => {}
    }
}

fn draw_menu() {
    let cx = PLAYFIELD_W / 2.0;
    draw_text("BRICK BLITZ", cx - 100.0, 150.0, 40.0, WHITE);
    draw_text("1. Play Game", cx - 100.0, 220.0, 24.0, WHITE);
    draw_text("2. High Scores", cx - 100.0, 250.0, 24.0, WHITE);
    draw_text("3. Music Options", cx - 100.0, 280.0, 24.0, WHITE);
    draw_text("4. Help", cx - 100.0, 310.0, 24.0, WHITE);
    draw_text("ESC. Exit", cx - 100.0, 340.0, 24.0, WHITE);
}

fn draw_help() {
    draw_text("HELP", 60.0, 60.0, 30.0, WHITE);
    draw_text("- Move: Mouse or A/D or Left/Right", 60.0, 100.0, 24.0, WHITE);
    draw_text("- Launch ball: Space", 60.0, 130.0, 24.0, WHITE);
    draw_text("- Shoot: Left Mouse Click", 60.0, 160.0, 24.0, WHITE);
    draw_text("- Pause: P", 60.0, 190.0, 24.0, WHITE);
    draw_text("Press ESC to return", 60.0, PLAYFIELD_H - 40.0, 24.0, WHITE);
}

fn draw_scoreboard(scores: &ScoreBoard) {
    let cx = PLAYFIELD_W / 2.0;
    draw_text("High Score", cx - 90.0, 60.0, 30.0, WHITE);
    draw_text(&format!("{}", scores.high_score), cx - 40.0, 90.0, 24.0, WHITE);

    draw_text("Recent Scores", cx - 90.0, 140.0, 30.0, WHITE);
    if scores.recent.is_empty() {
        draw_text("No scores yet!", cx - 140.0, 170.0, 24.0, WHITE);
    } else {
        for (i, score) in scores.recent.iter().enumerate() {
            draw_text(
                &format!("{}. {}", i + 1, score),
                cx - 40.0,
                170.0 + i as f32 * 30.0,
                24.0,
                WHITE,
            );
        }
    }
    draw_text("Press ESC to return", cx - 180.0, PLAYFIELD_H - 40.0, 24.0, WHITE);
}

fn draw_music_menu() {
    let cx = PLAYFIELD_W / 2.0;
    let cy = PLAYFIELD_H / 2.0;
    draw_text("Music Options", cx - 80.0, cy - 40.0, 30.0, WHITE);
    draw_text("1 - Music ON", cx - 100.0, cy, 24.0, WHITE);
    draw_text("2 - Music OFF", cx - 100.0, cy + 30.0, 24.0, WHITE);
    draw_text("ESC - Back", cx - 100.0, cy + 80.0, 24.0, WHITE);
}
