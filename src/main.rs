//! Brick Blitz entry point
//!
//! Initializes logging and the window, polls input, and runs the frame loop.

use std::time::{SystemTime, UNIX_EPOCH};

use macroquad::prelude::*;

use brick_blitz::app::{self, Game};
use brick_blitz::consts::*;
use brick_blitz::render;
use brick_blitz::sim::mode::{Event, Mode};

fn window_conf() -> Conf {
    Conf {
        window_title: "Brick Blitz".to_owned(),
        window_width: PLAYFIELD_W as i32,
        window_height: PLAYFIELD_H as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut game = Game::new(seed, app::default_data_dir());
    let mut last_mouse = mouse_position();

    loop {
        collect_input(&mut game, &mut last_mouse);
        game.frame(get_frame_time());
        render::draw(&game);
        if game.should_exit() {
            break;
        }
        next_frame().await
    }
}

/// Translate this frame's input into FSM events and tick flags
fn collect_input(game: &mut Game, last_mouse: &mut (f32, f32)) {
    if is_key_pressed(KeyCode::Escape) {
        game.handle_event(Event::Cancel);
    }
    if is_key_pressed(KeyCode::Space) {
        // During play Space launches the stuck ball; elsewhere it advances
        if game.state.mode == Mode::Playing {
            game.input.launch = true;
        } else {
            game.handle_event(Event::Confirm);
        }
    }
    if is_key_pressed(KeyCode::P) {
        game.handle_event(Event::TogglePause);
    }
    if is_key_pressed(KeyCode::R) {
        game.handle_event(Event::RestartLevel);
    }
    for (key, digit) in [
        (KeyCode::Key1, 1),
        (KeyCode::Key2, 2),
        (KeyCode::Key3, 3),
        (KeyCode::Key4, 4),
    ] {
        if is_key_pressed(key) {
            game.handle_event(Event::Digit(digit));
        }
    }

    game.input.move_left = is_key_down(KeyCode::A) || is_key_down(KeyCode::Left);
    game.input.move_right = is_key_down(KeyCode::D) || is_key_down(KeyCode::Right);

    if is_mouse_button_pressed(MouseButton::Left) {
        game.input.fire = true;
    }
    let mouse = mouse_position();
    if mouse != *last_mouse {
        game.input.pointer_x = Some(mouse.0);
        *last_mouse = mouse;
    }
}
