//! Fixed timestep simulation tick
//!
//! Advances the session by one step: paddle input, ball integration, wall /
//! paddle / brick collisions, falling perks, projectiles, and the win/lose
//! checks. Runs only while the mode is `Playing`; all raised events are
//! returned for the controller to act on.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use super::collision::{BounceAxis, penetration_axis};
use super::mode::{self, Event, Mode};
use super::perk;
use super::state::{Brick, GameEvent, GameState, Projectile};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired paddle center (from pointer motion)
    pub pointer_x: Option<f32>,
    /// Held-key movement
    pub move_left: bool,
    pub move_right: bool,
    /// Launch the stuck ball
    pub launch: bool,
    /// Fire twin projectiles (subject to cooldown)
    pub fire: bool,
}

/// Advance the session by one step of `dt` seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.mode != Mode::Playing {
        return events;
    }

    state.elapsed += dt;

    if state.fire_cooldown > 0.0 {
        state.fire_cooldown -= dt;
    }

    // Expire fireball mode
    if state.ball.fireball {
        state.ball.fireball_timer -= dt;
        if state.ball.fireball_timer <= 0.0 {
            state.ball.fireball = false;
            state.ball.fireball_timer = 0.0;
        }
    }

    if input.fire && state.fire_cooldown <= 0.0 {
        fire_projectiles(state);
    }

    // Paddle movement: pointer position wins, held keys add displacement
    if let Some(x) = input.pointer_x {
        state.paddle.pos.x = x - state.paddle.width / 2.0;
    }
    let mv = state.paddle.speed * dt;
    if input.move_left {
        state.paddle.pos.x -= mv;
    }
    if input.move_right {
        state.paddle.pos.x += mv;
    }
    state.paddle.clamp_to_playfield();

    if input.launch && state.ball.stuck {
        launch_ball(state);
    }

    // Ball: pinned to the paddle until launched
    if state.ball.stuck {
        state.ball.pos.x = state.paddle.center_x();
    } else {
        state.ball.pos += state.ball.vel * dt;
    }

    handle_wall_collisions(state);

    // Falling past the floor is a miss, not a bounce
    if state.ball.pos.y + state.ball.radius >= PLAYFIELD_H {
        lose_life(state, &mut events);
        return events;
    }

    handle_paddle_collision(state);
    handle_brick_collisions(state);
    handle_perks(state, dt, &mut events);
    if state.mode != Mode::Playing {
        // An InstantDeath perk ended the run mid-tick
        return events;
    }
    handle_projectiles(state, dt);

    // Speed ramp while in flight; renormalize so |vel| tracks speed
    if !state.ball.stuck {
        state.ball.speed = (state.ball.speed + BALL_SPEED_RAMP * dt).min(BALL_SPEED_MAX);
        state.ball.renormalize();
    }

    if state.bricks_remaining == 0 {
        events.push(GameEvent::LevelCleared { score: state.score });
        if let Some(t) = mode::transition(state.mode, Event::BricksDepleted) {
            state.mode = t.mode;
        }
    }

    events
}

/// Detach the ball at ~60 degrees from horizontal with a small random jitter
fn launch_ball(state: &mut GameState) {
    let jitter = (state.rng.random_range(0..100i32) - 50) as f32 * 0.004;
    let angle = FRAC_PI_3 + jitter;
    state.ball.stuck = false;
    state.ball.vel = Vec2::new(
        state.ball.speed * angle.cos(),
        -state.ball.speed * angle.sin(),
    );
}

/// Spawn the twin projectiles at the paddle's top edge and start the cooldown
fn fire_projectiles(state: &mut GameState) {
    let paddle = &state.paddle;
    for x in [paddle.pos.x + 10.0, paddle.pos.x + paddle.width - 10.0] {
        state.projectiles.push(Projectile {
            pos: Vec2::new(x, paddle.pos.y),
            rise_speed: PROJECTILE_SPEED,
            alive: true,
        });
    }
    state.fire_cooldown = FIRE_COOLDOWN;
}

fn handle_wall_collisions(state: &mut GameState) {
    let ball = &mut state.ball;
    if ball.pos.x - ball.radius <= 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = -ball.vel.x;
    }
    if ball.pos.x + ball.radius >= PLAYFIELD_W {
        ball.pos.x = PLAYFIELD_W - ball.radius;
        ball.vel.x = -ball.vel.x;
    }
    if ball.pos.y - ball.radius <= 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
    }
}

fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
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

/// Deflect off the paddle, only while the ball is moving downward. The exit
/// angle is linear in the impact offset from paddle center, up to
/// PADDLE_DEFLECT_MAX from vertical.
fn handle_paddle_collision(state: &mut GameState) {
    let ball = &state.ball;
    if ball.vel.y <= 0.0 || !ball.aabb().overlaps(&state.paddle.aabb()) {
        return;
    }
    let rel = (ball.pos.x - state.paddle.center_x()) / (state.paddle.width * 0.5);
    let angle = FRAC_PI_2 + rel * PADDLE_DEFLECT_MAX;
    let ball = &mut state.ball;
    // Reposition just above the paddle to avoid re-triggering next tick
    ball.pos.y = state.paddle.pos.y - ball.radius - 1.0;
    ball.vel = Vec2::new(ball.speed * angle.cos(), -ball.speed * angle.sin());
}

/// Decrement a brick's hit count: +5 for a hit that leaves it alive, +10 and
/// a possible perk drop on destruction.
fn damage_brick(
    brick: &mut Brick,
    score: &mut u32,
    bricks_remaining: &mut u32,
    perk_spawns: &mut Vec<Vec2>,
) {
    brick.hits = brick.hits.saturating_sub(1);
    if brick.hits == 0 {
        brick.alive = false;
        *bricks_remaining = bricks_remaining.saturating_sub(1);
        *score += 10;
        if brick.drops_perk {
            perk_spawns.push(brick.center());
        }
    } else {
        *score += 5;
    }
}

/// Ball vs bricks. A fireball destroys every overlapping brick without
/// bouncing; otherwise the first overlapping brick is resolved along the
/// minimum-penetration axis and the scan stops there (stop-after-first is
/// observable behavior, kept as-is).
fn handle_brick_collisions(state: &mut GameState) {
    let ball_box = state.ball.aabb();
    let ball_pos = state.ball.pos;
    let ball_radius = state.ball.radius;
    let fireball = state.ball.fireball;
    let mut perk_spawns = Vec::new();

    for brick in &mut state.bricks {
        if !brick.alive || !ball_box.overlaps(&brick.aabb()) {
            continue;
        }
        if fireball {
            brick.alive = false;
            state.bricks_remaining = state.bricks_remaining.saturating_sub(1);
            state.score += 10;
            if brick.drops_perk {
                perk_spawns.push(brick.center());
            }
            continue;
        }
        match penetration_axis(ball_pos, ball_radius, &brick.aabb()) {
            BounceAxis::Horizontal => state.ball.vel.x = -state.ball.vel.x,
            BounceAxis::Vertical => state.ball.vel.y = -state.ball.vel.y,
        }
        damage_brick(
            brick,
            &mut state.score,
            &mut state.bricks_remaining,
            &mut perk_spawns,
        );
        break;
    }

    for pos in perk_spawns {
        perk::spawn_perk(state, pos);
    }
}

/// Advance falling perks: despawn past the floor, apply on paddle catch.
fn handle_perks(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let paddle_box = state.paddle.aabb();
    let mut caught = Vec::new();

    for p in &mut state.perks {
        if !p.alive {
            continue;
        }
        p.pos.y += p.fall_speed * dt;
        if p.pos.y > PLAYFIELD_H + 40.0 {
            p.alive = false;
            continue;
        }
        if paddle_box.contains_point(p.pos) {
            p.alive = false;
            caught.push(p.kind);
        }
    }

    for kind in caught {
        perk::apply_perk(state, kind, events);
    }
}

/// Advance projectiles: despawn past the ceiling, damage the first brick
/// containing the tip (same scoring rules as a non-fireball ball hit).
fn handle_projectiles(state: &mut GameState, dt: f32) {
    let mut perk_spawns = Vec::new();

    for i in 0..state.projectiles.len() {
        if !state.projectiles[i].alive {
            continue;
        }
        state.projectiles[i].pos.y -= state.projectiles[i].rise_speed * dt;
        if state.projectiles[i].pos.y < -PROJECTILE_H {
            state.projectiles[i].alive = false;
            continue;
        }
        let tip = state.projectiles[i].pos;
        for brick in &mut state.bricks {
            if brick.alive && brick.aabb().contains_point(tip) {
                state.projectiles[i].alive = false;
                damage_brick(
                    brick,
                    &mut state.score,
                    &mut state.bricks_remaining,
                    &mut perk_spawns,
                );
                break;
            }
        }
    }

    for pos in perk_spawns {
        perk::spawn_perk(state, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Session in Playing mode with a single far-away brick so the win check
    /// never fires unless a test asks for it.
    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.mode = Mode::Playing;
        state.bricks.clear();
        state.bricks.push(brick_at(700.0, 90.0, false));
        state.bricks_remaining = 1;
        state
    }

    fn brick_at(x: f32, y: f32, drops_perk: bool) -> Brick {
        Brick {
            pos: Vec2::new(x, y),
            width: 62.0,
            height: BRICK_H,
            hits: 1,
            alive: true,
            drops_perk,
        }
    }

    #[test]
    fn test_launch_detaches_at_speed() {
        let mut state = playing_state(5);
        let input = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(!state.ball.stuck);
        assert!((state.ball.vel.length() - state.ball.speed).abs() < 0.5);
        // Launch always heads upward
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_tick_is_inert_outside_playing() {
        let mut state = playing_state(5);
        let input = TickInput::default();
        tick(&mut state, &input, SIM_DT);
        tick(&mut state, &input, SIM_DT);
        let elapsed_before = state.elapsed;

        state.mode = Mode::Paused;
        for _ in 0..100 {
            assert!(tick(&mut state, &input, SIM_DT).is_empty());
        }
        assert_eq!(state.elapsed, elapsed_before);

        // Resuming picks up exactly where the clock stopped
        state.mode = Mode::Playing;
        tick(&mut state, &input, SIM_DT);
        assert!((state.elapsed - (elapsed_before + SIM_DT)).abs() < 1e-6);
    }

    #[test]
    fn test_miss_decrements_lives_and_reattaches() {
        let mut state = playing_state(5);
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(400.0, PLAYFIELD_H - 2.0);
        state.ball.vel = Vec2::new(0.0, state.ball.speed);
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, START_LIVES - 1);
        assert!(state.ball.stuck);
        assert!(events.contains(&GameEvent::LifeLost));
        assert_eq!(state.mode, Mode::Playing);
    }

    #[test]
    fn test_miss_on_last_life_is_game_over() {
        let mut state = playing_state(5);
        state.lives = 1;
        state.score = 123;
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(400.0, PLAYFIELD_H - 2.0);
        state.ball.vel = Vec2::new(0.0, state.ball.speed);
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.mode, Mode::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 123 }));
    }

    #[test]
    fn test_two_hit_brick_progression() {
        let mut state = playing_state(5);
        state.bricks.clear();
        let mut tough = brick_at(100.0, 100.0, false);
        tough.hits = 2;
        state.bricks.push(tough);
        state.bricks.push(brick_at(700.0, 90.0, false));
        state.bricks_remaining = 2;

        // First hit: damaged but alive, +5
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(131.0, 96.0);
        state.ball.vel = Vec2::new(0.0, state.ball.speed);
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.bricks[0].alive);
        assert_eq!(state.bricks[0].hits, 1);
        assert_eq!(state.score, 5);
        assert_eq!(state.bricks_remaining, 2);

        // Second hit: destroyed, +10 more
        state.ball.pos = Vec2::new(131.0, 96.0);
        state.ball.vel = Vec2::new(0.0, state.ball.speed);
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(!state.bricks[0].alive);
        assert_eq!(state.score, 15);
        assert_eq!(state.bricks_remaining, 1);
    }

    #[test]
    fn test_bounce_stops_after_first_brick() {
        let mut state = playing_state(5);
        state.bricks.clear();
        // Two bricks side by side, ball box straddling both
        state.bricks.push(brick_at(100.0, 100.0, false));
        state.bricks.push(brick_at(162.0, 100.0, false));
        state.bricks.push(brick_at(700.0, 60.0, false));
        state.bricks_remaining = 3;
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(162.0, 96.0);
        state.ball.vel = Vec2::new(0.0, state.ball.speed);
        tick(&mut state, &TickInput::default(), 0.0);
        let destroyed = state.bricks.iter().filter(|b| !b.alive).count();
        assert_eq!(destroyed, 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_fireball_sweeps_all_overlapping_bricks() {
        let mut state = playing_state(5);
        state.bricks.clear();
        state.bricks.push(brick_at(100.0, 100.0, false));
        state.bricks.push(brick_at(162.0, 100.0, false));
        state.bricks.push(brick_at(700.0, 60.0, false));
        state.bricks_remaining = 3;
        state.ball.stuck = false;
        state.ball.fireball = true;
        state.ball.fireball_timer = 5.0;
        state.ball.pos = Vec2::new(162.0, 96.0);
        state.ball.vel = Vec2::new(0.0, state.ball.speed);
        let before = state.ball.vel;
        tick(&mut state, &TickInput::default(), 0.0);
        let destroyed = state.bricks.iter().filter(|b| !b.alive).count();
        assert_eq!(destroyed, 2);
        assert_eq!(state.score, 20);
        // No bounce in fireball mode
        assert_eq!(state.ball.vel.y, before.y);
    }

    #[test]
    fn test_last_brick_clears_level() {
        let mut state = playing_state(5);
        state.score = 40;
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(731.0, 86.0);
        state.ball.vel = Vec2::new(0.0, state.ball.speed);
        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.bricks_remaining, 0);
        assert_eq!(state.mode, Mode::LevelClear);
        assert!(events.contains(&GameEvent::LevelCleared { score: 50 }));
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = playing_state(5);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.projectiles.len(), 2);
        // Cooldown (0.3s) outlasts one 60 Hz tick
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_projectile_damages_first_brick_and_dies() {
        let mut state = playing_state(5);
        state.bricks.clear();
        state.bricks.push(brick_at(100.0, 100.0, false));
        state.bricks.push(brick_at(700.0, 60.0, false));
        state.bricks_remaining = 2;
        state.projectiles.push(Projectile {
            pos: Vec2::new(131.0, 125.0),
            rise_speed: PROJECTILE_SPEED,
            alive: true,
        });
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.projectiles[0].alive);
        assert!(!state.bricks[0].alive);
        assert_eq!(state.score, 10);
        assert_eq!(state.bricks_remaining, 1);
    }

    #[test]
    fn test_speed_ramp_caps_and_renormalizes() {
        let mut state = playing_state(5);
        state.ball.stuck = false;
        state.ball.speed = BALL_SPEED_MAX - 0.01;
        state.ball.pos = Vec2::new(400.0, 300.0);
        state.ball.vel = Vec2::new(0.0, -state.ball.speed);
        for _ in 0..30 {
            // Re-center so the ball never reaches a wall or the floor
            state.ball.pos = Vec2::new(400.0, 300.0);
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.ball.speed, BALL_SPEED_MAX);
        assert!((state.ball.vel.length() - BALL_SPEED_MAX).abs() < 0.01);
    }

    #[test]
    fn test_fireball_expires() {
        let mut state = playing_state(5);
        state.ball.fireball = true;
        state.ball.fireball_timer = SIM_DT / 2.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.ball.fireball);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_playfield(
            seed in any::<u64>(),
            pointer in proptest::collection::vec(proptest::option::of(-200.0f32..1000.0), 1..60),
        ) {
            let mut state = playing_state(seed);
            for (i, px) in pointer.into_iter().enumerate() {
                let input = TickInput {
                    pointer_x: px,
                    move_left: i % 3 == 0,
                    move_right: i % 2 == 0,
                    ..Default::default()
                };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.paddle.pos.x >= 0.0);
                prop_assert!(state.paddle.pos.x + state.paddle.width <= PLAYFIELD_W);
            }
        }

        #[test]
        fn prop_velocity_magnitude_tracks_speed(seed in any::<u64>(), ticks in 1usize..240) {
            let mut state = playing_state(seed);
            let input = TickInput { launch: true, ..Default::default() };
            tick(&mut state, &input, SIM_DT);
            let input = TickInput::default();
            for _ in 0..ticks {
                tick(&mut state, &input, SIM_DT);
                if state.mode != Mode::Playing {
                    break;
                }
                if !state.ball.stuck {
                    let mag = state.ball.vel.length();
                    prop_assert!((mag - state.ball.speed).abs() < 0.5);
                }
            }
        }
    }
}
