//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, I/O, or platform dependencies (the tick reports events;
//!   the controller persists and plays sounds)

pub mod collision;
pub mod level;
pub mod mode;
pub mod perk;
pub mod state;
pub mod tick;

pub use collision::{Aabb, BounceAxis, penetration_axis};
pub use mode::{Action, Event, Mode, Transition, transition};
pub use perk::PerkKind;
pub use state::{Ball, Brick, GameEvent, GameState, Paddle, Perk, Projectile};
pub use tick::{TickInput, tick};
