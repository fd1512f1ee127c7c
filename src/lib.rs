//! Missile Command - simulation core for a ground-defense arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, scoring, game loop)
//! - `render`: Read-only frame snapshot handed to whatever draws the game
//! - `tuning`: Data-driven game balance
//! - `settings`: Host run settings (viewport, pacing, seed)

pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use render::FrameSnapshot;
pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// These are the defaults behind [`Tuning::default`]; the simulation itself
/// always reads the values from a `Tuning`.
pub mod consts {
    /// Nominal tick length (the host paces ticks, the sim never sleeps)
    pub const TICK_MS: u64 = 50;

    /// House (structure) footprint
    pub const HOUSE_WIDTH: f32 = 50.0;
    pub const HOUSE_HEIGHT: f32 = 70.0;
    pub const NUM_HOUSES: usize = 5;
    /// Distance of the house row above the bottom edge
    pub const HOUSE_BOTTOM_MARGIN: f32 = 50.0;

    /// Missile speed in units per tick
    pub const MISSILE_SPEED: f32 = 3.0;
    /// Missiles launch this far below the top edge
    pub const MISSILE_TOP_MARGIN: f32 = 30.0;
    /// Launch cone in degrees (0 = straight up, clockwise)
    pub const MISSILE_MIN_ANGLE: i32 = 135;
    pub const MISSILE_MAX_ANGLE: i32 = 225;

    /// Ticks between launches: clamp(BASE - tick / DIVISOR, MIN, MAX)
    pub const MISSILE_BASE_FREQ: i64 = 85;
    pub const MISSILE_FREQ_DIVISOR: u64 = 20;
    pub const MISSILE_MIN_FREQ: u64 = 5;
    pub const MISSILE_MAX_FREQ: u64 = 85;

    /// Explosion (blast zone) growth
    pub const EXPLOSION_SIZE: u32 = 85;
    pub const EXPLOSION_LINGER: u32 = 15;
    pub const EXPLOSION_GROWTH: u32 = 5;

    /// Player resources
    pub const STARTING_AMMO: u32 = 20;
    /// Every this many points the player gets a bonus explosion
    pub const MORE_EXPLOSION_REWARD_FREQUENCY: u64 = 15;
    pub const MISSILE_KILL_REWARD: u64 = 5;
    pub const SURVIVAL_REWARD: u64 = 1;
    pub const SURVIVAL_REWARD_PERIOD: u64 = 50;
}

/// Convert a compass heading (degrees, 0 = up, clockwise) into a velocity
#[inline]
pub fn heading_to_velocity(degrees: f32, speed: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(theta.sin() * speed, theta.cos() * speed)
}
