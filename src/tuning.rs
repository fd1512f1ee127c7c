//! Data-driven game balance
//!
//! Every number the simulation consults lives here. Defaults mirror
//! [`crate::consts`]; a settings file may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::SettingsError;

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Houses ===
    pub house_width: f32,
    pub house_height: f32,
    pub num_houses: usize,
    /// Height of the house row above the bottom edge
    pub house_bottom_margin: f32,

    // === Missiles ===
    pub missile_speed: f32,
    pub missile_top_margin: f32,
    /// Launch cone, whole degrees (0 = up, clockwise)
    pub missile_min_angle: i32,
    pub missile_max_angle: i32,

    // === Spawn schedule ===
    pub spawn_base_period: i64,
    pub spawn_period_divisor: u64,
    pub spawn_min_period: u64,
    pub spawn_max_period: u64,

    // === Explosions ===
    /// Maximum collision radius
    pub explosion_size: u32,
    /// Ticks an explosion stays at full size
    pub explosion_linger: u32,
    /// Age added per tick
    pub explosion_growth: u32,

    // === Scoring ===
    pub starting_ammo: u32,
    pub bonus_ammo_threshold: u64,
    pub missile_kill_reward: u64,
    pub survival_reward: u64,
    pub survival_reward_period: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            house_width: HOUSE_WIDTH,
            house_height: HOUSE_HEIGHT,
            num_houses: NUM_HOUSES,
            house_bottom_margin: HOUSE_BOTTOM_MARGIN,

            missile_speed: MISSILE_SPEED,
            missile_top_margin: MISSILE_TOP_MARGIN,
            missile_min_angle: MISSILE_MIN_ANGLE,
            missile_max_angle: MISSILE_MAX_ANGLE,

            spawn_base_period: MISSILE_BASE_FREQ,
            spawn_period_divisor: MISSILE_FREQ_DIVISOR,
            spawn_min_period: MISSILE_MIN_FREQ,
            spawn_max_period: MISSILE_MAX_FREQ,

            explosion_size: EXPLOSION_SIZE,
            explosion_linger: EXPLOSION_LINGER,
            explosion_growth: EXPLOSION_GROWTH,

            starting_ammo: STARTING_AMMO,
            bonus_ammo_threshold: MORE_EXPLOSION_REWARD_FREQUENCY,
            missile_kill_reward: MISSILE_KILL_REWARD,
            survival_reward: SURVIVAL_REWARD,
            survival_reward_period: SURVIVAL_REWARD_PERIOD,
        }
    }
}

impl Tuning {
    /// Age past which an explosion is removed
    #[inline]
    pub fn explosion_lifetime(&self) -> u32 {
        self.explosion_size + self.explosion_linger
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
            SettingsError::InvalidTuning { field, reason }
        }

        if !(self.house_width.is_finite() && self.house_width > 0.0) {
            return Err(invalid("house_width", "must be positive"));
        }
        if !(self.house_height.is_finite() && self.house_height > 0.0) {
            return Err(invalid("house_height", "must be positive"));
        }
        if self.num_houses == 0 {
            return Err(invalid("num_houses", "must be at least 1"));
        }
        if !self.house_bottom_margin.is_finite() || !self.missile_top_margin.is_finite() {
            return Err(invalid("margins", "must be finite"));
        }
        if !(self.missile_speed.is_finite() && self.missile_speed > 0.0) {
            return Err(invalid("missile_speed", "must be positive"));
        }
        if self.missile_min_angle > self.missile_max_angle {
            return Err(invalid("missile_min_angle", "must not exceed missile_max_angle"));
        }
        if self.spawn_period_divisor == 0 {
            return Err(invalid("spawn_period_divisor", "must be at least 1"));
        }
        // The period is used as a modulus
        if self.spawn_min_period == 0 {
            return Err(invalid("spawn_min_period", "must be at least 1"));
        }
        if self.spawn_min_period > self.spawn_max_period {
            return Err(invalid("spawn_min_period", "must not exceed spawn_max_period"));
        }
        if self.explosion_growth == 0 {
            return Err(invalid("explosion_growth", "must be at least 1"));
        }
        if self.bonus_ammo_threshold == 0 {
            return Err(invalid("bonus_ammo_threshold", "must be at least 1"));
        }
        if self.survival_reward_period == 0 {
            return Err(invalid("survival_reward_period", "must be at least 1"));
        }
        Ok(())
    }
}
