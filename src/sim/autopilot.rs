//! Demo player
//!
//! Picks the missile closest to the ground that no explosion is already
//! handling and detonates ahead of it. Used by the headless host and for
//! attract-mode runs.

use glam::Vec2;

use super::collision::point_in_circle;
use super::state::GameState;
use crate::tuning::Tuning;

/// Automatic click generator
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks to wait between clicks
    pub cooldown_ticks: u32,
    /// How far ahead of a missile to aim, in ticks of flight
    pub lead_ticks: f32,
    remaining: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            cooldown_ticks: 6,
            lead_ticks: 8.0,
            remaining: 0,
        }
    }
}

impl Autopilot {
    pub fn new(cooldown_ticks: u32, lead_ticks: f32) -> Self {
        Self {
            cooldown_ticks,
            lead_ticks,
            remaining: 0,
        }
    }

    /// Where to click this tick, if anywhere
    pub fn next_click(&mut self, state: &GameState, tuning: &Tuning) -> Option<Vec2> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return None;
        }
        if state.ammo == 0 || state.game_over {
            return None;
        }

        let max_radius = tuning.explosion_size as f32;
        // Explosions with a few ticks left still count as covering
        let fresh_until = tuning.explosion_lifetime().saturating_sub(tuning.explosion_growth * 4);

        let target = state
            .projectiles
            .iter()
            .map(|missile| missile.pos + missile.vel * self.lead_ticks)
            .filter(|aim| {
                !state
                    .blasts
                    .iter()
                    .any(|b| b.age <= fresh_until && point_in_circle(*aim, b.center, max_radius))
            })
            .min_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))?;

        self.remaining = self.cooldown_ticks;
        log::debug!("Autopilot detonating at ({:.1}, {:.1})", target.x, target.y);
        Some(target)
    }
}
