//! Score ledger
//!
//! Points come from intercepted missiles and from surviving; every
//! `bonus_ammo_threshold` points buys one more explosion.

use super::state::GameState;
use crate::tuning::Tuning;

/// Add `points` to the score, granting bonus ammo on a threshold crossing
///
/// At most one bonus is granted per call even if the award spans several
/// thresholds. Returns whether a bonus was granted.
pub fn reward(state: &mut GameState, points: u64, tuning: &Tuning) -> bool {
    let threshold = tuning.bonus_ammo_threshold;
    let old_score = state.score;
    state.score += points;

    if old_score / threshold < state.score / threshold {
        state.ammo += 1;
        log::debug!("Score {} reached, bonus explosion ({} left)", state.score, state.ammo);
        true
    } else {
        false
    }
}
