//! Per-tick physics
//!
//! Order matters: explosions claim missiles first, then surviving missiles
//! hit houses or move, then the score and terminal checks run.

use super::collision::{point_in_circle, point_in_rect};
use super::score::reward;
use super::state::{GameState, Viewport};
use crate::tuning::Tuning;

/// What happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Missiles destroyed by explosions
    pub intercepted: u32,
    /// Houses destroyed by missiles
    pub structures_destroyed: u32,
    /// Missiles that left the screen
    pub clipped: u32,
    /// Points awarded this tick
    pub points: u64,
}

/// Advance the world by one tick
///
/// Does nothing on a finished game; the loop should have stopped calling.
pub fn advance(state: &mut GameState, tuning: &Tuning, viewport: Viewport) -> TickReport {
    let mut report = TickReport::default();
    if state.game_over {
        log::warn!("advance called after game over (tick {})", state.tick);
        return report;
    }

    update_blasts(state, tuning, &mut report);
    update_projectiles(state, tuning, viewport, &mut report);
    update_score(state, tuning, &mut report);

    log::trace!("tick {}: {:?}", state.tick, report);
    report
}

/// Explosions destroy missiles, then grow or burn out
fn update_blasts(state: &mut GameState, tuning: &Tuning, report: &mut TickReport) {
    let mut alive = vec![true; state.projectiles.len()];
    let mut next_blasts = Vec::with_capacity(state.blasts.len());

    for mut blast in std::mem::take(&mut state.blasts) {
        let radius = blast.radius(tuning);

        // Each explosion takes at most one missile per tick
        let hit = (0..state.projectiles.len())
            .find(|&i| alive[i] && point_in_circle(state.projectiles[i].pos, blast.center, radius));
        if let Some(i) = hit {
            alive[i] = false;
            log::debug!(
                "Missile intercepted at ({:.1}, {:.1})",
                state.projectiles[i].pos.x,
                state.projectiles[i].pos.y
            );
            report.intercepted += 1;
            report.points += tuning.missile_kill_reward;
            reward(state, tuning.missile_kill_reward, tuning);
        }

        blast.age += tuning.explosion_growth;
        if !blast.is_spent(tuning) {
            next_blasts.push(blast);
        }
    }
    state.blasts = next_blasts;

    if report.intercepted > 0 {
        state.projectiles = std::mem::take(&mut state.projectiles)
            .into_iter()
            .zip(alive)
            .filter_map(|(missile, alive)| alive.then_some(missile))
            .collect();
    }
}

/// Missiles flatten houses, fly on, or leave the screen
fn update_projectiles(
    state: &mut GameState,
    tuning: &Tuning,
    viewport: Viewport,
    report: &mut TickReport,
) {
    let in_flight = std::mem::take(&mut state.projectiles);
    let mut next_projectiles = Vec::with_capacity(in_flight.len());

    for mut missile in in_flight {
        let hit = state.structures.iter().position(|house| {
            point_in_rect(missile.pos, house.corner, tuning.house_width, tuning.house_height)
        });

        if let Some(i) = hit {
            let house = state.structures.remove(i);
            log::info!(
                "House at ({:.0}, {:.0}) destroyed, {} left",
                house.corner.x,
                house.corner.y,
                state.structures.len()
            );
            report.structures_destroyed += 1;
        } else if viewport.contains(missile.pos) {
            missile.step();
            next_projectiles.push(missile);
        } else {
            report.clipped += 1;
        }
    }

    state.projectiles = next_projectiles;
}

/// Survival bonus and the game-over check
fn update_score(state: &mut GameState, tuning: &Tuning, report: &mut TickReport) {
    if state.structures.is_empty() {
        state.game_over = true;
    }

    let period = tuning.survival_reward_period;
    if state.tick % period == period - 1 {
        report.points += tuning.survival_reward;
        reward(state, tuning.survival_reward, tuning);
    }

    if state.game_over {
        log::info!("All houses destroyed at tick {}, score {}", state.tick, state.score);
    }
}
