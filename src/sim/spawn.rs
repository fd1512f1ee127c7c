//! Enemy launch schedule
//!
//! Missiles launch from just below the top edge, aimed somewhere into a
//! downward cone, and come faster as the game goes on.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Projectile, Viewport};
use crate::heading_to_velocity;
use crate::tuning::Tuning;

/// Ticks between launches at `tick`
///
/// `clamp(base - tick / divisor, min, max)`, never below 1.
pub fn spawn_period(tick: u64, tuning: &Tuning) -> u64 {
    let elapsed = i64::try_from(tick / tuning.spawn_period_divisor.max(1)).unwrap_or(i64::MAX);
    let raw = tuning.spawn_base_period.saturating_sub(elapsed);
    let min = i64::try_from(tuning.spawn_min_period).unwrap_or(i64::MAX);
    let max = i64::try_from(tuning.spawn_max_period).unwrap_or(i64::MAX);
    raw.max(min).min(max).max(1) as u64
}

/// Build a missile launched from `x` along a compass heading in degrees
pub fn launch(x: f32, angle_degrees: i32, tuning: &Tuning, viewport: Viewport) -> Projectile {
    let origin = Vec2::new(x, viewport.height / 2.0 - tuning.missile_top_margin);
    let vel = heading_to_velocity(angle_degrees as f32, tuning.missile_speed);
    Projectile::new(origin, vel)
}

/// Launch a missile if this tick is on the schedule, then advance the clock
///
/// Returns the launched missile, if any. The tick counter moves forward on
/// every call, launch or not.
pub fn maybe_spawn<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    tuning: &Tuning,
    viewport: Viewport,
) -> Option<Projectile> {
    if state.game_over {
        log::warn!("maybe_spawn called after game over (tick {})", state.tick);
        return None;
    }

    let period = spawn_period(state.tick, tuning);
    let launched = if state.tick % period == 0 {
        // Somewhere over the middle third of the screen
        let third = viewport.width / 3.0;
        let x = rng.random_range((-third).floor() as i32..=third.floor() as i32);
        let angle = rng.random_range(tuning.missile_min_angle..=tuning.missile_max_angle);

        let missile = launch(x as f32, angle, tuning, viewport);
        log::debug!(
            "tick {}: missile launched from x={} heading {}° (period {})",
            state.tick,
            x,
            angle,
            period
        );
        state.projectiles.push(missile);
        Some(missile)
    } else {
        None
    };

    state.tick += 1;
    launched
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameState, Tuning, Viewport) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        (GameState::new(&tuning, viewport), tuning, viewport)
    }

    #[test]
    fn test_spawn_period_schedule() {
        let tuning = Tuning::default();
        assert_eq!(spawn_period(0, &tuning), 85);
        assert_eq!(spawn_period(19, &tuning), 85);
        assert_eq!(spawn_period(20, &tuning), 84);
        assert_eq!(spawn_period(1300, &tuning), 20);
        assert_eq!(spawn_period(1600, &tuning), 5);
        assert_eq!(spawn_period(3000, &tuning), 5);
        assert_eq!(spawn_period(u64::MAX, &tuning), 5);
    }

    #[test]
    fn test_spawn_period_never_zero() {
        let tuning = Tuning {
            spawn_min_period: 0,
            spawn_max_period: 0,
            ..Default::default()
        };
        assert_eq!(spawn_period(5000, &tuning), 1);
    }

    #[test]
    fn test_launch_straight_down() {
        let (_, tuning, viewport) = setup();
        let missile = launch(0.0, 180, &tuning, viewport);
        assert_eq!(missile.origin, Vec2::new(0.0, 270.0));
        assert_eq!(missile.pos, missile.origin);
        assert!(missile.vel.x.abs() < 1e-5);
        assert!((missile.vel.y + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_launch_edge_of_cone() {
        let (_, tuning, viewport) = setup();
        let missile = launch(-100.0, 135, &tuning, viewport);
        let expected = 3.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(missile.origin, Vec2::new(-100.0, 270.0));
        assert!((missile.vel.x - expected).abs() < 1e-5);
        assert!((missile.vel.y + expected).abs() < 1e-5);

        let missile = launch(-100.0, 225, &tuning, viewport);
        assert!((missile.vel.x + expected).abs() < 1e-5);
        assert!((missile.vel.y + expected).abs() < 1e-5);
    }

    #[test]
    fn test_spawns_on_schedule_and_always_ticks() {
        let (mut state, tuning, viewport) = setup();
        let mut rng = Pcg32::seed_from_u64(7);

        let first = maybe_spawn(&mut state, &mut rng, &tuning, viewport);
        assert!(first.is_some());
        assert_eq!(state.tick, 1);
        assert_eq!(state.projectiles.len(), 1);

        let second = maybe_spawn(&mut state, &mut rng, &tuning, viewport);
        assert!(second.is_none());
        assert_eq!(state.tick, 2);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_launch_count_matches_schedule() {
        let (mut state, tuning, viewport) = setup();
        let mut rng = Pcg32::seed_from_u64(11);

        let expected = (0..2000u64)
            .filter(|&t| t % spawn_period(t, &tuning) == 0)
            .count();
        let launched = (0..2000)
            .filter_map(|_| maybe_spawn(&mut state, &mut rng, &tuning, viewport))
            .count();
        assert_eq!(launched, expected);
        assert_eq!(state.tick, 2000);
    }

    #[test]
    fn test_launches_stay_in_bounds() {
        let (mut state, tuning, viewport) = setup();
        let mut rng = Pcg32::seed_from_u64(3);

        for _ in 0..200 {
            state.tick = 0;
            let missile = maybe_spawn(&mut state, &mut rng, &tuning, viewport).unwrap();
            assert!((-267.0..=266.0).contains(&missile.origin.x));
            assert_eq!(missile.origin.x.fract(), 0.0);
            assert_eq!(missile.origin.y, 270.0);
            assert!((missile.vel.length() - 3.0).abs() < 1e-4);
            assert!(missile.vel.y < 0.0);
        }
    }

    #[test]
    fn test_launch_uses_x_then_angle_draws() {
        let (mut state, tuning, viewport) = setup();
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut expected_rng = Pcg32::seed_from_u64(2024);

        for _ in 0..20 {
            state.tick = 0;
            let x: i32 = expected_rng.random_range(-267..=266);
            let angle: i32 = expected_rng.random_range(135..=225);

            let missile = maybe_spawn(&mut state, &mut rng, &tuning, viewport).unwrap();
            assert_eq!(missile, launch(x as f32, angle, &tuning, viewport));
            assert_eq!(missile.origin, Vec2::new(x as f32, 270.0));
            assert_eq!(state.projectiles.last(), Some(&missile));
        }
    }

    #[test]
    fn test_same_seed_same_launches() {
        let (mut a, tuning, viewport) = setup();
        let mut b = a.clone();
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);

        for _ in 0..500 {
            maybe_spawn(&mut a, &mut rng_a, &tuning, viewport);
            maybe_spawn(&mut b, &mut rng_b, &tuning, viewport);
        }
        assert_eq!(a, b);
        assert!(!a.projectiles.is_empty());
    }

    #[test]
    fn test_no_spawn_after_game_over() {
        let (mut state, tuning, viewport) = setup();
        let mut rng = Pcg32::seed_from_u64(1);
        state.game_over = true;

        assert!(maybe_spawn(&mut state, &mut rng, &tuning, viewport).is_none());
        assert_eq!(state.tick, 0);
        assert!(state.projectiles.is_empty());
    }
}
