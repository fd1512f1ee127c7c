//! Game loop
//!
//! [`Simulation`] owns the one [`GameState`] of a run. Hosts push input
//! through an [`InputSender`] from any thread; each [`Simulation::tick`]
//! drains the queue first, so state has a single writer per tick.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::physics::{self, TickReport};
use super::spawn;
use super::state::{GamePhase, GameState, Viewport};
use crate::render::FrameSnapshot;
use crate::tuning::Tuning;

/// Default capacity of the input queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Input from the host, applied at the start of the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer click in game coordinates
    Click { x: f32, y: f32 },
    /// Restart key
    Restart,
}

/// Cloneable handle for delivering input to a [`Simulation`]
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: SyncSender<InputEvent>,
}

impl InputSender {
    /// Queue an event; returns false if it was dropped
    pub fn send(&self, event: InputEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                log::warn!("Input queue full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(event)) => {
                log::debug!("Simulation gone, dropping {:?}", event);
                false
            }
        }
    }

    pub fn click(&self, x: f32, y: f32) -> bool {
        self.send(InputEvent::Click { x, y })
    }

    pub fn restart(&self) -> bool {
        self.send(InputEvent::Restart)
    }
}

/// A running game: state, balance, RNG and input queue
#[derive(Debug)]
pub struct Simulation {
    tuning: Tuning,
    state: GameState,
    phase: GamePhase,
    seed: u64,
    rng: Pcg32,
    input_tx: SyncSender<InputEvent>,
    input_rx: Receiver<InputEvent>,
}

impl Simulation {
    /// Create a simulation waiting for its first reset
    ///
    /// # Panics
    ///
    /// If `tuning` fails [`Tuning::validate`].
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Self {
        Self::with_queue_capacity(tuning, viewport, seed, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(
        tuning: Tuning,
        viewport: Viewport,
        seed: u64,
        capacity: usize,
    ) -> Self {
        if let Err(err) = tuning.validate() {
            panic!("{err}");
        }
        let (input_tx, input_rx) = mpsc::sync_channel(capacity.max(1));
        let state = GameState::new(&tuning, viewport);
        Self {
            tuning,
            state,
            phase: GamePhase::NotStarted,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            input_tx,
            input_rx,
        }
    }

    /// Start a fresh game from any phase
    pub fn reset(&mut self, viewport: Viewport) {
        self.state = GameState::new(&self.tuning, viewport);
        self.phase = GamePhase::Running;
        log::info!(
            "New game: {} houses, {} explosions",
            self.state.structures.len(),
            self.state.ammo
        );
    }

    /// Handle for queuing input
    pub fn input(&self) -> InputSender {
        InputSender {
            tx: self.input_tx.clone(),
        }
    }

    /// Run one tick: apply queued input, then physics, then spawning
    ///
    /// Returns the physics report, or `None` when the game is not running.
    pub fn tick(&mut self, viewport: Viewport) -> Option<TickReport> {
        self.drain_input(viewport);

        if self.phase != GamePhase::Running {
            return None;
        }

        let report = physics::advance(&mut self.state, &self.tuning, viewport);
        // Nothing launches on the losing tick, so the tick counter stays put
        if self.state.game_over {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over at tick {}: score {}",
                self.state.tick,
                self.state.score
            );
        } else {
            spawn::maybe_spawn(&mut self.state, &mut self.rng, &self.tuning, viewport);
        }

        Some(report)
    }

    fn drain_input(&mut self, viewport: Viewport) {
        // We hold a sender ourselves, so the channel never disconnects
        while let Ok(event) = self.input_rx.try_recv() {
            self.apply(event, viewport);
        }
    }

    fn apply(&mut self, event: InputEvent, viewport: Viewport) {
        match event {
            InputEvent::Restart => self.reset(viewport),
            InputEvent::Click { x, y } => {
                if self.phase != GamePhase::Running {
                    log::debug!("Ignoring click while {:?}", self.phase);
                    return;
                }
                let pos = Vec2::new(x, y);
                if !pos.is_finite() {
                    log::warn!("Ignoring click at non-finite position ({x}, {y})");
                    return;
                }
                if self.state.detonate(pos) {
                    log::debug!("Explosion at ({x:.1}, {y:.1}), {} left", self.state.ammo);
                }
            }
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Seed the spawn RNG was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, &self.tuning, self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn running(seed: u64) -> Simulation {
        let mut sim = Simulation::new(Tuning::default(), viewport(), seed);
        sim.reset(viewport());
        sim
    }

    #[test]
    fn test_not_started_until_reset() {
        let mut sim = Simulation::new(Tuning::default(), viewport(), 1);
        assert_eq!(sim.phase(), GamePhase::NotStarted);
        assert!(sim.tick(viewport()).is_none());
        assert_eq!(sim.state().tick, 0);

        // Clicks before the game starts are ignored
        sim.input().click(0.0, 0.0);
        sim.tick(viewport());
        assert!(sim.state().blasts.is_empty());

        sim.input().restart();
        assert!(sim.tick(viewport()).is_some());
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.state().tick, 1);
    }

    #[test]
    #[should_panic(expected = "survival_reward_period")]
    fn test_rejects_zero_survival_period() {
        let tuning = Tuning {
            survival_reward_period: 0,
            ..Default::default()
        };
        Simulation::new(tuning, viewport(), 1);
    }

    #[test]
    #[should_panic(expected = "explosion_growth")]
    fn test_rejects_explosions_that_never_expire() {
        let tuning = Tuning {
            explosion_growth: 0,
            ..Default::default()
        };
        Simulation::with_queue_capacity(tuning, viewport(), 1, 4);
    }

    #[test]
    #[should_panic(expected = "bonus_ammo_threshold")]
    fn test_rejects_zero_bonus_threshold() {
        let tuning = Tuning {
            bonus_ammo_threshold: 0,
            ..Default::default()
        };
        Simulation::new(tuning, viewport(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut sim = running(5);
        for _ in 0..120 {
            sim.tick(viewport());
        }
        sim.reset(viewport());
        let first = sim.state().clone();
        sim.reset(viewport());
        assert_eq!(sim.state(), &first);
        assert_eq!(first.ammo, 20);
        assert_eq!(first.structures.len(), 5);
        assert_eq!(first.tick, 0);
        assert_eq!(first.score, 0);
    }

    #[test]
    fn test_click_spends_ammo_next_tick() {
        let mut sim = running(5);
        let input = sim.input();
        assert!(input.click(10.0, 20.0));
        assert_eq!(sim.state().ammo, 20);

        sim.tick(viewport());
        assert_eq!(sim.state().ammo, 19);
        assert_eq!(sim.state().blasts.len(), 1);
        // Grown once by the same tick's physics
        assert_eq!(sim.state().blasts[0].age, 5);
    }

    #[test]
    fn test_click_without_ammo_is_ignored() {
        let mut sim = running(5);
        sim.state_mut().ammo = 0;
        sim.input().click(10.0, 20.0);
        sim.tick(viewport());
        assert_eq!(sim.state().ammo, 0);
        assert!(sim.state().blasts.is_empty());
    }

    #[test]
    fn test_full_queue_drops_events() {
        let mut sim = Simulation::with_queue_capacity(Tuning::default(), viewport(), 5, 2);
        sim.reset(viewport());
        let input = sim.input();
        assert!(input.click(0.0, 0.0));
        assert!(input.click(1.0, 0.0));
        assert!(!input.click(2.0, 0.0));

        sim.tick(viewport());
        assert_eq!(sim.state().blasts.len(), 2);
        assert!(input.click(3.0, 0.0));
    }

    #[test]
    fn test_input_from_another_thread() {
        let mut sim = running(5);
        let input = sim.input();
        std::thread::spawn(move || {
            input.click(-40.0, 60.0);
        })
        .join()
        .unwrap();

        sim.tick(viewport());
        assert_eq!(sim.state().blasts.len(), 1);
        assert_eq!(sim.state().blasts[0].center, Vec2::new(-40.0, 60.0));
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut sim = running(5);
        let corners: Vec<Vec2> = sim.state().structures.iter().map(|s| s.corner).collect();
        for corner in corners {
            sim.state_mut()
                .projectiles
                .push(crate::sim::Projectile::new(corner + Vec2::ONE, Vec2::ZERO));
        }

        let report = sim.tick(viewport()).unwrap();
        assert_eq!(report.structures_destroyed, 5);
        assert_eq!(sim.phase(), GamePhase::GameOver);
        assert!(sim.state().game_over);
        // The losing tick launches nothing and does not advance the clock
        assert_eq!(sim.state().tick, 0);
        assert!(sim.state().projectiles.is_empty());

        let frozen = sim.state().clone();
        sim.input().click(0.0, 0.0);
        for _ in 0..10 {
            assert!(sim.tick(viewport()).is_none());
        }
        assert_eq!(sim.state(), &frozen);
        assert!(sim.snapshot().game_over());

        sim.input().restart();
        sim.tick(viewport());
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.state().structures.len(), 5);
        assert!(!sim.state().game_over);
    }

    #[test]
    fn test_determinism() {
        // Two simulations with the same seed and input stay identical
        let mut sim1 = running(99999);
        let mut sim2 = running(99999);

        for t in 0..600 {
            if t % 40 == 10 {
                sim1.input().click(0.0, 100.0);
                sim2.input().click(0.0, 100.0);
            }
            sim1.tick(viewport());
            sim2.tick(viewport());
        }

        assert_eq!(sim1.state(), sim2.state());
        assert_eq!(sim1.phase(), sim2.phase());
        assert!(sim1.state().tick > 0);
    }
}
