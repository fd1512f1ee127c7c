//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first reset
    #[default]
    NotStarted,
    /// Ticks advance physics and spawning
    Running,
    /// Every house is gone; state frozen until reset
    GameOver,
}

/// Drawable area, centered on the origin with Y up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0,
            "viewport must be finite and non-negative, got {width}x{height}"
        );
        Self { width, height }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive on every edge
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.half_extents();
        -half.x <= point.x && point.x <= half.x && -half.y <= point.y && point.y <= half.y
    }
}

/// An incoming missile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Current position
    pub pos: Vec2,
    /// Launch point, kept for drawing the trail
    pub origin: Vec2,
    /// Units per tick, constant for the whole flight
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(origin: Vec2, vel: Vec2) -> Self {
        assert!(origin.is_finite(), "projectile origin must be finite");
        assert!(vel.is_finite(), "projectile velocity must be finite");
        Self {
            pos: origin,
            origin,
            vel,
        }
    }

    /// Move one tick along the flight path
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }
}

/// A player-triggered explosion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastZone {
    pub center: Vec2,
    /// Grows every tick; doubles as the uncapped radius
    pub age: u32,
}

impl BlastZone {
    pub fn new(center: Vec2) -> Self {
        assert!(center.is_finite(), "blast zone center must be finite");
        Self { center, age: 0 }
    }

    /// Collision radius: the age, capped at the maximum explosion size
    #[inline]
    pub fn radius(&self, tuning: &Tuning) -> f32 {
        self.age.min(tuning.explosion_size) as f32
    }

    /// True once the explosion has outlived its linger time
    #[inline]
    pub fn is_spent(&self, tuning: &Tuning) -> bool {
        self.age > tuning.explosion_lifetime()
    }
}

/// A defended house, anchored at its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub corner: Vec2,
}

impl Structure {
    pub fn new(corner: Vec2) -> Self {
        assert!(corner.is_finite(), "structure corner must be finite");
        Self { corner }
    }
}

/// Lower-left corner of house `n`
///
/// Houses fan out from the center: 0, -1, +1, -2, +2 ... house widths apart.
pub fn house_pos(n: usize, tuning: &Tuning, viewport: Viewport) -> Vec2 {
    let step = ((n + 1) / 2) as f32;
    let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
    let x = step * sign * (tuning.house_width * 2.0);
    let y = -viewport.height / 2.0 + tuning.house_bottom_margin;
    Vec2::new(x, y)
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Missiles in flight (container order decides interception ties)
    pub projectiles: Vec<Projectile>,
    /// Active explosions
    pub blasts: Vec<BlastZone>,
    /// Surviving houses
    pub structures: Vec<Structure>,
    /// Simulation tick counter
    pub tick: u64,
    /// Explosions the player can still trigger
    pub ammo: u32,
    pub score: u64,
    /// Set once every house is gone; only a reset clears it
    pub game_over: bool,
}

impl GameState {
    /// Fresh game: full ammo, all houses standing, nothing in flight
    pub fn new(tuning: &Tuning, viewport: Viewport) -> Self {
        Self {
            projectiles: Vec::new(),
            blasts: Vec::new(),
            structures: (0..tuning.num_houses)
                .map(|n| Structure::new(house_pos(n, tuning, viewport)))
                .collect(),
            tick: 0,
            ammo: tuning.starting_ammo,
            score: 0,
            game_over: false,
        }
    }

    /// Spend one ammo on an explosion at `pos`
    ///
    /// Returns false (and changes nothing) when out of ammo.
    pub fn detonate(&mut self, pos: Vec2) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        self.blasts.push(BlastZone::new(pos));
        true
    }

    pub fn houses_left(&self) -> usize {
        self.structures.len()
    }
}
