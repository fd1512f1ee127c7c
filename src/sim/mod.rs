//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, paced by the host
//! - Seeded RNG only
//! - Stable iteration order (container order decides ties)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{point_in_circle, point_in_rect};
pub use physics::{TickReport, advance};
pub use score::reward;
pub use spawn::{launch, maybe_spawn, spawn_period};
pub use state::{BlastZone, GamePhase, GameState, Projectile, Structure, Viewport, house_pos};
pub use tick::{DEFAULT_QUEUE_CAPACITY, InputEvent, InputSender, Simulation};
