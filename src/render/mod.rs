//! Rendering boundary
//!
//! The simulation never draws. Each tick the host takes a [`FrameSnapshot`]
//! and draws it however it likes.

pub mod snapshot;

pub use snapshot::{BlastView, FrameSnapshot, ProjectileView, Rgb, StructureView, blast_colors};
