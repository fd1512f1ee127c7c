//! Per-frame view of the game for drawing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{BlastZone, GamePhase, GameState};
use crate::tuning::Tuning;

/// Linear RGB, each channel 0-1
pub type Rgb = [f32; 3];

/// Fill and edge colors of an explosion
///
/// Only the red channel moves: the fill reddens as the explosion grows while
/// the edge fades the other way.
pub fn blast_colors(blast: &BlastZone, tuning: &Tuning) -> (Rgb, Rgb) {
    let size = blast.radius(tuning);
    let total = tuning.explosion_lifetime() as f32;
    let fill = [size / (total * 2.0) + 0.5, 0.5, 0.0];
    let edge = [(total - size) / (total * 2.0) + 0.5, 0.5, 0.0];
    (fill, edge)
}

/// A missile drawn as a line from launch point to tip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub origin: Vec2,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastView {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Rgb,
    pub edge: Rgb,
}

/// A house drawn as a filled box from its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureView {
    pub corner: Vec2,
    pub width: f32,
    pub height: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub projectiles: Vec<ProjectileView>,
    pub blasts: Vec<BlastView>,
    pub structures: Vec<StructureView>,
    pub ammo: u32,
    pub houses_left: usize,
    pub score: u64,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, tuning: &Tuning, phase: GamePhase) -> Self {
        Self {
            tick: state.tick,
            phase,
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    origin: p.origin,
                    pos: p.pos,
                })
                .collect(),
            blasts: state
                .blasts
                .iter()
                .map(|b| {
                    let (fill, edge) = blast_colors(b, tuning);
                    BlastView {
                        center: b.center,
                        radius: b.radius(tuning),
                        fill,
                        edge,
                    }
                })
                .collect(),
            structures: state
                .structures
                .iter()
                .map(|s| StructureView {
                    corner: s.corner,
                    width: tuning.house_width,
                    height: tuning.house_height,
                })
                .collect(),
            ammo: state.ammo,
            houses_left: state.houses_left(),
            score: state.score,
        }
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Status readout, one line each
    pub fn status_lines(&self) -> [String; 3] {
        [
            format!("Shots left: {}", self.ammo),
            format!("Houses left: {}", self.houses_left),
            format!("Score: {}", self.score),
        ]
    }
}
