//! Active gate pairs on the track
//!
//! Pairs are spawned from the current gauntlet one at a time, slide toward
//! the player at track speed and resolve to exactly one crossing each.
//! Retired pairs go back to a pool so long runs do not churn allocations.

use serde::{Deserialize, Serialize};

use super::gauntlet::Gauntlet;
use super::modifier::Modifier;
use super::power::{Lane, Player};
use crate::tuning::Tuning;

/// Track geometry the field needs, copied out of [`Tuning`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub spawn_lookahead: f32,
    pub lane_offset: f32,
    pub cross_distance: f32,
    pub lane_threshold: f32,
    pub recycle_distance: f32,
}

impl From<&Tuning> for FieldGeometry {
    fn from(t: &Tuning) -> Self {
        Self {
            spawn_lookahead: t.spawn_lookahead,
            lane_offset: t.lane_offset,
            cross_distance: t.cross_distance,
            lane_threshold: t.lane_threshold,
            recycle_distance: t.recycle_distance,
        }
    }
}

/// One side of a pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub modifier: Modifier,
    /// Cleared when either side of the pair is crossed
    pub active: bool,
}

/// Two mutually exclusive gates at the same longitudinal position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatePair {
    pub id: u32,
    /// Index of the blueprint this pair was spawned from
    pub index: usize,
    /// Longitudinal position
    pub z: f32,
    pub left: Gate,
    pub right: Gate,
    /// Set once, when the player crosses either side
    pub triggered: bool,
}

impl GatePair {
    fn blank() -> Self {
        let gate = Gate {
            modifier: Modifier::add(0.0),
            active: false,
        };
        Self {
            id: 0,
            index: 0,
            z: 0.0,
            left: gate.clone(),
            right: gate,
            triggered: false,
        }
    }

    pub fn side(&self, lane: Lane) -> &Gate {
        match lane {
            Lane::Left => &self.left,
            Lane::Right => &self.right,
        }
    }

    fn retire(&mut self) {
        self.left.active = false;
        self.right.active = false;
    }
}

/// A resolved crossing, reported once per pair
#[derive(Debug, Clone, PartialEq)]
pub struct GateCrossing {
    pub pair_id: u32,
    pub index: usize,
    pub side: Lane,
    pub chosen: Modifier,
    pub other: Modifier,
}

/// Tracks spawned pairs for the current gauntlet
#[derive(Debug, Clone)]
pub struct GateField {
    geometry: FieldGeometry,
    gauntlet: Gauntlet,
    pairs: Vec<GatePair>,
    pool: Vec<GatePair>,
    spawn_index: usize,
    visible: bool,
    next_id: u32,
}

impl GateField {
    pub fn new(gauntlet: Gauntlet, tuning: &Tuning) -> Self {
        Self {
            geometry: FieldGeometry::from(tuning),
            gauntlet,
            pairs: Vec::new(),
            pool: (0..tuning.pool_size).map(|_| GatePair::blank()).collect(),
            spawn_index: 0,
            visible: true,
            next_id: 1,
        }
    }

    pub fn pairs(&self) -> &[GatePair] {
        &self.pairs
    }

    pub fn gauntlet(&self) -> &Gauntlet {
        &self.gauntlet
    }

    pub fn spawn_index(&self) -> usize {
        self.spawn_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Hide the field; nothing spawns, moves or collides until shown again
    pub fn hide_all(&mut self) {
        self.visible = false;
    }

    pub fn show_all(&mut self) {
        self.visible = true;
    }

    /// Swap in a new gauntlet and start spawning it from the top
    pub fn load(&mut self, gauntlet: Gauntlet) {
        self.pool.append(&mut self.pairs);
        self.gauntlet = gauntlet;
        self.spawn_index = 0;
    }

    /// Advance the field one tick and report crossings in track order
    pub fn update(&mut self, dt: f32, track_speed: f32, player: &Player) -> Vec<GateCrossing> {
        let mut crossings = Vec::new();
        if !self.visible {
            return crossings;
        }

        let player_z = player.pos.y;
        let ahead = self.pairs.iter().any(|p| p.z > player_z);
        if !ahead && self.spawn_index < self.gauntlet.len() {
            self.spawn_at(player_z + self.geometry.spawn_lookahead);
        }

        let travel = track_speed * dt;
        let geo = self.geometry;
        for pair in &mut self.pairs {
            let prev_z = pair.z;
            pair.z -= travel;
            if pair.triggered {
                continue;
            }

            // Swept window so a long frame cannot skip over the player
            let in_window =
                pair.z < player_z + geo.cross_distance && prev_z > player_z - geo.cross_distance;
            if !in_window {
                continue;
            }

            // Left is tested first; both sides retire together either way
            let side = [Lane::Left, Lane::Right].into_iter().find(|&lane| {
                pair.side(lane).active
                    && (lane.x(geo.lane_offset) - player.pos.x).abs() < geo.lane_threshold
            });
            if let Some(side) = side {
                let (chosen, other) = match side {
                    Lane::Left => (&pair.left, &pair.right),
                    Lane::Right => (&pair.right, &pair.left),
                };
                crossings.push(GateCrossing {
                    pair_id: pair.id,
                    index: pair.index,
                    side,
                    chosen: chosen.modifier.clone(),
                    other: other.modifier.clone(),
                });
                pair.retire();
                pair.triggered = true;
                log::debug!("Pair {} crossed on {:?}", pair.index, side);
            }
        }

        self.recycle(player_z);
        crossings
    }

    /// Place the next blueprint at `z`; out-of-range requests are logged and skipped
    pub(crate) fn spawn_at(&mut self, z: f32) {
        let index = self.spawn_index;
        self.spawn_index += 1;

        let Some(blueprint) = self.gauntlet.get(index) else {
            log::error!(
                "No gauntlet blueprint for gate {} (gauntlet has {})",
                index + 1,
                self.gauntlet.len()
            );
            return;
        };

        let mut pair = self.pool.pop().unwrap_or_else(GatePair::blank);
        pair.id = self.next_id;
        self.next_id += 1;
        pair.index = index;
        pair.z = z;
        pair.left.modifier.clone_from(&blueprint.left);
        pair.right.modifier.clone_from(&blueprint.right);
        pair.left.active = true;
        pair.right.active = true;
        pair.triggered = false;

        log::debug!(
            "Spawned pair {} at z={z}: {} | {}",
            index,
            pair.left.modifier.label,
            pair.right.modifier.label
        );
        self.pairs.push(pair);
    }

    fn recycle(&mut self, player_z: f32) {
        let cutoff = player_z - self.geometry.recycle_distance;
        let mut i = 0;
        while i < self.pairs.len() {
            if self.pairs[i].z < cutoff {
                let mut pair = self.pairs.swap_remove(i);
                if !pair.triggered {
                    log::debug!("Pair {} passed uncrossed", pair.index);
                    pair.retire();
                }
                self.pool.push(pair);
            } else {
                i += 1;
            }
        }
        // swap_remove scrambles order; keep spawn order for stable iteration
        self.pairs.sort_by_key(|p| p.id);
    }
}
