//! Battle map interface and the hex-grid implementation
//!
//! The bots only ever read the map through [`BattleMap`]. `HexGridMap` is a
//! plain terrain grid good enough for tests, scenarios and the CLI; a
//! hosting game can plug in its own map instead.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::map::hex::{HexCoordinates, HexPosition};
use crate::map::path::PathSegment;
use crate::map::pathfinding;
use crate::map::terrain::Terrain;

/// Intervening woods value that blocks line of sight
pub const LOS_BLOCKING_WOODS: i32 = 3;

/// Read-only view of the battlefield
pub trait BattleMap: Send + Sync {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Terrain of a hex, None when off the map
    fn terrain_at(&self, coordinates: HexCoordinates) -> Option<Terrain>;

    fn contains(&self, coordinates: HexCoordinates) -> bool {
        coordinates.q >= 1
            && coordinates.r >= 1
            && coordinates.q <= self.width()
            && coordinates.r <= self.height()
    }

    /// All hexes in scan order: columns left to right, each top to bottom
    fn hexes(&self) -> Vec<HexCoordinates> {
        let mut hexes = Vec::with_capacity((self.width() * self.height()).max(0) as usize);
        for q in 1..=self.width() {
            for r in 1..=self.height() {
                hexes.push(HexCoordinates::new(q, r));
            }
        }
        hexes
    }

    /// Hexes a ground move can reach within `budget`, with their cheapest cost
    fn reachable_hexes(
        &self,
        from: HexPosition,
        budget: u32,
        blocked: &[HexCoordinates],
    ) -> Vec<(HexCoordinates, u32)> {
        pathfinding::reachable_hexes(from, budget, |c| self.entry_cost(c, blocked))
    }

    /// Cheapest ground path to a hex and facing within `budget`
    fn find_path(
        &self,
        from: HexPosition,
        to: HexPosition,
        budget: u32,
        blocked: &[HexCoordinates],
    ) -> Option<Vec<PathSegment>> {
        pathfinding::find_path(from, to, budget, |c| self.entry_cost(c, blocked))
    }

    fn find_jump_path(
        &self,
        from: HexPosition,
        to: HexPosition,
        budget: u32,
        blocked: &[HexCoordinates],
    ) -> Option<Vec<PathSegment>> {
        pathfinding::jump_path(from, to, budget, |c| {
            self.contains(c) && !blocked.contains(&c)
        })
    }

    /// MP to enter a hex, None if it is off the map or blocked
    fn entry_cost(&self, coordinates: HexCoordinates, blocked: &[HexCoordinates]) -> Option<u32> {
        if blocked.contains(&coordinates) {
            return None;
        }
        self.terrain_at(coordinates).map(|t| t.movement_cost())
    }

    /// Sum of woods between two hexes, endpoints excluded
    fn intervening_woods(&self, from: HexCoordinates, to: HexCoordinates) -> i32 {
        let line = from.line_to(&to);
        line.iter()
            .skip(1)
            .take(line.len().saturating_sub(2))
            .filter_map(|c| self.terrain_at(*c))
            .map(|t| t.woods_value())
            .sum()
    }

    fn has_line_of_sight(&self, from: HexCoordinates, to: HexCoordinates) -> bool {
        self.intervening_woods(from, to) < LOS_BLOCKING_WOODS
    }

    /// To-hit modifier from terrain between and at the target
    fn intervening_modifier(&self, from: HexCoordinates, to: HexCoordinates) -> i32 {
        let at_target = self.terrain_at(to).map(|t| t.woods_value()).unwrap_or(0);
        self.intervening_woods(from, to) + at_target
    }
}

/// Rectangular terrain grid; hexes without an entry are clear
#[derive(Debug, Clone)]
pub struct HexGridMap {
    width: i32,
    height: i32,
    terrain: HashMap<HexCoordinates, Terrain>,
}

impl HexGridMap {
    /// Create a map of open terrain
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            terrain: HashMap::new(),
        }
    }

    /// Set terrain at a coordinate; ignored off the map
    pub fn set_terrain(&mut self, coordinates: HexCoordinates, terrain: Terrain) {
        if !self.contains(coordinates) {
            return;
        }
        if terrain == Terrain::Clear {
            self.terrain.remove(&coordinates);
        } else {
            self.terrain.insert(coordinates, terrain);
        }
    }
}

impl BattleMap for HexGridMap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn terrain_at(&self, coordinates: HexCoordinates) -> Option<Terrain> {
        if !self.contains(coordinates) {
            return None;
        }
        Some(self.terrain.get(&coordinates).copied().unwrap_or_default())
    }
}

/// A single non-clear hex in a map definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainPatch {
    pub q: i32,
    pub r: i32,
    pub terrain: Terrain,
}

/// Serializable description of a `HexGridMap`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDefinition {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub terrain: Vec<TerrainPatch>,
}

impl MapDefinition {
    pub fn build(&self) -> HexGridMap {
        let mut map = HexGridMap::new(self.width, self.height);
        for patch in &self.terrain {
            map.set_terrain(HexCoordinates::new(patch.q, patch.r), patch.terrain);
        }
        map
    }
}
