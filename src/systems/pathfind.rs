use axial::Hex;
use log::warn;
use pathfinding::prelude::*;
use tinyvec::ArrayVec;

use crate::resources::{
    civilizations::{FactionId, FactionLookup},
    map::HexMap,
};

/// Every step between adjacent passable tiles costs the same.
pub const MOVE_COST: u32 = 1;

/// A* over the hex map. Only grassland can be entered, and a tile held by a unit of
/// another faction is a wall; tiles held by the mover's own faction can be crossed.
pub struct Pathfinder<'a> {
    map: &'a HexMap,
    factions: &'a dyn FactionLookup,
}

impl<'a> Pathfinder<'a> {
    pub fn new(map: &'a HexMap, factions: &'a dyn FactionLookup) -> Self {
        Self { map, factions }
    }

    /// Shortest path from `start` to `goal`, both ends included. Empty when either end
    /// has no tile or the goal cannot be reached; callers treat that as "cannot move".
    pub fn find_path(&self, start: Hex, goal: Hex, mover: FactionId) -> Vec<Hex> {
        if self.map.find(start).is_none() {
            warn!("path from {:?} starts off the map", start);
            return Vec::new();
        }
        let Some((path, _)) = astar(
            &start,
            |&hex| self.successors(hex, mover),
            |&hex| hex.distance(&goal) as u32,
            |&hex| hex == goal,
        ) else {
            warn!("no path from {:?} to {:?} for {:?}", start, goal, mover);
            return Vec::new();
        };
        path
    }

    /// Total cost of the shortest path, if there is one.
    pub fn path_cost(&self, start: Hex, goal: Hex, mover: FactionId) -> Option<u32> {
        let path = self.find_path(start, goal, mover);
        (!path.is_empty()).then(|| (path.len() as u32 - 1) * MOVE_COST)
    }

    /// Whether a unit of `mover` may step onto `hex` on its way somewhere.
    pub fn is_traversable(&self, hex: Hex, mover: FactionId) -> bool {
        let Some(tile) = self.map.find(hex) else { return false };
        if !tile.terrain().is_passable() { return false; }
        match tile.unit() {
            None => true,
            // an occupant nobody can vouch for blocks like an enemy
            Some(occupant) => self.factions.faction_of(occupant) == Some(mover),
        }
    }

    fn successors(&self, hex: Hex, mover: FactionId) -> ArrayVec<[(Hex, u32); 6]> {
        hex.neighbors().into_iter()
            .filter(|&it| self.is_traversable(it, mover))
            .map(|it| (it, MOVE_COST))
            .collect()
    }
}
