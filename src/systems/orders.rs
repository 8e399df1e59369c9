//! # Move Orders
//!
//! Tracks which units are in transit and where they are headed. A unit is either
//! idle (standing on, and occupying, its tile) or moving (its old tile vacated and
//! its destination reserved here). Requests are validated in full before anything
//! is touched, so a rejected request never changes the map, the units or the orders.
//!
//! Destinations are exclusive: two units can never head for the same tile at once.
//! Intermediate tiles are not reserved; occupancy is only enforced on arrival.

use std::collections::HashMap;

use axial::Hex;
use bimap::BiHashMap;
use log::{debug, info};
use thiserror::Error;

use crate::{
    resources::{
        map::HexMap,
        units::{UnitId, Units},
    },
    systems::pathfind::Pathfinder,
};

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum MoveError {
    #[error("unknown unit {0:?}")]
    UnknownUnit(UnitId),
    #[error("no tile at {0:?}")]
    MissingTile(Hex),
    #[error("{0:?} is occupied")]
    TargetOccupied(Hex),
    #[error("{0:?} is already the destination of another move")]
    TargetClaimed(Hex),
    #[error("{0:?} is already moving")]
    AlreadyMoving(UnitId),
    #[error("no path to {0:?}")]
    NoPath(Hex),
    #[error("{0:?} has no move in flight")]
    NotMoving(UnitId),
    #[error("cannot stop at {0:?}")]
    StopTileUnavailable(Hex),
}

/// In-flight moves, unit → destination. Both sides are unique.
#[derive(Debug, Default)]
pub struct MoveOrders {
    orders: BiHashMap<UnitId, Hex>,
    // accepted route per order; a cancelled unit may only stop on one of these tiles
    paths: HashMap<UnitId, Vec<Hex>>,
}

impl MoveOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and starts a move. On success the unit's tile is vacated, the target is
    /// reserved, and the inclusive start..=target path is returned for the movement driver.
    pub fn request_move(&mut self, map: &mut HexMap, units: &Units, unit: UnitId, target: Hex) -> Result<Vec<Hex>, MoveError> {
        let &mover = units.get(unit).ok_or(MoveError::UnknownUnit(unit))?;
        if self.orders.contains_left(&unit) { return Err(MoveError::AlreadyMoving(unit)); }
        let tile = map.find(target).ok_or(MoveError::MissingTile(target))?;
        if tile.is_occupied() { return Err(MoveError::TargetOccupied(target)); }
        if self.orders.contains_right(&target) { return Err(MoveError::TargetClaimed(target)); }

        let path = Pathfinder::new(map, units).find_path(mover.position, target, mover.faction);
        if path.is_empty() { return Err(MoveError::NoPath(target)); }

        if let Some(start) = map.find_mut(mover.position) {
            if start.unit() == Some(unit) { start.vacate(); }
        }
        self.orders.insert(unit, target);
        self.paths.insert(unit, path.clone());
        debug!("{:?} moving {:?} -> {:?} in {} steps", unit, mover.position, target, path.len() - 1);
        Ok(path)
    }

    /// Called by the movement driver once the unit has walked its whole path: the unit
    /// settles on its destination and the order is dropped.
    pub fn complete_move(&mut self, map: &mut HexMap, units: &mut Units, unit: UnitId) -> Result<Hex, MoveError> {
        let &target = self.orders.get_by_left(&unit).ok_or(MoveError::NotMoving(unit))?;
        let tile = map.find_mut(target).ok_or(MoveError::MissingTile(target))?;
        if tile.unit().is_some_and(|other| other != unit) { return Err(MoveError::TargetOccupied(target)); }

        tile.occupy(unit);
        units.set_position(unit, target);
        self.forget(unit);
        info!("{:?} arrived at {:?}", unit, target);
        Ok(target)
    }

    /// Stops a unit short of its destination on `stopped_at`, the last tile it reached.
    /// Refused without side effects when that tile is not on the accepted path or can't
    /// hold the unit; the driver should then carry on walking.
    pub fn cancel_move(&mut self, map: &mut HexMap, units: &mut Units, unit: UnitId, stopped_at: Hex) -> Result<(), MoveError> {
        let &target = self.orders.get_by_left(&unit).ok_or(MoveError::NotMoving(unit))?;
        if !self.paths.get(&unit).is_some_and(|path| path.contains(&stopped_at)) {
            return Err(MoveError::StopTileUnavailable(stopped_at));
        }
        if stopped_at != target && self.orders.contains_right(&stopped_at) {
            return Err(MoveError::StopTileUnavailable(stopped_at));
        }
        let tile = map.find_mut(stopped_at)
            .filter(|tile| tile.terrain().is_passable() && !tile.is_occupied())
            .ok_or(MoveError::StopTileUnavailable(stopped_at))?;

        tile.occupy(unit);
        units.set_position(unit, stopped_at);
        self.forget(unit);
        info!("{:?} stopped at {:?} instead of {:?}", unit, stopped_at, target);
        Ok(())
    }

    fn forget(&mut self, unit: UnitId) {
        self.orders.remove_by_left(&unit);
        self.paths.remove(&unit);
    }

    /// The inclusive start..=target route accepted for an in-flight move.
    pub fn path_of(&self, unit: UnitId) -> Option<&[Hex]> {
        self.paths.get(&unit).map(Vec::as_slice)
    }

    pub fn target_of(&self, unit: UnitId) -> Option<Hex> {
        self.orders.get_by_left(&unit).copied()
    }

    pub fn is_moving(&self, unit: UnitId) -> bool {
        self.orders.contains_left(&unit)
    }

    /// Whether some in-flight move is headed for `hex`.
    pub fn is_claimed(&self, hex: Hex) -> bool {
        self.orders.contains_right(&hex)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn clear(&mut self) {
        self.orders.clear();
        self.paths.clear();
    }
}
