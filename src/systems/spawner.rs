use axial::Hex;
use log::{debug, warn};

use crate::{
    resources::{
        civilizations::{Civilizations, FactionId},
        map::HexMap,
        units::{UnitId, Units},
    },
    systems::orders::MoveOrders,
};

/// Places a new unit for `faction` on the first free grassland tile within `range` of `near`,
/// scanning outward ring by ring. Tiles reserved by an in-flight move are skipped.
pub fn spawn_unit(
    map: &mut HexMap,
    units: &mut Units,
    civs: &mut Civilizations,
    orders: &MoveOrders,
    faction: FactionId,
    near: Hex,
    range: u32,
) -> Option<UnitId> {
    if civs.get(faction).is_none() {
        warn!("cannot spawn for unknown {:?}", faction);
        return None;
    }

    let Some(hex) = near.spiral(range).into_iter().find(|&hex| {
        map.find(hex).is_some_and(|tile| tile.terrain().is_passable() && !tile.is_occupied())
            && !orders.is_claimed(hex)
    }) else {
        warn!("no free tile within {} of {:?} for {:?}", range, near, faction);
        return None;
    };

    let id = units.insert(faction, hex);
    if let Some(tile) = map.find_mut(hex) { tile.occupy(id); }
    civs.add_unit(faction, id);
    debug!("spawned {:?} for {:?} at {:?}", id, faction, hex);
    Some(id)
}
