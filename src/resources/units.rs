use std::collections::HashMap;

use axial::Hex;
use serde::{Deserialize, Serialize};

use crate::resources::civilizations::{FactionId, FactionLookup};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct UnitId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    pub id: UnitId,
    pub faction: FactionId,
    /// Last tile the unit settled on; stays put while a move order is in flight.
    pub position: Hex,
}

/// Registry of every unit in the session and where it last settled.
#[derive(Debug, Default)]
pub struct Units {
    next_id: u32,
    units: HashMap<UnitId, Unit>,
}

impl Units {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, faction: FactionId, position: Hex) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.insert(id, Unit { id, faction, position });
        id
    }

    pub(crate) fn set_position(&mut self, id: UnitId, position: Hex) {
        if let Some(unit) = self.units.get_mut(&id) { unit.position = position; }
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn position_of(&self, id: UnitId) -> Option<Hex> {
        self.units.get(&id).map(|unit| unit.position)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Units in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        let mut units: Vec<&Unit> = self.units.values().collect();
        units.sort_by_key(|unit| unit.id);
        units.into_iter()
    }

    pub fn of_faction(&self, faction: FactionId) -> impl Iterator<Item = &Unit> {
        self.iter().filter(move |unit| unit.faction == faction)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }
}

impl FactionLookup for Units {
    fn faction_of(&self, unit: UnitId) -> Option<FactionId> {
        self.units.get(&unit).map(|unit| unit.faction)
    }
}
