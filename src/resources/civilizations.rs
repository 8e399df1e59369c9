use std::collections::HashMap;

use axial::Hex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::resources::{
    buildings::{Building, BuildingId, BuildingKind, DEFAULT_HEALTH},
    map::HexMap,
    units::UnitId,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct FactionId(pub u32);

/// Answers "who owns this unit" for pathfinding's occupancy rule.
pub trait FactionLookup {
    fn faction_of(&self, unit: UnitId) -> Option<FactionId>;
}

impl FactionLookup for HashMap<UnitId, FactionId> {
    fn faction_of(&self, unit: UnitId) -> Option<FactionId> {
        self.get(&unit).copied()
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CivilizationKind {
    Rumos,
    Veltran,
    Aruna,
}

impl CivilizationKind {
    pub const ALL: [CivilizationKind; 3] = [
        CivilizationKind::Rumos,
        CivilizationKind::Veltran,
        CivilizationKind::Aruna,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Territory tint as RGB.
    pub fn colour(&self) -> [u8; 3] {
        match self {
            CivilizationKind::Rumos => [0xf0, 0xdb, 0x7d],
            CivilizationKind::Veltran => [0x74, 0x30, 0xff],
            CivilizationKind::Aruna => [0x21, 0xd0, 0xff],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Civilization {
    pub id: FactionId,
    pub kind: CivilizationKind,
    pub is_player: bool,
    pub capital: Option<Hex>,
    /// The city building standing on `capital`.
    pub capital_city: Option<BuildingId>,
    pub territory: Vec<Hex>,
    pub units: Vec<UnitId>,
    pub buildings: Vec<BuildingId>,
}

impl Civilization {
    fn new(id: FactionId, kind: CivilizationKind, is_player: bool) -> Self {
        Self {
            id,
            kind,
            is_player,
            capital: None,
            capital_city: None,
            territory: Vec::new(),
            units: Vec::new(),
            buildings: Vec::new(),
        }
    }
}

/// All factions in the session plus the hex → owner index used for territory claims
/// and every building they have placed.
#[derive(Debug, Default)]
pub struct Civilizations {
    civs: Vec<Civilization>,
    owners: HashMap<Hex, FactionId>,
    buildings: HashMap<BuildingId, Building>,
    next_building: u32,
}

impl Civilizations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(&mut self, kind: CivilizationKind, is_player: bool) -> FactionId {
        let id = FactionId(self.civs.len() as u32);
        self.civs.push(Civilization::new(id, kind, is_player));
        id
    }

    pub fn get(&self, id: FactionId) -> Option<&Civilization> {
        self.civs.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: FactionId) -> Option<&mut Civilization> {
        self.civs.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Civilization> {
        self.civs.iter()
    }

    pub fn ids(&self) -> Vec<FactionId> {
        self.civs.iter().map(|civ| civ.id).collect()
    }

    pub fn len(&self) -> usize {
        self.civs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.civs.is_empty()
    }

    pub fn owner_of(&self, hex: Hex) -> Option<FactionId> {
        self.owners.get(&hex).copied()
    }

    /// Adds `hex` to a civilization's territory. A hex belongs to at most one civilization,
    /// so claiming one that is already owned is refused.
    pub fn claim(&mut self, faction: FactionId, hex: Hex) -> bool {
        if self.owners.contains_key(&hex) { return false; }
        let Some(civ) = self.civs.get_mut(faction.0 as usize) else { return false };
        civ.territory.push(hex);
        self.owners.insert(hex, faction);
        true
    }

    /// Puts a new building on an existing, unbuilt tile.
    pub fn place_building(
        &mut self,
        faction: FactionId,
        kind: BuildingKind,
        max_health: u32,
        map: &mut HexMap,
        hex: Hex,
    ) -> Option<BuildingId> {
        let civ = self.civs.get_mut(faction.0 as usize)?;
        let tile = map.find_mut(hex)?;
        if tile.building().is_some() { return None; }

        let id = BuildingId(self.next_building);
        self.next_building += 1;
        tile.set_building(Some(id));
        civ.buildings.push(id);
        self.buildings.insert(id, Building::new(id, kind, faction, hex, max_health));
        Some(id)
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(&id)
    }

    /// Moves the capital to `building`. Only one of the faction's own cities qualifies.
    pub fn change_capital(&mut self, faction: FactionId, building: BuildingId) -> bool {
        let Some(city) = self.buildings.get(&building) else { return false };
        if city.owner() != faction || city.kind() != BuildingKind::City { return false; }
        let position = city.position();
        let Some(civ) = self.civs.get_mut(faction.0 as usize) else { return false };
        civ.capital = Some(position);
        civ.capital_city = Some(building);
        true
    }

    /// Places a city, claims its tile and makes it the capital.
    pub fn found_capital(&mut self, faction: FactionId, map: &mut HexMap, hex: Hex) -> Option<BuildingId> {
        if self.owner_of(hex).is_some_and(|owner| owner != faction) { return None; }
        let building = self.place_building(faction, BuildingKind::City, DEFAULT_HEALTH, map, hex)?;
        self.claim(faction, hex);
        self.change_capital(faction, building);
        Some(building)
    }

    pub(crate) fn add_unit(&mut self, faction: FactionId, unit: UnitId) {
        if let Some(civ) = self.civs.get_mut(faction.0 as usize) { civ.units.push(unit); }
    }

    /// Forgets everything generated for the current world but keeps the factions themselves.
    pub fn reset(&mut self) {
        for civ in &mut self.civs {
            civ.capital = None;
            civ.capital_city = None;
            civ.territory.clear();
            civ.units.clear();
            civ.buildings.clear();
        }
        self.owners.clear();
        self.buildings.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::resources::{
        buildings::BuildingState,
        map::{Terrain, Tile},
    };

    fn grass_row(len: i32) -> HexMap {
        let mut map = HexMap::new();
        for q in 0..len { map.add(Tile::new(Hex::new(q, 0), Terrain::Grassland)); }
        map
    }

    #[test]
    fn test_found_assigns_sequential_ids() {
        let mut civs = Civilizations::new();
        let a = civs.found(CivilizationKind::Rumos, true);
        let b = civs.found(CivilizationKind::Aruna, false);

        assert_eq!(a, FactionId(0));
        assert_eq!(b, FactionId(1));
        assert!(civs.get(a).is_some_and(|civ| civ.is_player));
        assert_eq!(civs.get(b).map(|civ| civ.kind), Some(CivilizationKind::Aruna));
        assert!(civs.get(FactionId(7)).is_none());
    }

    #[test]
    fn test_claim_is_exclusive() {
        let mut civs = Civilizations::new();
        let a = civs.found(CivilizationKind::Rumos, true);
        let b = civs.found(CivilizationKind::Veltran, false);

        assert!(civs.claim(a, Hex::new(0, 0)));
        assert!(!civs.claim(b, Hex::new(0, 0)), "Owned hex must not change hands");
        assert!(!civs.claim(a, Hex::new(0, 0)), "Claiming twice must not duplicate territory");
        assert_eq!(civs.owner_of(Hex::new(0, 0)), Some(a));
        assert_eq!(civs.get(a).map(|civ| civ.territory.len()), Some(1));
        assert!(civs.get(b).is_some_and(|civ| civ.territory.is_empty()));
    }

    #[test]
    fn test_claim_unknown_faction() {
        let mut civs = Civilizations::new();
        assert!(!civs.claim(FactionId(3), Hex::new(0, 0)));
        assert_eq!(civs.owner_of(Hex::new(0, 0)), None);
    }

    #[test]
    fn test_found_capital_places_building() {
        let mut map = grass_row(3);
        let mut civs = Civilizations::new();
        let a = civs.found(CivilizationKind::Rumos, true);

        let building = civs.found_capital(a, &mut map, Hex::new(1, 0)).expect("capital placed");
        assert_eq!(map.find(Hex::new(1, 0)).and_then(|tile| tile.building()), Some(building));
        assert_eq!(civs.get(a).and_then(|civ| civ.capital), Some(Hex::new(1, 0)));
        assert_eq!(civs.get(a).and_then(|civ| civ.capital_city), Some(building));
        let city = civs.building(building).expect("building registered");
        assert_eq!(city.kind(), BuildingKind::City);
        assert_eq!(city.health(), DEFAULT_HEALTH);
        assert_eq!(civs.owner_of(Hex::new(1, 0)), Some(a));
    }

    #[test]
    fn test_building_requires_free_existing_tile() {
        let mut map = grass_row(2);
        let mut civs = Civilizations::new();
        let a = civs.found(CivilizationKind::Rumos, true);
        let b = civs.found(CivilizationKind::Aruna, false);

        assert!(civs.place_building(a, BuildingKind::Farm, 5, &mut map, Hex::new(5, 5)).is_none());
        assert!(civs.place_building(a, BuildingKind::Farm, 5, &mut map, Hex::new(0, 0)).is_some());
        assert!(civs.place_building(a, BuildingKind::City, 5, &mut map, Hex::new(0, 0)).is_none());

        civs.claim(a, Hex::new(1, 0));
        assert!(civs.found_capital(b, &mut map, Hex::new(1, 0)).is_none(), "Capital on foreign territory");
    }

    #[test]
    fn test_reset_keeps_factions() {
        let mut map = grass_row(2);
        let mut civs = Civilizations::new();
        let a = civs.found(CivilizationKind::Rumos, true);
        civs.found_capital(a, &mut map, Hex::new(0, 0));
        civs.add_unit(a, UnitId(1));

        civs.reset();
        assert_eq!(civs.len(), 1);
        let civ = civs.get(a).expect("faction survives reset");
        assert!(civ.capital.is_none());
        assert!(civ.territory.is_empty() && civ.units.is_empty() && civ.buildings.is_empty());
        assert_eq!(civs.owner_of(Hex::new(0, 0)), None);
        assert!(civs.building(BuildingId(0)).is_none(), "Buildings are forgotten on reset");
    }

    // ===== BUILDING TESTS =====

    #[test]
    fn test_change_capital_requires_own_city() {
        let mut map = grass_row(4);
        let mut civs = Civilizations::new();
        let a = civs.found(CivilizationKind::Rumos, true);
        let b = civs.found(CivilizationKind::Aruna, false);
        civs.found_capital(a, &mut map, Hex::new(0, 0)).expect("capital");

        let farm = civs.place_building(a, BuildingKind::Farm, 4, &mut map, Hex::new(1, 0)).expect("farm");
        let city = civs.place_building(a, BuildingKind::City, 8, &mut map, Hex::new(2, 0)).expect("city");
        let foreign = civs.place_building(b, BuildingKind::City, 8, &mut map, Hex::new(3, 0)).expect("foreign city");

        assert!(!civs.change_capital(a, farm), "Only a city can be a capital");
        assert!(!civs.change_capital(a, foreign), "Another faction's city");
        assert!(!civs.change_capital(a, BuildingId(99)));
        assert_eq!(civs.get(a).and_then(|civ| civ.capital), Some(Hex::new(0, 0)));

        assert!(civs.change_capital(a, city));
        let civ = civs.get(a).expect("faction");
        assert_eq!(civ.capital, Some(Hex::new(2, 0)));
        assert_eq!(civ.capital_city, Some(city));
    }

    #[test]
    fn test_buildings_take_damage_through_registry() {
        let mut map = grass_row(2);
        let mut civs = Civilizations::new();
        let a = civs.found(CivilizationKind::Veltran, true);
        let farm = civs.place_building(a, BuildingKind::Farm, 6, &mut map, Hex::new(1, 0)).expect("farm");

        let building = civs.building_mut(farm).expect("farm registered");
        assert_eq!(building.damage(2), BuildingState::Damaged);
        assert_eq!(building.damage(4), BuildingState::Destroyed);
        assert_eq!(civs.building(farm).map(|it| it.state()), Some(BuildingState::Destroyed));
        assert_eq!(civs.building(farm).map(|it| it.owner()), Some(a));
    }

    #[test]
    fn test_kind_random_and_colour() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let kind = CivilizationKind::random(&mut rng);
            assert!(CivilizationKind::ALL.contains(&kind));
        }
        assert_eq!(CivilizationKind::Veltran.colour(), [0x74, 0x30, 0xff]);
    }

    #[test]
    fn test_hashmap_faction_lookup() {
        let lookup: HashMap<UnitId, FactionId> = [(UnitId(1), FactionId(2))].into_iter().collect();
        assert_eq!(lookup.faction_of(UnitId(1)), Some(FactionId(2)));
        assert_eq!(lookup.faction_of(UnitId(2)), None);
    }
}
