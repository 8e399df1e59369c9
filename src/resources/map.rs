use axial::{Hex, Map, Occupied};
use serde::{Deserialize, Serialize};

use crate::resources::{buildings::BuildingId, units::UnitId};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Terrain {
    #[default]
    Sea,
    Grassland,
    Mountain,
}

impl Terrain {
    /// Movement is binary: only grassland can be entered.
    pub fn is_passable(&self) -> bool {
        matches!(self, Terrain::Grassland)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    hex: Hex,
    terrain: Terrain,
    building: Option<BuildingId>,
    unit: Option<UnitId>,
}

impl Tile {
    pub fn new(hex: Hex, terrain: Terrain) -> Self {
        Self { hex, terrain, building: None, unit: None }
    }

    pub fn hex(&self) -> Hex { self.hex }
    pub fn terrain(&self) -> Terrain { self.terrain }
    pub fn building(&self) -> Option<BuildingId> { self.building }
    pub fn unit(&self) -> Option<UnitId> { self.unit }

    pub fn is_occupied(&self) -> bool {
        self.unit.is_some()
    }

    pub fn set_terrain(&mut self, terrain: Terrain) {
        self.terrain = terrain;
    }

    pub fn set_building(&mut self, building: Option<BuildingId>) {
        self.building = building;
    }

    // occupancy only changes through move orders and initial spawning
    pub(crate) fn occupy(&mut self, unit: UnitId) {
        debug_assert!(self.unit.is_none() || self.unit == Some(unit), "{:?} already holds {:?}", self.hex, self.unit);
        self.unit = Some(unit);
    }

    pub(crate) fn vacate(&mut self) -> Option<UnitId> {
        self.unit.take()
    }
}

/// Every tile of the current world, keyed by axial coordinate.
#[derive(Clone, Debug, Default)]
pub struct HexMap {
    tiles: Map<Tile>,
}

impl HexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tile during world generation.
    ///
    /// # Panics
    ///
    /// A second tile at the same coordinate means the generator is broken, so this panics.
    /// Use [`HexMap::try_add`] when duplicates are expected.
    pub fn add(&mut self, tile: Tile) {
        if let Err(err) = self.try_add(tile) { panic!("duplicate tile: {err}") }
    }

    pub fn try_add(&mut self, tile: Tile) -> Result<(), Occupied> {
        self.tiles.try_insert(tile.hex, tile).map(|_| ())
    }

    pub fn find(&self, hex: Hex) -> Option<&Tile> {
        self.tiles.get(hex)
    }

    pub fn find_mut(&mut self, hex: Hex) -> Option<&mut Tile> {
        self.tiles.get_mut(hex)
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().map(|(_, tile)| tile)
    }

    /// True when a unit could stand on `hex` at all, ignoring who is there.
    pub fn is_passable(&self, hex: Hex) -> bool {
        self.find(hex).is_some_and(|tile| tile.terrain.is_passable())
    }

    /// Terrain laid out row-major by offset coordinate for the tilemap painter.
    pub fn rasterize_terrain(&self, width: u32, height: u32) -> Vec<Option<Terrain>> {
        self.tiles.rasterize(width, height, |tile| tile.terrain)
    }
}
