//! One running game: the world, its factions and units, and the move orders in flight.
//! Every occupancy change goes through `&mut Session`.

use axial::{Hex, Layout};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{ConfigError, WorldConfig},
    resources::{
        civilizations::{CivilizationKind, Civilizations, FactionId},
        map::{HexMap, Terrain},
        units::{UnitId, Units},
    },
    systems::{
        orders::{MoveError, MoveOrders},
        pathfind::Pathfinder,
        spawner,
        world::WorldGenerator,
    },
};

#[derive(Debug)]
pub struct Session {
    config: WorldConfig,
    layout: Layout,
    map: HexMap,
    civs: Civilizations,
    units: Units,
    orders: MoveOrders,
}

impl Session {
    /// Founds the player's civilization plus `config.civilizations` AI ones. The world
    /// itself is empty until [`Session::generate`].
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed as u64);
        let mut civs = Civilizations::new();
        civs.found(CivilizationKind::random(&mut rng), true);
        for _ in 0..config.civilizations { civs.found(CivilizationKind::random(&mut rng), false); }

        Ok(Self {
            layout: Layout::new(config.cell_size),
            config,
            map: HexMap::new(),
            civs,
            units: Units::new(),
            orders: MoveOrders::new(),
        })
    }

    /// Throws away the current world, units and orders and generates a new one.
    pub fn generate(&mut self) {
        self.orders.clear();
        self.units.clear();
        WorldGenerator::new(&self.config).generate(&mut self.map, &mut self.civs);
        info!("session ready with {} civilizations", self.civs.len());
    }

    /// Spawns a unit within `range` of the faction's capital.
    pub fn spawn_unit(&mut self, faction: FactionId, range: u32) -> Option<UnitId> {
        let capital = self.civs.get(faction)?.capital?;
        spawner::spawn_unit(&mut self.map, &mut self.units, &mut self.civs, &self.orders, faction, capital, range)
    }

    /// Path preview for UI hover; does not change anything. Empty whenever
    /// [`Session::request_move`] would refuse the same target for lack of room there.
    pub fn find_path(&self, unit: UnitId, target: Hex) -> Vec<Hex> {
        let Some(mover) = self.units.get(unit) else { return Vec::new() };
        if self.orders.is_claimed(target) { return Vec::new(); }
        if self.map.find(target).is_some_and(|tile| tile.is_occupied()) { return Vec::new(); }
        Pathfinder::new(&self.map, &self.units).find_path(mover.position, target, mover.faction)
    }

    pub fn request_move(&mut self, unit: UnitId, target: Hex) -> Result<Vec<Hex>, MoveError> {
        self.orders.request_move(&mut self.map, &self.units, unit, target)
            .inspect_err(|err| debug!("move {:?} -> {:?} rejected: {}", unit, target, err))
    }

    pub fn complete_move(&mut self, unit: UnitId) -> Result<Hex, MoveError> {
        self.orders.complete_move(&mut self.map, &mut self.units, unit)
    }

    pub fn cancel_move(&mut self, unit: UnitId, stopped_at: Hex) -> Result<(), MoveError> {
        self.orders.cancel_move(&mut self.map, &mut self.units, unit, stopped_at)
    }

    pub fn terrain_raster(&self) -> Vec<Option<Terrain>> {
        self.map.rasterize_terrain(self.config.width, self.config.height)
    }

    pub fn player(&self) -> Option<FactionId> {
        self.civs.iter().find(|civ| civ.is_player).map(|civ| civ.id)
    }

    pub fn config(&self) -> &WorldConfig { &self.config }
    pub fn layout(&self) -> Layout { self.layout }
    pub fn map(&self) -> &HexMap { &self.map }
    pub fn civilizations(&self) -> &Civilizations { &self.civs }
    pub fn units(&self) -> &Units { &self.units }
    pub fn orders(&self) -> &MoveOrders { &self.orders }
}
