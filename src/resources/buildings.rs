use axial::Hex;
use serde::{Deserialize, Serialize};

use crate::resources::civilizations::FactionId;

/// Health given to buildings placed without an explicit value, capitals included.
pub const DEFAULT_HEALTH: u32 = 10;

/// Handle stored on the tile a building stands on.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct BuildingId(pub u32);

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BuildingKind {
    /// The only kind a civilization may use as its capital.
    City,
    Farm,
    Barracks,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BuildingState {
    #[default]
    Normal,
    Damaged,
    Destroyed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    id: BuildingId,
    kind: BuildingKind,
    owner: FactionId,
    position: Hex,
    health: u32,
    max_health: u32,
    state: BuildingState,
}

impl Building {
    /// Starts at full health. A zero `max_health` is bumped to 1 so a fresh building is never
    /// born destroyed.
    pub fn new(id: BuildingId, kind: BuildingKind, owner: FactionId, position: Hex, max_health: u32) -> Self {
        let max_health = max_health.max(1);
        Self { id, kind, owner, position, health: max_health, max_health, state: BuildingState::Normal }
    }

    pub fn id(&self) -> BuildingId { self.id }
    pub fn kind(&self) -> BuildingKind { self.kind }
    pub fn owner(&self) -> FactionId { self.owner }
    pub fn position(&self) -> Hex { self.position }
    pub fn health(&self) -> u32 { self.health }
    pub fn max_health(&self) -> u32 { self.max_health }
    pub fn state(&self) -> BuildingState { self.state }

    pub fn damage(&mut self, amount: u32) -> BuildingState {
        self.health = self.health.saturating_sub(amount);
        self.update_state()
    }

    /// Heals up to `max_health`; a destroyed building that gets health back is standing again.
    pub fn heal(&mut self, amount: u32) -> BuildingState {
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.update_state()
    }

    fn update_state(&mut self) -> BuildingState {
        self.state = match self.health {
            0 => BuildingState::Destroyed,
            health if health >= self.max_health => BuildingState::Normal,
            _ => BuildingState::Damaged,
        };
        self.state
    }
}
