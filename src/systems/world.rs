use axial::{Hex, Offset};
use log::{info, warn};
use noise::{NoiseFn, Perlin};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    config::WorldConfig,
    resources::{
        civilizations::Civilizations,
        map::{HexMap, Terrain, Tile},
    },
};

/// Builds a fresh world from a config: Perlin terrain, one capital per civilization,
/// and the territory around each capital. Same config, same world.
pub struct WorldGenerator {
    config: WorldConfig,
    noise: Perlin,
}

impl WorldGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        Self { config: config.clone(), noise: Perlin::new(config.seed) }
    }

    /// Noise sampled at the hex's offset position, normalized to [0, 1].
    pub fn elevation(&self, hex: Hex) -> f64 {
        let Offset { x, y } = hex.to_offset();
        let scale = self.config.noise_scale;
        let value = self.noise.get([x as f64 * scale, y as f64 * scale]);
        ((value + 1.) / 2.).clamp(0., 1.)
    }

    pub fn terrain_at(&self, hex: Hex) -> Terrain {
        classify(self.elevation(hex), &self.config)
    }

    pub fn generate(&self, map: &mut HexMap, civs: &mut Civilizations) {
        map.clear();
        civs.reset();

        let (width, height) = (self.config.width as i32, self.config.height as i32);
        for r in 0..height {
            for q in -(r / 2)..width - r / 2 {
                let hex = Hex::new(q, r);
                map.add(Tile::new(hex, self.terrain_at(hex)));
            }
        }

        self.place_capitals(map, civs);
        self.claim_territory(map, civs);

        info!(
            "generated {}x{} world (seed {}): {} tiles, {} capitals",
            self.config.width, self.config.height, self.config.seed, map.len(),
            civs.iter().filter(|civ| civ.capital.is_some()).count(),
        );
    }

    fn place_capitals(&self, map: &mut HexMap, civs: &mut Civilizations) {
        let width = self.config.width as usize;
        let raster = map.rasterize_terrain(self.config.width, self.config.height);
        let mut candidates: Vec<usize> = (0..raster.len())
            .filter(|&i| raster[i] == Some(Terrain::Grassland))
            .collect();
        let mut rng = StdRng::seed_from_u64(self.config.seed as u64);
        candidates.shuffle(&mut rng);

        for faction in civs.ids() {
            let placed = candidates.iter()
                .map(|&i| Hex::from(Offset { x: (i % width) as i32, y: (i / width) as i32 }))
                .find(|&hex| civs.found_capital(faction, map, hex).is_some());
            if placed.is_none() { warn!("no room for a capital for {:?}", faction); }
        }
    }

    fn claim_territory(&self, map: &HexMap, civs: &mut Civilizations) {
        let capitals: Vec<_> = civs.iter()
            .filter_map(|civ| civ.capital.map(|capital| (civ.id, capital)))
            .collect();
        for (faction, capital) in capitals {
            for hex in capital.spiral(self.config.claim_radius) {
                if map.find(hex).is_none() { continue; }
                // refused silently when a neighbour got there first
                civs.claim(faction, hex);
            }
        }
    }
}

fn classify(elevation: f64, config: &WorldConfig) -> Terrain {
    if elevation > config.mountain_level { Terrain::Mountain }
    else if elevation > config.sea_level { Terrain::Grassland }
    else { Terrain::Sea }
}
