use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

use hexciv::{
    resources::{map::Terrain, units::UnitId},
    systems::traversal::{Step, Traversal},
    Hex, Offset, Session, WorldConfig,
};

/// Simulated frame length in seconds.
const DT: f32 = 1. / 60.;
/// World units per second.
const SPEED: f32 = 3.;
/// Random destinations tried per unit before giving up.
const ATTEMPTS: usize = 16;

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate a hex world and march units across it")]
struct Cli {
    #[arg(long, default_value_t = 20)]
    width: u32,

    #[arg(long, default_value_t = 15)]
    height: u32,

    #[arg(long, default_value_t = 0)]
    seed: u32,

    /// AI civilizations besides the player
    #[arg(long, default_value_t = 1)]
    civilizations: u32,

    /// Units spawned per civilization
    #[arg(long, default_value_t = 3)]
    units: u32,

    /// Frames to simulate before stopping everyone where they stand
    #[arg(long, default_value_t = 1200)]
    ticks: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = WorldConfig {
        width: cli.width,
        height: cli.height,
        seed: cli.seed,
        civilizations: cli.civilizations,
        ..Default::default()
    };
    let mut session = Session::new(config)?;
    session.generate();

    let range = session.config().unit_spawn_range;
    for faction in session.civilizations().ids() {
        for _ in 0..cli.units {
            if session.spawn_unit(faction, range).is_none() { break; }
        }
    }

    let mut rng = StdRng::seed_from_u64(cli.seed as u64);
    let grass: Vec<Hex> = session.map().tiles()
        .filter(|tile| tile.terrain().is_passable())
        .map(|tile| tile.hex())
        .collect();
    let ids: Vec<UnitId> = session.units().iter().map(|unit| unit.id).collect();

    let mut walkers = Vec::new();
    for unit in ids {
        let path = grass.choose_multiple(&mut rng, ATTEMPTS)
            .find_map(|&target| session.request_move(unit, target).ok());
        match path {
            Some(path) => walkers.push((unit, Traversal::new(path, session.layout()))),
            None => warn!("{:?} found nowhere to go", unit),
        }
    }
    info!("{} of {} units on the move", walkers.len(), session.units().len());

    let mut arrived = 0;
    for _ in 0..cli.ticks {
        if walkers.is_empty() { break; }
        walkers.retain_mut(|(unit, traversal)| match traversal.advance(SPEED, DT) {
            Step::Moving | Step::Entered(_) => true,
            Step::Finished(_) | Step::Idle => {
                match session.complete_move(*unit) {
                    Ok(_) => arrived += 1,
                    Err(err) => warn!("{:?} could not settle: {}", unit, err),
                }
                false
            }
        });
    }

    // out of time: stop the stragglers on the last tile they reached
    let mut stopped = 0;
    for (unit, traversal) in &walkers {
        let Some(hex) = traversal.reached() else { continue };
        match session.cancel_move(*unit, hex) {
            Ok(()) => stopped += 1,
            Err(err) => warn!("{:?} still in transit: {}", unit, err),
        }
    }

    print!("{}", render(&session));
    println!(
        "{} tiles, {} units: {} arrived, {} stopped short, {} still moving",
        session.map().len(), session.units().len(), arrived, stopped, session.orders().len(),
    );
    Ok(())
}

/// One character per tile, odd rows shifted half a cell; units show as their faction number.
fn render(session: &Session) -> String {
    let width = session.config().width as usize;
    let mut cells: Vec<char> = session.terrain_raster().into_iter()
        .map(|terrain| match terrain {
            Some(Terrain::Sea) => '~',
            Some(Terrain::Grassland) => '.',
            Some(Terrain::Mountain) => '^',
            None => ' ',
        })
        .collect();
    for unit in session.units().iter() {
        let Offset { x, y } = unit.position.to_offset();
        let index = y as usize * width + x as usize;
        if let Some(cell) = cells.get_mut(index) {
            *cell = char::from_digit(unit.faction.0 % 10, 10).unwrap_or('?');
        }
    }

    let mut out = String::new();
    for (y, row) in cells.chunks(width).enumerate() {
        if y % 2 == 1 { out.push(' '); }
        for &cell in row {
            out.push(cell);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
