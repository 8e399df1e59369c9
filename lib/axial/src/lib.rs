mod hex;
mod map;

pub use hex::{round, Hex, Offset, DIRECTIONS};
pub use map::{Convert, Layout, Map, Occupied};
