pub mod config;
pub mod resources;
pub mod session;
pub mod systems;

pub use axial::{Hex, Layout, Offset};
pub use config::{ConfigError, WorldConfig};
pub use session::Session;
