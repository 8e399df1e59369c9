pub mod buildings;
pub mod civilizations;
pub mod map;
pub mod units;
