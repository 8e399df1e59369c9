pub mod orders;
pub mod pathfind;
pub mod spawner;
pub mod traversal;
pub mod world;
