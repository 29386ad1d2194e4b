//! `GameStore` implementations.

pub mod games_sea;
pub mod memory;

pub use games_sea::SeaStore;
pub use memory::MemoryStore;
