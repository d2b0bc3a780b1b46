//! Simulation systems, run in a fixed order each tick by the engine.

pub mod building_effects;
pub mod cleanup;
pub mod combat;
pub mod income;
pub mod movement;
pub mod projectile;
pub mod snapshot;
pub mod status;
pub mod wave_spawner;
pub mod zones;
