//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs systems each tick with a scaled time
//! delta, and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod grid;
pub mod progression;
pub mod scenario;
pub mod systems;

pub use bastion_core as core;
pub use engine::{SimConfig, SimulationEngine};
