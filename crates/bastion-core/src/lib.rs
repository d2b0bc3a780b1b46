//! Core types and definitions for the BASTION combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, catalog specs, state snapshots, events, and
//! constants. It has no dependency on any runtime framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
pub mod waves;

#[cfg(test)]
mod tests;
