//! # Core Module
//!
//! The building blocks for setting up solvation free-energy calculations.
//!
//! ## Architecture
//!
//! - **Run input** ([`config`]) - Sectioned TOML configuration with typed
//!   accessors and bundled defaults
//! - **FEP schedules** ([`fep`]) - Coulomb and van der Waals decoupling
//!   schedules, their validation and per-window engine parameters
//! - **Units** ([`units`]) - Conversions between the units used in run inputs
//!   and the engine's kJ/mol/nm system
//! - **Force fields** ([`forcefields`]) - Force-field, water-model and
//!   solvent-model registries
//! - **Topology files** ([`topology`]) - Path lookup for the bundled topology
//!   and coordinate files

pub mod config;
pub mod fep;
pub mod forcefields;
pub mod topology;
pub mod units;
