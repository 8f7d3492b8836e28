//! # fepflow Core Library
//!
//! Configuration and validation of solvation free-energy perturbation (FEP)
//! calculations run with an external molecular-dynamics engine.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers:
//!
//! - **[`core`]: The Foundation.** The run-input [`core::config::Configuration`],
//!   the FEP lambda schedules and their per-window engine parameters, unit
//!   conversions, and the read-only registries of force fields, water and
//!   solvent models, and bundled topology files.
//!
//! - **[`workflows`]: The Public API.** Ties the `core` pieces together into
//!   complete procedures, such as checking that a run input describes a
//!   setup the bundled topologies can actually support.
//!
//! The simulations themselves are run by the engine; nothing here executes
//! or parses its output.

pub mod core;
pub mod workflows;
