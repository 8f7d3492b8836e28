//! # Workflows Module
//!
//! High-level procedures built from the [`crate::core`] pieces.
//!
//! ## Overview
//!
//! A workflow takes a loaded run input and carries it through every check or
//! derivation a user would otherwise do by hand, reporting the first problem
//! as a typed error.
//!
//! - **Validation Workflow** ([`validate`]) - Resolves the force field, water
//!   model and optional solvent of the `setup` section against the registries,
//!   confirms their files are bundled, and validates both FEP schedules.

pub mod validate;
