//! # Topology Module
//!
//! Locates the topology and coordinate files bundled for the external MD
//! engine.
//!
//! ## Overview
//!
//! The crate ships a `data/top` directory holding force-field directories
//! (`oplsaa.ff`, `charmm36-mar2019.ff`, `amber99sb.ff`), solvent topologies,
//! pre-equilibrated solvent boxes and system topology templates. The files
//! are handed to the engine by path and are never parsed here.
//!
//! ## Key Components
//!
//! - [`registry`] - The [`registry::TopFiles`] file-name to absolute-path map
//!   and the process-wide [`registry::topfiles`] instance
//!
//! ```ignore
//! use fepflow::core::topology::registry::topfiles;
//!
//! let itp = topfiles()?.path("ffoplsaa.itp")?;
//! ```

pub mod registry;
