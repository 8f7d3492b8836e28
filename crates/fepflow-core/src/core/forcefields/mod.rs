//! # Forcefields Module
//!
//! Registries of the force fields, water models, and organic solvent models
//! that the bundled topologies support.
//!
//! ## Overview
//!
//! Every registry is built once and is read-only afterwards:
//!
//! - **Force fields** ([`get_forcefield`]) - Static records naming each
//!   force field's `*.ff` directory and preferred water model
//! - **Water models** ([`water`]) - Parsed from the engine's `watermodels.dat`
//!   table ([`GMX_WATERMODELS_DAT`])
//! - **Solvent models** ([`solvent`]) - Octanol, wet octanol, cyclohexane and
//!   toluene, keyed by force field
//!
//! ```ignore
//! use fepflow::core::forcefields::{get_solvent_identifier, get_solvent_model};
//!
//! let identifier = get_solvent_identifier("water", None, None).unwrap();
//! let model = get_solvent_model(identifier, None)?;
//! println!("{} uses {}", model.name, model.itp);
//! ```

pub mod model;
pub mod solvent;
pub mod water;

pub use model::{GromacsSolventModel, GromacsWaterModel};
pub use solvent::{
    GROMACS_SOLVENT_MODELS, get_solvent_identifier, get_solvent_model, is_water, solvent_models,
};
pub use water::{GMX_WATERMODELS_DAT, GROMACS_WATER_MODELS, get_water_model, is_water_model};

use phf::{Map, phf_map};
use thiserror::Error;

pub const DEFAULT_FORCEFIELD: &str = "OPLS-AA";
pub const DEFAULT_WATER_MODEL: &str = "tip4p";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForcefieldError {
    #[error("Unknown water model '{identifier}'. Known water models: {known}")]
    UnknownWaterModel { identifier: String, known: String },

    #[error("Unknown solvent model '{identifier}' for force field '{forcefield}'")]
    UnknownSolventModel {
        identifier: String,
        forcefield: String,
    },

    #[error("Unknown force field '{0}'. Expected one of OPLS-AA, CHARMM, AMBER.")]
    UnknownForcefield(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forcefield {
    pub name: &'static str,
    /// The force field's directory in the topology registry.
    pub directory: &'static str,
    pub default_water_model: &'static str,
}

static FORCEFIELDS: Map<&'static str, Forcefield> = phf_map! {
    "OPLS-AA" => Forcefield {
        name: "OPLS-AA",
        directory: "oplsaa.ff",
        default_water_model: "tip4p",
    },
    "CHARMM" => Forcefield {
        name: "CHARMM",
        directory: "charmm36-mar2019.ff",
        default_water_model: "tip3p",
    },
    "AMBER" => Forcefield {
        name: "AMBER",
        directory: "amber99sb.ff",
        default_water_model: "tip3p",
    },
};

pub fn get_forcefield(name: &str) -> Result<&'static Forcefield, ForcefieldError> {
    FORCEFIELDS
        .get(name)
        .ok_or_else(|| ForcefieldError::UnknownForcefield(name.to_string()))
}

/// Registered force-field names, sorted.
pub fn forcefield_names() -> Vec<&'static str> {
    let mut names: Vec<_> = FORCEFIELDS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// System topology template for a solvent: wet octanol needs its own
/// template that also includes water.
pub fn get_top_template(identifier: &str) -> &'static str {
    match identifier {
        "wetoctanol" => "system_octwet.top",
        _ => "system.top",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_forcefield_is_oplsaa() {
        assert_eq!(DEFAULT_FORCEFIELD, "OPLS-AA");
        assert_eq!(get_forcefield(DEFAULT_FORCEFIELD).unwrap().directory, "oplsaa.ff");
    }

    #[test]
    fn default_water_model_is_tip4p() {
        assert_eq!(DEFAULT_WATER_MODEL, "tip4p");
        assert_eq!(
            get_forcefield(DEFAULT_FORCEFIELD).unwrap().default_water_model,
            DEFAULT_WATER_MODEL
        );
    }

    #[test]
    fn all_forcefields_are_registered() {
        assert_eq!(forcefield_names(), vec!["AMBER", "CHARMM", "OPLS-AA"]);
        assert_eq!(
            get_forcefield("CHARMM").unwrap().directory,
            "charmm36-mar2019.ff"
        );
        assert_eq!(get_forcefield("AMBER").unwrap().directory, "amber99sb.ff");
    }

    #[test]
    fn unknown_forcefield_is_an_error() {
        assert_eq!(
            get_forcefield("GROMOS"),
            Err(ForcefieldError::UnknownForcefield("GROMOS".to_string()))
        );
    }

    #[test]
    fn every_forcefield_has_solvent_models() {
        for name in forcefield_names() {
            let models = solvent_models(Some(name)).unwrap();
            assert!(models.contains_key("octanol"));
            assert!(models.contains_key("wetoctanol"));
        }
    }

    #[test]
    fn top_template_depends_on_solvent() {
        assert_eq!(get_top_template("wetoctanol"), "system_octwet.top");
        assert_eq!(get_top_template("octanol"), "system.top");
        assert_eq!(get_top_template("tip4p"), "system.top");
    }
}
