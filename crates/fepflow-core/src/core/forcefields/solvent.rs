use super::model::GromacsSolventModel;
use super::water::{GROMACS_WATER_MODELS, is_water_model};
use super::{DEFAULT_FORCEFIELD, DEFAULT_WATER_MODEL, ForcefieldError, get_forcefield};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// The pseudo-identifier standing for "the default water model".
pub const WATER: &str = "water";

pub type SolventModels = BTreeMap<&'static str, GromacsSolventModel>;

/// Organic solvent models keyed by force field, then by solvent identifier.
pub static GROMACS_SOLVENT_MODELS: Lazy<BTreeMap<&'static str, SolventModels>> =
    Lazy::new(|| {
        BTreeMap::from([
            ("OPLS-AA", opls_solvent_models()),
            ("CHARMM", charmm_solvent_models()),
            ("AMBER", amber_solvent_models()),
        ])
    });

fn opls_solvent_models() -> SolventModels {
    let ff = "OPLS-AA";
    BTreeMap::from([
        (
            "octanol",
            GromacsSolventModel::new("octanol", ff)
                .itp("1oct.itp")
                .coordinates("1oct.gro")
                .description("1-octanol"),
        ),
        (
            "wetoctanol",
            GromacsSolventModel::new("wetoctanol", ff)
                .itp("1octwet.itp")
                .coordinates("1octwet.gro")
                .description("1-octanol saturated with 27 mol% water"),
        ),
        (
            "cyclohexane",
            GromacsSolventModel::new("cyclohexane", ff)
                .itp("1cyclo.itp")
                .coordinates("1cyclo.gro")
                .description("cyclohexane"),
        ),
        (
            "toluene",
            GromacsSolventModel::new("toluene", ff)
                .itp("1tol.itp")
                .coordinates("1tol.gro")
                .description("toluene"),
        ),
    ])
}

fn charmm_solvent_models() -> SolventModels {
    let ff = "CHARMM";
    BTreeMap::from([
        (
            "octanol",
            GromacsSolventModel::new("octanol", ff)
                .itp("1oct_charmm.itp")
                .coordinates("1oct_charmm.gro")
                .description("1-octanol"),
        ),
        (
            "wetoctanol",
            GromacsSolventModel::new("wetoctanol", ff)
                .itp("1octwet_charmm.itp")
                .coordinates("1octwet_charmm.gro")
                .description("1-octanol saturated with 27 mol% water"),
        ),
    ])
}

fn amber_solvent_models() -> SolventModels {
    let ff = "AMBER";
    BTreeMap::from([
        (
            "octanol",
            GromacsSolventModel::new("octanol", ff)
                .itp("1oct_amber.itp")
                .coordinates("1oct_amber.gro")
                .description("1-octanol"),
        ),
        (
            "wetoctanol",
            GromacsSolventModel::new("wetoctanol", ff)
                .itp("1octwet_amber.itp")
                .coordinates("1octwet_amber.gro")
                .description("1-octanol saturated with 27 mol% water"),
        ),
    ])
}

/// Organic solvents registered for `forcefield` (`None` for the default).
pub fn solvent_models(
    forcefield: Option<&str>,
) -> Result<&'static SolventModels, ForcefieldError> {
    let forcefield = forcefield.unwrap_or(DEFAULT_FORCEFIELD);
    get_forcefield(forcefield)?;
    GROMACS_SOLVENT_MODELS
        .get(forcefield)
        .ok_or_else(|| ForcefieldError::UnknownForcefield(forcefield.to_string()))
}

/// Looks up a solvent model under `forcefield` (`None` for the default).
///
/// `"water"` selects the default water model; any water-model identifier is
/// accepted as well.
pub fn get_solvent_model(
    identifier: &str,
    forcefield: Option<&str>,
) -> Result<&'static GromacsSolventModel, ForcefieldError> {
    let identifier = if identifier == WATER {
        DEFAULT_WATER_MODEL
    } else {
        identifier
    };
    if let Some(model) = GROMACS_WATER_MODELS.get(identifier) {
        return Ok(model);
    }

    let models = solvent_models(forcefield)?;
    models
        .get(identifier)
        .ok_or_else(|| ForcefieldError::UnknownSolventModel {
            identifier: identifier.to_string(),
            forcefield: forcefield.unwrap_or(DEFAULT_FORCEFIELD).to_string(),
        })
}

/// Resolves a solvent to the identifier of its registered model.
///
/// For `"water"`, `model` selects the water model (the default when absent or
/// itself `"water"`). For other solvents `model` is only honoured when it
/// names a solvent of the force field. Unknown solvents resolve to `None`.
pub fn get_solvent_identifier(
    solvent: &str,
    model: Option<&str>,
    forcefield: Option<&str>,
) -> Option<&'static str> {
    if solvent == WATER {
        let identifier = match model {
            None | Some(WATER) => DEFAULT_WATER_MODEL,
            Some(model) => model,
        };
        return GROMACS_WATER_MODELS
            .get_key_value(identifier)
            .map(|(key, _)| key.as_str());
    }

    let models = solvent_models(forcefield).ok()?;
    model
        .and_then(|m| models.get_key_value(m))
        .or_else(|| models.get_key_value(solvent))
        .map(|(key, _)| *key)
}

/// True when `identifier` names a water model or the `"water"` placeholder.
pub fn is_water(identifier: &str) -> bool {
    identifier == WATER || is_water_model(identifier)
}
