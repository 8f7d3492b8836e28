use super::model::GromacsWaterModel;
use super::{DEFAULT_FORCEFIELD, ForcefieldError};
use once_cell::sync::Lazy;
use phf::{Map, phf_map};
use std::collections::BTreeMap;

/// Water models supported by the bundled force fields, in the engine's
/// `watermodels.dat` layout: `identifier name description...`.
pub const GMX_WATERMODELS_DAT: &str = "
tip4p     TIP4P    TIP 4-point, recommended
tip3p     TIP3P    TIP 3-point
tip5p     TIP5P    TIP 5-point (see http://redmine.gromacs.org/issues/1348 for issues)
spc       SPC      simple point charge
spce      SPC/E    extended simple point charge
m24       M24      TIP 3-point with modified LJ (M24)
tip4pd    TIP4P-D  TIP 4-point with modified dispersion (TIP4P-D)
";

/// Pre-equilibrated water boxes shipped with the engine, keyed by model.
/// Three-site models share `spc216.gro`.
static WATER_BOXES: Map<&'static str, &'static str> = phf_map! {
    "tip4p" => "tip4p.gro",
    "tip4pd" => "tip4p.gro",
    "tip5p" => "tip5p.gro",
};

const THREE_SITE_BOX: &str = "spc216.gro";

pub static GROMACS_WATER_MODELS: Lazy<BTreeMap<String, GromacsWaterModel>> =
    Lazy::new(|| parse_watermodels_dat(GMX_WATERMODELS_DAT));

/// Non-empty, non-comment lines of a `watermodels.dat` text, trimmed.
pub fn watermodels_dat_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

pub fn parse_watermodels_dat(content: &str) -> BTreeMap<String, GromacsWaterModel> {
    watermodels_dat_lines(content)
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let identifier = fields.next()?;
            let name = fields.next()?;
            let description = fields.collect::<Vec<_>>().join(" ");
            let coordinates = WATER_BOXES
                .get(identifier)
                .copied()
                .unwrap_or(THREE_SITE_BOX);

            let mut model = GromacsWaterModel::new(identifier, DEFAULT_FORCEFIELD)
                .name(name)
                .coordinates(coordinates);
            if !description.is_empty() {
                model = model.description(&description);
            }
            Some((identifier.to_string(), model))
        })
        .collect()
}

pub fn get_water_model(identifier: &str) -> Result<&'static GromacsWaterModel, ForcefieldError> {
    GROMACS_WATER_MODELS
        .get(identifier)
        .ok_or_else(|| ForcefieldError::UnknownWaterModel {
            identifier: identifier.to_string(),
            known: GROMACS_WATER_MODELS
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        })
}

pub fn is_water_model(identifier: &str) -> bool {
    GROMACS_WATER_MODELS.contains_key(identifier)
}
