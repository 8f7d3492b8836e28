use crate::core::config::{ConfigError, Configuration};
use crate::core::fep::{Component, FepSchedules, ScheduleError};
use crate::core::forcefields::{
    DEFAULT_FORCEFIELD, Forcefield, ForcefieldError, GromacsSolventModel, GromacsWaterModel,
    get_forcefield, get_solvent_identifier, get_solvent_model, get_top_template, get_water_model,
};
use crate::core::topology::registry::{TopFiles, TopologyError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, instrument};

const SETUP: &str = "setup";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid FEP schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Force field error: {0}")]
    Forcefield(#[from] ForcefieldError),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSummary {
    pub component: Component,
    pub name: String,
    pub windows: usize,
}

/// Everything the run input resolved to.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub forcefield: &'static Forcefield,
    pub water_model: &'static GromacsWaterModel,
    /// The water topology, taken from the force field's own directory when
    /// it ships one.
    pub water_itp: PathBuf,
    /// Present only when `setup.solventmodel` names a non-aqueous solvent.
    pub solvent_model: Option<&'static GromacsSolventModel>,
    pub top_template: &'static str,
    pub schedules: Vec<ScheduleSummary>,
}

impl ValidationReport {
    pub fn total_windows(&self) -> usize {
        self.schedules.iter().map(|s| s.windows).sum()
    }
}

#[instrument(skip_all, name = "validation_workflow")]
pub fn run(cfg: &Configuration, topfiles: &TopFiles) -> Result<ValidationReport, ValidationError> {
    info!("Validating run input against {:?}", topfiles.root());

    // === Phase 1: Force field ===
    let forcefield_name = optional_string(cfg, "forcefield")?.unwrap_or(DEFAULT_FORCEFIELD);
    let forcefield = get_forcefield(forcefield_name)?;
    topfiles.path(forcefield.directory)?;
    topfiles.path(&format!("{}/forcefield.itp", forcefield.directory))?;
    debug!("Force field {} found in {}", forcefield.name, forcefield.directory);

    // === Phase 2: Water model ===
    let water_identifier =
        optional_string(cfg, "watermodel")?.unwrap_or(forcefield.default_water_model);
    let water_model = get_water_model(water_identifier)?;
    water_model.check_files_in(topfiles, Some(forcefield.directory))?;
    let water_itp = water_model
        .itp_path(topfiles, Some(forcefield.directory))?
        .to_path_buf();
    debug!("Water model {} resolved", water_model.identifier);

    // === Phase 3: Solvent model and system template ===
    let (solvent_model, top_template) = match optional_string(cfg, "solventmodel")? {
        Some(solvent) => {
            let identifier =
                get_solvent_identifier(solvent, Some(water_identifier), Some(forcefield.name))
                    .ok_or_else(|| ForcefieldError::UnknownSolventModel {
                        identifier: solvent.to_string(),
                        forcefield: forcefield.name.to_string(),
                    })?;
            let model = get_solvent_model(identifier, Some(forcefield.name))?;
            model.check_files_in(topfiles, Some(forcefield.directory))?;
            let solvent_model = (model.identifier != water_model.identifier).then_some(model);
            (solvent_model, get_top_template(identifier))
        }
        None => (None, get_top_template(water_identifier)),
    };
    topfiles.path(top_template)?;

    // === Phase 4: FEP schedules ===
    let schedules = FepSchedules::load(cfg)?;
    let mut summaries = Vec::new();
    for (component, schedule) in schedules.iter() {
        schedule.validate()?;
        summaries.push(ScheduleSummary {
            component,
            name: schedule.display_name().to_string(),
            windows: schedule.num_windows(),
        });
    }

    let report = ValidationReport {
        forcefield,
        water_model,
        water_itp,
        solvent_model,
        top_template,
        schedules: summaries,
    };
    info!(
        "Run input is valid: {} lambda windows across {} schedules.",
        report.total_windows(),
        report.schedules.len()
    );
    Ok(report)
}

fn optional_string<'a>(
    cfg: &'a Configuration,
    option: &str,
) -> Result<Option<&'a str>, ConfigError> {
    if cfg.has_option(SETUP, option) {
        cfg.get_string(SETUP, option).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Value;
    use crate::core::topology::registry::topfiles;
    use tempfile::tempdir;

    fn bundled_config() -> Configuration {
        Configuration::bundled().unwrap()
    }

    #[test]
    fn bundled_run_input_is_valid() {
        let report = run(&bundled_config(), topfiles().unwrap()).unwrap();

        assert_eq!(report.forcefield.name, "OPLS-AA");
        assert_eq!(report.water_model.identifier, "tip4p");
        assert!(report.water_itp.ends_with("oplsaa.ff/tip4p.itp"));
        assert!(report.solvent_model.is_none());
        assert_eq!(report.top_template, "system.top");
        assert_eq!(report.schedules.len(), 2);
        assert_eq!(report.schedules[0].component, Component::Coulomb);
        assert_eq!(report.schedules[0].name, "Coul");
        assert_eq!(report.schedules[0].windows, 5);
        assert_eq!(report.schedules[1].component, Component::Vdw);
        assert_eq!(report.schedules[1].windows, 16);
        assert_eq!(report.total_windows(), 21);
    }

    #[test]
    fn wet_octanol_under_charmm_uses_its_own_template() {
        let mut cfg = bundled_config();
        cfg.set(SETUP, "forcefield", "CHARMM");
        cfg.set(SETUP, "watermodel", "tip3p");
        cfg.set(SETUP, "solventmodel", "wetoctanol");

        let report = run(&cfg, topfiles().unwrap()).unwrap();

        let solvent = report.solvent_model.unwrap();
        assert_eq!(solvent.itp, "1octwet_charmm.itp");
        assert_eq!(report.top_template, "system_octwet.top");
    }

    #[test]
    fn water_as_solvent_is_not_reported_as_organic_solvent() {
        let mut cfg = bundled_config();
        cfg.set(SETUP, "solventmodel", "water");

        let report = run(&cfg, topfiles().unwrap()).unwrap();

        assert!(report.solvent_model.is_none());
        assert_eq!(report.water_model.identifier, "tip4p");
    }

    #[test]
    fn missing_forcefield_falls_back_to_the_default() {
        let mut cfg = bundled_config();
        cfg.remove_option(SETUP, "forcefield");
        cfg.remove_option(SETUP, "watermodel");

        let report = run(&cfg, topfiles().unwrap()).unwrap();

        assert_eq!(report.forcefield.name, DEFAULT_FORCEFIELD);
        assert_eq!(report.water_model.identifier, "tip4p");
    }

    #[test]
    fn unknown_forcefield_is_rejected() {
        let mut cfg = bundled_config();
        cfg.set(SETUP, "forcefield", "GROMOS");

        let result = run(&cfg, topfiles().unwrap());

        assert!(matches!(
            result,
            Err(ValidationError::Forcefield(ForcefieldError::UnknownForcefield(ff))) if ff == "GROMOS"
        ));
    }

    #[test]
    fn solvent_unavailable_for_forcefield_is_rejected() {
        let mut cfg = bundled_config();
        cfg.set(SETUP, "forcefield", "AMBER");
        cfg.set(SETUP, "watermodel", "tip3p");
        cfg.set(SETUP, "solventmodel", "toluene");

        let result = run(&cfg, topfiles().unwrap());

        assert!(matches!(
            result,
            Err(ValidationError::Forcefield(ForcefieldError::UnknownSolventModel { identifier, forcefield }))
                if identifier == "toluene" && forcefield == "AMBER"
        ));
    }

    #[test]
    fn non_string_setup_option_is_a_type_mismatch() {
        let mut cfg = bundled_config();
        cfg.set(SETUP, "watermodel", 4_i64);

        let result = run(&cfg, topfiles().unwrap());

        assert!(matches!(
            result,
            Err(ValidationError::Config(ConfigError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn decreasing_lambdas_are_rejected() {
        let mut cfg = bundled_config();
        cfg.set(
            "FEP_schedule_VDW",
            "lambdas",
            Value::from(vec![0.0, 0.5, 0.25, 1.0]),
        );

        let result = run(&cfg, topfiles().unwrap());

        assert!(matches!(
            result,
            Err(ValidationError::Schedule(ScheduleError::NonIncreasingLambdas { index: 2, .. }))
        ));
    }

    #[test]
    fn water_topology_comes_from_the_selected_forcefield() {
        let dir = tempdir().unwrap();
        for ff in ["charmm36-mar2019.ff", "oplsaa.ff"] {
            std::fs::create_dir(dir.path().join(ff)).unwrap();
            std::fs::write(dir.path().join(ff).join("forcefield.itp"), "").unwrap();
            std::fs::write(dir.path().join(ff).join("tip3p.itp"), ff).unwrap();
        }
        std::fs::write(dir.path().join("spc216.gro"), "").unwrap();
        std::fs::write(dir.path().join("system.top"), "").unwrap();
        let files = TopFiles::scan(dir.path()).unwrap();
        let mut cfg = bundled_config();
        cfg.set(SETUP, "forcefield", "CHARMM");
        cfg.set(SETUP, "watermodel", "tip3p");

        let report = run(&cfg, &files).unwrap();

        assert!(report.water_itp.ends_with("charmm36-mar2019.ff/tip3p.itp"));
        assert_eq!(std::fs::read_to_string(&report.water_itp).unwrap(), "charmm36-mar2019.ff");
    }

    #[test]
    fn missing_topology_files_are_reported() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("oplsaa.ff")).unwrap();
        std::fs::write(dir.path().join("oplsaa.ff").join("forcefield.itp"), "").unwrap();
        let sparse = TopFiles::scan(dir.path()).unwrap();

        let result = run(&bundled_config(), &sparse);

        assert!(matches!(
            result,
            Err(ValidationError::Topology(TopologyError::MissingFile { name, .. })) if name == "tip4p.itp"
        ));
    }
}
