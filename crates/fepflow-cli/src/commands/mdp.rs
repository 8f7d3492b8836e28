use super::parse_component;
use crate::cli::MdpArgs;
use crate::error::Result;
use fepflow::core::config::Configuration;
use fepflow::core::fep::{FepSchedule, MdpParameters};
use tracing::info;

pub fn run(args: MdpArgs, cfg: &Configuration) -> Result<()> {
    let component = parse_component(&args.component)?;
    let params = window_parameters(cfg, &component.section(), args.window, &args.moltype)?;
    print!("{}", params);
    Ok(())
}

fn window_parameters(
    cfg: &Configuration,
    section: &str,
    window: usize,
    moltype: &str,
) -> Result<MdpParameters> {
    let schedule = FepSchedule::load(cfg, section)?;
    schedule.validate()?;
    info!(
        "Rendering window {} ({}) of {}",
        window,
        schedule.window_dirname(window)?,
        schedule.display_name()
    );
    Ok(schedule.mdp_parameters(window, moltype)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use fepflow::core::fep::ScheduleError;

    #[test]
    fn vdw_window_parameters_use_the_schedule() {
        let cfg = Configuration::bundled().unwrap();

        let params = window_parameters(&cfg, "FEP_schedule_VDW", 1, "BNZ").unwrap();

        assert_eq!(params.get("couple-moltype"), Some("BNZ"));
        assert_eq!(params.get("couple-lambda0"), Some("vdw"));
        assert_eq!(params.get("couple-lambda1"), Some("none"));
        assert_eq!(params.get("sc-alpha"), Some("0.5"));
        assert_eq!(params.get("init-lambda-state"), Some("1"));
    }

    #[test]
    fn window_past_the_schedule_is_an_error() {
        let cfg = Configuration::bundled().unwrap();

        let result = window_parameters(&cfg, "FEP_schedule_Coulomb", 5, "BNZ");

        assert!(matches!(
            result,
            Err(CliError::Schedule(ScheduleError::WindowOutOfRange { windows: 5, .. }))
        ));
    }

    #[test]
    fn invalid_schedule_is_rejected_before_rendering() {
        let mut cfg = Configuration::bundled().unwrap();
        cfg.set("FEP_schedule_Coulomb", "couple_lambda1", "nothing");

        let result = window_parameters(&cfg, "FEP_schedule_Coulomb", 0, "BNZ");

        assert!(matches!(
            result,
            Err(CliError::Schedule(ScheduleError::UnknownCouplingState { .. }))
        ));
    }
}
