use super::parse_component;
use crate::cli::ScheduleArgs;
use crate::error::Result;
use fepflow::core::config::Configuration;
use fepflow::core::fep::FepSchedule;
use std::fmt::Write;

pub fn run(args: ScheduleArgs, cfg: &Configuration) -> Result<()> {
    let component = parse_component(&args.component)?;
    let schedule = FepSchedule::load(cfg, &component.section())?;
    print!("{}", render(&schedule, &component.section(), args.windows)?);
    Ok(())
}

fn render(schedule: &FepSchedule, section: &str, windows: bool) -> Result<String> {
    let mut out = format!("# [{}]\n", section);
    out.push_str(&toml::to_string(schedule).map_err(anyhow::Error::from)?);

    let missing = schedule.missing_keys();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|key| key.as_str()).collect();
        let _ = writeln!(out, "# not set: {}", names.join(", "));
    }

    if windows {
        let _ = writeln!(out, "\n# window  directory  lambda");
        for index in 0..schedule.num_windows() {
            let _ = writeln!(
                out,
                "# {:>6}  {:>9}  {}",
                index,
                schedule.window_dirname(index)?,
                schedule.lambda(index)?
            );
        }
    }
    Ok(out)
}
