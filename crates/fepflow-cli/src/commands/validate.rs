use crate::error::Result;
use fepflow::core::config::Configuration;
use fepflow::core::topology::registry::topfiles;
use fepflow::workflows::validate::{self, ValidationReport};
use std::fmt::Write;
use tracing::info;

pub fn run(cfg: &Configuration) -> Result<()> {
    info!("Invoking the validation workflow...");
    let report = validate::run(cfg, topfiles()?)?;
    print!("{}", render(&report));
    Ok(())
}

fn render(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Force field:   {} ({})",
        report.forcefield.name, report.forcefield.directory
    );
    let _ = writeln!(
        out,
        "Water model:   {} ({})",
        report.water_model.name, report.water_model.itp
    );
    if let Some(solvent) = report.solvent_model {
        let _ = writeln!(out, "Solvent model: {} ({})", solvent.identifier, solvent.itp);
    }
    let _ = writeln!(out, "Topology:      {}", report.top_template);
    for summary in &report.schedules {
        let _ = writeln!(
            out,
            "Schedule:      {} '{}' with {} windows",
            summary.component, summary.name, summary.windows
        );
    }
    let _ = writeln!(out, "✓ {} lambda windows in total.", report.total_windows());
    out
}
