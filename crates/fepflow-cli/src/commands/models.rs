use crate::cli::{ModelsArgs, ModelsCommands};
use crate::error::Result;
use fepflow::core::config::Configuration;
use fepflow::core::forcefields::{
    DEFAULT_FORCEFIELD, DEFAULT_WATER_MODEL, GROMACS_WATER_MODELS, GromacsSolventModel,
    solvent_models,
};
use std::fmt::Write;

pub fn run(args: ModelsArgs, cfg: &Configuration) -> Result<()> {
    match args.command {
        ModelsCommands::Water => print!("{}", render_water()),
        ModelsCommands::Solvents { forcefield } => {
            let forcefield = match forcefield {
                Some(name) => name,
                None => configured_forcefield(cfg)?,
            };
            print!("{}", render_solvents(&forcefield)?);
        }
    }
    Ok(())
}

fn configured_forcefield(cfg: &Configuration) -> Result<String> {
    if cfg.has_option("setup", "forcefield") {
        Ok(cfg.get_string("setup", "forcefield")?.to_string())
    } else {
        Ok(DEFAULT_FORCEFIELD.to_string())
    }
}

fn render_water() -> String {
    let mut out = String::new();
    for model in GROMACS_WATER_MODELS.values() {
        let marker = if model.identifier == DEFAULT_WATER_MODEL { "*" } else { " " };
        push_model(&mut out, marker, model);
    }
    out
}

fn render_solvents(forcefield: &str) -> Result<String> {
    let mut out = format!("# {}\n", forcefield);
    for model in solvent_models(Some(forcefield))?.values() {
        push_model(&mut out, " ", model);
    }
    Ok(out)
}

fn push_model(out: &mut String, marker: &str, model: &GromacsSolventModel) {
    let _ = writeln!(
        out,
        "{}{:<12} {:<10} {:<20} {:<18} {}",
        marker,
        model.identifier,
        model.name,
        model.itp,
        model.coordinates,
        model.description.as_deref().unwrap_or("")
    );
}
