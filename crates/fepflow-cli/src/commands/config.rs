use crate::cli::{ConfigArgs, ConfigCommands};
use crate::error::{CliError, Result};
use fepflow::core::config::Configuration;
use std::path::Path;
use tracing::info;

pub fn run(args: ConfigArgs, cfg: &Configuration) -> Result<()> {
    match args.command {
        ConfigCommands::Show { section } => {
            print!("{}", render(cfg, section.as_deref())?);
        }
        ConfigCommands::Write { path, force } => {
            write(cfg, &path, force)?;
            println!("✓ Run input written to: {}", path.display());
        }
    }
    Ok(())
}

fn render(cfg: &Configuration, section: Option<&str>) -> Result<String> {
    let Some(name) = section else {
        return Ok(cfg.to_toml_string()?);
    };

    let mut single = Configuration::new();
    for option in cfg.options(name)? {
        single.set(name, option, cfg.get(name, option)?.clone());
    }
    Ok(single.to_toml_string()?)
}

fn write(cfg: &Configuration, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Argument(format!(
            "'{}' already exists; pass --force to overwrite it.",
            path.display()
        )));
    }
    info!("Writing run input to {:?}", path);
    cfg.write(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fepflow::core::config::ConfigError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_render_reloads_into_an_equal_configuration() {
        let cfg = Configuration::bundled().unwrap();
        let rendered = render(&cfg, None).unwrap();
        assert_eq!(Configuration::from_toml_str(&rendered).unwrap(), cfg);
    }

    #[test]
    fn section_render_contains_only_that_section() {
        let cfg = Configuration::bundled().unwrap();
        let rendered = render(&cfg, Some("setup")).unwrap();
        let reloaded = Configuration::from_toml_str(&rendered).unwrap();

        assert_eq!(reloaded.sections().collect::<Vec<_>>(), vec!["setup"]);
        assert_eq!(reloaded.get_string("setup", "watermodel").unwrap(), "tip4p");
    }

    #[test]
    fn unknown_section_is_an_error() {
        let cfg = Configuration::bundled().unwrap();
        assert!(matches!(
            render(&cfg, Some("nonexistent")),
            Err(CliError::Config(ConfigError::MissingSection(name))) if name == "nonexistent"
        ));
    }

    #[test]
    fn write_refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runinput.toml");
        fs::write(&path, "keep me").unwrap();
        let cfg = Configuration::bundled().unwrap();

        assert!(matches!(write(&cfg, &path, false), Err(CliError::Argument(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        write(&cfg, &path, true).unwrap();
        assert_eq!(Configuration::load(&path).unwrap(), cfg);
    }
}
