use crate::error::Result;
use crate::utils::parser::parse_assignment;
use fepflow::core::config::{Configuration, Value, get_configuration};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Builds the effective run input: bundled defaults, then the `--config`
/// file, then each `--set` override in order.
pub fn load_configuration(path: Option<&Path>, set_values: &[String]) -> Result<Configuration> {
    match path {
        Some(path) => info!("Loading run input from {:?} over the bundled defaults.", path),
        None => info!("Using the bundled default run input."),
    }
    let mut cfg = get_configuration(path)?;
    apply_set_values(&mut cfg, set_values)?;
    Ok(cfg)
}

fn apply_set_values(cfg: &mut Configuration, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let assignment = parse_assignment(kv_pair)?;
        let value = parse_value(assignment.value);
        debug!(
            "Overriding {}.{} with {} value '{}'",
            assignment.section,
            assignment.option,
            value.type_name(),
            value
        );
        cfg.set(assignment.section, assignment.option, value);
    }
    Ok(())
}

#[derive(Deserialize)]
struct Wrapped {
    value: Value,
}

/// Reads a TOML literal (`1.5`, `true`, `[0.0, 1.0]`, `"text"`); anything
/// else is taken as a bare string.
fn parse_value(raw: &str) -> Value {
    toml::from_str::<Wrapped>(&format!("value = {}", raw))
        .map(|wrapped| wrapped.value)
        .unwrap_or_else(|_| Value::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_used_without_a_file() {
        let cfg = load_configuration(None, &[]).unwrap();
        assert_eq!(cfg.get_string("setup", "forcefield").unwrap(), "OPLS-AA");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(&path, "[setup]\nwatermodel = \"spce\"\n").unwrap();

        let cfg = load_configuration(Some(&path), &[]).unwrap();

        assert_eq!(cfg.get_string("setup", "watermodel").unwrap(), "spce");
        assert_eq!(cfg.get_string("setup", "forcefield").unwrap(), "OPLS-AA");
    }

    #[test]
    fn set_values_override_file_and_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(&path, "[setup]\nwatermodel = \"spce\"\n").unwrap();
        let set_values = vec![
            "setup.watermodel=tip3p".to_string(),
            "FEP_schedule_VDW.sc_alpha=0.25".to_string(),
            "FEP_schedule_VDW.lambdas=[0.0, 0.5, 1.0]".to_string(),
            "MD_NPT.runlocal=true".to_string(),
        ];

        let cfg = load_configuration(Some(&path), &set_values).unwrap();

        assert_eq!(cfg.get_string("setup", "watermodel").unwrap(), "tip3p");
        assert_eq!(cfg.get_float("FEP_schedule_VDW", "sc_alpha").unwrap(), 0.25);
        assert_eq!(
            cfg.get_array("FEP_schedule_VDW", "lambdas").unwrap(),
            vec![0.0, 0.5, 1.0]
        );
        assert!(cfg.get_bool("MD_NPT", "runlocal").unwrap());
    }

    #[test]
    fn malformed_set_value_is_an_error() {
        let result = load_configuration(None, &["watermodel".to_string()]);
        assert!(matches!(result, Err(CliError::Parse(_))));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = load_configuration(Some(&dir.path().join("absent.toml")), &[]);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn parse_value_recognizes_toml_literals() {
        assert_eq!(parse_value("5"), Value::Integer(5));
        assert_eq!(parse_value("1.5"), Value::Float(1.5));
        assert_eq!(parse_value("false"), Value::Boolean(false));
        assert_eq!(parse_value("\"tip4p\""), Value::from("tip4p"));
        assert_eq!(parse_value("OPLS-AA"), Value::from("OPLS-AA"));
        assert_eq!(parse_value("0.0, 0.5"), Value::from("0.0, 0.5"));
    }
}
