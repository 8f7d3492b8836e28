pub mod config;
pub mod mdp;
pub mod models;
pub mod schedule;
pub mod topfiles;
pub mod units;
pub mod validate;

use crate::error::{CliError, Result};
use fepflow::core::fep::Component;

fn parse_component(name: &str) -> Result<Component> {
    name.parse::<Component>()
        .map_err(|e| CliError::Argument(e.to_string()))
}
