use crate::utils::parser::ParseError;
use fepflow::core::config::ConfigError;
use fepflow::core::fep::ScheduleError;
use fepflow::core::forcefields::ForcefieldError;
use fepflow::core::topology::registry::TopologyError;
use fepflow::workflows::validate::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("FEP schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Force field error: {0}")]
    Forcefield(#[from] ForcefieldError),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid --set value: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
