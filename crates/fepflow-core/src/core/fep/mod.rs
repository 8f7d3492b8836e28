//! # FEP Module
//!
//! Lambda schedules for the two decoupling stages of a solvation free-energy
//! calculation.
//!
//! A solute is first discharged (`Coulomb`: `vdw-q → vdw`) and then has its
//! van der Waals interactions switched off (`VDW`: `vdw → none`). Each stage is
//! described by a `FEP_schedule_<component>` section of the run input and
//! loaded into a [`FepSchedule`].
//!
//! ## Key Components
//!
//! - [`schedule`] - The schedule type, its loader, and validation
//! - [`mdp`] - Engine parameters for an individual lambda window

pub mod mdp;
pub mod schedule;

pub use mdp::MdpParameters;
pub use schedule::{FepSchedule, ScheduleEntry, ScheduleError, ScheduleKey};

use crate::core::config::{ConfigError, Configuration};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A decoupling stage of the solvation calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Coulomb,
    Vdw,
}

impl Component {
    pub const ALL: [Component; 2] = [Component::Coulomb, Component::Vdw];

    pub fn as_str(self) -> &'static str {
        match self {
            Component::Coulomb => "Coulomb",
            Component::Vdw => "VDW",
        }
    }

    /// Name of the run-input section holding this component's schedule.
    pub fn section(self) -> String {
        format!("FEP_schedule_{}", self.as_str())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown FEP component '{0}'. Expected 'Coulomb' or 'VDW'.")]
pub struct UnknownComponent(pub String);

impl FromStr for Component {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coulomb" | "coul" => Ok(Component::Coulomb),
            "vdw" => Ok(Component::Vdw),
            _ => Err(UnknownComponent(s.to_string())),
        }
    }
}

/// Schedules for both decoupling stages.
#[derive(Debug, Clone, PartialEq)]
pub struct FepSchedules {
    pub coulomb: FepSchedule,
    pub vdw: FepSchedule,
}

impl FepSchedules {
    pub fn load(cfg: &Configuration) -> Result<Self, ConfigError> {
        Ok(Self {
            coulomb: FepSchedule::load(cfg, &Component::Coulomb.section())?,
            vdw: FepSchedule::load(cfg, &Component::Vdw.section())?,
        })
    }

    pub fn get(&self, component: Component) -> &FepSchedule {
        match component {
            Component::Coulomb => &self.coulomb,
            Component::Vdw => &self.vdw,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, &FepSchedule)> {
        Component::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}
