use crate::core::config::{ConfigError, Configuration, Number};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{instrument, warn};

/// Coupling states accepted by the engine for `couple_lambda0`/`couple_lambda1`.
pub const COUPLING_STATES: [&str; 4] = ["vdw-q", "vdw", "q", "none"];

/// The options an FEP schedule section may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScheduleKey {
    Name,
    Label,
    Description,
    CoupleLambda0,
    CoupleLambda1,
    ScAlpha,
    ScPower,
    ScSigma,
    Lambdas,
}

impl ScheduleKey {
    pub const ALL: [ScheduleKey; 9] = [
        ScheduleKey::Name,
        ScheduleKey::Label,
        ScheduleKey::Description,
        ScheduleKey::CoupleLambda0,
        ScheduleKey::CoupleLambda1,
        ScheduleKey::ScAlpha,
        ScheduleKey::ScPower,
        ScheduleKey::ScSigma,
        ScheduleKey::Lambdas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleKey::Name => "name",
            ScheduleKey::Label => "label",
            ScheduleKey::Description => "description",
            ScheduleKey::CoupleLambda0 => "couple_lambda0",
            ScheduleKey::CoupleLambda1 => "couple_lambda1",
            ScheduleKey::ScAlpha => "sc_alpha",
            ScheduleKey::ScPower => "sc_power",
            ScheduleKey::ScSigma => "sc_sigma",
            ScheduleKey::Lambdas => "lambdas",
        }
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown FEP schedule key '{0}'")]
pub struct UnknownScheduleKey(pub String);

impl FromStr for ScheduleKey {
    type Err = UnknownScheduleKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownScheduleKey(s.to_string()))
    }
}

/// A borrowed view of one schedule entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEntry<'a> {
    Text(&'a str),
    Number(Number),
    Lambdas(&'a [f64]),
}

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("FEP schedule '{schedule}' has no '{key}' entry")]
    MissingEntry { schedule: String, key: ScheduleKey },

    #[error("FEP schedule '{schedule}' has an empty lambda sequence")]
    EmptyLambdas { schedule: String },

    #[error("Lambda {value} at position {index} of FEP schedule '{schedule}' lies outside [0, 1]")]
    LambdaOutOfRange {
        schedule: String,
        index: usize,
        value: f64,
    },

    #[error(
        "Lambdas of FEP schedule '{schedule}' must increase strictly, but position {index} holds {value} after {previous}"
    )]
    NonIncreasingLambdas {
        schedule: String,
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error(
        "Unknown coupling state '{state}' for '{key}' in FEP schedule '{schedule}'; expected one of vdw-q, vdw, q, none"
    )]
    UnknownCouplingState {
        schedule: String,
        key: ScheduleKey,
        state: String,
    },

    #[error("Lambda window {index} is out of range for FEP schedule '{schedule}' with {windows} windows")]
    WindowOutOfRange {
        schedule: String,
        index: usize,
        windows: usize,
    },
}

/// Parameters of one FEP stage, read from a `FEP_schedule_*` section.
///
/// Every entry is optional: an option absent from the section is absent here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FepSchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couple_lambda0: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couple_lambda1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sc_alpha: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sc_power: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sc_sigma: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambdas: Option<Vec<f64>>,
}

impl FepSchedule {
    /// Loads the schedule stored in `section`.
    ///
    /// A missing option is logged as a warning and left out of the schedule.
    /// A missing section, or an option of the wrong type, is an error.
    #[instrument(skip(cfg), level = "debug")]
    pub fn load(cfg: &Configuration, section: &str) -> Result<Self, ConfigError> {
        cfg.section(section)?;

        let text = |key: ScheduleKey| {
            optional(
                cfg.get_string(section, key.as_str()).map(str::to_string),
                section,
                key,
            )
        };
        let number =
            |key: ScheduleKey| optional(cfg.get_number(section, key.as_str()), section, key);

        Ok(Self {
            name: text(ScheduleKey::Name)?,
            label: text(ScheduleKey::Label)?,
            description: text(ScheduleKey::Description)?,
            couple_lambda0: text(ScheduleKey::CoupleLambda0)?,
            couple_lambda1: text(ScheduleKey::CoupleLambda1)?,
            sc_alpha: number(ScheduleKey::ScAlpha)?,
            sc_power: number(ScheduleKey::ScPower)?,
            sc_sigma: number(ScheduleKey::ScSigma)?,
            lambdas: optional(
                cfg.get_array(section, ScheduleKey::Lambdas.as_str()),
                section,
                ScheduleKey::Lambdas,
            )?,
        })
    }

    pub fn get(&self, key: ScheduleKey) -> Option<ScheduleEntry<'_>> {
        match key {
            ScheduleKey::Name => text_entry(&self.name),
            ScheduleKey::Label => text_entry(&self.label),
            ScheduleKey::Description => text_entry(&self.description),
            ScheduleKey::CoupleLambda0 => text_entry(&self.couple_lambda0),
            ScheduleKey::CoupleLambda1 => text_entry(&self.couple_lambda1),
            ScheduleKey::ScAlpha => self.sc_alpha.map(ScheduleEntry::Number),
            ScheduleKey::ScPower => self.sc_power.map(ScheduleEntry::Number),
            ScheduleKey::ScSigma => self.sc_sigma.map(ScheduleEntry::Number),
            ScheduleKey::Lambdas => self.lambdas.as_deref().map(ScheduleEntry::Lambdas),
        }
    }

    pub fn contains(&self, key: ScheduleKey) -> bool {
        self.get(key).is_some()
    }

    /// Keys present in this schedule.
    pub fn keys(&self) -> Vec<ScheduleKey> {
        ScheduleKey::ALL
            .into_iter()
            .filter(|&key| self.contains(key))
            .collect()
    }

    /// Recognized keys absent from this schedule.
    pub fn missing_keys(&self) -> Vec<ScheduleKey> {
        ScheduleKey::ALL
            .into_iter()
            .filter(|&key| !self.contains(key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_windows(&self) -> usize {
        self.lambdas.as_ref().map_or(0, Vec::len)
    }

    /// A name for messages: the label, else the name, else `"unnamed"`.
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("unnamed")
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        let lambdas = self.require_lambdas()?;
        if lambdas.is_empty() {
            return Err(ScheduleError::EmptyLambdas {
                schedule: self.display_name().to_string(),
            });
        }

        for (index, &value) in lambdas.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScheduleError::LambdaOutOfRange {
                    schedule: self.display_name().to_string(),
                    index,
                    value,
                });
            }
        }
        for (index, pair) in lambdas.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ScheduleError::NonIncreasingLambdas {
                    schedule: self.display_name().to_string(),
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        for (key, state) in [
            (ScheduleKey::CoupleLambda0, &self.couple_lambda0),
            (ScheduleKey::CoupleLambda1, &self.couple_lambda1),
        ] {
            if let Some(state) = state {
                if !COUPLING_STATES.contains(&state.as_str()) {
                    return Err(ScheduleError::UnknownCouplingState {
                        schedule: self.display_name().to_string(),
                        key,
                        state: state.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn lambda(&self, index: usize) -> Result<f64, ScheduleError> {
        let lambdas = self.require_lambdas()?;
        lambdas
            .get(index)
            .copied()
            .ok_or_else(|| ScheduleError::WindowOutOfRange {
                schedule: self.display_name().to_string(),
                index,
                windows: lambdas.len(),
            })
    }

    /// Directory name for a lambda window: `lambda * 1000` as four digits,
    /// so `0.05` becomes `"0050"` and `1.0` becomes `"1000"`.
    ///
    /// A lambda outside `[0, 1]` is a [`ScheduleError::LambdaOutOfRange`].
    pub fn window_dirname(&self, index: usize) -> Result<String, ScheduleError> {
        let lambda = self.lambda(index)?;
        if !(0.0..=1.0).contains(&lambda) {
            return Err(ScheduleError::LambdaOutOfRange {
                schedule: self.display_name().to_string(),
                index,
                value: lambda,
            });
        }
        Ok(format!("{:04}", (lambda * 1000.0).round() as i64))
    }

    pub(crate) fn require_lambdas(&self) -> Result<&[f64], ScheduleError> {
        self.lambdas
            .as_deref()
            .ok_or_else(|| self.missing(ScheduleKey::Lambdas))
    }

    pub(crate) fn missing(&self, key: ScheduleKey) -> ScheduleError {
        ScheduleError::MissingEntry {
            schedule: self.display_name().to_string(),
            key,
        }
    }
}

fn text_entry(value: &Option<String>) -> Option<ScheduleEntry<'_>> {
    value.as_deref().map(ScheduleEntry::Text)
}

fn optional<T>(
    result: Result<T, ConfigError>,
    section: &str,
    key: ScheduleKey,
) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::MissingOption { .. }) => {
            warn!(
                "Missing option '{}' in section '{}'; leaving it out of the FEP schedule.",
                key, section
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
