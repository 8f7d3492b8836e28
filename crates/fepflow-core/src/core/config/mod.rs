//! # Config Module
//!
//! Run-input configuration for solvation free-energy workflows.
//!
//! A [`Configuration`] is a two-level mapping: section name to option name to
//! [`Value`]. It is stored on disk as TOML, one table per section, and
//! serializes back to the same textual form so a written file reloads into an
//! equal object.
//!
//! The crate bundles a complete default run input ([`DEFAULT_RUNINPUT`]).
//! [`get_configuration`] starts from those defaults and merges a user file
//! over them option by option.
//!
//! ```ignore
//! use fepflow::core::config::get_configuration;
//!
//! let cfg = get_configuration(None)?;
//! let method = cfg.get_string("FEP", "method")?;
//! ```

mod value;

pub use value::{Number, Value};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// The bundled default run input.
pub const DEFAULT_RUNINPUT: &str = include_str!("../../../data/runinput.toml");

/// Label used in place of a file path for configurations parsed from memory.
const BUNDLED_SOURCE: &str = "<bundled runinput.toml>";

pub type Section = BTreeMap<String, Value>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Missing configuration section '{0}'")]
    MissingSection(String),
    #[error("Missing option '{option}' in section '{section}'")]
    MissingOption { section: String, option: String },
    #[error("Option '{option}' in section '{section}' must be {expected}, found {found}")]
    TypeMismatch {
        section: String,
        option: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Option '{option}' in section '{section}' contains a non-numeric entry '{value}'")]
    InvalidNumber {
        section: String,
        option: String,
        value: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    sections: BTreeMap<String, Section>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the bundled default run input.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_RUNINPUT, BUNDLED_SOURCE)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading run input from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: source_name.to_string(),
            source: e,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        debug!("Writing run input to {:?}", path);
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Merges `other` into `self`. Options present in `other` replace the
    /// existing ones; everything else is kept.
    pub fn merge(&mut self, other: Configuration) {
        for (name, section) in other.sections {
            self.sections.entry(name).or_default().extend(section);
        }
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|s| s.contains_key(option))
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn section(&self, section: &str) -> Result<&Section, ConfigError> {
        self.sections
            .get(section)
            .ok_or_else(|| ConfigError::MissingSection(section.to_string()))
    }

    pub fn options(&self, section: &str) -> Result<impl Iterator<Item = &str>, ConfigError> {
        Ok(self.section(section)?.keys().map(String::as_str))
    }

    pub fn set(&mut self, section: &str, option: &str, value: impl Into<Value>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(option.to_string(), value.into());
    }

    /// Removes an option, returning its previous value.
    pub fn remove_option(&mut self, section: &str, option: &str) -> Option<Value> {
        self.sections.get_mut(section)?.remove(option)
    }

    pub fn get(&self, section: &str, option: &str) -> Result<&Value, ConfigError> {
        self.section(section)?
            .get(option)
            .ok_or_else(|| ConfigError::MissingOption {
                section: section.to_string(),
                option: option.to_string(),
            })
    }

    pub fn get_string(&self, section: &str, option: &str) -> Result<&str, ConfigError> {
        let value = self.get(section, option)?;
        value
            .as_str()
            .ok_or_else(|| type_mismatch(section, option, "a string", value))
    }

    pub fn get_number(&self, section: &str, option: &str) -> Result<Number, ConfigError> {
        let value = self.get(section, option)?;
        value
            .as_number()
            .ok_or_else(|| type_mismatch(section, option, "a number", value))
    }

    pub fn get_float(&self, section: &str, option: &str) -> Result<f64, ConfigError> {
        self.get_number(section, option).map(Number::as_f64)
    }

    pub fn get_int(&self, section: &str, option: &str) -> Result<i64, ConfigError> {
        match self.get(section, option)? {
            Value::Integer(i) => Ok(*i),
            other => Err(type_mismatch(section, option, "an integer", other)),
        }
    }

    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool, ConfigError> {
        match self.get(section, option)? {
            Value::Boolean(b) => Ok(*b),
            other => Err(type_mismatch(section, option, "a boolean", other)),
        }
    }

    /// Reads a sequence of numbers, stored either as a TOML array or as a
    /// comma-separated string such as `"0.0, 0.25, 1"`.
    pub fn get_array(&self, section: &str, option: &str) -> Result<Vec<f64>, ConfigError> {
        let invalid = |value: String| ConfigError::InvalidNumber {
            section: section.to_string(),
            option: option.to_string(),
            value,
        };
        match self.get(section, option)? {
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_number()
                        .map(Number::as_f64)
                        .ok_or_else(|| invalid(item.to_string()))
                })
                .collect(),
            Value::String(s) => split_list(s)
                .map(|item| item.parse::<f64>().map_err(|_| invalid(item.to_string())))
                .collect(),
            other => Err(type_mismatch(section, option, "an array", other)),
        }
    }

    /// Reads a list of strings, stored either as an array of strings or as a
    /// comma-separated string.
    pub fn get_list(&self, section: &str, option: &str) -> Result<Vec<String>, ConfigError> {
        match self.get(section, option)? {
            Value::String(s) => Ok(split_list(s).map(str::to_string).collect()),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| type_mismatch(section, option, "a list of strings", item))
                })
                .collect(),
            other => Err(type_mismatch(section, option, "a list", other)),
        }
    }

    /// Reads a path option, expanding a leading `~` and `$VAR`/`${VAR}`
    /// environment references. Unset variables are left untouched.
    pub fn get_path(&self, section: &str, option: &str) -> Result<PathBuf, ConfigError> {
        let raw = self.get_string(section, option)?;
        Ok(PathBuf::from(expand_path(raw)))
    }
}

/// Loads the bundled defaults and, when given, merges a user run input over them.
pub fn get_configuration(path: Option<&Path>) -> Result<Configuration, ConfigError> {
    let mut cfg = Configuration::bundled()?;
    if let Some(path) = path {
        cfg.merge(Configuration::load(path)?);
    }
    Ok(cfg)
}

fn type_mismatch(section: &str, option: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        section: section.to_string(),
        option: option.to_string(),
        expected,
        found: found.type_name(),
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn expand_path(raw: &str) -> String {
    let with_home = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match BaseDirs::new() {
            Some(dirs) => format!("{}{}", dirs.home_dir().display(), rest),
            None => raw.to_string(),
        },
        _ => raw.to_string(),
    };
    expand_env_vars(&with_home)
}

fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let braced = matches!(chars.peek(), Some((_, '{')));
        if braced {
            chars.next();
        }
        let mut name = String::new();
        while let Some(&(_, nc)) = chars.peek() {
            if nc.is_ascii_alphanumeric() || nc == '_' {
                name.push(nc);
                chars.next();
            } else {
                break;
            }
        }
        let closed = braced && matches!(chars.peek(), Some((_, '}')));
        if closed {
            chars.next();
        }
        let end = chars.peek().map_or(input.len(), |&(i, _)| i);

        match std::env::var(&name) {
            Ok(value) if !name.is_empty() && (!braced || closed) => out.push_str(&value),
            _ => out.push_str(&input[start..end]),
        }
    }
    out
}
