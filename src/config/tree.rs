use std::{fs, path::Path};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::logging::Logger;

use super::error::ConfigLoadError;

/// Read-only nested configuration loaded once at startup.
///
/// Lookups never fail: a missing key or a scalar met mid-path yields the
/// caller's default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    root: Table,
}

impl ConfigTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_table(root: Table) -> Self {
        Self { root }
    }

    /// Loads the optional config file, degrading to an empty tree on any
    /// read or parse failure.
    pub fn load(path: Option<&Path>, logger: &Logger) -> Self {
        let Some(path) = path else {
            debug!(parent: logger.span(), "no config file given, using environment and defaults");
            return Self::empty();
        };

        match Self::try_load(path) {
            Ok(tree) => {
                debug!(parent: logger.span(), path = %path.display(), "loaded config file");
                tree
            }
            Err(err) => {
                warn!(parent: logger.span(), "config file load failed: {err}");
                Self::empty()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        contents.parse::<Table>().map(Self::from_table)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walks `path` key by key through nested tables.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut value = self.root.get(*first)?;
        for key in rest {
            value = value.as_table()?.get(*key)?;
        }
        Some(value)
    }

    /// Typed lookup; `default` is owned per call and returned whenever the
    /// path is absent or holds a value of another type.
    pub fn get_or<T: FromConfigValue>(&self, path: &[&str], default: T) -> T {
        self.get(path).and_then(T::from_config_value).unwrap_or(default)
    }
}

/// Conversion from a raw TOML value into a typed setting.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &Value) -> Option<Self>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}
