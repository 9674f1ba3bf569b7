//! Configuration errors
//!
//! The simulation itself never fails; everything that can go wrong is caught
//! when the tuning and upgrade catalog are loaded at startup.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Tuning JSON could not be parsed
    Parse(String),
    /// A size, radius or speed that must be strictly positive was not
    NonPositive { field: &'static str, value: f32 },
    /// A value fell outside its allowed range
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Not enough unconditional upgrades to fill every menu slot
    TooFewUpgrades { available: usize, required: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid tuning file: {msg}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero (got {value})")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be within [{min}, {max}] (got {value})"),
            Self::TooFewUpgrades {
                available,
                required,
            } => write!(
                f,
                "upgrade catalog has {available} unconditional entries, need at least {required}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
