use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or persisting a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A derived value needs a field that was never set
    #[error("Field `{field}` is not set")]
    MissingField { field: &'static str },

    /// `max_iter_inc` is zero so the Gaussian increment is undefined
    #[error("Cannot divide {numerator} Gaussians over zero increment iterations")]
    DivisionByZero { numerator: i64 },

    /// An override could not be stored in the field it names
    #[error("Option `{key}` expects {expected}, got {found}")]
    InvalidOption {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
