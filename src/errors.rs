use schema::Stat;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the static game tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// The embedded postcard blob could not be decoded.
    #[error("failed to decode bundled {table} table: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: postcard::Error,
    },
    /// A RON fixture could not be parsed.
    #[error("failed to parse {table} data: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: ron::error::SpannedError,
    },
    /// A record violated a table invariant.
    #[error("malformed {table} data: {details}")]
    Malformed { table: &'static str, details: String },
}

/// Errors raised while loading or validating the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A request from an untrusted caller was rejected before reaching the formulas.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("level {0} is outside 1..=100")]
    LevelOutOfRange(i64),
    #[error("IV for {stat} is {value}, expected 0..=31")]
    IvOutOfRange { stat: Stat, value: i64 },
    #[error("EV for {stat} is {value}, expected 0..=252")]
    EvOutOfRange { stat: Stat, value: i64 },
    #[error("EV total is {0}, expected at most 510")]
    EvTotalExceeded(i64),
    #[error("accuracy {0} is outside 0..=100")]
    AccuracyOutOfRange(i64),
    #[error("current HP {current} is outside 0..={max}")]
    HpOutOfRange { current: i64, max: u16 },
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("unknown item '{0}'")]
    UnknownItem(String),
    #[error("unknown damage class '{0}'")]
    UnknownDamageClass(String),
    #[error("{0}")]
    Invalid(String),
}

/// Errors surfaced by the JSON tool surface.
#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("capture rejected: {0}")]
    Capture(#[from] crate::battle::catch::CaptureError),
}

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Type alias for Results using ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Type alias for Results using InterfaceError
pub type InterfaceResult<T> = Result<T, InterfaceError>;
