use thiserror::Error;

/// Result type returned from functions that can have our `Error`s.
pub type Result<T, E = TogglebrightError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TogglebrightError {
    #[error("{0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Display server query failed: {0}")]
    QueryUnavailable(String),

    #[error("Output {0:?} reports no brightness value")]
    MissingBrightness(String),

    #[error("Unparseable brightness value {0:?}")]
    MalformedBrightness(String),

    #[error("No such output: {0:?}")]
    UnknownOutput(String),

    #[error("No connected outputs exist")]
    NoOutputs,

    #[error("Display server rejected brightness {value} for {output}: {reason}")]
    BrightnessRejected {
        output: String,
        value: f64,
        reason: String,
    },

    #[error("Invalid toggle levels: {low} > {high}")]
    InvalidToggleLevels { low: f64, high: f64 },
}
