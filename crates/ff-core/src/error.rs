use thiserror::Error;

pub type FfResult<T> = Result<T, FfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
