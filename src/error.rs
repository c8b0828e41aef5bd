use thiserror::Error;

/// The caller handed us something that is not a quantity we know how to read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unsupported quantity shape: {0}")]
    UnsupportedShape(String),

    #[error("expected base must be 'V' or 'Hz', got '{0}'")]
    InvalidBase(String),

    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(String),
}

/// A unit token could not be resolved against the SI prefix table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("unknown SI prefix '{0}'")]
    UnknownPrefix(String),

    #[error("base unit '{found}' does not match expected '{expected}'")]
    BaseMismatch { found: String, expected: String },
}

/// The raw uncertainty table is not a grid we can compile.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("table contents are not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("table contents must be an object of row objects")]
    NotAGrid,

    #[error("unrecognized grid key '{0}'")]
    InvalidKey(String),

    #[error("missing row {0}")]
    MissingRow(usize),

    #[error("row {row}: missing column {col}")]
    MissingColumn { row: usize, col: usize },

    #[error("row {row}, column {col}: cell is not a string")]
    NonStringCell { row: usize, col: usize },

    #[error("unparsable label '{0}'")]
    InvalidLabel(String),

    #[error("unknown table unit '{0}'")]
    UnknownUnit(String),

    #[error("row {row}, column {col}: '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        col: usize,
        value: String,
    },
}

/// Any failure of the composed lookup entry points.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T, E = LookupError> = std::result::Result<T, E>;
