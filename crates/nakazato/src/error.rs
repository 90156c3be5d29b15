//! Result and Error types for neus-nakazato

/// Type alias for Result<T, nakazato::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `neus-nakazato` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to (de)serialise")]
    FailedSerde(#[from] serde_json::Error),

    #[error("failed to parse line {line} \"{content}\"")]
    ParseError { line: usize, content: String },

    #[error("no spectrum rows found")]
    NoSpectrumRows,

    #[error("spectrum row on line {0} comes before any time stamp")]
    RowBeforeTimeStamp(usize),

    #[error("inconsistent rows in block {block} (expected {expected:?}, found {found:?})")]
    UnexpectedNumberOfRows {
        block: usize,
        expected: usize,
        found: usize,
    },

    #[error("at least two time samples are required (found {0})")]
    TooFewTimeSamples(usize),

    #[error("failed to build table")]
    TableError(#[from] neus_table::Error),
}
