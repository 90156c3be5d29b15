//! Result and Error types for neus-table

/// Type alias for Result<T, table::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `neus-table` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("at least two bin edges are required (found {0})")]
    TooFewEdges(usize),

    #[error("bin edge {0} is not a finite number")]
    NonFiniteEdge(usize),

    #[error("bin edges must be strictly increasing (failed at edge {0})")]
    NonIncreasingEdges(usize),

    #[error("inconsistent number of bin contents (expected {expected:?}, found {found:?})")]
    UnexpectedLength { expected: usize, found: usize },

    #[error("{value} is outside of the table domain [{lower}, {upper}]")]
    OutsideDomain { value: f64, lower: f64, upper: f64 },

    #[error("bin {index} does not exist (table has {n_bins} bins)")]
    BinOutOfRange { index: usize, n_bins: usize },

    #[error("failure in bin searching")]
    Utils(#[from] neus_utils::Error),
}
