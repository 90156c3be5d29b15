//! Result and Error types for neus-model

/// Type alias for Result<T, model::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `neus-model` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("type of neutrino must be one of 1, 2, 3, 4, 5, 6 (found {0})")]
    InvalidSpecies(u8),
}
