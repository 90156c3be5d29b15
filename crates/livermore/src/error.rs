//! Result and Error types for neus-livermore

/// Type alias for Result<T, livermore::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `neus-livermore` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("at least one {axis} bin is required")]
    NoBins { axis: &'static str },

    #[error("invalid domain, t in [{t_min}, {t_max}] and E in [{e_min}, {e_max}]")]
    InvalidDomain {
        t_min: f64,
        t_max: f64,
        e_min: f64,
        e_max: f64,
    },
}
