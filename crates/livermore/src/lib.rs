//! Livermore supernova model on top of an interpolation oracle
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod model;
mod oracle;

pub mod quadrature;

#[doc(inline)]
pub use model::LivermoreModel;

#[doc(inline)]
pub use oracle::{Oracle, OracleAdapter, ENERGY_RANGE, MIN_TIME_CUTOFF, TIME_RANGE};

#[doc(inline)]
pub use error::{Error, Result};
