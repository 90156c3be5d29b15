//! Nakazato supernova models from the tabulated ASCII database
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod loader;
mod model;
mod progenitor;

pub mod parsers;

#[doc(inline)]
pub use model::NakazatoModel;

#[doc(inline)]
pub use progenitor::{read_progenitors, Progenitor};

#[doc(inline)]
pub use loader::{
    load_full, load_integrated, parse_full, parse_integrated, FullData, IntegratedData,
    DATABASE_N_BINS_E,
};

#[doc(inline)]
pub use error::{Error, Result};
