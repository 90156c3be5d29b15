//! Binned tables for tabulated neutrino spectra
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod binning;
mod error;
mod table_1d;
mod table_2d;

#[doc(inline)]
pub use binning::uniform_edges;

#[doc(inline)]
pub use table_1d::Table1D;

#[doc(inline)]
pub use table_2d::{Axis, Table2D};

#[doc(inline)]
pub use error::{Error, Result};
