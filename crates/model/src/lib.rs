//! Common contract and bookkeeping for supernova neutrino models
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod cache;
mod domain;
mod error;
mod model;
mod physics;
mod species;
mod summary;

#[doc(inline)]
pub use model::SupernovaModel;

#[doc(inline)]
pub use species::{Flavour, PerFlavour, Species};

#[doc(inline)]
pub use domain::Domain;

#[doc(inline)]
pub use cache::{Marginal, MarginalCache, MarginalKey, Total, Totals};

#[doc(inline)]
pub use physics::{fermi_dirac, Quantity, ERG_PER_MEV, SCALE, UNIT};

#[doc(inline)]
pub use summary::{FlavourSummary, Summary};

#[doc(inline)]
pub use error::{Error, Result};
