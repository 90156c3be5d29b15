//! `neus` is a small toolkit of supernova neutrino emission models
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use neus_utils as utils;

#[doc(inline)]
pub use neus_table as table;

#[doc(inline)]
pub use neus_model as model;

#[cfg(feature = "livermore")]
#[cfg_attr(docsrs, doc(cfg(feature = "livermore")))]
#[doc(inline)]
pub use neus_livermore as livermore;

#[cfg(feature = "nakazato")]
#[cfg_attr(docsrs, doc(cfg(feature = "nakazato")))]
#[doc(inline)]
pub use neus_nakazato as nakazato;
