//! Progenitor parameters and database naming conventions

// crate modules
use crate::error::Result;

// neus modules
use neus_utils::f;

// external crates
use serde::{Deserialize, Serialize};

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Metallicities below this are the low metallicity set
const LOW_METALLICITY: f64 = 0.01;

/// Progenitor star of a Nakazato model
///
/// The database only covers solar (0.02) and low (0.004) metallicity, so any
/// metallicity is sorted into one of these two buckets.
///
/// The 30 M☉ low metallicity progenitor never revives the shock and forms a
/// black hole. Its revive time is always taken as 0 and there is no full
/// time dependent data for it.
///
/// ```rust
/// # use neus_nakazato::Progenitor;
/// let progenitor = Progenitor::new(20.0, 0.004, 300.0);
/// assert_eq!(progenitor.name(), "model2013");
/// assert_eq!(progenitor.title(), "20 Solar mass, 0.004, 300 ms");
///
/// let black_hole = Progenitor::new(30.0, 0.004, 100.0);
/// assert!(black_hole.is_black_hole());
/// assert_eq!(black_hole.name(), "model3010");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progenitor {
    /// Initial mass, solar masses
    pub initial_mass: f64,
    /// Initial metallicity
    pub metallicity: f64,
    /// Shock revival time, ms
    pub revive_time: f64,
}

impl Default for Progenitor {
    fn default() -> Self {
        Self {
            initial_mass: 13.0,
            metallicity: 0.02,
            revive_time: 100.0,
        }
    }
}

impl Progenitor {
    pub fn new(initial_mass: f64, metallicity: f64, revive_time: f64) -> Self {
        Self {
            initial_mass,
            metallicity,
            revive_time,
        }
    }

    /// Database index of the metallicity, 0 for solar and 1 for low
    pub fn metallicity_bucket(&self) -> u8 {
        if self.metallicity < LOW_METALLICITY {
            1
        } else {
            0
        }
    }

    /// True for the 30 M☉ low metallicity progenitor
    pub fn is_black_hole(&self) -> bool {
        self.initial_mass == 30.0 && self.metallicity_bucket() == 1
    }

    /// Revive time actually used, ms
    pub fn effective_revive_time(&self) -> f64 {
        if self.is_black_hole() {
            0.0
        } else {
            self.revive_time
        }
    }

    /// Short identifier, `model{mass}{bucket}{revive time / 100 ms}`
    pub fn name(&self) -> String {
        f!("model{}", self.tag())
    }

    pub fn title(&self) -> String {
        let metallicity = match self.metallicity_bucket() {
            0 => "0.02",
            _ => "0.004",
        };
        f!(
            "{:.0} Solar mass, {metallicity}, {:.0} ms",
            self.initial_mass,
            self.effective_revive_time()
        )
    }

    /// Time integrated database file, `{dir}/integdata/integ{tag}.data`
    pub fn integrated_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref()
            .join("integdata")
            .join(f!("integ{}.data", self.tag()))
    }

    /// Time dependent database file, `{dir}/intpdata/intp{tag}.data`
    pub fn full_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref()
            .join("intpdata")
            .join(f!("intp{}.data", self.tag()))
    }

    fn tag(&self) -> String {
        f!(
            "{:.0}{}{:.0}",
            self.initial_mass,
            self.metallicity_bucket(),
            self.effective_revive_time() / 100.0
        )
    }
}

/// Read a list of progenitors from a JSON file
///
/// The file holds an array of objects with the [Progenitor] fields.
///
/// Example
/// ```rust, no_run
/// # use neus_nakazato::read_progenitors;
/// let grid = read_progenitors("path/to/progenitors.json").unwrap();
/// ```
pub fn read_progenitors<P: AsRef<Path>>(path: P) -> Result<Vec<Progenitor>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}
