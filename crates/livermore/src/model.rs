//! The Livermore supernova model

// crate modules
use crate::error::{Error, Result};
use crate::oracle::{Oracle, OracleAdapter};

// neus modules
use neus_model::{
    Domain, Flavour, Marginal, MarginalCache, MarginalKey, PerFlavour, Quantity, Species,
    SupernovaModel, Totals,
};
use neus_table::{uniform_edges, Table1D, Table2D};

// external crates
use log::{debug, warn};

// standard library
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Default number of time bins for tables, 0.1 s each
const DEFAULT_N_BINS_T: usize = 179;

/// Default number of energy bins for tables, 1 MeV each
const DEFAULT_N_BINS_E: usize = 80;

/// Lazily built joint tables, one per flavour
type JointTables = PerFlavour<OnceCell<Rc<Table2D>>>;

/// Livermore model for a 20 solar mass progenitor
///
/// Point queries and totals come straight from the [Oracle] through an
/// [OracleAdapter]. Tables are only built on request, on uniform bins over
/// the oracle domain, and are kept until the model is dropped or
/// [LivermoreModel::clear] is called.
///
/// Time integrals never stop before 10 s. A spectrum requested for any
/// `t_max` below that is the spectrum up to 10 s.
///
/// ```rust
/// # use neus_livermore::LivermoreModel;
/// # use neus_model::{PerFlavour, Species, SupernovaModel};
/// let model = LivermoreModel::new(|_t: f64, _e: f64| PerFlavour::new(1e50, 1e50, 1e50));
///
/// let a = model.number_spectrum(Species::ElectronNeutrino, 2.0).unwrap();
/// let b = model.number_spectrum(Species::ElectronNeutrino, 10.0).unwrap();
/// assert!(std::rc::Rc::ptr_eq(&a, &b));
/// ```
pub struct LivermoreModel<O> {
    adapter: OracleAdapter<O>,
    data_location: Option<PathBuf>,
    n_bins_t: usize,
    n_bins_e: usize,
    totals: Totals,
    number_tables: JointTables,
    luminosity_tables: JointTables,
    marginals: MarginalCache,
}

impl<O: Oracle> LivermoreModel<O> {
    /// Model over the fixed Livermore domain
    pub fn new(oracle: O) -> Self {
        Self::from_adapter(OracleAdapter::new(oracle))
    }

    /// Model over an already configured adapter
    pub fn from_adapter(adapter: OracleAdapter<O>) -> Self {
        Self {
            adapter,
            data_location: None,
            n_bins_t: DEFAULT_N_BINS_T,
            n_bins_e: DEFAULT_N_BINS_E,
            totals: Totals::default(),
            number_tables: JointTables::default(),
            luminosity_tables: JointTables::default(),
            marginals: MarginalCache::default(),
        }
    }

    /// Directory holding the interpolation data used by the oracle
    ///
    /// Recorded for reference only, the oracle is responsible for its data.
    pub fn set_data_location(&mut self, dir: impl AsRef<Path>) {
        self.data_location = Some(dir.as_ref().to_path_buf());
    }

    pub fn data_location(&self) -> Option<&Path> {
        self.data_location.as_deref()
    }

    /// Number of time bins used for tables
    ///
    /// Changing the binning drops any tables built so far.
    pub fn set_n_bins_t(&mut self, n_bins: usize) -> Result<()> {
        if n_bins == 0 {
            return Err(Error::NoBins { axis: "time" });
        }
        self.n_bins_t = n_bins;
        self.clear_tables();
        Ok(())
    }

    /// Number of energy bins used for tables
    ///
    /// Changing the binning drops any tables built so far.
    pub fn set_n_bins_e(&mut self, n_bins: usize) -> Result<()> {
        if n_bins == 0 {
            return Err(Error::NoBins { axis: "energy" });
        }
        self.n_bins_e = n_bins;
        self.clear_tables();
        Ok(())
    }

    pub fn n_bins_t(&self) -> usize {
        self.n_bins_t
    }

    pub fn n_bins_e(&self) -> usize {
        self.n_bins_e
    }

    pub fn adapter(&self) -> &OracleAdapter<O> {
        &self.adapter
    }

    /// Marginal tables cached so far
    pub fn marginals(&self) -> &MarginalCache {
        &self.marginals
    }

    /// Drop every cached total and table
    pub fn clear(&mut self) {
        self.totals.clear();
        self.clear_tables();
    }

    fn clear_tables(&mut self) {
        self.number_tables = JointTables::default();
        self.luminosity_tables = JointTables::default();
        self.marginals.clear();
    }

    fn time_edges(&self) -> Vec<f64> {
        let domain = self.adapter.domain();
        uniform_edges(self.n_bins_t, domain.t_min, domain.t_max)
    }

    fn energy_edges(&self) -> Vec<f64> {
        let domain = self.adapter.domain();
        uniform_edges(self.n_bins_e, domain.e_min, domain.e_max)
    }

    /// Dense grid evaluation of a joint density at the bin centres
    fn joint_table(&self, quantity: Quantity, species: Species) -> Option<Rc<Table2D>> {
        let flavour = species.flavour();
        let cell = match quantity {
            Quantity::Number => self.number_tables.flavour(flavour),
            Quantity::Luminosity => self.luminosity_tables.flavour(flavour),
        };

        if let Some(table) = cell.get() {
            return Some(Rc::clone(table));
        }

        debug!(
            "Building {quantity:?} table for {flavour} on {}x{} bins",
            self.n_bins_t, self.n_bins_e
        );
        let table = Table2D::from_centers(self.time_edges(), self.energy_edges(), |t, e| {
            *self.adapter.density(quantity, t, e).flavour(flavour)
        });

        match table {
            Ok(table) => Some(Rc::clone(cell.get_or_init(|| Rc::new(table)))),
            Err(e) => {
                warn!("Failed to build {quantity:?} table for {species}: {e}");
                None
            }
        }
    }

    /// Cached 1D marginal, with the cutoff clamped before it becomes a key
    fn marginal(&self, species: Species, marginal: Marginal, cutoff: f64) -> Option<Rc<Table1D>> {
        let flavour = species.flavour();
        let domain = self.adapter.domain();

        let cutoff = match marginal {
            Marginal::NumberSpectrum | Marginal::LuminositySpectrum => {
                self.adapter.clamp_time_cutoff(cutoff)
            }
            _ => domain.clamp_energy(cutoff),
        };

        let key = MarginalKey::new(flavour, marginal, cutoff);
        self.marginals.get_or_build(key, || {
            debug!("Building {marginal:?} for {flavour} up to {cutoff}");
            let adapter = &self.adapter;
            let pick = |values: PerFlavour<f64>| *values.flavour(flavour);

            let table = match marginal {
                Marginal::NumberSpectrum => Table1D::from_centers(self.energy_edges(), |e| {
                    pick(adapter.integrate_over_time(Quantity::Number, e, cutoff))
                }),
                Marginal::LuminositySpectrum => Table1D::from_centers(self.energy_edges(), |e| {
                    pick(adapter.integrate_over_time(Quantity::Luminosity, e, cutoff))
                }),
                Marginal::NumberCurve => Table1D::from_centers(self.time_edges(), |t| {
                    pick(adapter.integrate_over_energy(Quantity::Number, t, cutoff))
                }),
                Marginal::LuminosityCurve => Table1D::from_centers(self.time_edges(), |t| {
                    pick(adapter.integrate_over_energy(Quantity::Luminosity, t, cutoff))
                }),
                Marginal::MeanEnergyCurve => Table1D::from_centers(self.time_edges(), |t| {
                    pick(adapter.mean_energy(t, cutoff))
                }),
            };

            match table {
                Ok(table) => Some(table),
                Err(e) => {
                    warn!("Failed to build {marginal:?} for {species}: {e}");
                    None
                }
            }
        })
    }
}

impl<O: Oracle> SupernovaModel for LivermoreModel<O> {
    fn name(&self) -> String {
        "LivermoreModel".to_string()
    }

    fn title(&self) -> String {
        "20 Solar mass, Livermore".to_string()
    }

    fn domain(&self) -> Domain {
        self.adapter.domain()
    }

    fn totals(&self) -> &Totals {
        &self.totals
    }

    fn compute_total(&self, quantity: Quantity, flavour: Flavour) -> f64 {
        debug!("Integrating {quantity:?} of {flavour} over the full domain");
        *self.adapter.integrate_over_both(quantity).flavour(flavour)
    }

    fn n2(&self, species: Species, time: f64, energy: f64) -> f64 {
        *self.adapter.density(Quantity::Number, time, energy).get(species)
    }

    fn ne(&self, species: Species, energy: f64) -> f64 {
        let t_max = self.adapter.domain().t_max;
        *self
            .adapter
            .integrate_over_time(Quantity::Number, energy, t_max)
            .get(species)
    }

    fn nt(&self, species: Species, time: f64) -> f64 {
        let e_max = self.adapter.domain().e_max;
        *self
            .adapter
            .integrate_over_energy(Quantity::Number, time, e_max)
            .get(species)
    }

    fn number_table(&self, species: Species) -> Option<Rc<Table2D>> {
        self.joint_table(Quantity::Number, species)
    }

    fn luminosity_table(&self, species: Species) -> Option<Rc<Table2D>> {
        self.joint_table(Quantity::Luminosity, species)
    }

    fn number_spectrum(&self, species: Species, t_max: f64) -> Option<Rc<Table1D>> {
        self.marginal(species, Marginal::NumberSpectrum, t_max)
    }

    fn luminosity_spectrum(&self, species: Species, t_max: f64) -> Option<Rc<Table1D>> {
        self.marginal(species, Marginal::LuminositySpectrum, t_max)
    }

    fn number_curve(&self, species: Species, e_max: f64) -> Option<Rc<Table1D>> {
        self.marginal(species, Marginal::NumberCurve, e_max)
    }

    fn luminosity_curve(&self, species: Species, e_max: f64) -> Option<Rc<Table1D>> {
        self.marginal(species, Marginal::LuminosityCurve, e_max)
    }

    fn mean_energy_curve(&self, species: Species, e_max: f64) -> Option<Rc<Table1D>> {
        self.marginal(species, Marginal::MeanEnergyCurve, e_max)
    }
}

impl<O> std::fmt::Debug for LivermoreModel<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("LivermoreModel")
            .field("adapter", &self.adapter)
            .field("data_location", &self.data_location)
            .field("n_bins_t", &self.n_bins_t)
            .field("n_bins_e", &self.n_bins_e)
            .field("totals", &self.totals)
            .field("marginals", &self.marginals.len())
            .finish_non_exhaustive()
    }
}
