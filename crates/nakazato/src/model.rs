//! The Nakazato supernova model

// crate modules
use crate::error::Result;
use crate::loader::{load_full, load_integrated, FullData, IntegratedData};
use crate::progenitor::Progenitor;

// neus modules
use neus_model::{
    Domain, Flavour, Marginal, MarginalCache, MarginalKey, PerFlavour, Quantity, Species,
    SupernovaModel, Totals,
};
use neus_table::{Axis, Table1D, Table2D};

// external crates
use log::{debug, warn};

// standard library
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Number and luminosity tables of every flavour, shared out by reference
#[derive(Debug)]
struct Tables<T> {
    number: PerFlavour<Rc<T>>,
    luminosity: PerFlavour<Rc<T>>,
}

impl<T> Tables<T> {
    fn new(number: PerFlavour<T>, luminosity: PerFlavour<T>) -> Self {
        Self {
            number: number.map(Rc::new),
            luminosity: luminosity.map(Rc::new),
        }
    }

    fn get(&self, quantity: Quantity, species: Species) -> Rc<T> {
        let tables = match quantity {
            Quantity::Number => &self.number,
            Quantity::Luminosity => &self.luminosity,
        };
        Rc::clone(tables.get(species))
    }
}

/// Nakazato model for one progenitor of the database
///
/// Two kinds of data can be loaded. The time integrated spectra give the
/// totals and N(E). The time dependent spectra give everything that depends
/// on time. Either may be missing, in which case the queries that need it
/// warn and return `0.0` or `None`.
///
/// Marginals are projections of the time dependent tables. They are built on
/// request and cached by flavour and cutoff, with the cutoff lowered to the
/// end of the tables first.
///
/// ```rust
/// # use neus_nakazato::{NakazatoModel, Progenitor};
/// # use neus_model::{Species, SupernovaModel};
/// let mut model = NakazatoModel::new(Progenitor::default());
/// model.load_data("data").unwrap();
///
/// assert_eq!(model.name(), "model1301");
/// assert!(model.n_all(Species::TauNeutrino) > 0.0);
/// ```
#[derive(Debug)]
pub struct NakazatoModel {
    progenitor: Progenitor,
    data_location: Option<PathBuf>,
    integrated: Option<Tables<Table1D>>,
    full: Option<Tables<Table2D>>,
    totals: Totals,
    marginals: MarginalCache,
}

impl NakazatoModel {
    /// Model with no data loaded yet
    pub fn new(progenitor: Progenitor) -> Self {
        Self {
            progenitor,
            data_location: None,
            integrated: None,
            full: None,
            totals: Totals::default(),
            marginals: MarginalCache::default(),
        }
    }

    /// Model over data that is already in memory
    pub fn with_data(
        progenitor: Progenitor,
        integrated: Option<IntegratedData>,
        full: Option<FullData>,
    ) -> Self {
        let mut model = Self::new(progenitor);
        model.integrated = integrated.map(|d| Tables::new(d.number, d.luminosity));
        model.full = full.map(|d| Tables::new(d.number, d.luminosity));
        model
    }

    /// Load both database files of the progenitor from `dir`
    ///
    /// A file that does not exist is skipped with a warning and the model
    /// carries on without it. A file that exists but cannot be read is an
    /// error, and leaves the model with no data at all. Anything derived from
    /// previously loaded data is dropped either way.
    pub fn load_data(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        self.data_location = Some(dir.to_path_buf());
        self.integrated = None;
        self.full = None;
        self.clear();

        let path = self.progenitor.integrated_path(dir);
        let integrated = if path.is_file() {
            let data = load_integrated(&path)?;
            Some(Tables::new(data.number, data.luminosity))
        } else {
            warn!("{path:?} cannot be read, no integrated data for {}", self.name());
            None
        };

        let path = self.progenitor.full_path(dir);
        let full = if self.progenitor.is_black_hole() {
            warn!("No time dependent data for {}, a black hole forms", self.name());
            None
        } else if path.is_file() {
            let data = load_full(&path)?;
            Some(Tables::new(data.number, data.luminosity))
        } else {
            warn!("{path:?} cannot be read, no time dependent data for {}", self.name());
            None
        };

        self.integrated = integrated;
        self.full = full;
        Ok(())
    }

    pub fn progenitor(&self) -> &Progenitor {
        &self.progenitor
    }

    /// Directory of the last [NakazatoModel::load_data] call
    pub fn data_location(&self) -> Option<&Path> {
        self.data_location.as_deref()
    }

    pub fn has_integrated_data(&self) -> bool {
        self.integrated.is_some()
    }

    pub fn has_full_data(&self) -> bool {
        self.full.is_some()
    }

    /// Marginal tables cached so far
    pub fn marginals(&self) -> &MarginalCache {
        &self.marginals
    }

    /// Drop every cached total and marginal
    pub fn clear(&mut self) {
        self.totals.clear();
        self.marginals.clear();
    }

    /// Time integrated spectrum as found in the database
    ///
    /// N(E) in 10⁵⁰ / MeV or L(E) in 10⁵⁰ erg / MeV.
    pub fn integrated_spectrum(&self, species: Species, quantity: Quantity) -> Option<Rc<Table1D>> {
        match &self.integrated {
            Some(tables) => Some(tables.get(quantity, species)),
            None => {
                warn!("Integrated spectrum of {species} does not exist, is the database loaded?");
                None
            }
        }
    }

    fn joint_table(&self, quantity: Quantity, species: Species) -> Option<Rc<Table2D>> {
        match &self.full {
            Some(tables) => Some(tables.get(quantity, species)),
            None => {
                warn!("{quantity:?} table of {species} does not exist, is the database loaded?");
                None
            }
        }
    }

    /// Cached projection of a joint table, with the cutoff lowered first
    fn marginal(&self, species: Species, marginal: Marginal, cutoff: f64) -> Option<Rc<Table1D>> {
        let (quantity, retain) = match marginal {
            Marginal::NumberSpectrum => (Quantity::Number, Axis::Y),
            Marginal::LuminositySpectrum => (Quantity::Luminosity, Axis::Y),
            Marginal::NumberCurve | Marginal::MeanEnergyCurve => (Quantity::Number, Axis::X),
            Marginal::LuminosityCurve => (Quantity::Luminosity, Axis::X),
        };

        let table = self.joint_table(quantity, species)?;
        let cutoff = cutoff.min(table.upper(retain.other()));

        let flavour = species.flavour();
        let key = MarginalKey::new(flavour, marginal, cutoff);
        self.marginals.get_or_build(key, || {
            debug!("Building {marginal:?} for {flavour} up to {cutoff}");
            match marginal {
                Marginal::MeanEnergyCurve => Some(table.mean(retain, Some(cutoff))),
                _ => Some(table.projection(retain, Some(cutoff))),
            }
        })
    }

    fn interpolate_1d(&self, table: Option<Rc<Table1D>>, x: f64) -> f64 {
        let Some(table) = table else {
            return 0.0;
        };
        table.interpolate(x).unwrap_or_else(|e| {
            warn!("{}: {e}, returning 0", self.name());
            0.0
        })
    }
}

impl SupernovaModel for NakazatoModel {
    fn name(&self) -> String {
        self.progenitor.name()
    }

    fn title(&self) -> String {
        self.progenitor.title()
    }

    /// Ranges of the time dependent tables where available
    ///
    /// Without them, the energy range comes from the integrated spectra and
    /// the time range is empty.
    fn domain(&self) -> Domain {
        if let Some(full) = &self.full {
            let table = &full.number.electron;
            return Domain::new(
                (table.lower(Axis::X), table.upper(Axis::X)),
                (table.lower(Axis::Y), table.upper(Axis::Y)),
            );
        }

        match &self.integrated {
            Some(integrated) => {
                let table = &integrated.number.electron;
                Domain::new((0.0, 0.0), (table.lower(), table.upper()))
            }
            None => Domain::default(),
        }
    }

    fn totals(&self) -> &Totals {
        &self.totals
    }

    fn compute_total(&self, quantity: Quantity, flavour: Flavour) -> f64 {
        match &self.integrated {
            Some(tables) => {
                debug!("Integrating {quantity:?} of {flavour} over the integrated spectrum");
                tables.get(quantity, flavour.representative()).integral(true)
            }
            None => {
                warn!(
                    "No integrated data for {}, total {quantity:?} of {flavour} set to 0",
                    self.name()
                );
                0.0
            }
        }
    }

    fn n2(&self, species: Species, time: f64, energy: f64) -> f64 {
        let Some(table) = self.joint_table(Quantity::Number, species) else {
            return 0.0;
        };
        table.interpolate(time, energy).unwrap_or_else(|e| {
            warn!("{}: {e}, returning 0", self.name());
            0.0
        })
    }

    fn ne(&self, species: Species, energy: f64) -> f64 {
        self.interpolate_1d(self.integrated_spectrum(species, Quantity::Number), energy)
    }

    fn nt(&self, species: Species, time: f64) -> f64 {
        self.interpolate_1d(self.number_curve(species, f64::INFINITY), time)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{parse_full, parse_integrated};

    const INTEGRATED: &str = "\
header
 1.0  1.0  1.0E+50 2.0E+50 3.0E+50 4.0E+50 5.0E+50 6.0E+50
 3.0  3.0  2.0E+50 4.0E+50 6.0E+50 8.0E+50 1.0E+51 1.2E+51
";

    const FULL: &str = "\
1.0
 1.0  1.0  1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50
 3.0  3.0  1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50
2.0
 1.0  1.0  1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50
 3.0  3.0  1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50 1.0E+50
";

    fn model() -> NakazatoModel {
        NakazatoModel::with_data(
            Progenitor::default(),
            parse_integrated(INTEGRATED).ok(),
            parse_full(FULL).ok(),
        )
    }

    #[test]
    fn domain_follows_tables() {
        let domain = model().domain();
        assert_eq!(domain, Domain::new((0.5, 2.5), (0.0, 3.0)));

        let integrated_only = NakazatoModel::with_data(
            Progenitor::default(),
            parse_integrated(INTEGRATED).ok(),
            None,
        );
        assert_eq!(integrated_only.domain(), Domain::new((0.0, 0.0), (0.0, 3.0)));
        assert_eq!(NakazatoModel::new(Progenitor::default()).domain(), Domain::default());
    }

    #[test]
    fn totals_from_integrated_spectra() {
        let model = model();
        // widths are 1 and 2
        let expected = 3.0e50 / 1e50 + 2.0 * (6.0e50 / 1e50);
        assert_eq!(model.n_all(Species::MuonNeutrino), expected);
        assert_eq!(model.n_all(Species::TauAntineutrino), expected);
        assert_eq!(model.totals().evaluations(), 1);
    }

    #[test]
    fn cutoff_is_lowered_to_table_end() {
        let model = model();
        let a = model.number_spectrum(Species::ElectronNeutrino, 2.5).unwrap();
        let b = model.number_spectrum(Species::ElectronNeutrino, 100.0).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(model.marginals().builds(), 1);
    }

    #[test]
    fn missing_data_is_not_an_error() {
        let model = NakazatoModel::new(Progenitor::default());
        assert!(model.number_table(Species::ElectronNeutrino).is_none());
        assert!(model.number_spectrum(Species::ElectronNeutrino, 1.0).is_none());
        assert_eq!(model.n2(Species::ElectronNeutrino, 1.0, 1.0), 0.0);
        assert_eq!(model.ne(Species::ElectronNeutrino, 1.0), 0.0);
        assert_eq!(model.nt(Species::ElectronNeutrino, 1.0), 0.0);
        assert_eq!(model.n_all(Species::ElectronNeutrino), 0.0);
        assert_eq!(model.e_ave(Species::ElectronNeutrino), 0.0);
    }

    #[test]
    fn clear_drops_derived_values() {
        let mut model = model();
        model.n_all(Species::ElectronNeutrino);
        model.number_curve(Species::ElectronNeutrino, 10.0);
        model.clear();
        assert_eq!(model.totals().evaluations(), 0);
        assert!(model.marginals().is_empty());
        assert!(model.has_full_data());
    }
}
