//! The query surface shared by every supernova model

// crate modules
use crate::cache::{Total, Totals};
use crate::domain::Domain;
use crate::physics::{fermi_dirac, Quantity, ERG_PER_MEV};
use crate::species::{Flavour, Species};
use crate::summary::Summary;

// neus modules
use neus_table::{uniform_edges, Table1D, Table2D};

// external crates
use log::warn;

// standard library
use std::rc::Rc;

/// Common contract of the Livermore and Nakazato models
///
/// Implementors provide point densities, full-domain totals, and the table
/// views. Totals are memoised through [SupernovaModel::totals], so
/// [SupernovaModel::n_all], [SupernovaModel::l_all] and
/// [SupernovaModel::e_ave] compute their value at most once per flavour.
///
/// Queries outside of the [Domain] are never an error. A warning is logged
/// and the result is `0.0`, or `None` for tables. Species 3 to 6 always
/// resolve to the ν_x tables.
///
/// The trait is object safe, so different models can be compared through
/// `&dyn SupernovaModel`.
pub trait SupernovaModel: std::fmt::Debug {
    /// Short identifier, e.g. `model1301`
    fn name(&self) -> String;

    /// Human readable description
    fn title(&self) -> String;

    /// Time (s) and energy (MeV) ranges covered by the model
    fn domain(&self) -> Domain;

    /// Memoised totals owned by the model
    fn totals(&self) -> &Totals;

    /// Uncached total of a quantity over the full domain
    ///
    /// In 10⁵⁰ for numbers and 10⁵⁰ erg for luminosities.
    fn compute_total(&self, quantity: Quantity, flavour: Flavour) -> f64;

    /// Number density at a point, 10⁵⁰ / s / MeV
    fn n2(&self, species: Species, time: f64, energy: f64) -> f64;

    /// Number integrated over time, 10⁵⁰ / MeV
    fn ne(&self, species: Species, energy: f64) -> f64;

    /// Number integrated over energy, 10⁵⁰ / s
    fn nt(&self, species: Species, time: f64) -> f64;

    /// Total number of neutrinos, 10⁵⁰
    fn n_all(&self, species: Species) -> f64 {
        let flavour = species.flavour();
        self.totals().get_or_compute(Total::Number, flavour, || {
            self.compute_total(Quantity::Number, flavour)
        })
    }

    /// Total energy carried by neutrinos, 10⁵⁰ erg
    fn l_all(&self, species: Species) -> f64 {
        let flavour = species.flavour();
        self.totals().get_or_compute(Total::Luminosity, flavour, || {
            self.compute_total(Quantity::Luminosity, flavour)
        })
    }

    /// Average neutrino energy in MeV, zero when there are no neutrinos
    fn e_ave(&self, species: Species) -> f64 {
        let flavour = species.flavour();
        self.totals().get_or_compute(Total::MeanEnergy, flavour, || {
            let n_all = self.n_all(species);
            if n_all == 0.0 {
                warn!("No {flavour} neutrinos in {}, average energy set to 0", self.name());
                return 0.0;
            }
            self.l_all(species) / ERG_PER_MEV / n_all
        })
    }

    /// Fermi-Dirac approximation of N(E), 10⁵⁰ / MeV
    fn ne_fd(&self, species: Species, energy: f64) -> f64 {
        fermi_dirac(self.n_all(species), self.e_ave(species), energy)
    }

    /// Joint number density N(t, E)
    ///
    /// The `X` axis is time in seconds and the `Y` axis is energy in MeV.
    fn number_table(&self, species: Species) -> Option<Rc<Table2D>>;

    /// Joint luminosity density L(t, E), same axes as the number table
    fn luminosity_table(&self, species: Species) -> Option<Rc<Table2D>>;

    /// N(E) integrated from the start of the model up to `t_max`
    ///
    /// A `t_max` above the end of the model is taken as the end.
    fn number_spectrum(&self, species: Species, t_max: f64) -> Option<Rc<Table1D>>;

    /// L(E) integrated from the start of the model up to `t_max`
    fn luminosity_spectrum(&self, species: Species, t_max: f64) -> Option<Rc<Table1D>>;

    /// N(t) integrated from the lowest energy up to `e_max`
    ///
    /// An `e_max` above the highest energy is taken as the highest energy.
    fn number_curve(&self, species: Species, e_max: f64) -> Option<Rc<Table1D>>;

    /// L(t) integrated from the lowest energy up to `e_max`
    fn luminosity_curve(&self, species: Species, e_max: f64) -> Option<Rc<Table1D>>;

    /// Average energy <E>(t) over energies up to `e_max`
    fn mean_energy_curve(&self, species: Species, e_max: f64) -> Option<Rc<Table1D>>;

    /// Fermi-Dirac N(E) on `n_bins` equal bins over the energy domain
    fn fermi_dirac_spectrum(&self, species: Species, n_bins: usize) -> Option<Table1D> {
        let domain = self.domain();
        let (n_all, e_ave) = (self.n_all(species), self.e_ave(species));
        let edges = uniform_edges(n_bins, domain.e_min, domain.e_max);

        match Table1D::from_centers(edges, |e| fermi_dirac(n_all, e_ave, e)) {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("No Fermi-Dirac spectrum for {species} in {}: {e}", self.name());
                None
            }
        }
    }

    /// Totals of every flavour in absolute units
    fn summary(&self) -> Summary {
        Summary::new(self)
    }
}
