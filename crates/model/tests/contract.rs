//! Integration tests for the default behaviour of the model contract

use neus_model::{
    Domain, Flavour, PerFlavour, Quantity, Species, SupernovaModel, Totals, ERG_PER_MEV,
};
use neus_table::{Table1D, Table2D};
use rstest::{fixture, rstest};

use std::cell::Cell;
use std::rc::Rc;

/// Flat spectrum with a known number and energy per flavour
#[derive(Debug, Default)]
struct FlatModel {
    totals: Totals,
    number: PerFlavour<f64>,
    mean_energy: PerFlavour<f64>,
    calls: Cell<usize>,
}

impl SupernovaModel for FlatModel {
    fn name(&self) -> String {
        "flat".to_string()
    }

    fn title(&self) -> String {
        "Flat test model".to_string()
    }

    fn domain(&self) -> Domain {
        Domain::new((0.0, 10.0), (0.0, 50.0))
    }

    fn totals(&self) -> &Totals {
        &self.totals
    }

    fn compute_total(&self, quantity: Quantity, flavour: Flavour) -> f64 {
        self.calls.set(self.calls.get() + 1);
        let number = *self.number.flavour(flavour);
        match quantity {
            Quantity::Number => number,
            Quantity::Luminosity => number * quantity.weight(*self.mean_energy.flavour(flavour)),
        }
    }

    fn n2(&self, species: Species, time: f64, energy: f64) -> f64 {
        let domain = self.domain();
        if !(domain.check_time(time) && domain.check_energy(energy)) {
            return 0.0;
        }
        *self.number.get(species) / 500.0
    }

    fn ne(&self, species: Species, _energy: f64) -> f64 {
        *self.number.get(species) / 50.0
    }

    fn nt(&self, species: Species, _time: f64) -> f64 {
        *self.number.get(species) / 10.0
    }

    fn number_table(&self, _species: Species) -> Option<Rc<Table2D>> {
        None
    }

    fn luminosity_table(&self, _species: Species) -> Option<Rc<Table2D>> {
        None
    }

    fn number_spectrum(&self, _species: Species, _t_max: f64) -> Option<Rc<Table1D>> {
        None
    }

    fn luminosity_spectrum(&self, _species: Species, _t_max: f64) -> Option<Rc<Table1D>> {
        None
    }

    fn number_curve(&self, _species: Species, _e_max: f64) -> Option<Rc<Table1D>> {
        None
    }

    fn luminosity_curve(&self, _species: Species, _e_max: f64) -> Option<Rc<Table1D>> {
        None
    }

    fn mean_energy_curve(&self, _species: Species, _e_max: f64) -> Option<Rc<Table1D>> {
        None
    }
}

#[fixture]
fn model() -> FlatModel {
    FlatModel {
        number: PerFlavour::new(2.0, 3.0, 1.0),
        mean_energy: PerFlavour::new(10.0, 15.0, 1.0),
        ..Default::default()
    }
}

#[rstest]
fn totals_are_memoised(model: FlatModel) {
    let first = model.n_all(Species::ElectronNeutrino);
    let again = model.n_all(Species::ElectronNeutrino);
    assert_eq!(first.to_bits(), again.to_bits());
    assert_eq!(model.calls.get(), 1);
    assert_eq!(model.totals().evaluations(), 1);

    // the mean energy needs both totals, but only computes the missing one
    let e_ave = model.e_ave(Species::ElectronNeutrino);
    assert!((e_ave - 10.0).abs() < 1e-12);
    assert_eq!(model.calls.get(), 2);
    model.e_ave(Species::ElectronNeutrino);
    assert_eq!(model.totals().evaluations(), 3);
}

#[rstest]
fn mean_energy_of_one_mev_is_cached(model: FlatModel) {
    // a genuine 1 MeV average must not look like an empty cache
    let first = model.e_ave(Species::TauNeutrino);
    assert!((first - 1.0).abs() < 1e-12);
    let evaluations = model.totals().evaluations();
    model.e_ave(Species::TauNeutrino);
    assert_eq!(model.totals().evaluations(), evaluations);
}

#[rstest]
#[case(Species::MuonAntineutrino)] // case 1
#[case(Species::TauNeutrino)] // case 2
#[case(Species::TauAntineutrino)] // case 3
fn heavy_species_share_totals(model: FlatModel, #[case] species: Species) {
    let nx = model.n_all(Species::MuonNeutrino);
    let calls = model.calls.get();
    assert_eq!(model.n_all(species).to_bits(), nx.to_bits());
    assert_eq!(
        model.ne_fd(species, 5.0).to_bits(),
        model.ne_fd(Species::MuonNeutrino, 5.0).to_bits()
    );
    assert_eq!(model.calls.get(), calls + 1);
}

#[rstest]
fn zero_number_gives_zero_energy() {
    let model = FlatModel::default();
    assert_eq!(model.e_ave(Species::ElectronNeutrino), 0.0);
    assert_eq!(model.ne_fd(Species::ElectronNeutrino, 10.0), 0.0);
}

#[rstest]
fn fermi_dirac_spectrum_covers_domain(model: FlatModel) {
    let spectrum = model.fermi_dirac_spectrum(Species::ElectronAntineutrino, 100).unwrap();
    assert_eq!(spectrum.n_bins(), 100);
    assert_eq!(spectrum.lower(), 0.0);
    assert_eq!(spectrum.upper(), 50.0);

    // most of the emission is below 50 MeV for a 15 MeV average
    let fraction = spectrum.integral(true) / model.n_all(Species::ElectronAntineutrino);
    assert!(fraction > 0.95 && fraction < 1.0);

    assert!(model.fermi_dirac_spectrum(Species::ElectronNeutrino, 0).is_none());
}

#[rstest]
fn summary_counts_heavy_species_four_times(model: FlatModel) {
    let summary = model.summary();
    assert_eq!(summary.flavours.len(), 3);
    assert!((summary.total_number - (2.0 + 3.0 + 4.0 * 1.0) * 1e50).abs() < 1e38);

    let luminosity = (2.0 * 10.0 + 3.0 * 15.0 + 4.0 * 1.0) * ERG_PER_MEV * 1e50;
    assert!((summary.total_luminosity / luminosity - 1.0).abs() < 1e-12);

    let line = summary.to_string();
    assert!(line.starts_with("Flat test model:"));
    assert!(line.contains("N=9.00e+50"));

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"name\":\"flat\""));
}

#[rstest]
fn usable_as_trait_object(model: FlatModel) {
    let models: Vec<&dyn SupernovaModel> = vec![&model];
    for m in models {
        assert_eq!(m.n2(Species::ElectronNeutrino, 20.0, 1.0), 0.0);
        assert_eq!(m.n2(Species::ElectronNeutrino, 1.0, 1.0), 2.0 / 500.0);
    }
}
