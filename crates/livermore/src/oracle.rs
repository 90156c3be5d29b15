//! The interpolation oracle and its numerical adapter

// crate modules
use crate::error::{Error, Result};
use crate::quadrature::{energy_nodes, time_nodes, Node};

// neus modules
use neus_model::{Domain, PerFlavour, Quantity, ERG_PER_MEV, SCALE};

// external crates
use log::trace;

/// Time range of the Livermore interpolation tables, s
pub const TIME_RANGE: (f64, f64) = (0.0012, 17.9012);

/// Energy range of the Livermore interpolation tables, MeV
pub const ENERGY_RANGE: (f64, f64) = (2.5, 82.5);

/// Time integrals never stop before this, s
pub const MIN_TIME_CUTOFF: f64 = 10.0;

/// Black box rate function supplied by the host
///
/// Returns the raw emission rates dN/dt/dE in neutrinos per second per MeV
/// for ν_e, anti ν_e and ν_x at a point. Any `Fn(f64, f64) -> PerFlavour<f64>`
/// is an oracle.
pub trait Oracle {
    fn evaluate(&self, time: f64, energy: f64) -> PerFlavour<f64>;
}

impl<F> Oracle for F
where
    F: Fn(f64, f64) -> PerFlavour<f64>,
{
    fn evaluate(&self, time: f64, energy: f64) -> PerFlavour<f64> {
        self(time, energy)
    }
}

/// Oracle restricted to its domain, with quadrature helpers on top
///
/// Every result is in units of 10⁵⁰, with luminosities weighted by the
/// neutrino energy in erg. Points outside of the domain are never passed to
/// the oracle. They give zero for every flavour along with a warning.
pub struct OracleAdapter<O> {
    oracle: O,
    domain: Domain,
}

impl<O: Oracle> OracleAdapter<O> {
    /// Adapter over the fixed Livermore domain
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            domain: Domain::new(TIME_RANGE, ENERGY_RANGE),
        }
    }

    /// Adapter over some other domain
    pub fn with_domain(oracle: O, domain: Domain) -> Result<Self> {
        let finite = [domain.t_min, domain.t_max, domain.e_min, domain.e_max]
            .iter()
            .all(|v| v.is_finite());

        if !finite || domain.is_empty() {
            return Err(Error::InvalidDomain {
                t_min: domain.t_min,
                t_max: domain.t_max,
                e_min: domain.e_min,
                e_max: domain.e_max,
            });
        }

        Ok(Self { oracle, domain })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Raw oracle rates, or zero outside of the domain
    pub fn evaluate(&self, time: f64, energy: f64) -> PerFlavour<f64> {
        if !(self.domain.check_time(time) && self.domain.check_energy(energy)) {
            return PerFlavour::default();
        }
        self.oracle.evaluate(time, energy)
    }

    /// Density of a quantity at a point, 10⁵⁰ / s / MeV
    pub fn density(&self, quantity: Quantity, time: f64, energy: f64) -> PerFlavour<f64> {
        let weight = quantity.weight(energy) * SCALE;
        self.evaluate(time, energy).map(|rate| rate * weight)
    }

    /// Upper time bound actually used for an integral over time
    ///
    /// Raised to at least 10 s and lowered to at most the end of the domain.
    pub fn clamp_time_cutoff(&self, t_upper: f64) -> f64 {
        t_upper.max(MIN_TIME_CUTOFF).min(self.domain.t_max)
    }

    /// Integral over time from the start of the domain up to `t_upper`
    ///
    /// See [OracleAdapter::clamp_time_cutoff] for the bound that is used.
    pub fn integrate_over_time(
        &self,
        quantity: Quantity,
        energy: f64,
        t_upper: f64,
    ) -> PerFlavour<f64> {
        if !self.domain.check_energy(energy) {
            return PerFlavour::default();
        }

        let t_upper = self.clamp_time_cutoff(t_upper);
        let times = time_nodes(self.domain.t_min, t_upper);
        let energy = [Node {
            at: energy,
            width: 1.0,
        }];
        self.sum(quantity, &times, &energy)
    }

    /// Integral over energy from the lowest energy up to `e_upper`
    ///
    /// The bound is clamped into the energy domain.
    pub fn integrate_over_energy(
        &self,
        quantity: Quantity,
        time: f64,
        e_upper: f64,
    ) -> PerFlavour<f64> {
        if !self.domain.check_time(time) {
            return PerFlavour::default();
        }

        let e_upper = self.domain.clamp_energy(e_upper);
        let time = [Node { at: time, width: 1.0 }];
        let energies = energy_nodes(self.domain.e_min, e_upper);
        self.sum(quantity, &time, &energies)
    }

    /// Integral over the full time and energy domain
    pub fn integrate_over_both(&self, quantity: Quantity) -> PerFlavour<f64> {
        let times = time_nodes(self.domain.t_min, self.domain.t_max);
        let energies = energy_nodes(self.domain.e_min, self.domain.e_max);
        self.sum(quantity, &times, &energies)
    }

    /// Average energy at `time` over energies up to `e_upper`, MeV
    ///
    /// A flavour with no neutrinos at that time has an average of `0.0`.
    pub fn mean_energy(&self, time: f64, e_upper: f64) -> PerFlavour<f64> {
        let number = self.integrate_over_energy(Quantity::Number, time, e_upper);
        let luminosity = self.integrate_over_energy(Quantity::Luminosity, time, e_upper);

        PerFlavour::from_fn(|flavour| {
            let n = *number.flavour(flavour);
            if n == 0.0 {
                0.0
            } else {
                *luminosity.flavour(flavour) / ERG_PER_MEV / n
            }
        })
    }

    /// Rectangle-rule sum over every (time, energy) node pair
    fn sum(&self, quantity: Quantity, times: &[Node], energies: &[Node]) -> PerFlavour<f64> {
        trace!(
            "Summing {:?} over {} time and {} energy nodes",
            quantity,
            times.len(),
            energies.len()
        );

        let mut total = PerFlavour::<f64>::default();
        for t in times {
            for e in energies {
                let rates = self.oracle.evaluate(t.at, e.at);
                let weight = t.width * e.width * quantity.weight(e.at);
                total.electron += rates.electron * weight;
                total.anti_electron += rates.anti_electron * weight;
                total.heavy += rates.heavy * weight;
            }
        }
        total.map(|v| v * SCALE)
    }
}

impl<O> std::fmt::Debug for OracleAdapter<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("OracleAdapter")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(_t: f64, _e: f64) -> PerFlavour<f64> {
        PerFlavour::new(1e50, 2e50, 3e50)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs())
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |t: f64, e: f64| PerFlavour::new(t, e, t * e);
        assert_eq!(oracle.evaluate(2.0, 3.0), PerFlavour::new(2.0, 3.0, 6.0));
    }

    #[test]
    fn outside_domain_is_zero() {
        let adapter = OracleAdapter::new(flat);
        assert_eq!(adapter.evaluate(0.001, 10.0), PerFlavour::default());
        assert_eq!(adapter.evaluate(18.0, 10.0), PerFlavour::default());
        assert_eq!(adapter.evaluate(1.0, 90.0), PerFlavour::default());
        assert!(close(adapter.density(Quantity::Number, 1.0, 10.0).heavy, 3.0));
    }

    #[test]
    fn luminosity_weighting() {
        let adapter = OracleAdapter::new(flat);
        let l = adapter.density(Quantity::Luminosity, 1.0, 10.0);
        assert!(close(l.electron, 10.0 * ERG_PER_MEV));
    }

    #[test]
    fn energy_integral() {
        let adapter = OracleAdapter::new(flat);
        // 40 steps of 2 MeV
        let n = adapter.integrate_over_energy(Quantity::Number, 1.0, 100.0);
        assert!(close(n.electron, 80.0));
        assert!(close(n.anti_electron, 160.0));
        assert!(close(n.heavy, 240.0));

        // 10 steps of 2 MeV below 22.5
        let n = adapter.integrate_over_energy(Quantity::Number, 1.0, 22.5);
        assert!(close(n.electron, 20.0));

        assert_eq!(
            adapter.integrate_over_energy(Quantity::Number, 0.0, 100.0),
            PerFlavour::default()
        );
    }

    #[test]
    fn time_cutoff_floor() {
        let adapter = OracleAdapter::new(flat);
        assert_eq!(adapter.clamp_time_cutoff(1.0), 10.0);
        assert_eq!(adapter.clamp_time_cutoff(12.0), 12.0);
        assert_eq!(adapter.clamp_time_cutoff(100.0), 17.9012);

        let short = adapter.integrate_over_time(Quantity::Number, 10.0, 2.0);
        let floor = adapter.integrate_over_time(Quantity::Number, 10.0, 10.0);
        assert_eq!(short, floor);

        // steps start at 0.0012 and the last one ends just after 10 s
        assert!((floor.electron - 9.999).abs() < 1e-9);
    }

    #[test]
    fn mean_energy_of_flat_spectrum() {
        let adapter = OracleAdapter::new(flat);
        let mean = adapter.mean_energy(1.0, 100.0);
        // average of the 40 node energies 2.5, 4.5, ..., 80.5
        assert!(close(mean.electron, 41.5));
        assert!(close(mean.heavy, 41.5));

        let empty = OracleAdapter::new(|_t: f64, _e: f64| PerFlavour::default());
        assert_eq!(empty.mean_energy(1.0, 100.0).electron, 0.0);
    }

    #[test]
    fn invalid_domains() {
        let inverted = Domain::new((1.0, 0.0), (2.5, 82.5));
        assert!(OracleAdapter::with_domain(flat, inverted).is_err());
        let open = Domain::new((0.0, f64::INFINITY), (2.5, 82.5));
        assert!(OracleAdapter::with_domain(flat, open).is_err());
    }
}
