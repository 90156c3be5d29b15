//! Units, physical constants, and the Fermi-Dirac approximation

/// Energy of one MeV in erg
pub const ERG_PER_MEV: f64 = 1.60217646e-6;

/// Every stored number and luminosity is in multiples of this
pub const UNIT: f64 = 1e50;

/// Conversion from absolute values into storage units
pub const SCALE: f64 = 1e-50;

/// Degrees of freedom assumed by the effective temperature
const N_DOF: f64 = 6.0;

/// What is being counted by a table or integral
///
/// Luminosity is the number of neutrinos weighted by their energy in erg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Number,
    Luminosity,
}

impl Quantity {
    /// Weight applied to a number density at `energy` MeV
    ///
    /// ```rust
    /// # use neus_model::{Quantity, ERG_PER_MEV};
    /// assert_eq!(Quantity::Number.weight(10.0), 1.0);
    /// assert_eq!(Quantity::Luminosity.weight(10.0), 10.0 * ERG_PER_MEV);
    /// ```
    #[inline]
    pub fn weight(&self, energy: f64) -> f64 {
        match self {
            Self::Number => 1.0,
            Self::Luminosity => energy * ERG_PER_MEV,
        }
    }
}

/// Fermi-Dirac approximation of the number spectrum N(E)
///
/// Normalised by the total number `n_all` and shaped by the average energy
/// `e_ave`, using `kT = <E> * 2 / 6`.
///
/// ```text
///     N(E) = 0.55 * n_all / kT^3 * E^2 / (1 + exp(E / kT))
/// ```
///
/// A non-positive temperature has no spectrum and gives `0.0`.
///
/// ```rust
/// # use neus_model::fermi_dirac;
/// assert_eq!(fermi_dirac(1.0, 0.0, 10.0), 0.0);
/// assert!(fermi_dirac(1.0, 12.0, 10.0) > 0.0);
/// ```
pub fn fermi_dirac(n_all: f64, e_ave: f64, energy: f64) -> f64 {
    let kt = e_ave * 2.0 / N_DOF;
    if kt <= 0.0 || !kt.is_finite() {
        return 0.0;
    }
    0.55 * n_all / kt.powi(3) * energy * energy / (1.0 + (energy / kt).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fermi_dirac_reference_value() {
        // kT = 3 MeV, E = 3 MeV
        let expected = 0.55 * 2.0 / 27.0 * 9.0 / (1.0 + 1f64.exp());
        assert!((fermi_dirac(2.0, 9.0, 3.0) - expected).abs() < 1e-15);
    }

    #[test]
    fn fermi_dirac_normalisation() {
        // integral of E^2/(1+exp(E/kT)) is 1.5*zeta(3)*kT^3, so roughly n_all
        let (n_all, e_ave) = (5.0, 12.0);
        let de = 0.01;
        let total: f64 = (0..20_000)
            .map(|i| fermi_dirac(n_all, e_ave, (i as f64 + 0.5) * de) * de)
            .sum();
        assert!((total / n_all - 0.55 * 1.5 * 1.2020569).abs() < 1e-4);
    }
}
