//! Memoisation of derived totals and marginal tables
//!
//! Models are owned by a single caller and queried through `&self`, so the
//! caches use interior mutability without any locking. Both caches count how
//! often they actually compute something, which makes it possible to observe
//! that repeated queries are served from memory.

// crate modules
use crate::species::{Flavour, PerFlavour};

// neus modules
use neus_table::Table1D;

// standard library
use std::cell::{Cell, OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Derived per-flavour totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Total {
    /// Total number of neutrinos, 10⁵⁰
    Number,
    /// Total emitted energy, 10⁵⁰ erg
    Luminosity,
    /// Average neutrino energy, MeV
    MeanEnergy,
}

/// Lazily computed totals for every flavour
///
/// Each value is computed at most once. There is no sentinel for "not yet
/// computed", so any result including `0.0` or `1.0` is kept.
///
/// ```rust
/// # use neus_model::{Flavour, Total, Totals};
/// let totals = Totals::default();
/// let first = totals.get_or_compute(Total::Number, Flavour::Heavy, || 1.0);
/// let again = totals.get_or_compute(Total::Number, Flavour::Heavy, || 2.0);
///
/// assert_eq!(first, again);
/// assert_eq!(totals.evaluations(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Totals {
    number: PerFlavour<OnceCell<f64>>,
    luminosity: PerFlavour<OnceCell<f64>>,
    mean_energy: PerFlavour<OnceCell<f64>>,
    evaluations: Cell<usize>,
}

impl Totals {
    /// Cached value, or the result of `compute` stored for next time
    pub fn get_or_compute(
        &self,
        total: Total,
        flavour: Flavour,
        compute: impl FnOnce() -> f64,
    ) -> f64 {
        *self.cell(total, flavour).get_or_init(|| {
            self.evaluations.set(self.evaluations.get() + 1);
            compute()
        })
    }

    /// Cached value, if it was already computed
    pub fn get(&self, total: Total, flavour: Flavour) -> Option<f64> {
        self.cell(total, flavour).get().copied()
    }

    /// Number of values computed so far
    pub fn evaluations(&self) -> usize {
        self.evaluations.get()
    }

    /// Forget every value, e.g. after the underlying tables were replaced
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn cell(&self, total: Total, flavour: Flavour) -> &OnceCell<f64> {
        match total {
            Total::Number => self.number.flavour(flavour),
            Total::Luminosity => self.luminosity.flavour(flavour),
            Total::MeanEnergy => self.mean_energy.flavour(flavour),
        }
    }
}

/// The kinds of 1D marginal a model derives from its joint tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marginal {
    /// N(E), up to a time cutoff
    NumberSpectrum,
    /// L(E), up to a time cutoff
    LuminositySpectrum,
    /// N(t), up to an energy cutoff
    NumberCurve,
    /// L(t), up to an energy cutoff
    LuminosityCurve,
    /// <E>(t), up to an energy cutoff
    MeanEnergyCurve,
}

/// Exact key for a cached marginal
///
/// The cutoff is compared bit for bit, so two distinct cutoffs are never
/// merged by rounding. Both zeros map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarginalKey {
    flavour: Flavour,
    marginal: Marginal,
    cutoff: u64,
}

impl MarginalKey {
    pub fn new(flavour: Flavour, marginal: Marginal, cutoff: f64) -> Self {
        let cutoff = if cutoff == 0.0 { 0.0 } else { cutoff };
        Self {
            flavour,
            marginal,
            cutoff: cutoff.to_bits(),
        }
    }

    pub fn flavour(&self) -> Flavour {
        self.flavour
    }

    pub fn marginal(&self) -> Marginal {
        self.marginal
    }

    pub fn cutoff(&self) -> f64 {
        f64::from_bits(self.cutoff)
    }
}

/// Append-only store of marginal tables
///
/// Tables are shared out as `Rc`, so a caller holding a marginal keeps seeing
/// the same immutable object for as long as it likes.
///
/// ```rust
/// # use neus_model::{Flavour, Marginal, MarginalCache, MarginalKey};
/// # use neus_table::Table1D;
/// let cache = MarginalCache::default();
/// let key = MarginalKey::new(Flavour::Electron, Marginal::NumberCurve, 82.5);
///
/// let a = cache.get_or_build(key, || Table1D::uniform(4, 0.0, 1.0).ok()).unwrap();
/// let b = cache.get_or_build(key, || None).unwrap();
///
/// assert!(std::rc::Rc::ptr_eq(&a, &b));
/// assert_eq!(cache.builds(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MarginalCache {
    tables: RefCell<HashMap<MarginalKey, Rc<Table1D>>>,
    builds: Cell<usize>,
}

impl MarginalCache {
    /// Cached table, or the result of `build` stored for next time
    ///
    /// A build that produces nothing is not cached, and is retried on the
    /// next request.
    pub fn get_or_build(
        &self,
        key: MarginalKey,
        build: impl FnOnce() -> Option<Table1D>,
    ) -> Option<Rc<Table1D>> {
        if let Some(table) = self.tables.borrow().get(&key) {
            return Some(Rc::clone(table));
        }

        let table = Rc::new(build()?);
        self.builds.set(self.builds.get() + 1);
        self.tables.borrow_mut().insert(key, Rc::clone(&table));
        Some(table)
    }

    /// Number of tables built so far
    pub fn builds(&self) -> usize {
        self.builds.get()
    }

    /// Number of tables currently held
    pub fn len(&self) -> usize {
        self.tables.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.borrow().is_empty()
    }

    /// Drop every table
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_are_independent() {
        let totals = Totals::default();
        totals.get_or_compute(Total::Number, Flavour::Electron, || 3.0);
        assert_eq!(totals.get(Total::Number, Flavour::Electron), Some(3.0));
        assert_eq!(totals.get(Total::Number, Flavour::Heavy), None);
        assert_eq!(totals.get(Total::Luminosity, Flavour::Electron), None);
    }

    #[test]
    fn sentinel_values_are_kept() {
        let mut totals = Totals::default();
        assert_eq!(totals.get_or_compute(Total::MeanEnergy, Flavour::Heavy, || 1.0), 1.0);
        assert_eq!(totals.get_or_compute(Total::MeanEnergy, Flavour::Heavy, || 9.0), 1.0);
        assert_eq!(totals.get_or_compute(Total::Number, Flavour::Heavy, || 0.0), 0.0);
        assert_eq!(totals.get_or_compute(Total::Number, Flavour::Heavy, || 9.0), 0.0);
        assert_eq!(totals.evaluations(), 2);

        totals.clear();
        assert_eq!(totals.get(Total::MeanEnergy, Flavour::Heavy), None);
    }

    #[test]
    fn cutoffs_are_exact() {
        let a = MarginalKey::new(Flavour::Electron, Marginal::NumberSpectrum, 10.0);
        let b = MarginalKey::new(Flavour::Electron, Marginal::NumberSpectrum, 10.0 + 1e-12);
        let c = MarginalKey::new(Flavour::Electron, Marginal::LuminositySpectrum, 10.0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(
            MarginalKey::new(Flavour::Heavy, Marginal::NumberCurve, -0.0),
            MarginalKey::new(Flavour::Heavy, Marginal::NumberCurve, 0.0)
        );
        assert_eq!(b.cutoff(), 10.0 + 1e-12);
    }

    #[test]
    fn failed_builds_are_not_cached() {
        let cache = MarginalCache::default();
        let key = MarginalKey::new(Flavour::Electron, Marginal::MeanEnergyCurve, 1.0);
        assert!(cache.get_or_build(key, || None).is_none());
        assert!(cache.is_empty());
        assert!(cache
            .get_or_build(key, || Table1D::uniform(1, 0.0, 1.0).ok())
            .is_some());
        assert_eq!(cache.len(), 1);
    }
}
