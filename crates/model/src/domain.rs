//! Valid time and energy ranges of a model

// external crates
use log::warn;
use serde::{Deserialize, Serialize};

/// Closed time and energy ranges covered by a model
///
/// Times are in seconds after core collapse, energies in MeV.
///
/// ```rust
/// # use neus_model::Domain;
/// let domain = Domain::new((0.0012, 17.9012), (2.5, 82.5));
/// assert!(domain.contains_time(0.0012));
/// assert!(!domain.contains_energy(100.0));
/// assert_eq!(domain.clamp_energy(100.0), 82.5);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub t_min: f64,
    pub t_max: f64,
    pub e_min: f64,
    pub e_max: f64,
}

impl Domain {
    pub fn new(time: (f64, f64), energy: (f64, f64)) -> Self {
        Self {
            t_min: time.0,
            t_max: time.1,
            e_min: energy.0,
            e_max: energy.1,
        }
    }

    pub fn contains_time(&self, time: f64) -> bool {
        time >= self.t_min && time <= self.t_max
    }

    pub fn contains_energy(&self, energy: f64) -> bool {
        energy >= self.e_min && energy <= self.e_max
    }

    /// Same as [Domain::contains_time], with a warning on failure
    pub fn check_time(&self, time: f64) -> bool {
        let inside = self.contains_time(time);
        if !inside {
            warn!("Time {time} out of range [{}, {}] s", self.t_min, self.t_max);
        }
        inside
    }

    /// Same as [Domain::contains_energy], with a warning on failure
    pub fn check_energy(&self, energy: f64) -> bool {
        let inside = self.contains_energy(energy);
        if !inside {
            warn!(
                "Energy {energy} out of range [{}, {}] MeV",
                self.e_min, self.e_max
            );
        }
        inside
    }

    /// Clamp a time into [t_min, t_max]
    pub fn clamp_time(&self, time: f64) -> f64 {
        time.max(self.t_min).min(self.t_max)
    }

    /// Clamp an energy into [e_min, e_max]
    pub fn clamp_energy(&self, energy: f64) -> f64 {
        energy.max(self.e_min).min(self.e_max)
    }

    /// True if the domain has collapsed to nothing
    pub fn is_empty(&self) -> bool {
        self.t_max <= self.t_min || self.e_max <= self.e_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let domain = Domain::new((1.0, 2.0), (0.0, 10.0));
        assert!(domain.check_time(1.0));
        assert!(domain.check_time(2.0));
        assert!(!domain.check_time(2.0 + 1e-9));
        assert!(!domain.check_energy(f64::NAN));
    }

    #[test]
    fn clamping() {
        let domain = Domain::new((1.0, 2.0), (0.0, 10.0));
        assert_eq!(domain.clamp_time(0.0), 1.0);
        assert_eq!(domain.clamp_time(1.5), 1.5);
        assert_eq!(domain.clamp_energy(11.0), 10.0);
        assert!(Domain::default().is_empty());
    }
}
