//! Overview of the totals of a model

// crate modules
use crate::domain::Domain;
use crate::model::SupernovaModel;
use crate::physics::UNIT;
use crate::species::Flavour;

// neus modules
use neus_utils::ValueExt;

// external crates
use serde::{Deserialize, Serialize};

/// Totals of a single flavour, in absolute units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavourSummary {
    pub flavour: Flavour,
    /// Total number of neutrinos
    pub number: f64,
    /// Total energy, erg
    pub luminosity: f64,
    /// Average energy, MeV
    pub mean_energy: f64,
}

/// Totals of a model, in absolute units
///
/// The combined totals count the ν_x flavour once for each of the four μ and
/// τ species. Displays on a single line, and serialises to JSON for anything
/// that wants to compare models programmatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub name: String,
    pub title: String,
    pub domain: Domain,
    pub flavours: Vec<FlavourSummary>,
    /// N1 + N2 + 4 Nx
    pub total_number: f64,
    /// L1 + L2 + 4 Lx, erg
    pub total_luminosity: f64,
}

impl Summary {
    pub fn new<M: SupernovaModel + ?Sized>(model: &M) -> Self {
        let flavours: Vec<FlavourSummary> = Flavour::ALL
            .into_iter()
            .map(|flavour| {
                let species = flavour.representative();
                FlavourSummary {
                    flavour,
                    number: model.n_all(species) * UNIT,
                    luminosity: model.l_all(species) * UNIT,
                    mean_energy: model.e_ave(species),
                }
            })
            .collect();

        let weighted = |f: fn(&FlavourSummary) -> f64| -> f64 {
            flavours
                .iter()
                .map(|s| f(s) * s.flavour.multiplicity() as f64)
                .sum()
        };

        Self {
            name: model.name(),
            title: model.title(),
            domain: model.domain(),
            total_number: weighted(|s| s.number),
            total_luminosity: weighted(|s| s.luminosity),
            flavours,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:", self.title)?;
        for s in &self.flavours {
            write!(f, " N({})={},", s.flavour, s.number.sci(2, 2))?;
        }
        write!(
            f,
            " N={}, L={} erg",
            self.total_number.sci(2, 2),
            self.total_luminosity.sci(2, 2)
        )
    }
}
