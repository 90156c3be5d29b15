//! Neutrino species designators and the per-flavour table indirection

// crate modules
use crate::error::{Error, Result};

// external crates
use log::warn;
use serde::{Deserialize, Serialize};

/// The six neutrino species a model can be queried for
///
/// Every query is indexed by species. Ids follow the usual 1 to 6 numbering, with
/// `0` reserved for special uses and therefore never a valid [Species].
///
/// | ID | Species              | Table            |
/// | -- | -------------------- | ---------------- |
/// | 1  | ν_e                  | electron         |
/// | 2  | anti ν_e             | anti-electron    |
/// | 3  | ν_μ                  | heavy (ν_x)      |
/// | 4  | anti ν_μ             | heavy (ν_x)      |
/// | 5  | ν_τ                  | heavy (ν_x)      |
/// | 6  | anti ν_τ             | heavy (ν_x)      |
///
/// Conversion from a raw id is fallible, and the failing case is reported
/// as a warning in the same way as any other query outside of the domain.
///
/// ```rust
/// # use neus_model::{Error, Flavour, Species};
/// assert_eq!(Species::try_from(2), Ok(Species::ElectronAntineutrino));
/// assert_eq!(Species::try_from(7), Err(Error::InvalidSpecies(7)));
/// assert!(Species::try_from(0).is_err());
///
/// assert_eq!(Species::TauNeutrino.flavour(), Flavour::Heavy);
/// ```
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    ElectronNeutrino = 1,
    ElectronAntineutrino = 2,
    MuonNeutrino = 3,
    MuonAntineutrino = 4,
    TauNeutrino = 5,
    TauAntineutrino = 6,
}

impl Species {
    /// Every species in id order
    pub const ALL: [Species; 6] = [
        Species::ElectronNeutrino,
        Species::ElectronAntineutrino,
        Species::MuonNeutrino,
        Species::MuonAntineutrino,
        Species::TauNeutrino,
        Species::TauAntineutrino,
    ];

    /// An alternative to using `ElectronNeutrino as u8`
    #[inline]
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// The distinct table used for this species
    pub fn flavour(&self) -> Flavour {
        match self {
            Self::ElectronNeutrino => Flavour::Electron,
            Self::ElectronAntineutrino => Flavour::AntiElectron,
            _ => Flavour::Heavy,
        }
    }

    /// Short symbol, e.g. `nu_e`
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::ElectronNeutrino => "nu_e",
            Self::ElectronAntineutrino => "anti-nu_e",
            Self::MuonNeutrino => "nu_mu",
            Self::MuonAntineutrino => "anti-nu_mu",
            Self::TauNeutrino => "nu_tau",
            Self::TauAntineutrino => "anti-nu_tau",
        }
    }
}

impl TryFrom<u8> for Species {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        Ok(match id {
            1 => Self::ElectronNeutrino,
            2 => Self::ElectronAntineutrino,
            3 => Self::MuonNeutrino,
            4 => Self::MuonAntineutrino,
            5 => Self::TauNeutrino,
            6 => Self::TauAntineutrino,
            _ => {
                warn!("Type of neutrino must be one of 1, 2, 3, 4, 5, 6, found {id}");
                return Err(Error::InvalidSpecies(id));
            }
        })
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The three distinct tables behind the six species
///
/// All μ and τ species are represented by a single ν_x entry.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
pub enum Flavour {
    Electron,
    AntiElectron,
    Heavy,
}

impl Flavour {
    /// Every flavour in table order
    pub const ALL: [Flavour; 3] = [Flavour::Electron, Flavour::AntiElectron, Flavour::Heavy];

    /// The species conventionally used to stand in for this flavour
    pub fn representative(&self) -> Species {
        match self {
            Self::Electron => Species::ElectronNeutrino,
            Self::AntiElectron => Species::ElectronAntineutrino,
            Self::Heavy => Species::MuonNeutrino,
        }
    }

    /// Number of species sharing this table
    pub fn multiplicity(&self) -> u8 {
        match self {
            Self::Heavy => 4,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Flavour {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let symbol = match self {
            Self::Electron => "nu_e",
            Self::AntiElectron => "anti-nu_e",
            Self::Heavy => "nu_x",
        };
        write!(f, "{symbol}")
    }
}

/// One value per distinct flavour, addressed by [Species]
///
/// This is the species to table indirection. Looking up any of the μ or τ
/// species returns a reference to the very same `heavy` entry.
///
/// ```rust
/// # use neus_model::{PerFlavour, Species};
/// let totals = PerFlavour::new(1.0, 2.0, 3.0);
///
/// assert!(std::ptr::eq(
///     totals.get(Species::MuonNeutrino),
///     totals.get(Species::TauAntineutrino),
/// ));
/// assert_eq!(*totals.get(Species::ElectronAntineutrino), 2.0);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerFlavour<T> {
    pub electron: T,
    pub anti_electron: T,
    pub heavy: T,
}

impl<T> PerFlavour<T> {
    /// Collect the three flavour entries
    pub fn new(electron: T, anti_electron: T, heavy: T) -> Self {
        Self {
            electron,
            anti_electron,
            heavy,
        }
    }

    /// Build every entry from its flavour
    pub fn from_fn(mut f: impl FnMut(Flavour) -> T) -> Self {
        Self {
            electron: f(Flavour::Electron),
            anti_electron: f(Flavour::AntiElectron),
            heavy: f(Flavour::Heavy),
        }
    }

    /// Entry used by a species
    pub fn get(&self, species: Species) -> &T {
        self.flavour(species.flavour())
    }

    /// Entry of a flavour
    pub fn flavour(&self, flavour: Flavour) -> &T {
        match flavour {
            Flavour::Electron => &self.electron,
            Flavour::AntiElectron => &self.anti_electron,
            Flavour::Heavy => &self.heavy,
        }
    }

    /// Apply `f` to every entry
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerFlavour<U> {
        PerFlavour {
            electron: f(self.electron),
            anti_electron: f(self.anti_electron),
            heavy: f(self.heavy),
        }
    }

    /// Iterate over `(flavour, entry)` in table order
    pub fn iter(&self) -> impl Iterator<Item = (Flavour, &T)> {
        Flavour::ALL.into_iter().map(move |f| (f, self.flavour(f)))
    }
}
