//! Library of parser functions for the ASCII database

// neus modules
use neus_model::{PerFlavour, Quantity};

// nom parser combinators
use nom::character::complete::{space0, space1};
use nom::combinator::{all_consuming, map};
use nom::multi::count;
use nom::number::complete::double;
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

/// One energy bin of a database table
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumRow {
    /// Upper edge of the energy bin, MeV
    pub energy: f64,
    /// Neutrino numbers for ν_e, anti ν_e and ν_x
    pub number: PerFlavour<f64>,
    /// Emitted energies for ν_e, anti ν_e and ν_x, erg
    pub luminosity: PerFlavour<f64>,
}

impl SpectrumRow {
    pub fn values(&self, quantity: Quantity) -> &PerFlavour<f64> {
        match quantity {
            Quantity::Number => &self.number,
            Quantity::Luminosity => &self.luminosity,
        }
    }
}

// ! Boolean checks
/// Check for a line of eight numbers
pub fn is_spectrum_row(i: &str) -> bool {
    spectrum_row(i).is_ok()
}

/// Check for a line holding a single number
pub fn is_time_stamp(i: &str) -> bool {
    time_stamp(i).is_ok()
}

// ! Line parsers
/// Parse a full table row
///
/// e.g.
/// ```text
///   2.5  2.5  1.2E+55  9.8E+54  8.1E+54  4.6E+50  4.1E+50  3.8E+50
/// ```
///
/// The energy is given twice in the database but only one value is kept.
pub fn spectrum_row(i: &str) -> IResult<&str, SpectrumRow> {
    map(
        all_consuming(delimited(
            space0,
            tuple((double, count(preceded(space1, double), 7))),
            space0,
        )),
        |(energy, values)| SpectrumRow {
            energy,
            number: PerFlavour::new(values[1], values[2], values[3]),
            luminosity: PerFlavour::new(values[4], values[5], values[6]),
        },
    )(i)
}

/// Parse the time stamp that starts a block of the time dependent data
pub fn time_stamp(i: &str) -> IResult<&str, f64> {
    all_consuming(delimited(space0, double, space0))(i)
}
