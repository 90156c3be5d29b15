//! Readers for the integrated and time dependent database files
//!
//! Both formats are whitespace separated ASCII. Every table row is
//!
//! ```text
//! E E n(nu_e) n(anti-nu_e) n(nu_x) e(nu_e) e(anti-nu_e) e(nu_x)
//! ```
//!
//! where `E` is the upper edge of the energy bin in MeV, given twice. The
//! lower edge of the first bin is always 0. Numbers are counts and energies
//! are in erg, per MeV and also per second in the time dependent file. Both
//! are divided by 10⁵⁰ on reading.
//!
//! The integrated file (`integ*.data`) starts with a single header line
//! followed by the rows. The time dependent file (`intp*.data`) is a series
//! of blocks, each a line with the time followed by the rows at that time.

// crate modules
use crate::error::{Error, Result};
use crate::parsers::{spectrum_row, time_stamp, SpectrumRow};

// neus modules
use neus_model::{Flavour, PerFlavour, Quantity, UNIT};
use neus_table::{Table1D, Table2D};
use neus_utils::SliceExt;

// external crates
use log::{debug, info, trace, warn};

// standard library
use std::path::Path;

/// Number of energy bins in the published database
pub const DATABASE_N_BINS_E: usize = 20;

/// Time integrated spectra N(E) and L(E) of every flavour
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratedData {
    /// dN/dE, 10⁵⁰ / MeV
    pub number: PerFlavour<Table1D>,
    /// dL/dE, 10⁵⁰ erg / MeV
    pub luminosity: PerFlavour<Table1D>,
}

/// Time dependent spectra N(t, E) and L(t, E) of every flavour
///
/// The `X` axis is time in seconds and the `Y` axis is energy in MeV.
#[derive(Debug, Clone, PartialEq)]
pub struct FullData {
    /// d²N/dt/dE, 10⁵⁰ / s / MeV
    pub number: PerFlavour<Table2D>,
    /// d²L/dt/dE, 10⁵⁰ erg / s / MeV
    pub luminosity: PerFlavour<Table2D>,
}

/// Read an integrated database file
///
/// ```rust
/// # use neus_nakazato::load_integrated;
/// let data = load_integrated("data/integdata/integ1301.data").unwrap();
/// let spectrum = &data.number.electron;
///
/// assert_eq!(spectrum.n_bins(), 20);
/// assert_eq!(spectrum.lower(), 0.0);
/// ```
pub fn load_integrated<P: AsRef<Path>>(path: P) -> Result<IntegratedData> {
    info!("Reading {:?}", path.as_ref());
    let content = std::fs::read_to_string(path)?;
    parse_integrated(&content)
}

/// Read a time dependent database file
///
/// ```rust
/// # use neus_nakazato::load_full;
/// # use neus_table::Axis;
/// let data = load_full("data/intpdata/intp1301.data").unwrap();
/// let table = &data.number.electron;
///
/// assert_eq!(table.axis_edges(Axis::X), &[0.5, 1.5, 2.5, 3.5]);
/// ```
pub fn load_full<P: AsRef<Path>>(path: P) -> Result<FullData> {
    info!("Reading {:?}", path.as_ref());
    let content = std::fs::read_to_string(path)?;
    parse_full(&content)
}

/// Integrated data from the text of an `integ*.data` file
pub fn parse_integrated(content: &str) -> Result<IntegratedData> {
    let mut rows = Vec::new();

    // first line is a header
    for (n, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(n, line)?);
    }

    if rows.is_empty() {
        return Err(Error::NoSpectrumRows);
    }
    if rows.len() != DATABASE_N_BINS_E {
        warn!(
            "Expected {DATABASE_N_BINS_E} energy bins, found {}",
            rows.len()
        );
    }

    let edges = energy_edges(&rows);
    debug!(
        "Integrated data has {} energy bins up to {} MeV",
        rows.len(),
        edges[rows.len()]
    );

    let table = |quantity: Quantity, flavour: Flavour| {
        let contents: Vec<f64> = rows
            .iter()
            .map(|row| row.values(quantity).flavour(flavour) / UNIT)
            .collect();
        trace!("{quantity:?} of {flavour}: {contents:?}");
        Table1D::from_contents(edges.clone(), contents)
    };

    Ok(IntegratedData {
        number: try_per_flavour(|f| table(Quantity::Number, f))?,
        luminosity: try_per_flavour(|f| table(Quantity::Luminosity, f))?,
    })
}

/// Time dependent data from the text of an `intp*.data` file
///
/// Every block must have the same number of rows. The energy bins are taken
/// from the first block.
///
/// Each time stamp must be alone on its line, and each row on its own line
/// after it. A time and a row sharing a line is a parse error.
///
/// Time stamps are bin centres rather than edges. The edges are placed half
/// way between neighbouring stamps, and the outer edges the same distance
/// beyond the first and last stamps.
pub fn parse_full(content: &str) -> Result<FullData> {
    let mut times: Vec<f64> = Vec::new();
    let mut blocks: Vec<Vec<SpectrumRow>> = Vec::new();

    for (n, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        if let Ok((_, time)) = time_stamp(line) {
            times.push(time);
            blocks.push(Vec::new());
            continue;
        }

        let row = parse_row(n, line)?;
        match blocks.last_mut() {
            Some(block) => block.push(row),
            None => return Err(Error::RowBeforeTimeStamp(n + 1)),
        }
    }

    if times.len() < 2 {
        return Err(Error::TooFewTimeSamples(times.len()));
    }

    let n_bins_e = blocks[0].len();
    if n_bins_e == 0 {
        return Err(Error::NoSpectrumRows);
    }
    for (block, rows) in blocks.iter().enumerate() {
        if rows.len() != n_bins_e {
            return Err(Error::UnexpectedNumberOfRows {
                block,
                expected: n_bins_e,
                found: rows.len(),
            });
        }
    }
    if n_bins_e != DATABASE_N_BINS_E {
        warn!("Expected {DATABASE_N_BINS_E} energy bins, found {n_bins_e}");
    }

    let time_edges = times
        .centers_to_edges()
        .map_err(|_| Error::TooFewTimeSamples(times.len()))?;
    let energy_edges = energy_edges(&blocks[0]);
    debug!(
        "Full data has {}x{} bins over [{}, {}] s",
        times.len(),
        n_bins_e,
        time_edges[0],
        time_edges[times.len()]
    );

    let table = |quantity: Quantity, flavour: Flavour| {
        let contents = blocks
            .iter()
            .flatten()
            .map(|row| row.values(quantity).flavour(flavour) / UNIT)
            .collect();
        Table2D::from_contents(time_edges.clone(), energy_edges.clone(), contents)
    };

    Ok(FullData {
        number: try_per_flavour(|f| table(Quantity::Number, f))?,
        luminosity: try_per_flavour(|f| table(Quantity::Luminosity, f))?,
    })
}

fn parse_row(n: usize, line: &str) -> Result<SpectrumRow> {
    match spectrum_row(line) {
        Ok((_, row)) => Ok(row),
        Err(_) => Err(Error::ParseError {
            line: n + 1,
            content: line.trim().to_string(),
        }),
    }
}

/// Energy edges `[0, E1, ..., En]` from the upper edge of each row
fn energy_edges(rows: &[SpectrumRow]) -> Vec<f64> {
    std::iter::once(0.0)
        .chain(rows.iter().map(|row| row.energy))
        .collect()
}

fn try_per_flavour<T, E>(
    mut f: impl FnMut(Flavour) -> core::result::Result<T, E>,
) -> core::result::Result<PerFlavour<T>, E> {
    Ok(PerFlavour::new(
        f(Flavour::Electron)?,
        f(Flavour::AntiElectron)?,
        f(Flavour::Heavy)?,
    ))
}
