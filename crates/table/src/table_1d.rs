//! Module for the one-dimensional binned table

// crate modules
use crate::binning::{self, Bracket};
use crate::error::{Error, Result};

// neus modules
use neus_utils::{SliceExt, ValueExt};

/// Single axis of non-uniform bins and their contents
///
/// The table always holds one more edge than it holds contents, with the
/// edges finite and strictly increasing. Every constructor checks this, so
/// any [Table1D] that exists is a valid binning.
///
/// Contents are densities in whatever unit the owner chooses. For the
/// spectra in this workspace that is 10⁵⁰ per MeV or 10⁵⁰ per second.
///
/// ```rust
/// # use neus_table::Table1D;
/// let mut table = Table1D::new(vec![0.0, 1.0, 3.0]).unwrap();
/// table.fill(0.5, 2.0).unwrap();
/// table.fill(2.0, 1.0).unwrap();
///
/// assert_eq!(table.contents(), &[2.0, 1.0]);
/// assert_eq!(table.integral(true), 4.0);
/// assert_eq!(table.integral(false), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table1D {
    pub(crate) edges: Vec<f64>,
    pub(crate) contents: Vec<f64>,
}

impl Table1D {
    /// Empty table over the provided edges
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        binning::validate_edges(&edges)?;
        let contents = vec![0.0; edges.len() - 1];
        Ok(Self { edges, contents })
    }

    /// Table with `n_bins` equal bins over [low, high]
    ///
    /// ```rust
    /// # use neus_table::Table1D;
    /// let table = Table1D::uniform(4, 0.0, 2.0).unwrap();
    /// assert_eq!(table.edges(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
    /// ```
    pub fn uniform(n_bins: usize, low: f64, high: f64) -> Result<Self> {
        Self::new(binning::uniform_edges(n_bins, low, high))
    }

    /// Table from pre-computed bin contents
    pub fn from_contents(edges: Vec<f64>, contents: Vec<f64>) -> Result<Self> {
        binning::validate_edges(&edges)?;
        if contents.len() + 1 != edges.len() {
            return Err(Error::UnexpectedLength {
                expected: edges.len() - 1,
                found: contents.len(),
            });
        }
        Ok(Self { edges, contents })
    }

    /// Table with every bin set by evaluating `f` at the bin centre
    pub fn from_centers(edges: Vec<f64>, mut f: impl FnMut(f64) -> f64) -> Result<Self> {
        let mut table = Self::new(edges)?;
        for i in 0..table.n_bins() {
            table.contents[i] = f(binning::center(&table.edges, i));
        }
        Ok(table)
    }

    /// Bin edges, one more than the number of bins
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin contents in bin order
    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    /// Number of bins
    pub fn n_bins(&self) -> usize {
        self.contents.len()
    }

    /// Lowest edge of the table
    pub fn lower(&self) -> f64 {
        self.edges[0]
    }

    /// Highest edge of the table
    pub fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Width of bin `i`, if it exists
    pub fn bin_width(&self, i: usize) -> Option<f64> {
        (i < self.n_bins()).then(|| self.edges[i + 1] - self.edges[i])
    }

    /// Centre of bin `i`, if it exists
    pub fn bin_center(&self, i: usize) -> Option<f64> {
        (i < self.n_bins()).then(|| binning::center(&self.edges, i))
    }

    /// Content of bin `i`, if it exists
    pub fn content(&self, i: usize) -> Option<f64> {
        self.contents.get(i).copied()
    }

    /// Overwrite the content of bin `i`
    pub fn set_content(&mut self, i: usize, value: f64) -> Result<()> {
        let n_bins = self.n_bins();
        let bin = self
            .contents
            .get_mut(i)
            .ok_or(Error::BinOutOfRange { index: i, n_bins })?;
        *bin = value;
        Ok(())
    }

    /// Add `weight` to the bin containing `x`
    pub fn fill(&mut self, x: f64, weight: f64) -> Result<()> {
        let i = self.find_bin(x)?;
        self.contents[i] += weight;
        Ok(())
    }

    /// Index of the bin containing `x`, where bins are low <= x < high
    ///
    /// The highest edge belongs to the last bin.
    pub fn find_bin(&self, x: f64) -> Result<usize> {
        binning::find_bin(&self.edges, x)
    }

    /// Multiply every bin content by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.contents.iter_mut().for_each(|c| *c *= factor);
    }

    /// Linear interpolation of the contents between bin centres
    ///
    /// Between an outer edge and the nearest bin centre the content of that
    /// edge bin is returned. Values outside of [lower, upper] are an
    /// [Error::OutsideDomain].
    ///
    /// ```rust
    /// # use neus_table::Table1D;
    /// let table = Table1D::from_contents(vec![0.0, 2.0, 4.0], vec![1.0, 3.0]).unwrap();
    /// assert_eq!(table.interpolate(2.0).unwrap(), 2.0);
    /// assert_eq!(table.interpolate(0.5).unwrap(), 1.0);
    /// assert!(table.interpolate(4.5).is_err());
    /// ```
    pub fn interpolate(&self, x: f64) -> Result<f64> {
        let bracket = Bracket::find(&self.edges, x)?;
        Ok(bracket.blend(self.contents[bracket.lo], self.contents[bracket.hi]))
    }

    /// Sum of the bin contents, multiplied by the bin widths if `weighted`
    pub fn integral(&self, weighted: bool) -> f64 {
        if weighted {
            self.contents
                .iter()
                .zip(self.edges.widths())
                .map(|(c, w)| c * w)
                .sum()
        } else {
            self.contents.iter().sum()
        }
    }

    /// Iterate over `(low, high, content)` for every bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.contents.iter())
            .map(|(e, c)| (e[0], e[1], *c))
    }
}

impl std::fmt::Display for Table1D {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (low, high, content) in self.bins() {
            writeln!(
                f,
                "{:>13}{:>13}{:>13}",
                low.sci(5, 2),
                high.sci(5, 2),
                content.sci(5, 2)
            )?;
        }
        Ok(())
    }
}
