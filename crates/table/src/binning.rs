//! Edge validation and bin-centre bracketing shared by both tables

// crate modules
use crate::error::{Error, Result};

// neus modules
use neus_utils::SliceExt;

/// Make sure a list of edges describes at least one finite, increasing bin
pub(crate) fn validate_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(Error::TooFewEdges(edges.len()));
    }

    if let Some(index) = edges.iter().position(|e| !e.is_finite()) {
        return Err(Error::NonFiniteEdge(index));
    }

    edges.check_strictly_increasing().map_err(|e| match e {
        neus_utils::Error::SliceNotStrictlyIncreasing { index } => Error::NonIncreasingEdges(index),
        other => Error::Utils(other),
    })
}

/// Evenly spaced edges for `n_bins` bins over [low, high]
///
/// The last edge is exactly `high`.
///
/// ```rust
/// # use neus_table::uniform_edges;
/// assert_eq!(uniform_edges(4, 2.5, 82.5), vec![2.5, 22.5, 42.5, 62.5, 82.5]);
/// ```
pub fn uniform_edges(n_bins: usize, low: f64, high: f64) -> Vec<f64> {
    let width = (high - low) / n_bins as f64;
    (0..=n_bins)
        .map(|i| if i == n_bins { high } else { low + i as f64 * width })
        .collect()
}

/// Bin index of `value`, where bins are low <= value < high
pub(crate) fn find_bin(edges: &[f64], value: f64) -> Result<usize> {
    edges.find_bin_exclusive(value).map_err(|e| match e {
        neus_utils::Error::ValueOutsideOfBounds {
            value,
            lower_bound,
            upper_bound,
        } => Error::OutsideDomain {
            value,
            lower: lower_bound,
            upper: upper_bound,
        },
        other => Error::Utils(other),
    })
}

/// Midpoint of bin `i`
#[inline]
pub(crate) fn center(edges: &[f64], i: usize) -> f64 {
    (edges[i] + edges[i + 1]) / 2.0
}

/// Pair of neighbouring bins whose centres enclose a value
///
/// `t` is the fractional distance from the centre of `lo` to the centre of
/// `hi`. Values between an outer edge and the outermost centre collapse onto
/// that single bin (`lo == hi`, `t == 0`).
#[derive(Debug, PartialEq)]
pub(crate) struct Bracket {
    pub lo: usize,
    pub hi: usize,
    pub t: f64,
}

impl Bracket {
    /// Find the bracketing bin centres for a value inside the edges
    pub(crate) fn find(edges: &[f64], value: f64) -> Result<Self> {
        let bin = find_bin(edges, value)?;
        let last = edges.len() - 2;

        let (lo, hi) = if value < center(edges, bin) {
            match bin {
                0 => return Ok(Self::single(0)),
                _ => (bin - 1, bin),
            }
        } else if bin == last {
            return Ok(Self::single(last));
        } else {
            (bin, bin + 1)
        };

        let (c_lo, c_hi) = (center(edges, lo), center(edges, hi));
        Ok(Self {
            lo,
            hi,
            t: (value - c_lo) / (c_hi - c_lo),
        })
    }

    fn single(bin: usize) -> Self {
        Self {
            lo: bin,
            hi: bin,
            t: 0.0,
        }
    }

    /// Linear blend of the values at the two bins
    #[inline]
    pub(crate) fn blend(&self, at_lo: f64, at_hi: f64) -> f64 {
        at_lo + self.t * (at_hi - at_lo)
    }
}
