use crate::error::{Error, Result};

use itertools::Itertools;

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Find index bin containing 'value', where bins are low <= value < high
    ///
    /// A value on a bin edge returns the bin above. Values equal to the highest
    /// bound are considered part of the last bin.
    ///
    /// ```text
    ///     edges: 0.0 0.1 1.0 20.0
    ///
    ///     0.0 <= bin 0 < 0.1
    ///     0.1 <= bin 1 < 1.0
    ///     1.0 <= bin 2 <= 20.0
    /// ```
    ///
    /// ```rust
    /// # use neus_utils::SliceExt;
    /// let bounds = vec![0.0, 0.1, 1.0, 20.0];
    ///
    /// // Find values in the array
    /// assert_eq!(bounds.find_bin_exclusive(0.0 ), Ok(0));
    /// assert_eq!(bounds.find_bin_exclusive(0.5 ), Ok(1));
    /// assert_eq!(bounds.find_bin_exclusive(1.0 ), Ok(2));
    /// assert_eq!(bounds.find_bin_exclusive(20.0), Ok(2));
    ///
    /// // Values outside the bin bounds are an error case
    /// assert!(bounds.find_bin_exclusive(-1.0).is_err());
    /// assert!(bounds.find_bin_exclusive(21.0).is_err());
    /// ```
    fn find_bin_exclusive(&self, value: T) -> Result<usize>;

    /// Check that every value is strictly larger than the one before
    ///
    /// Returns the index of the first value breaking the order.
    ///
    /// ```rust
    /// # use neus_utils::{Error, SliceExt};
    /// assert_eq!([0.0, 1.0, 2.5].check_strictly_increasing(), Ok(()));
    /// assert_eq!(
    ///     [0.0, 1.0, 1.0].check_strictly_increasing(),
    ///     Err(Error::SliceNotStrictlyIncreasing { index: 2 })
    /// );
    /// ```
    fn check_strictly_increasing(&self) -> Result<()>;

    /// Widths between consecutive values
    ///
    /// ```rust
    /// # use neus_utils::SliceExt;
    /// assert_eq!([0.0, 1.0, 3.0].widths(), vec![1.0, 2.0]);
    /// ```
    fn widths(&self) -> Vec<T>;

    /// Reconstruct bin edges from a list of bin centres
    ///
    /// Point samples are treated as bin centres. Inner edges are set to the
    /// middle of two neighbouring samples and the outer edges are extrapolated
    /// by half of the neighbouring interval:
    ///
    /// ```text
    ///     edge[0]    = t[0] - (t[1] - t[0]) / 2
    ///     edge[i]    = (t[i-1] + t[i]) / 2
    ///     edge[last] = t[n-1] + (t[n-1] - t[n-2]) / 2
    /// ```
    ///
    /// ```rust
    /// # use neus_utils::SliceExt;
    /// assert_eq!([1.0, 2.0, 3.0].centers_to_edges(), Ok(vec![0.5, 1.5, 2.5, 3.5]));
    /// assert_eq!([0.0, 1.0, 3.0].centers_to_edges(), Ok(vec![-0.5, 0.5, 2.0, 4.0]));
    ///
    /// // at least two samples are needed to know a width
    /// assert!([1.0].centers_to_edges().is_err());
    /// ```
    fn centers_to_edges(&self) -> Result<Vec<T>>;
}

impl SliceExt<f64> for [f64] {
    fn find_bin_exclusive(&self, value: f64) -> Result<usize> {
        // make sure there are bin edges to check against
        let (lower_bound, upper_bound) = match (self.first(), self.last()) {
            (Some(low), Some(high)) if self.len() >= 2 => (*low, *high),
            _ => {
                return Err(Error::BelowMinimumSliceLength {
                    length: self.len(),
                    minimum_required: 2,
                })
            }
        };

        // is the value relevant?
        if value.is_nan() || value < lower_bound || value > upper_bound {
            return Err(Error::ValueOutsideOfBounds {
                value,
                lower_bound,
                upper_bound,
            });
        }

        // special case for being on the upper edge
        if value == upper_bound {
            return Ok(self.len() - 2);
        }

        // number of edges <= value, the bin is the one starting at the last
        match self.partition_point(|edge| *edge <= value) {
            0 => Err(Error::UncapturedErrorCondition),
            n => Ok(n - 1),
        }
    }

    fn check_strictly_increasing(&self) -> Result<()> {
        match self.iter().tuple_windows().position(|(a, b)| a >= b) {
            Some(i) => Err(Error::SliceNotStrictlyIncreasing { index: i + 1 }),
            None => Ok(()),
        }
    }

    fn widths(&self) -> Vec<f64> {
        self.iter().tuple_windows().map(|(a, b)| b - a).collect()
    }

    fn centers_to_edges(&self) -> Result<Vec<f64>> {
        let n = self.len();
        if n < 2 {
            return Err(Error::BelowMinimumSliceLength {
                length: n,
                minimum_required: 2,
            });
        }

        let mut edges = Vec::with_capacity(n + 1);
        edges.push(self[0] - (self[1] - self[0]) / 2.0);
        edges.extend(self.iter().tuple_windows().map(|(a, b)| (a + b) / 2.0));
        edges.push(self[n - 1] + (self[n - 1] - self[n - 2]) / 2.0);
        Ok(edges)
    }
}
