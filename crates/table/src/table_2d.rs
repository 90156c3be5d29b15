//! Module for the two-dimensional binned table

// crate modules
use crate::binning::{self, Bracket};
use crate::error::{Error, Result};
use crate::table_1d::Table1D;

// neus modules
use neus_utils::SliceExt;

// external crates
use log::warn;

/// Axis selector for a [Table2D]
///
/// By convention `X` is time and `Y` is energy for every joint spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis that is not `self`
    pub fn other(&self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Joint table over two independent non-uniform axes
///
/// Contents are stored densely in row-major order, so that bin `(ix, iy)` is
/// found at `ix * ny + iy`. Each axis is validated on construction in the
/// same way as a [Table1D].
///
/// ```rust
/// # use neus_table::{Axis, Table2D};
/// let mut table = Table2D::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0]).unwrap();
/// table.fill(0.5, 5.0, 1.0).unwrap();
/// table.fill(1.5, 5.0, 2.0).unwrap();
///
/// // weighted integral multiplies by both widths
/// assert_eq!(table.integral(true), 30.0);
///
/// // keep time, integrate over energy
/// let curve = table.projection(Axis::X, None);
/// assert_eq!(curve.contents(), &[10.0, 20.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table2D {
    x_edges: Vec<f64>,
    y_edges: Vec<f64>,
    contents: Vec<f64>,
}

impl Table2D {
    /// Empty table over the provided edges
    pub fn new(x_edges: Vec<f64>, y_edges: Vec<f64>) -> Result<Self> {
        binning::validate_edges(&x_edges)?;
        binning::validate_edges(&y_edges)?;
        let contents = vec![0.0; (x_edges.len() - 1) * (y_edges.len() - 1)];
        Ok(Self {
            x_edges,
            y_edges,
            contents,
        })
    }

    /// Table from pre-computed row-major contents
    pub fn from_contents(x_edges: Vec<f64>, y_edges: Vec<f64>, contents: Vec<f64>) -> Result<Self> {
        let mut table = Self::new(x_edges, y_edges)?;
        if contents.len() != table.contents.len() {
            return Err(Error::UnexpectedLength {
                expected: table.contents.len(),
                found: contents.len(),
            });
        }
        table.contents = contents;
        Ok(table)
    }

    /// Table with every bin set by evaluating `f(x, y)` at the bin centre
    pub fn from_centers(
        x_edges: Vec<f64>,
        y_edges: Vec<f64>,
        mut f: impl FnMut(f64, f64) -> f64,
    ) -> Result<Self> {
        let mut table = Self::new(x_edges, y_edges)?;
        let ny = table.ny();
        for ix in 0..table.nx() {
            let x = binning::center(&table.x_edges, ix);
            for iy in 0..ny {
                let y = binning::center(&table.y_edges, iy);
                table.contents[ix * ny + iy] = f(x, y);
            }
        }
        Ok(table)
    }

    /// Edges of the chosen axis
    pub fn axis_edges(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x_edges,
            Axis::Y => &self.y_edges,
        }
    }

    /// Number of bins on the chosen axis
    pub fn n_bins(&self, axis: Axis) -> usize {
        self.axis_edges(axis).len() - 1
    }

    /// Lowest edge of the chosen axis
    pub fn lower(&self, axis: Axis) -> f64 {
        self.axis_edges(axis)[0]
    }

    /// Highest edge of the chosen axis
    pub fn upper(&self, axis: Axis) -> f64 {
        let edges = self.axis_edges(axis);
        edges[edges.len() - 1]
    }

    /// Width of bin `i` on the chosen axis, if it exists
    pub fn bin_width(&self, axis: Axis, i: usize) -> Option<f64> {
        let edges = self.axis_edges(axis);
        (i + 1 < edges.len()).then(|| edges[i + 1] - edges[i])
    }

    /// Centre of bin `i` on the chosen axis, if it exists
    pub fn bin_center(&self, axis: Axis, i: usize) -> Option<f64> {
        let edges = self.axis_edges(axis);
        (i + 1 < edges.len()).then(|| binning::center(edges, i))
    }

    /// Row-major bin contents
    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    /// Content of bin `(ix, iy)`, if it exists
    pub fn content(&self, ix: usize, iy: usize) -> Option<f64> {
        (ix < self.nx() && iy < self.ny()).then(|| self.contents[self.index(ix, iy)])
    }

    /// Overwrite the content of bin `(ix, iy)`
    pub fn set_content(&mut self, ix: usize, iy: usize, value: f64) -> Result<()> {
        self.check_bin(Axis::X, ix)?;
        self.check_bin(Axis::Y, iy)?;
        let i = self.index(ix, iy);
        self.contents[i] = value;
        Ok(())
    }

    /// Add `weight` to the bin containing `(x, y)`
    pub fn fill(&mut self, x: f64, y: f64, weight: f64) -> Result<()> {
        let ix = self.find_bin(Axis::X, x)?;
        let iy = self.find_bin(Axis::Y, y)?;
        let i = self.index(ix, iy);
        self.contents[i] += weight;
        Ok(())
    }

    /// Index of the bin containing `value` on the chosen axis
    pub fn find_bin(&self, axis: Axis, value: f64) -> Result<usize> {
        binning::find_bin(self.axis_edges(axis), value)
    }

    /// Multiply every bin content by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.contents.iter_mut().for_each(|c| *c *= factor);
    }

    /// Bilinear interpolation of the contents between bin centres
    ///
    /// Each axis follows the [Table1D::interpolate] convention, so the outer
    /// half-bins take the content of the edge bin along that axis.
    ///
    /// ```rust
    /// # use neus_table::Table2D;
    /// let table = Table2D::from_contents(
    ///     vec![0.0, 2.0, 4.0],
    ///     vec![0.0, 2.0, 4.0],
    ///     vec![0.0, 1.0, 2.0, 3.0],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(table.interpolate(2.0, 2.0).unwrap(), 1.5);
    /// assert!(table.interpolate(2.0, 5.0).is_err());
    /// ```
    pub fn interpolate(&self, x: f64, y: f64) -> Result<f64> {
        let bx = Bracket::find(&self.x_edges, x)?;
        let by = Bracket::find(&self.y_edges, y)?;

        let at = |ix: usize, iy: usize| self.contents[self.index(ix, iy)];
        let low = by.blend(at(bx.lo, by.lo), at(bx.lo, by.hi));
        let high = by.blend(at(bx.hi, by.lo), at(bx.hi, by.hi));
        Ok(bx.blend(low, high))
    }

    /// Sum of the bin contents, multiplied by both bin widths if `weighted`
    pub fn integral(&self, weighted: bool) -> f64 {
        if !weighted {
            return self.contents.iter().sum();
        }

        let wy = self.y_edges.widths();
        self.x_edges
            .widths()
            .iter()
            .zip(self.contents.chunks(self.ny()))
            .map(|(wx, row)| row.iter().zip(&wy).map(|(c, w)| c * w * wx).sum::<f64>())
            .sum()
    }

    /// Marginal over the `retain` axis
    ///
    /// Each bin of the result is the sum of content times width over the
    /// other axis. With a `cutoff`, the scan runs in increasing order and
    /// stops at the first bin whose centre is above the cutoff. The boundary
    /// bin is never partially included.
    ///
    /// ```rust
    /// # use neus_table::{Axis, Table2D};
    /// let table = Table2D::from_contents(
    ///     vec![0.0, 1.0, 2.0, 3.0],
    ///     vec![0.0, 1.0],
    ///     vec![1.0, 2.0, 4.0],
    /// )
    /// .unwrap();
    ///
    /// // centres are 0.5, 1.5, 2.5 so only two time bins survive
    /// let spectrum = table.projection(Axis::Y, Some(2.0));
    /// assert_eq!(spectrum.contents(), &[3.0]);
    /// ```
    pub fn projection(&self, retain: Axis, cutoff: Option<f64>) -> Table1D {
        let other = retain.other();
        let limit = self.scan_limit(other, cutoff);
        let widths = self.axis_edges(other).widths();

        let contents = (0..self.n_bins(retain))
            .map(|i| {
                (0..limit)
                    .map(|j| self.along(retain, i, j) * widths[j])
                    .sum::<f64>()
            })
            .collect();

        Table1D {
            edges: self.axis_edges(retain).to_vec(),
            contents,
        }
    }

    /// Mean bin centre of the other axis for each bin of the `retain` axis
    ///
    /// Weighted by content times width, with the same `cutoff` rule as
    /// [Table2D::projection]. For a number density N(t, E) retaining time
    /// this is the mean energy curve.
    ///
    /// A bin with nothing to average over has a mean of `0.0`.
    pub fn mean(&self, retain: Axis, cutoff: Option<f64>) -> Table1D {
        let other = retain.other();
        let limit = self.scan_limit(other, cutoff);
        let widths = self.axis_edges(other).widths();
        let edges = self.axis_edges(other);

        let mut n_empty = 0;
        let contents = (0..self.n_bins(retain))
            .map(|i| {
                let (numerator, denominator) = (0..limit).fold((0.0, 0.0), |(num, den), j| {
                    let weight = self.along(retain, i, j) * widths[j];
                    (num + weight * binning::center(edges, j), den + weight)
                });

                if denominator == 0.0 {
                    n_empty += 1;
                    0.0
                } else {
                    numerator / denominator
                }
            })
            .collect();

        if n_empty > 0 {
            warn!("Mean undefined for {n_empty} empty bins, set to 0");
        }

        Table1D {
            edges: self.axis_edges(retain).to_vec(),
            contents,
        }
    }

    fn nx(&self) -> usize {
        self.x_edges.len() - 1
    }

    fn ny(&self) -> usize {
        self.y_edges.len() - 1
    }

    fn index(&self, ix: usize, iy: usize) -> usize {
        ix * self.ny() + iy
    }

    /// Content at bin `i` of the retained axis and bin `j` of the other
    fn along(&self, retain: Axis, i: usize, j: usize) -> f64 {
        match retain {
            Axis::X => self.contents[self.index(i, j)],
            Axis::Y => self.contents[self.index(j, i)],
        }
    }

    /// Number of leading bins on `axis` with a centre at or below the cutoff
    fn scan_limit(&self, axis: Axis, cutoff: Option<f64>) -> usize {
        let n = self.n_bins(axis);
        match cutoff {
            None => n,
            Some(cutoff) => {
                let edges = self.axis_edges(axis);
                (0..n)
                    .position(|j| binning::center(edges, j) > cutoff)
                    .unwrap_or(n)
            }
        }
    }

    fn check_bin(&self, axis: Axis, index: usize) -> Result<()> {
        let n_bins = self.n_bins(axis);
        if index < n_bins {
            Ok(())
        } else {
            Err(Error::BinOutOfRange { index, n_bins })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 time bins x 3 energy bins, contents are 10*ix + iy
    fn grid() -> Table2D {
        Table2D::from_contents(
            vec![0.0, 1.0, 3.0],
            vec![0.0, 2.0, 4.0, 8.0],
            vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0],
        )
        .unwrap()
    }

    #[test]
    fn row_major_layout() {
        let table = grid();
        assert_eq!(table.content(1, 0), Some(10.0));
        assert_eq!(table.content(0, 2), Some(2.0));
        assert_eq!(table.content(2, 0), None);
        assert_eq!(table.n_bins(Axis::X), 2);
        assert_eq!(table.n_bins(Axis::Y), 3);
    }

    #[test]
    fn contents_must_match_edges() {
        assert_eq!(
            Table2D::from_contents(vec![0.0, 1.0], vec![0.0, 1.0, 2.0], vec![1.0]),
            Err(Error::UnexpectedLength {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn set_and_fill() {
        let mut table = grid();
        table.set_content(1, 2, 0.5).unwrap();
        table.fill(2.0, 8.0, 0.25).unwrap();
        assert_eq!(table.content(1, 2), Some(0.75));
        assert!(table.set_content(0, 3, 1.0).is_err());
        assert!(table.fill(3.5, 1.0, 1.0).is_err());
    }

    #[test]
    fn projection_keeps_retained_axis() {
        let table = grid();

        // energy widths 2, 2, 4
        let curve = table.projection(Axis::X, None);
        assert_eq!(curve.edges(), &[0.0, 1.0, 3.0]);
        assert_eq!(curve.contents(), &[0.0 + 2.0 + 8.0, 20.0 + 22.0 + 48.0]);

        // time widths 1, 2
        let spectrum = table.projection(Axis::Y, None);
        assert_eq!(spectrum.contents(), &[20.0, 23.0, 26.0]);
    }

    #[test]
    fn projection_cutoff_on_centres() {
        let table = grid();
        // energy centres 1, 3, 6
        let curve = table.projection(Axis::X, Some(5.9));
        assert_eq!(curve.contents(), &[2.0, 42.0]);

        // a cutoff below the first centre keeps nothing
        let empty = table.projection(Axis::X, Some(0.5));
        assert_eq!(empty.contents(), &[0.0, 0.0]);
    }

    #[test]
    fn mean_of_other_axis() {
        let table = grid();
        let means = table.mean(Axis::X, None);

        // ix = 1: weights 20, 22, 48 at centres 1, 3, 6
        let expected = (20.0 * 1.0 + 22.0 * 3.0 + 48.0 * 6.0) / 90.0;
        assert!((means.contents()[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn mean_of_empty_bin_is_zero() {
        let mut table = grid();
        (0..3).for_each(|iy| table.set_content(0, iy, 0.0).unwrap());
        let means = table.mean(Axis::X, None);
        assert_eq!(means.contents()[0], 0.0);
        assert!(means.contents()[1] > 0.0);
    }

    #[test]
    fn interpolation_inside_and_outside() {
        let table = grid();
        // on bin centres the content is exact
        assert_eq!(table.interpolate(2.0, 3.0).unwrap(), 11.0);
        // halfway between x centres 0.5 and 2.0
        assert_eq!(table.interpolate(1.25, 3.0).unwrap(), 6.0);
        // outer half bins take the edge content
        assert_eq!(table.interpolate(3.0, 0.0).unwrap(), 10.0);
        assert!(table.interpolate(-0.1, 1.0).is_err());
    }
}
