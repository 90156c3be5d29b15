//! Rectangle-rule quadrature over the oracle domain
//!
//! Integrals are left-point sums `Σ f(x_k) Δx_k`. Time uses a variable step
//! keyed to the time since core collapse:
//!
//! | Segment          | Δt (s) |
//! | ---------------- | ------ |
//! | t < 0.1          | 1e-3   |
//! | 0.1 <= t < 0.5   | 5e-3   |
//! | 0.5 <= t < 1     | 1e-2   |
//! | 1 <= t < 4       | 5e-2   |
//! | 4 <= t < 10      | 1e-1   |
//! | t >= 10          | 0.5    |
//!
//! Energy uses a fixed 2 MeV step.
//!
//! Nodes are `origin + k Δ` within each segment rather than a running sum, so
//! the position of a node does not drift with the number of steps before it.
//! Upper bounds are exclusive, with a tolerance of a millionth of a step so
//! that a node landing on the bound through rounding is not counted.

/// Time step schedule as `(segment upper bound, step)`
const TIME_SCHEDULE: [(f64, f64); 6] = [
    (0.1, 1e-3),
    (0.5, 5e-3),
    (1.0, 1e-2),
    (4.0, 5e-2),
    (10.0, 1e-1),
    (f64::INFINITY, 0.5),
];

/// Energy step, MeV
pub const ENERGY_STEP: f64 = 2.0;

/// Fraction of a step treated as numerical noise at an upper bound
const TOLERANCE: f64 = 1e-6;

/// A quadrature node and the width it represents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub at: f64,
    pub width: f64,
}

/// Time nodes over [start, end) following the variable step schedule
///
/// ```rust
/// # use neus_livermore::quadrature::time_nodes;
/// let nodes = time_nodes(0.0, 0.1);
/// assert_eq!(nodes.len(), 100);
/// assert!(nodes.iter().all(|n| n.width == 1e-3));
/// ```
pub fn time_nodes(start: f64, end: f64) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut origin = start;

    for (below, step) in TIME_SCHEDULE {
        let n = steps_below(origin, below.min(end), step);
        nodes.extend((0..n).map(|k| Node {
            at: origin + k as f64 * step,
            width: step,
        }));
        // the next segment starts one step after the last node
        origin += n as f64 * step;
    }

    nodes
}

/// Energy nodes over [start, end) with the fixed 2 MeV step
///
/// ```rust
/// # use neus_livermore::quadrature::energy_nodes;
/// let nodes = energy_nodes(2.5, 82.5);
/// assert_eq!(nodes.len(), 40);
/// assert_eq!(nodes[39].at, 80.5);
/// ```
pub fn energy_nodes(start: f64, end: f64) -> Vec<Node> {
    (0..steps_below(start, end, ENERGY_STEP))
        .map(|k| Node {
            at: start + k as f64 * ENERGY_STEP,
            width: ENERGY_STEP,
        })
        .collect()
}

/// Left-point rectangle rule over the nodes
///
/// ```rust
/// # use neus_livermore::quadrature::{integrate, time_nodes};
/// let total = integrate(&time_nodes(0.0, 0.1), |_| 1.0);
/// assert!((total - 0.1).abs() < 1e-12);
/// ```
pub fn integrate(nodes: &[Node], mut f: impl FnMut(f64) -> f64) -> f64 {
    nodes.iter().map(|node| f(node.at) * node.width).sum()
}

/// Number of nodes `origin + k step` strictly below `limit`
///
/// Unbounded or undefined ranges have no nodes.
fn steps_below(origin: f64, limit: f64, step: f64) -> usize {
    if !(origin.is_finite() && limit.is_finite()) {
        return 0;
    }

    let mut n = 0;
    while origin + n as f64 * step < limit - TOLERANCE * step {
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_segment() {
        let nodes = time_nodes(0.0, 0.1);
        assert_eq!(nodes.len(), 100);
        assert_eq!(nodes[0].at, 0.0);
        assert!((nodes[99].at - 0.099).abs() < 1e-15);

        let total = integrate(&nodes, |_| 1.0);
        assert!((total - 0.1).abs() < 1e-12);
    }

    #[test]
    fn segment_steps() {
        let nodes = time_nodes(0.0, 20.0);
        let count = |step: f64| nodes.iter().filter(|n| n.width == step).count();

        assert_eq!(count(1e-3), 100);
        assert_eq!(count(5e-3), 80);
        assert_eq!(count(1e-2), 50);
        assert_eq!(count(5e-2), 60);
        assert_eq!(count(1e-1), 60);
        assert_eq!(count(0.5), 20);

        // the nodes tile [0, 20) without gaps or overlaps
        let covered = integrate(&nodes, |_| 1.0);
        assert!((covered - 20.0).abs() < 1e-9);
        for pair in nodes.windows(2) {
            assert!((pair[0].at + pair[0].width - pair[1].at).abs() < 1e-9);
        }
    }

    #[test]
    fn no_drift_in_long_segments() {
        let nodes = time_nodes(0.0012, 0.1);
        let last = nodes[nodes.len() - 1];
        assert_eq!(nodes.len(), 99);
        assert_eq!(last.at, 0.0012 + 98.0 * 1e-3);
    }

    #[test]
    fn start_inside_late_segment() {
        let nodes = time_nodes(12.0, 14.0);
        assert_eq!(nodes.len(), 4);
        assert!(nodes.iter().all(|n| n.width == 0.5));
        assert_eq!(nodes[3].at, 13.5);
    }

    #[test]
    fn upper_bounds_are_exclusive() {
        assert_eq!(energy_nodes(2.5, 4.5).len(), 1);
        assert_eq!(energy_nodes(2.5, 4.6).len(), 2);
        assert!(energy_nodes(2.5, 2.5).is_empty());
        assert!(time_nodes(1.0, 1.0).is_empty());
    }

    #[test]
    fn linear_integrand() {
        // left-point sum of x over [2.5, 82.5) with 40 steps of 2
        let total = integrate(&energy_nodes(2.5, 82.5), |e| e);
        assert_eq!(total, 2.0 * (0..40).map(|k| 2.5 + 2.0 * k as f64).sum::<f64>());
    }
}
