//! Integration tests for the binning, integral and projection behaviour

use neus_table::{Axis, Error, Table1D, Table2D};
use rstest::{fixture, rstest};

/// Non-uniform time axis and a short energy axis, filled with a smooth shape
#[fixture]
fn spectrum() -> Table2D {
    let times = vec![-0.5, 0.5, 1.5, 2.5, 4.0, 7.0];
    let energies = vec![0.0, 2.0, 5.0, 9.0, 14.0, 20.0];
    Table2D::from_centers(times, energies, |t, e| (1.0 + t.abs()) * e * (-e / 6.0).exp()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
}

#[rstest]
fn binning_invariant(spectrum: Table2D) {
    for axis in [Axis::X, Axis::Y] {
        let edges = spectrum.axis_edges(axis);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(spectrum.projection(axis, None).edges().len(), spectrum.n_bins(axis) + 1);
    }
    assert_eq!(
        spectrum.contents().len(),
        spectrum.n_bins(Axis::X) * spectrum.n_bins(Axis::Y)
    );
}

#[rstest]
#[case(vec![0.0])] // case 1
#[case(vec![0.0, 0.0])] // case 2
#[case(vec![1.0, 2.0, 1.5])] // case 3
#[case(vec![0.0, f64::NAN])] // case 4
fn invalid_edges_rejected(#[case] edges: Vec<f64>) {
    assert!(Table1D::new(edges.clone()).is_err());
    assert!(Table2D::new(vec![0.0, 1.0], edges).is_err());
}

#[rstest]
#[case(2.0)] // case 1
#[case(0.5)] // case 2
#[case(-3.0)] // case 3
fn integral_linearity(mut spectrum: Table2D, #[case] k: f64) {
    let before = spectrum.integral(true);
    let mut spectrum_1d = spectrum.projection(Axis::Y, None);
    let before_1d = spectrum_1d.integral(true);

    spectrum.scale(k);
    spectrum_1d.scale(k);
    assert!(close(spectrum.integral(true), k * before));
    assert!(close(spectrum_1d.integral(true), k * before_1d));
}

#[rstest]
fn weighted_integral_is_content_times_width() {
    let table = Table1D::from_contents(vec![0.0, 0.5, 2.0, 2.5], vec![4.0, 2.0, 6.0]).unwrap();
    let expected: f64 = table
        .bins()
        .map(|(low, high, content)| content * (high - low))
        .sum();
    assert_eq!(table.integral(true), expected);
    assert_eq!(table.integral(false), 12.0);
}

#[rstest]
#[case(Axis::X)] // case 1
#[case(Axis::Y)] // case 2
fn marginal_consistency(spectrum: Table2D, #[case] retain: Axis) {
    let marginal = spectrum.projection(retain, None);
    assert!(close(marginal.integral(true), spectrum.integral(true)));
}

#[rstest]
fn cutoff_truncates_on_bin_centres(spectrum: Table2D) {
    // time centres are 0, 1, 2, 3.25, 5.5
    let full = spectrum.projection(Axis::Y, None);
    let at_centre = spectrum.projection(Axis::Y, Some(2.0));
    let just_below = spectrum.projection(Axis::Y, Some(1.999));
    let beyond = spectrum.projection(Axis::Y, Some(100.0));

    assert_eq!(beyond, full);
    assert!(at_centre.integral(true) > just_below.integral(true));
    assert!(full.integral(true) > at_centre.integral(true));

    // no partial inclusion, every truncated spectrum is a sum of whole bins
    let partial = spectrum.projection(Axis::Y, Some(2.5));
    assert_eq!(partial, at_centre);
}

#[rstest]
fn interpolation_matches_centres(spectrum: Table2D) {
    for ix in 0..spectrum.n_bins(Axis::X) {
        for iy in 0..spectrum.n_bins(Axis::Y) {
            let t = spectrum.bin_center(Axis::X, ix).unwrap();
            let e = spectrum.bin_center(Axis::Y, iy).unwrap();
            let expected = spectrum.content(ix, iy).unwrap();
            assert!(close(spectrum.interpolate(t, e).unwrap(), expected));
        }
    }
}

#[rstest]
#[case(-0.6, 1.0)] // case 1
#[case(7.1, 1.0)] // case 2
#[case(1.0, -1.0)] // case 3
#[case(1.0, 20.5)] // case 4
fn interpolation_outside_domain(spectrum: Table2D, #[case] t: f64, #[case] e: f64) {
    assert!(matches!(
        spectrum.interpolate(t, e),
        Err(Error::OutsideDomain { .. })
    ));
}
