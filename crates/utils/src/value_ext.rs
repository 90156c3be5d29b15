use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Scientific number formatting with a signed, padded exponent
    ///
    /// Model totals span many orders of magnitude, and the default `{:e}`
    /// output drops the exponent sign and padding.
    ///
    /// ```rust
    /// # use neus_utils::ValueExt;
    /// assert_eq!((2.5e57).sci(2, 2), "2.50e+57".to_string());
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((1.6e-6).sci(3, 3), "1.600e-006".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let formatted = f!("{:.precision$e}", &self, precision = precision);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                f!("{mantissa}e{sign}{digits:0>exp_pad$}")
            }
            // inf and NaN have no exponent
            None => formatted,
        }
    }
}
