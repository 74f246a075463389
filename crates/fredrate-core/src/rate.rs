//! Effective rate calculation: inner-join two series by date, divide, scale
//! to a percentage.

use crate::{Observation, Series};

/// Compute an effective rate series: `100 * numerator / denominator` over
/// the intersection of both date domains.
///
/// Dates where the denominator is exactly zero are excluded rather than
/// emitting infinities. Negative denominators are kept; a loss-making period
/// legitimately yields a negative rate.
pub fn effective_rate(name: impl Into<String>, numerator: &Series, denominator: &Series) -> Series {
    let points = numerator
        .inner_join(denominator)
        .filter(|&(_, _, denom)| denom != 0.0)
        .map(|(date, num, denom)| Observation::new(date, 100.0 * num / denom));

    Series::new(name, points)
}
