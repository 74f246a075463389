//! Descriptive statistics over a rate series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Observation, Series};

/// Default base year for decade bucketing, matching the usual analysis start.
pub const DEFAULT_DECADE_BASE_YEAR: i32 = 1950;

/// Summary statistics for a non-empty series.
///
/// `std_dev` uses the sample (N-1) denominator; for a single observation it
/// is NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: Observation,
    pub max: Observation,
}

/// Compute summary statistics, or `None` for an empty series.
pub fn summarize(series: &Series) -> Option<SeriesSummary> {
    let observations = series.observations();
    let first = observations.first()?;

    let count = observations.len();
    let mean = observations.iter().map(|obs| obs.value).sum::<f64>() / count as f64;

    let mut sorted: Vec<f64> = observations.iter().map(|obs| obs.value).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("series values are finite"));
    let median = if count % 2 == 1 {
        sorted[count / 2]
    } else {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    };

    let std_dev = if count > 1 {
        let sum_sq = observations
            .iter()
            .map(|obs| (obs.value - mean).powi(2))
            .sum::<f64>();
        (sum_sq / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    // First occurrence wins on ties.
    let mut min = *first;
    let mut max = *first;
    for obs in &observations {
        if obs.value < min.value {
            min = *obs;
        }
        if obs.value > max.value {
            max = *obs;
        }
    }

    Some(SeriesSummary {
        count,
        mean,
        median,
        std_dev,
        min,
        max,
    })
}

/// Mean value per ten-year bucket starting at `base_year`.
///
/// Observations before `base_year` are ignored; buckets with no observations
/// are omitted. Keys are the bucket's first year (1950, 1960, ...).
pub fn decade_averages(series: &Series, base_year: i32) -> BTreeMap<i32, f64> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();

    for obs in series.iter() {
        let year = obs.date.year();
        if year < base_year {
            continue;
        }
        let decade = base_year + (year - base_year) / 10 * 10;
        let entry = sums.entry(decade).or_insert((0.0, 0));
        entry.0 += obs.value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(decade, (sum, count))| (decade, sum / count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObservationDate;

    fn date(input: &str) -> ObservationDate {
        ObservationDate::parse(input).expect("test date must parse")
    }

    fn series(rows: &[(&str, f64)]) -> Series {
        Series::new(
            "rate",
            rows.iter().map(|&(d, v)| Observation::new(date(d), v)),
        )
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(summarize(&Series::empty("rate")).is_none());
    }

    #[test]
    fn summary_matches_hand_computed_values() {
        let summary = summarize(&series(&[
            ("2020-01-01", 10.0),
            ("2020-04-01", 20.0),
            ("2020-07-01", 30.0),
            ("2020-10-01", 40.0),
        ]))
        .expect("non-empty series");

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 25.0);
        assert_eq!(summary.median, 25.0);
        // Sample variance of [10,20,30,40] is 500/3.
        assert!((summary.std_dev - (500.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.min.value, 10.0);
        assert_eq!(summary.min.date, date("2020-01-01"));
        assert_eq!(summary.max.value, 40.0);
        assert_eq!(summary.max.date, date("2020-10-01"));
    }

    #[test]
    fn median_of_odd_count_is_middle_value() {
        let summary = summarize(&series(&[
            ("2020-01-01", 3.0),
            ("2020-04-01", 1.0),
            ("2020-07-01", 2.0),
        ]))
        .expect("non-empty series");

        assert_eq!(summary.median, 2.0);
    }

    #[test]
    fn single_observation_has_nan_sample_std() {
        let summary = summarize(&series(&[("2020-01-01", 5.0)])).expect("non-empty series");
        assert!(summary.std_dev.is_nan());
        assert_eq!(summary.mean, 5.0);
    }

    #[test]
    fn min_and_max_report_first_occurrence_on_ties() {
        let summary = summarize(&series(&[
            ("2020-01-01", 7.0),
            ("2020-04-01", 7.0),
            ("2020-07-01", 1.0),
            ("2020-10-01", 1.0),
        ]))
        .expect("non-empty series");

        assert_eq!(summary.max.date, date("2020-01-01"));
        assert_eq!(summary.min.date, date("2020-07-01"));
    }

    #[test]
    fn constant_decade_averages_to_the_constant() {
        let rows: Vec<(String, f64)> = (1950..1960)
            .map(|year| (format!("{year}-01-01"), 40.0))
            .collect();
        let series = Series::new(
            "rate",
            rows.iter()
                .map(|(d, v)| Observation::new(date(d), *v)),
        );

        let averages = decade_averages(&series, 1950);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages.get(&1950), Some(&40.0));
        assert_eq!(averages.get(&1960), None);
    }

    #[test]
    fn observations_before_base_year_are_ignored() {
        let averages = decade_averages(
            &series(&[("1949-01-01", 99.0), ("1950-01-01", 40.0)]),
            1950,
        );
        assert_eq!(averages.len(), 1);
        assert_eq!(averages.get(&1950), Some(&40.0));
    }

    #[test]
    fn decades_bucket_relative_to_base_year() {
        let averages = decade_averages(
            &series(&[
                ("1955-01-01", 10.0),
                ("1959-10-01", 30.0),
                ("1960-01-01", 50.0),
                ("1975-01-01", 70.0),
            ]),
            1950,
        );

        assert_eq!(averages.get(&1950), Some(&20.0));
        assert_eq!(averages.get(&1960), Some(&50.0));
        assert_eq!(averages.get(&1970), Some(&70.0));
    }
}
