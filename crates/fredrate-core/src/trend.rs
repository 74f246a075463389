//! Ordinary least squares trend fit over an evenly indexed series.

use serde::Serialize;

use crate::Series;

/// Line fitted by OLS over `x = 0..n`, so the slope is the average change
/// per observation (per quarter or per year depending on the input).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit a line to the values; `None` for fewer than two points.
    pub fn fit(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }

        let n_f = n as f64;
        let mean_x = (n_f - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n_f;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (index, &value) in values.iter().enumerate() {
            let dx = index as f64 - mean_x;
            covariance += dx * (value - mean_y);
            variance += dx * dx;
        }

        let slope = covariance / variance;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn fit_series(series: &Series) -> Option<Self> {
        Self::fit(&series.values())
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Observation, ObservationDate};

    #[test]
    fn perfectly_linear_values_recover_slope_and_intercept() {
        let trend = LinearTrend::fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("enough points");
        assert!((trend.slope - 1.0).abs() < 1e-12);
        assert!((trend.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_values_have_zero_slope() {
        let trend = LinearTrend::fit(&[40.0, 40.0, 40.0]).expect("enough points");
        assert!(trend.slope.abs() < 1e-12);
        assert!((trend.intercept - 40.0).abs() < 1e-12);
    }

    #[test]
    fn fewer_than_two_points_cannot_be_fit() {
        assert!(LinearTrend::fit(&[]).is_none());
        assert!(LinearTrend::fit(&[3.0]).is_none());
    }

    #[test]
    fn predict_extends_the_fitted_line() {
        let trend = LinearTrend::fit(&[2.0, 4.0, 6.0]).expect("enough points");
        assert!((trend.predict(3.0) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn fit_series_uses_values_in_date_order() {
        let series = Series::new(
            "annual",
            [
                ("2022-12-31", 3.0),
                ("2020-12-31", 1.0),
                ("2021-12-31", 2.0),
            ]
            .iter()
            .map(|&(d, v)| {
                Observation::new(ObservationDate::parse(d).expect("valid date"), v)
            }),
        );

        let trend = LinearTrend::fit_series(&series).expect("enough points");
        assert!((trend.slope - 1.0).abs() < 1e-12);
    }
}
