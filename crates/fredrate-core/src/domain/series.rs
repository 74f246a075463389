use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::{ObservationDate, ValidationError};

/// A single dated data point parsed from the source API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: ObservationDate,
    pub value: f64,
}

impl Observation {
    pub const fn new(date: ObservationDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Named, date-unique series of observations ordered ascending by date.
///
/// Immutable once constructed; derived series (rates, resamples, moving
/// averages) are new `Series` values. The name doubles as the logical name
/// used in export filenames.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    points: BTreeMap<ObservationDate, f64>,
}

impl Series {
    /// Build a series from observations.
    ///
    /// Duplicate dates keep the last value seen; non-finite values are
    /// dropped, matching the fetcher's coercion policy.
    pub fn new(name: impl Into<String>, observations: impl IntoIterator<Item = Observation>) -> Self {
        let points = observations
            .into_iter()
            .filter(|obs| obs.value.is_finite())
            .map(|obs| (obs.date, obs.value))
            .collect();

        Self {
            name: name.into(),
            points,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rebind the logical name, e.g. from a raw series id to the dataset
    /// member name used in export filenames.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value_at(&self, date: ObservationDate) -> Option<f64> {
        self.points.get(&date).copied()
    }

    pub fn first(&self) -> Option<Observation> {
        self.points
            .iter()
            .next()
            .map(|(&date, &value)| Observation::new(date, value))
    }

    pub fn last(&self) -> Option<Observation> {
        self.points
            .iter()
            .next_back()
            .map(|(&date, &value)| Observation::new(date, value))
    }

    /// Iterate observations in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.points
            .iter()
            .map(|(&date, &value)| Observation::new(date, value))
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.iter().collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.values().copied().collect()
    }

    /// Inner join on exact date equality: the intersection of both date
    /// domains, ascending, with one value from each side.
    pub fn inner_join<'a>(
        &'a self,
        other: &'a Series,
    ) -> impl Iterator<Item = (ObservationDate, f64, f64)> + 'a {
        self.points.iter().filter_map(|(&date, &left)| {
            other.value_at(date).map(|right| (date, left, right))
        })
    }

    /// Aggregate to annual frequency by summing all observations that fall
    /// in each calendar year. The annual observation is dated December 31;
    /// years with no observations produce no output row.
    pub fn annual_sum(&self, name: impl Into<String>) -> Series {
        let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
        for obs in self.iter() {
            *totals.entry(obs.date.year()).or_insert(0.0) += obs.value;
        }

        Series::new(
            name,
            totals
                .into_iter()
                .map(|(year, total)| Observation::new(ObservationDate::year_end(year), total)),
        )
    }

    /// Trailing moving average. A point is emitted only once a full window
    /// is available, dated at the window's last observation.
    pub fn moving_average(
        &self,
        name: impl Into<String>,
        window: usize,
    ) -> Result<Series, ValidationError> {
        if window == 0 {
            return Err(ValidationError::ZeroWindow);
        }

        let observations = self.observations();
        let averaged = observations
            .windows(window)
            .map(|chunk| {
                let sum: f64 = chunk.iter().map(|obs| obs.value).sum();
                let last = chunk[window - 1];
                Observation::new(last.date, sum / window as f64)
            })
            .collect::<Vec<_>>();

        Ok(Series::new(name, averaged))
    }
}

impl Serialize for Series {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Series", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("observations", &self.observations())?;
        state.end()
    }
}
