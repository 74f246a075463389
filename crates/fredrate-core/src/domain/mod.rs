mod date;
mod series;
mod series_id;

pub use date::ObservationDate;
pub use series::{Observation, Series};
pub use series_id::SeriesId;
