//! Core library for fredrate.
//!
//! This crate contains:
//! - Date-indexed series domain types and validation
//! - The FRED observations client and series catalog
//! - Rate calculation, resampling, statistics, and trend fitting
//! - Chart rendering and CSV export

pub mod analysis;
pub mod chart;
pub mod domain;
pub mod error;
pub mod export;
pub mod fred;
pub mod http_client;
pub mod rate;
pub mod stats;
pub mod trend;

pub use analysis::{fetch_corporate_tax_data, CorporateTaxDataset};
pub use domain::{Observation, ObservationDate, Series, SeriesId};
pub use error::ValidationError;
pub use fred::{
    series_catalog, FredClient, Frequency, ObservationsRequest, SeriesInfo, SourceError,
    SourceErrorKind,
};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use rate::effective_rate;
pub use stats::{decade_averages, summarize, SeriesSummary, DEFAULT_DECADE_BASE_YEAR};
pub use trend::LinearTrend;
