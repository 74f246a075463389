//! Orchestration of the corporate tax rate analysis: fetch the source
//! series, align them, and derive quarterly and annual effective rates.

use crate::fred::{
    FredClient, ObservationsRequest, PROFITS_AFTER_TAX_QUARTERLY_ID,
    PROFITS_BEFORE_TAX_QUARTERLY_ID, TAX_RECEIPTS_ANNUAL_ID, TAX_RECEIPTS_QUARTERLY_ID,
};
use crate::rate::effective_rate;
use crate::{ObservationDate, Series, SeriesId, ValidationError};

/// All fetched and derived series for one analysis run.
///
/// Fetch failures are logged and surface as empty members; the derived rates
/// are `None` when either input was empty, so downstream reporting can tell
/// "rate not computable" from "rate computed over no shared dates".
#[derive(Debug, Clone, PartialEq)]
pub struct CorporateTaxDataset {
    pub tax_receipts_quarterly: Series,
    pub profits_before_tax_quarterly: Series,
    pub profits_after_tax_quarterly: Series,
    pub tax_receipts_annual: Series,
    pub effective_rate_quarterly: Option<Series>,
    pub effective_rate_annual: Option<Series>,
}

impl CorporateTaxDataset {
    /// Every non-empty member, in a stable order, for export.
    pub fn named_series(&self) -> Vec<&Series> {
        let mut members = vec![
            &self.tax_receipts_quarterly,
            &self.profits_before_tax_quarterly,
            &self.profits_after_tax_quarterly,
            &self.tax_receipts_annual,
        ];
        if let Some(rate) = &self.effective_rate_quarterly {
            members.push(rate);
        }
        if let Some(rate) = &self.effective_rate_annual {
            members.push(rate);
        }
        members.retain(|series| !series.is_empty());
        members
    }
}

/// Fetch all corporate tax series and derive the effective rates.
///
/// Each series is fetched sequentially; a failed fetch is logged and
/// replaced with an empty series so one bad upstream call does not abort the
/// whole analysis. The annual rate is derived from quarterly data summed per
/// calendar year, not from the independently reported annual receipts.
pub async fn fetch_corporate_tax_data(
    client: &FredClient,
    start: Option<ObservationDate>,
    end: Option<ObservationDate>,
) -> Result<CorporateTaxDataset, ValidationError> {
    let tax_receipts_quarterly = fetch_or_empty(
        client,
        TAX_RECEIPTS_QUARTERLY_ID,
        "tax_receipts_quarterly",
        start,
        end,
    )
    .await?;

    let profits_before_tax_quarterly = fetch_or_empty(
        client,
        PROFITS_BEFORE_TAX_QUARTERLY_ID,
        "profits_before_tax_quarterly",
        start,
        end,
    )
    .await?;

    let profits_after_tax_quarterly = fetch_or_empty(
        client,
        PROFITS_AFTER_TAX_QUARTERLY_ID,
        "profits_after_tax_quarterly",
        start,
        end,
    )
    .await?;

    let tax_receipts_annual = fetch_or_empty(
        client,
        TAX_RECEIPTS_ANNUAL_ID,
        "tax_receipts_annual",
        start,
        end,
    )
    .await?;

    let effective_rate_quarterly = derive_rate(
        "effective_tax_rate_quarterly",
        &tax_receipts_quarterly,
        &profits_before_tax_quarterly,
    );

    let tax_annualized = tax_receipts_quarterly.annual_sum("tax_receipts_quarterly_annualized");
    let profits_annualized =
        profits_before_tax_quarterly.annual_sum("profits_before_tax_annualized");
    let effective_rate_annual = derive_rate(
        "effective_tax_rate_annual",
        &tax_annualized,
        &profits_annualized,
    );

    Ok(CorporateTaxDataset {
        tax_receipts_quarterly,
        profits_before_tax_quarterly,
        profits_after_tax_quarterly,
        tax_receipts_annual,
        effective_rate_quarterly,
        effective_rate_annual,
    })
}

async fn fetch_or_empty(
    client: &FredClient,
    series_id: &str,
    logical_name: &str,
    start: Option<ObservationDate>,
    end: Option<ObservationDate>,
) -> Result<Series, ValidationError> {
    let series_id = SeriesId::parse(series_id).expect("catalog series ids are valid");
    let request = ObservationsRequest::new(series_id.clone(), start, end)?;

    match client.observations(&request).await {
        Ok(series) => {
            log::info!("fetched {} observation(s) for {series_id}", series.len());
            Ok(series.with_name(logical_name))
        }
        Err(error) => {
            log::error!("failed to fetch {series_id}: {error}");
            Ok(Series::empty(logical_name))
        }
    }
}

fn derive_rate(name: &str, numerator: &Series, denominator: &Series) -> Option<Series> {
    if numerator.is_empty() || denominator.is_empty() {
        log::warn!("skipping {name}: at least one input series is empty");
        return None;
    }
    Some(effective_rate(name, numerator, denominator))
}
