//! Full analysis pipeline: fetch, derive rates, report, chart, export.

use fredrate_core::chart::render_rate_chart;
use fredrate_core::export::export_dataset_csv;
use fredrate_core::{decade_averages, summarize, CorporateTaxDataset, ObservationDate, Series};

use crate::cli::{AnalyzeArgs, Cli};
use crate::error::CliError;

use super::{build_client, parse_date_arg};

pub async fn run(cli: &Cli, args: &AnalyzeArgs) -> Result<(), CliError> {
    let client = build_client(cli)?;

    let start = Some(parse_date_arg(&args.start)?);
    let end = args.end.as_deref().map(parse_date_arg).transpose()?;

    println!("Fetching corporate tax data from FRED...");
    let dataset = fredrate_core::fetch_corporate_tax_data(&client, start, end).await?;

    print_summary(&dataset, args.decade_base_year);

    if let Some(path) = &args.chart {
        render_rate_chart(
            dataset.effective_rate_quarterly.as_ref(),
            dataset.effective_rate_annual.as_ref(),
            path,
        )?;
        println!("✓ Chart saved to {}", path.display());
    }

    if let Some(prefix) = &args.export_prefix {
        let paths = export_dataset_csv(&dataset, prefix, &args.export_dir)?;
        for path in &paths {
            println!("✓ Exported {}", path.display());
        }
        if paths.is_empty() {
            println!("⚠ nothing to export: all series are empty");
        }
    }

    Ok(())
}

/// Which part of the extremum date to print: quarters read better as
/// year-month, annual points as plain years.
#[derive(Clone, Copy)]
enum DateStyle {
    YearMonth,
    Year,
}

fn format_extremum_date(style: DateStyle, date: ObservationDate) -> String {
    match style {
        DateStyle::YearMonth => format!("{}-{:02}", date.year(), date.month()),
        DateStyle::Year => date.year().to_string(),
    }
}

fn print_summary(dataset: &CorporateTaxDataset, decade_base_year: i32) {
    println!();
    println!("{}", "=".repeat(60));
    println!("SUMMARY STATISTICS");
    println!("{}", "=".repeat(60));

    match &dataset.effective_rate_quarterly {
        Some(rate) => print_rate_block(
            "Quarterly Effective Tax Rate",
            rate,
            DateStyle::YearMonth,
            Some(decade_base_year),
        ),
        None => println!("\n⚠ quarterly effective rate unavailable: missing input series"),
    }

    match &dataset.effective_rate_annual {
        Some(rate) => print_rate_block("Annual Effective Tax Rate", rate, DateStyle::Year, None),
        None => println!("\n⚠ annual effective rate unavailable: missing input series"),
    }
}

fn print_rate_block(
    label: &str,
    rate: &Series,
    style: DateStyle,
    decade_base_year: Option<i32>,
) {
    let (Some(summary), Some(first), Some(last)) = (summarize(rate), rate.first(), rate.last())
    else {
        println!("\n⚠ {label}: no data after alignment");
        return;
    };

    println!("\n{label} ({}-{}):", first.date.year(), last.date.year());
    println!("  Mean:     {:.2}%", summary.mean);
    println!("  Median:   {:.2}%", summary.median);
    println!("  Std Dev:  {:.2}%", summary.std_dev);
    println!(
        "  Min:      {:.2}% ({})",
        summary.min.value,
        format_extremum_date(style, summary.min.date)
    );
    println!(
        "  Max:      {:.2}% ({})",
        summary.max.value,
        format_extremum_date(style, summary.max.date)
    );

    if let Some(base_year) = decade_base_year {
        let averages = decade_averages(rate, base_year);
        if !averages.is_empty() {
            println!("\nDecade Averages:");
            for (decade, mean) in averages {
                println!("  {decade}s: {mean:.2}%");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremum_dates_format_per_frequency() {
        let date = ObservationDate::parse("1953-04-01").expect("valid date");
        assert_eq!(format_extremum_date(DateStyle::YearMonth, date), "1953-04");
        assert_eq!(format_extremum_date(DateStyle::Year, date), "1953");
    }
}
