//! Fetch and print a single series of observations.

use fredrate_core::{ObservationsRequest, SeriesId};

use crate::cli::{Cli, FetchArgs, OutputFormat};
use crate::error::CliError;

use super::{build_client, parse_date_arg};

pub async fn run(cli: &Cli, args: &FetchArgs) -> Result<(), CliError> {
    let client = build_client(cli)?;

    let series_id = SeriesId::parse(&args.series_id)?;
    let start = args.start.as_deref().map(parse_date_arg).transpose()?;
    let end = args.end.as_deref().map(parse_date_arg).transpose()?;
    let request = ObservationsRequest::new(series_id, start, end)?;

    let series = client.observations(&request).await?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        OutputFormat::Table => {
            if series.is_empty() {
                println!("⚠ no observations returned for {}", args.series_id);
                return Ok(());
            }

            for obs in series.iter() {
                println!("{}  {:>14.3}", obs.date, obs.value);
            }
            println!("{} observation(s)", series.len());
        }
    }

    Ok(())
}
