mod analyze;
mod fetch;
mod series;

use fredrate_core::{FredClient, ObservationDate};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Series => {
            series::run();
            Ok(())
        }
        Command::Fetch(args) => fetch::run(cli, args).await,
        Command::Analyze(args) => analyze::run(cli, args).await,
    }
}

/// Resolve the credential and build a client, failing before any network
/// call when no key is available.
fn build_client(cli: &Cli) -> Result<FredClient, CliError> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("FRED_API_KEY").ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or(CliError::MissingApiKey)?;

    Ok(FredClient::new(api_key).with_timeout_ms(cli.timeout_ms))
}

fn parse_date_arg(value: &str) -> Result<ObservationDate, CliError> {
    Ok(ObservationDate::parse(value)?)
}
