use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use super::arguments::{resolve_arguments, ResolvedArguments};
use super::commands::Cli;
use crate::config::ConfigLoader;
use crate::error::SpotError;
use crate::logging::setup_logging;
use crate::pricing::{SpotPriceClient, SpotPriceSource};
use crate::render::render;
use crate::stats::{summarize, PriceSummary};
use crate::{error_message, info_message, warning_message};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

/// Process the command line and run one query. Returns the process exit code.
pub fn process_command() -> i32 {
    // NOTE: exits with clap's usage message on a parsing error
    let cli = Cli::parse();

    let config = match ConfigLoader::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error_message!("{:#}", err);
            return EXIT_FAILURE;
        }
    };

    if let Err(err) = setup_logging(cli.verbose, config.log_file.as_deref()) {
        warning_message!("Logging disabled: {:#}", err);
    }
    tracing::debug!(
        path = ?cli.config.clone().or_else(ConfigLoader::default_config_path),
        "Loaded configuration"
    );

    let args = match resolve_arguments(&cli, &config) {
        Ok(args) => args,
        Err(err) => return report_spot_error(&err),
    };
    tracing::debug!(?args, "Resolved arguments");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error_message!("Failed to start async runtime: {}", err);
            return EXIT_FAILURE;
        }
    };

    let (start, end) = args.query.window();
    info_message!(
        "Fetching spot price history for {} in {}...",
        args.query.instance_type,
        args.query.region
    );
    info_message!(
        "Time window: {} to {} UTC",
        start.format("%Y-%m-%d %H:%M:%S"),
        end.format("%Y-%m-%d %H:%M:%S")
    );

    let client = SpotPriceClient::new(args.aws_config.clone(), args.timeout);
    let mut stdout = std::io::stdout().lock();

    match runtime.block_on(run_query(&client, &args, &mut stdout)) {
        Ok(_) => EXIT_SUCCESS,
        Err(err) => match err.downcast_ref::<SpotError>() {
            Some(spot_error) => report_spot_error(spot_error),
            None => {
                error_message!("{:#}", err);
                EXIT_FAILURE
            }
        },
    }
}

/// Fetches, summarises and renders one query into `out`.
/// Nothing is written unless the fetch and summary both succeed.
pub async fn run_query<S, W>(source: &S, args: &ResolvedArguments, out: &mut W) -> Result<PriceSummary>
where
    S: SpotPriceSource + ?Sized,
    W: Write,
{
    let samples = source.fetch_price_history(&args.query).await?;
    let summary = summarize(&samples)?;

    tracing::info!(
        samples = summary.samples,
        min = summary.min,
        max = summary.max,
        mean = summary.mean,
        "Summarised spot price history"
    );

    render(out, &args.query, &samples, &summary, &args.chart)
        .context("failed to write report")?;

    Ok(summary)
}

fn report_spot_error(err: &SpotError) -> i32 {
    error_message!("{}", err);
    if let Some(hint) = err.hint() {
        eprintln!("          {}", hint);
    }
    err.exit_code()
}
