#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod error;
mod output;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{api::pse, cli::Args, prelude::*, tables::build_daily_minima_table};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    ensure!(
        args.start_date <= args.end_date,
        "the start date {} is after the end date {}",
        args.start_date,
        args.end_date,
    );

    let records = pse::Api::builder()
        .base_url(args.api_url)
        .timeout(args.timeout.into())
        .build()?
        .fetch(args.start_date, args.end_date)
        .await?;
    let minima = crate::core::aggregate(&records)?;
    let n_rows = output::write(&minima, &args.output)?;

    if args.table {
        println!("{}", build_daily_minima_table(&minima));
    }
    println!("Wrote {n_rows} rows to `{}`", args.output.display());

    info!("done!");
    Ok(())
}
