use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use reqwest::Url;

#[derive(Parser)]
#[command(author, version, about)]
#[must_use]
pub struct Args {
    /// PSE market electricity price (RCE) endpoint.
    #[clap(
        long = "api-url",
        env = "RCE_API_URL",
        default_value = "https://api.raporty.pse.pl/api/rce-pln"
    )]
    pub api_url: Url,

    /// First trading day to fetch, inclusive.
    #[clap(long, env = "RCE_START_DATE", default_value = "2025-01-01")]
    pub start_date: NaiveDate,

    /// Last trading day to fetch, inclusive.
    #[clap(long, env = "RCE_END_DATE", default_value = "2025-12-31")]
    pub end_date: NaiveDate,

    /// Output CSV file, overwritten if it exists.
    #[clap(long, env = "RCE_OUTPUT", default_value = "minimalne_ceny_godzinowe_2025.csv")]
    pub output: PathBuf,

    /// Timeout of a single API request.
    #[clap(long, env = "RCE_TIMEOUT", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Also print the result table.
    #[clap(long, env = "RCE_TABLE")]
    pub table: bool,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides() -> crate::prelude::Result {
        let args = Args::try_parse_from([
            "rce-minima",
            "--api-url",
            "http://localhost:8080/api/rce-pln",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-31",
            "--output",
            "january.csv",
            "--timeout",
            "1m 30s",
            "--table",
        ])?;
        assert_eq!(args.api_url.as_str(), "http://localhost:8080/api/rce-pln");
        assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(args.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(args.output, PathBuf::from("january.csv"));
        assert_eq!(Duration::from(args.timeout), Duration::from_secs(90));
        assert!(args.table);
        Ok(())
    }
}
