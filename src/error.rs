use std::path::PathBuf;

use reqwest::Url;

/// Fatal pipeline failures. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to fetch `{url}`")]
    Transport {
        url: Url,

        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response from `{url}`")]
    MalformedResponse {
        url: Url,

        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("the API returned no records")]
    EmptyResult,

    #[error("none of the {n_records} records has a valid timestamp and price")]
    NoValidData { n_records: usize },

    #[error("failed to write `{}`", path.display())]
    Io {
        path: PathBuf,

        #[source]
        source: csv::Error,
    },
}
