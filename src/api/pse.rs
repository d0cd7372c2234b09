//! [PSE](https://api.raporty.pse.pl) market electricity price (RCE) client.

use std::time::Duration;

use bon::bon;
use chrono::NaiveDate;
use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::{core::record::RawRecord, error::PipelineError, prelude::*};

/// Quarter-hour timestamp field.
const TIMESTAMP_FIELD: &str = "udtczas";

/// Trading day field.
const DATE_FIELD: &str = "doba";

pub struct Api {
    client: Client,
    base_url: Url,
}

#[bon]
impl Api {
    #[builder]
    pub fn new(
        base_url: Url,
        #[builder(default = Duration::from_secs(30))] timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

impl Api {
    /// Fetch all the quarter-hourly prices of the trading days in `since..=until`.
    ///
    /// Follows `@odata.nextLink` until the API stops returning it.
    #[instrument(skip_all, fields(since = %since, until = %until))]
    pub async fn fetch(
        &self,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<RawRecord>, PipelineError> {
        let mut next_url = Some(self.first_page_url(since, until));
        let mut records = Vec::new();
        let mut n_pages = 0_usize;

        while let Some(url) = next_url {
            let page = self.get_page(url).await?;
            n_pages += 1;
            info!(n_pages, n_records = page.records.len(), "fetched");
            records.extend(page.records);
            next_url = page.next_url;
        }

        if records.is_empty() {
            return Err(PipelineError::EmptyResult);
        }
        info!(n_pages, n_records = records.len(), "done");
        Ok(records)
    }

    fn first_page_url(&self, since: NaiveDate, until: NaiveDate) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("$format", "json")
            .append_pair("$filter", &format!("{DATE_FIELD} ge {since} and {DATE_FIELD} le {until}"))
            .append_pair("$orderby", &format!("{TIMESTAMP_FIELD} asc"));
        url
    }

    async fn get_page(&self, url: Url) -> Result<Page, PipelineError> {
        debug!(%url, "fetching…");
        let into_transport = |source| PipelineError::Transport { url: url.clone(), source };
        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(into_transport)?
            .text()
            .await
            .map_err(into_transport)?;

        let page = serde_json::from_str::<RawPage>(&body).map_err(|source| {
            PipelineError::MalformedResponse { url: url.clone(), source: source.into() }
        })?;
        let next_url = page
            .next_link
            .map(|link| url.join(&link))
            .transpose()
            .map_err(|source| PipelineError::MalformedResponse { url, source: source.into() })?;
        Ok(Page { records: page.value, next_url })
    }
}

struct Page {
    records: Vec<RawRecord>,
    next_url: Option<Url>,
}

#[derive(Deserialize)]
struct RawPage {
    value: Vec<RawRecord>,

    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}
