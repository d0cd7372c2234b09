use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::PipelineError, prelude::*, quantity::price::ZlotyPerMegawattHour};

const TIMESTAMP_FORMATS: [&str; 4] =
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Quarter-hourly price as returned by the API, not yet validated.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "udtczas")]
    pub timestamp: Option<Value>,

    #[serde(rename = "rce_pln")]
    pub price: Option<Value>,
}

/// Validated quarter-hourly price.
///
/// Timestamps are naive Polish wall-clock time, exactly as the API reports them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub price: ZlotyPerMegawattHour,
}

impl RawRecord {
    /// Parse the record, or [`None`] if either field is missing or unparseable.
    pub fn coerce(&self) -> Option<Observation> {
        Some(Observation {
            timestamp: parse_timestamp(self.timestamp.as_ref()?)?,
            price: parse_price(self.price.as_ref()?)?,
        })
    }
}

/// Coerce all the records, dropping the invalid ones.
#[instrument(skip_all)]
pub fn coerce(records: &[RawRecord]) -> Result<Vec<Observation>, PipelineError> {
    let observations = records.iter().filter_map(RawRecord::coerce).collect_vec();
    let n_dropped = records.len() - observations.len();
    if n_dropped != 0 {
        warn!(n_dropped, n_records = records.len(), "dropped unparseable records");
    }
    if observations.is_empty() {
        return Err(PipelineError::NoValidData { n_records: records.len() });
    }
    Ok(observations)
}

fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    let text = value.as_str()?.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|timestamp| timestamp.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn parse_price(value: &Value) -> Option<ZlotyPerMegawattHour> {
    let price = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    price.is_finite().then_some(ZlotyPerMegawattHour(price))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use super::*;

    fn timestamp(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_deserialize_ok() -> Result {
        // language=json
        let body = r#"{
            "rce_pln": 412.37,
            "udtczas": "2025-03-01 05:15:00",
            "udtczas_oreb": "05:00 - 05:15",
            "business_date": "2025-03-01",
            "source_datetime": "2025-02-28 14:53:27.187"
        }"#;
        let observation = serde_json::from_str::<RawRecord>(body)?.coerce().unwrap();
        assert_eq!(observation.timestamp, timestamp("2025-03-01 05:15"));
        assert_abs_diff_eq!(observation.price.0, 412.37);
        Ok(())
    }

    #[test]
    fn test_deserialize_missing_fields() -> Result {
        let record = serde_json::from_str::<RawRecord>(r#"{"udtczas": null}"#)?;
        assert!(record.timestamp.is_none());
        assert!(record.price.is_none());
        assert!(record.coerce().is_none());
        Ok(())
    }

    #[test]
    fn test_parse_timestamp_formats() {
        for text in [
            "2025-03-01 05:47",
            "2025-03-01 05:47:00",
            "2025-03-01T05:47:00",
            "2025-03-01T05:47:00.000",
            "2025-03-01T05:47:00+01:00",
        ] {
            assert_eq!(parse_timestamp(&json!(text)), Some(timestamp("2025-03-01 05:47")), "{text}");
        }
        assert_eq!(parse_timestamp(&json!("2025-03-01")), Some(timestamp("2025-03-01 00:00")));
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp(&json!("2025-02-30 05:00")), None);
        assert_eq!(parse_timestamp(&json!("05:00")), None);
        assert_eq!(parse_timestamp(&json!(1_740_805_200)), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(&json!(-12.5)), Some(ZlotyPerMegawattHour(-12.5)));
        assert_eq!(parse_price(&json!(" 301.2 ")), Some(ZlotyPerMegawattHour(301.2)));
        assert_eq!(parse_price(&json!("abc")), None);
        assert_eq!(parse_price(&json!("NaN")), None);
        assert_eq!(parse_price(&json!(true)), None);
        assert_eq!(parse_price(&Value::Null), None);
    }
}
