pub mod daily;
pub mod record;
pub mod series;

use crate::{
    core::{
        daily::{DailyMinima, DailyMinimum},
        record::{RawRecord, coerce},
        series::AverageHourly,
    },
    error::PipelineError,
    prelude::*,
};

/// Reduce the raw quarter-hourly records to the cheapest hour of each day.
///
/// Either returns all the days or fails, never a partial result.
#[instrument(skip_all, fields(n_records = records.len()))]
pub fn aggregate(records: &[RawRecord]) -> Result<Vec<DailyMinimum>, PipelineError> {
    let hourly = coerce(records)?.into_iter().average_hourly();
    info!(n_hours = hourly.len(), "averaged");
    let minima = hourly.into_iter().daily_minima();
    info!(n_days = minima.len(), "reduced");
    Ok(minima)
}
