use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{core::series::HourlyBucket, quantity::price::ZlotyPerMegawattHour};

/// Cheapest hour of a day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DailyMinimum {
    pub date: NaiveDate,

    /// Start of the cheapest hour, the earliest one on ties.
    pub hour: NaiveDateTime,

    pub price: ZlotyPerMegawattHour,
}

impl From<HourlyBucket> for DailyMinimum {
    fn from(bucket: HourlyBucket) -> Self {
        Self { date: bucket.hour.date(), hour: bucket.hour, price: bucket.average_price }
    }
}

impl<T> DailyMinima for T where T: ?Sized {}

pub trait DailyMinima {
    /// Pick the cheapest hour of every day, ordered by date.
    fn daily_minima(self) -> Vec<DailyMinimum>
    where
        Self: Sized + Iterator<Item = HourlyBucket>,
    {
        let mut buckets = self.collect::<Vec<_>>();
        buckets.sort_unstable_by_key(|bucket| bucket.hour);

        let mut minima = BTreeMap::<NaiveDate, DailyMinimum>::new();
        for bucket in buckets {
            minima
                .entry(bucket.hour.date())
                .and_modify(|minimum| {
                    // Strict comparison keeps the earlier hour on ties.
                    if bucket.average_price < minimum.price {
                        *minimum = DailyMinimum::from(bucket);
                    }
                })
                .or_insert_with(|| DailyMinimum::from(bucket));
        }
        minima.into_values().collect()
    }
}
