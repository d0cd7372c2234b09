use std::collections::BTreeMap;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::{core::record::Observation, quantity::price::ZlotyPerMegawattHour};

/// Average price over one clock hour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HourlyBucket {
    /// Start of the hour.
    pub hour: NaiveDateTime,

    pub average_price: ZlotyPerMegawattHour,
}

/// Truncate the minutes and seconds.
#[must_use]
pub fn floor_hour(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.date().and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(timestamp.hour()))
}

impl<T> AverageHourly for T where T: ?Sized {}

pub trait AverageHourly {
    /// Average the prices within each clock hour.
    ///
    /// Exactly one bucket per distinct hour, ordered by the hour.
    fn average_hourly(self) -> Vec<HourlyBucket>
    where
        Self: Sized + Iterator<Item = Observation>,
    {
        let mut accumulators = BTreeMap::<NaiveDateTime, (ZlotyPerMegawattHour, u32)>::new();
        for observation in self {
            let (sum, weight) = accumulators
                .entry(floor_hour(observation.timestamp))
                .or_insert((ZlotyPerMegawattHour::ZERO, 0));
            *sum += observation.price;
            *weight += 1;
        }
        accumulators
            .into_iter()
            .map(|(hour, (sum, weight))| HourlyBucket {
                hour,
                average_price: sum / f64::from(weight),
            })
            .collect()
    }
}
