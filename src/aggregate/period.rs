use crate::aggregate::Grouping;
use chrono::{Datelike, Days, NaiveDateTime, NaiveTime};

/// Maps a timestamp to the start instant of its period.
///
/// Weeks are ISO calendar weeks (Monday start), computed here with chrono
/// rather than a frame-level truncation: Polars anchors weekly truncation to
/// the Unix epoch (a Thursday), which would shift every bucket boundary.
pub fn period_start(ts: NaiveDateTime, grouping: Grouping) -> NaiveDateTime {
    match grouping {
        Grouping::Hour => ts,
        Grouping::Week => {
            let date = ts.date();
            let back = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(back))
                .unwrap_or(date)
                .and_time(NaiveTime::MIN)
        }
        Grouping::Month => {
            let date = ts.date();
            date.with_day(1).unwrap_or(date).and_time(NaiveTime::MIN)
        }
    }
}
