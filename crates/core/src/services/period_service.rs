use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::models::metric::DailyMetric;
use crate::models::period::{DateRange, Period};

/// Bounds used by [`Period::All`]: 1970-01-01 ..= 2099-12-31.
pub fn all_time_range() -> DateRange {
    let start = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX);
    DateRange::new(start, end)
}

/// Turns a period selector into a concrete date range and filters metrics by it.
///
/// Pure business logic, no I/O. "Today" is always the UTC calendar date of
/// the instant passed in.
pub struct PeriodService;

impl PeriodService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `period` to an inclusive range relative to `today`.
    pub fn resolve_range(&self, period: &Period, today: NaiveDate) -> DateRange {
        match period {
            Period::Today => DateRange::single(today),
            Period::Yesterday => DateRange::single(days_before(today, 1)),
            Period::ThisWeek => DateRange::new(week_start(today), today),
            Period::LastWeek => {
                let start = days_before(week_start(today), 7);
                DateRange::new(start, start + Days::new(6))
            }
            Period::ThisMonth => DateRange::new(month_start(today), today),
            Period::LastMonth => {
                let end = days_before(month_start(today), 1);
                DateRange::new(month_start(end), end)
            }
            Period::Custom(range) => *range,
            Period::All => all_time_range(),
        }
    }

    /// Keep the metrics whose date falls inside the period, in input order.
    pub fn filter_by_period(
        &self,
        records: &[DailyMetric],
        period: &Period,
        now: DateTime<Utc>,
    ) -> Vec<DailyMetric> {
        let range = self.resolve_range(period, now.date_naive());
        self.filter_by_range(records, &range)
    }

    /// Keep the metrics whose date falls inside `range`, in input order.
    pub fn filter_by_range(&self, records: &[DailyMetric], range: &DateRange) -> Vec<DailyMetric> {
        records
            .iter()
            .filter(|m| range.contains(m.date))
            .cloned()
            .collect()
    }
}

impl Default for PeriodService {
    fn default() -> Self {
        Self::new()
    }
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Monday of the ISO week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    days_before(date, u64::from(offset))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_start_is_monday() {
        // 2024-03-15 is a Friday
        assert_eq!(week_start(d(2024, 3, 15)), d(2024, 3, 11));
        // Monday maps to itself
        assert_eq!(week_start(d(2024, 3, 11)), d(2024, 3, 11));
        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_start(d(2024, 3, 17)), d(2024, 3, 11));
    }

    #[test]
    fn month_start_keeps_year_and_month() {
        assert_eq!(month_start(d(2024, 2, 29)), d(2024, 2, 1));
    }
}
