use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Inclusive calendar range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range covering a single day.
    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// `true` when `start <= date <= end`. An inverted range contains nothing.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The reporting window selected on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Yesterday,
    /// Monday of the current ISO week through today
    ThisWeek,
    /// Monday through Sunday of the previous ISO week
    LastWeek,
    /// First of the current month through today
    #[default]
    ThisMonth,
    /// The whole previous calendar month
    LastMonth,
    /// Explicit bounds picked by the user
    Custom(DateRange),
    /// Every record ever entered
    All,
}

impl Period {
    /// Build a custom period from explicit bounds.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Period::Custom(DateRange::new(start, end))
    }

    /// Selector name as used by the dashboard (`this_month`, `custom`, ...).
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::ThisWeek => "this_week",
            Period::LastWeek => "last_week",
            Period::ThisMonth => "this_month",
            Period::LastMonth => "last_month",
            Period::Custom(_) => "custom",
            Period::All => "all",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Custom(range) => write!(f, "custom ({}..={})", range.start, range.end),
            other => f.write_str(other.key()),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "yesterday" => Ok(Period::Yesterday),
            "this_week" => Ok(Period::ThisWeek),
            "last_week" => Ok(Period::LastWeek),
            "this_month" => Ok(Period::ThisMonth),
            "last_month" => Ok(Period::LastMonth),
            "all" => Ok(Period::All),
            "custom" => Err(CoreError::ValidationError(
                "a custom period needs explicit start and end dates".into(),
            )),
            other => Err(CoreError::ValidationError(format!(
                "Unknown period '{other}'"
            ))),
        }
    }
}
