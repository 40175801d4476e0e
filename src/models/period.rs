//! Budget periods and inclusive date ranges
//!
//! A target's period is always a concrete `[start, end]` pair of calendar
//! days. `PeriodKind` only decides how that pair is derived from a reference
//! day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FinpulseError, FinpulseResult};

/// How long a budget target's period runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// ISO week, Monday through Sunday
    Weekly,
    /// Calendar month
    #[default]
    Monthly,
    /// Calendar year
    Yearly,
}

impl PeriodKind {
    pub fn all() -> &'static [Self] {
        &[Self::Weekly, Self::Monthly, Self::Yearly]
    }

    /// The period of this kind that contains `day`
    pub fn range_containing(&self, day: NaiveDate) -> DateRange {
        match self {
            Self::Weekly => {
                let week = day.iso_week();
                let start = NaiveDate::from_isoywd_opt(week.year(), week.week(), Weekday::Mon)
                    .unwrap_or(day);
                DateRange {
                    start,
                    end: start + Duration::days(6),
                }
            }
            Self::Monthly => {
                let start = day.with_day(1).unwrap_or(day);
                DateRange {
                    start,
                    end: last_day_of_month(day.year(), day.month()),
                }
            }
            Self::Yearly => DateRange {
                start: NaiveDate::from_yo_opt(day.year(), 1).unwrap_or(day),
                end: NaiveDate::from_ymd_opt(day.year(), 12, 31).unwrap_or(day),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for PeriodKind {
    type Err = FinpulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Ok(Self::Yearly),
            other => Err(FinpulseError::Validation(format!(
                "Unknown period '{}': expected weekly, monthly or yearly",
                other
            ))),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> FinpulseResult<Self> {
        if start > end {
            return Err(FinpulseError::Validation(format!(
                "Date range starts after it ends: {} > {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The range of equal length that ends the day before this one starts
    pub fn preceding(&self) -> Self {
        let len = Duration::days(self.len_days());
        Self {
            start: self.start - len,
            end: self.start - Duration::days(1),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> FinpulseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| FinpulseError::Validation(format!("Invalid date '{}': {}", s, e)))
}
