use std::fmt;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::errors::LaborError;

const MAX_SPAN_MONTHS: u32 = 100 * 12;

/// Inclusive date interval. A missing end date means the range is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl TimeRange {
    /// Build a validated range: the end may equal the start but never precede it, and
    /// may not lie more than a century after it.
    pub fn of(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<Self, LaborError> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(LaborError::rule(format!(
                    "end date {end} precedes start date {start_date}"
                )));
            }

            if let Some(limit) = start_date.checked_add_months(Months::new(MAX_SPAN_MONTHS)) {
                if end > limit {
                    return Err(LaborError::rule(format!(
                        "end date {end} is more than 100 years after start date {start_date}"
                    )));
                }
            }
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn unbounded(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }

    /// True when the ranges share at least one day; touching boundaries count.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        let self_end = self.end_date.unwrap_or(NaiveDate::MAX);
        let other_end = other.end_date.unwrap_or(NaiveDate::MAX);
        self.start_date <= other_end && other.start_date <= self_end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_date {
            Some(end) => write!(f, "{}..={}", self.start_date, end),
            None => write!(f, "{}..", self.start_date),
        }
    }
}

#[derive(Deserialize)]
struct RawTimeRange {
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = LaborError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::of(raw.start_date, raw.end_date)
    }
}
