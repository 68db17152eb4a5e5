//! Calendar dates used as schedule keys.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::SELECTION_HORIZON_YEARS;
use crate::error::{PlanError, PlanResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An ISO 8601 calendar date with no time component.
///
/// Ordering follows the calendar, so a `BTreeMap` keyed by `ScheduleDate`
/// iterates in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleDate(NaiveDate);

impl ScheduleDate {
    pub fn new(date: NaiveDate) -> Self {
        ScheduleDate(date)
    }

    /// Parse `YYYY-MM-DD`.
    pub fn parse(s: &str) -> PlanResult<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(ScheduleDate)
            .map_err(|_| PlanError::InvalidDate(s.to_string()))
    }

    pub fn today() -> Self {
        ScheduleDate(Local::now().date_naive())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Long form used on the review page, e.g. "Sunday, June 1, 2025".
    pub fn long_form(&self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }
}

impl fmt::Display for ScheduleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for ScheduleDate {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleDate::parse(s)
    }
}

impl Serialize for ScheduleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ScheduleDate::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The range of dates the calendar lets a user pick: from today up to a
/// fixed horizon.
#[derive(Debug, Clone, Copy)]
pub struct SelectionWindow {
    pub earliest: ScheduleDate,
    pub latest: ScheduleDate,
}

impl SelectionWindow {
    pub fn starting(today: ScheduleDate) -> Self {
        let latest = today
            .0
            .checked_add_months(Months::new(SELECTION_HORIZON_YEARS as u32 * 12))
            .unwrap_or(NaiveDate::MAX);
        SelectionWindow {
            earliest: today,
            latest: ScheduleDate(latest),
        }
    }

    pub fn from_today() -> Self {
        Self::starting(ScheduleDate::today())
    }

    pub fn contains(&self, date: ScheduleDate) -> bool {
        date >= self.earliest && date <= self.latest
    }

    /// Explain why a date is outside the window, if it is.
    pub fn check(&self, date: ScheduleDate) -> Result<(), String> {
        if date < self.earliest {
            Err(format!("{} is in the past", date))
        } else if date > self.latest {
            Err(format!(
                "{} is more than {} years ahead (latest is {})",
                date,
                self.latest.0.year() - self.earliest.0.year(),
                self.latest
            ))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> ScheduleDate {
        ScheduleDate::parse(s).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(date("2025-06-01").to_string(), "2025-06-01");
        assert_eq!(date(" 2025-06-01 ").to_string(), "2025-06-01");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ScheduleDate::parse("not a date"),
            Err(PlanError::InvalidDate(_))
        ));
        assert!(ScheduleDate::parse("2025-02-30").is_err());
        assert!(ScheduleDate::parse("2025-06-01T10:00").is_err());
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        assert!(date("2025-01-31") < date("2025-02-01"));
        assert!(date("2024-12-31") < date("2025-01-01"));
    }

    #[test]
    fn test_long_form() {
        assert_eq!(date("2025-06-01").long_form(), "Sunday, June 1, 2025");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&date("2025-06-01")).unwrap();
        assert_eq!(json, "\"2025-06-01\"");
        let back: ScheduleDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date("2025-06-01"));
        assert!(serde_json::from_str::<ScheduleDate>("\"June\"").is_err());
    }

    #[test]
    fn test_selection_window() {
        let window = SelectionWindow::starting(date("2025-06-01"));
        assert_eq!(window.latest, date("2035-06-01"));
        assert!(window.contains(date("2025-06-01")));
        assert!(window.contains(date("2035-06-01")));
        assert!(!window.contains(date("2025-05-31")));
        assert!(!window.contains(date("2035-06-02")));
        assert!(window.check(date("2025-05-31")).unwrap_err().contains("past"));
    }
}
