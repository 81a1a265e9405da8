//! Canonical year-month bucket token.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ReportError;

/// Key for one calendar month, rendered as `YYYY-MM`.
///
/// Ordering is (year, month), so chronological order coincides with the
/// lexicographic order of the rendered form. Used as the join key between
/// the cash-basis and accrual-basis timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key from a year and a 1-based month. Out-of-range months are
    /// clamped into January–December.
    pub fn new(year: i32, month: u32) -> Self {
        MonthKey {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The key `months` calendar months before this one.
    pub fn minus_months(self, months: u32) -> Self {
        let total = self.year * 12 + self.month as i32 - 1 - months as i32;
        MonthKey {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ReportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidMonthKey(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(MonthKey { year, month })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::MonthKey;
    use chrono::NaiveDate;

    #[test]
    fn renders_zero_padded_labels() {
        assert_eq!(MonthKey::new(2024, 3).to_string(), "2024-03");
        assert_eq!(MonthKey::new(987, 12).to_string(), "0987-12");
    }

    #[test]
    fn orders_chronologically() {
        assert!(MonthKey::new(2023, 12) < MonthKey::new(2024, 1));
        assert!(MonthKey::new(2024, 1) < MonthKey::new(2024, 2));
        assert_eq!(MonthKey::new(2024, 2), MonthKey::new(2024, 2));
    }

    #[test]
    fn knows_month_boundaries_and_lengths() {
        let feb_leap = MonthKey::new(2024, 2);
        assert_eq!(
            feb_leap.first_day(),
            NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date")
        );
        assert_eq!(
            feb_leap.last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date")
        );
        assert_eq!(feb_leap.days_in_month(), 29);
        assert_eq!(MonthKey::new(2023, 2).days_in_month(), 28);
        assert_eq!(MonthKey::new(2024, 12).days_in_month(), 31);
    }

    #[test]
    fn steps_forward_and_backward_across_year_edges() {
        assert_eq!(MonthKey::new(2024, 12).next(), MonthKey::new(2025, 1));
        assert_eq!(MonthKey::new(2024, 6).next(), MonthKey::new(2024, 7));
        assert_eq!(
            MonthKey::new(2025, 2).minus_months(11),
            MonthKey::new(2024, 3)
        );
        assert_eq!(
            MonthKey::new(2024, 1).minus_months(1),
            MonthKey::new(2023, 12)
        );
        assert_eq!(MonthKey::new(2024, 7).minus_months(0), MonthKey::new(2024, 7));
    }

    #[test]
    fn parses_and_round_trips_labels() {
        let key: MonthKey = "2024-03".parse().expect("valid key");
        assert_eq!(key, MonthKey::new(2024, 3));
        assert_eq!(key.to_string().parse::<MonthKey>().expect("round trip"), key);

        assert!("2024".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-00".parse::<MonthKey>().is_err());
        assert!("abcd-05".parse::<MonthKey>().is_err());
    }

    #[test]
    fn serializes_as_label_string() {
        let json = serde_json::to_string(&MonthKey::new(2026, 8)).expect("serialize");
        assert_eq!(json, "\"2026-08\"");
        let back: MonthKey = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, MonthKey::new(2026, 8));
    }
}
