//! Reporting-period normalization and month filtering.

use serde::Deserialize;

use crate::month::MonthKey;

/// Normalized reporting window applied to accrual quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingPeriod {
    /// No restriction.
    All,
    /// Every month of one calendar year.
    Year { year: i32 },
    /// Exactly one calendar month.
    Month { year: i32, month: u32 },
}

impl ReportingPeriod {
    pub fn contains(self, key: MonthKey) -> bool {
        match self {
            ReportingPeriod::All => true,
            ReportingPeriod::Year { year } => key.year() == year,
            ReportingPeriod::Month { year, month } => key.year() == year && key.month() == month,
        }
    }
}

/// Raw reporting-period query parameters as the transport layer receives
/// them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodQuery {
    /// Normalize the raw query into a reporting period.
    ///
    /// An unknown period value, a missing year, or a month outside 1–12
    /// degrades silently to `All`; reporting endpoints have always been
    /// permissive about this rather than rejecting the request.
    pub fn resolve(&self) -> ReportingPeriod {
        let period = self
            .period
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_ascii_lowercase();
        match (period.as_str(), self.year, self.month) {
            ("year", Some(year), _) => ReportingPeriod::Year { year },
            ("month", Some(year), Some(month)) if (1..=12).contains(&month) => {
                ReportingPeriod::Month { year, month }
            }
            _ => ReportingPeriod::All,
        }
    }
}
