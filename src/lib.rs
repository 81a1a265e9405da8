//! Revenue reporting engine for the Casaora rental platform.
//!
//! Reports a landlord's revenue under two accounting bases: **cash** (money
//! actually collected) and **accrual** (rent earned for the calendar period
//! occupied, prorated by day across the months each lease spans), alongside
//! security-deposit lifecycle totals and monthly timelines.
//!
//! The engine is a pure transform: the surrounding system fetches the
//! payment and lease snapshots, resolves the requested reporting period,
//! injects the current time, and serializes the resulting summary. Nothing
//! here performs I/O, mutates stored data, or reads the clock.
//!
//! ```
//! use casaora_revenue::{aggregate, PeriodQuery};
//! use chrono::{TimeZone, Utc};
//!
//! let period = PeriodQuery {
//!     period: Some("month".to_string()),
//!     year: Some(2026),
//!     month: Some(8),
//! }
//! .resolve();
//! let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
//!
//! let summary = aggregate(&[], &[], &[], period, now);
//! assert_eq!(summary.cash.payment_count, 0);
//! ```

pub mod accrual;
pub mod deposits;
pub mod error;
pub mod money;
pub mod month;
pub mod period;
pub mod revenue;
pub mod schemas;

pub use accrual::{allocate, LeaseAllocation};
pub use deposits::{classify, DepositState};
pub use error::ReportError;
pub use money::Money;
pub use month::MonthKey;
pub use period::{PeriodQuery, ReportingPeriod};
pub use revenue::{aggregate, AccrualSummary, CashSummary, RevenueSummary, TypeBreakdown};
pub use schemas::{Lease, Payment, PaymentStatus, PaymentType, RefundCategory};
