//! Accrual-basis rent allocation.
//!
//! Prorates a lease's monthly rent across every calendar month the lease
//! touches. Partial months are billed proportionally to that month's own
//! day count, not a fixed 30-day convention, so a mid-month move-in pays
//! for exactly the days occupied.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::month::MonthKey;
use crate::schemas::Lease;

/// Per-month earned rent and occupied nights for a single lease.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseAllocation {
    pub earned_by_month: BTreeMap<MonthKey, Money>,
    pub nights_by_month: BTreeMap<MonthKey, i64>,
}

impl LeaseAllocation {
    pub fn is_empty(&self) -> bool {
        self.earned_by_month.is_empty() && self.nights_by_month.is_empty()
    }
}

/// Prorate one lease's rent across the calendar months it spans.
///
/// A lease missing either date, with an inverted range, or without a
/// positive rent produces an empty allocation rather than an error.
///
/// Each month rounds its share half-up independently, so the allocated
/// total may drift from `rent × months` by up to one cent per month
/// touched; the drift is deliberate and never reconciled. Night counts use
/// the inclusive day span (`end − start + 1`), so the final day of the
/// lease counts as an occupied night.
pub fn allocate(lease: &Lease) -> LeaseAllocation {
    let (Some(start), Some(end)) = (lease.start_date, lease.end_date) else {
        return LeaseAllocation::default();
    };
    if end < start {
        return LeaseAllocation::default();
    }
    let rent = lease
        .monthly_rent
        .map(Money::from_decimal)
        .unwrap_or(Money::ZERO);
    if rent.cents() <= 0 {
        return LeaseAllocation::default();
    }

    let mut allocation = LeaseAllocation::default();
    let last = MonthKey::from_date(end);
    let mut month = MonthKey::from_date(start);
    loop {
        let active_start = month.first_day().max(start);
        let active_end = month.last_day().min(end);
        if active_end >= active_start {
            let active_days = (active_end - active_start).num_days() + 1;
            let earned = rent.prorate(active_days, month.days_in_month());
            *allocation
                .earned_by_month
                .entry(month)
                .or_insert(Money::ZERO) += earned;
            *allocation.nights_by_month.entry(month).or_insert(0) += active_days;
        }
        if month == last {
            break;
        }
        month = month.next();
    }
    allocation
}
