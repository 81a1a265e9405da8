//! Cash and accrual revenue aggregation.
//!
//! Folds the payment and lease snapshots into one immutable summary: cash
//! totals and a type breakdown from succeeded payments, accrual and
//! occupancy timelines from per-lease rent allocation, deposit lifecycle
//! totals, and the period-scoped accrual statistics the dashboard and CSV
//! export consume.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::accrual::allocate;
use crate::deposits::classify;
use crate::money::Money;
use crate::month::MonthKey;
use crate::period::ReportingPeriod;
use crate::schemas::{Lease, Payment, PaymentStatus, PaymentType, RefundCategory};

/// Months covered by the cash monthly timeline, ending at the month
/// containing `now`.
const CASH_TIMELINE_MONTHS: u32 = 12;

/// Maximum rows in the recent-payments sample.
const RECENT_PAYMENTS_LIMIT: usize = 50;

/// Cash-basis totals over all succeeded payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CashSummary {
    pub total: Money,
    pub net: Money,
    pub fees: Money,
    pub refunds: Money,
    pub payment_count: u64,
    pub average_payment: Money,
}

/// Count and summed amount for one payment type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeBreakdown {
    pub count: u64,
    pub total: Money,
}

/// Accrual-basis statistics, period-scoped where noted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccrualSummary {
    pub total_earned: Money,
    pub occupied_nights: i64,
    pub months_in_period: u64,
    pub average_monthly_earned: Money,
    pub average_nightly_rate: Money,
    pub outstanding_deposits: Money,
    pub released_deposits: Money,
    /// Rent allocated to months strictly after the current one, regardless
    /// of the requested period.
    pub upcoming_revenue: Money,
}

/// The complete reporting payload.
///
/// Recomputed from scratch on every request and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub cash: CashSummary,
    pub revenue_by_type: BTreeMap<PaymentType, TypeBreakdown>,
    /// Fixed trailing 12-month window ending at the current month. The
    /// period request is never applied here.
    pub cash_monthly: BTreeMap<MonthKey, Money>,
    /// Earned rent per month over every qualifying lease, unbounded.
    pub accrual_monthly: BTreeMap<MonthKey, Money>,
    /// Occupied nights per month over every qualifying lease.
    pub occupancy_monthly: BTreeMap<MonthKey, i64>,
    pub accrual: AccrualSummary,
    pub recent_payments: Vec<Payment>,
}

/// Fold payment and lease snapshots into the revenue summary.
///
/// Pure and single-pass: identical inputs and `now` always produce an
/// identical summary. `refund_records` supplies the deposit-refund rows
/// matched to leases for the deposit ledger; the period request scopes only
/// the accrual statistics.
pub fn aggregate(
    payments: &[Payment],
    leases: &[Lease],
    refund_records: &[Payment],
    period: ReportingPeriod,
    now: DateTime<Utc>,
) -> RevenueSummary {
    let today = now.date_naive();
    let current_month = MonthKey::from_date(today);

    let succeeded: Vec<&Payment> = payments
        .iter()
        .filter(|payment| payment.status == PaymentStatus::Succeeded)
        .collect();

    // ── Cash summary and type breakdown ──
    let mut cash = CashSummary::default();
    let mut revenue_by_type: BTreeMap<PaymentType, TypeBreakdown> = BTreeMap::new();
    for payment in &succeeded {
        cash.total += payment.amount;
        cash.fees += payment.fee;
        cash.net += payment.amount - payment.fee;
        if payment.payment_type == PaymentType::Refund || payment.amount.is_negative() {
            cash.refunds += payment.amount.abs();
        }
        let bucket = revenue_by_type.entry(payment.payment_type).or_default();
        bucket.count += 1;
        bucket.total += payment.amount;
    }
    cash.payment_count = succeeded.len() as u64;
    cash.average_payment = cash.total.div_round(succeeded.len() as i64);

    // ── Cash monthly timeline (fixed trailing window) ──
    let mut cash_monthly: BTreeMap<MonthKey, Money> = BTreeMap::new();
    let mut key = current_month.minus_months(CASH_TIMELINE_MONTHS - 1);
    loop {
        cash_monthly.insert(key, Money::ZERO);
        if key == current_month {
            break;
        }
        key = key.next();
    }
    for payment in &succeeded {
        let Some(paid_at) = payment.paid_at else {
            continue;
        };
        let paid_month = MonthKey::from_date(paid_at.date_naive());
        if let Some(slot) = cash_monthly.get_mut(&paid_month) {
            *slot += payment.amount;
        }
    }

    // ── Accrual and occupancy timelines ──
    let mut accrual_monthly: BTreeMap<MonthKey, Money> = BTreeMap::new();
    let mut occupancy_monthly: BTreeMap<MonthKey, i64> = BTreeMap::new();
    for lease in leases {
        let allocation = allocate(lease);
        for (month, earned) in allocation.earned_by_month {
            *accrual_monthly.entry(month).or_insert(Money::ZERO) += earned;
        }
        for (month, nights) in allocation.nights_by_month {
            *occupancy_monthly.entry(month).or_insert(0) += nights;
        }
    }

    // ── Deposit ledger ──
    let mut refunded_by_lease: HashMap<&str, Money> = HashMap::new();
    for record in refund_records {
        if record.status != PaymentStatus::Succeeded
            || record.payment_type != PaymentType::Refund
            || record.refund_category != Some(RefundCategory::Deposit)
        {
            continue;
        }
        let Some(lease_id) = record.lease_id.as_deref() else {
            continue;
        };
        *refunded_by_lease.entry(lease_id).or_insert(Money::ZERO) += record.amount.abs();
    }
    let mut outstanding_deposits = Money::ZERO;
    let mut released_deposits = Money::ZERO;
    for lease in leases {
        let refunded = refunded_by_lease
            .get(lease.id.as_str())
            .copied()
            .unwrap_or(Money::ZERO);
        let state = classify(lease, refunded, today);
        outstanding_deposits += state.outstanding;
        released_deposits += state.released;
    }

    // ── Period-scoped accrual statistics ──
    let mut total_earned = Money::ZERO;
    let mut months_in_period = 0u64;
    for (month, earned) in &accrual_monthly {
        if period.contains(*month) {
            total_earned += *earned;
            months_in_period += 1;
        }
    }
    let occupied_nights: i64 = occupancy_monthly
        .iter()
        .filter(|(month, _)| period.contains(**month))
        .map(|(_, nights)| *nights)
        .sum();
    if months_in_period == 0 {
        // Keep averages meaningful when the period touches no accrual
        // months: assume the period's nominal length.
        months_in_period = match period {
            ReportingPeriod::Month { .. } => 1,
            ReportingPeriod::Year { .. } => 12,
            ReportingPeriod::All => accrual_monthly.len() as u64,
        };
    }
    let average_monthly_earned = total_earned.div_round(months_in_period as i64);
    let average_nightly_rate = total_earned.div_round(occupied_nights);

    let upcoming_revenue: Money = accrual_monthly
        .iter()
        .filter(|(month, _)| **month > current_month)
        .map(|(_, earned)| *earned)
        .sum();

    // ── Recent payments sample ──
    let mut recent = succeeded;
    recent.sort_by(|left, right| right.paid_at.cmp(&left.paid_at));
    let recent_payments: Vec<Payment> = recent
        .into_iter()
        .take(RECENT_PAYMENTS_LIMIT)
        .cloned()
        .collect();

    tracing::debug!(
        payments = payments.len(),
        leases = leases.len(),
        refund_records = refund_records.len(),
        period = ?period,
        "computed revenue summary"
    );

    RevenueSummary {
        cash,
        revenue_by_type,
        cash_monthly,
        accrual_monthly,
        occupancy_monthly,
        accrual: AccrualSummary {
            total_earned,
            occupied_nights,
            months_in_period,
            average_monthly_earned,
            average_nightly_rate,
            outstanding_deposits,
            released_deposits,
            upcoming_revenue,
        },
        recent_payments,
    }
}
