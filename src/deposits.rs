//! Security-deposit lifecycle classification.

use chrono::NaiveDate;

use crate::money::Money;
use crate::schemas::Lease;

/// Outstanding vs. released split of a lease's security deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositState {
    pub outstanding: Money,
    pub released: Money,
}

/// Classify one lease's deposit as outstanding or released.
///
/// `refunded` is the externally aggregated sum of the absolute amounts of
/// succeeded deposit refunds linked to the lease. The still-held portion
/// (`deposit − min(refunded, deposit)`) counts as outstanding while the
/// lease end date is strictly in the future; once the term has ended the
/// held portion is treated as released even without an explicit refund
/// record. Leases with no positive deposit contribute nothing.
pub fn classify(lease: &Lease, refunded: Money, today: NaiveDate) -> DepositState {
    let deposit = lease
        .deposit_amount
        .map(Money::from_decimal)
        .unwrap_or(Money::ZERO);
    if deposit.cents() <= 0 {
        return DepositState::default();
    }

    let held = (deposit.cents() - refunded.cents().min(deposit.cents())).max(0);
    let held = Money::from_cents(held);

    let mut state = DepositState {
        outstanding: Money::ZERO,
        released: refunded,
    };
    if lease.end_date.is_some_and(|end| end > today) {
        state.outstanding += held;
    } else {
        state.released += held;
    }
    state
}
