//! Input record shapes the engine consumes.
//!
//! The surrounding system fetches payment and lease snapshots, deserializes
//! them into these types, and hands them to the aggregator read-only. The
//! engine never loads or mutates stored rows itself.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Processing status of a payment row. Only `succeeded` rows count anywhere
/// in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Succeeded,
    Pending,
    Failed,
    #[serde(other)]
    Other,
}

/// What a payment row was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Deposit,
    Rent,
    LateFee,
    DepositTransfer,
    AdminTransfer,
    Refund,
    #[serde(other)]
    Other,
}

/// Which bucket a refund row draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundCategory {
    Deposit,
    Rent,
    #[serde(other)]
    Other,
}

/// One payment row from the payments snapshot.
///
/// `amount` is signed cents; a negative amount is a refund or debit. Rows
/// without a `lease_id` still count toward cash totals but can never be
/// matched to a lease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub lease_id: Option<String>,
    pub amount: Money,
    #[serde(default)]
    pub fee: Money,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub refund_category: Option<RefundCategory>,
}

/// One lease row from the leases snapshot.
///
/// Monetary columns arrive in decimal currency units and are converted to
/// cents at the engine boundary. A lease participates in accrual only when
/// both dates are present, `end_date >= start_date`, and the rent is
/// positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub id: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_rent: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::{Payment, PaymentStatus, PaymentType, RefundCategory};

    #[test]
    fn deserializes_payment_rows_from_snapshot_json() {
        let payment: Payment = serde_json::from_str(
            r#"{
                "id": "pay_1",
                "lease_id": "lease_1",
                "amount": -5000,
                "fee": 0,
                "type": "refund",
                "status": "succeeded",
                "paid_at": "2024-03-05T12:30:00Z",
                "refund_category": "deposit"
            }"#,
        )
        .expect("valid payment row");
        assert_eq!(payment.payment_type, PaymentType::Refund);
        assert_eq!(payment.status, PaymentStatus::Succeeded);
        assert_eq!(payment.refund_category, Some(RefundCategory::Deposit));
        assert_eq!(payment.amount.cents(), -5000);
    }

    #[test]
    fn unknown_categories_fall_back_to_other() {
        let payment: Payment = serde_json::from_str(
            r#"{
                "id": "pay_2",
                "amount": 1200,
                "type": "parking_pass",
                "status": "disputed"
            }"#,
        )
        .expect("unknown categories still deserialize");
        assert_eq!(payment.payment_type, PaymentType::Other);
        assert_eq!(payment.status, PaymentStatus::Other);
        assert_eq!(payment.lease_id, None);
        assert_eq!(payment.paid_at, None);
        assert_eq!(payment.fee.cents(), 0);
    }

    #[test]
    fn payment_type_uses_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentType::LateFee).expect("serialize"),
            "\"late_fee\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentType::DepositTransfer).expect("serialize"),
            "\"deposit_transfer\""
        );
    }
}
