use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::schedule::PaymentSchedule;
use crate::terms::AgreementTerms;
use crate::types::{PaymentMethod, PaymentTerms, TransactionId};

/// one recorded payment event against an agreement
///
/// created exactly once per recorded payment, immutable thereafter;
/// the ledger is append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// schedule entry this payment satisfies; assigned as
    /// `completed_payments + 1` at recording time
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    /// amount actually paid, ceiled to whole currency units at entry
    pub amount: Money,
    pub method: PaymentMethod,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        payment_number: u32,
        payment_date: NaiveDate,
        amount: Money,
        method: PaymentMethod,
        reference_number: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_number,
            payment_date,
            amount,
            method,
            reference_number,
            notes,
        }
    }
}

/// paid/remaining totals and progress derived from terms plus ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_amount: Money,
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub completed: u32,
    pub total: u32,
    pub percent: u32,
}

/// fold the recorded transactions against the schedule
///
/// for installment agreements the summed ledger is authoritative whenever
/// any transaction exists; with an empty ledger the paid total falls back to
/// `completed_payments * monthly_amount`. paid is clamped to
/// `[0, total_amount]`, so `paid + remaining == total` always holds.
pub fn reconcile(
    terms: &AgreementTerms,
    completed_payments: u32,
    schedule: &PaymentSchedule,
    transactions: &[Transaction],
) -> ProgressSummary {
    let total = schedule.len() as u32;
    let total_amount = terms.total_amount;

    let (completed, paid_raw) = match terms.payment_terms {
        PaymentTerms::SpotCash => {
            let settled = transactions.iter().any(|t| t.amount >= total_amount);
            let paid: Money = transactions.iter().map(|t| t.amount).sum();
            (if settled { 1 } else { 0 }, paid)
        }
        PaymentTerms::Installment { .. } => {
            let paid = if transactions.is_empty() {
                terms.monthly_amount() * Decimal::from(completed_payments)
            } else {
                transactions.iter().map(|t| t.amount).sum()
            };
            (completed_payments, paid)
        }
    };

    let paid_amount = paid_raw.clamp(Money::ZERO, total_amount);
    let remaining_amount = total_amount - paid_amount;

    let percent = if total > 0 {
        let ratio = Decimal::from(completed) / Decimal::from(total) * Decimal::from(100);
        ratio.round().to_u32().unwrap_or(0)
    } else {
        0
    };

    ProgressSummary {
        total_amount,
        paid_amount,
        remaining_amount,
        completed,
        total,
        percent,
    }
}
