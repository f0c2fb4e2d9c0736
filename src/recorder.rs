use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::agreement::Agreement;
use crate::decimal::Money;
use crate::errors::{AgreementError, Result};
use crate::ledger::Transaction;
use crate::schedule::PaymentSchedule;
use crate::types::{PaymentMethod, PaymentTerms};

/// prefix for synthesized acknowledgement receipt numbers
pub const RECEIPT_PREFIX: &str = "AYCO";

/// caller-supplied details of one payment event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInput {
    pub amount: Money,
    pub payment_date: NaiveDate,
    pub method: PaymentMethod,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

/// derived record describing one payment event, consumed by receipt rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptData {
    pub client_name: String,
    pub property_label: String,
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub amount: Money,
    pub method: PaymentMethod,
    /// supplied reference, or `AYCO-{payment_number:03}` when none was given
    pub reference_number: String,
    pub notes: Option<String>,
}

impl ReceiptData {
    /// amount formatted for the printed acknowledgement
    pub fn amount_display(&self) -> String {
        self.amount.grouped()
    }
}

/// counter values the caller must persist once the transaction is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedCounters {
    pub completed_payments: u32,
    pub next_payment_date: Option<NaiveDate>,
}

/// everything produced by one payment-recording action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPayment {
    pub transaction: Transaction,
    pub receipt: ReceiptData,
    pub counters: UpdatedCounters,
}

/// validate and construct the transaction, receipt data, and advanced
/// counters for one payment event
///
/// mutates nothing: the caller submits the transaction to the store first
/// and applies the counters only on confirmed success. a failed persist
/// leaves no partial state behind.
pub fn record_payment(agreement: &Agreement, input: PaymentInput) -> Result<RecordedPayment> {
    if !input.amount.is_positive() {
        return Err(AgreementError::InvalidPaymentAmount {
            amount: input.amount,
        });
    }

    // spot cash completes through the ledger, installment through counters
    if agreement.is_complete() {
        return Err(AgreementError::AgreementAlreadyCompleted);
    }

    // whole-unit granularity at entry, rounded toward the payee
    let amount = input.amount.ceil_to_unit();
    let payment_number = agreement.completed_payments + 1;

    let schedule = PaymentSchedule::generate(&agreement.terms)?;
    let next_payment_date = schedule.due_date_after(payment_number);

    let reference_number = input
        .reference_number
        .clone()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| format!("{}-{:03}", RECEIPT_PREFIX, payment_number));

    let transaction = Transaction::new(
        payment_number,
        input.payment_date,
        amount,
        input.method,
        input.reference_number,
        input.notes.clone(),
    );

    let receipt = ReceiptData {
        client_name: agreement.client_name.clone(),
        property_label: agreement.property_label.clone(),
        payment_number,
        payment_date: input.payment_date,
        amount,
        method: input.method,
        reference_number,
        notes: input.notes,
    };

    // installment counters advance per payment; spot cash flips to complete
    // only once a single transaction covers the contract price, so partial
    // payments leave the counter (and thus the next payment number) at zero
    let counters = match agreement.terms.payment_terms {
        PaymentTerms::Installment { .. } => UpdatedCounters {
            completed_payments: payment_number,
            next_payment_date,
        },
        PaymentTerms::SpotCash => UpdatedCounters {
            completed_payments: if amount >= agreement.terms.total_amount { 1 } else { 0 },
            next_payment_date: None,
        },
    };

    Ok(RecordedPayment {
        transaction,
        receipt,
        counters,
    })
}
