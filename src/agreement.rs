use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{AgreementError, Result};
use crate::events::{Event, EventStore};
use crate::ledger::{reconcile, ProgressSummary, Transaction};
use crate::recorder::{record_payment, PaymentInput, RecordedPayment};
use crate::schedule::PaymentSchedule;
use crate::status::{classify, spot_cash_settled};
use crate::terms::AgreementTerms;
use crate::types::{AgreementId, AgreementStatus, PaymentTerms};

/// one client's purchase contract plus its append-only transaction ledger
///
/// terms and transactions are the persisted truth; schedule, progress, and
/// status are derived on every read. recording a payment is two-phase:
/// `prepare_payment` computes without mutating, the caller persists, then
/// `apply_recorded` advances local state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agreement {
    pub id: AgreementId,
    pub client_name: String,
    pub property_label: String,
    pub terms: AgreementTerms,
    /// installments considered paid; monotonically non-decreasing, bounded
    /// by the total installment count
    pub completed_payments: u32,
    /// advisory due-date bookkeeping, independent of schedule recomputation
    pub next_payment_date: Option<NaiveDate>,
    pub opened_on: NaiveDate,
    transactions: Vec<Transaction>,
    #[serde(skip)]
    events: EventStore,
}

impl Agreement {
    /// builder for opening agreements
    pub fn builder() -> AgreementBuilder {
        AgreementBuilder::new()
    }

    /// open a new agreement
    pub fn open(
        client_name: String,
        property_label: String,
        terms: AgreementTerms,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        terms.validate()?;

        let next_payment_date = match terms.payment_terms {
            // spot cash carries no due-date bookkeeping; completion is
            // judged from the ledger alone
            PaymentTerms::SpotCash => None,
            PaymentTerms::Installment { .. } => Some(terms.start_date),
        };

        let mut agreement = Self {
            id: Uuid::new_v4(),
            client_name,
            property_label,
            completed_payments: 0,
            next_payment_date,
            opened_on: time_provider.now().date_naive(),
            transactions: Vec::new(),
            events: EventStore::new(),
            terms,
        };

        agreement.events.emit(Event::AgreementOpened {
            agreement_id: agreement.id,
            payment_terms: agreement.terms.payment_terms,
            total_amount: agreement.terms.total_amount,
            start_date: agreement.terms.start_date,
        });

        Ok(agreement)
    }

    /// rehydrate an agreement from persisted parts
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: AgreementId,
        client_name: String,
        property_label: String,
        terms: AgreementTerms,
        completed_payments: u32,
        next_payment_date: Option<NaiveDate>,
        opened_on: NaiveDate,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            id,
            client_name,
            property_label,
            terms,
            completed_payments,
            next_payment_date,
            opened_on,
            transactions,
            events: EventStore::new(),
        }
    }

    /// the recorded transaction ledger, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// regenerate the payment schedule from the contract terms
    pub fn schedule(&self) -> Result<PaymentSchedule> {
        PaymentSchedule::generate(&self.terms)
    }

    /// reconcile the ledger into paid/remaining totals and progress
    pub fn progress(&self) -> Result<ProgressSummary> {
        let schedule = self.schedule()?;
        Ok(reconcile(
            &self.terms,
            self.completed_payments,
            &schedule,
            &self.transactions,
        ))
    }

    /// derive the lifecycle status as of the provider's current date
    pub fn status(&self, time_provider: &SafeTimeProvider) -> AgreementStatus {
        self.status_as_of(time_provider.now().date_naive())
    }

    /// derive the lifecycle status as of an explicit date
    pub fn status_as_of(&self, today: NaiveDate) -> AgreementStatus {
        classify(Some(self), &self.transactions, today)
    }

    /// whether every due amount has been collected
    pub fn is_complete(&self) -> bool {
        match self.terms.payment_terms {
            PaymentTerms::SpotCash => {
                spot_cash_settled(self.terms.total_amount, &self.transactions)
            }
            PaymentTerms::Installment { .. } => {
                self.completed_payments >= self.terms.total_installments()
            }
        }
    }

    /// validate and compute one payment event without mutating anything
    ///
    /// the caller submits the transaction to the store and calls
    /// `apply_recorded` only on confirmed success; on failure it simply
    /// discards the result
    pub fn prepare_payment(&self, input: PaymentInput) -> Result<RecordedPayment> {
        if self.is_complete() {
            return Err(AgreementError::AgreementAlreadyCompleted);
        }
        record_payment(self, input)
    }

    /// apply a persisted payment: append to the ledger and advance counters
    pub fn apply_recorded(&mut self, recorded: &RecordedPayment) -> Result<()> {
        let expected = self.completed_payments + 1;
        if recorded.transaction.payment_number != expected {
            return Err(AgreementError::StalePayment {
                expected,
                provided: recorded.transaction.payment_number,
            });
        }

        let old_status = self.status_as_of(recorded.transaction.payment_date);

        self.transactions.push(recorded.transaction.clone());
        self.completed_payments = recorded.counters.completed_payments;
        self.next_payment_date = recorded.counters.next_payment_date;

        self.events.emit(Event::PaymentRecorded {
            agreement_id: self.id,
            payment_number: recorded.transaction.payment_number,
            amount: recorded.transaction.amount,
            method: recorded.transaction.method,
            receipt_reference: recorded.receipt.reference_number.clone(),
            payment_date: recorded.transaction.payment_date,
        });

        if self.is_complete() {
            let total_paid: Money = self.transactions.iter().map(|t| t.amount).sum();
            self.events.emit(Event::AgreementCompleted {
                agreement_id: self.id,
                total_paid,
                final_payment_number: recorded.transaction.payment_number,
            });
        }

        let new_status = self.status_as_of(recorded.transaction.payment_date);
        if new_status != old_status {
            self.events.emit(Event::StatusChanged {
                agreement_id: self.id,
                old_status,
                new_status,
                reason: format!("payment {} recorded", recorded.transaction.payment_number),
            });
        }

        Ok(())
    }

    /// drain events collected since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// events collected so far
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }
}

/// builder for opening agreements
pub struct AgreementBuilder {
    client_name: Option<String>,
    property_label: Option<String>,
    total_amount: Option<Money>,
    payment_terms: Option<PaymentTerms>,
    start_date: Option<NaiveDate>,
}

impl AgreementBuilder {
    pub fn new() -> Self {
        Self {
            client_name: None,
            property_label: None,
            total_amount: None,
            payment_terms: None,
            start_date: None,
        }
    }

    pub fn client(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn property(mut self, label: impl Into<String>) -> Self {
        self.property_label = Some(label.into());
        self
    }

    pub fn total_amount(mut self, amount: Money) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn spot_cash(mut self) -> Self {
        self.payment_terms = Some(PaymentTerms::SpotCash);
        self
    }

    pub fn installment_years(mut self, years: u32) -> Self {
        self.payment_terms = Some(PaymentTerms::Installment { years });
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// open with the given time provider; start date defaults to today
    pub fn open(self, time_provider: &SafeTimeProvider) -> Result<Agreement> {
        let client_name = self.client_name.ok_or(AgreementError::InvalidTerms {
            message: "client name required".to_string(),
        })?;
        let property_label = self.property_label.ok_or(AgreementError::InvalidTerms {
            message: "property label required".to_string(),
        })?;
        let total_amount = self.total_amount.ok_or(AgreementError::InvalidTerms {
            message: "total amount required".to_string(),
        })?;
        let payment_terms = self.payment_terms.ok_or(AgreementError::InvalidTerms {
            message: "payment terms required".to_string(),
        })?;

        let start_date = self
            .start_date
            .unwrap_or_else(|| time_provider.now().date_naive());

        let terms = AgreementTerms::new(payment_terms, total_amount, start_date)?;
        Agreement::open(client_name, property_label, terms, time_provider)
    }
}

impl Default for AgreementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::TimeZone;
    use chrono::Utc;
    use hourglass_rs::TimeSource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_time(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
        ))
    }

    fn payment(amount: i64, on: NaiveDate) -> PaymentInput {
        PaymentInput {
            amount: Money::from_major(amount),
            payment_date: on,
            method: PaymentMethod::Cash,
            reference_number: None,
            notes: None,
        }
    }

    fn open_installment() -> Agreement {
        let time = test_time(2024, 1, 1);
        Agreement::builder()
            .client("Maria Santos")
            .property("Block 4 Lot 12")
            .total_amount(Money::from_major(120_000))
            .installment_years(1)
            .start_date(date(2024, 1, 1))
            .open(&time)
            .unwrap()
    }

    #[test]
    fn test_open_seeds_next_due_from_terms() {
        let agreement = open_installment();
        assert_eq!(agreement.completed_payments, 0);
        assert_eq!(agreement.next_payment_date, Some(date(2024, 1, 1)));
        assert_eq!(agreement.events().len(), 1);
    }

    #[test]
    fn test_builder_requires_terms() {
        let time = test_time(2024, 1, 1);
        let result = Agreement::builder()
            .client("Maria Santos")
            .property("Block 4 Lot 12")
            .total_amount(Money::from_major(120_000))
            .open(&time);
        assert!(matches!(result, Err(AgreementError::InvalidTerms { .. })));
    }

    #[test]
    fn test_prepare_then_apply_round_trip() {
        let mut agreement = open_installment();

        let recorded = agreement
            .prepare_payment(payment(10_000, date(2024, 1, 1)))
            .unwrap();

        // nothing moved yet
        assert_eq!(agreement.completed_payments, 0);
        assert!(agreement.transactions().is_empty());

        agreement.apply_recorded(&recorded).unwrap();

        assert_eq!(agreement.completed_payments, 1);
        assert_eq!(agreement.next_payment_date, Some(date(2024, 2, 1)));
        assert_eq!(agreement.transactions().len(), 1);
    }

    #[test]
    fn test_apply_rejects_stale_payment() {
        let mut agreement = open_installment();
        let recorded = agreement
            .prepare_payment(payment(10_000, date(2024, 1, 1)))
            .unwrap();

        agreement.apply_recorded(&recorded).unwrap();
        // replaying the same prepared payment must not double-count
        let result = agreement.apply_recorded(&recorded);
        assert!(matches!(result, Err(AgreementError::StalePayment { .. })));
        assert_eq!(agreement.completed_payments, 1);
    }

    #[test]
    fn test_full_lifecycle_to_completion() {
        let mut agreement = open_installment();

        for n in 0..12u32 {
            let on = date(2024, 1 + n.min(11), 1);
            let recorded = agreement.prepare_payment(payment(10_000, on)).unwrap();
            agreement.apply_recorded(&recorded).unwrap();
        }

        assert!(agreement.is_complete());
        assert_eq!(agreement.status_as_of(date(2025, 1, 1)), AgreementStatus::Completed);
        assert_eq!(agreement.next_payment_date, None);

        let events = agreement.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::AgreementCompleted { .. })));

        // a thirteenth payment is refused
        let result = agreement.prepare_payment(payment(10_000, date(2025, 1, 1)));
        assert!(matches!(result, Err(AgreementError::AgreementAlreadyCompleted)));
    }

    #[test]
    fn test_spot_cash_completion_via_ledger() {
        let time = test_time(2024, 3, 10);
        let mut agreement = Agreement::builder()
            .client("Jose Rivera")
            .property("Block 1 Lot 3")
            .total_amount(Money::from_major(50_000))
            .spot_cash()
            .open(&time)
            .unwrap();

        assert_eq!(agreement.status(&time), AgreementStatus::Pending);

        let recorded = agreement
            .prepare_payment(payment(50_000, date(2024, 3, 10)))
            .unwrap();
        agreement.apply_recorded(&recorded).unwrap();

        assert!(agreement.is_complete());
        assert_eq!(agreement.status(&time), AgreementStatus::Completed);
    }

    #[test]
    fn test_spot_cash_partials_never_settle() {
        let time = test_time(2024, 3, 10);
        let mut agreement = Agreement::builder()
            .client("Jose Rivera")
            .property("Block 1 Lot 3")
            .total_amount(Money::from_major(50_000))
            .spot_cash()
            .open(&time)
            .unwrap();

        // two partials covering the full price in sum; completion requires a
        // single transaction covering the contract price, so a further
        // payment is still accepted
        for amount in [20_000, 30_000] {
            let recorded = agreement
                .prepare_payment(payment(amount, date(2024, 3, 10)))
                .unwrap();
            agreement.apply_recorded(&recorded).unwrap();
        }

        assert!(!agreement.is_complete());
        assert_eq!(agreement.status(&time), AgreementStatus::Pending);
        assert_eq!(agreement.completed_payments, 0);
        // partials all satisfy the single schedule entry
        assert!(agreement.transactions().iter().all(|t| t.payment_number == 1));
        let progress = agreement.progress().unwrap();
        assert_eq!(progress.paid_amount, Money::from_major(50_000));
        assert_eq!(progress.completed, 0);

        let recorded = agreement
            .prepare_payment(payment(50_000, date(2024, 3, 11)))
            .unwrap();
        agreement.apply_recorded(&recorded).unwrap();
        assert!(agreement.is_complete());
        assert_eq!(agreement.completed_payments, 1);
    }

    #[test]
    fn test_progress_uses_ledger() {
        let mut agreement = open_installment();
        let recorded = agreement
            .prepare_payment(payment(10_000, date(2024, 1, 1)))
            .unwrap();
        agreement.apply_recorded(&recorded).unwrap();

        let progress = agreement.progress().unwrap();
        assert_eq!(progress.paid_amount, Money::from_major(10_000));
        assert_eq!(progress.remaining_amount, Money::from_major(110_000));
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.percent, 8); // round(1/12 * 100)
    }

    #[test]
    fn test_status_transitions_with_time() {
        let agreement = open_installment();

        // on the due date: current
        assert_eq!(agreement.status_as_of(date(2024, 1, 1)), AgreementStatus::Current);
        // ten days past: late
        assert_eq!(agreement.status_as_of(date(2024, 1, 11)), AgreementStatus::Late);
        // forty-five days past: super late
        assert_eq!(agreement.status_as_of(date(2024, 2, 15)), AgreementStatus::SuperLate);
    }
}
