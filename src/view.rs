/// serialization support for agreements
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::agreement::Agreement;
use crate::decimal::Money;
use crate::errors::Result;
use crate::ledger::ProgressSummary;
use crate::schedule::ScheduleEntry;
use crate::types::{AgreementId, AgreementStatus, PaymentTerms};

/// serializable snapshot of an agreement's derived state
#[derive(Debug, Serialize, Deserialize)]
pub struct AgreementView {
    pub id: AgreementId,
    pub client_name: String,
    pub property_label: String,
    pub status: AgreementStatus,
    pub opened_on: NaiveDate,
    pub terms: TermsView,
    pub progress: ProgressSummary,
    pub schedule: Vec<ScheduleEntry>,
    pub transaction_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub payment_terms: PaymentTerms,
    pub total_amount: Money,
    pub total_amount_display: String,
    pub monthly_amount: Money,
    pub start_date: NaiveDate,
    pub total_installments: u32,
    pub next_payment_date: Option<NaiveDate>,
}

impl AgreementView {
    /// build the view as of an explicit date
    pub fn from_agreement(agreement: &Agreement, today: NaiveDate) -> Result<Self> {
        let schedule = agreement.schedule()?;
        let progress = agreement.progress()?;

        Ok(AgreementView {
            id: agreement.id,
            client_name: agreement.client_name.clone(),
            property_label: agreement.property_label.clone(),
            status: agreement.status_as_of(today),
            opened_on: agreement.opened_on,
            terms: TermsView {
                payment_terms: agreement.terms.payment_terms,
                total_amount: agreement.terms.total_amount,
                total_amount_display: agreement.terms.total_amount.grouped(),
                monthly_amount: agreement.terms.monthly_amount(),
                start_date: agreement.terms.start_date,
                total_installments: agreement.terms.total_installments(),
                next_payment_date: agreement.next_payment_date,
            },
            progress,
            schedule: schedule.statuses_as_of(agreement.completed_payments, today),
            transaction_count: agreement.transactions().len(),
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
