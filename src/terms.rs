use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{AgreementError, Result};
use crate::types::PaymentTerms;

/// immutable contract terms of one agreement
///
/// terms plus the transaction ledger are the persisted source of truth;
/// schedules and statuses are always recomputed from them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementTerms {
    pub payment_terms: PaymentTerms,
    pub total_amount: Money,
    pub start_date: NaiveDate,
}

impl AgreementTerms {
    /// create validated terms
    pub fn new(payment_terms: PaymentTerms, total_amount: Money, start_date: NaiveDate) -> Result<Self> {
        let terms = Self {
            payment_terms,
            total_amount,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// spot cash terms
    pub fn spot_cash(total_amount: Money, start_date: NaiveDate) -> Result<Self> {
        Self::new(PaymentTerms::SpotCash, total_amount, start_date)
    }

    /// monthly installment terms over the given number of years
    pub fn installment(total_amount: Money, years: u32, start_date: NaiveDate) -> Result<Self> {
        Self::new(PaymentTerms::Installment { years }, total_amount, start_date)
    }

    /// check the invariants the rest of the engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.total_amount.is_negative() {
            return Err(AgreementError::InvalidTerms {
                message: format!("total amount must be non-negative, got {}", self.total_amount),
            });
        }

        if let PaymentTerms::Installment { years } = self.payment_terms {
            if years == 0 {
                return Err(AgreementError::InvalidTerms {
                    message: "installment period must be at least one year".to_string(),
                });
            }
        }

        Ok(())
    }

    /// number of scheduled payments
    pub fn total_installments(&self) -> u32 {
        self.payment_terms.total_installments()
    }

    /// flat per-entry due amount
    ///
    /// computed once from the totals, never re-derived per entry, so repeated
    /// schedule generation cannot drift
    pub fn monthly_amount(&self) -> Money {
        self.total_amount / Decimal::from(self.total_installments())
    }
}
