use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{AgreementError, Result};
use crate::status::SUPER_LATE_AFTER_DAYS;
use crate::terms::AgreementTerms;
use crate::types::{InstallmentStatus, PaymentTerms};

/// one planned installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based, unique within an agreement, ordered by due date
    pub payment_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub status: InstallmentStatus,
}

/// ordered list of planned installments derived from contract terms
///
/// derived data, recomputed on demand; never persisted as a source of truth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    pub entries: Vec<ScheduleEntry>,
    /// flat per-entry amount, computed once from the totals
    pub monthly_amount: Money,
    /// sum of entry amounts; differs from the contract price only by
    /// bounded flat-division drift
    pub total_scheduled: Money,
}

impl PaymentSchedule {
    /// generate the deterministic schedule for the given terms
    ///
    /// spot cash yields a single entry dated at signing and already marked
    /// paid; installment yields `years * 12` entries stepping one calendar
    /// month at a time, with entry 1 marked paid (signing collects the
    /// first due amount)
    pub fn generate(terms: &AgreementTerms) -> Result<Self> {
        terms.validate()?;

        let entries = match terms.payment_terms {
            PaymentTerms::SpotCash => vec![ScheduleEntry {
                payment_number: 1,
                due_date: terms.start_date,
                amount: terms.total_amount,
                status: InstallmentStatus::Paid,
            }],
            PaymentTerms::Installment { .. } => {
                let count = terms.total_installments();
                let amount = terms.monthly_amount();

                let mut entries = Vec::with_capacity(count as usize);
                for number in 1..=count {
                    let due_date = add_months(terms.start_date, number - 1)?;
                    entries.push(ScheduleEntry {
                        payment_number: number,
                        due_date,
                        amount,
                        status: if number == 1 {
                            InstallmentStatus::Paid
                        } else {
                            InstallmentStatus::Pending
                        },
                    });
                }
                entries
            }
        };

        let total_scheduled = entries.iter().map(|e| e.amount).sum();

        Ok(Self {
            entries,
            monthly_amount: terms.monthly_amount(),
            total_scheduled,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// look up an entry by its 1-based payment number
    pub fn get_entry(&self, payment_number: u32) -> Option<&ScheduleEntry> {
        if payment_number == 0 {
            return None;
        }
        self.entries.get((payment_number - 1) as usize)
    }

    /// due date of the entry after the given number of completed payments,
    /// if the schedule extends that far
    pub fn due_date_after(&self, completed_payments: u32) -> Option<NaiveDate> {
        self.get_entry(completed_payments + 1).map(|e| e.due_date)
    }

    /// recompute per-entry statuses against the real ledger position
    ///
    /// entries up to `completed_payments` are paid; an unpaid entry past its
    /// due date is late, or super-late past the 30-day threshold
    pub fn statuses_as_of(&self, completed_payments: u32, today: NaiveDate) -> Vec<ScheduleEntry> {
        self.entries
            .iter()
            .map(|entry| {
                let status = if entry.payment_number <= completed_payments {
                    InstallmentStatus::Paid
                } else if entry.due_date < today {
                    let overdue = (today - entry.due_date).num_days();
                    if overdue > SUPER_LATE_AFTER_DAYS {
                        InstallmentStatus::SuperLate
                    } else {
                        InstallmentStatus::Late
                    }
                } else {
                    InstallmentStatus::Pending
                };
                ScheduleEntry {
                    status,
                    ..entry.clone()
                }
            })
            .collect()
    }
}

/// calendar month stepping; clamps to month end (jan 31 + 1 month = feb 29/28)
fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| AgreementError::InvalidDate {
            message: format!("due date overflows calendar: {} + {} months", date, months),
        })
}
