use chrono::NaiveDate;

use crate::agreement::Agreement;
use crate::decimal::Money;
use crate::ledger::Transaction;
use crate::types::{AgreementStatus, PaymentTerms};

/// overdue by more than this many whole days escalates late to super-late
pub const SUPER_LATE_AFTER_DAYS: i64 = 30;

/// derive the lifecycle state of an agreement as of `today`
///
/// precedence, first match wins:
/// 1. no agreement at hand: pending (display guard)
/// 2. spot cash is binary: completed once any transaction covers the
///    contract price, pending otherwise
/// 3. installment with all payments counted: completed
/// 4. no next-due bookkeeping: pending
/// 5. next due today or later: current
/// 6. otherwise late, or super-late past the 30-day threshold
pub fn classify(
    agreement: Option<&Agreement>,
    transactions: &[Transaction],
    today: NaiveDate,
) -> AgreementStatus {
    let agreement = match agreement {
        Some(a) => a,
        None => return AgreementStatus::Pending,
    };

    match agreement.terms.payment_terms {
        PaymentTerms::SpotCash => {
            if spot_cash_settled(agreement.terms.total_amount, transactions) {
                AgreementStatus::Completed
            } else {
                AgreementStatus::Pending
            }
        }
        PaymentTerms::Installment { .. } => {
            if agreement.completed_payments >= agreement.terms.total_installments() {
                return AgreementStatus::Completed;
            }

            let next_due = match agreement.next_payment_date {
                Some(d) => d,
                None => return AgreementStatus::Pending,
            };

            if next_due >= today {
                // same-day is not overdue
                return AgreementStatus::Current;
            }

            let overdue_days = (today - next_due).num_days();
            if overdue_days > SUPER_LATE_AFTER_DAYS {
                AgreementStatus::SuperLate
            } else {
                AgreementStatus::Late
            }
        }
    }
}

/// a spot-cash agreement is settled by any single transaction covering the
/// full contract price
pub(crate) fn spot_cash_settled(total_amount: Money, transactions: &[Transaction]) -> bool {
    transactions.iter().any(|t| t.amount >= total_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agreement::Agreement;
    use crate::terms::AgreementTerms;
    use crate::types::PaymentMethod;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn installment_agreement(next_due: Option<NaiveDate>, completed: u32) -> Agreement {
        let terms =
            AgreementTerms::installment(Money::from_major(120_000), 1, date(2024, 1, 1)).unwrap();
        Agreement::from_parts(
            uuid::Uuid::new_v4(),
            "Maria Santos".to_string(),
            "Block 4 Lot 12".to_string(),
            terms,
            completed,
            next_due,
            date(2024, 1, 1),
            Vec::new(),
        )
    }

    fn txn(amount: i64) -> Transaction {
        Transaction::new(
            1,
            date(2024, 3, 10),
            Money::from_major(amount),
            PaymentMethod::Cash,
            None,
            None,
        )
    }

    #[test]
    fn test_missing_agreement_is_pending() {
        assert_eq!(classify(None, &[], date(2024, 6, 1)), AgreementStatus::Pending);
    }

    #[test]
    fn test_overdue_thresholds() {
        let today = date(2024, 6, 15);

        // 45 days overdue
        let a = installment_agreement(today.checked_sub_days(Days::new(45)), 3);
        assert_eq!(classify(Some(&a), &[], today), AgreementStatus::SuperLate);

        // 10 days overdue
        let a = installment_agreement(today.checked_sub_days(Days::new(10)), 3);
        assert_eq!(classify(Some(&a), &[], today), AgreementStatus::Late);

        // due tomorrow
        let a = installment_agreement(today.checked_add_days(Days::new(1)), 3);
        assert_eq!(classify(Some(&a), &[], today), AgreementStatus::Current);
    }

    #[test]
    fn test_thirty_days_is_still_late() {
        let today = date(2024, 6, 15);
        let a = installment_agreement(today.checked_sub_days(Days::new(30)), 3);
        assert_eq!(classify(Some(&a), &[], today), AgreementStatus::Late);

        let a = installment_agreement(today.checked_sub_days(Days::new(31)), 3);
        assert_eq!(classify(Some(&a), &[], today), AgreementStatus::SuperLate);
    }

    #[test]
    fn test_same_day_due_is_current() {
        let today = date(2024, 6, 15);
        let a = installment_agreement(Some(today), 3);
        assert_eq!(classify(Some(&a), &[], today), AgreementStatus::Current);
    }

    #[test]
    fn test_no_next_due_is_pending() {
        let a = installment_agreement(None, 3);
        assert_eq!(classify(Some(&a), &[], date(2024, 6, 1)), AgreementStatus::Pending);
    }

    #[test]
    fn test_counters_complete_wins_over_dates() {
        // all twelve counted; a stale overdue next-due must not demote it
        let a = installment_agreement(Some(date(2024, 1, 1)), 12);
        assert_eq!(classify(Some(&a), &[], date(2025, 6, 1)), AgreementStatus::Completed);
    }

    #[test]
    fn test_spot_cash_is_binary() {
        let terms = AgreementTerms::spot_cash(Money::from_major(50_000), date(2024, 3, 10)).unwrap();
        let a = Agreement::from_parts(
            uuid::Uuid::new_v4(),
            "Jose Rivera".to_string(),
            "Block 1 Lot 3".to_string(),
            terms,
            0,
            None,
            date(2024, 3, 10),
            Vec::new(),
        );

        // unpaid: pending regardless of how far past the start date we are
        assert_eq!(classify(Some(&a), &[], date(2030, 1, 1)), AgreementStatus::Pending);

        // covered in full: completed regardless of dates
        assert_eq!(
            classify(Some(&a), &[txn(50_000)], date(2030, 1, 1)),
            AgreementStatus::Completed
        );

        // partial payments never settle spot cash
        assert_eq!(
            classify(Some(&a), &[txn(20_000), txn(20_000)], date(2024, 3, 10)),
            AgreementStatus::Pending
        );
    }
}
