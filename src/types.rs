use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AgreementError, Result};

/// unique identifier for an agreement
pub type AgreementId = Uuid;

/// unique identifier for a recorded transaction
pub type TransactionId = Uuid;

/// how a client settles the contract price
///
/// installment years are only representable in the variant that uses them,
/// so "years only matters when not spot cash" never needs a runtime check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTerms {
    /// full contract price collected in a single event at signing
    SpotCash,
    /// contract price spread across `years * 12` monthly dues
    Installment { years: u32 },
}

impl PaymentTerms {
    /// number of scheduled payments under these terms
    pub fn total_installments(&self) -> u32 {
        match self {
            PaymentTerms::SpotCash => 1,
            PaymentTerms::Installment { years } => years * 12,
        }
    }

    pub fn is_spot_cash(&self) -> bool {
        matches!(self, PaymentTerms::SpotCash)
    }
}

/// accepted payment channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
    Online,
}

impl PaymentMethod {
    /// parse a method token from the intake boundary
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "check" | "cheque" => Ok(PaymentMethod::Check),
            "bank_transfer" | "bank transfer" => Ok(PaymentMethod::BankTransfer),
            "online" => Ok(PaymentMethod::Online),
            other => Err(AgreementError::InvalidPaymentMethod {
                provided: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Online => "online",
        }
    }
}

/// lifecycle state of an agreement, derived on every read and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementStatus {
    /// no next-due bookkeeping to judge against
    Pending,
    /// on schedule
    Current,
    /// overdue by 30 days or less
    Late,
    /// overdue by more than 30 days
    SuperLate,
    /// all installments paid, or spot cash settled in full
    Completed,
}

/// state of one schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Paid,
    Pending,
    Late,
    SuperLate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_installments() {
        assert_eq!(PaymentTerms::SpotCash.total_installments(), 1);
        assert_eq!(PaymentTerms::Installment { years: 1 }.total_installments(), 12);
        assert_eq!(PaymentTerms::Installment { years: 5 }.total_installments(), 60);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(PaymentMethod::parse("Cash").unwrap(), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::parse("bank transfer").unwrap(), PaymentMethod::BankTransfer);
        assert_eq!(PaymentMethod::parse("cheque").unwrap(), PaymentMethod::Check);
        assert!(matches!(
            PaymentMethod::parse("crypto"),
            Err(AgreementError::InvalidPaymentMethod { .. })
        ));
    }

    #[test]
    fn test_method_round_trip() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Check,
            PaymentMethod::BankTransfer,
            PaymentMethod::Online,
        ] {
            assert_eq!(PaymentMethod::parse(method.as_str()).unwrap(), method);
        }
    }
}
