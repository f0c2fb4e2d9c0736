use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum AgreementError {
    #[error("amount must be positive: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid payment method: {provided}")]
    InvalidPaymentMethod {
        provided: String,
    },

    #[error("invalid agreement terms: {message}")]
    InvalidTerms {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("agreement already completed")]
    AgreementAlreadyCompleted,

    #[error("stale payment: expected payment number {expected}, got {provided}")]
    StalePayment {
        expected: u32,
        provided: u32,
    },
}

pub type Result<T> = std::result::Result<T, AgreementError>;
