use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AgreementId, AgreementStatus, PaymentMethod, PaymentTerms};

/// all events that can be emitted by an agreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    AgreementOpened {
        agreement_id: AgreementId,
        payment_terms: PaymentTerms,
        total_amount: Money,
        start_date: NaiveDate,
    },
    PaymentRecorded {
        agreement_id: AgreementId,
        payment_number: u32,
        amount: Money,
        method: PaymentMethod,
        receipt_reference: String,
        payment_date: NaiveDate,
    },
    AgreementCompleted {
        agreement_id: AgreementId,
        total_paid: Money,
        final_payment_number: u32,
    },
    StatusChanged {
        agreement_id: AgreementId,
        old_status: AgreementStatus,
        new_status: AgreementStatus,
        reason: String,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
