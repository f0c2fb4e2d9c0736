pub mod agreement;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod recorder;
pub mod schedule;
pub mod status;
pub mod terms;
pub mod types;
pub mod view;

// re-export key types
pub use agreement::{Agreement, AgreementBuilder};
pub use decimal::Money;
pub use errors::{AgreementError, Result};
pub use events::{Event, EventStore};
pub use ledger::{reconcile, ProgressSummary, Transaction};
pub use recorder::{
    record_payment, PaymentInput, ReceiptData, RecordedPayment, UpdatedCounters, RECEIPT_PREFIX,
};
pub use schedule::{PaymentSchedule, ScheduleEntry};
pub use status::{classify, SUPER_LATE_AFTER_DAYS};
pub use terms::AgreementTerms;
pub use types::{
    AgreementId, AgreementStatus, InstallmentStatus, PaymentMethod, PaymentTerms, TransactionId,
};
pub use view::{AgreementView, TermsView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
