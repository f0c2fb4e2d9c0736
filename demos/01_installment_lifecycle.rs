/// full installment lifecycle: open, pay monthly, complete
use chrono::{Months, NaiveDate, TimeZone, Utc};
use payment_agreement_rs::{Agreement, Money, PaymentInput, PaymentMethod};
use payment_agreement_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));

    let mut agreement = Agreement::builder()
        .client("Maria Santos")
        .property("Block 4 Lot 12")
        .total_amount(Money::from_major(120_000))
        .installment_years(1)
        .start_date(start)
        .open(&time)?;

    // print the generated schedule
    let schedule = agreement.schedule()?;
    println!("schedule ({} entries):", schedule.len());
    for entry in &schedule.entries {
        println!(
            "  #{:02} due {} amount {}",
            entry.payment_number,
            entry.due_date,
            entry.amount.grouped()
        );
    }

    // pay every month on the due date
    for n in 0..12 {
        let on = start.checked_add_months(Months::new(n)).unwrap();
        let recorded = agreement.prepare_payment(PaymentInput {
            amount: Money::from_major(10_000),
            payment_date: on,
            method: PaymentMethod::BankTransfer,
            reference_number: None,
            notes: None,
        })?;
        agreement.apply_recorded(&recorded)?;

        let progress = agreement.progress()?;
        println!(
            "paid #{:02} on {} -> {}% complete, remaining {}",
            recorded.transaction.payment_number,
            on,
            progress.percent,
            progress.remaining_amount.grouped()
        );
    }

    println!("final status: {:?}", agreement.status_as_of(start));

    for event in agreement.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
