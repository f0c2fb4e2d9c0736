/// status classification as the clock moves past a due date
use chrono::{Duration, TimeZone, Utc};
use payment_agreement_rs::{Agreement, Money};
use payment_agreement_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opened = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(opened));

    let agreement = Agreement::builder()
        .client("Maria Santos")
        .property("Block 4 Lot 12")
        .total_amount(Money::from_major(120_000))
        .installment_years(1)
        .start_date(opened.date_naive())
        .open(&time)?;

    // walk forward day by day and watch the status escalate
    for offset in [0i64, 1, 10, 30, 31, 45, 90] {
        let today = (opened + Duration::days(offset)).date_naive();
        println!(
            "day {:>3} ({}): {:?}",
            offset,
            today,
            agreement.status_as_of(today)
        );
    }

    Ok(())
}
