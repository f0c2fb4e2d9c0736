/// export an agreement's derived state as json
use chrono::{NaiveDate, TimeZone, Utc};
use payment_agreement_rs::{Agreement, AgreementView, Money, PaymentInput, PaymentMethod};
use payment_agreement_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
    ));

    let mut agreement = Agreement::builder()
        .client("Maria Santos")
        .property("Block 4 Lot 12")
        .total_amount(Money::from_major(120_000))
        .installment_years(1)
        .start_date(start)
        .open(&time)?;

    for month in 1u32..=3 {
        let on = NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
        let recorded = agreement.prepare_payment(PaymentInput {
            amount: Money::from_major(10_000),
            payment_date: on,
            method: PaymentMethod::Online,
            reference_number: None,
            notes: None,
        })?;
        agreement.apply_recorded(&recorded)?;
    }

    let view = AgreementView::from_agreement(&agreement, time.now().date_naive())?;
    println!("{}", view.to_json_pretty()?);

    Ok(())
}
