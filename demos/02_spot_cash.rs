/// spot cash: single payment settles the full contract price
use chrono::{NaiveDate, TimeZone, Utc};
use payment_agreement_rs::{Agreement, AgreementStatus, Money, PaymentInput, PaymentMethod};
use payment_agreement_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let signing = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
    ));

    let mut agreement = Agreement::builder()
        .client("Jose Rivera")
        .property("Block 1 Lot 3")
        .total_amount(Money::from_major(50_000))
        .spot_cash()
        .start_date(signing)
        .open(&time)?;

    assert_eq!(agreement.status(&time), AgreementStatus::Pending);

    let recorded = agreement.prepare_payment(PaymentInput {
        amount: Money::from_major(50_000),
        payment_date: signing,
        method: PaymentMethod::Check,
        reference_number: Some("CHK-88214".to_string()),
        notes: Some("full settlement at signing".to_string()),
    })?;
    agreement.apply_recorded(&recorded)?;

    println!("receipt for {}:", recorded.receipt.client_name);
    println!("  property  {}", recorded.receipt.property_label);
    println!("  amount    {}", recorded.receipt.amount_display());
    println!("  method    {}", recorded.receipt.method.as_str());
    println!("  reference {}", recorded.receipt.reference_number);
    println!("status: {:?}", agreement.status(&time));

    Ok(())
}
