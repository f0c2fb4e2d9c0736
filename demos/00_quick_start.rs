/// quick start - minimal example to get started
use payment_agreement_rs::{Agreement, Money, PaymentInput, PaymentMethod};
use payment_agreement_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // open a 120,000 one-year installment agreement
    let mut agreement = Agreement::builder()
        .client("Maria Santos")
        .property("Block 4 Lot 12")
        .total_amount(Money::from_major(120_000))
        .installment_years(1)
        .open(&time)?;

    // record the first monthly payment
    let recorded = agreement.prepare_payment(PaymentInput {
        amount: Money::from_major(10_000),
        payment_date: time.now().date_naive(),
        method: PaymentMethod::Cash,
        reference_number: None,
        notes: None,
    })?;

    // (persist the transaction here) then apply it locally
    agreement.apply_recorded(&recorded)?;

    println!("receipt {}", recorded.receipt.reference_number);
    println!("paid so far: {}", agreement.progress()?.paid_amount.grouped());

    Ok(())
}
