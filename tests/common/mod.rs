#![allow(dead_code)]

use debt_payoff::Debt;
use rand::Rng;
use rust_decimal::Decimal;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const HEADER: &str = "id,name,balance,interest_rate,minimum_payment";

/// Writes `rows` under the standard debts header into a temp file.
pub fn debts_csv(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}

/// The three-debt household used across the strategy tests:
/// A is the highest rate, B the largest balance, C the smallest balance.
pub fn household() -> Vec<Debt> {
    vec![
        Debt::new(1, "A", Decimal::new(500, 0), Decimal::new(20, 0), Decimal::new(25, 0)),
        Debt::new(2, "B", Decimal::new(2000, 0), Decimal::new(10, 0), Decimal::new(50, 0)),
        Debt::new(3, "C", Decimal::new(100, 0), Decimal::new(5, 0), Decimal::new(10, 0)),
    ]
}

/// Random debts with whole-cent amounts: balance up to 5,000, APR up to 30%,
/// minimum up to 200 (zero included).
pub fn random_debts<R: Rng>(rng: &mut R, count: usize) -> Vec<Debt> {
    (1..=count as u32)
        .map(|id| {
            Debt::new(
                id,
                format!("debt-{id}"),
                Decimal::new(rng.gen_range(0..500_000), 2),
                Decimal::new(rng.gen_range(0..3_000), 2),
                Decimal::new(rng.gen_range(0..20_000), 2),
            )
        })
        .collect()
}
