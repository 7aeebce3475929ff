#![allow(dead_code)]

use payoff::Debt;
use rand::Rng;
use rust_decimal::Decimal;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes `rows` (without header) under the standard debt header.
pub fn debts_csv(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "id,name,balance,annual_rate_percent,minimum_payment")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}

/// Random debts whose minimum payment always exceeds the first month's interest.
pub fn random_debts(rng: &mut impl Rng, count: usize) -> Vec<Debt> {
    (0..count)
        .map(|i| {
            let balance = Decimal::new(rng.gen_range(10_000..=2_500_000), 2);
            let rate = Decimal::new(rng.gen_range(0..=3_000), 2);
            let interest = (balance * rate / Decimal::from(1200)).round_dp(2);
            let minimum = interest + Decimal::new(rng.gen_range(1_000..=30_000), 2);
            Debt::new(format!("debt-{i}"), format!("Debt {i}"), balance, rate, minimum)
        })
        .collect()
}
