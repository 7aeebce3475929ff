use crate::domain::debt::Debt;
use crate::error::{PayoffError, Result};
use std::io::Read;

/// Reads debt records from a CSV source.
///
/// Expects the header `id,name,balance,annual_rate_percent,minimum_payment`.
/// Surrounding whitespace is trimmed from every field.
pub struct DebtReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DebtReader<R> {
    /// Creates a new `DebtReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily deserializes debts.
    pub fn debts(self) -> impl Iterator<Item = Result<Debt>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayoffError::from))
    }

    /// Reads every record, failing on the first malformed row.
    pub fn read_all(self) -> Result<Vec<Debt>> {
        self.debts().collect()
    }
}
