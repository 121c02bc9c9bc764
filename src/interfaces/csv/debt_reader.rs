use crate::domain::debt::Debt;
use crate::error::{PayoffError, Result};
use std::io::Read;

/// Reads debts from a CSV source with header
/// `id,name,balance,interest_rate,minimum_payment`.
///
/// Whitespace around fields is trimmed and short or long records are let
/// through to deserialization, which reports them as row errors.
pub struct DebtReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DebtReader<R> {
    /// Creates a new `DebtReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one debt per row.
    pub fn debts(self) -> impl Iterator<Item = Result<Debt>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayoffError::from))
    }
}
