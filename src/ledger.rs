use crate::models::InvoiceRecord;

/// The session's invoice book: append-only, insertion-ordered, and gone when
/// the process exits. Owned by the application state and handed by reference
/// to the screens that read it.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<InvoiceRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Always succeeds; invoice numbers are opaque and not
    /// checked for uniqueness.
    pub fn append(&mut self, record: InvoiceRecord) {
        tracing::info!(
            invoice_no = %record.invoice_no,
            amount = record.amount,
            total = record.total,
            "invoice recorded"
        );
        self.records.push(record);
    }

    /// All records in insertion order. Empty is a normal state that callers
    /// must render as "no data".
    pub fn all(&self) -> &[InvoiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GstRate, InvoiceDraft, TransactionType};
    use chrono::NaiveDate;

    fn record(invoice_no: &str) -> InvoiceRecord {
        InvoiceDraft {
            invoice_no: invoice_no.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            party_name: "Test Party".to_string(),
            amount: 100.0,
            transaction_type: TransactionType::IntraState,
            gst_rate: GstRate::Eighteen,
        }
        .build()
        .unwrap()
    }

    #[test]
    fn starts_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.all().len(), 0);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut ledger = Ledger::new();
        for no in ["A-1", "A-2", "A-3"] {
            ledger.append(record(no));
        }

        assert_eq!(ledger.len(), 3);
        let numbers: Vec<&str> = ledger.all().iter().map(|r| r.invoice_no.as_str()).collect();
        assert_eq!(numbers, vec!["A-1", "A-2", "A-3"]);
    }

    #[test]
    fn duplicate_invoice_numbers_are_accepted() {
        let mut ledger = Ledger::new();
        ledger.append(record("DUP"));
        ledger.append(record("DUP"));
        assert_eq!(ledger.len(), 2);
    }
}
