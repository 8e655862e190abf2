use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gst;

/// Whether a transaction crosses state lines, which decides how the tax
/// splits: intra-state is taxed half CGST + half SGST, inter-state carries a
/// single IGST component at the full rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    IntraState,
    InterState,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::IntraState => "Intra-state",
            TransactionType::InterState => "Inter-state",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TransactionType::IntraState => TransactionType::InterState,
            TransactionType::InterState => TransactionType::IntraState,
        }
    }
}

/// The statutory GST rate slabs. Invoices only ever carry one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GstRate {
    Five,
    Twelve,
    Eighteen,
    TwentyEight,
}

impl GstRate {
    pub const ALL: [GstRate; 4] = [
        GstRate::Five,
        GstRate::Twelve,
        GstRate::Eighteen,
        GstRate::TwentyEight,
    ];

    pub fn percent(&self) -> f64 {
        match self {
            GstRate::Five => 5.0,
            GstRate::Twelve => 12.0,
            GstRate::Eighteen => 18.0,
            GstRate::TwentyEight => 28.0,
        }
    }

    /// Next slab up, wrapping around. Used by the rate selector in the form.
    pub fn next(&self) -> Self {
        match self {
            GstRate::Five => GstRate::Twelve,
            GstRate::Twelve => GstRate::Eighteen,
            GstRate::Eighteen => GstRate::TwentyEight,
            GstRate::TwentyEight => GstRate::Five,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            GstRate::Five => GstRate::TwentyEight,
            GstRate::Twelve => GstRate::Five,
            GstRate::Eighteen => GstRate::Twelve,
            GstRate::TwentyEight => GstRate::Eighteen,
        }
    }
}

impl std::fmt::Display for GstRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent() as u32)
    }
}

/// A recorded invoice. Tax columns are derived once when the record is built
/// and never touched again; the record is immutable after it lands in the
/// ledger.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRecord {
    pub invoice_no: String,
    pub date: NaiveDate,
    pub party_name: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub gst_rate: GstRate,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub total: f64,
}

impl InvoiceRecord {
    /// Year-month grouping key used by the monthly reports, e.g. "2024-01".
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    pub fn tax(&self) -> f64 {
        self.cgst + self.sgst + self.igst
    }
}

/// Rejections at the input boundary. The calculator itself never validates;
/// the draft does, before a record is constructed.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(f64),
}

/// Typed form input, as collected by the invoice screen. `build` is the only
/// way to obtain an `InvoiceRecord`.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub invoice_no: String,
    pub date: NaiveDate,
    pub party_name: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub gst_rate: GstRate,
}

impl InvoiceDraft {
    /// Validate the draft and derive the tax columns.
    ///
    /// Intra-state invoices compute CGST and SGST independently at half the
    /// slab rate each; inter-state invoices put the full rate into IGST.
    pub fn build(self) -> Result<InvoiceRecord, ValidationError> {
        if self.amount < 0.0 {
            return Err(ValidationError::NegativeAmount(self.amount));
        }

        let rate = self.gst_rate.percent();
        let (cgst, sgst, igst) = match self.transaction_type {
            TransactionType::IntraState => {
                let cgst = gst::calculate_gst(self.amount, rate / 2.0);
                let sgst = gst::calculate_gst(self.amount, rate / 2.0);
                (cgst, sgst, 0.0)
            }
            TransactionType::InterState => {
                let igst = gst::calculate_gst(self.amount, rate);
                (0.0, 0.0, igst)
            }
        };

        Ok(InvoiceRecord {
            total: self.amount + cgst + sgst + igst,
            invoice_no: self.invoice_no,
            date: self.date,
            party_name: self.party_name,
            amount: self.amount,
            transaction_type: self.transaction_type,
            gst_rate: self.gst_rate,
            cgst,
            sgst,
            igst,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: f64, transaction_type: TransactionType, gst_rate: GstRate) -> InvoiceDraft {
        InvoiceDraft {
            invoice_no: "INV-001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            party_name: "Acme Traders".to_string(),
            amount,
            transaction_type,
            gst_rate,
        }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn intra_state_splits_half_rate_each_side() {
        let record = draft(1000.0, TransactionType::IntraState, GstRate::Eighteen)
            .build()
            .unwrap();

        assert_close(record.cgst, 90.0);
        assert_close(record.sgst, 90.0);
        assert_close(record.igst, 0.0);
        assert_close(record.total, 1180.0);
    }

    #[test]
    fn inter_state_charges_full_rate_as_igst() {
        let record = draft(1000.0, TransactionType::InterState, GstRate::Eighteen)
            .build()
            .unwrap();

        assert_close(record.cgst, 0.0);
        assert_close(record.sgst, 0.0);
        assert_close(record.igst, 180.0);
        assert_close(record.total, 1180.0);
    }

    #[test]
    fn total_is_amount_plus_all_tax_columns() {
        for rate in GstRate::ALL {
            for transaction_type in [TransactionType::IntraState, TransactionType::InterState] {
                let record = draft(736.55, transaction_type, rate).build().unwrap();
                assert_close(
                    record.total,
                    record.amount + record.cgst + record.sgst + record.igst,
                );
            }
        }
    }

    #[test]
    fn exactly_one_tax_side_is_nonzero() {
        let intra = draft(500.0, TransactionType::IntraState, GstRate::Five)
            .build()
            .unwrap();
        assert!(intra.cgst > 0.0 && intra.sgst > 0.0);
        assert_close(intra.igst, 0.0);

        let inter = draft(500.0, TransactionType::InterState, GstRate::Five)
            .build()
            .unwrap();
        assert!(inter.igst > 0.0);
        assert_close(inter.cgst, 0.0);
        assert_close(inter.sgst, 0.0);
    }

    #[test]
    fn zero_amount_builds_a_zero_tax_record() {
        let record = draft(0.0, TransactionType::IntraState, GstRate::TwentyEight)
            .build()
            .unwrap();
        assert_close(record.tax(), 0.0);
        assert_close(record.total, 0.0);
    }

    #[test]
    fn negative_amount_is_rejected_at_the_boundary() {
        let err = draft(-1.0, TransactionType::IntraState, GstRate::Five)
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::NegativeAmount(-1.0));
    }

    #[test]
    fn month_key_truncates_to_year_month() {
        let record = draft(100.0, TransactionType::IntraState, GstRate::Twelve)
            .build()
            .unwrap();
        assert_eq!(record.month_key(), "2024-01");
    }
}
