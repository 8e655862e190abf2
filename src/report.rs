use crate::models::{GstRate, InvoiceRecord};

/// Per-month tax column sums.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyTax {
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
}

impl MonthlyTax {
    pub fn total(&self) -> f64 {
        self.cgst + self.sgst + self.igst
    }
}

/// Everything the reports screen renders, computed in one pass over the
/// ledger. Built only for a non-empty ledger; `Report::build` returning
/// `None` is the "no data available" signal.
#[derive(Debug)]
pub struct Report {
    /// ("YYYY-MM", sums), ordered by first appearance of the month.
    pub monthly: Vec<(String, MonthlyTax)>,
    /// (rate, record count), ascending by rate; rates with no records are
    /// omitted.
    pub rate_distribution: Vec<(GstRate, usize)>,
    pub transaction_count: usize,
    pub total_tax: f64,
    pub average_amount: f64,
}

impl Report {
    pub fn build(records: &[InvoiceRecord]) -> Option<Report> {
        if records.is_empty() {
            return None;
        }

        let mut monthly: Vec<(String, MonthlyTax)> = Vec::new();
        let mut amount_sum = 0.0;

        for record in records {
            let key = record.month_key();
            let index = match monthly.iter().position(|(month, _)| *month == key) {
                Some(i) => i,
                None => {
                    monthly.push((key, MonthlyTax::default()));
                    monthly.len() - 1
                }
            };
            let sums = &mut monthly[index].1;
            sums.cgst += record.cgst;
            sums.sgst += record.sgst;
            sums.igst += record.igst;

            amount_sum += record.amount;
        }

        // Ascending by slab
        let rate_distribution = GstRate::ALL
            .into_iter()
            .map(|rate| (rate, records.iter().filter(|r| r.gst_rate == rate).count()))
            .filter(|(_, count)| *count > 0)
            .collect();

        let report = Report {
            monthly,
            rate_distribution,
            transaction_count: records.len(),
            total_tax: total_tax(records),
            average_amount: amount_sum / records.len() as f64,
        };
        tracing::debug!(
            transactions = report.transaction_count,
            months = report.monthly.len(),
            "report built"
        );
        Some(report)
    }
}

/// Sum of every tax column across the records. Zero for an empty slice.
pub fn total_tax(records: &[InvoiceRecord]) -> f64 {
    records.iter().map(InvoiceRecord::tax).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GstRate, InvoiceDraft, TransactionType};
    use chrono::NaiveDate;

    fn record(
        date: (i32, u32, u32),
        amount: f64,
        transaction_type: TransactionType,
        gst_rate: GstRate,
    ) -> InvoiceRecord {
        InvoiceDraft {
            invoice_no: "T".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            party_name: "Party".to_string(),
            amount,
            transaction_type,
            gst_rate,
        }
        .build()
        .unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn empty_ledger_yields_no_report() {
        assert!(Report::build(&[]).is_none());
    }

    #[test]
    fn total_tax_of_empty_slice_is_zero() {
        assert_close(total_tax(&[]), 0.0);
    }

    #[test]
    fn total_tax_sums_every_column() {
        let records = vec![
            // 90 + 90 intra-state
            record((2024, 1, 10), 1000.0, TransactionType::IntraState, GstRate::Eighteen),
            // 50 igst inter-state
            record((2024, 1, 12), 1000.0, TransactionType::InterState, GstRate::Five),
        ];
        assert_close(total_tax(&records), 230.0);
    }

    #[test]
    fn monthly_breakdown_groups_by_first_appearance() {
        let records = vec![
            record((2024, 1, 15), 1000.0, TransactionType::IntraState, GstRate::Five),
            record((2024, 2, 20), 2000.0, TransactionType::IntraState, GstRate::Five),
            record((2024, 1, 31), 1000.0, TransactionType::InterState, GstRate::Twelve),
        ];
        let report = Report::build(&records).unwrap();

        let months: Vec<&str> = report.monthly.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02"]);

        let january = &report.monthly[0].1;
        assert_close(january.cgst, 25.0);
        assert_close(january.sgst, 25.0);
        assert_close(january.igst, 120.0);

        let february = &report.monthly[1].1;
        assert_close(february.cgst, 50.0);
        assert_close(february.sgst, 50.0);
        assert_close(february.igst, 0.0);
    }

    #[test]
    fn rate_distribution_counts_records_per_slab() {
        let records = vec![
            record((2024, 1, 1), 100.0, TransactionType::IntraState, GstRate::Five),
            record((2024, 1, 2), 100.0, TransactionType::InterState, GstRate::Five),
            record((2024, 1, 3), 100.0, TransactionType::IntraState, GstRate::Eighteen),
        ];
        let report = Report::build(&records).unwrap();

        assert_eq!(
            report.rate_distribution,
            vec![(GstRate::Five, 2), (GstRate::Eighteen, 1)]
        );
    }

    #[test]
    fn summary_metrics_cover_count_tax_and_mean() {
        let records = vec![
            record((2024, 3, 1), 1000.0, TransactionType::IntraState, GstRate::Eighteen),
            record((2024, 3, 2), 3000.0, TransactionType::InterState, GstRate::Eighteen),
        ];
        let report = Report::build(&records).unwrap();

        assert_eq!(report.transaction_count, 2);
        assert_close(report.total_tax, 180.0 + 540.0);
        assert_close(report.average_amount, 2000.0);
    }
}
