mod invoice;

pub use invoice::{GstRate, InvoiceDraft, InvoiceRecord, TransactionType, ValidationError};
