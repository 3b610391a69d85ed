//! Invoicing domain module.
//!
//! The invoice data model plus pure derivation helpers: line-item amounts and
//! totals, overdue computation, status colours and display formatting. No IO,
//! no state.

pub mod format;
pub mod invoice;
pub mod overdue;
pub mod status;
pub mod totals;

pub use format::{DEFAULT_CURRENCY, format_currency, format_date, format_naive_date};
pub use invoice::{
    Invoice, InvoiceChanges, InvoiceDraft, LineItem, LineItemType, invoice_number,
};
pub use overdue::{days_overdue, is_overdue, is_past_due};
pub use status::{InvoiceStatus, StatusColor, status_color, status_color_for};
pub use totals::{
    InvoiceTotals, invoice_totals, line_item_amount, line_item_amount_from_text, parse_amount,
};
