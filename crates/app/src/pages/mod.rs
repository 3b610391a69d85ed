//! View-models for each page: plain data computed from the store, ready to
//! render as a table or serialize as JSON.

pub mod dashboard;
pub mod detail;
pub mod form;
pub mod overdue;

use serde::Serialize;

use invoicekit_invoicing::{
    Invoice, InvoiceStatus, StatusColor, format_currency, format_naive_date, status_color,
};

/// One invoice as shown in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub due_date: String,
    pub total: String,
    pub status: InvoiceStatus,
    pub status_color: StatusColor,
}

impl InvoiceSummary {
    pub fn new(invoice: &Invoice, currency: &str) -> Self {
        Self {
            id: invoice.id.to_string(),
            invoice_number: invoice.invoice_number.clone(),
            client_name: invoice.client_name.clone(),
            due_date: format_naive_date(invoice.due_date),
            total: format_currency(invoice.total, currency),
            status: invoice.status,
            status_color: status_color(invoice.status),
        }
    }
}
