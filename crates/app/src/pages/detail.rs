use chrono::{DateTime, Utc};
use serde::Serialize;

use invoicekit_invoicing::{
    Invoice, InvoiceStatus, StatusColor, format_currency, format_naive_date, status_color,
};

use crate::mailer::{EmailMessage, MailError, Mailer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub kind: &'static str,
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

/// Everything the single-invoice page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    pub id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_address: String,
    pub created: String,
    pub due: String,
    pub status: InvoiceStatus,
    pub status_color: StatusColor,
    pub overdue: bool,
    pub days_overdue: i64,
    pub notes: Option<String>,
    pub payment_instructions: Option<String>,
    pub line_items: Vec<LineItemView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl InvoiceDetail {
    pub fn build(invoice: &Invoice, now: DateTime<Utc>, currency: &str) -> Self {
        let overdue = invoice.is_overdue(now);

        Self {
            id: invoice.id.to_string(),
            invoice_number: invoice.invoice_number.clone(),
            client_name: invoice.client_name.clone(),
            client_email: invoice.client_email.clone(),
            client_address: invoice.client_address.clone(),
            created: format_naive_date(invoice.created_at.date_naive()),
            due: format_naive_date(invoice.due_date),
            status: invoice.status,
            status_color: status_color(invoice.status),
            overdue,
            days_overdue: if overdue { invoice.days_overdue(now) } else { 0 },
            notes: invoice.notes.clone(),
            payment_instructions: invoice.payment_instructions.clone(),
            line_items: invoice
                .line_items
                .iter()
                .map(|item| LineItemView {
                    kind: item.kind.label(),
                    description: item.description.clone(),
                    quantity: item.quantity.normalize().to_string(),
                    rate: format_currency(item.rate, currency),
                    amount: format_currency(item.amount(), currency),
                })
                .collect(),
            subtotal: format_currency(invoice.subtotal, currency),
            tax: format_currency(invoice.tax, currency),
            total: format_currency(invoice.total, currency),
        }
    }
}

/// The "send invoice" email, pre-filled for the client.
pub fn invoice_email(invoice: &Invoice, currency: &str) -> EmailMessage {
    let instructions = invoice.payment_instructions.as_deref().unwrap_or_default();

    EmailMessage {
        to: invoice.client_email.clone(),
        subject: format!("Invoice {}", invoice.invoice_number),
        body: format!(
            "Dear {name},\n\n\
             Please find attached your invoice {number} for {total}.\n\n\
             Due Date: {due}\n\n\
             {instructions}\n\n\
             Thank you for your business!\n\n\
             Best regards,\n\
             Your Company",
            name = invoice.client_name,
            number = invoice.invoice_number,
            total = format_currency(invoice.total, currency),
            due = format_naive_date(invoice.due_date),
        ),
    }
}

pub fn send_invoice<M: Mailer + ?Sized>(
    mailer: &M,
    invoice: &Invoice,
    currency: &str,
) -> Result<(), MailError> {
    mailer.send(&invoice_email(invoice, currency))
}
