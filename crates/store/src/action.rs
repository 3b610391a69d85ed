use serde::{Deserialize, Serialize};

use invoicekit_core::{Action, InvoiceId};
use invoicekit_invoicing::{Invoice, InvoiceChanges, InvoiceStatus, LineItem};

/// Every state transition the invoice store understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum InvoiceAction {
    /// Append a fully-formed invoice.
    CreateInvoice(Invoice),
    /// Merge field changes and replace the line items; totals are recomputed.
    UpdateInvoice {
        id: InvoiceId,
        changes: InvoiceChanges,
        line_items: Vec<LineItem>,
    },
    UpdateInvoiceStatus {
        id: InvoiceId,
        status: InvoiceStatus,
    },
    DeleteInvoice {
        id: InvoiceId,
    },
    SetLoading(bool),
    SetError(Option<String>),
}

impl InvoiceAction {
    /// Invoice the action targets, if any.
    pub fn invoice_id(&self) -> Option<&InvoiceId> {
        match self {
            InvoiceAction::CreateInvoice(invoice) => Some(&invoice.id),
            InvoiceAction::UpdateInvoice { id, .. }
            | InvoiceAction::UpdateInvoiceStatus { id, .. }
            | InvoiceAction::DeleteInvoice { id } => Some(id),
            InvoiceAction::SetLoading(_) | InvoiceAction::SetError(_) => None,
        }
    }
}

impl Action for InvoiceAction {
    fn action_type(&self) -> &'static str {
        match self {
            InvoiceAction::CreateInvoice(_) => "invoices/createInvoice",
            InvoiceAction::UpdateInvoice { .. } => "invoices/updateInvoice",
            InvoiceAction::UpdateInvoiceStatus { .. } => "invoices/updateInvoiceStatus",
            InvoiceAction::DeleteInvoice { .. } => "invoices/deleteInvoice",
            InvoiceAction::SetLoading(_) => "invoices/setLoading",
            InvoiceAction::SetError(_) => "invoices/setError",
        }
    }
}
