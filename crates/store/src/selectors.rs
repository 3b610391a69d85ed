//! Read-only views over [`InvoiceState`]. Each selector takes the state
//! explicitly; nothing here mutates.

use chrono::{DateTime, Utc};

use invoicekit_core::{DomainError, DomainResult, InvoiceId};
use invoicekit_invoicing::{Invoice, is_past_due};

use crate::state::InvoiceState;

/// All invoices, insertion order.
pub fn select_all_invoices(state: &InvoiceState) -> &[Invoice] {
    &state.invoices
}

pub fn select_invoice_by_id<'a>(state: &'a InvoiceState, id: &InvoiceId) -> Option<&'a Invoice> {
    state.invoices.iter().find(|invoice| &invoice.id == id)
}

/// Invoices still owed (outstanding or late) whose due date has passed.
///
/// A `late` invoice with a future due date is not included: the label alone
/// does not make an invoice overdue.
pub fn select_overdue_invoices(state: &InvoiceState, now: DateTime<Utc>) -> Vec<&Invoice> {
    state
        .invoices
        .iter()
        .filter(|invoice| invoice.status.is_collectible() && is_past_due(invoice.due_date, now))
        .collect()
}

pub fn select_invoices_loading(state: &InvoiceState) -> bool {
    state.loading
}

pub fn select_invoices_error(state: &InvoiceState) -> Option<&str> {
    state.error.as_deref()
}

/// Sequence position for the next invoice number.
///
/// One past the highest `INV-<n>` in the collection, so numbers are not reused
/// after a deletion; `len + 1` when no invoice carries a numbered label.
/// Fails once the highest number is `u64::MAX`.
pub fn next_invoice_sequence(state: &InvoiceState) -> DomainResult<u64> {
    let len = state.invoices.len() as u64;
    state
        .invoices
        .iter()
        .filter_map(Invoice::sequence_number)
        .max()
        .map_or(len, |highest| highest.max(len))
        .checked_add(1)
        .ok_or_else(|| DomainError::conflict("invoice number sequence exhausted"))
}
