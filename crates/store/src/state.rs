use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoicekit_core::{DomainError, DomainResult, InvoiceId, Reducer, entity};
use invoicekit_invoicing::{Invoice, InvoiceChanges, InvoiceStatus, LineItem};

use crate::action::InvoiceAction;

/// The whole invoice state: records in insertion order plus UI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceState {
    pub(crate) invoices: Vec<Invoice>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
}

impl InvoiceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invoices(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    fn index_of(&self, id: &InvoiceId) -> DomainResult<usize> {
        entity::position_of(&self.invoices, id).ok_or_else(|| DomainError::not_found(id))
    }

    fn create(&mut self, invoice: &Invoice) -> DomainResult<()> {
        check_line_items(&invoice.line_items)?;
        if entity::position_of(&self.invoices, &invoice.id).is_some() {
            return Err(DomainError::conflict(format!(
                "invoice {} already exists",
                invoice.id
            )));
        }

        let mut invoice = invoice.clone();
        invoice.recompute_totals();
        self.invoices.push(invoice);
        Ok(())
    }

    fn update(
        &mut self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
        line_items: &[LineItem],
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let index = self.index_of(id)?;
        check_line_items(line_items)?;
        let invoice = &mut self.invoices[index];

        invoice.apply_changes(changes);
        invoice.line_items = line_items.to_vec();
        invoice.recompute_totals();
        invoice.updated_at = now;
        Ok(())
    }

    fn update_status(
        &mut self,
        id: &InvoiceId,
        status: InvoiceStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let index = self.index_of(id)?;
        let invoice = &mut self.invoices[index];

        invoice.status = status;
        invoice.updated_at = now;
        Ok(())
    }

    fn delete(&mut self, id: &InvoiceId) -> DomainResult<()> {
        let index = self.index_of(id)?;
        self.invoices.remove(index);
        Ok(())
    }
}

/// Stored totals are the plain sum of `quantity × rate`, so negative inputs are
/// rejected here rather than clamped.
fn check_line_items(line_items: &[LineItem]) -> DomainResult<()> {
    match line_items
        .iter()
        .find(|line| line.quantity < Decimal::ZERO || line.rate < Decimal::ZERO)
    {
        Some(line) => Err(DomainError::validation(format!(
            "line item {} has a negative quantity or rate",
            line.id
        ))),
        None => Ok(()),
    }
}

impl Reducer for InvoiceState {
    type Action = InvoiceAction;
    type Error = DomainError;

    fn reduce(&mut self, action: &Self::Action, now: DateTime<Utc>) -> Result<(), Self::Error> {
        match action {
            InvoiceAction::CreateInvoice(invoice) => self.create(invoice),
            InvoiceAction::UpdateInvoice {
                id,
                changes,
                line_items,
            } => self.update(id, changes, line_items, now),
            InvoiceAction::UpdateInvoiceStatus { id, status } => {
                self.update_status(id, *status, now)
            }
            InvoiceAction::DeleteInvoice { id } => self.delete(id),
            InvoiceAction::SetLoading(loading) => {
                self.loading = *loading;
                Ok(())
            }
            InvoiceAction::SetError(error) => {
                self.error = error.clone();
                Ok(())
            }
        }
    }
}
