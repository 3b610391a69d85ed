//! Create/edit invoice forms.
//!
//! Form fields hold raw text as typed. Validation turns a form into an
//! [`InvoiceDraft`]; the running total shown while typing uses permissive
//! parsing and never fails.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use invoicekit_core::{Clock, DomainError, InvoiceId, LineItemId};
use invoicekit_invoicing::{
    Invoice, InvoiceChanges, InvoiceDraft, LineItem, LineItemType, line_item_amount_from_text,
    parse_amount,
};
use invoicekit_store::InvoiceStore;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+$").expect("email pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemForm {
    /// Set when editing an existing line so its identity is kept.
    pub id: Option<LineItemId>,
    #[serde(rename = "type")]
    pub kind: LineItemType,
    pub description: String,
    pub quantity: String,
    pub rate: String,
}

impl Default for LineItemForm {
    fn default() -> Self {
        Self {
            id: None,
            kind: LineItemType::Hours,
            description: String::new(),
            quantity: "1".to_string(),
            rate: "0".to_string(),
        }
    }
}

impl LineItemForm {
    pub fn amount(&self) -> Decimal {
        line_item_amount_from_text(&self.quantity, &self.rate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub client_name: String,
    pub client_email: String,
    pub client_address: String,
    pub due_date: String,
    pub notes: String,
    pub payment_instructions: String,
    pub line_items: Vec<LineItemForm>,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            client_email: String::new(),
            client_address: String::new(),
            due_date: String::new(),
            notes: String::new(),
            payment_instructions: String::new(),
            line_items: vec![LineItemForm::default()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    ClientName,
    ClientEmail,
    ClientAddress,
    DueDate,
    LineItems,
    Description(usize),
    Quantity(usize),
    Rate(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Due date must be a date (YYYY-MM-DD)")]
    InvalidDate,
    #[error("{0} must be positive")]
    Negative(&'static str),
    #[error("At least one line item is required")]
    NoLineItems,
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Default)]
#[error("{} field(s) need attention", .errors.len())]
pub struct FormErrors {
    pub errors: Vec<(FormField, FieldError)>,
}

impl FormErrors {
    fn push(&mut self, field: FormField, error: FieldError) {
        self.errors.push((field, error));
    }

    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, error)| error)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error("Failed to save invoice. Please try again.")]
    Store(#[from] DomainError),
}

fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(text: &str, field: FormField, label: &'static str, errors: &mut FormErrors) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.push(field, FieldError::Required(label));
    }
    trimmed.to_string()
}

impl InvoiceForm {
    /// Pre-fill from an existing invoice (edit page).
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let line_items = if invoice.line_items.is_empty() {
            vec![LineItemForm::default()]
        } else {
            invoice
                .line_items
                .iter()
                .map(|item| LineItemForm {
                    id: Some(item.id.clone()),
                    kind: item.kind,
                    description: item.description.clone(),
                    quantity: item.quantity.normalize().to_string(),
                    rate: item.rate.normalize().to_string(),
                })
                .collect()
        };

        Self {
            client_name: invoice.client_name.clone(),
            client_email: invoice.client_email.clone(),
            client_address: invoice.client_address.clone(),
            due_date: invoice.due_date.format("%Y-%m-%d").to_string(),
            notes: invoice.notes.clone().unwrap_or_default(),
            payment_instructions: invoice.payment_instructions.clone().unwrap_or_default(),
            line_items,
        }
    }

    pub fn add_line_item(&mut self) {
        self.line_items.push(LineItemForm::default());
    }

    /// Remove a line; the last remaining line cannot be removed.
    pub fn remove_line_item(&mut self, index: usize) -> bool {
        if self.line_items.len() <= 1 || index >= self.line_items.len() {
            return false;
        }
        self.line_items.remove(index);
        true
    }

    /// Running total while typing.
    pub fn preview_total(&self) -> Decimal {
        self.line_items
            .iter()
            .map(LineItemForm::amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn validate(&self) -> Result<InvoiceDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let client_name = required(
            &self.client_name,
            FormField::ClientName,
            "Client name",
            &mut errors,
        );
        let client_email = required(
            &self.client_email,
            FormField::ClientEmail,
            "Client email",
            &mut errors,
        );
        if !client_email.is_empty() && !EMAIL.is_match(&client_email) {
            errors.push(FormField::ClientEmail, FieldError::InvalidEmail);
        }
        let client_address = required(
            &self.client_address,
            FormField::ClientAddress,
            "Client address",
            &mut errors,
        );

        let due_text = required(&self.due_date, FormField::DueDate, "Due date", &mut errors);
        let due_date = if due_text.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(&due_text, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FormField::DueDate, FieldError::InvalidDate);
                    None
                }
            }
        };

        if self.line_items.is_empty() {
            errors.push(FormField::LineItems, FieldError::NoLineItems);
        }

        let mut line_items = Vec::with_capacity(self.line_items.len());
        for (index, line) in self.line_items.iter().enumerate() {
            let description = required(
                &line.description,
                FormField::Description(index),
                "Description",
                &mut errors,
            );
            let quantity = validate_number(
                &line.quantity,
                FormField::Quantity(index),
                "Quantity",
                &mut errors,
            );
            let rate = validate_number(&line.rate, FormField::Rate(index), "Rate", &mut errors);

            line_items.push(LineItem::new(
                line.id.clone().unwrap_or_else(LineItemId::generate),
                line.kind,
                description,
                quantity,
                rate,
            ));
        }

        match due_date {
            Some(due_date) if errors.is_empty() => Ok(InvoiceDraft {
                client_name,
                client_email,
                client_address,
                due_date,
                notes: optional(&self.notes),
                payment_instructions: optional(&self.payment_instructions),
                line_items,
            }),
            _ => Err(errors),
        }
    }
}

fn validate_number(
    text: &str,
    field: FormField,
    label: &'static str,
    errors: &mut FormErrors,
) -> Decimal {
    if text.trim().is_empty() {
        errors.push(field, FieldError::Required(label));
        return Decimal::ZERO;
    }
    let value = parse_amount(text);
    if value < Decimal::ZERO {
        errors.push(field, FieldError::Negative(label));
        return Decimal::ZERO;
    }
    value
}

/// Validate and append a new draft invoice. Returns the new invoice's id.
pub fn submit_create<C: Clock>(
    store: &mut InvoiceStore<C>,
    form: &InvoiceForm,
) -> Result<InvoiceId, SubmitError> {
    let draft = form.validate()?;
    let invoice = Invoice::from_draft(
        InvoiceId::generate(),
        store.next_invoice_number()?,
        draft,
        store.now(),
    );
    let id = invoice.id.clone();

    store.create_invoice(invoice)?;
    tracing::info!(invoice_id = %id, "invoice created");
    Ok(id)
}

/// Validate and overwrite an existing invoice's fields and line items.
pub fn submit_edit<C: Clock>(
    store: &mut InvoiceStore<C>,
    id: &InvoiceId,
    form: &InvoiceForm,
) -> Result<(), SubmitError> {
    let draft = form.validate()?;
    store.update_invoice(id, InvoiceChanges::from_draft(&draft), draft.line_items)?;
    tracing::info!(invoice_id = %id, "invoice updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use invoicekit_core::FixedClock;
    use invoicekit_invoicing::InvoiceStatus;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap())
    }

    fn filled_form() -> InvoiceForm {
        InvoiceForm {
            client_name: "Initech".to_string(),
            client_email: "billing@initech.test".to_string(),
            client_address: "4120 Freidrich Ln".to_string(),
            due_date: "2024-07-01".to_string(),
            notes: "  ".to_string(),
            payment_instructions: "Net 30".to_string(),
            line_items: vec![
                LineItemForm {
                    description: "TPS report review".to_string(),
                    quantity: "40".to_string(),
                    rate: "100".to_string(),
                    ..LineItemForm::default()
                },
                LineItemForm {
                    kind: LineItemType::Expense,
                    description: "Cover sheets".to_string(),
                    quantity: "1".to_string(),
                    rate: "15".to_string(),
                    ..LineItemForm::default()
                },
            ],
        }
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = InvoiceForm::default().validate().unwrap_err();

        assert_eq!(
            errors.get(FormField::ClientName),
            Some(&FieldError::Required("Client name"))
        );
        assert!(errors.get(FormField::ClientEmail).is_some());
        assert!(errors.get(FormField::ClientAddress).is_some());
        assert!(errors.get(FormField::DueDate).is_some());
        assert!(errors.get(FormField::Description(0)).is_some());
    }

    #[test]
    fn malformed_email_and_date_are_flagged() {
        let mut form = filled_form();
        form.client_email = "not an email".to_string();
        form.due_date = "07/01/2024".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::ClientEmail), Some(&FieldError::InvalidEmail));
        assert_eq!(errors.get(FormField::DueDate), Some(&FieldError::InvalidDate));
    }

    #[test]
    fn negative_rate_is_rejected() {
        let mut form = filled_form();
        form.line_items[1].rate = "-15".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Rate(1)), Some(&FieldError::Negative("Rate")));
    }

    #[test]
    fn preview_total_is_permissive() {
        let mut form = filled_form();
        assert_eq!(form.preview_total(), Decimal::from(4015));

        form.line_items[0].quantity = "forty".to_string();
        assert_eq!(form.preview_total(), Decimal::from(15));

        form.line_items[0].quantity = "4e1".to_string();
        assert_eq!(form.preview_total(), Decimal::from(4015));
    }

    #[test]
    fn last_line_item_cannot_be_removed() {
        let mut form = InvoiceForm::default();
        assert!(!form.remove_line_item(0));
        form.add_line_item();
        assert!(form.remove_line_item(0));
        assert_eq!(form.line_items.len(), 1);
    }

    #[test]
    fn submit_create_appends_a_numbered_draft() {
        let mut store = InvoiceStore::seeded(clock());

        let id = submit_create(&mut store, &filled_form()).unwrap();

        let created = store.invoice_by_id(&id).unwrap();
        assert_eq!(created.invoice_number, "INV-3");
        assert_eq!(created.status, InvoiceStatus::Draft);
        assert_eq!(created.total, Decimal::from(4015));
        assert_eq!(created.notes, None);
        assert_eq!(created.payment_instructions.as_deref(), Some("Net 30"));
        assert_eq!(created.created_at, clock().0);
        assert_eq!(store.all_invoices().len(), 3);
    }

    #[test]
    fn invalid_submit_leaves_store_untouched() {
        let mut store = InvoiceStore::seeded(clock());
        let err = submit_create(&mut store, &InvoiceForm::default()).unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(store.all_invoices().len(), 2);
    }

    #[test]
    fn exhausted_numbering_is_a_store_error() {
        let mut store = InvoiceStore::seeded(clock());
        let last = Invoice::from_draft(
            InvoiceId::from("last"),
            format!("INV-{}", u64::MAX),
            filled_form().validate().unwrap(),
            clock().0,
        );
        store.create_invoice(last).unwrap();

        let err = submit_create(&mut store, &filled_form()).unwrap_err();

        assert!(matches!(err, SubmitError::Store(DomainError::Conflict(_))));
        assert_eq!(store.all_invoices().len(), 3);
    }

    #[test]
    fn edit_round_trip_keeps_line_ids_and_recomputes_total() {
        let mut store = InvoiceStore::seeded(clock());
        let id = InvoiceId::from("2");
        let original = store.invoice_by_id(&id).unwrap().clone();

        let mut form = InvoiceForm::from_invoice(&original);
        assert_eq!(form.due_date, "2023-12-01");
        assert_eq!(form.line_items[0].quantity, "20");
        form.line_items[0].quantity = "2".to_string();
        form.line_items[0].rate = "50".to_string();
        form.line_items.truncate(1);

        submit_edit(&mut store, &id, &form).unwrap();

        let updated = store.invoice_by_id(&id).unwrap();
        assert_eq!(updated.total, Decimal::from(100));
        assert_eq!(updated.line_items[0].id, original.line_items[0].id);
        assert_eq!(updated.status, original.status);
        assert_eq!(updated.updated_at, clock().0);
    }

    #[test]
    fn editing_a_deleted_invoice_is_a_store_error() {
        let mut store = InvoiceStore::seeded(clock());
        let err = submit_edit(&mut store, &InvoiceId::from("99"), &filled_form()).unwrap_err();

        assert!(matches!(err, SubmitError::Store(DomainError::NotFound(_))));
        assert_eq!(err.to_string(), "Failed to save invoice. Please try again.");
    }
}
