use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoicekit_core::{DomainError, Entity, InvoiceId, LineItemId};

use crate::overdue;
use crate::status::InvoiceStatus;
use crate::totals;

const INVOICE_NUMBER_PREFIX: &str = "INV-";

/// Kind of billable work on a line item. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemType {
    #[default]
    Hours,
    Expense,
    Material,
    Labor,
}

impl LineItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            LineItemType::Hours => "hours",
            LineItemType::Expense => "expense",
            LineItemType::Material => "material",
            LineItemType::Labor => "labor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineItemType::Hours => "Hours",
            LineItemType::Expense => "Expense",
            LineItemType::Material => "Material",
            LineItemType::Labor => "Labor",
        }
    }
}

impl core::fmt::Display for LineItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineItemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hours" => Ok(LineItemType::Hours),
            "expense" => Ok(LineItemType::Expense),
            "material" => Ok(LineItemType::Material),
            "labor" => Ok(LineItemType::Labor),
            other => Err(DomainError::validation(format!(
                "unknown line item type '{other}'"
            ))),
        }
    }
}

/// One billable component of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    #[serde(rename = "type")]
    pub kind: LineItemType,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

impl LineItem {
    pub fn new(
        id: LineItemId,
        kind: LineItemType,
        description: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            id,
            kind,
            description: description.into(),
            quantity,
            rate,
        }
    }

    pub fn amount(&self) -> Decimal {
        totals::line_item_amount(self.quantity, self.rate)
    }
}

/// Everything a caller supplies to create an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub client_name: String,
    pub client_email: String,
    pub client_address: String,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub payment_instructions: Option<String>,
    pub line_items: Vec<LineItem>,
}

/// Partial field update. `None` leaves a field untouched; for the optional
/// text fields `Some(None)` clears them. In JSON an absent key leaves the field
/// alone and `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceChanges {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "clearable")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "clearable")]
    pub payment_instructions: Option<Option<String>>,
}

/// Serde adapter for `Option<Option<T>>` where a present `null` is `Some(None)`.
/// Pair with `default` and `skip_serializing_if = "Option::is_none"`.
mod clearable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

impl InvoiceChanges {
    /// Changes that overwrite every editable field with the draft's values.
    pub fn from_draft(draft: &InvoiceDraft) -> Self {
        Self {
            client_name: Some(draft.client_name.clone()),
            client_email: Some(draft.client_email.clone()),
            client_address: Some(draft.client_address.clone()),
            due_date: Some(draft.due_date),
            status: None,
            notes: Some(draft.notes.clone()),
            payment_instructions: Some(draft.payment_instructions.clone()),
        }
    }
}

/// A billable record issued to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_address: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub payment_instructions: Option<String>,
    pub line_items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Build a new draft invoice with computed totals.
    pub fn from_draft(
        id: InvoiceId,
        invoice_number: impl Into<String>,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> Self {
        let mut invoice = Self {
            id,
            invoice_number: invoice_number.into(),
            client_name: draft.client_name,
            client_email: draft.client_email,
            client_address: draft.client_address,
            due_date: draft.due_date,
            status: InvoiceStatus::Draft,
            notes: draft.notes,
            payment_instructions: draft.payment_instructions,
            line_items: draft.line_items,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };
        invoice.recompute_totals();
        invoice
    }

    /// Invariant: `total == subtotal == Σ quantity × rate`, `tax == 0`.
    pub fn recompute_totals(&mut self) {
        let totals = totals::invoice_totals(&self.line_items);
        self.subtotal = totals.subtotal;
        self.tax = totals.tax;
        self.total = totals.total;
    }

    /// Merge `changes` into the record. Totals are not touched here.
    pub fn apply_changes(&mut self, changes: &InvoiceChanges) {
        if let Some(name) = &changes.client_name {
            self.client_name = name.clone();
        }
        if let Some(email) = &changes.client_email {
            self.client_email = email.clone();
        }
        if let Some(address) = &changes.client_address {
            self.client_address = address.clone();
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(notes) = &changes.notes {
            self.notes = notes.clone();
        }
        if let Some(instructions) = &changes.payment_instructions {
            self.payment_instructions = instructions.clone();
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        overdue::is_overdue(self.due_date, self.status, now)
    }

    pub fn days_overdue(&self, now: DateTime<Utc>) -> i64 {
        overdue::days_overdue(self.due_date, now)
    }

    /// Numeric suffix of an `INV-<n>` invoice number.
    pub fn sequence_number(&self) -> Option<u64> {
        self.invoice_number
            .strip_prefix(INVOICE_NUMBER_PREFIX)
            .and_then(|n| n.parse().ok())
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Display label for the invoice at sequence position `sequence`.
pub fn invoice_number(sequence: u64) -> String {
    format!("{INVOICE_NUMBER_PREFIX}{sequence}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn draft(lines: Vec<LineItem>) -> InvoiceDraft {
        InvoiceDraft {
            client_name: "Acme Corporation".to_string(),
            client_email: "billing@acme.com".to_string(),
            client_address: "123 Business St".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            notes: Some("Payment due within 30 days".to_string()),
            payment_instructions: None,
            line_items: lines,
        }
    }

    fn line(quantity: i64, rate: i64) -> LineItem {
        LineItem::new(
            LineItemId::generate(),
            LineItemType::Hours,
            "Web Development",
            Decimal::from(quantity),
            Decimal::from(rate),
        )
    }

    #[test]
    fn from_draft_starts_as_draft_with_totals() {
        let invoice = Invoice::from_draft(
            InvoiceId::from("1"),
            invoice_number(1),
            draft(vec![line(40, 100), line(1, 15)]),
            test_time(),
        );

        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.invoice_number, "INV-1");
        assert_eq!(invoice.total, Decimal::from(4015));
        assert_eq!(invoice.subtotal, invoice.total);
        assert_eq!(invoice.created_at, invoice.updated_at);
        assert_eq!(invoice.sequence_number(), Some(1));
    }

    #[test]
    fn apply_changes_only_touches_given_fields() {
        let mut invoice =
            Invoice::from_draft(InvoiceId::from("1"), "INV-1", draft(vec![]), test_time());

        invoice.apply_changes(&InvoiceChanges {
            client_name: Some("Acme Ltd".to_string()),
            notes: Some(None),
            ..InvoiceChanges::default()
        });

        assert_eq!(invoice.client_name, "Acme Ltd");
        assert_eq!(invoice.client_email, "billing@acme.com");
        assert_eq!(invoice.notes, None);
    }

    #[test]
    fn changes_json_distinguishes_absent_from_null() {
        let clear: InvoiceChanges = serde_json::from_str(r#"{"notes":null}"#).unwrap();
        assert_eq!(clear.notes, Some(None));
        assert_eq!(clear.payment_instructions, None);

        let set: InvoiceChanges =
            serde_json::from_str(r#"{"paymentInstructions":"Net 15"}"#).unwrap();
        assert_eq!(set.payment_instructions, Some(Some("Net 15".to_string())));
        assert_eq!(set.notes, None);

        let json = serde_json::to_value(&clear).unwrap();
        assert_eq!(json["notes"], serde_json::Value::Null);
        assert!(json.as_object().unwrap().contains_key("notes"));
        assert!(!json.as_object().unwrap().contains_key("paymentInstructions"));
        assert_eq!(serde_json::from_value::<InvoiceChanges>(json).unwrap(), clear);
    }

    #[test]
    fn foreign_invoice_numbers_have_no_sequence() {
        let invoice =
            Invoice::from_draft(InvoiceId::from("9"), "2024/009", draft(vec![]), test_time());
        assert_eq!(invoice.sequence_number(), None);
    }

    #[test]
    fn serializes_with_original_field_names() {
        let invoice = Invoice::from_draft(
            InvoiceId::from("1"),
            "INV-1",
            draft(vec![line(2, 50)]),
            test_time(),
        );
        let json = serde_json::to_value(&invoice).unwrap();

        assert_eq!(json["invoiceNumber"], "INV-1");
        assert_eq!(json["dueDate"], "2024-01-15");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["lineItems"][0]["type"], "hours");
        assert_eq!(json["total"], 100.0);
    }

    #[test]
    fn line_item_type_parses_case_insensitively() {
        assert_eq!("Labor".parse::<LineItemType>().unwrap(), LineItemType::Labor);
        assert!("services".parse::<LineItemType>().is_err());
    }
}
