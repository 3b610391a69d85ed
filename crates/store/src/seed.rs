//! Mock invoices the application starts with.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use invoicekit_core::{InvoiceId, LineItemId};
use invoicekit_invoicing::{Invoice, InvoiceStatus, LineItem, LineItemType};

use crate::state::InvoiceState;

fn at_midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn line(id: &str, kind: LineItemType, description: &str, quantity: i64, rate: i64) -> LineItem {
    LineItem::new(
        LineItemId::from(id),
        kind,
        description,
        Decimal::from(quantity),
        Decimal::from(rate),
    )
}

pub fn mock_invoices() -> Vec<Invoice> {
    let mut acme = Invoice {
        id: InvoiceId::from("1"),
        invoice_number: "INV-1".to_string(),
        client_name: "Acme Corporation".to_string(),
        client_email: "billing@acme.com".to_string(),
        client_address: "123 Business St, City, State 12345".to_string(),
        due_date: day(2024, 1, 15),
        status: InvoiceStatus::Outstanding,
        notes: Some("Payment due within 30 days".to_string()),
        payment_instructions: Some("Wire transfer to account #12345".to_string()),
        line_items: vec![
            line("1", LineItemType::Hours, "Web Development", 40, 100),
            line("2", LineItemType::Expense, "Domain Registration", 1, 15),
        ],
        subtotal: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: Decimal::ZERO,
        created_at: at_midnight(2024, 1, 1),
        updated_at: at_midnight(2024, 1, 1),
    };
    acme.recompute_totals();

    let mut tech = Invoice {
        id: InvoiceId::from("2"),
        invoice_number: "INV-2".to_string(),
        client_name: "Tech Solutions Inc".to_string(),
        client_email: "accounts@techsolutions.com".to_string(),
        client_address: "456 Tech Ave, Innovation City, State 67890".to_string(),
        due_date: day(2023, 12, 1),
        status: InvoiceStatus::Draft,
        notes: Some("Urgent payment required".to_string()),
        payment_instructions: Some("Check payable to Invoice Manager".to_string()),
        line_items: vec![
            line("3", LineItemType::Hours, "Consulting Services", 20, 150),
            line("4", LineItemType::Expense, "Software License", 1, 500),
        ],
        subtotal: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: Decimal::ZERO,
        created_at: at_midnight(2023, 11, 1),
        updated_at: at_midnight(2023, 11, 1),
    };
    tech.recompute_totals();

    vec![acme, tech]
}

pub fn seeded_state() -> InvoiceState {
    InvoiceState::with_invoices(mock_invoices())
}
