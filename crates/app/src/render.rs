//! Terminal rendering of the page view-models.

use comfy_table::{Attribute, Cell, Color, Table};

use invoicekit_invoicing::StatusColor;

use crate::pages::InvoiceSummary;
use crate::pages::dashboard::Dashboard;
use crate::pages::detail::InvoiceDetail;
use crate::pages::overdue::OverdueReport;

fn status_cell(label: &str, color: StatusColor) -> Cell {
    let cell = Cell::new(label);
    match color {
        StatusColor::Success => cell.fg(Color::Green),
        StatusColor::Warning => cell.fg(Color::Yellow),
        StatusColor::Error => cell.fg(Color::Red),
        StatusColor::Neutral => cell,
    }
}

pub fn invoice_table(rows: &[InvoiceSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Invoice", "Client", "Due", "Total", "Status"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.invoice_number),
            Cell::new(&row.client_name),
            Cell::new(&row.due_date),
            Cell::new(&row.total),
            status_cell(row.status.label(), row.status_color),
        ]);
    }
    table
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut cards = Table::new();
    for (label, value) in dashboard.cards() {
        cards.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }

    if dashboard.recent.is_empty() {
        return format!("{cards}\n\nNo invoices yet.");
    }
    format!("{cards}\n\nRecent Invoices\n{}", invoice_table(&dashboard.recent))
}

pub fn detail(detail: &InvoiceDetail) -> String {
    let mut header = Table::new();
    let mut fields = vec![
        ("Invoice", detail.invoice_number.clone()),
        ("Client", detail.client_name.clone()),
        ("Email", detail.client_email.clone()),
        ("Address", detail.client_address.clone()),
        ("Created", detail.created.clone()),
        ("Due Date", detail.due.clone()),
    ];
    if detail.overdue {
        fields.push(("Overdue", format!("{} days", detail.days_overdue)));
    }
    if let Some(notes) = &detail.notes {
        fields.push(("Notes", notes.clone()));
    }
    if let Some(instructions) = &detail.payment_instructions {
        fields.push(("Payment", instructions.clone()));
    }
    for (label, value) in fields {
        header.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    header.add_row(vec![
        Cell::new("Status").add_attribute(Attribute::Bold),
        status_cell(detail.status.label(), detail.status_color),
    ]);

    let mut lines = Table::new();
    lines.set_header(vec!["Type", "Description", "Qty", "Rate", "Amount"]);
    for line in &detail.line_items {
        lines.add_row(vec![
            Cell::new(line.kind),
            Cell::new(&line.description),
            Cell::new(&line.quantity),
            Cell::new(&line.rate),
            Cell::new(&line.amount),
        ]);
    }
    lines.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(&detail.total).add_attribute(Attribute::Bold),
    ]);

    format!("{header}\n\n{lines}")
}

pub fn overdue(report: &OverdueReport) -> String {
    if report.is_empty() {
        return report.empty_message().to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Invoice", "Client", "Email", "Due", "Days Overdue", "Total", "Status"]);
    for row in &report.rows {
        table.add_row(vec![
            Cell::new(&row.summary.invoice_number),
            Cell::new(&row.summary.client_name),
            Cell::new(&row.client_email),
            Cell::new(&row.summary.due_date),
            Cell::new(row.days_overdue).fg(Color::Red),
            Cell::new(&row.summary.total),
            status_cell(row.summary.status.label(), row.summary.status_color),
        ]);
    }

    format!(
        "{table}\n\nTotal overdue: {} across {} invoices",
        report.total_display,
        report.rows.len()
    )
}
