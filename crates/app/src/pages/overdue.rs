use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use invoicekit_core::{Clock, DomainError, DomainResult, InvoiceId};
use invoicekit_invoicing::{Invoice, InvoiceStatus, format_currency, format_naive_date};
use invoicekit_store::InvoiceStore;

use super::InvoiceSummary;
use crate::mailer::{EmailMessage, MailError, Mailer};

/// Narrow the overdue set by stored status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdueFilter {
    #[default]
    All,
    Late,
    Outstanding,
}

impl OverdueFilter {
    fn admits(self, invoice: &Invoice) -> bool {
        match self {
            OverdueFilter::All => true,
            OverdueFilter::Late => invoice.status == InvoiceStatus::Late,
            OverdueFilter::Outstanding => invoice.status == InvoiceStatus::Outstanding,
        }
    }
}

impl FromStr for OverdueFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(OverdueFilter::All),
            "late" => Ok(OverdueFilter::Late),
            "outstanding" => Ok(OverdueFilter::Outstanding),
            other => Err(DomainError::validation(format!(
                "unknown overdue filter '{other}' (expected all, late or outstanding)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueRow {
    #[serde(flatten)]
    pub summary: InvoiceSummary,
    pub client_email: String,
    pub days_overdue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueReport {
    pub filter: OverdueFilter,
    pub rows: Vec<OverdueRow>,
    pub total_amount: Decimal,
    pub total_display: String,
}

impl OverdueReport {
    pub fn build<C: Clock>(store: &InvoiceStore<C>, filter: OverdueFilter, currency: &str) -> Self {
        let now = store.now();
        let selected: Vec<&Invoice> = store
            .overdue_invoices()
            .into_iter()
            .filter(|invoice| filter.admits(invoice))
            .collect();

        let total_amount = selected
            .iter()
            .map(|invoice| invoice.total)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        Self {
            filter,
            rows: selected
                .iter()
                .map(|invoice| OverdueRow {
                    summary: InvoiceSummary::new(invoice, currency),
                    client_email: invoice.client_email.clone(),
                    days_overdue: invoice.days_overdue(now),
                })
                .collect(),
            total_amount,
            total_display: format_currency(total_amount, currency),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Message shown instead of the table when nothing is overdue.
    pub fn empty_message(&self) -> &'static str {
        match self.filter {
            OverdueFilter::All => "Great! No overdue invoices at the moment.",
            OverdueFilter::Late => "Great! No late invoices at the moment.",
            OverdueFilter::Outstanding => "Great! No overdue invoices at the moment.",
        }
    }
}

/// The payment reminder for one overdue invoice.
pub fn reminder_email(invoice: &Invoice, now: DateTime<Utc>, currency: &str) -> EmailMessage {
    EmailMessage {
        to: invoice.client_email.clone(),
        subject: format!("Payment Reminder - Invoice {}", invoice.invoice_number),
        body: format!(
            "Dear {name},\n\n\
             This is a friendly reminder that invoice {number} for {total} \
             is now {days} days overdue.\n\n\
             Original due date: {due}\n\n\
             Thank you for your prompt attention to this matter.",
            name = invoice.client_name,
            number = invoice.invoice_number,
            total = format_currency(invoice.total, currency),
            days = invoice.days_overdue(now),
            due = format_naive_date(invoice.due_date),
        ),
    }
}

/// Send a reminder for every invoice in the filtered overdue set.
/// Returns how many were sent; stops at the first mail failure.
pub fn send_bulk_reminders<C: Clock, M: Mailer + ?Sized>(
    store: &InvoiceStore<C>,
    mailer: &M,
    filter: OverdueFilter,
    currency: &str,
) -> Result<usize, MailError> {
    let now = store.now();
    let mut sent = 0;
    for invoice in store
        .overdue_invoices()
        .into_iter()
        .filter(|invoice| filter.admits(invoice))
    {
        mailer.send(&reminder_email(invoice, now, currency))?;
        sent += 1;
    }
    tracing::info!(sent, filter = ?filter, "bulk reminders sent");
    Ok(sent)
}

pub fn mark_as_paid<C: Clock>(store: &mut InvoiceStore<C>, id: &InvoiceId) -> DomainResult<()> {
    store.update_invoice_status(id, InvoiceStatus::Paid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use invoicekit_core::FixedClock;
    use invoicekit_invoicing::InvoiceChanges;

    use crate::mailer::SimulatedMailer;

    fn store() -> InvoiceStore<FixedClock> {
        let mut store = InvoiceStore::seeded(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap(),
        ));
        // Second seed invoice: late, due 2023-12-01.
        store
            .update_invoice_status(&InvoiceId::from("2"), InvoiceStatus::Late)
            .unwrap();
        store
    }

    #[test]
    fn all_filter_lists_every_overdue_invoice() {
        let report = OverdueReport::build(&store(), OverdueFilter::All, "INR");

        let numbers: Vec<_> = report
            .rows
            .iter()
            .map(|r| r.summary.invoice_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["INV-1", "INV-2"]);
        assert_eq!(report.rows[0].days_overdue, 6);
        assert_eq!(report.rows[1].days_overdue, 51);
        assert_eq!(report.total_amount, Decimal::from(7515));
        assert_eq!(report.total_display, "₹7,515.00");
    }

    #[test]
    fn status_filters_narrow_the_set() {
        let late = OverdueReport::build(&store(), OverdueFilter::Late, "INR");
        assert_eq!(late.rows.len(), 1);
        assert_eq!(late.rows[0].summary.id, "2");

        let outstanding = OverdueReport::build(&store(), OverdueFilter::Outstanding, "INR");
        assert_eq!(outstanding.rows.len(), 1);
        assert_eq!(outstanding.rows[0].summary.id, "1");
    }

    #[test]
    fn late_label_with_future_due_date_is_not_overdue() {
        let mut store = store();
        store
            .update_invoice(
                &InvoiceId::from("2"),
                InvoiceChanges {
                    due_date: NaiveDate::from_ymd_opt(2024, 12, 31),
                    ..InvoiceChanges::default()
                },
                vec![],
            )
            .unwrap();

        let late = OverdueReport::build(&store, OverdueFilter::Late, "INR");
        assert!(late.is_empty());
        assert_eq!(late.empty_message(), "Great! No late invoices at the moment.");
    }

    #[test]
    fn marking_paid_clears_the_report() {
        let mut store = store();
        mark_as_paid(&mut store, &InvoiceId::from("1")).unwrap();
        mark_as_paid(&mut store, &InvoiceId::from("2")).unwrap();

        let report = OverdueReport::build(&store, OverdueFilter::All, "INR");
        assert!(report.is_empty());
        assert_eq!(report.total_amount, Decimal::ZERO);
    }

    #[test]
    fn reminder_mentions_amount_and_days() {
        let store = store();
        let acme = store.invoice_by_id(&InvoiceId::from("1")).unwrap();

        let email = reminder_email(acme, store.now(), "INR");

        assert_eq!(email.subject, "Payment Reminder - Invoice INV-1");
        assert!(email.body.contains("invoice INV-1 for ₹4,015.00 is now 6 days overdue"));
        assert!(email.body.contains("Original due date: Jan 15, 2024"));
    }

    #[test]
    fn bulk_reminders_go_to_every_filtered_client() {
        let store = store();
        let mailer = SimulatedMailer::new();

        let sent = send_bulk_reminders(&store, &mailer, OverdueFilter::All, "INR").unwrap();

        assert_eq!(sent, 2);
        let to: Vec<_> = mailer.sent().unwrap().into_iter().map(|m| m.to).collect();
        assert_eq!(to, vec!["billing@acme.com", "accounts@techsolutions.com"]);
    }

    #[test]
    fn filter_parses_from_cli_text() {
        assert_eq!("LATE".parse::<OverdueFilter>().unwrap(), OverdueFilter::Late);
        assert!("paid".parse::<OverdueFilter>().is_err());
    }
}
