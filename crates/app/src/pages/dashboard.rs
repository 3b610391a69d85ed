use rust_decimal::Decimal;
use serde::Serialize;

use invoicekit_core::Clock;
use invoicekit_invoicing::{Invoice, InvoiceStatus, format_currency};
use invoicekit_store::InvoiceStore;

use super::InvoiceSummary;

/// Headline figures plus the most recently created invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Owed on outstanding and late invoices.
    pub total_outstanding: Decimal,
    pub outstanding_count: usize,
    pub overdue_count: usize,
    pub overdue_amount: Decimal,
    pub paid_total: Decimal,
    pub paid_count: usize,
    pub draft_count: usize,
    pub recent: Vec<InvoiceSummary>,
    #[serde(skip)]
    currency: String,
}

fn sum_totals<'a>(invoices: impl Iterator<Item = &'a Invoice>) -> Decimal {
    invoices
        .map(|invoice| invoice.total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

impl Dashboard {
    pub fn build<C: Clock>(store: &InvoiceStore<C>, currency: &str, recent_limit: usize) -> Self {
        let invoices = store.all_invoices();
        let collectible = || invoices.iter().filter(|i| i.status.is_collectible());
        let paid = || invoices.iter().filter(|i| i.status == InvoiceStatus::Paid);
        let overdue = store.overdue_invoices();

        let mut by_recency: Vec<&Invoice> = invoices.iter().collect();
        by_recency.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            total_outstanding: sum_totals(collectible()),
            outstanding_count: collectible().count(),
            overdue_count: overdue.len(),
            overdue_amount: sum_totals(overdue.iter().copied()),
            paid_total: sum_totals(paid()),
            paid_count: paid().count(),
            draft_count: invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Draft)
                .count(),
            recent: by_recency
                .into_iter()
                .take(recent_limit)
                .map(|invoice| InvoiceSummary::new(invoice, currency))
                .collect(),
            currency: currency.to_string(),
        }
    }

    /// `(label, value)` pairs for the summary cards.
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Total Outstanding",
                format!(
                    "{} ({} invoices)",
                    format_currency(self.total_outstanding, &self.currency),
                    self.outstanding_count
                ),
            ),
            (
                "Overdue",
                format!(
                    "{} invoices, {}",
                    self.overdue_count,
                    format_currency(self.overdue_amount, &self.currency)
                ),
            ),
            (
                "Paid",
                format!(
                    "{} ({} invoices)",
                    format_currency(self.paid_total, &self.currency),
                    self.paid_count
                ),
            ),
            ("Drafts", self.draft_count.to_string()),
        ]
    }
}
