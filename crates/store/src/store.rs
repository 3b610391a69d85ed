use chrono::{DateTime, Utc};

use invoicekit_core::{Action, Clock, DomainResult, InvoiceId, Reducer, SystemClock};
use invoicekit_invoicing::{Invoice, InvoiceChanges, InvoiceStatus, LineItem, invoice_number};

use crate::action::InvoiceAction;
use crate::selectors;
use crate::state::InvoiceState;

/// Explicit state container: owns an [`InvoiceState`] and the clock used to
/// stamp mutations. Consumers receive it by reference; there is no global.
#[derive(Debug, Clone)]
pub struct InvoiceStore<C = SystemClock> {
    state: InvoiceState,
    clock: C,
}

impl InvoiceStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(InvoiceState::new(), SystemClock)
    }
}

impl Default for InvoiceStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InvoiceStore<C> {
    pub fn with_clock(state: InvoiceState, clock: C) -> Self {
        Self { state, clock }
    }

    /// Store pre-loaded with the mock invoices.
    pub fn seeded(clock: C) -> Self {
        Self::with_clock(crate::seed::seeded_state(), clock)
    }

    pub fn state(&self) -> &InvoiceState {
        &self.state
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Run `action` through the reducer. On error the state is unchanged.
    pub fn dispatch(&mut self, action: InvoiceAction) -> DomainResult<()> {
        let now = self.clock.now();
        let action_type = action.action_type();
        let invoice_id = action.invoice_id().map(|id| id.to_string());

        match self.state.reduce(&action, now) {
            Ok(()) => {
                tracing::debug!(
                    action = action_type,
                    invoice_id = invoice_id.as_deref(),
                    invoices = self.state.len(),
                    "action applied"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    action = action_type,
                    invoice_id = invoice_id.as_deref(),
                    error = %err,
                    "action rejected"
                );
                Err(err)
            }
        }
    }

    pub fn create_invoice(&mut self, invoice: Invoice) -> DomainResult<()> {
        self.dispatch(InvoiceAction::CreateInvoice(invoice))
    }

    pub fn update_invoice(
        &mut self,
        id: &InvoiceId,
        changes: InvoiceChanges,
        line_items: Vec<LineItem>,
    ) -> DomainResult<()> {
        self.dispatch(InvoiceAction::UpdateInvoice {
            id: id.clone(),
            changes,
            line_items,
        })
    }

    pub fn update_invoice_status(
        &mut self,
        id: &InvoiceId,
        status: InvoiceStatus,
    ) -> DomainResult<()> {
        self.dispatch(InvoiceAction::UpdateInvoiceStatus {
            id: id.clone(),
            status,
        })
    }

    pub fn delete_invoice(&mut self, id: &InvoiceId) -> DomainResult<()> {
        self.dispatch(InvoiceAction::DeleteInvoice { id: id.clone() })
    }

    pub fn set_loading(&mut self, loading: bool) -> DomainResult<()> {
        self.dispatch(InvoiceAction::SetLoading(loading))
    }

    pub fn set_error(&mut self, error: Option<String>) -> DomainResult<()> {
        self.dispatch(InvoiceAction::SetError(error))
    }

    pub fn all_invoices(&self) -> &[Invoice] {
        selectors::select_all_invoices(&self.state)
    }

    pub fn invoice_by_id(&self, id: &InvoiceId) -> Option<&Invoice> {
        selectors::select_invoice_by_id(&self.state, id)
    }

    /// Overdue set as of the store clock's "now".
    pub fn overdue_invoices(&self) -> Vec<&Invoice> {
        selectors::select_overdue_invoices(&self.state, self.clock.now())
    }

    pub fn is_loading(&self) -> bool {
        selectors::select_invoices_loading(&self.state)
    }

    pub fn error(&self) -> Option<&str> {
        selectors::select_invoices_error(&self.state)
    }

    /// `INV-<n>` label for the next invoice to be created.
    pub fn next_invoice_number(&self) -> DomainResult<String> {
        selectors::next_invoice_sequence(&self.state).map(invoice_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use invoicekit_core::{DomainError, FixedClock, LineItemId};
    use invoicekit_invoicing::{InvoiceDraft, LineItemType};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    fn line(quantity: i64, rate: i64) -> LineItem {
        LineItem::new(
            LineItemId::generate(),
            LineItemType::Material,
            "Lumber",
            Decimal::from(quantity),
            Decimal::from(rate),
        )
    }

    fn new_invoice(store: &InvoiceStore<FixedClock>, lines: Vec<LineItem>) -> Invoice {
        Invoice::from_draft(
            InvoiceId::generate(),
            store.next_invoice_number().unwrap(),
            InvoiceDraft {
                client_name: "Globex".to_string(),
                client_email: "ap@globex.test".to_string(),
                client_address: "9 Elm St".to_string(),
                due_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                notes: None,
                payment_instructions: None,
                line_items: lines,
            },
            store.now(),
        )
    }

    #[test]
    fn seeded_store_holds_the_mock_invoices() {
        let store = InvoiceStore::seeded(clock());
        assert_eq!(store.all_invoices().len(), 2);
        assert_eq!(store.next_invoice_number().unwrap(), "INV-3");
        let acme = store.invoice_by_id(&InvoiceId::from("1")).unwrap();
        assert_eq!(acme.client_name, "Acme Corporation");
    }

    #[test]
    fn seeded_overdue_set_excludes_drafts() {
        let store = InvoiceStore::seeded(clock());
        let overdue: Vec<_> = store.overdue_invoices().iter().map(|i| i.id.to_string()).collect();
        assert_eq!(overdue, vec!["1".to_string()]);
    }

    #[test]
    fn created_invoice_totals_4015_and_is_retrievable() {
        let mut store = InvoiceStore::with_clock(InvoiceState::new(), clock());
        let invoice = new_invoice(&store, vec![line(40, 100), line(1, 15)]);
        let id = invoice.id.clone();

        store.create_invoice(invoice).unwrap();

        let stored = store.invoice_by_id(&id).unwrap();
        assert_eq!(stored.total, Decimal::new(401500, 2));
        assert_eq!(stored.status, InvoiceStatus::Draft);
        assert_eq!(stored.invoice_number, "INV-1");
    }

    #[test]
    fn outstanding_invoice_leaves_overdue_set_once_paid() {
        let mut store = InvoiceStore::with_clock(InvoiceState::new(), clock());
        let invoice = new_invoice(&store, vec![line(1, 10)]);
        let id = invoice.id.clone();
        store.create_invoice(invoice).unwrap();
        store.update_invoice_status(&id, InvoiceStatus::Outstanding).unwrap();

        assert_eq!(store.overdue_invoices().len(), 1);

        store.update_invoice_status(&id, InvoiceStatus::Paid).unwrap();
        assert!(store.overdue_invoices().is_empty());
        assert_eq!(store.invoice_by_id(&id).unwrap().updated_at, store.now());
    }

    #[test]
    fn update_with_two_by_fifty_totals_100() {
        let mut store = InvoiceStore::seeded(clock());
        let id = InvoiceId::from("1");

        store
            .update_invoice(&id, InvoiceChanges::default(), vec![line(2, 50)])
            .unwrap();

        let stored = store.invoice_by_id(&id).unwrap();
        assert_eq!(stored.total, Decimal::from(100));
        assert_eq!(stored.subtotal, Decimal::from(100));
        assert_eq!(stored.updated_at, clock().0);
    }

    #[test]
    fn operations_on_missing_ids_fail_with_not_found() {
        let mut store = InvoiceStore::seeded(clock());
        let ghost = InvoiceId::from("missing");

        assert!(store.delete_invoice(&ghost).unwrap_err().is_not_found());
        assert!(
            store
                .update_invoice_status(&ghost, InvoiceStatus::Paid)
                .unwrap_err()
                .is_not_found()
        );
        assert!(matches!(
            store.update_invoice(&ghost, InvoiceChanges::default(), vec![]),
            Err(DomainError::NotFound(_))
        ));
        assert_eq!(store.all_invoices().len(), 2);
    }

    #[test]
    fn flags_round_trip_through_dispatch() {
        let mut store = InvoiceStore::with_clock(InvoiceState::new(), clock());
        store.set_loading(true).unwrap();
        store.set_error(Some("Failed to create invoice. Please try again.".into())).unwrap();

        assert!(store.is_loading());
        assert_eq!(store.error(), Some("Failed to create invoice. Please try again."));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: each create grows the collection by exactly one and every
        /// deleted id is gone afterwards.
        #[test]
        fn create_then_delete_keeps_collection_consistent(
            count in 1usize..20,
            delete_mask in prop::collection::vec(any::<bool>(), 20)
        ) {
            let mut store = InvoiceStore::with_clock(InvoiceState::new(), clock());
            let mut ids = Vec::new();

            for n in 0..count {
                let invoice = new_invoice(&store, vec![line(1, 1)]);
                ids.push(invoice.id.clone());
                store.create_invoice(invoice).unwrap();
                prop_assert_eq!(store.all_invoices().len(), n + 1);
            }

            for (id, delete) in ids.iter().zip(&delete_mask) {
                if *delete {
                    store.delete_invoice(id).unwrap();
                    prop_assert!(store.invoice_by_id(id).is_none());
                } else {
                    prop_assert!(store.invoice_by_id(id).is_some());
                }
            }
        }
    }
}
