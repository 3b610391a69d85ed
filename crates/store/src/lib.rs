//! In-memory invoice store.
//!
//! State lives in an explicit [`InvoiceState`]; mutations go through the
//! [`InvoiceAction`] reducer, reads through the selector functions. The
//! [`InvoiceStore`] container pairs the state with a clock and logs every
//! dispatched action.

pub mod action;
pub mod seed;
pub mod selectors;
pub mod state;
pub mod store;

pub use action::InvoiceAction;
pub use selectors::{
    next_invoice_sequence, select_all_invoices, select_invoice_by_id, select_invoices_error,
    select_invoices_loading, select_overdue_invoices,
};
pub use state::InvoiceState;
pub use store::InvoiceStore;
