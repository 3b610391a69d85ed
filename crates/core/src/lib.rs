//! `invoicekit-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no presentation).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod reducer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, LineItemId};
pub use reducer::{Action, Reducer};
