//! Reducer trait for explicit, in-memory state containers.

use chrono::{DateTime, Utc};

/// An action that can be dispatched against a reducer.
pub trait Action: Clone + core::fmt::Debug {
    /// Stable action name (e.g. "invoices/createInvoice").
    fn action_type(&self) -> &'static str;
}

/// State evolution semantics (pure, deterministic).
///
/// - **Input**: the current state, one action and the wall-clock time at which
///   it is applied.
/// - **Output**: the state is mutated in place, or an error is returned and the
///   state is left untouched.
///
/// Reducers must not perform IO. Time is passed in so that the same
/// `(state, action, now)` always yields the same result.
pub trait Reducer {
    type Action: Action;
    type Error: core::fmt::Debug;

    /// Apply a single action to the state.
    fn reduce(&mut self, action: &Self::Action, now: DateTime<Utc>) -> Result<(), Self::Error>;

    /// Apply a sequence of actions, stopping at the first failure.
    fn reduce_all<'a, I>(&mut self, actions: I, now: DateTime<Utc>) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self::Action: 'a,
    {
        for action in actions {
            self.reduce(action, now)?;
        }
        Ok(())
    }
}
