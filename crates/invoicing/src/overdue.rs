//! Overdue computation.
//!
//! A due date is a calendar date; it is compared against "now" as midnight UTC
//! of that day. An invoice due today is therefore already past due once the
//! day has started, and counts as one day overdue.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::status::InvoiceStatus;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// The instant a due date starts (midnight UTC).
pub fn due_instant(due_date: NaiveDate) -> DateTime<Utc> {
    due_date.and_time(NaiveTime::MIN).and_utc()
}

/// `due_date` lies strictly before `now`, regardless of status.
pub fn is_past_due(due_date: NaiveDate, now: DateTime<Utc>) -> bool {
    due_instant(due_date) < now
}

/// Paid invoices are never overdue; anything else is overdue once past due.
pub fn is_overdue(due_date: NaiveDate, status: InvoiceStatus, now: DateTime<Utc>) -> bool {
    if status == InvoiceStatus::Paid {
        return false;
    }
    is_past_due(due_date, now)
}

/// Whole days elapsed since the due date, rounded up. Never negative.
pub fn days_overdue(due_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let elapsed = (now - due_instant(due_date)).num_milliseconds();
    if elapsed <= 0 {
        return 0;
    }
    (elapsed + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}
