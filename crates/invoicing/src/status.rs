use core::str::FromStr;

use serde::{Deserialize, Serialize};

use invoicekit_core::DomainError;

/// Invoice status lifecycle.
///
/// Transitions are unconstrained: any status may follow any other. `Late` is a
/// label a user can set by hand; whether an invoice is actually overdue is
/// always computed from its due date (see [`crate::overdue`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Outstanding,
    Paid,
    Late,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Outstanding,
        InvoiceStatus::Paid,
        InvoiceStatus::Late,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Outstanding => "outstanding",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Late => "late",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Outstanding => "Outstanding",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Late => "Late",
        }
    }

    /// Money is still owed on the invoice (outstanding or late).
    pub fn is_collectible(self) -> bool {
        matches!(self, InvoiceStatus::Outstanding | InvoiceStatus::Late)
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "outstanding" => Ok(InvoiceStatus::Outstanding),
            "paid" => Ok(InvoiceStatus::Paid),
            "late" => Ok(InvoiceStatus::Late),
            other => Err(DomainError::validation(format!(
                "unknown invoice status '{other}' (expected draft, outstanding, paid or late)"
            ))),
        }
    }
}

/// Display colour class for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Success,
    Warning,
    Error,
    Neutral,
}

impl StatusColor {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusColor::Success => "success",
            StatusColor::Warning => "warning",
            StatusColor::Error => "error",
            StatusColor::Neutral => "neutral",
        }
    }
}

pub fn status_color(status: InvoiceStatus) -> StatusColor {
    match status {
        InvoiceStatus::Paid => StatusColor::Success,
        InvoiceStatus::Outstanding => StatusColor::Warning,
        InvoiceStatus::Late => StatusColor::Error,
        InvoiceStatus::Draft => StatusColor::Neutral,
    }
}

/// Colour for a raw status label; anything unrecognised is neutral.
pub fn status_color_for(label: &str) -> StatusColor {
    label
        .parse::<InvoiceStatus>()
        .map(status_color)
        .unwrap_or(StatusColor::Neutral)
}
