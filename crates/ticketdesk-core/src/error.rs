use std::fmt;

/// Machine-readable error codes surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ValidationError,
    InvalidDomainValue,
    ImmutableFieldViolation,
    NotFound,
    IllegalStateTransition,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ValidationError => "E2001",
            Self::InvalidDomainValue => "E2002",
            Self::ImmutableFieldViolation => "E2003",
            Self::NotFound => "E2004",
            Self::IllegalStateTransition => "E2005",
        }
    }

    /// Short human-facing summary for confirmation and error banners.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ValidationError => "Required field is missing",
            Self::InvalidDomainValue => "Value is not one of the allowed options",
            Self::ImmutableFieldViolation => "Field cannot be changed",
            Self::NotFound => "Ticket not found",
            Self::IllegalStateTransition => "Operation not allowed in current status",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix the roster list in the config file and retry."),
            Self::ValidationError => Some("Fill in the ticket description."),
            Self::InvalidDomainValue => {
                Some("Pick a status, priority or person from the offered options.")
            }
            Self::ImmutableFieldViolation => {
                Some("Ticket IDs and creation dates are fixed; edit other columns only.")
            }
            Self::NotFound => None,
            Self::IllegalStateTransition => Some("Close the ticket before deleting it."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Ticket fields that never change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmutableField {
    Id,
    CreatedAt,
}

impl fmt::Display for ImmutableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "id",
            Self::CreatedAt => "created_at",
        })
    }
}

/// Every failure a store or reconciliation call can report.
///
/// None of these are fatal: the store is left exactly as it was before the
/// failing call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    /// A required text field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    /// A value outside its fixed enum set or the roster.
    #[error("invalid {field}: '{value}'")]
    InvalidDomainValue { field: &'static str, value: String },

    /// An edit tried to change `id` or `created_at` of an existing ticket.
    #[error("{field} of {id} cannot be changed")]
    ImmutableFieldViolation { id: String, field: ImmutableField },

    #[error("ticket {id} not found")]
    NotFound { id: String },

    /// Deletion attempted on a ticket that is not closed.
    #[error("ticket {id} is {status}; only closed tickets can be deleted")]
    IllegalStateTransition {
        id: String,
        status: crate::model::ticket::Status,
    },
}

impl TicketError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::InvalidDomainValue { .. } => ErrorCode::InvalidDomainValue,
            Self::ImmutableFieldViolation { .. } => ErrorCode::ImmutableFieldViolation,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::IllegalStateTransition { .. } => ErrorCode::IllegalStateTransition,
        }
    }

    /// Optional remediation hint for the user.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
