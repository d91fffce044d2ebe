use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::config::Roster;
use crate::error::TicketError;

const ID_PREFIX: &str = "TICKET-";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The three lifecycle states.
///
/// Any state can be edited into any other; only `Closed` tickets may be
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Closed,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    /// Label shown in forms and grids.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Abierta",
            Self::InProgress => "En Progreso",
            Self::Closed => "Cerrada",
        }
    }

    /// Whether a ticket in this state may be deleted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Label shown in forms and grids.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
        }
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl From<ParseEnumError> for TicketError {
    fn from(err: ParseEnumError) -> Self {
        Self::InvalidDomainValue {
            field: err.expected,
            value: err.got,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase().replace([' ', '-'], "_")
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" | "abierta" => Ok(Self::Open),
            "in_progress" | "en_progreso" => Ok(Self::InProgress),
            "closed" | "cerrada" => Ok(Self::Closed),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "high" | "alta" => Ok(Self::High),
            "medium" | "media" => Ok(Self::Medium),
            "low" | "baja" => Ok(Self::Low),
            _ => Err(ParseEnumError {
                expected: "priority",
                got: s.to_string(),
            }),
        }
    }
}

/// Ticket identifier of the form `TICKET-<n>` with `n >= 1`.
///
/// The textual form is canonical: `TICKET-07` and `TICKET-0` are rejected so
/// that parsing and rendering agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(u64);

impl TicketId {
    /// Build an identifier from its numeric suffix.
    ///
    /// Returns `None` for zero.
    #[must_use]
    pub const fn from_seq(seq: u64) -> Option<Self> {
        if seq == 0 { None } else { Some(Self(seq)) }
    }

    /// Numeric suffix.
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.0
    }

    /// Identifier following `seq`; `after(0)` is `TICKET-1`.
    pub(crate) const fn after(seq: u64) -> Self {
        Self(seq.saturating_add(1))
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseEnumError {
            expected: "id",
            got: s.to_string(),
        };

        let digits = s.strip_prefix(ID_PREFIX).ok_or_else(invalid)?;
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        digits.parse::<u64>().map(Self).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TicketId {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.to_string()
    }
}

/// A single operational request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: NaiveDate,
    pub requester: String,
    pub assignee: String,
}

impl Ticket {
    /// Render as the text cells of an editable grid.
    #[must_use]
    pub fn to_row(&self) -> GridRow {
        GridRow {
            id: self.id.to_string(),
            description: self.description.clone(),
            status: self.status.label().to_string(),
            priority: self.priority.label().to_string(),
            created_at: self.created_at.format(DATE_FORMAT).to_string(),
            requester: self.requester.clone(),
            assignee: self.assignee.clone(),
        }
    }

    /// Check the fields that are not enforced by the type system.
    pub(crate) fn validate(&self, roster: &Roster) -> Result<(), TicketError> {
        if self.description.trim().is_empty() {
            return Err(TicketError::Validation {
                field: "description",
            });
        }
        roster.check("requester", &self.requester)?;
        roster.check("assignee", &self.assignee)?;
        Ok(())
    }
}

/// One row of an editable grid: every cell as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridRow {
    pub id: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub created_at: String,
    pub requester: String,
    pub assignee: String,
}

impl GridRow {
    /// Parse the cells into a [`Ticket`].
    ///
    /// # Errors
    ///
    /// [`TicketError::InvalidDomainValue`] for any cell that does not parse
    /// or is outside its allowed set, [`TicketError::Validation`] for a blank
    /// description.
    pub fn into_ticket(self, roster: &Roster) -> Result<Ticket, TicketError> {
        let created_at = NaiveDate::parse_from_str(self.created_at.trim(), DATE_FORMAT)
            .map_err(|_| TicketError::InvalidDomainValue {
                field: "created_at",
                value: self.created_at.clone(),
            })?;

        let ticket = Ticket {
            id: self.id.trim().parse()?,
            description: self.description,
            status: self.status.parse()?,
            priority: self.priority.parse()?,
            created_at,
            requester: self.requester.trim().to_string(),
            assignee: self.assignee.trim().to_string(),
        };
        ticket.validate(roster)?;
        Ok(ticket)
    }
}
