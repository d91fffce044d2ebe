//! Bulk-edit reconciliation.
//!
//! An editable grid hands back a full snapshot of the ticket collection. The
//! engine compares it with the authoritative collection and decides whether
//! the snapshot becomes the new state. The decision is all-or-nothing: one
//! bad row rejects the whole snapshot.
//!
//! # Rules
//!
//! 1. A snapshot equal to the current collection (same tickets, same fields,
//!    same order) is not committed.
//! 2. Rows cannot be added, removed or reordered, and `id`/`created_at` of
//!    every row must match the ticket at the same position.
//! 3. Every row must pass field validation: non-blank description, requester
//!    and assignee on the roster. Status and priority are closed enums.

use crate::config::Roster;
use crate::error::{ImmutableField, TicketError};
use crate::model::ticket::{GridRow, Ticket};

/// Outcome of a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Whether `next` differs from the current collection and was accepted.
    pub committed: bool,
    /// The collection that should be authoritative after this call.
    pub next: Vec<Ticket>,
}

/// Decides whether an edited snapshot replaces the current collection.
#[derive(Debug, Clone, Copy)]
pub struct ReconciliationEngine<'a> {
    roster: &'a Roster,
}

impl<'a> ReconciliationEngine<'a> {
    #[must_use]
    pub const fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }

    /// Compare `proposed` against `current`.
    ///
    /// `current` is only read; the caller owns applying `next`.
    ///
    /// # Errors
    ///
    /// - [`TicketError::ImmutableFieldViolation`] if a row was added, removed,
    ///   reordered, or had its `id` or `created_at` changed.
    /// - [`TicketError::InvalidDomainValue`] for a requester or assignee not
    ///   on the roster.
    /// - [`TicketError::Validation`] for a blank description.
    pub fn reconcile(
        &self,
        current: &[Ticket],
        proposed: Vec<Ticket>,
    ) -> Result<Reconciliation, TicketError> {
        if current == proposed.as_slice() {
            return Ok(Reconciliation {
                committed: false,
                next: current.to_vec(),
            });
        }

        check_identity(current, &proposed)?;
        for ticket in &proposed {
            ticket.validate(self.roster)?;
        }

        Ok(Reconciliation {
            committed: true,
            next: proposed,
        })
    }

    /// Parse grid rows and reconcile the result against `current`.
    ///
    /// # Errors
    ///
    /// Any parse failure from [`GridRow::into_ticket`], then the errors of
    /// [`Self::reconcile`].
    pub fn reconcile_rows(
        &self,
        current: &[Ticket],
        rows: Vec<GridRow>,
    ) -> Result<Reconciliation, TicketError> {
        let proposed = rows
            .into_iter()
            .map(|row| row.into_ticket(self.roster))
            .collect::<Result<Vec<_>, _>>()?;
        self.reconcile(current, proposed)
    }
}

fn check_identity(current: &[Ticket], proposed: &[Ticket]) -> Result<(), TicketError> {
    for (pos, existing) in current.iter().enumerate() {
        let violation = |field| TicketError::ImmutableFieldViolation {
            id: existing.id.to_string(),
            field,
        };
        let Some(edited) = proposed.get(pos) else {
            return Err(violation(ImmutableField::Id));
        };
        if edited.id != existing.id {
            return Err(violation(ImmutableField::Id));
        }
        if edited.created_at != existing.created_at {
            return Err(violation(ImmutableField::CreatedAt));
        }
    }

    if let Some(extra) = proposed.get(current.len()) {
        return Err(TicketError::ImmutableFieldViolation {
            id: extra.id.to_string(),
            field: ImmutableField::Id,
        });
    }
    Ok(())
}
