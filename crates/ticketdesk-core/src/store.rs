//! The session's authoritative ticket collection.
//!
//! A [`TicketStore`] is constructed explicitly per session and owned by it;
//! nothing here is global. Tickets are kept newest-first. Every mutating call
//! either succeeds completely or leaves the collection untouched.

use chrono::{Local, NaiveDate};

use crate::config::{DeskConfig, Roster};
use crate::error::TicketError;
use crate::model::ticket::{GridRow, Priority, Status, Ticket, TicketId};
use crate::reconcile::{Reconciliation, ReconciliationEngine};

/// In-memory, newest-first collection of tickets for one session.
///
/// New ids continue from the highest suffix this store has ever issued, so
/// after the newest ticket is deleted its number is not reused. Otherwise the
/// next id is the largest existing suffix plus one.
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    config: DeskConfig,
    tickets: Vec<Ticket>,
    /// Highest suffix ever assigned by this store, so deleting the newest
    /// ticket does not hand its number out again.
    last_seq: u64,
}

impl TicketStore {
    /// Create an empty store bound to `config`.
    #[must_use]
    pub const fn new(config: DeskConfig) -> Self {
        Self {
            config,
            tickets: Vec::new(),
            last_seq: 0,
        }
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.config.roster
    }

    /// File a new ticket created today.
    ///
    /// # Errors
    ///
    /// See [`Self::create_on`].
    pub fn create(
        &mut self,
        description: &str,
        priority: &str,
        requester: &str,
        assignee: &str,
    ) -> Result<Ticket, TicketError> {
        let today = Local::now().date_naive();
        self.create_on(today, description, priority, requester, assignee)
    }

    /// File a new ticket with an explicit creation day.
    ///
    /// The ticket is `Open`, gets the next free `TICKET-<n>` id and is
    /// prepended to the collection. Surrounding whitespace is trimmed from
    /// the description and names. A copy is returned for confirmation.
    ///
    /// # Errors
    ///
    /// - [`TicketError::Validation`] if `description` is blank.
    /// - [`TicketError::InvalidDomainValue`] if `priority` is not a known
    ///   priority or `requester`/`assignee` is not on the roster.
    pub fn create_on(
        &mut self,
        created_at: NaiveDate,
        description: &str,
        priority: &str,
        requester: &str,
        assignee: &str,
    ) -> Result<Ticket, TicketError> {
        let description = description.trim();
        if description.is_empty() {
            tracing::debug!("rejected ticket with blank description");
            return Err(TicketError::Validation {
                field: "description",
            });
        }
        let priority: Priority = priority.parse()?;
        let (requester, assignee) = (requester.trim(), assignee.trim());
        let roster = self.roster();
        roster.check("requester", requester)?;
        roster.check("assignee", assignee)?;

        let ticket = Ticket {
            id: self.next_id(),
            description: description.to_string(),
            status: Status::Open,
            priority,
            created_at,
            requester: requester.to_string(),
            assignee: assignee.to_string(),
        };
        self.last_seq = ticket.id.seq();
        self.tickets.insert(0, ticket.clone());

        tracing::debug!(id = %ticket.id, count = self.tickets.len(), "ticket created");
        Ok(ticket)
    }

    /// Newest-first view of the collection.
    #[must_use]
    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.position(id).map(|pos| &self.tickets[pos])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Tickets eligible for deletion, in collection order.
    pub fn closed(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| t.status.is_terminal())
    }

    /// Remove a closed ticket and return the remaining collection.
    ///
    /// # Errors
    ///
    /// - [`TicketError::NotFound`] if no ticket has `id`.
    /// - [`TicketError::IllegalStateTransition`] if the ticket is not closed.
    pub fn delete(&mut self, id: &str) -> Result<&[Ticket], TicketError> {
        let pos = self.position(id).ok_or_else(|| TicketError::NotFound {
            id: id.to_string(),
        })?;

        let status = self.tickets[pos].status;
        if !status.is_terminal() {
            tracing::debug!(id, %status, "refused to delete ticket that is not closed");
            return Err(TicketError::IllegalStateTransition {
                id: id.to_string(),
                status,
            });
        }

        let removed = self.tickets.remove(pos);
        tracing::debug!(id = %removed.id, count = self.tickets.len(), "ticket deleted");
        Ok(&self.tickets)
    }

    /// Reconcile an edited snapshot against the collection and commit it
    /// when it differs. Returns whether a commit happened.
    ///
    /// # Errors
    ///
    /// Any error from [`ReconciliationEngine::reconcile`]; the collection is
    /// left unchanged.
    pub fn apply_edits(&mut self, proposed: Vec<Ticket>) -> Result<bool, TicketError> {
        let outcome = ReconciliationEngine::new(self.roster()).reconcile(&self.tickets, proposed);
        self.commit(outcome)
    }

    /// Same as [`Self::apply_edits`] for text cells from a grid.
    ///
    /// # Errors
    ///
    /// Any error from [`ReconciliationEngine::reconcile_rows`]; the
    /// collection is left unchanged.
    pub fn apply_rows(&mut self, rows: Vec<GridRow>) -> Result<bool, TicketError> {
        let outcome = ReconciliationEngine::new(self.roster()).reconcile_rows(&self.tickets, rows);
        self.commit(outcome)
    }

    fn commit(&mut self, outcome: Result<Reconciliation, TicketError>) -> Result<bool, TicketError> {
        let outcome = outcome.inspect_err(|err| {
            tracing::debug!(code = %err.code(), "rejected edited snapshot: {err}");
        })?;
        if outcome.committed {
            self.replace_all(outcome.next);
            tracing::debug!(count = self.tickets.len(), "edited snapshot committed");
        }
        Ok(outcome.committed)
    }

    /// Swap in a reconciled collection.
    pub(crate) fn replace_all(&mut self, next: Vec<Ticket>) {
        self.tickets = next;
    }

    fn next_id(&self) -> TicketId {
        let max_existing = self.tickets.iter().map(|t| t.id.seq()).max().unwrap_or(0);
        TicketId::after(max_existing.max(self.last_seq))
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id: TicketId = id.trim().parse().ok()?;
        self.tickets.iter().position(|t| t.id == id)
    }
}
