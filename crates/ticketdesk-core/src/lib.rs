//! ticketdesk-core library.
//!
//! An in-memory operational ticket tracker for a single session: a
//! [`store::TicketStore`] that assigns ids and gates deletion, and a
//! [`reconcile::ReconciliationEngine`] that decides whether an edited grid
//! snapshot replaces the stored collection.
//!
//! # Conventions
//!
//! - **Errors**: core operations return [`error::TicketError`]; configuration
//!   loading uses `anyhow::Result`.
//! - **Logging**: `tracing` macros only; no subscriber is installed here.

pub mod config;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod store;

pub use config::{DeskConfig, Roster};
pub use error::{ErrorCode, ImmutableField, TicketError};
pub use model::ticket::{GridRow, Priority, Status, Ticket, TicketId};
pub use reconcile::{Reconciliation, ReconciliationEngine};
pub use store::TicketStore;
