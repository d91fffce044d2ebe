//! End-to-end lifecycle tests for ticketdesk-core: filing, bulk edits through
//! the grid, and deletion of closed tickets.

use chrono::Local;
use tracing_subscriber::EnvFilter;
use ticketdesk_core::{
    DeskConfig, ErrorCode, ImmutableField, Roster, Status, TicketError, TicketStore,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Route store logs to the test writer; `RUST_LOG=ticketdesk_core=debug`
/// shows them for failing tests.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ids(store: &TicketStore) -> Vec<String> {
    store.list().iter().map(|t| t.id.to_string()).collect()
}

fn set_status(store: &mut TicketStore, id: &str, status: Status) -> bool {
    let mut proposed = store.list().to_vec();
    let ticket = proposed
        .iter_mut()
        .find(|t| t.id.to_string() == id)
        .expect("ticket must exist");
    ticket.status = status;
    store.apply_edits(proposed).expect("edit should commit")
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn printer_and_vpn_scenario() {
    init_tracing();
    let mut store = TicketStore::new(DeskConfig::default());
    let before = Local::now().date_naive();
    let printer = store
        .create("Printer broken", "Alta", "Alfredo", "Enrico")
        .expect("create printer ticket");
    let after = Local::now().date_naive();
    assert_eq!(printer.id.to_string(), "TICKET-1");
    assert_eq!(printer.status, Status::Open);
    assert!(printer.created_at == before || printer.created_at == after);

    let vpn = store
        .create("VPN down", "Media", "Julio", "Victor")
        .expect("create vpn ticket");
    assert_eq!(vpn.id.to_string(), "TICKET-2");
    assert_eq!(ids(&store), ["TICKET-2", "TICKET-1"]);

    assert!(set_status(&mut store, "TICKET-1", Status::Closed));

    let remaining = store.delete("TICKET-1").expect("delete closed ticket");
    assert_eq!(remaining.len(), 1);
    assert_eq!(ids(&store), ["TICKET-2"]);

    let err = store.delete("TICKET-2").unwrap_err();
    assert_eq!(err.code(), ErrorCode::IllegalStateTransition);
    assert_eq!(ids(&store), ["TICKET-2"]);
}

#[test]
fn single_status_edit_touches_nothing_else() {
    let mut store = TicketStore::new(DeskConfig::default());
    for (desc, prio) in [("a", "Alta"), ("b", "Media"), ("c", "Baja")] {
        store.create(desc, prio, "Johanna", "Lissette").expect("create");
    }
    let before = store.list().to_vec();

    assert!(set_status(&mut store, "TICKET-2", Status::InProgress));

    let after = store.list();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1].status, Status::InProgress);
    assert_eq!(after[1].description, before[1].description);
    assert_eq!(after[1].created_at, before[1].created_at);
}

#[test]
fn grid_edits_cannot_touch_identity_columns() {
    init_tracing();
    let mut store = TicketStore::new(DeskConfig::default());
    store.create("Disk full", "Alta", "Sebastián", "Julio").expect("create");
    let before = store.list().to_vec();

    let mut rows: Vec<_> = store.list().iter().map(|t| t.to_row()).collect();
    rows[0].created_at = "1999-12-31".to_string();
    assert_eq!(
        store.apply_rows(rows),
        Err(TicketError::ImmutableFieldViolation {
            id: "TICKET-1".to_string(),
            field: ImmutableField::CreatedAt,
        })
    );

    let mut rows: Vec<_> = store.list().iter().map(|t| t.to_row()).collect();
    rows[0].id = "TICKET-5".to_string();
    assert!(matches!(
        store.apply_rows(rows),
        Err(TicketError::ImmutableFieldViolation {
            field: ImmutableField::Id,
            ..
        })
    ));

    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn custom_roster_drives_validation() {
    let config = DeskConfig::from_toml_str("roster = [\"Ana\", \"Bruno\"]").expect("config");
    let mut store = TicketStore::new(config);

    let err = store.create("Badge reader", "Alta", "Alfredo", "Ana").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidDomainValue);
    assert!(store.is_empty());

    store.create("Badge reader", "Alta", "Bruno", "Ana").expect("create");
    assert_eq!(store.roster(), &Roster::new(["Ana", "Bruno"]).expect("roster"));
}

#[test]
fn sessions_are_isolated() {
    let mut first = TicketStore::new(DeskConfig::default());
    let mut second = TicketStore::new(DeskConfig::default());

    first.create("one", "Alta", "Julio", "Victor").expect("create");
    first.create("two", "Alta", "Julio", "Victor").expect("create");
    let ticket = second.create("other", "Baja", "Julio", "Victor").expect("create");

    assert_eq!(ticket.id.to_string(), "TICKET-1");
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
}

#[test]
fn tickets_serialize_with_canonical_forms() {
    let mut store = TicketStore::new(DeskConfig::default());
    store.create("Printer broken", "Alta", "Alfredo", "Enrico").expect("create");

    let json = serde_json::to_value(&store.list()[0]).expect("serialize");
    assert_eq!(json["id"], "TICKET-1");
    assert_eq!(json["status"], "open");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["requester"], "Alfredo");
}
