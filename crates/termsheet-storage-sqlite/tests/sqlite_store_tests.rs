use termsheet_core::{
    CommitAdapter, CommitPolicy, CoreError, EntityDirectory, EntityService, EntityStore,
    InvoiceDraft, InvoiceStore,
};
use termsheet_domain::{EntityKind, LineItem, NewEntity};
use termsheet_storage_sqlite::SqliteStore;
use tempfile::tempdir;
use uuid::Uuid;

fn seeded() -> (SqliteStore, String, String) {
    let store = SqliteStore::open_in_memory().unwrap();
    let provider = store
        .create_entity(
            EntityKind::Provider,
            &NewEntity::new("Acme Studio").with_email("billing@acme.test"),
        )
        .unwrap();
    let client = store
        .create_entity(EntityKind::Client, &NewEntity::new("Globex"))
        .unwrap();
    (store, provider, client)
}

fn items(store: &SqliteStore, invoice_id: i64) -> Vec<LineItem> {
    store
        .get_invoice_items(invoice_id)
        .unwrap()
        .into_iter()
        .map(|stored| stored.item)
        .collect()
}

#[test]
fn entity_crud_round_trip() {
    let store = SqliteStore::open_in_memory().unwrap();
    let id = EntityService::create(
        &store,
        EntityKind::Client,
        &NewEntity::new("  Initech  ")
            .with_address("1 Main St")
            .with_phone("   "),
    )
    .unwrap();
    assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 4);

    let client = store.get_entity(EntityKind::Client, &id).unwrap();
    assert_eq!(client.name, "Initech");
    assert_eq!(client.address.as_deref(), Some("1 Main St"));
    assert_eq!(client.phone, None);

    EntityService::update(
        &store,
        EntityKind::Client,
        &id,
        &client.to_fields().with_email("ap@initech.test"),
    )
    .unwrap();
    let client = store.get_entity(EntityKind::Client, &id).unwrap();
    assert_eq!(client.display_label(), "Initech (ap@initech.test)");

    assert!(store.list_providers().unwrap().is_empty());
    EntityService::delete(&store, EntityKind::Client, &id).unwrap();
    assert!(matches!(
        store.get_entity(EntityKind::Client, &id),
        Err(CoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_entity(EntityKind::Client, &id),
        Err(CoreError::NotFound(_))
    ));
    assert!(matches!(
        store.update_entity(EntityKind::Client, &id, &NewEntity::new("Ghost")),
        Err(CoreError::NotFound(_))
    ));
}

#[test]
fn entities_are_listed_by_name() {
    let store = SqliteStore::open_in_memory().unwrap();
    for name in ["zeta", "Alpha", "mid"] {
        store
            .create_entity(EntityKind::Provider, &NewEntity::new(name))
            .unwrap();
    }
    let names: Vec<_> = store
        .list_providers()
        .unwrap()
        .into_iter()
        .map(|entity| entity.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "mid", "zeta"]);
}

#[test]
fn invoice_requires_existing_provider_and_client() {
    let (store, provider, _) = seeded();
    let err = store.create_invoice(&provider, "no-such-client", false).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[test]
fn referenced_entity_cannot_be_deleted() {
    let (store, provider, client) = seeded();
    store.create_invoice(&provider, &client, false).unwrap();
    let err = store
        .delete_entity(EntityKind::Provider, &provider)
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidOperation(_)));
    assert!(store.get_entity(EntityKind::Provider, &provider).is_ok());
}

#[test]
fn item_insert_checks_fields_and_trims_name() {
    let (store, provider, client) = seeded();
    let invoice_id = store.create_invoice(&provider, &client, false).unwrap();

    for (name, quantity, cost) in [
        ("", 1.0, 1.0),
        ("Widget", 0.0, 1.0),
        ("Widget", 1.0, -3.0),
        ("Widget", f64::NAN, 1.0),
    ] {
        let err = store
            .add_invoice_item(invoice_id, name, quantity, cost)
            .unwrap_err();
        assert!(err.is_validation(), "{name} {quantity} {cost}");
    }
    assert!(items(&store, invoice_id).is_empty());

    store
        .add_invoice_item(invoice_id, "  Widget ", 2.0, 3.5)
        .unwrap();
    assert_eq!(items(&store, invoice_id), vec![LineItem::new("Widget", 2.0, 3.5)]);

    let err = store.add_invoice_item(9_999, "Orphan", 1.0, 1.0).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[test]
fn missing_rows_report_not_found() {
    let (store, provider, client) = seeded();
    assert!(matches!(store.get_invoice(42), Err(CoreError::NotFound(_))));
    assert!(matches!(store.invoice_data(42), Err(CoreError::NotFound(_))));
    assert!(matches!(
        store.update_invoice_header(42, &provider, &client, true),
        Err(CoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_invoice_item(42),
        Err(CoreError::NotFound(_))
    ));
    assert!(matches!(store.delete_invoice(42), Err(CoreError::NotFound(_))));
}

#[test]
fn invoices_are_listed_newest_first() {
    let (store, provider, client) = seeded();
    let first = store.create_invoice(&provider, &client, false).unwrap();
    let second = store.create_invoice(&provider, &client, true).unwrap();
    let third = store.create_invoice(&provider, &client, false).unwrap();

    let summaries = store.list_invoices().unwrap();
    let ids: Vec<_> = summaries.iter().map(|summary| summary.id).collect();
    assert_eq!(ids, vec![third, second, first]);
    assert_eq!(summaries[1].provider_name, "Acme Studio");
    assert_eq!(summaries[1].client_name, "Globex");
    assert_eq!(summaries[1].status_label(), "Paid");
}

#[test]
fn invoice_data_joins_parties_and_items() {
    let (store, provider, client) = seeded();
    let draft = InvoiceDraft::create(
        provider.clone(),
        client.clone(),
        vec![LineItem::new("Design", 4.0, 80.0), LineItem::new("Hosting", 1.0, 15.25)],
        true,
    );
    let invoice_id = CommitAdapter::new(&store).commit(&draft).unwrap();

    let data = store.invoice_data(invoice_id).unwrap();
    assert_eq!(data.provider.id, provider);
    assert_eq!(data.client.name, "Globex");
    assert!(data.invoice.paid);
    assert_eq!(data.items.len(), 2);
    assert!((data.total() - 335.25).abs() < 1e-9);
}

#[test]
fn delete_invoice_removes_items_then_header() {
    let (store, provider, client) = seeded();
    let draft = InvoiceDraft::create(
        provider,
        client,
        vec![LineItem::new("A", 1.0, 1.0), LineItem::new("B", 1.0, 1.0)],
        false,
    );
    let invoice_id = CommitAdapter::new(&store).commit(&draft).unwrap();

    store.delete_invoice(invoice_id).unwrap();
    assert!(matches!(
        store.get_invoice(invoice_id),
        Err(CoreError::NotFound(_))
    ));
    assert!(store.get_invoice_items(invoice_id).unwrap().is_empty());
    assert!(store.list_invoices().unwrap().is_empty());
}

#[test]
fn atomic_commit_rolls_back_on_failure() {
    let (store, provider, client) = seeded();
    let draft = InvoiceDraft::create(
        provider,
        client,
        vec![LineItem::new("Good", 1.0, 1.0), LineItem::new("Bad", -2.0, 1.0)],
        false,
    );

    let err = CommitAdapter::new(&store).commit(&draft).unwrap_err();
    assert!(err.is_validation());
    assert!(store.list_invoices().unwrap().is_empty());
}

#[test]
fn best_effort_commit_keeps_partial_rows() {
    let (store, provider, client) = seeded();
    let draft = InvoiceDraft::create(
        provider,
        client,
        vec![LineItem::new("Good", 1.0, 1.0), LineItem::new("Bad", -2.0, 1.0)],
        false,
    );

    let err = CommitAdapter::new(&store)
        .with_policy(CommitPolicy::BestEffort)
        .commit(&draft)
        .unwrap_err();
    assert!(err.is_validation());
    let summaries = store.list_invoices().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(items(&store, summaries[0].id), vec![LineItem::new("Good", 1.0, 1.0)]);
}

#[test]
fn edit_commit_rolls_back_header_when_items_fail() {
    let (store, provider, client) = seeded();
    let original = vec![LineItem::new("Keep", 2.0, 10.0)];
    let invoice_id = CommitAdapter::new(&store)
        .commit(&InvoiceDraft::create(
            provider,
            client,
            original.clone(),
            false,
        ))
        .unwrap();

    let invoice = store.get_invoice(invoice_id).unwrap();
    let draft = InvoiceDraft::from_existing(&invoice, vec![LineItem::new("Bad", 0.0, 1.0)]);
    assert!(draft.is_edit());
    let err = CommitAdapter::new(&store).commit(&draft).unwrap_err();
    assert!(err.is_validation());

    assert_eq!(items(&store, invoice_id), original);
    assert!(!store.get_invoice(invoice_id).unwrap().paid);
}

#[test]
fn data_survives_reopening_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("termsheet.db");

    let invoice_id = {
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        let provider = store
            .create_entity(EntityKind::Provider, &NewEntity::new("Acme"))
            .unwrap();
        let client = store
            .create_entity(EntityKind::Client, &NewEntity::new("Globex"))
            .unwrap();
        CommitAdapter::new(&store)
            .commit(&InvoiceDraft::create(
                provider,
                client,
                vec![LineItem::new("Widget", 10.0, 25.5)],
                false,
            ))
            .unwrap()
    };

    let reopened = SqliteStore::open(&path).unwrap();
    let data = reopened.invoice_data(invoice_id).unwrap();
    assert_eq!(data.provider.name, "Acme");
    assert_eq!(data.items[0].item, LineItem::new("Widget", 10.0, 25.5));
    assert!((data.total() - 255.0).abs() < 1e-9);
}

const EARLIER_SCHEMA: &str = "
CREATE TABLE provider (id TEXT PRIMARY KEY, name TEXT NOT NULL, address TEXT, email TEXT, phone TEXT);
CREATE TABLE client (id TEXT PRIMARY KEY, name TEXT NOT NULL, address TEXT, email TEXT);
CREATE TABLE invoice (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    provider_id TEXT NOT NULL,
    client_id TEXT NOT NULL,
    paid BOOLEAN DEFAULT FALSE,
    date_created TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (provider_id) REFERENCES provider (id),
    FOREIGN KEY (client_id) REFERENCES client (id)
);
CREATE TABLE invoice_item (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    invoice_id INTEGER NOT NULL,
    item_name TEXT NOT NULL,
    amount REAL NOT NULL,
    cost_per_unit REAL NOT NULL,
    FOREIGN KEY (invoice_id) REFERENCES invoice (id)
);
INSERT INTO provider (id, name) VALUES ('p1', 'Acme');
INSERT INTO client (id, name, email) VALUES ('c1', 'Globex', 'ap@globex.test');
INSERT INTO invoice (provider_id, client_id, paid, date_created)
    VALUES ('p1', 'c1', NULL, '2024-03-05 10:00:00');
INSERT INTO invoice (provider_id, client_id, paid, date_created)
    VALUES ('p1', 'c1', 1, '2024-03-05T09:00:00.000000Z');
INSERT INTO invoice_item (invoice_id, item_name, amount, cost_per_unit)
    VALUES (1, 'Widget', 2, 12.5);
";

#[test]
fn databases_without_client_phone_are_upgraded_on_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("termsheet.db");
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch(EARLIER_SCHEMA)
        .unwrap();

    let store = SqliteStore::open(&path).unwrap();
    let clients = store.list_clients().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].email.as_deref(), Some("ap@globex.test"));
    assert_eq!(clients[0].phone, None);

    let data = store.invoice_data(1).unwrap();
    assert!(!data.invoice.paid);
    assert_eq!(data.client.name, "Globex");
    assert!((data.total() - 25.0).abs() < 1e-9);

    // Mixed timestamp formats still list by actual time.
    let ids: Vec<_> = store
        .list_invoices()
        .unwrap()
        .iter()
        .map(|summary| summary.id)
        .collect();
    assert_eq!(ids, vec![1, 2]);

    let phone = NewEntity::new("Initech").with_phone("555-0100");
    let id = store.create_entity(EntityKind::Client, &phone).unwrap();
    drop(store);
    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(
        reopened.get_entity(EntityKind::Client, &id).unwrap().phone.as_deref(),
        Some("555-0100")
    );
}
