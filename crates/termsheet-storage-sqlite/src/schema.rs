/// Tables are created on open when missing.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS provider (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT,
    email TEXT,
    phone TEXT
);

CREATE TABLE IF NOT EXISTS client (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT,
    email TEXT,
    phone TEXT
);

CREATE TABLE IF NOT EXISTS invoice (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    provider_id TEXT NOT NULL,
    client_id TEXT NOT NULL,
    paid BOOLEAN NOT NULL DEFAULT FALSE,
    date_created TEXT NOT NULL,
    FOREIGN KEY(provider_id) REFERENCES provider(id),
    FOREIGN KEY(client_id) REFERENCES client(id)
);

CREATE TABLE IF NOT EXISTS invoice_item (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    invoice_id INTEGER NOT NULL,
    item_name TEXT NOT NULL,
    amount REAL NOT NULL,
    cost_per_unit REAL NOT NULL,
    FOREIGN KEY(invoice_id) REFERENCES invoice(id)
);

CREATE INDEX IF NOT EXISTS invoice_item_invoice ON invoice_item(invoice_id);
"#;

/// Columns absent from databases written before they were introduced.
/// Each is added on open when `PRAGMA table_info` does not list it.
pub(crate) const ADDED_COLUMNS: &[(&str, &str, &str)] = &[("client", "phone", "TEXT")];
