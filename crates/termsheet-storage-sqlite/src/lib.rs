//! Embedded SQLite implementation of the termsheet row store.

mod error;
mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use termsheet_core::{
    line_items::check_fields, CoreError, EntityDirectory, EntityStore, InvoiceStore,
};
use termsheet_domain::{
    Entity, EntityKind, Invoice, InvoiceData, InvoiceId, InvoiceSummary, ItemId, LineItem,
    NewEntity, StoredLineItem,
};
use tracing::{debug, info};
use uuid::Uuid;

use error::{Op, SqlResultExt};

/// Timestamps written by older databases through `CURRENT_TIMESTAMP`.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Single-connection store. Not shared across threads.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and its tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| {
                CoreError::Storage(format!("cannot create {}: {err}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)
            .or_core(Op::Read, || format!("open {}", path.display()))?;
        let store = Self::init(conn, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "database opened");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().or_core(Op::Read, || "open in-memory".into())?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, CoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .or_core(Op::Write, || "enable foreign keys".into())?;
        conn.execute_batch(schema::SCHEMA)
            .or_core(Op::Write, || "create schema".into())?;
        add_missing_columns(&conn)?;
        Ok(Self { conn, path })
    }

    /// `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl EntityDirectory for SqliteStore {
    fn list_entities(&self, kind: EntityKind) -> Result<Vec<Entity>, CoreError> {
        let sql = format!(
            "SELECT id, name, address, email, phone FROM {} ORDER BY name COLLATE NOCASE, id",
            kind.table()
        );
        let context = || format!("list {}", kind.plural());
        let mut stmt = self.conn.prepare(&sql).or_core(Op::Read, context)?;
        let rows = stmt.query_map([], entity_from_row).or_core(Op::Read, context)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .or_core(Op::Read, context)
    }
}

impl EntityStore for SqliteStore {
    fn create_entity(&self, kind: EntityKind, fields: &NewEntity) -> Result<String, CoreError> {
        let id = Uuid::new_v4().to_string();
        let sql = format!(
            "INSERT INTO {} (id, name, address, email, phone) VALUES (?1, ?2, ?3, ?4, ?5)",
            kind.table()
        );
        self.conn
            .execute(
                &sql,
                params![id, fields.name, fields.address, fields.email, fields.phone],
            )
            .or_core(Op::Write, || format!("insert {}", kind.table()))?;
        debug!(kind = kind.table(), %id, "entity row inserted");
        Ok(id)
    }

    fn update_entity(
        &self,
        kind: EntityKind,
        id: &str,
        fields: &NewEntity,
    ) -> Result<(), CoreError> {
        let sql = format!(
            "UPDATE {} SET name = ?1, address = ?2, email = ?3, phone = ?4 WHERE id = ?5",
            kind.table()
        );
        let changed = self
            .conn
            .execute(
                &sql,
                params![fields.name, fields.address, fields.email, fields.phone, id],
            )
            .or_core(Op::Write, || format!("update {} {id}", kind.table()))?;
        if changed == 0 {
            return Err(CoreError::NotFound(format!("{} {id}", kind.table())));
        }
        Ok(())
    }

    fn delete_entity(&self, kind: EntityKind, id: &str) -> Result<(), CoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
        let changed = self
            .conn
            .execute(&sql, params![id])
            .or_core(Op::Delete, || format!("{} {id}", kind.table()))?;
        if changed == 0 {
            return Err(CoreError::NotFound(format!("{} {id}", kind.table())));
        }
        debug!(kind = kind.table(), %id, "entity row deleted");
        Ok(())
    }

    fn get_entity(&self, kind: EntityKind, id: &str) -> Result<Entity, CoreError> {
        let sql = format!(
            "SELECT id, name, address, email, phone FROM {} WHERE id = ?1",
            kind.table()
        );
        self.conn
            .query_row(&sql, params![id], entity_from_row)
            .or_core(Op::Read, || format!("{} {id}", kind.table()))
    }
}

impl InvoiceStore for SqliteStore {
    fn create_invoice(
        &self,
        provider_id: &str,
        client_id: &str,
        paid: bool,
    ) -> Result<InvoiceId, CoreError> {
        self.conn
            .execute(
                "INSERT INTO invoice (provider_id, client_id, paid, date_created)
                 VALUES (?1, ?2, ?3, ?4)",
                params![provider_id, client_id, paid, timestamp_now()],
            )
            .or_core(Op::Write, || "insert invoice".into())?;
        let id = self.conn.last_insert_rowid();
        debug!(invoice_id = id, provider_id, client_id, paid, "invoice row inserted");
        Ok(id)
    }

    fn update_invoice_header(
        &self,
        invoice_id: InvoiceId,
        provider_id: &str,
        client_id: &str,
        paid: bool,
    ) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE invoice SET provider_id = ?1, client_id = ?2, paid = ?3 WHERE id = ?4",
                params![provider_id, client_id, paid, invoice_id],
            )
            .or_core(Op::Write, || format!("update invoice {invoice_id}"))?;
        if changed == 0 {
            return Err(CoreError::NotFound(format!("invoice {invoice_id}")));
        }
        Ok(())
    }

    fn delete_invoice_item(&self, item_id: ItemId) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM invoice_item WHERE id = ?1", params![item_id])
            .or_core(Op::Delete, || format!("invoice item {item_id}"))?;
        if changed == 0 {
            return Err(CoreError::NotFound(format!("invoice item {item_id}")));
        }
        Ok(())
    }

    fn add_invoice_item(
        &self,
        invoice_id: InvoiceId,
        name: &str,
        quantity: f64,
        unit_cost: f64,
    ) -> Result<ItemId, CoreError> {
        check_fields(name, quantity, unit_cost)?;
        self.conn
            .execute(
                "INSERT INTO invoice_item (invoice_id, item_name, amount, cost_per_unit)
                 VALUES (?1, ?2, ?3, ?4)",
                params![invoice_id, name.trim(), quantity, unit_cost],
            )
            .or_core(Op::Write, || format!("invoice {invoice_id}"))?;
        let id = self.conn.last_insert_rowid();
        debug!(invoice_id, item_id = id, "invoice item inserted");
        Ok(id)
    }

    fn get_invoice_items(&self, invoice_id: InvoiceId) -> Result<Vec<StoredLineItem>, CoreError> {
        let context = || format!("items of invoice {invoice_id}");
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, invoice_id, item_name, amount, cost_per_unit
                 FROM invoice_item WHERE invoice_id = ?1 ORDER BY id",
            )
            .or_core(Op::Read, context)?;
        let rows = stmt
            .query_map(params![invoice_id], |row| {
                Ok(StoredLineItem {
                    id: row.get(0)?,
                    invoice_id: row.get(1)?,
                    item: LineItem::new(row.get::<_, String>(2)?, row.get(3)?, row.get(4)?),
                })
            })
            .or_core(Op::Read, context)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .or_core(Op::Read, context)
    }

    fn get_invoice(&self, invoice_id: InvoiceId) -> Result<Invoice, CoreError> {
        self.conn
            .query_row(
                "SELECT id, provider_id, client_id, paid, date_created FROM invoice WHERE id = ?1",
                params![invoice_id],
                |row| {
                    Ok(Invoice {
                        id: row.get(0)?,
                        provider_id: row.get(1)?,
                        client_id: row.get(2)?,
                        paid: paid_column(row, 3)?,
                        date_created: timestamp_column(row, 4)?,
                    })
                },
            )
            .optional()
            .or_core(Op::Read, || format!("invoice {invoice_id}"))?
            .ok_or_else(|| CoreError::NotFound(format!("invoice {invoice_id}")))
    }

    fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, CoreError> {
        let context = || "list invoices".to_string();
        let mut stmt = self
            .conn
            .prepare(
                "SELECT i.id, p.name, c.name, i.date_created, i.paid
                 FROM invoice i
                 JOIN provider p ON i.provider_id = p.id
                 JOIN client c ON i.client_id = c.id
                 ORDER BY julianday(i.date_created) DESC, i.id DESC",
            )
            .or_core(Op::Read, context)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(InvoiceSummary {
                    id: row.get(0)?,
                    provider_name: row.get(1)?,
                    client_name: row.get(2)?,
                    date_created: timestamp_column(row, 3)?,
                    paid: paid_column(row, 4)?,
                })
            })
            .or_core(Op::Read, context)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .or_core(Op::Read, context)
    }

    fn invoice_data(&self, invoice_id: InvoiceId) -> Result<InvoiceData, CoreError> {
        let invoice = self.get_invoice(invoice_id)?;
        let provider = self.get_entity(EntityKind::Provider, &invoice.provider_id)?;
        let client = self.get_entity(EntityKind::Client, &invoice.client_id)?;
        let items = self.get_invoice_items(invoice_id)?;
        Ok(InvoiceData {
            invoice,
            provider,
            client,
            items,
        })
    }

    fn delete_invoice(&self, invoice_id: InvoiceId) -> Result<(), CoreError> {
        self.atomically(|store| {
            let items = store
                .conn
                .execute(
                    "DELETE FROM invoice_item WHERE invoice_id = ?1",
                    params![invoice_id],
                )
                .or_core(Op::Delete, || format!("items of invoice {invoice_id}"))?;
            let changed = store
                .conn
                .execute("DELETE FROM invoice WHERE id = ?1", params![invoice_id])
                .or_core(Op::Delete, || format!("invoice {invoice_id}"))?;
            if changed == 0 {
                return Err(CoreError::NotFound(format!("invoice {invoice_id}")));
            }
            info!(invoice_id, items, "invoice deleted");
            Ok(())
        })
    }

    /// Wraps `f` in a transaction; returning an error rolls it back.
    fn atomically<T, F>(&self, f: F) -> Result<T, CoreError>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T, CoreError>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .or_core(Op::Write, || "begin transaction".into())?;
        let value = f(self)?;
        tx.commit()
            .or_core(Op::Write, || "commit transaction".into())?;
        Ok(value)
    }
}

fn add_missing_columns(conn: &Connection) -> Result<(), CoreError> {
    for &(table, column, decl) in schema::ADDED_COLUMNS {
        let context = || format!("inspect {table}");
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .or_core(Op::Read, context)?;
        let present = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .or_core(Op::Read, context)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .or_core(Op::Read, context)?
            .iter()
            .any(|name| name == column);
        if !present {
            conn.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} {decl};"))
                .or_core(Op::Write, || format!("add {table}.{column}"))?;
            info!(table, column, "column added to existing database");
        }
    }
    Ok(())
}

fn entity_from_row(row: &Row<'_>) -> rusqlite::Result<Entity> {
    Ok(Entity {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
    })
}

/// Older rows may carry a NULL `paid` flag.
fn paid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(row.get::<_, Option<bool>>(idx)?.unwrap_or(false))
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into()))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}
