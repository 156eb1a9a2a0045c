use termsheet_domain::{Entity, EntityKind, NewEntity};
use tracing::info;

use crate::{storage::EntityStore, CoreError};

/// Validated create/update/delete of providers and clients.
pub struct EntityService;

impl EntityService {
    /// Trims the submitted fields and rejects a blank name.
    pub fn validate(kind: EntityKind, fields: &NewEntity) -> Result<NewEntity, CoreError> {
        let normalized = fields.normalized();
        if normalized.name.is_empty() {
            return Err(CoreError::validation(format!(
                "{} name is required",
                kind.table()
            )));
        }
        Ok(normalized)
    }

    pub fn create<S: EntityStore + ?Sized>(
        store: &S,
        kind: EntityKind,
        fields: &NewEntity,
    ) -> Result<String, CoreError> {
        let fields = Self::validate(kind, fields)?;
        let id = store.create_entity(kind, &fields)?;
        info!(kind = kind.table(), %id, name = %fields.name, "entity created");
        Ok(id)
    }

    pub fn update<S: EntityStore + ?Sized>(
        store: &S,
        kind: EntityKind,
        id: &str,
        fields: &NewEntity,
    ) -> Result<(), CoreError> {
        let fields = Self::validate(kind, fields)?;
        store.update_entity(kind, id, &fields)?;
        info!(kind = kind.table(), %id, "entity updated");
        Ok(())
    }

    pub fn delete<S: EntityStore + ?Sized>(
        store: &S,
        kind: EntityKind,
        id: &str,
    ) -> Result<(), CoreError> {
        store.delete_entity(kind, id)?;
        info!(kind = kind.table(), %id, "entity deleted");
        Ok(())
    }

    pub fn find<S: EntityStore + ?Sized>(
        store: &S,
        kind: EntityKind,
        id: &str,
    ) -> Result<Entity, CoreError> {
        store.get_entity(kind, id)
    }
}
