//! Provider and client list views, action menus and forms.

use termsheet_core::{EntityService, EntityStore, InvoiceStore};
use termsheet_domain::{Entity, EntityKind, NewEntity};

use super::{
    app::{recover, App},
    output,
    prompter::Prompter,
    CliError,
};

pub(crate) fn list_view<S, P>(app: &mut App<S, P>, kind: EntityKind) -> Result<(), CliError>
where
    S: EntityStore + InvoiceStore,
    P: Prompter,
{
    loop {
        let entities = app.store.list_entities(kind)?;
        let mut items: Vec<String> = entities.iter().map(Entity::display_label).collect();
        items.push(format!("+ Create New {}", kind.label()));
        items.push("Back".to_string());

        app.prompter.begin_view(kind.plural())?;
        let title = format!(
            "Select a {} or create a new one",
            kind.label().to_lowercase()
        );
        match app.prompter.select(&title, &items, 0)? {
            Some(index) if index < entities.len() => {
                recover(action_menu(app, kind, &entities[index]))?;
            }
            Some(index) if index == entities.len() => recover(create(app, kind))?,
            _ => return Ok(()),
        }
    }
}

fn create<S, P>(app: &mut App<S, P>, kind: EntityKind) -> Result<(), CliError>
where
    S: EntityStore,
    P: Prompter,
{
    let Some(fields) = entity_form(&mut app.prompter, kind, &NewEntity::default())? else {
        return Ok(());
    };
    EntityService::create(&app.store, kind, &fields)?;
    output::success(format!("{} {} created.", kind.label(), fields.name.trim()));
    Ok(())
}

fn action_menu<S, P>(app: &mut App<S, P>, kind: EntityKind, entity: &Entity) -> Result<(), CliError>
where
    S: EntityStore,
    P: Prompter,
{
    let items = ["Edit", "Delete", "Back"].map(String::from);
    let title = format!("{}: {}", kind.label(), entity.name);
    match app.prompter.select(&title, &items, 0)? {
        Some(0) => {
            let Some(fields) = entity_form(&mut app.prompter, kind, &entity.to_fields())? else {
                return Ok(());
            };
            EntityService::update(&app.store, kind, &entity.id, &fields)?;
            output::success(format!("{} updated.", kind.label()));
        }
        Some(1) => {
            if app.settings.confirm_deletes
                && app.prompter.confirm("Are you sure?", false)? != Some(true)
            {
                return Ok(());
            }
            EntityService::delete(&app.store, kind, &entity.id)?;
            output::success(format!("{} {} deleted.", kind.label(), entity.name));
        }
        _ => {}
    }
    Ok(())
}

/// Name, Address, Email and Phone, pre-filled from `initial`. The name is
/// asked again until it is not blank. `None` when the user cancels.
pub(crate) fn entity_form<P: Prompter>(
    prompter: &mut P,
    kind: EntityKind,
    initial: &NewEntity,
) -> Result<Option<NewEntity>, CliError> {
    let name_prompt = format!("{} Name", kind.label());
    let mut name_default = initial.name.clone();
    let name = loop {
        let Some(name) = prompter.input(&name_prompt, &name_default)? else {
            return Ok(None);
        };
        if !name.trim().is_empty() {
            break name;
        }
        output::warning(format!("{} name is required", kind.table()));
        name_default = name;
    };

    let Some(address) = prompter.input("Address", initial.address.as_deref().unwrap_or(""))? else {
        return Ok(None);
    };
    let Some(email) = prompter.input("Email", initial.email.as_deref().unwrap_or(""))? else {
        return Ok(None);
    };
    let Some(phone) = prompter.input("Phone", initial.phone.as_deref().unwrap_or(""))? else {
        return Ok(None);
    };

    let fields = NewEntity {
        name,
        address: Some(address),
        email: Some(email),
        phone: Some(phone),
    };
    Ok(Some(fields.normalized()))
}
