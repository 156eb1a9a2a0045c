//! Invoice list view and the per-invoice action menu.

use termsheet_core::{EntityStore, InvoiceStore};
use termsheet_domain::InvoiceId;

use super::{
    app::{recover, App},
    output,
    prompter::Prompter,
    render::{invoice_list_label, render_invoice},
    wizard_driver::run_wizard,
    CliError,
};

const ACTIONS: [&str; 4] = ["View Invoice", "Edit Invoice", "Delete Invoice", "Back"];

pub(crate) fn list_view<S, P>(app: &mut App<S, P>) -> Result<(), CliError>
where
    S: EntityStore + InvoiceStore,
    P: Prompter,
{
    loop {
        let summaries = app.store.list_invoices()?;
        let mut items: Vec<String> = summaries.iter().map(invoice_list_label).collect();
        items.push("+ Create New Invoice".to_string());
        items.push("Back".to_string());

        app.prompter.begin_view("Invoices")?;
        match app
            .prompter
            .select("Select an invoice or create a new one", &items, 0)?
        {
            Some(index) if index < summaries.len() => {
                recover(action_menu(app, summaries[index].id))?;
            }
            Some(index) if index == summaries.len() => {
                recover(
                    run_wizard(
                        &app.store,
                        &mut app.prompter,
                        app.settings.commit_policy,
                        None,
                    )
                    .map(drop),
                )?;
            }
            _ => return Ok(()),
        }
    }
}

fn action_menu<S, P>(app: &mut App<S, P>, invoice_id: InvoiceId) -> Result<(), CliError>
where
    S: EntityStore + InvoiceStore,
    P: Prompter,
{
    let items = ACTIONS.map(String::from);
    let title = format!("Invoice #{invoice_id}: what would you like to do?");
    match app.prompter.select(&title, &items, 0)? {
        Some(0) => {
            let data = app.store.invoice_data(invoice_id)?;
            app.prompter.begin_view(&format!("Invoice #{invoice_id}"))?;
            println!("{}", render_invoice(&data, &app.settings.render));
            app.prompter.pause()?;
        }
        Some(1) => {
            run_wizard(
                &app.store,
                &mut app.prompter,
                app.settings.commit_policy,
                Some(invoice_id),
            )?;
        }
        Some(2) => {
            if app.settings.confirm_deletes
                && app.prompter.confirm("Are You Sure?", false)? != Some(true)
            {
                return Ok(());
            }
            app.store.delete_invoice(invoice_id)?;
            output::success(format!("Invoice #{invoice_id} deleted."));
        }
        _ => {}
    }
    Ok(())
}
