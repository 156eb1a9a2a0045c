//! Drives an [`InvoiceWizard`] through a [`Prompter`].

use termsheet_core::{
    Advance, CommitPolicy, InvoiceStore, InvoiceWizard, ItemFields, SelectOption, StepInput,
    StepPrompt,
};
use termsheet_domain::InvoiceId;
use tracing::debug;

use super::{output, prompter::Prompter, CliError};

/// Runs the wizard for a new invoice (`invoice_id` is `None`) or an existing
/// one. Returns the committed invoice id, or `None` when the user abandoned
/// the draft. Rejected answers are reported and the same step is asked again.
pub fn run_wizard<S, P>(
    store: &S,
    prompter: &mut P,
    policy: CommitPolicy,
    invoice_id: Option<InvoiceId>,
) -> Result<Option<InvoiceId>, CliError>
where
    S: InvoiceStore,
    P: Prompter,
{
    let mut wizard = match invoice_id {
        Some(id) => InvoiceWizard::edit(store, id)?,
        None => InvoiceWizard::create(store),
    }
    .with_policy(policy);

    let title = match invoice_id {
        Some(id) => format!("Edit Invoice #{id}"),
        None => "New Invoice".to_string(),
    };
    prompter.begin_view(&title)?;

    let mut prompt = wizard.current()?;
    loop {
        let Some(input) = ask(prompter, &prompt)? else {
            debug!(step = %wizard.step(), "invoice draft abandoned");
            output::info("Invoice discarded.");
            return Ok(None);
        };
        let typed = input.clone();
        match wizard.advance(input) {
            Ok(Advance::Next(next)) => prompt = next,
            Ok(Advance::Committed(id)) => {
                output::success(format!("Invoice #{id} saved."));
                return Ok(Some(id));
            }
            Err(err) if err.is_validation() && !wizard.is_finished() => {
                output::warning(&err);
                if let (StepPrompt::AddItem { fields, .. }, StepInput::Item(rejected)) =
                    (&mut prompt, typed)
                {
                    *fields = rejected;
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn ask<P: Prompter>(prompter: &mut P, prompt: &StepPrompt) -> Result<Option<StepInput>, CliError> {
    let input = match prompt {
        StepPrompt::SelectProvider { options, selected } => {
            choose(prompter, "Select Provider", options, selected.as_deref())?
                .map(StepInput::Provider)
        }
        StepPrompt::SelectClient { options, selected } => {
            choose(prompter, "Select Client", options, selected.as_deref())?
                .map(StepInput::Client)
        }
        StepPrompt::AddItem { fields, replay } => {
            if let Some(position) = replay {
                output::info(format!("Item {} of {}", position.index, position.total));
            }
            item_form(prompter, fields)?.map(StepInput::Item)
        }
        StepPrompt::AskForMore { default } => prompter
            .confirm("Add another item?", *default)?
            .map(StepInput::AddAnother),
        StepPrompt::MarkPaid { default } => prompter
            .confirm("Mark as Paid?", *default)?
            .map(StepInput::Paid),
    };
    Ok(input)
}

fn choose<P: Prompter>(
    prompter: &mut P,
    title: &str,
    options: &[SelectOption],
    selected: Option<&str>,
) -> Result<Option<String>, CliError> {
    if options.is_empty() {
        output::warning(format!("{title}: nothing to choose from yet."));
        return Ok(None);
    }
    let labels: Vec<String> = options.iter().map(|option| option.label.clone()).collect();
    let default = selected
        .and_then(|id| options.iter().position(|option| option.id == id))
        .unwrap_or(0);
    let choice = prompter.select(title, &labels, default)?;
    Ok(choice.and_then(|index| options.get(index)).map(|option| option.id.clone()))
}

fn item_form<P: Prompter>(
    prompter: &mut P,
    initial: &ItemFields,
) -> Result<Option<ItemFields>, CliError> {
    let Some(name) = prompter.input("Item Name", &initial.name)? else {
        return Ok(None);
    };
    let Some(quantity) = prompter.input("Quantity", &initial.quantity)? else {
        return Ok(None);
    };
    let Some(unit_cost) = prompter.input("Cost Per Unit", &initial.unit_cost)? else {
        return Ok(None);
    };
    Ok(Some(ItemFields::new(name, quantity, unit_cost)))
}
