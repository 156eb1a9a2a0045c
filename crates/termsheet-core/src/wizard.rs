//! Multi-step invoice authoring.
//!
//! The wizard walks `SelectProvider → SelectClient → AddItem → AskForMore →
//! MarkPaid → Commit`. Each call to [`InvoiceWizard::advance`] takes the typed
//! answer to the current step, merges it into the draft and returns either a
//! description of the next step or the committed invoice id. Rendering and
//! error redisplay belong to the caller.
//!
//! In edit mode the existing items are replayed through `AddItem` one by one
//! (pre-filled, replaced in place) before the "add another?" question is ever
//! asked, so no existing item is dropped unless the user changes it.

use std::fmt;

use termsheet_domain::{Entity, InvoiceId};
use tracing::{debug, warn};

use crate::{
    commit::{CommitAdapter, CommitPolicy},
    draft::InvoiceDraft,
    line_items::{self, ItemFields},
    storage::InvoiceStore,
    CoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectProvider,
    SelectClient,
    AddItem,
    AskForMore,
    MarkPaid,
    /// Terminal. The wizard accepts no further input.
    Commit,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardStep::SelectProvider => "Select Provider",
            WizardStep::SelectClient => "Select Client",
            WizardStep::AddItem => "Invoice Item",
            WizardStep::AskForMore => "Add another item?",
            WizardStep::MarkPaid => "Mark as Paid?",
            WizardStep::Commit => "Commit",
        };
        f.write_str(label)
    }
}

/// One selectable provider or client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl From<&Entity> for SelectOption {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            label: entity.display_label(),
        }
    }
}

/// Which existing item is being replayed, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayPosition {
    pub index: usize,
    pub total: usize,
}

/// What the caller should prompt for next, with any pre-fill values.
#[derive(Debug, Clone, PartialEq)]
pub enum StepPrompt {
    SelectProvider {
        options: Vec<SelectOption>,
        selected: Option<String>,
    },
    SelectClient {
        options: Vec<SelectOption>,
        selected: Option<String>,
    },
    AddItem {
        fields: ItemFields,
        replay: Option<ReplayPosition>,
    },
    AskForMore {
        default: bool,
    },
    MarkPaid {
        default: bool,
    },
}

impl StepPrompt {
    pub fn step(&self) -> WizardStep {
        match self {
            StepPrompt::SelectProvider { .. } => WizardStep::SelectProvider,
            StepPrompt::SelectClient { .. } => WizardStep::SelectClient,
            StepPrompt::AddItem { .. } => WizardStep::AddItem,
            StepPrompt::AskForMore { .. } => WizardStep::AskForMore,
            StepPrompt::MarkPaid { .. } => WizardStep::MarkPaid,
        }
    }
}

/// The user's answer to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    Provider(String),
    Client(String),
    Item(ItemFields),
    AddAnother(bool),
    Paid(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Next(StepPrompt),
    Committed(InvoiceId),
}

pub struct InvoiceWizard<'s, S> {
    store: &'s S,
    draft: InvoiceDraft,
    step: WizardStep,
    policy: CommitPolicy,
}

impl<'s, S: InvoiceStore> InvoiceWizard<'s, S> {
    pub fn create(store: &'s S) -> Self {
        Self::with_draft(store, InvoiceDraft::new_create())
    }

    /// Loads the invoice header and its items and starts an edit session.
    pub fn edit(store: &'s S, invoice_id: InvoiceId) -> Result<Self, CoreError> {
        let invoice = store.get_invoice(invoice_id)?;
        let items = store
            .get_invoice_items(invoice_id)?
            .into_iter()
            .map(|stored| stored.item)
            .collect();
        Ok(Self::with_draft(
            store,
            InvoiceDraft::from_existing(&invoice, items),
        ))
    }

    pub fn with_draft(store: &'s S, draft: InvoiceDraft) -> Self {
        Self {
            store,
            draft,
            step: WizardStep::SelectProvider,
            policy: CommitPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn is_finished(&self) -> bool {
        self.step == WizardStep::Commit
    }

    /// Describes the current step. Selection steps reload their options.
    pub fn current(&self) -> Result<StepPrompt, CoreError> {
        match self.step {
            WizardStep::SelectProvider => Ok(StepPrompt::SelectProvider {
                options: options(self.store.list_providers()?),
                selected: self.prefill_id(self.draft.provider_id()),
            }),
            WizardStep::SelectClient => Ok(StepPrompt::SelectClient {
                options: options(self.store.list_clients()?),
                selected: self.prefill_id(self.draft.client_id()),
            }),
            WizardStep::AddItem => Ok(self.item_prompt()),
            WizardStep::AskForMore => Ok(StepPrompt::AskForMore { default: false }),
            WizardStep::MarkPaid => Ok(StepPrompt::MarkPaid {
                default: self.draft.is_edit() && self.draft.paid(),
            }),
            WizardStep::Commit => Err(finished()),
        }
    }

    /// Applies the answer to the current step. A rejected answer leaves the
    /// wizard exactly where it was. Answering `MarkPaid` commits the draft;
    /// the wizard is finished afterwards whether or not the commit succeeded.
    pub fn advance(&mut self, input: StepInput) -> Result<Advance, CoreError> {
        let next = self.apply(input).map_err(|err| {
            if err.is_validation() {
                warn!(step = ?self.step, error = %err, "step input rejected");
            }
            err
        })?;
        debug!(from = ?self.step, to = ?next, cursor = self.draft.cursor(), "wizard advanced");
        self.step = next;

        if next == WizardStep::Commit {
            let invoice_id = CommitAdapter::new(self.store)
                .with_policy(self.policy)
                .commit(&self.draft)?;
            return Ok(Advance::Committed(invoice_id));
        }
        self.current().map(Advance::Next)
    }

    fn apply(&mut self, input: StepInput) -> Result<WizardStep, CoreError> {
        match (self.step, input) {
            (WizardStep::SelectProvider, StepInput::Provider(id)) => {
                self.draft.provider_id = require_selection(&id, "provider")?;
                Ok(WizardStep::SelectClient)
            }
            (WizardStep::SelectClient, StepInput::Client(id)) => {
                self.draft.client_id = require_selection(&id, "client")?;
                Ok(WizardStep::AddItem)
            }
            (WizardStep::AddItem, StepInput::Item(fields)) => {
                let item = line_items::validate(&fields)?;
                if self.draft.is_replaying() {
                    self.draft.items.replace_at(self.draft.cursor, item)?;
                    self.draft.cursor += 1;
                } else {
                    self.draft.items.append(item);
                }
                if self.draft.is_replaying() {
                    Ok(WizardStep::AddItem)
                } else {
                    Ok(WizardStep::AskForMore)
                }
            }
            (WizardStep::AskForMore, StepInput::AddAnother(true)) => Ok(WizardStep::AddItem),
            (WizardStep::AskForMore, StepInput::AddAnother(false)) => Ok(WizardStep::MarkPaid),
            (WizardStep::MarkPaid, StepInput::Paid(paid)) => {
                self.draft.paid = paid;
                Ok(WizardStep::Commit)
            }
            (WizardStep::Commit, _) => Err(finished()),
            (step, input) => Err(CoreError::InvalidOperation(format!(
                "{input:?} does not answer the {step:?} step"
            ))),
        }
    }

    fn item_prompt(&self) -> StepPrompt {
        if self.draft.is_replaying() {
            let cursor = self.draft.cursor();
            let fields = self
                .draft
                .items()
                .get(cursor)
                .map(ItemFields::from_item)
                .unwrap_or_default();
            StepPrompt::AddItem {
                fields,
                replay: Some(ReplayPosition {
                    index: cursor + 1,
                    total: self.draft.existing_item_count(),
                }),
            }
        } else {
            StepPrompt::AddItem {
                fields: ItemFields::blank(),
                replay: None,
            }
        }
    }

    fn prefill_id(&self, id: &str) -> Option<String> {
        if self.draft.is_edit() && !id.is_empty() {
            Some(id.to_string())
        } else {
            None
        }
    }
}

fn options(entities: Vec<Entity>) -> Vec<SelectOption> {
    entities.iter().map(SelectOption::from).collect()
}

fn require_selection(id: &str, label: &str) -> Result<String, CoreError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CoreError::validation(format!("{label} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn finished() -> CoreError {
    CoreError::InvalidOperation("the invoice wizard has already finished".into())
}
