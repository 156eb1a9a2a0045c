//! Contact records shared by providers and clients.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selects which contact table an [`Entity`] lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Provider,
    Client,
}

impl EntityKind {
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Provider => "provider",
            EntityKind::Client => "client",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Provider => "Provider",
            EntityKind::Client => "Client",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Provider => "Providers",
            EntityKind::Client => "Clients",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted provider or client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Entity {
    /// Label used in selection lists: the name, followed by the email when known.
    pub fn display_label(&self) -> String {
        match self.email.as_deref().filter(|email| !email.is_empty()) {
            Some(email) => format!("{} ({})", self.name, email),
            None => self.name.clone(),
        }
    }

    pub fn to_fields(&self) -> NewEntity {
        NewEntity {
            name: self.name.clone(),
            address: self.address.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Field values collected when creating or editing an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntity {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Trims every field and turns blank optional fields into `None`.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: blank_to_none(self.address.as_deref()),
            email: blank_to_none(self.email.as_deref()),
            phone: blank_to_none(self.phone.as_deref()),
        }
    }
}

fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
