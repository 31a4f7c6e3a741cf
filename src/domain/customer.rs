use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, Field};

/// Business fields of a customer as exchanged with the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerFields {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl CustomerFields {
    /// Builds a field set with every value trimmed.
    #[must_use]
    pub fn new(
        name: impl AsRef<str>,
        address: impl AsRef<str>,
        phone: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            address: address.as_ref().trim().to_string(),
            phone: phone.as_ref().trim().to_string(),
            email: email.as_ref().trim().to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Address => self.address = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
        }
    }

    /// Returns a copy with surrounding whitespace removed from every value.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self::new(&self.name, &self.address, &self.phone, &self.email)
    }
}

/// A customer record as returned by the backend.
///
/// `id` is absent until the backend has created the record.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    #[serde(flatten)]
    pub fields: CustomerFields,
}

impl Customer {
    pub fn new(id: Option<CustomerId>, fields: CustomerFields) -> Self {
        Self { id, fields }
    }
}
