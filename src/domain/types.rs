//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers are opaque to the client: they are assigned by the backend and
//! only ever echoed back in request paths.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Identifier text was not a backend identifier.
    #[error("invalid customer id: {0}")]
    InvalidId(String),
    /// Field key is not one of the registry fields.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Unique identifier for a customer, assigned by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value backing this identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CustomerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for CustomerId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidId(s.to_string()))
    }
}

/// The four business fields of a customer record.
///
/// Wire keys are kept in the backend's locale and must not change.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    #[serde(rename = "nome")]
    Name,
    #[serde(rename = "endereco")]
    Address,
    #[serde(rename = "telefone")]
    Phone,
    #[serde(rename = "email")]
    Email,
}

impl Field {
    /// Column order used by forms and tables.
    pub const ALL: [Field; 4] = [Field::Name, Field::Address, Field::Phone, Field::Email];

    /// Key used in request bodies, error maps and error slot ids.
    pub const fn key(self) -> &'static str {
        match self {
            Field::Name => "nome",
            Field::Address => "endereco",
            Field::Phone => "telefone",
            Field::Email => "email",
        }
    }

    /// Table column header.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Nome",
            Field::Address => "Endereço",
            Field::Phone => "Telefone",
            Field::Email => "E-mail",
        }
    }

    /// Noun used in "please fill" messages.
    pub const fn noun(self) -> &'static str {
        match self {
            Field::Name => "nome",
            Field::Address => "endereço",
            Field::Phone => "telefone",
            Field::Email => "e-mail",
        }
    }

    /// Column position inside a customer row.
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| TypeConstraintError::UnknownField(s.to_string()))
    }
}
