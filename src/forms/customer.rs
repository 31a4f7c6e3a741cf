//! Registration and inline-edit validation.
//!
//! Registration reports every failing field at once. Inline edit checks for
//! blanks first and then stops at the first bad format, phone before email.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::CustomerFields;
use crate::domain::types::Field;
use crate::forms::FieldErrors;

/// Phone shape accepted by the backend: `(DD) DDDDD-DDDD`.
pub const PHONE_PATTERN: &str = r"^\(\d{2}\) \d{5}-\d{4}$";
/// Minimal `local@domain.tld` email shape.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Pattern hint attached to phone inputs.
pub const PHONE_INPUT_PATTERN: &str = r"\(\d{2}\) \d{5}-\d{4}";
pub const PHONE_INPUT_TITLE: &str = "Use o formato (XX) 99999-9999";

pub const INVALID_PHONE_MESSAGE: &str = "Telefone inválido. Use o formato (XX) 99999-9999.";
pub const INVALID_EMAIL_MESSAGE: &str = "E-mail inválido.";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Form data for registering a new customer.
///
/// Field names match the registration inputs and the backend keys.
pub struct RegistrationForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Por favor, preencha o campo nome."))]
    pub nome: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Por favor, preencha o campo endereço."))]
    pub endereco: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Por favor, preencha o campo telefone."),
        regex(
            path = *PHONE_RE,
            message = "Telefone inválido. Use o formato (XX) 99999-9999."
        )
    )]
    pub telefone: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Por favor, preencha o campo e-mail."),
        regex(path = *EMAIL_RE, message = "E-mail inválido.")
    )]
    pub email: String,
}

impl From<&CustomerFields> for RegistrationForm {
    fn from(fields: &CustomerFields) -> Self {
        let fields = fields.trimmed();
        Self {
            nome: fields.name,
            endereco: fields.address,
            telefone: fields.phone,
            email: fields.email,
        }
    }
}

impl From<RegistrationForm> for CustomerFields {
    fn from(form: RegistrationForm) -> Self {
        CustomerFields::new(form.nome, form.endereco, form.telefone, form.email)
    }
}

/// Validates a registration submission.
///
/// Every failing field gets one message. A blank field reports the presence
/// message, never the format one.
pub fn validate_registration(fields: &CustomerFields) -> FieldErrors {
    match RegistrationForm::from(fields).validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(errors),
    }
}

/// Message shown in a row when one of its inputs was left blank.
pub fn empty_edit_message(field: Field) -> String {
    format!("O campo {} não pode estar vazio.", field.key())
}

/// Validates an inline row edit.
///
/// Blank fields are all reported. Formats are only checked once nothing is
/// blank, and only the first bad format is reported.
pub fn validate_edit(fields: &CustomerFields) -> FieldErrors {
    let fields = fields.trimmed();

    let blanks: FieldErrors = Field::ALL
        .into_iter()
        .filter(|field| fields.get(*field).is_empty())
        .map(|field| (field.key(), empty_edit_message(field)))
        .collect();
    if !blanks.is_empty() {
        return blanks;
    }

    let mut errors = FieldErrors::new();
    if !is_valid_phone(&fields.phone) {
        errors.insert(Field::Phone.key(), INVALID_PHONE_MESSAGE);
    } else if !is_valid_email(&fields.email) {
        errors.insert(Field::Email.key(), INVALID_EMAIL_MESSAGE);
    }
    errors
}
