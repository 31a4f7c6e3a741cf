//! Small forms posted by the query bar and row controls.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
/// Search term typed into the query form.
pub struct QueryForm {
    #[serde(default)]
    pub consulta_nome: String,
}

#[derive(Debug, Default, Deserialize)]
/// Answer to the delete confirmation prompt; absent until the user answers.
pub struct DeleteForm {
    #[serde(default)]
    pub confirmado: Option<bool>,
}
