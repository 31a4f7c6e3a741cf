//! View layer of the registry client.
//!
//! [`Document`] is the imperative surface the controller mutates (inputs,
//! error slots, results region, alerts and prompts). The `table` module turns
//! customers and page state into plain descriptors, so rendering logic can be
//! tested without a live page. [`page::PageDocument`] is the retained
//! in-memory page served by the host.

use serde::Serialize;

use crate::domain::customer::{Customer, CustomerFields};
use crate::domain::types::{CustomerId, Field};

pub mod errors;
pub mod page;
pub mod table;

pub use errors::ErrorPresenter;
pub use table::{EditRowView, PaginationView, ResultsView};

/// Which form an error slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormContext {
    Registration,
    Row(CustomerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

/// Live page the controller reads inputs from and renders into.
pub trait Document {
    /// Current values of the registration inputs, untrimmed.
    fn registration_values(&self) -> CustomerFields;
    /// Clears every registration input.
    fn reset_registration(&mut self);
    /// Current value of the query input, untrimmed.
    fn query_value(&self) -> String;
    /// Current values of the inputs of a row in edit mode.
    fn row_values(&self, id: CustomerId) -> Option<CustomerFields>;
    /// Customer currently displayed in the row with `id`.
    fn displayed_customer(&self, id: CustomerId) -> Option<Customer>;

    /// Error slot for `field` in `context`, if the page has one.
    fn error_slot(&mut self, context: FormContext, field: Field) -> Option<&mut String>;

    /// Replaces the whole results region, pagination included.
    fn replace_results(&mut self, results: ResultsView);
    /// Switches one row to edit mode. Returns `false` if the row is gone.
    fn replace_row(&mut self, id: CustomerId, edit: EditRowView) -> bool;
    /// Replaces the pagination controls; `None` removes them.
    fn replace_pagination(&mut self, pagination: Option<PaginationView>);

    fn alert(&mut self, level: AlertLevel, message: &str);
    /// Asks the user a yes/no question. `false` means declined.
    fn confirm(&mut self, message: &str) -> bool;
    /// Sends the browser to `url`.
    fn navigate(&mut self, url: &str);
}
