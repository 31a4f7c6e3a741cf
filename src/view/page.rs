//! Retained in-memory page.
//!
//! Holds what a browser page would hold between interactions: input values,
//! error slots, the results region and pending alerts, prompts and
//! navigations. The host fills inputs from posted forms, lets the controller
//! act on the page and renders it back out.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::customer::{Customer, CustomerFields};
use crate::domain::types::{CustomerId, Field};
use crate::view::table::{EditRowView, PaginationView, ResultsView};
use crate::view::{Alert, AlertLevel, Document, FormContext};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationView {
    pub values: CustomerFields,
    pub errors: BTreeMap<Field, String>,
}

impl Default for RegistrationView {
    fn default() -> Self {
        Self {
            values: CustomerFields::default(),
            errors: Field::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PageDocument {
    registration: RegistrationView,
    query: String,
    results: ResultsView,
    pagination: Option<PaginationView>,
    #[serde(skip)]
    alerts: Vec<Alert>,
    #[serde(skip)]
    confirmation: Option<bool>,
    #[serde(skip)]
    confirmation_request: Option<String>,
    #[serde(skip)]
    navigation: Option<String>,
}

impl PageDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registration(&self) -> &RegistrationView {
        &self.registration
    }

    pub fn set_registration_values(&mut self, values: CustomerFields) {
        self.registration.values = values;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Copies typed values into a row in edit mode. Returns `false` if the
    /// row is not being edited.
    pub fn set_row_values(&mut self, id: CustomerId, values: &CustomerFields) -> bool {
        match self.editing_row_mut(id) {
            Some(edit) => {
                edit.fill(values);
                true
            }
            None => false,
        }
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn pagination(&self) -> Option<&PaginationView> {
        self.pagination.as_ref()
    }

    pub fn editing_row(&self, id: CustomerId) -> Option<&EditRowView> {
        match &self.results {
            ResultsView::Table(table) => table.row(id).and_then(|row| row.editing.as_ref()),
            _ => None,
        }
    }

    fn editing_row_mut(&mut self, id: CustomerId) -> Option<&mut EditRowView> {
        match &mut self.results {
            ResultsView::Table(table) => table.row_mut(id).and_then(|row| row.editing.as_mut()),
            _ => None,
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Drains alerts once they have been shown.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    /// Supplies the user's answer for the next [`Document::confirm`] call.
    pub fn answer_confirmation(&mut self, answer: bool) {
        self.confirmation = Some(answer);
    }

    /// Question asked by a `confirm` call that had no answer yet.
    pub fn take_confirmation_request(&mut self) -> Option<String> {
        self.confirmation_request.take()
    }

    pub fn take_navigation(&mut self) -> Option<String> {
        self.navigation.take()
    }
}

impl Document for PageDocument {
    fn registration_values(&self) -> CustomerFields {
        self.registration.values.clone()
    }

    fn reset_registration(&mut self) {
        self.registration.values = CustomerFields::default();
    }

    fn query_value(&self) -> String {
        self.query.clone()
    }

    fn row_values(&self, id: CustomerId) -> Option<CustomerFields> {
        self.editing_row(id).map(EditRowView::values)
    }

    fn displayed_customer(&self, id: CustomerId) -> Option<Customer> {
        match &self.results {
            ResultsView::Table(table) => table.row(id).map(|row| row.customer.clone()),
            _ => None,
        }
    }

    fn error_slot(&mut self, context: FormContext, field: Field) -> Option<&mut String> {
        match context {
            FormContext::Registration => self.registration.errors.get_mut(&field),
            FormContext::Row(id) => self
                .editing_row_mut(id)
                .and_then(|edit| edit.input_mut(field))
                .map(|input| input.error.get_or_insert_with(String::new)),
        }
    }

    fn replace_results(&mut self, results: ResultsView) {
        self.results = results;
        self.pagination = None;
    }

    fn replace_row(&mut self, id: CustomerId, edit: EditRowView) -> bool {
        match &mut self.results {
            ResultsView::Table(table) => match table.row_mut(id) {
                Some(row) => {
                    row.editing = Some(edit);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn replace_pagination(&mut self, pagination: Option<PaginationView>) {
        self.pagination = pagination;
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        self.alerts.push(Alert {
            level,
            message: message.to_string(),
        });
    }

    fn confirm(&mut self, message: &str) -> bool {
        match self.confirmation.take() {
            Some(answer) => answer,
            None => {
                self.confirmation_request = Some(message.to_string());
                false
            }
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigation = Some(url.to_string());
    }
}
