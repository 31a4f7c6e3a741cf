//! Customer table and pagination rendering.
//!
//! The `*_view` functions are pure: customers and page state in, descriptors
//! out. The `render_*` functions push those descriptors into a [`Document`].

use serde::Serialize;

use crate::domain::customer::{Customer, CustomerFields};
use crate::domain::page::PageState;
use crate::domain::types::{CustomerId, Field};
use crate::forms::customer::{PHONE_INPUT_PATTERN, PHONE_INPUT_TITLE};
use crate::view::Document;

pub const NO_RESULTS_MESSAGE: &str = "Nenhum cliente encontrado.";
pub const ACTIONS_HEADER: &str = "Ações";
pub const EXPORT_LABEL: &str = "Exportar para Excel";
pub const PREVIOUS_LABEL: &str = "Anterior";
pub const NEXT_LABEL: &str = "Próxima";

/// Row-level controls. The serialized name doubles as the route segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    #[serde(rename = "editar")]
    Edit,
    #[serde(rename = "deletar")]
    Delete,
    #[serde(rename = "salvar")]
    Save,
    #[serde(rename = "cancelar")]
    Cancel,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Action::Edit => "Editar",
            Action::Delete => "Deletar",
            Action::Save => "Salvar",
            Action::Cancel => "Cancelar",
        }
    }

    /// Style class: edit-like controls share one look, destructive ones another.
    pub const fn class(self) -> &'static str {
        match self {
            Action::Edit | Action::Save => "editar",
            Action::Delete | Action::Cancel => "deletar",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub action: Action,
    pub label: &'static str,
    pub class: &'static str,
}

impl From<Action> for ActionView {
    fn from(action: Action) -> Self {
        Self {
            action,
            label: action.label(),
            class: action.class(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub label: &'static str,
    pub value: String,
}

/// An editable input replacing one data cell.
///
/// `error` is `None` until a message has been written for the cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub field: Field,
    pub name: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub required: bool,
    pub pattern: Option<&'static str>,
    pub title: Option<&'static str>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditRowView {
    pub inputs: Vec<InputView>,
    pub actions: Vec<ActionView>,
}

impl EditRowView {
    pub fn values(&self) -> CustomerFields {
        let mut fields = CustomerFields::default();
        for input in &self.inputs {
            fields.set(input.field, input.value.clone());
        }
        fields
    }

    /// Overwrites input values with what the user typed.
    pub fn fill(&mut self, fields: &CustomerFields) {
        for input in &mut self.inputs {
            input.value = fields.get(input.field).to_string();
        }
    }

    pub fn input_mut(&mut self, field: Field) -> Option<&mut InputView> {
        self.inputs.iter_mut().find(|input| input.field == field)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: Option<CustomerId>,
    pub customer: Customer,
    pub cells: Vec<CellView>,
    pub actions: Vec<ActionView>,
    pub editing: Option<EditRowView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub export_label: &'static str,
}

impl TableView {
    pub fn row(&self, id: CustomerId) -> Option<&RowView> {
        self.rows.iter().find(|row| row.id == Some(id))
    }

    pub fn row_mut(&mut self, id: CustomerId) -> Option<&mut RowView> {
        self.rows.iter_mut().find(|row| row.id == Some(id))
    }
}

/// Content of the results region.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsView {
    /// Nothing queried yet.
    #[default]
    Blank,
    Message { text: String },
    Table(TableView),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub show_previous: bool,
    pub show_next: bool,
    pub label: String,
    pub previous_label: &'static str,
    pub next_label: &'static str,
}

pub fn row_view(customer: &Customer) -> RowView {
    let cells = Field::ALL
        .into_iter()
        .map(|field| CellView {
            label: field.label(),
            value: customer.fields.get(field).to_string(),
        })
        .collect();

    RowView {
        id: customer.id,
        customer: customer.clone(),
        cells,
        actions: vec![Action::Edit.into(), Action::Delete.into()],
        editing: None,
    }
}

pub fn list_view(customers: &[Customer]) -> ResultsView {
    if customers.is_empty() {
        return ResultsView::Message {
            text: NO_RESULTS_MESSAGE.to_string(),
        };
    }

    let headers = Field::ALL
        .into_iter()
        .map(Field::label)
        .chain(std::iter::once(ACTIONS_HEADER))
        .collect();

    ResultsView::Table(TableView {
        headers,
        rows: customers.iter().map(row_view).collect(),
        export_label: EXPORT_LABEL,
    })
}

pub fn edit_row_view(customer: &Customer) -> EditRowView {
    let inputs = Field::ALL
        .into_iter()
        .map(|field| {
            let is_phone = field == Field::Phone;
            InputView {
                field,
                name: field.key(),
                input_type: if field == Field::Email { "email" } else { "text" },
                value: customer.fields.get(field).to_string(),
                required: true,
                pattern: is_phone.then_some(PHONE_INPUT_PATTERN),
                title: is_phone.then_some(PHONE_INPUT_TITLE),
                error: None,
            }
        })
        .collect();

    EditRowView {
        inputs,
        actions: vec![Action::Save.into(), Action::Cancel.into()],
    }
}

/// Controls for the page being shown.
pub fn pagination_view(state: &PageState) -> PaginationView {
    PaginationView {
        show_previous: state.has_previous(),
        show_next: state.has_next(),
        label: format!(
            "Página {} de {}",
            state.current_page(),
            state.total_pages()
        ),
        previous_label: PREVIOUS_LABEL,
        next_label: NEXT_LABEL,
    }
}

/// Replaces the results region with `customers`.
pub fn render_list<D>(ui: &mut D, customers: &[Customer])
where
    D: Document + ?Sized,
{
    ui.replace_results(list_view(customers));
}

/// Turns the row of `customer` into inputs with Save/Cancel controls.
pub fn render_edit_row<D>(ui: &mut D, customer: &Customer) -> bool
where
    D: Document + ?Sized,
{
    let Some(id) = customer.id else {
        return false;
    };
    ui.replace_row(id, edit_row_view(customer))
}

pub fn render_pagination<D>(ui: &mut D, state: &PageState)
where
    D: Document + ?Sized,
{
    ui.replace_pagination(Some(pagination_view(state)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: i64, name: &str) -> Customer {
        Customer::new(
            Some(CustomerId::new(id)),
            CustomerFields::new(name, "Rua A", "(11) 91234-5678", "x@y.com"),
        )
    }

    #[test]
    fn empty_list_shows_no_results_message() {
        assert_eq!(
            list_view(&[]),
            ResultsView::Message {
                text: "Nenhum cliente encontrado.".to_string()
            }
        );
    }

    #[test]
    fn list_builds_one_row_per_customer_with_actions() {
        let ResultsView::Table(table) = list_view(&[customer(1, "Ana"), customer(2, "Bia")]) else {
            panic!("expected a table");
        };

        assert_eq!(
            table.headers,
            vec!["Nome", "Endereço", "Telefone", "E-mail", "Ações"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].cells[0].value, "Bia");
        assert_eq!(table.rows[1].cells[2].label, "Telefone");
        let labels: Vec<_> = table.rows[0].actions.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["Editar", "Deletar"]);
        assert_eq!(table.export_label, "Exportar para Excel");
    }

    #[test]
    fn edit_row_prefills_inputs_and_hints_phone() {
        let edit = edit_row_view(&customer(4, "Caio"));

        assert_eq!(edit.inputs[0].value, "Caio");
        let phone = &edit.inputs[Field::Phone.index()];
        assert_eq!(phone.pattern, Some(r"\(\d{2}\) \d{5}-\d{4}"));
        assert_eq!(phone.title, Some("Use o formato (XX) 99999-9999"));
        assert_eq!(edit.inputs[Field::Email.index()].input_type, "email");
        assert!(edit.inputs.iter().all(|input| input.required));
        let labels: Vec<_> = edit.actions.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["Salvar", "Cancelar"]);
    }

    #[test]
    fn pagination_hides_both_controls_on_single_page() {
        let mut state = PageState::default();
        state.set_total_pages(1);

        let view = pagination_view(&state);

        assert!(!view.show_previous);
        assert!(!view.show_next);
        assert_eq!(view.label, "Página 1 de 1");
    }

    #[test]
    fn pagination_shows_both_controls_in_the_middle() {
        let mut state = PageState::default();
        state.set_total_pages(3);
        state.next();

        let view = pagination_view(&state);

        assert!(view.show_previous);
        assert!(view.show_next);
        assert_eq!(view.label, "Página 2 de 3");
    }

    #[test]
    fn pagination_label_follows_current_page() {
        let mut state = PageState::default();
        state.set_total_pages(3);
        state.next();
        state.next();
        state.set_total_pages(2);

        let view = pagination_view(&state);

        assert!(view.show_previous);
        assert!(!view.show_next);
        assert_eq!(view.label, "Página 3 de 2");
    }

    #[test]
    fn edit_values_follow_typed_input() {
        let mut edit = edit_row_view(&customer(5, "Davi"));
        let typed = CustomerFields::new("Davi S", "Rua Z", "(31) 98888-7777", "d@s.com");

        edit.fill(&typed);

        assert_eq!(edit.values(), typed);
    }
}
