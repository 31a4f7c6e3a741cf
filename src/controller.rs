//! Event handling for the registry client.
//!
//! [`FormController`] receives one [`UiEvent`] at a time, validates input,
//! calls the backend and re-renders through the view layer. Pagination state
//! is owned by the caller and passed in with every event.

use crate::api::{ApiError, ApiResult, CustomerApi};
use crate::domain::page::{ListResponse, PageState};
use crate::domain::types::CustomerId;
use crate::forms::customer::{validate_edit, validate_registration};
use crate::view::table::{render_edit_row, render_list, render_pagination};
use crate::view::{AlertLevel, Document, ErrorPresenter, FormContext};

pub const CREATED_MESSAGE: &str = "Cliente cadastrado com sucesso!";
pub const UPDATED_MESSAGE: &str = "Cliente atualizado com sucesso!";
pub const DELETED_MESSAGE: &str = "Cliente deletado com sucesso!";
pub const CREATE_FAILED_MESSAGE: &str = "Erro ao cadastrar cliente.";
pub const UPDATE_FAILED_MESSAGE: &str = "Erro ao atualizar cliente.";
pub const DELETE_FAILED_MESSAGE: &str = "Erro ao deletar cliente.";
pub const LIST_FAILED_MESSAGE: &str = "Erro ao consultar clientes.";
pub const CONNECTION_FAILED_MESSAGE: &str = "Erro ao conectar com o servidor.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido.";
pub const DELETE_CONFIRMATION: &str = "Tem certeza que deseja deletar este cliente?";

/// Interactions the page can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    SubmitRegistration,
    SubmitQuery,
    NextPage,
    PreviousPage,
    EditRow(CustomerId),
    SaveRow(CustomerId),
    CancelEdit(CustomerId),
    DeleteRow(CustomerId),
    Export,
}

pub struct FormController<A> {
    api: A,
}

impl<A> FormController<A>
where
    A: CustomerApi,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Handles one event to completion.
    ///
    /// Failures are reported on the page; the page is always left ready for
    /// the next interaction.
    pub async fn handle<D>(&self, ui: &mut D, state: &mut PageState, event: UiEvent)
    where
        D: Document + ?Sized,
    {
        log::debug!("Handling {event:?}");
        match event {
            UiEvent::SubmitRegistration => self.submit_registration(ui).await,
            UiEvent::SubmitQuery => self.submit_query(ui, state).await,
            UiEvent::NextPage => {
                if state.next() {
                    self.refresh(ui, state).await;
                }
            }
            UiEvent::PreviousPage => {
                if state.prev() {
                    self.refresh(ui, state).await;
                }
            }
            UiEvent::EditRow(id) => self.edit_row(ui, id),
            UiEvent::SaveRow(id) => self.save_row(ui, state, id).await,
            UiEvent::CancelEdit(_) => self.refresh(ui, state).await,
            UiEvent::DeleteRow(id) => self.delete_row(ui, state, id).await,
            UiEvent::Export => ui.navigate(&self.api.export_url(state.last_query())),
        }
    }

    pub async fn submit_registration<D>(&self, ui: &mut D)
    where
        D: Document + ?Sized,
    {
        let presenter = ErrorPresenter::new(FormContext::Registration);
        presenter.clear_errors(ui);

        let fields = ui.registration_values().trimmed();
        let errors = validate_registration(&fields);
        if !errors.is_empty() {
            log::info!("Registration rejected locally: {errors:?}");
            presenter.show_errors(ui, &errors);
            return;
        }

        log::info!("Registering customer {}", fields.name);
        match self.api.create_customer(&fields).await {
            Ok(_) => {
                ui.alert(AlertLevel::Success, CREATED_MESSAGE);
                ui.reset_registration();
            }
            Err(ApiError::Validation(errors)) => {
                log::warn!("Registration rejected by backend: {errors:?}");
                presenter.show_errors(ui, &errors);
            }
            Err(err) => report(ui, err, CREATE_FAILED_MESSAGE),
        }
    }

    pub async fn submit_query<D>(&self, ui: &mut D, state: &mut PageState)
    where
        D: Document + ?Sized,
    {
        state.reset(ui.query_value().trim());
        self.refresh(ui, state).await;
    }

    /// Fetches the current page and re-renders the table and pagination.
    ///
    /// When the result set shrank below the current page, the cursor is moved
    /// to the last page and that page is fetched instead.
    pub async fn refresh<D>(&self, ui: &mut D, state: &mut PageState)
    where
        D: Document + ?Sized,
    {
        let mut response = match self.fetch_page(state).await {
            Ok(response) => response,
            Err(err) => return report(ui, err, LIST_FAILED_MESSAGE),
        };

        if state.clamp_to_last() {
            log::warn!(
                "Result set shrank, reloading last page {}",
                state.current_page()
            );
            response = match self.fetch_page(state).await {
                Ok(response) => response,
                Err(err) => return report(ui, err, LIST_FAILED_MESSAGE),
            };
        }

        render_list(ui, &response.customers);
        render_pagination(ui, state);
    }

    async fn fetch_page(&self, state: &mut PageState) -> ApiResult<ListResponse> {
        let response = self
            .api
            .list_customers(state.last_query(), state.current_page(), state.page_size())
            .await?;
        state.set_total_pages(response.total_pages);
        Ok(response)
    }

    pub fn edit_row<D>(&self, ui: &mut D, id: CustomerId)
    where
        D: Document + ?Sized,
    {
        match ui.displayed_customer(id) {
            Some(customer) => {
                render_edit_row(ui, &customer);
            }
            None => log::warn!("Customer {id} is not on the page"),
        }
    }

    pub async fn save_row<D>(&self, ui: &mut D, state: &mut PageState, id: CustomerId)
    where
        D: Document + ?Sized,
    {
        let Some(fields) = ui.row_values(id) else {
            log::warn!("Customer {id} is not being edited");
            return;
        };
        let fields = fields.trimmed();

        let presenter = ErrorPresenter::new(FormContext::Row(id));
        presenter.clear_errors(ui);

        let errors = validate_edit(&fields);
        if !errors.is_empty() {
            presenter.show_errors(ui, &errors);
            return;
        }

        log::info!("Updating customer {id}");
        match self.api.update_customer(id, &fields).await {
            Ok(_) => {
                ui.alert(AlertLevel::Success, UPDATED_MESSAGE);
                self.refresh(ui, state).await;
            }
            Err(ApiError::Validation(errors)) => {
                log::warn!("Update of customer {id} rejected by backend: {errors:?}");
                presenter.show_errors(ui, &errors);
            }
            Err(err) => report(ui, err, UPDATE_FAILED_MESSAGE),
        }
    }

    pub async fn delete_row<D>(&self, ui: &mut D, state: &mut PageState, id: CustomerId)
    where
        D: Document + ?Sized,
    {
        if !ui.confirm(DELETE_CONFIRMATION) {
            return;
        }

        log::info!("Deleting customer {id}");
        match self.api.delete_customer(id).await {
            Ok(()) => {
                ui.alert(AlertLevel::Success, DELETED_MESSAGE);
                self.refresh(ui, state).await;
            }
            Err(ApiError::Validation(errors)) => {
                let reason = errors.get("database").unwrap_or(UNKNOWN_ERROR_MESSAGE);
                log::error!("Failed to delete customer {id}: {reason}");
                ui.alert(
                    AlertLevel::Error,
                    &format!("Erro ao deletar cliente: {reason}"),
                );
            }
            Err(err) => report(ui, err, DELETE_FAILED_MESSAGE),
        }
    }
}

/// Shows the generic alert for a failed call.
fn report<D>(ui: &mut D, err: ApiError, rejected_message: &str)
where
    D: Document + ?Sized,
{
    log::error!("Request failed: {err}");
    let message = match err {
        ApiError::Network(_) => CONNECTION_FAILED_MESSAGE,
        ApiError::Validation(_) | ApiError::Rejected { .. } => rejected_message,
    };
    ui.alert(AlertLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockCustomerApi;
    use crate::domain::customer::{Customer, CustomerFields};
    use crate::domain::types::Field;
    use crate::forms::FieldErrors;
    use crate::view::page::PageDocument;
    use crate::view::table::ResultsView;
    use crate::view::{Alert, FormContext};

    fn maria() -> CustomerFields {
        CustomerFields::new("Maria", "Rua das Flores, 12", "(11) 91234-5678", "maria@example.com")
    }

    fn customer(id: i64, fields: CustomerFields) -> Customer {
        Customer::new(Some(CustomerId::new(id)), fields)
    }

    fn one_page(customers: Vec<Customer>, total_pages: usize) -> ApiResult<ListResponse> {
        Ok(ListResponse {
            customers,
            total_pages,
        })
    }

    fn no_errors(doc: &mut PageDocument) -> bool {
        Field::ALL.into_iter().all(|field| {
            doc.error_slot(FormContext::Registration, field)
                .is_none_or(|slot| slot.is_empty())
        })
    }

    /// Page showing customer 7 in edit mode.
    async fn editing_page() -> (PageDocument, PageState) {
        let mut api = MockCustomerApi::new();
        api.expect_list_customers()
            .times(1)
            .returning(|_, _, _| one_page(vec![customer(7, maria())], 1));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        let mut state = PageState::default();
        controller
            .handle(&mut doc, &mut state, UiEvent::SubmitQuery)
            .await;
        controller.handle(&mut doc, &mut state, UiEvent::EditRow(CustomerId::new(7))).await;
        (doc, state)
    }

    #[tokio::test]
    async fn valid_registration_creates_once_and_clears_form() {
        let mut api = MockCustomerApi::new();
        let expected = maria();
        api.expect_create_customer()
            .times(1)
            .withf(move |fields| *fields == expected)
            .returning(|fields| Ok(Customer::new(Some(CustomerId::new(1)), fields.clone())));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.set_registration_values(CustomerFields {
            name: "  Maria ".to_string(),
            ..maria()
        });
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::SubmitRegistration)
            .await;

        assert_eq!(doc.registration_values(), CustomerFields::default());
        assert!(no_errors(&mut doc));
        assert_eq!(
            doc.alerts(),
            &[Alert {
                level: AlertLevel::Success,
                message: CREATED_MESSAGE.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn invalid_registration_never_reaches_backend() {
        let mut api = MockCustomerApi::new();
        api.expect_create_customer().never();
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.set_registration_values(CustomerFields::new("Maria", "", "11 91234-5678", "m@x.com"));
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::SubmitRegistration)
            .await;

        let errors = &doc.registration().errors;
        assert_eq!(errors[&Field::Address], "Por favor, preencha o campo endereço.");
        assert_eq!(
            errors[&Field::Phone],
            "Telefone inválido. Use o formato (XX) 99999-9999."
        );
        assert_eq!(errors[&Field::Name], "");
        assert_eq!(doc.registration_values().name, "Maria");
    }

    #[tokio::test]
    async fn backend_field_errors_land_in_registration_slots() {
        let mut api = MockCustomerApi::new();
        api.expect_create_customer().times(1).returning(|_| {
            Err(ApiError::Validation(FieldErrors::from_iter([(
                "email",
                "E-mail já está cadastrado.",
            )])))
        });
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.set_registration_values(maria());
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::SubmitRegistration)
            .await;

        assert_eq!(
            doc.registration().errors[&Field::Email],
            "E-mail já está cadastrado."
        );
        assert_eq!(doc.registration_values(), maria());
        assert!(doc.alerts().is_empty());
    }

    #[tokio::test]
    async fn network_failure_on_registration_alerts() {
        let mut api = MockCustomerApi::new();
        api.expect_create_customer()
            .times(1)
            .returning(|_| Err(ApiError::Network("connection refused".to_string())));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.set_registration_values(maria());
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::SubmitRegistration)
            .await;

        assert_eq!(doc.alerts()[0].message, CONNECTION_FAILED_MESSAGE);
        assert_eq!(doc.alerts()[0].level, AlertLevel::Error);
    }

    #[tokio::test]
    async fn query_on_second_page_with_single_page_hides_controls() {
        let mut api = MockCustomerApi::new();
        api.expect_list_customers()
            .times(1)
            .withf(|query, page, per_page| query == "Maria" && *page == 2 && *per_page == 5)
            .returning(|_, _, _| one_page(vec![], 1));
        api.expect_list_customers()
            .times(1)
            .withf(|query, page, per_page| query == "Maria" && *page == 1 && *per_page == 5)
            .returning(|_, _, _| one_page(vec![customer(3, maria())], 1));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        let mut state = PageState::default();
        state.reset("Maria");
        state.set_total_pages(2);
        assert!(state.next());

        controller.refresh(&mut doc, &mut state).await;

        let pagination = doc.pagination().expect("pagination rendered");
        assert!(!pagination.show_previous);
        assert!(!pagination.show_next);
        assert_eq!(pagination.label, "Página 1 de 1");
        assert_eq!(state.current_page(), 1);
        assert!(doc.displayed_customer(CustomerId::new(3)).is_some());
    }

    #[tokio::test]
    async fn submit_query_trims_and_rewinds() {
        let mut api = MockCustomerApi::new();
        api.expect_list_customers()
            .times(1)
            .withf(|query, page, _| query == "Ana" && *page == 1)
            .returning(|_, _, _| one_page(vec![], 0));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.set_query("  Ana ");
        let mut state = PageState::default();
        state.set_total_pages(3);
        state.next();

        controller
            .handle(&mut doc, &mut state, UiEvent::SubmitQuery)
            .await;

        assert_eq!(state.last_query(), "Ana");
        assert_eq!(state.current_page(), 1);
        assert_eq!(
            doc.results(),
            &ResultsView::Message {
                text: "Nenhum cliente encontrado.".to_string()
            }
        );
        assert_eq!(doc.pagination().map(|p| p.label.as_str()), Some("Página 1 de 0"));
    }

    #[tokio::test]
    async fn next_on_last_page_does_not_fetch() {
        let mut api = MockCustomerApi::new();
        api.expect_list_customers().never();
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        let mut state = PageState::default();

        controller.handle(&mut doc, &mut state, UiEvent::NextPage).await;
        controller
            .handle(&mut doc, &mut state, UiEvent::PreviousPage)
            .await;

        assert_eq!(state.current_page(), 1);
    }

    #[tokio::test]
    async fn list_rejection_alerts_and_keeps_results() {
        let mut api = MockCustomerApi::new();
        api.expect_list_customers()
            .times(1)
            .returning(|_, _, _| Err(ApiError::Rejected { status: 500 }));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::SubmitQuery)
            .await;

        assert_eq!(doc.alerts()[0].message, LIST_FAILED_MESSAGE);
        assert_eq!(doc.results(), &ResultsView::Blank);
    }

    #[tokio::test]
    async fn declined_confirmation_skips_delete() {
        let mut api = MockCustomerApi::new();
        api.expect_delete_customer().never();
        api.expect_list_customers().never();
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.answer_confirmation(false);
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::DeleteRow(CustomerId::new(4)))
            .await;

        assert!(doc.alerts().is_empty());
    }

    #[tokio::test]
    async fn unanswered_confirmation_asks_and_skips_delete() {
        let mut api = MockCustomerApi::new();
        api.expect_delete_customer().never();
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::DeleteRow(CustomerId::new(4)))
            .await;

        assert_eq!(
            doc.take_confirmation_request().as_deref(),
            Some(DELETE_CONFIRMATION)
        );
    }

    #[tokio::test]
    async fn confirmed_delete_refreshes_list() {
        let mut api = MockCustomerApi::new();
        api.expect_delete_customer()
            .times(1)
            .withf(|id| *id == CustomerId::new(4))
            .returning(|_| Ok(()));
        api.expect_list_customers()
            .times(1)
            .returning(|_, _, _| one_page(vec![customer(5, maria())], 1));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.answer_confirmation(true);
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::DeleteRow(CustomerId::new(4)))
            .await;

        assert_eq!(doc.alerts()[0].message, DELETED_MESSAGE);
        assert!(doc.displayed_customer(CustomerId::new(5)).is_some());
    }

    #[tokio::test]
    async fn delete_failure_surfaces_database_message() {
        let mut api = MockCustomerApi::new();
        api.expect_delete_customer().times(1).returning(|_| {
            Err(ApiError::Validation(FieldErrors::from_iter([(
                "database",
                "Erro ao deletar cliente.",
            )])))
        });
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.answer_confirmation(true);
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::DeleteRow(CustomerId::new(4)))
            .await;

        assert_eq!(
            doc.alerts()[0].message,
            "Erro ao deletar cliente: Erro ao deletar cliente."
        );
    }

    #[tokio::test]
    async fn edit_row_switches_row_to_inputs() {
        let (doc, _) = editing_page().await;

        let edit = doc
            .editing_row(CustomerId::new(7))
            .expect("row in edit mode");
        assert_eq!(edit.values(), maria());
    }

    #[tokio::test]
    async fn save_with_blank_field_shows_row_error_without_request() {
        let (mut doc, mut state) = editing_page().await;
        let id = CustomerId::new(7);
        let mut typed = maria();
        typed.address = "   ".to_string();
        assert!(doc.set_row_values(id, &typed));

        let mut api = MockCustomerApi::new();
        api.expect_update_customer().never();
        let controller = FormController::new(api);
        controller
            .handle(&mut doc, &mut state, UiEvent::SaveRow(id))
            .await;

        let edit = doc.editing_row(id).expect("still editing");
        assert_eq!(
            edit.inputs[Field::Address.index()].error.as_deref(),
            Some("O campo endereco não pode estar vazio.")
        );
    }

    #[tokio::test]
    async fn save_commits_and_refreshes() {
        let (mut doc, mut state) = editing_page().await;
        let id = CustomerId::new(7);
        let mut typed = maria();
        typed.phone = "(21) 90000-1111".to_string();
        assert!(doc.set_row_values(id, &typed));

        let mut api = MockCustomerApi::new();
        let sent = typed.clone();
        api.expect_update_customer()
            .times(1)
            .withf(move |got_id, fields| *got_id == id && *fields == sent)
            .returning(|id, fields| Ok(Customer::new(Some(id), fields.clone())));
        let refreshed = typed.clone();
        api.expect_list_customers()
            .times(1)
            .returning(move |_, _, _| one_page(vec![customer(7, refreshed.clone())], 1));
        let controller = FormController::new(api);
        controller
            .handle(&mut doc, &mut state, UiEvent::SaveRow(id))
            .await;

        assert_eq!(doc.alerts().last().map(|a| a.message.as_str()), Some(UPDATED_MESSAGE));
        assert!(doc.editing_row(id).is_none());
        assert_eq!(
            doc.displayed_customer(id).map(|c| c.fields.phone),
            Some("(21) 90000-1111".to_string())
        );
    }

    #[tokio::test]
    async fn save_rejected_by_backend_fills_row_slots() {
        let (mut doc, mut state) = editing_page().await;
        let id = CustomerId::new(7);
        let mut typed = maria();
        typed.email = "taken@example.com".to_string();
        assert!(doc.set_row_values(id, &typed));

        let mut api = MockCustomerApi::new();
        api.expect_update_customer().times(1).returning(|_, _| {
            Err(ApiError::Validation(FieldErrors::from_iter([(
                "email",
                "E-mail já cadastrado.",
            )])))
        });
        api.expect_list_customers().never();
        let controller = FormController::new(api);
        controller
            .handle(&mut doc, &mut state, UiEvent::SaveRow(id))
            .await;

        let edit = doc.editing_row(id).expect("still editing");
        assert_eq!(
            edit.inputs[Field::Email.index()].error.as_deref(),
            Some("E-mail já cadastrado.")
        );
        assert_eq!(edit.inputs[Field::Email.index()].value, "taken@example.com");
        assert!(doc.alerts().is_empty());
    }

    #[tokio::test]
    async fn delete_rejected_without_field_messages_shows_generic_alert() {
        let mut api = MockCustomerApi::new();
        api.expect_delete_customer()
            .times(1)
            .returning(|_| Err(ApiError::Rejected { status: 500 }));
        api.expect_list_customers().never();
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        doc.answer_confirmation(true);
        let mut state = PageState::default();

        controller
            .handle(&mut doc, &mut state, UiEvent::DeleteRow(CustomerId::new(4)))
            .await;

        assert_eq!(doc.alerts().len(), 1);
        assert_eq!(doc.alerts()[0].message, DELETE_FAILED_MESSAGE);
        assert_eq!(doc.alerts()[0].level, AlertLevel::Error);
    }

    #[tokio::test]
    async fn cancel_refetches_instead_of_restoring() {
        let (mut doc, mut state) = editing_page().await;
        let id = CustomerId::new(7);

        let mut api = MockCustomerApi::new();
        let mut changed = maria();
        changed.name = "Maria Changed".to_string();
        api.expect_list_customers()
            .times(1)
            .returning(move |_, _, _| one_page(vec![customer(7, changed.clone())], 1));
        let controller = FormController::new(api);
        controller
            .handle(&mut doc, &mut state, UiEvent::CancelEdit(id))
            .await;

        assert!(doc.editing_row(id).is_none());
        assert_eq!(
            doc.displayed_customer(id).map(|c| c.fields.name),
            Some("Maria Changed".to_string())
        );
    }

    #[tokio::test]
    async fn export_navigates_to_filtered_url() {
        let mut api = MockCustomerApi::new();
        api.expect_export_url()
            .times(1)
            .withf(|query| query == "Maria")
            .returning(|query| format!("http://backend/clientes/exportar?nome={query}"));
        let controller = FormController::new(api);
        let mut doc = PageDocument::new();
        let mut state = PageState::default();
        state.reset("Maria");

        controller.handle(&mut doc, &mut state, UiEvent::Export).await;

        assert_eq!(
            doc.take_navigation().as_deref(),
            Some("http://backend/clientes/exportar?nome=Maria")
        );
    }
}
