//! `reqwest`-backed implementation of [`CustomerApi`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{ApiError, ApiResult, CustomerApi};
use crate::domain::customer::{Customer, CustomerFields};
use crate::domain::page::ListResponse;
use crate::domain::types::CustomerId;
use crate::forms::FieldErrors;

/// Error payload shape used by the backend on failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    erros: Option<FieldErrors>,
}

#[derive(Clone, Debug)]
pub struct HttpCustomerApi {
    client: Client,
    base_url: String,
}

impl HttpCustomerApi {
    /// Creates a client talking to the backend at `base_url`
    /// (e.g. `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn customers_url(&self) -> String {
        format!("{}/clientes", self.base_url)
    }

    fn customer_url(&self, id: CustomerId) -> String {
        format!("{}/clientes/{id}", self.base_url)
    }
}

/// Reads the response body as JSON before looking at the status.
///
/// An empty body (e.g. `204 No Content`) reads as `null`; anything else that
/// is not JSON is a network error.
async fn read_json(response: Response) -> ApiResult<(StatusCode, Value)> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok((status, Value::Null));
    }
    let body = serde_json::from_slice(&bytes)?;
    Ok((status, body))
}

/// Maps a non-success answer to either field messages or a bare rejection.
fn failure(status: StatusCode, body: Value) -> ApiError {
    match serde_json::from_value::<ErrorBody>(body) {
        Ok(ErrorBody {
            erros: Some(errors),
        }) if !errors.is_empty() => ApiError::Validation(errors),
        _ => ApiError::Rejected {
            status: status.as_u16(),
        },
    }
}

/// Uses the body as the stored record when it looks like one.
///
/// The backend may only answer `{"message": ...}`; the submitted values are
/// then the best view of the record.
fn record_or(body: Value, fallback: Customer) -> ApiResult<Customer> {
    if body.get("nome").is_some() {
        Ok(serde_json::from_value(body)?)
    } else {
        Ok(fallback)
    }
}

#[async_trait]
impl CustomerApi for HttpCustomerApi {
    async fn create_customer(&self, fields: &CustomerFields) -> ApiResult<Customer> {
        let url = self.customers_url();
        log::debug!("POST {url}");

        let response = self.client.post(&url).json(fields).send().await?;
        let (status, body) = read_json(response).await?;

        if !status.is_success() {
            log::warn!("Customer creation rejected with {status}: {body}");
            return Err(failure(status, body));
        }
        record_or(body, Customer::new(None, fields.clone()))
    }

    async fn list_customers(
        &self,
        name_query: &str,
        page: usize,
        per_page: usize,
    ) -> ApiResult<ListResponse> {
        let url = self.customers_url();
        log::debug!("GET {url} nome={name_query:?} page={page} per_page={per_page}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("nome", name_query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await?;

        // Listing failures are judged on the status alone.
        let status = response.status();
        if !status.is_success() {
            log::warn!("Customer listing rejected with {status}");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
            });
        }

        let (_, body) = read_json(response).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        fields: &CustomerFields,
    ) -> ApiResult<Customer> {
        let url = self.customer_url(id);
        log::debug!("PUT {url}");

        let response = self.client.put(&url).json(fields).send().await?;
        let (status, body) = read_json(response).await?;

        if !status.is_success() {
            log::warn!("Customer {id} update rejected with {status}: {body}");
            return Err(failure(status, body));
        }
        record_or(body, Customer::new(Some(id), fields.clone()))
    }

    async fn delete_customer(&self, id: CustomerId) -> ApiResult<()> {
        let url = self.customer_url(id);
        log::debug!("DELETE {url}");

        let response = self.client.delete(&url).send().await?;
        let (status, body) = read_json(response).await?;

        if !status.is_success() {
            log::warn!("Customer {id} deletion rejected with {status}: {body}");
            return Err(failure(status, body));
        }
        Ok(())
    }

    fn export_url(&self, name_query: &str) -> String {
        let endpoint = format!("{}/clientes/exportar", self.base_url);
        match Url::parse_with_params(&endpoint, &[("nome", name_query)]) {
            Ok(url) => url.to_string(),
            Err(err) => {
                log::error!("Invalid export url {endpoint}: {err}");
                endpoint
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_with_field_messages_is_validation() {
        let err = failure(
            StatusCode::BAD_REQUEST,
            json!({"erros": {"email": "E-mail já está cadastrado."}}),
        );

        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.get("email"), Some("E-mail já está cadastrado."))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failure_without_field_messages_is_rejection() {
        let err = failure(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "boom"}));

        assert!(matches!(err, ApiError::Rejected { status: 500 }));
    }

    #[test]
    fn message_only_body_falls_back_to_submitted_record() {
        let fields = CustomerFields::new("Ana", "Rua B", "(21) 99876-5432", "ana@example.com");
        let fallback = Customer::new(Some(CustomerId::new(3)), fields.clone());

        let customer = record_or(json!({"message": "ok"}), fallback.clone()).unwrap();

        assert_eq!(customer, fallback);
    }

    #[test]
    fn export_url_encodes_the_filter() {
        let api = HttpCustomerApi::new("http://localhost:5000/");

        assert_eq!(
            api.export_url("Maria José"),
            "http://localhost:5000/clientes/exportar?nome=Maria+Jos%C3%A9"
        );
        assert_eq!(
            api.export_url(""),
            "http://localhost:5000/clientes/exportar?nome="
        );
    }
}
