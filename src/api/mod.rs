//! Backend access for the registry client.
//!
//! [`CustomerApi`] is the seam between the controller and the REST backend.
//! [`http::HttpCustomerApi`] is the production implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::customer::{Customer, CustomerFields};
use crate::domain::page::ListResponse;
use crate::domain::types::CustomerId;
use crate::forms::FieldErrors;

pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Failures reported by [`CustomerApi`] calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend refused the payload with per-field messages (`{"erros": {...}}`).
    #[error("backend validation failed: {0:?}")]
    Validation(FieldErrors),

    /// Backend answered with a non-success status and no field messages.
    #[error("request rejected with status {status}")]
    Rejected { status: u16 },

    /// Transport failure or unreadable response body.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Network(format!("invalid response body: {err}"))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait CustomerApi {
    /// `POST /clientes`.
    async fn create_customer(&self, fields: &CustomerFields) -> ApiResult<Customer>;

    /// `GET /clientes?nome=&page=&per_page=`.
    async fn list_customers(
        &self,
        name_query: &str,
        page: usize,
        per_page: usize,
    ) -> ApiResult<ListResponse>;

    /// `PUT /clientes/{id}`.
    async fn update_customer(&self, id: CustomerId, fields: &CustomerFields)
    -> ApiResult<Customer>;

    /// `DELETE /clientes/{id}`.
    async fn delete_customer(&self, id: CustomerId) -> ApiResult<()>;

    /// Export endpoint for the given filter. Builds the URL only.
    fn export_url(&self, name_query: &str) -> String;
}
