//! Mock backend for isolating the controller in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::{ApiResult, CustomerApi};
use crate::domain::customer::{Customer, CustomerFields};
use crate::domain::page::ListResponse;
use crate::domain::types::CustomerId;

mock! {
    pub CustomerApi {}

    #[async_trait]
    impl CustomerApi for CustomerApi {
        async fn create_customer(&self, fields: &CustomerFields) -> ApiResult<Customer>;
        async fn list_customers(
            &self,
            name_query: &str,
            page: usize,
            per_page: usize,
        ) -> ApiResult<ListResponse>;
        async fn update_customer(
            &self,
            id: CustomerId,
            fields: &CustomerFields,
        ) -> ApiResult<Customer>;
        async fn delete_customer(&self, id: CustomerId) -> ApiResult<()>;
        fn export_url(&self, name_query: &str) -> String;
    }
}
