//! Typed API surface
//!
//! The backend is consumed as an abstract capability set: one trait per
//! resource family, implemented over [`HttpClient`] by [`HttpApi`]. The
//! dashboard state layers depend on the traits, never on the transport,
//! so tests drive them with stub implementations.
//!
//! None of the mutating calls is documented as safe to blindly retry;
//! retries are the operator's decision and nothing here retries
//! automatically.

use crate::{ClientConfig, ClientResult, HttpClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Department, Employee, InventoryLevel, Sale, SaleCreate, SaleUpdate};
use shared::order::{Order, OrderAssignItem, OrderUpdateStatus};

/// Login response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Employee,
}

/// Current user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: Employee,
}

/// Sale endpoints
#[async_trait]
pub trait SalesApi: Send + Sync {
    async fn create_sale(&self, payload: &SaleCreate) -> ClientResult<Sale>;
    async fn update_sale(&self, sale_id: i64, payload: &SaleUpdate) -> ClientResult<Sale>;
    async fn get_sale(&self, sale_id: i64) -> ClientResult<Sale>;
}

/// Order workflow endpoints
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;
    async fn get_order(&self, order_id: i64) -> ClientResult<Order>;
    async fn update_status(
        &self,
        order_id: i64,
        payload: &OrderUpdateStatus,
    ) -> ClientResult<Order>;
    async fn assign_item(&self, order_id: i64, payload: &OrderAssignItem) -> ClientResult<Order>;
    async fn start_item(&self, order_id: i64, item_id: i64) -> ClientResult<Order>;
    async fn confirm_item_completion(&self, order_id: i64, item_id: i64) -> ClientResult<Order>;
}

/// Inventory and department endpoints
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_inventory(&self) -> ClientResult<Vec<InventoryLevel>>;
    async fn get_departments(&self) -> ClientResult<Vec<Department>>;
}

/// HTTP-backed implementation of the capability traits
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: HttpClient,
}

impl HttpApi {
    /// Create from configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Create over an existing HTTP client
    pub fn with_client(http: HttpClient) -> Self {
        Self { http }
    }

    // ========== Auth API ==========

    /// Login with username and password; stores the returned token
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        let response: LoginResponse = self
            .http
            .post("/api/auth/login", &LoginRequest { username, password })
            .await?;
        self.http.set_token(response.token.clone());
        Ok(response)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        self.http.get("/api/auth/me").await
    }

    /// Logout and drop the token
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.http.post_unit("/api/auth/logout").await?;
        self.http.clear_token();
        Ok(())
    }
}

#[async_trait]
impl SalesApi for HttpApi {
    async fn create_sale(&self, payload: &SaleCreate) -> ClientResult<Sale> {
        self.http.post("/api/sales", payload).await
    }

    async fn update_sale(&self, sale_id: i64, payload: &SaleUpdate) -> ClientResult<Sale> {
        self.http
            .put(&format!("/api/sales/{}", sale_id), payload)
            .await
    }

    async fn get_sale(&self, sale_id: i64) -> ClientResult<Sale> {
        self.http.get(&format!("/api/sales/{}", sale_id)).await
    }
}

#[async_trait]
impl OrdersApi for HttpApi {
    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.http.get("/api/orders").await
    }

    async fn get_order(&self, order_id: i64) -> ClientResult<Order> {
        self.http.get(&format!("/api/orders/{}", order_id)).await
    }

    async fn update_status(
        &self,
        order_id: i64,
        payload: &OrderUpdateStatus,
    ) -> ClientResult<Order> {
        self.http
            .put(&format!("/api/orders/{}/status", order_id), payload)
            .await
    }

    async fn assign_item(&self, order_id: i64, payload: &OrderAssignItem) -> ClientResult<Order> {
        self.http
            .post(&format!("/api/orders/{}/assign", order_id), payload)
            .await
    }

    async fn start_item(&self, order_id: i64, item_id: i64) -> ClientResult<Order> {
        self.http
            .post_empty(&format!("/api/orders/{}/items/{}/start", order_id, item_id))
            .await
    }

    async fn confirm_item_completion(&self, order_id: i64, item_id: i64) -> ClientResult<Order> {
        self.http
            .post_empty(&format!(
                "/api/orders/{}/items/{}/complete",
                order_id, item_id
            ))
            .await
    }
}

#[async_trait]
impl CatalogApi for HttpApi {
    async fn get_inventory(&self) -> ClientResult<Vec<InventoryLevel>> {
        self.http.get("/api/inventory").await
    }

    async fn get_departments(&self) -> ClientResult<Vec<Department>> {
        self.http.get("/api/departments").await
    }
}
