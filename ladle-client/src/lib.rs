//! Ladle Client - HTTP client and dashboard state plumbing
//!
//! Provides the REST boundary for the Ladle back office plus the state
//! discipline the dashboard relies on: per-entity in-flight guards,
//! stale-response discard, optimistic order transitions with rollback,
//! sale drafts, notification de-duplication and debounced search.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod inflight;
pub mod notifications;
pub mod orders;
pub mod sales;
pub mod search;

pub use api::{CatalogApi, CurrentUserResponse, HttpApi, LoginResponse, OrdersApi, SalesApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use inflight::{InflightRegistry, RequestSequencer};
pub use notifications::{SaleCreatedEvent, SaleFeed};
pub use orders::{priority_badge, status_badge, OrderStore, StoreError};
pub use sales::{SaleDraft, SubmitError};
pub use search::SearchDebouncer;
