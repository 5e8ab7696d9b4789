//! Optimistic order store
//!
//! Holds the orders the dashboard is currently showing and drives every
//! workflow transition through the same discipline:
//!
//! 1. per-entity in-flight check - duplicate triggers for the same entity
//!    are rejected while one submission runs
//! 2. local guard (role + transition) - fail fast, no network call
//! 3. optimistic apply - the store shows the advanced order immediately
//! 4. network call - on rejection the pre-transition order is restored;
//!    the backend stays authoritative and the client never assumes success
//!
//! Every write into the store is fenced by a per-order request sequence so
//! a late-arriving response for a superseded request is discarded instead
//! of overwriting newer state.

use crate::api::OrdersApi;
use crate::error::ClientError;
use crate::inflight::{InflightRegistry, RequestSequencer};
use dashmap::DashMap;
use shared::error::ErrorCode;
use shared::order::{Order, OrderAssignItem, OrderStatus, OrderUpdateStatus, Priority};
use shared::workflow::{self, Actor, WorkflowError};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Store rejection
#[derive(Debug, Error)]
pub enum StoreError {
    /// Local guard failure - surfaced before any network call
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Order not found: {0}")]
    NotFound(i64),

    /// A submission for this entity is already running
    #[error("A submission for {0} is already in flight")]
    InFlight(String),

    /// Backend or transport rejection; the optimistic change was rolled back
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl StoreError {
    /// Bridge to the unified error code space for display
    pub fn error_code(&self) -> ErrorCode {
        match self {
            StoreError::Workflow(e) => e.error_code(),
            StoreError::NotFound(_) => ErrorCode::OrderNotFound,
            StoreError::InFlight(_) => ErrorCode::OperationInFlight,
            StoreError::Client(e) => e.error_code(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

fn order_key(order_id: i64) -> String {
    format!("order:{}", order_id)
}

fn item_key(order_id: i64, item_id: i64) -> String {
    format!("order:{}:item:{}", order_id, item_id)
}

/// Which backend call persists a transition
enum ApiCall {
    UpdateStatus(OrderUpdateStatus),
    AssignItem(OrderAssignItem),
    StartItem(i64),
    ConfirmItem(i64),
}

/// Client-side order store with optimistic transitions
pub struct OrderStore {
    api: Arc<dyn OrdersApi>,
    orders: DashMap<i64, Order>,
    inflight: InflightRegistry,
    sequencer: RequestSequencer,
}

impl OrderStore {
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self {
            api,
            orders: DashMap::new(),
            inflight: InflightRegistry::new(),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Seed or replace one order (initial fetch, notification refresh)
    pub fn load(&self, order: Order) {
        self.orders.insert(order.id, order);
    }

    /// Current copy of one order
    pub fn get(&self, order_id: i64) -> Option<Order> {
        self.orders.get(&order_id).map(|o| o.clone())
    }

    /// Current copies of all orders
    pub fn all(&self) -> Vec<Order> {
        self.orders.iter().map(|o| o.clone()).collect()
    }

    /// Whether a submission for this order is running (UI disable state)
    pub fn is_submitting(&self, order_id: i64) -> bool {
        self.inflight.is_inflight(&order_key(order_id))
    }

    /// Re-fetch the order list.
    ///
    /// Orders that were mutated while the fetch was in flight keep their
    /// newer state: the fetched copy is stale for them and is discarded.
    /// Returns the number of orders written.
    pub async fn refresh(&self) -> StoreResult<usize> {
        let pre: HashMap<i64, u64> = self
            .orders
            .iter()
            .map(|o| (*o.key(), self.sequencer.current(&order_key(*o.key()))))
            .collect();

        let fetched = self.api.list_orders().await.map_err(StoreError::Client)?;

        let mut applied = 0;
        for order in fetched {
            let key = order_key(order.id);
            let expected = pre.get(&order.id).copied().unwrap_or(0);
            if self.sequencer.is_current(&key, expected) {
                self.orders.insert(order.id, order);
                applied += 1;
            } else {
                debug!(order_id = order.id, "discarding stale refresh result");
            }
        }
        Ok(applied)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Pending -> Approved
    pub async fn approve(&self, order_id: i64, actor: &Actor) -> StoreResult<Order> {
        let call = ApiCall::UpdateStatus(OrderUpdateStatus {
            status: OrderStatus::Approved,
        });
        self.submit(
            order_id,
            order_key(order_id),
            |o| workflow::approve(o, actor),
            call,
        )
        .await
    }

    /// Assign a chef to one item
    pub async fn assign_item(
        &self,
        order_id: i64,
        item_id: i64,
        chef_id: i64,
        actor: &Actor,
    ) -> StoreResult<Order> {
        let call = ApiCall::AssignItem(OrderAssignItem { item_id, chef_id });
        self.submit(
            order_id,
            item_key(order_id, item_id),
            |o| workflow::assign_item(o, item_id, chef_id, actor),
            call,
        )
        .await
    }

    /// Approved -> InProduction (requires every item assigned)
    pub async fn start_production(&self, order_id: i64, actor: &Actor) -> StoreResult<Order> {
        let call = ApiCall::UpdateStatus(OrderUpdateStatus {
            status: OrderStatus::InProduction,
        });
        self.submit(
            order_id,
            order_key(order_id),
            |o| workflow::start_production(o, actor),
            call,
        )
        .await
    }

    /// The assigned chef begins work on an item
    pub async fn start_item(
        &self,
        order_id: i64,
        item_id: i64,
        actor: &Actor,
    ) -> StoreResult<Order> {
        self.submit(
            order_id,
            item_key(order_id, item_id),
            |o| workflow::start_item(o, item_id, actor),
            ApiCall::StartItem(item_id),
        )
        .await
    }

    /// The assigned chef confirms an item done
    pub async fn confirm_item(
        &self,
        order_id: i64,
        item_id: i64,
        actor: &Actor,
    ) -> StoreResult<Order> {
        self.submit(
            order_id,
            item_key(order_id, item_id),
            |o| workflow::confirm_item_completion(o, item_id, actor),
            ApiCall::ConfirmItem(item_id),
        )
        .await
    }

    /// InProduction -> Completed (requires every item completed)
    pub async fn complete(&self, order_id: i64, actor: &Actor) -> StoreResult<Order> {
        let call = ApiCall::UpdateStatus(OrderUpdateStatus {
            status: OrderStatus::Completed,
        });
        self.submit(
            order_id,
            order_key(order_id),
            |o| workflow::complete(o, actor),
            call,
        )
        .await
    }

    /// Completed -> Stocked
    pub async fn confirm_stock(&self, order_id: i64, actor: &Actor) -> StoreResult<Order> {
        let call = ApiCall::UpdateStatus(OrderUpdateStatus {
            status: OrderStatus::Stocked,
        });
        self.submit(
            order_id,
            order_key(order_id),
            |o| workflow::confirm_stock(o, actor),
            call,
        )
        .await
    }

    /// Any non-terminal state -> Cancelled
    pub async fn cancel(&self, order_id: i64, actor: &Actor) -> StoreResult<Order> {
        let call = ApiCall::UpdateStatus(OrderUpdateStatus {
            status: OrderStatus::Cancelled,
        });
        self.submit(
            order_id,
            order_key(order_id),
            |o| workflow::cancel(o, actor),
            call,
        )
        .await
    }

    /// In-flight / guard / optimistic-apply / rollback core shared by every
    /// transition. The in-flight check runs first so a duplicate trigger is
    /// reported as such instead of failing a guard against the
    /// optimistically advanced state.
    async fn submit<F>(
        &self,
        order_id: i64,
        inflight_key: String,
        transition: F,
        call: ApiCall,
    ) -> StoreResult<Order>
    where
        F: FnOnce(&Order) -> Result<Order, WorkflowError>,
    {
        let _guard = self
            .inflight
            .begin(inflight_key.clone())
            .ok_or(StoreError::InFlight(inflight_key))?;

        let current = self.get(order_id).ok_or(StoreError::NotFound(order_id))?;
        let next = transition(&current)?;

        let key = order_key(order_id);
        let seq = self.sequencer.next(&key);

        debug!(order_id, seq, status = %next.status, "applying optimistic transition");
        self.orders.insert(order_id, next);

        let result = match call {
            ApiCall::UpdateStatus(payload) => self.api.update_status(order_id, &payload).await,
            ApiCall::AssignItem(payload) => self.api.assign_item(order_id, &payload).await,
            ApiCall::StartItem(item_id) => self.api.start_item(order_id, item_id).await,
            ApiCall::ConfirmItem(item_id) => {
                self.api.confirm_item_completion(order_id, item_id).await
            }
        };

        match result {
            Ok(server_order) => {
                if self.sequencer.is_current(&key, seq) {
                    self.orders.insert(order_id, server_order.clone());
                } else {
                    warn!(order_id, seq, "response superseded, keeping newer state");
                }
                Ok(server_order)
            }
            Err(e) => {
                warn!(order_id, seq, error = %e, "transition rejected, rolling back");
                if self.sequencer.is_current(&key, seq) {
                    self.orders.insert(order_id, current);
                }
                Err(StoreError::Client(e))
            }
        }
    }
}

/// Badge class for a status, exhaustive so a new status is a compile error
/// everywhere it must be rendered
pub fn status_badge(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge-pending",
        OrderStatus::Approved => "badge-approved",
        OrderStatus::InProduction => "badge-production",
        OrderStatus::Completed => "badge-completed",
        OrderStatus::Stocked => "badge-stocked",
        OrderStatus::Cancelled => "badge-cancelled",
    }
}

/// Badge class for a priority
pub fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "badge-low",
        Priority::Medium => "badge-medium",
        Priority::High => "badge-high",
        Priority::Urgent => "badge-urgent",
    }
}
