//! Order status workflow
//!
//! Guard predicates and role-gated transitions over [`Order`]. Every
//! function takes the acting user explicitly as an [`Actor`] - the engine
//! reads no ambient identity, which keeps it pure and testable.
//!
//! Transitions are pure: they take `&Order` and return the advanced copy,
//! leaving the input untouched. The caller applies the copy optimistically
//! and restores the original if the backend rejects the change; the backend
//! stays authoritative either way.
//!
//! Check order within each transition: terminal state, then role, then the
//! transition edge, then item-level guards. The first failed check wins.

use crate::error::{AppError, ErrorCode};
use crate::order::{ItemStatus, Order, OrderStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    ProductionManager,
    Chef,
}

impl Role {
    /// Roles allowed to drive order-level transitions
    pub const fn can_manage_orders(&self) -> bool {
        matches!(self, Role::Admin | Role::ProductionManager)
    }
}

/// The acting user, threaded explicitly into every guard and transition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }
}

/// Workflow rejection
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    #[error("Permission denied for {action}")]
    PermissionDenied { action: &'static str },

    #[error("Status transition is not allowed: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order is in a terminal state: {0}")]
    AlreadyTerminal(OrderStatus),

    #[error("Not every item has been completed")]
    ItemsIncomplete,

    #[error("Not every item has been assigned")]
    ItemsUnassigned,

    #[error("Order item not found: {0}")]
    ItemNotFound(i64),

    #[error("Item has already been completed: {0}")]
    ItemAlreadyCompleted(i64),

    #[error("Item has already been started: {0}")]
    ItemAlreadyStarted(i64),

    #[error("Item {0} is assigned to a different chef")]
    ItemNotAssignedToActor(i64),

    #[error("Order is not in production: {0}")]
    NotInProduction(OrderStatus),

    #[error("Inventory has already been processed")]
    InventoryAlreadyProcessed,
}

impl WorkflowError {
    /// Bridge to the unified error code space
    pub fn error_code(&self) -> ErrorCode {
        match self {
            WorkflowError::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            WorkflowError::InvalidTransition { .. } => ErrorCode::OrderInvalidTransition,
            WorkflowError::AlreadyTerminal(_) => ErrorCode::OrderAlreadyTerminal,
            WorkflowError::ItemsIncomplete => ErrorCode::OrderItemsIncomplete,
            WorkflowError::ItemsUnassigned => ErrorCode::OrderItemsUnassigned,
            WorkflowError::ItemNotFound(_) => ErrorCode::OrderItemNotFound,
            WorkflowError::ItemAlreadyCompleted(_) => ErrorCode::ItemAlreadyCompleted,
            WorkflowError::ItemAlreadyStarted(_) => ErrorCode::InvalidRequest,
            WorkflowError::ItemNotAssignedToActor(_) => ErrorCode::ItemNotAssignedToActor,
            WorkflowError::NotInProduction(_) => ErrorCode::OrderNotInProduction,
            WorkflowError::InventoryAlreadyProcessed => ErrorCode::InventoryAlreadyProcessed,
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        AppError::with_message(err.error_code(), err.to_string())
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

// ============================================================================
// Checks
// ============================================================================

fn check_not_terminal(order: &Order) -> WorkflowResult<()> {
    if order.is_terminal() {
        return Err(WorkflowError::AlreadyTerminal(order.status));
    }
    Ok(())
}

fn check_manager(actor: &Actor, action: &'static str) -> WorkflowResult<()> {
    if !actor.role.can_manage_orders() {
        return Err(WorkflowError::PermissionDenied { action });
    }
    Ok(())
}

fn check_edge(order: &Order, to: OrderStatus) -> WorkflowResult<()> {
    if !order.status.can_transition_to(to) {
        return Err(WorkflowError::InvalidTransition {
            from: order.status,
            to,
        });
    }
    Ok(())
}

fn check_confirm_item(order: &Order, item_id: i64, actor: &Actor) -> WorkflowResult<()> {
    if order.status != OrderStatus::InProduction {
        return Err(WorkflowError::NotInProduction(order.status));
    }
    let item = order
        .item(item_id)
        .ok_or(WorkflowError::ItemNotFound(item_id))?;
    if item.is_completed() {
        return Err(WorkflowError::ItemAlreadyCompleted(item_id));
    }
    if !item.is_assigned_to(actor.id) {
        return Err(WorkflowError::ItemNotAssignedToActor(item_id));
    }
    Ok(())
}

// ============================================================================
// Guard predicates (UI enablement)
// ============================================================================

/// Whether `actor` may approve the order right now
pub fn can_approve(order: &Order, actor: &Actor) -> bool {
    check_not_terminal(order).is_ok()
        && check_manager(actor, "approve").is_ok()
        && check_edge(order, OrderStatus::Approved).is_ok()
}

/// Whether `actor` may assign a chef to `item_id` right now
pub fn can_assign_item(order: &Order, item_id: i64, actor: &Actor) -> bool {
    check_assign_item(order, item_id, actor).is_ok()
}

/// Whether `actor` may move the order into production right now
pub fn can_start_production(order: &Order, actor: &Actor) -> bool {
    check_not_terminal(order).is_ok()
        && check_manager(actor, "start production").is_ok()
        && check_edge(order, OrderStatus::InProduction).is_ok()
        && order.all_items_assigned()
}

/// Whether `actor` may confirm completion of `item_id` right now
pub fn can_confirm_item(order: &Order, item_id: i64, actor: &Actor) -> bool {
    check_confirm_item(order, item_id, actor).is_ok()
}

/// Whether the order-level completion action is enabled for `actor`.
///
/// Completion is a derived state: the action only becomes legal once every
/// item has been confirmed done.
pub fn can_complete(order: &Order, actor: &Actor) -> bool {
    check_not_terminal(order).is_ok()
        && check_manager(actor, "complete").is_ok()
        && check_edge(order, OrderStatus::Completed).is_ok()
        && order.all_items_completed()
}

/// Whether `actor` may confirm the produced goods into stock right now
pub fn can_confirm_stock(order: &Order, actor: &Actor) -> bool {
    check_not_terminal(order).is_ok()
        && check_manager(actor, "confirm stock").is_ok()
        && check_edge(order, OrderStatus::Stocked).is_ok()
        && !order.inventory_processed
}

/// Whether `actor` may cancel the order right now
pub fn can_cancel(order: &Order, actor: &Actor) -> bool {
    check_not_terminal(order).is_ok() && check_manager(actor, "cancel").is_ok()
}

// ============================================================================
// Transitions
// ============================================================================

/// Pending -> Approved
pub fn approve(order: &Order, actor: &Actor) -> WorkflowResult<Order> {
    check_not_terminal(order)?;
    check_manager(actor, "approve")?;
    check_edge(order, OrderStatus::Approved)?;

    let mut next = order.clone();
    next.status = OrderStatus::Approved;
    Ok(next)
}

fn check_assign_item(order: &Order, item_id: i64, actor: &Actor) -> WorkflowResult<()> {
    check_not_terminal(order)?;
    check_manager(actor, "assign item")?;
    if !matches!(
        order.status,
        OrderStatus::Approved | OrderStatus::InProduction
    ) {
        return Err(WorkflowError::InvalidTransition {
            from: order.status,
            to: OrderStatus::InProduction,
        });
    }
    let item = order
        .item(item_id)
        .ok_or(WorkflowError::ItemNotFound(item_id))?;
    if item.is_completed() {
        return Err(WorkflowError::ItemAlreadyCompleted(item_id));
    }
    Ok(())
}

/// Assign (or reassign) a chef to one item.
///
/// Legal while the order is approved or already in production; a completed
/// item can no longer be reassigned.
pub fn assign_item(
    order: &Order,
    item_id: i64,
    chef_id: i64,
    actor: &Actor,
) -> WorkflowResult<Order> {
    check_assign_item(order, item_id, actor)?;

    let mut next = order.clone();
    let item = next
        .item_mut(item_id)
        .ok_or(WorkflowError::ItemNotFound(item_id))?;
    item.assigned_to = Some(chef_id);
    if item.status == ItemStatus::Pending {
        item.status = ItemStatus::Assigned;
    }
    Ok(next)
}

/// Approved -> InProduction. Requires every item assigned; partially
/// assigned orders simply stay approved.
pub fn start_production(order: &Order, actor: &Actor) -> WorkflowResult<Order> {
    check_not_terminal(order)?;
    check_manager(actor, "start production")?;
    check_edge(order, OrderStatus::InProduction)?;
    if !order.all_items_assigned() {
        return Err(WorkflowError::ItemsUnassigned);
    }

    let mut next = order.clone();
    next.status = OrderStatus::InProduction;
    Ok(next)
}

/// The assigned chef begins work on an item (Assigned -> InProgress).
pub fn start_item(order: &Order, item_id: i64, actor: &Actor) -> WorkflowResult<Order> {
    if order.status != OrderStatus::InProduction {
        return Err(WorkflowError::NotInProduction(order.status));
    }
    let item = order
        .item(item_id)
        .ok_or(WorkflowError::ItemNotFound(item_id))?;
    if item.is_completed() {
        return Err(WorkflowError::ItemAlreadyCompleted(item_id));
    }
    if !item.is_assigned_to(actor.id) {
        return Err(WorkflowError::ItemNotAssignedToActor(item_id));
    }
    if item.status == ItemStatus::InProgress {
        return Err(WorkflowError::ItemAlreadyStarted(item_id));
    }

    let mut next = order.clone();
    let item = next
        .item_mut(item_id)
        .ok_or(WorkflowError::ItemNotFound(item_id))?;
    item.status = ItemStatus::InProgress;
    Ok(next)
}

/// The assigned chef confirms an item done; sets progress to 100.
///
/// This is the only path by which an order can reach the
/// "every item completed" consensus that enables [`complete`].
pub fn confirm_item_completion(
    order: &Order,
    item_id: i64,
    actor: &Actor,
) -> WorkflowResult<Order> {
    check_confirm_item(order, item_id, actor)?;

    let mut next = order.clone();
    let item = next
        .item_mut(item_id)
        .ok_or(WorkflowError::ItemNotFound(item_id))?;
    item.status = ItemStatus::Completed;
    item.progress = 100;
    tracing::debug!(
        order_id = order.id,
        item_id,
        chef_id = actor.id,
        all_completed = next.all_items_completed(),
        "item completion confirmed"
    );
    Ok(next)
}

/// InProduction -> Completed. Derived from item consensus, never settable
/// while any item is unfinished.
pub fn complete(order: &Order, actor: &Actor) -> WorkflowResult<Order> {
    check_not_terminal(order)?;
    check_manager(actor, "complete")?;
    check_edge(order, OrderStatus::Completed)?;
    if !order.all_items_completed() {
        return Err(WorkflowError::ItemsIncomplete);
    }

    let mut next = order.clone();
    next.status = OrderStatus::Completed;
    Ok(next)
}

/// Completed -> Stocked. Rejected once inventory has been processed.
pub fn confirm_stock(order: &Order, actor: &Actor) -> WorkflowResult<Order> {
    check_not_terminal(order)?;
    check_manager(actor, "confirm stock")?;
    check_edge(order, OrderStatus::Stocked)?;
    if order.inventory_processed {
        return Err(WorkflowError::InventoryAlreadyProcessed);
    }

    let mut next = order.clone();
    next.status = OrderStatus::Stocked;
    next.inventory_processed = true;
    Ok(next)
}

/// Any non-terminal state -> Cancelled.
pub fn cancel(order: &Order, actor: &Actor) -> WorkflowResult<Order> {
    check_not_terminal(order)?;
    check_manager(actor, "cancel")?;
    check_edge(order, OrderStatus::Cancelled)?;

    let mut next = order.clone();
    next.status = OrderStatus::Cancelled;
    Ok(next)
}
