//! Sale draft controller
//!
//! Wraps the cart state engine for the sale-entry screen: dispatches cart
//! actions, hydrates a persisted sale for edit mode, and submits through
//! the pre-submit guard. The draft survives a failed submission so the
//! operator can correct and retry manually - nothing retries on its own.

use crate::api::SalesApi;
use crate::error::ClientError;
use crate::inflight::InflightRegistry;
use parking_lot::RwLock;
use shared::cart::{validate_for_submit, CartAction, CartState};
use shared::error::{AppError, ErrorCode};
use shared::models::{Sale, SaleCreate, SaleUpdate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const DRAFT_KEY: &str = "sale-draft";

/// Sale submission rejection
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Pre-submit guard failure - never sent to the backend
    #[error(transparent)]
    Validation(#[from] AppError),

    /// A submission for this draft is already running
    #[error("A sale submission is already in flight")]
    InFlight,

    /// Backend or transport rejection; the draft is preserved
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl SubmitError {
    /// Bridge to the unified error code space for display
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SubmitError::Validation(e) => e.code,
            SubmitError::InFlight => ErrorCode::OperationInFlight,
            SubmitError::Client(e) => e.error_code(),
        }
    }
}

/// The in-progress, not-yet-submitted sale
pub struct SaleDraft {
    api: Arc<dyn SalesApi>,
    cart: RwLock<CartState>,
    /// Sale being edited, when the draft was hydrated from a persisted sale
    editing: RwLock<Option<i64>>,
    inflight: InflightRegistry,
}

impl SaleDraft {
    pub fn new(api: Arc<dyn SalesApi>) -> Self {
        Self {
            api,
            cart: RwLock::new(CartState::empty()),
            editing: RwLock::new(None),
            inflight: InflightRegistry::new(),
        }
    }

    /// Apply a cart action to the draft
    pub fn dispatch(&self, action: CartAction) {
        let mut cart = self.cart.write();
        *cart = cart.apply(action);
    }

    /// Current copy of the cart
    pub fn cart(&self) -> CartState {
        self.cart.read().clone()
    }

    /// Enter edit mode for a persisted sale
    pub fn load(&self, sale: &Sale) {
        debug!(sale_id = sale.id, "hydrating draft from persisted sale");
        *self.cart.write() = sale.to_cart();
        *self.editing.write() = Some(sale.id);
    }

    /// Sale ID being edited, if any
    pub fn editing(&self) -> Option<i64> {
        *self.editing.read()
    }

    /// Whether a submission is currently running
    pub fn is_submitting(&self) -> bool {
        self.inflight.is_inflight(DRAFT_KEY)
    }

    /// Validate and submit the draft.
    ///
    /// On success the draft is discarded (reset to the canonical empty
    /// state); on failure it is left untouched for manual retry.
    pub async fn submit(&self) -> Result<Sale, SubmitError> {
        let _guard = self
            .inflight
            .begin(DRAFT_KEY)
            .ok_or(SubmitError::InFlight)?;

        let cart = self.cart.read().clone();
        validate_for_submit(&cart)?;

        let editing = *self.editing.read();
        let payload = SaleCreate::from_cart(&cart);

        let result = match editing {
            Some(sale_id) => {
                self.api
                    .update_sale(sale_id, &SaleUpdate::from(payload))
                    .await
            }
            None => self.api.create_sale(&payload).await,
        };

        match result {
            Ok(sale) => {
                info!(sale_id = sale.id, sale_number = %sale.sale_number, "sale submitted");
                *self.cart.write() = CartState::empty();
                *self.editing.write() = None;
                Ok(sale)
            }
            Err(e) => {
                warn!(error = %e, "sale submission rejected, draft preserved");
                Err(SubmitError::Client(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientResult;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::cart::{CartLine, PaymentMethod};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct StubSales {
        responses: Mutex<VecDeque<ClientResult<Sale>>>,
        create_calls: AtomicUsize,
        update_calls: AtomicUsize,
        entered: Arc<Notify>,
        gate: Mutex<Option<Arc<Notify>>>,
    }

    impl StubSales {
        fn push(&self, response: ClientResult<Sale>) {
            self.responses.lock().push_back(response);
        }

        async fn respond(&self) -> ClientResult<Sale> {
            self.entered.notify_one();
            let gate = self.gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.responses.lock().pop_front().expect("stub response")
        }
    }

    #[async_trait]
    impl SalesApi for StubSales {
        async fn create_sale(&self, _payload: &SaleCreate) -> ClientResult<Sale> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.respond().await
        }

        async fn update_sale(&self, _sale_id: i64, _payload: &SaleUpdate) -> ClientResult<Sale> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.respond().await
        }

        async fn get_sale(&self, _sale_id: i64) -> ClientResult<Sale> {
            unimplemented!("not used by these tests")
        }
    }

    fn line(product_id: i64, quantity: i32, unit_price: f64) -> CartLine {
        CartLine {
            product_id,
            name: format!("Product {}", product_id),
            unit: "pcs".to_string(),
            quantity,
            unit_price,
        }
    }

    fn sale(id: i64) -> Sale {
        Sale {
            id,
            sale_number: format!("SAL-{}", id),
            lines: vec![shared::models::SaleLine {
                product_id: 1,
                name: "Product 1".to_string(),
                unit: "pcs".to_string(),
                quantity: 2,
                unit_price: 10.0,
            }],
            notes: String::new(),
            payment_method: PaymentMethod::Cash,
            customer_name: String::new(),
            customer_phone: None,
            total: 20.0,
            created_by: 9,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_submit_success_resets_draft() {
        let api = Arc::new(StubSales::default());
        let draft = SaleDraft::new(api.clone());
        draft.dispatch(CartAction::AddItem(line(1, 2, 10.0)));
        api.push(Ok(sale(5)));

        let submitted = draft.submit().await.unwrap();
        assert_eq!(submitted.id, 5);
        assert_eq!(draft.cart(), CartState::empty());
        assert_eq!(draft.editing(), None);
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_never_reaches_backend() {
        let api = Arc::new(StubSales::default());
        let draft = SaleDraft::new(api.clone());

        let err = draft.submit().await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::CartEmpty);
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_phone_never_reaches_backend() {
        let api = Arc::new(StubSales::default());
        let draft = SaleDraft::new(api.clone());
        draft.dispatch(CartAction::AddItem(line(1, 2, 10.0)));
        draft.dispatch(CartAction::SetCustomerPhone(Some("12ab".to_string())));

        let err = draft.submit().await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::CartInvalidPhone);
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_submission_preserves_draft() {
        let api = Arc::new(StubSales::default());
        let draft = SaleDraft::new(api.clone());
        draft.dispatch(CartAction::AddItem(line(1, 2, 10.0)));
        draft.dispatch(CartAction::SetNotes("wholesale".to_string()));
        api.push(Err(ClientError::Rejected(
            "Insufficient stock for product 1".to_string(),
        )));

        let before = draft.cart();
        let err = draft.submit().await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InsufficientStock);
        assert_eq!(draft.cart(), before);
    }

    #[tokio::test]
    async fn test_edit_mode_updates_instead_of_creating() {
        let api = Arc::new(StubSales::default());
        let draft = SaleDraft::new(api.clone());
        let persisted = sale(5);
        draft.load(&persisted);
        assert_eq!(draft.editing(), Some(5));
        assert_eq!(draft.cart(), persisted.to_cart());

        api.push(Ok(sale(5)));
        draft.submit().await.unwrap();
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(draft.editing(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_double_submit_rejected_while_in_flight() {
        let api = Arc::new(StubSales::default());
        let gate = Arc::new(Notify::new());
        *api.gate.lock() = Some(gate.clone());
        api.push(Ok(sale(5)));

        let draft = Arc::new(SaleDraft::new(api.clone()));
        draft.dispatch(CartAction::AddItem(line(1, 2, 10.0)));

        let first = {
            let draft = draft.clone();
            tokio::spawn(async move { draft.submit().await })
        };
        api.entered.notified().await;
        assert!(draft.is_submitting());

        let err = draft.submit().await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::OperationInFlight);

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert!(!draft.is_submitting());
    }
}
