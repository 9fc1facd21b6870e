//! User-facing notifications.
//!
//! Every failed mutation ends in exactly one [`Notification`] handed to a
//! [`Notifier`], the seam where a UI shows its toast.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::ids::ProductId;

/// The cart mutation a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
    Clear,
}

impl CartOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::UpdateAmount => "update_amount",
            CartOperation::Clear => "clear",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong, as far as the shopper is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OutOfStockOnAdd,
    OutOfStockOnUpdate,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl NotificationKind {
    /// Pick the kind for a failed operation.
    ///
    /// Stock rejections get their own message; every other error collapses
    /// into the operation's generic failure.
    pub fn for_failure(operation: CartOperation, error: &CartError) -> Self {
        match (operation, error.is_out_of_stock()) {
            (CartOperation::Add, true) => NotificationKind::OutOfStockOnAdd,
            (CartOperation::UpdateAmount, true) => NotificationKind::OutOfStockOnUpdate,
            (CartOperation::Add, false) => NotificationKind::AddFailed,
            (CartOperation::UpdateAmount, false) => NotificationKind::UpdateFailed,
            (CartOperation::Remove | CartOperation::Clear, _) => NotificationKind::RemoveFailed,
        }
    }

    /// Message shown to the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            NotificationKind::OutOfStockOnAdd => "There is no more stock of this product.",
            NotificationKind::OutOfStockOnUpdate => {
                "The requested quantity is not available in stock."
            }
            NotificationKind::AddFailed => {
                "Something went wrong while adding the product to the cart."
            }
            NotificationKind::RemoveFailed => "Something went wrong while removing the product.",
            NotificationKind::UpdateFailed => {
                "Something went wrong while changing the product quantity."
            }
        }
    }
}

/// A failure report destined for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub product_id: Option<ProductId>,
}

impl Notification {
    pub fn new(kind: NotificationKind, product_id: Option<ProductId>) -> Self {
        Self { kind, product_id }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives notifications. The toast layer of a UI implements this.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

/// Emits each notification as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::warn!(
            kind = ?notification.kind,
            product_id = ?notification.product_id,
            "{}",
            notification.message()
        );
    }
}

/// Keeps every notification it receives, in order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Drain everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}

/// Adapts a closure into a [`Notifier`].
pub struct FnNotifier<F>(pub F);

impl<F: Fn(&Notification)> Notifier for FnNotifier<F> {
    fn notify(&self, notification: &Notification) {
        (self.0)(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn out_of_stock() -> CartError {
        CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 3,
        }
    }

    #[test]
    fn test_kind_for_stock_rejection() {
        assert_eq!(
            NotificationKind::for_failure(CartOperation::Add, &out_of_stock()),
            NotificationKind::OutOfStockOnAdd
        );
        assert_eq!(
            NotificationKind::for_failure(CartOperation::UpdateAmount, &out_of_stock()),
            NotificationKind::OutOfStockOnUpdate
        );
    }

    #[test]
    fn test_kind_for_other_failures_is_generic() {
        let err = CartError::Fetch(rocket_data::FetchError::Timeout);
        assert_eq!(
            NotificationKind::for_failure(CartOperation::Add, &err),
            NotificationKind::AddFailed
        );
        assert_eq!(
            NotificationKind::for_failure(CartOperation::UpdateAmount, &err),
            NotificationKind::UpdateFailed
        );
        assert_eq!(
            NotificationKind::for_failure(CartOperation::Remove, &err),
            NotificationKind::RemoveFailed
        );
    }

    #[test]
    fn test_collecting_notifier() {
        let notifier = CollectingNotifier::new();
        notifier.notify(&Notification::new(NotificationKind::AddFailed, None));
        notifier.notify(&Notification::new(
            NotificationKind::OutOfStockOnAdd,
            Some(ProductId::new(2)),
        ));

        assert_eq!(notifier.notifications().len(), 2);
        assert_eq!(
            notifier.last().map(|n| n.kind),
            Some(NotificationKind::OutOfStockOnAdd)
        );
        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_fn_notifier() {
        let count = AtomicUsize::new(0);
        let notifier = FnNotifier(|_: &Notification| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        notifier.notify(&Notification::new(NotificationKind::RemoveFailed, None));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_display_is_message() {
        let n = Notification::new(NotificationKind::UpdateFailed, None);
        assert_eq!(n.to_string(), NotificationKind::UpdateFailed.message());
    }
}
