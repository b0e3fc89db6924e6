//! Mealbox prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    carts::{Cart, CartError, CartItem, NewCartItem},
    delivery::{DeliveryAddress, DeliveryMilestones, DeliveryRecord, Destination},
    locations::{LocationCost, LocationCostTable},
    money::{AmountOverflow, format_amount},
    notifications::{
        ContactMessage, EmailMessage, LineItem, Notification, NotificationKind, OrderSummary,
        RenderError, StatusPresentation, StatusUpdate,
    },
    orders::{
        DeliveryStatus, Order, OrderDraft, OrderError, ReceivedStatus, StatusChange,
        TransitionError, UnknownStatus,
    },
    rules::{BusinessRules, BusinessRulesUpdate, FeeSource, OrderTotal, compute_order_total},
    validation::ValidationError,
};
