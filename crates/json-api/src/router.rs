//! App Router

use salvo::Router;

use crate::{
    business_rules, carts, checkout, delivery_costs, email, healthcheck, observability, orders,
};

/// Every API route. State injection and middleware are added by the caller.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("business-rules")
                .get(business_rules::get::handler)
                .put(business_rules::update::handler),
        )
        .push(
            Router::with_path("delivery-costs")
                .get(delivery_costs::get::handler)
                .post(delivery_costs::create::handler)
                .put(delivery_costs::update::handler)
                .delete(delivery_costs::delete::handler),
        )
        .push(
            Router::with_path("orders")
                .push(Router::with_path("update-status").put(orders::update_status::handler))
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("checkout")
                .push(Router::with_path("quote").post(checkout::quote::handler))
                .push(Router::with_path("initialize").post(checkout::initialize::handler))
                .push(Router::with_path("complete").post(checkout::complete::handler)),
        )
        .push(
            Router::with_path("carts/{user}")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(Router::with_path("merge").post(carts::merge::handler))
                .push(
                    Router::with_path("items")
                        .post(carts::add_item::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::update_item::handler)
                                .delete(carts::remove_item::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("email")
                .push(
                    Router::with_path("order-notification")
                        .post(email::order_notification::handler),
                )
                .push(
                    Router::with_path("order-status-update")
                        .post(email::order_status_update::handler),
                )
                .push(Router::with_path("contact").post(email::contact::handler)),
        )
}
