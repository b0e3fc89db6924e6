//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use mealbox::{
    delivery::{DeliveryAddress, DeliveryRecord},
    orders::{Order, OrderDraft},
};
use mealbox_app::{
    context::AppContext,
    domain::{
        business_rules::MockBusinessRulesService, carts::MockCartsService,
        checkout::MockCheckoutService, delivery_costs::MockDeliveryCostsService,
        orders::MockOrdersService,
        users::{MockUsersService, UsersServiceError},
    },
    notifications::MockNotifier,
};

use crate::{catcher::json_catcher, state::State};

/// Context whose services fail the test on any call.
pub(crate) fn strict_context() -> AppContext {
    AppContext {
        business_rules: Arc::new(MockBusinessRulesService::new()),
        delivery_costs: Arc::new(MockDeliveryCostsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        carts: Arc::new(MockCartsService::new()),
        checkout: Arc::new(MockCheckoutService::new()),
        users: Arc::new(MockUsersService::new()),
        notifier: Arc::new(MockNotifier::new()),
    }
}

pub(crate) fn service(app: AppContext, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(State::new(app))).push(route))
        .catcher(json_catcher())
}

/// Users service that treats any caller id as an admin.
pub(crate) fn any_admin() -> MockUsersService {
    let mut users = MockUsersService::new();

    users
        .expect_authorize_admin()
        .returning(|actor| actor.ok_or(UsersServiceError::Unauthenticated));

    users
}

/// Users service that refuses every caller.
pub(crate) fn no_admins() -> MockUsersService {
    let mut users = MockUsersService::new();

    users
        .expect_authorize_admin()
        .returning(|_| Err(UsersServiceError::Forbidden));

    users
}

pub(crate) fn business_rules_service(rules: MockBusinessRulesService, route: Router) -> Service {
    guarded_business_rules_service(rules, any_admin(), route)
}

pub(crate) fn guarded_business_rules_service(
    rules: MockBusinessRulesService,
    users: MockUsersService,
    route: Router,
) -> Service {
    service(
        AppContext {
            business_rules: Arc::new(rules),
            users: Arc::new(users),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn delivery_costs_service(costs: MockDeliveryCostsService, route: Router) -> Service {
    guarded_delivery_costs_service(costs, any_admin(), route)
}

pub(crate) fn guarded_delivery_costs_service(
    costs: MockDeliveryCostsService,
    users: MockUsersService,
    route: Router,
) -> Service {
    service(
        AppContext {
            delivery_costs: Arc::new(costs),
            users: Arc::new(users),
            ..strict_context()
        },
        route,
    )
}

/// A caller id for admin-only requests.
pub(crate) const ADMIN_ID: &str = "01890a5d-ac96-774b-bcce-b302099a8057";

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        AppContext {
            orders: Arc::new(orders),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(
        AppContext {
            carts: Arc::new(carts),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service(
        AppContext {
            checkout: Arc::new(checkout),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn notifier_service(notifier: MockNotifier, route: Router) -> Service {
    service(
        AppContext {
            notifier: Arc::new(notifier),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn address() -> DeliveryAddress {
    DeliveryAddress {
        name: "Ada Obi".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+2348000000000".to_string(),
        street: "12 Allen Avenue".to_string(),
        city: "Ikeja".to_string(),
        state: "Lagos".to_string(),
        lga: "Ikeja".to_string(),
    }
}

/// A freshly placed order with its delivery record.
pub(crate) fn make_order(id: Uuid) -> (Order, DeliveryRecord) {
    let delivery_id = Uuid::now_v7();

    let order = Order::place(
        OrderDraft {
            id,
            user_id: None,
            recipe_ids: vec![Uuid::now_v7()],
            amount: 5_675,
            delivery_id,
            transaction_id: Uuid::now_v7(),
        },
        Timestamp::UNIX_EPOCH,
    );

    let delivery = DeliveryRecord::new(delivery_id, address(), Timestamp::UNIX_EPOCH);

    match order {
        Ok(order) => (order, delivery),
        Err(error) => panic!("fixture order is invalid: {error}"),
    }
}
