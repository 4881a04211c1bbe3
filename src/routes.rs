//! HTTP routing table.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware, state::AppState};

/// Build the application router.
///
/// Everything under `/api/v1` requires the operator API key except the
/// payment callback, which is verified by its signature instead.
pub fn router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        // Accounts
        .route(
            "/api/v1/accounts",
            post(handlers::accounts::create_account).get(handlers::accounts::list_accounts),
        )
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account).patch(handlers::accounts::update_account),
        )
        .route(
            "/api/v1/accounts/{id}/balance",
            get(handlers::accounts::get_balance),
        )
        .route(
            "/api/v1/accounts/{id}/transactions",
            get(handlers::transactions::list_account_transactions),
        )
        .route(
            "/api/v1/accounts/{id}/orders",
            get(handlers::orders::list_client_orders),
        )
        // Profiles
        .route(
            "/api/v1/accounts/{id}/writer-profile",
            post(handlers::profiles::create_writer_profile)
                .get(handlers::profiles::get_writer_profile)
                .patch(handlers::profiles::update_writer_profile)
                .delete(handlers::profiles::delete_writer_profile),
        )
        .route(
            "/api/v1/accounts/{id}/client-profile",
            post(handlers::profiles::create_client_profile)
                .get(handlers::profiles::get_client_profile)
                .patch(handlers::profiles::update_client_profile)
                .delete(handlers::profiles::delete_client_profile),
        )
        // Ledger
        .route(
            "/api/v1/transactions",
            post(handlers::transactions::create_transaction),
        )
        .route(
            "/api/v1/transactions/{reference}",
            get(handlers::transactions::get_transaction),
        )
        .route(
            "/api/v1/transactions/{reference}/confirm",
            post(handlers::transactions::confirm_transaction),
        )
        // Orders
        .route(
            "/api/v1/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route(
            "/api/v1/orders/{id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .patch(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/v1/payments/callback",
            post(handlers::payments::payment_callback),
        )
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
