use std::time::Duration;

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth, customers, dashboard, health, medications, orders};
use crate::AppState;

/// Assemble the full application router.
///
/// Only `/api/protected` sits behind the bearer-token middleware; the CRUD
/// surface is public, as in the upstream system.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/protected", get(auth::protected))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let public_routes = Router::new()
        .route("/", get(health::welcome))
        .route("/health", get(health::health_check))
        .route("/api/login", axum::routing::post(auth::login))
        .route(
            "/api/medications",
            get(medications::list_medications).post(medications::create_medication),
        )
        .route(
            "/api/medications/{id}",
            get(medications::get_medication)
                .put(medications::update_medication)
                .delete(medications::delete_medication),
        )
        .route(
            "/api/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/api/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/api/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order_status)
                .delete(orders::delete_order),
        )
        .route("/api/dashboard", get(dashboard::get_dashboard));

    public_routes
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
