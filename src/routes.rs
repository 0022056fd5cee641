// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/logout", post(handlers::auth::logout))
                .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard)),
        );

    // Todo o resto exige sessão; escrita de produto ainda passa pelo Require<ManageProducts>
    let protected_routes = Router::new()
        .route("/users/me", get(handlers::auth::get_me))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/products", post(handlers::products::create_product))
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/reports/low-stock", get(handlers::dashboard::get_low_stock_report))
        .route("/export", get(handlers::dashboard::export_inventory_csv))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
