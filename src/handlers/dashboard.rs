// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::dashboard::{DashboardView, LowStockReport},
    services::csv_export::{EXPORT_CONTENT_TYPE, EXPORT_FILENAME},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Aviso vindo de um redirect (ex: `access-denied`).
    pub notice: Option<String>,
}

fn notice_key(notice: &str) -> Option<&'static str> {
    match notice {
        "access-denied" => Some("notice.access_denied"),
        _ => None,
    }
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Todos os produtos e o total em estoque baixo", body = DashboardView),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let notice = query
        .notice
        .as_deref()
        .and_then(notice_key)
        .map(|key| app_state.i18n_store.translate(&locale.0, key));

    let view = app_state
        .inventory_service
        .dashboard(&app_state.db_pool, notice)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// GET /api/reports/low-stock
#[utoipa::path(
    get,
    path = "/api/reports/low-stock",
    tag = "Reports",
    responses(
        (status = 200, description = "Produtos com quantity <= threshold", body = LowStockReport),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_low_stock_report(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<Json<LowStockReport>, ApiError> {
    let report = app_state
        .inventory_service
        .low_stock_report(&app_state.db_pool)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(report))
}

// GET /api/export
#[utoipa::path(
    get,
    path = "/api/export",
    tag = "Reports",
    responses(
        (status = 200, description = "inventory_report.csv com todos os produtos", content_type = "text/csv", body = String),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_inventory_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(ctx): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let csv = app_state
        .inventory_service
        .export_csv(&app_state.db_pool)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(username = %ctx.username, "Inventário exportado");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    ))
}
