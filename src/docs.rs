// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,

        // --- Users ---
        handlers::auth::get_me,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Dashboard / Reports ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_low_stock_report,
        handlers::dashboard::export_inventory_csv,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::AuthContext,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::RegisterResponse,
            models::auth::NoticeResponse,

            // --- Products ---
            models::product::Product,
            handlers::products::ProductForm,
            models::dashboard::ProductResponse,

            // --- Dashboard ---
            models::dashboard::DashboardView,
            models::dashboard::LowStockReport,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro, login e logout"),
        (name = "Users", description = "Dados do usuário autenticado"),
        (name = "Products", description = "Cadastro de produtos (escrita só para admin)"),
        (name = "Dashboard", description = "Visão geral do estoque"),
        (name = "Reports", description = "Estoque baixo e exportação CSV")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/users/me",
            "/api/products",
            "/api/products/{id}",
            "/api/dashboard",
            "/api/reports/low-stock",
            "/api/export",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando {path}");
        }
    }
}
