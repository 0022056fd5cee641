// src/handlers/products.rs

use std::num::IntErrorKind;
use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{ManageProducts, Require},
    },
    models::{
        auth::NoticeResponse,
        dashboard::ProductResponse,
        product::{Product, ProductInput},
    },
};

// NUMERIC(12, 2)
const MAX_PRICE_DIGITS: u32 = 10;

// ---
// Payload: formulário de produto (criação e edição)
// ---
// Os campos numéricos chegam como valor livre (texto ou número) para que um
// "abc" vire erro de validação com o formulário devolvido, e não um 422 do
// decodificador JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ProductForm {
    #[validate(length(min = 1, max = 150, message = "validation.name_length"))]
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,

    #[validate(length(max = 100, message = "validation.category_length"))]
    #[serde(deserialize_with = "lenient_text")]
    pub category: String,

    #[schema(value_type = String, example = "5")]
    pub quantity: Value,

    #[schema(value_type = String, example = "2.50")]
    pub price: Value,

    #[validate(length(max = 100, message = "validation.sku_length"))]
    #[serde(deserialize_with = "lenient_text")]
    pub sku: String,

    #[schema(value_type = String, example = "10")]
    pub threshold: Value,
}

// null -> "", 5 -> "5"; nada de 422 do extrator Json por causa do tipo.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn invalid(code: &'static str, message_key: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message_key.into());
    err
}

fn parse_integer(value: &Value) -> Result<i32, ValidationError> {
    let not_integer = || invalid("integer", "validation.integer");
    let out_of_range = || invalid("range", "validation.integer_range");
    match value {
        Value::Null => Err(invalid("required", "validation.required")),
        Value::String(s) if s.trim().is_empty() => Err(invalid("required", "validation.required")),
        Value::String(s) => s.trim().parse::<i32>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
            _ => not_integer(),
        }),
        Value::Number(n) => match n.as_i64() {
            Some(v) => i32::try_from(v).map_err(|_| out_of_range()),
            None if n.is_u64() => Err(out_of_range()),
            None => Err(not_integer()),
        },
        _ => Err(not_integer()),
    }
}

fn parse_price(value: &Value) -> Result<Decimal, ValidationError> {
    let not_decimal = || invalid("decimal", "validation.decimal");
    let price = match value {
        Value::Null => return Err(invalid("required", "validation.required")),
        Value::String(s) if s.trim().is_empty() => {
            return Err(invalid("required", "validation.required"));
        }
        Value::String(s) => Decimal::from_str(s.trim()).map_err(|_| not_decimal())?,
        Value::Number(n) => Decimal::from_str(&n.to_string()).map_err(|_| not_decimal())?,
        _ => return Err(not_decimal()),
    };

    let price = price.round_dp(2);
    if price.abs() >= Decimal::from(10_i64.pow(MAX_PRICE_DIGITS)) {
        return Err(invalid("range", "validation.price_range"));
    }
    Ok(price)
}

impl ProductForm {
    /// Converte o formulário. Em caso de erro, devolve o formulário original
    /// junto dos erros por campo.
    pub fn into_input(self) -> Result<ProductInput, AppError> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        let quantity = parse_integer(&self.quantity)
            .map_err(|e| errors.add("quantity", e))
            .ok();
        let price = parse_price(&self.price).map_err(|e| errors.add("price", e)).ok();
        let threshold = parse_integer(&self.threshold)
            .map_err(|e| errors.add("threshold", e))
            .ok();

        match (quantity, price, threshold) {
            (Some(quantity), Some(price), Some(threshold)) if errors.errors().is_empty() => {
                Ok(ProductInput {
                    name: self.name,
                    category: self.category,
                    quantity,
                    price,
                    sku: self.sku,
                    threshold,
                })
            }
            _ => Err(AppError::InvalidProductForm {
                errors,
                input: serde_json::to_value(&self).unwrap_or_default(),
            }),
        }
    }
}

// ---
// Handlers
// ---

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductForm,
    responses(
        (status = 201, description = "Produto criado", body = ProductResponse),
        (status = 303, description = "Sem permissão: redireciona para o dashboard"),
        (status = 400, description = "Formulário inválido (devolvido em `input`)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<ManageProducts>,
    Json(form): Json<ProductForm>,
) -> Result<impl IntoResponse, ApiError> {
    let input = form
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .inventory_service
        .create_product(&app_state.db_pool, &input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let notice = app_state.i18n_store.translate(&locale.0, "notice.product_added");
    Ok((StatusCode::CREATED, Json(ProductResponse { product, notice })))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    let product = app_state
        .inventory_service
        .get_product(&app_state.db_pool, product_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

// PUT /api/products/{id}
// Substitui todos os campos; não existe atualização parcial.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    request_body = ProductForm,
    responses(
        (status = 200, body = ProductResponse),
        (status = 303, description = "Sem permissão: redireciona para o dashboard"),
        (status = 400, description = "Formulário inválido (devolvido em `input`)"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<ManageProducts>,
    Path(product_id): Path<i64>,
    Json(form): Json<ProductForm>,
) -> Result<Json<ProductResponse>, ApiError> {
    let input = form
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .inventory_service
        .update_product(&app_state.db_pool, product_id, &input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let notice = app_state.i18n_store.translate(&locale.0, "notice.product_updated");
    Ok(Json(ProductResponse { product, notice }))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, body = NoticeResponse),
        (status = 303, description = "Sem permissão: redireciona para o dashboard"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<ManageProducts>,
    Path(product_id): Path<i64>,
) -> Result<Json<NoticeResponse>, ApiError> {
    app_state
        .inventory_service
        .delete_product(&app_state.db_pool, product_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(NoticeResponse {
        notice: app_state.i18n_store.translate(&locale.0, "notice.product_deleted"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> ProductForm {
        serde_json::from_value(value).unwrap()
    }

    fn form_errors(result: Result<ProductInput, AppError>) -> (Vec<String>, Value) {
        match result {
            Err(AppError::InvalidProductForm { errors, input }) => {
                let mut fields: Vec<String> =
                    errors.field_errors().keys().map(|k| k.to_string()).collect();
                fields.sort();
                (fields, input)
            }
            other => panic!("esperava InvalidProductForm, veio {other:?}"),
        }
    }

    #[test]
    fn accepts_text_fields_like_an_html_form() {
        let input = form(json!({
            "name": "Widget", "category": "Hardware", "quantity": "5",
            "price": "2.50", "sku": "SKU1", "threshold": "10"
        }))
        .into_input()
        .unwrap();

        assert_eq!(input.quantity, 5);
        assert_eq!(input.price, Decimal::new(250, 2));
        assert_eq!(input.threshold, 10);
    }

    #[test]
    fn accepts_json_numbers_and_negative_quantities() {
        let input = form(json!({
            "name": "Gadget", "category": "", "quantity": -4,
            "price": 9.99, "sku": "", "threshold": 0
        }))
        .into_input()
        .unwrap();

        assert_eq!(input.quantity, -4);
        assert_eq!(input.price, Decimal::new(999, 2));
        assert_eq!(input.threshold, 0);
    }

    #[test]
    fn non_numeric_input_is_reported_and_echoed() {
        let (fields, input) = form_errors(
            form(json!({
                "name": "Widget", "category": "Hardware", "quantity": "lots",
                "price": "cheap", "sku": "SKU1", "threshold": "10"
            }))
            .into_input(),
        );

        assert_eq!(fields, vec!["price", "quantity"]);
        assert_eq!(input["quantity"], "lots");
        assert_eq!(input["price"], "cheap");
        assert_eq!(input["name"], "Widget");
    }

    #[test]
    fn missing_threshold_is_required() {
        let (fields, _) = form_errors(
            form(json!({ "name": "Widget", "quantity": "1", "price": "1" })).into_input(),
        );
        assert_eq!(fields, vec!["threshold"]);
    }

    #[test]
    fn fractional_quantity_is_not_an_integer() {
        let (fields, _) = form_errors(
            form(json!({ "name": "W", "quantity": "1.5", "price": "1", "threshold": 1 }))
                .into_input(),
        );
        assert_eq!(fields, vec!["quantity"]);
    }

    #[test]
    fn integers_beyond_i32_are_out_of_range_not_malformed() {
        let result = form(json!({
            "name": "W", "quantity": "99999999999", "price": "1", "threshold": -3_000_000_000_i64
        }))
        .into_input();

        match result {
            Err(AppError::InvalidProductForm { errors, .. }) => {
                let fields = errors.field_errors();
                for field in ["quantity", "threshold"] {
                    let err = &fields[field][0];
                    assert_eq!(err.code, "range", "{field}");
                    assert_eq!(err.message.as_deref(), Some("validation.integer_range"));
                }
            }
            other => panic!("esperava InvalidProductForm, veio {other:?}"),
        }
    }

    #[test]
    fn text_fields_accept_null_and_scalars() {
        let form = form(json!({
            "name": "Widget", "category": null, "quantity": 1,
            "price": 1, "sku": 5, "threshold": 1
        }));
        assert_eq!(form.category, "");
        assert_eq!(form.sku, "5");
        assert!(form.into_input().is_ok());
    }

    #[test]
    fn null_name_reaches_validation_with_input_echoed() {
        let (fields, input) = form_errors(
            form(json!({ "name": null, "quantity": 1, "price": 1, "threshold": 1 })).into_input(),
        );
        assert_eq!(fields, vec!["name"]);
        assert_eq!(input["name"], "");
        assert_eq!(input["quantity"], 1);
    }

    #[test]
    fn empty_name_and_huge_price_are_rejected() {
        let (fields, _) = form_errors(
            form(json!({ "name": "", "quantity": 1, "price": "99999999999", "threshold": 1 }))
                .into_input(),
        );
        assert_eq!(fields, vec!["name", "price"]);
    }
}
