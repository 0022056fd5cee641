// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

/// Para onde o usuário sem permissão é mandado de volta.
pub const ACCESS_DENIED_REDIRECT: &str = "/api/dashboard?notice=access-denied";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Formulário de produto rejeitado: devolvemos o que foi enviado
    #[error("Formulário de produto inválido")]
    InvalidProductForm {
        errors: validator::ValidationErrors,
        input: Value,
    },

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Produto {0} não encontrado")]
    ProductNotFound(i64),

    #[error("Acesso negado")]
    AccessDenied,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// O que efetivamente vai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
    pub input: Option<Value>,
    pub location: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, error: String) -> Self {
        Self { status, error, details: None, input: None, location: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(location) = self.location {
            return (self.status, [(header::LOCATION, location)]).into_response();
        }

        let mut body = json!({ "error": self.error });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        if let Some(input) = self.input {
            body["input"] = input;
        }
        (self.status, Json(body)).into_response()
    }
}

fn field_details(
    errors: &validator::ValidationErrors,
    lang: &str,
    store: &I18nStore,
) -> Value {
    let mut details: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| match &e.message {
                Some(key) => store.translate(lang, key),
                None => store.translate(lang, &e.code),
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    json!(details)
}

impl AppError {
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let msg = |key: &str| store.translate(lang, key);

        match self {
            AppError::ValidationError(errors) => ApiError {
                details: Some(field_details(&errors, lang, store)),
                ..ApiError::new(StatusCode::BAD_REQUEST, msg("error.validation"))
            },
            AppError::InvalidProductForm { errors, input } => ApiError {
                details: Some(field_details(&errors, lang, store)),
                input: Some(input),
                ..ApiError::new(StatusCode::BAD_REQUEST, msg("error.validation"))
            },
            AppError::UsernameAlreadyExists => {
                ApiError::new(StatusCode::CONFLICT, msg("error.username_taken"))
            }
            AppError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, msg("error.invalid_credentials"))
            }
            AppError::InvalidToken => {
                ApiError::new(StatusCode::UNAUTHORIZED, msg("error.invalid_token"))
            }
            AppError::ProductNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, msg("error.product_not_found"))
            }
            AppError::AccessDenied => ApiError {
                location: Some(ACCESS_DENIED_REDIRECT.to_string()),
                ..ApiError::new(StatusCode::SEE_OTHER, msg("notice.access_denied"))
            },
            AppError::UniqueConstraintViolation(_) => {
                ApiError::new(StatusCode::CONFLICT, msg("error.unique_violation"))
            }

            // Todo o resto vira 500; o detalhe só vai para o log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, msg("error.internal"))
            }
        }
    }
}

// Usado quando o AppError é a rejeição de um extrator (sem Locale à mão).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::new())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn en() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn not_found_maps_to_404() {
        let api = AppError::ProductNotFound(42).to_api_error(&en(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Product not found.");
    }

    #[test]
    fn access_denied_redirects_to_the_dashboard() {
        let response = AppError::AccessDenied.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            ACCESS_DENIED_REDIRECT
        );
    }

    #[test]
    fn product_form_errors_echo_the_input() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = ValidationError::new("integer");
        err.message = Some("validation.integer".into());
        errors.add("quantity", err);

        let api = AppError::InvalidProductForm {
            errors,
            input: json!({ "quantity": "abc" }),
        }
        .to_api_error(&Locale("pt".to_string()), &I18nStore::new());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap()["quantity"][0], "Deve ser um número inteiro.");
        assert_eq!(api.input.unwrap()["quantity"], "abc");
    }

    #[test]
    fn unexpected_errors_hide_their_details() {
        let api = AppError::InternalServerError(anyhow::anyhow!("disk on fire"))
            .to_api_error(&en(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("disk"));
    }
}
