// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Papel do usuário. Mapeia o enum `user_role` do Postgres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Nome reservado que recebe o papel de administrador no cadastro.
    pub const ADMIN_USERNAME: &'static str = "admin";

    pub fn for_new_user(username: &str) -> Self {
        if username == Self::ADMIN_USERNAME {
            Role::Admin
        } else {
            Role::User
        }
    }

    /// Apenas administradores criam, editam e removem produtos.
    pub fn can_manage_products(self) -> bool {
        matches!(self, Role::Admin)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Quem está fazendo a requisição. Vem do token, nunca de estado global.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, max = 150, message = "validation.username_length"))]
    pub username: String,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "validation.required"))]
    pub username: String,
    #[validate(length(min = 1, message = "validation.required"))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub notice: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub user: User,
    pub notice: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoticeResponse {
    pub notice: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,        // Subject (ID do usuário)
    pub username: String,
    pub role: Role,
    pub exp: usize,       // Expiration time
    pub iat: usize,       // Issued At
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_reserved_username_becomes_admin() {
        assert_eq!(Role::for_new_user("admin"), Role::Admin);
        assert_eq!(Role::for_new_user("Admin"), Role::User);
        assert_eq!(Role::for_new_user("alice"), Role::User);
    }

    #[test]
    fn product_management_is_admin_only() {
        assert!(Role::Admin.can_manage_products());
        assert!(!Role::User.can_manage_products());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
