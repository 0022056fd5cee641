// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::AuthenticatedUser,
    models::auth::Role,
};

/// Uma capacidade que o papel do usuário concede (ou não).
pub trait Capability: Send + Sync + 'static {
    fn name() -> &'static str;
    fn granted_to(role: Role) -> bool;
}

/// Guardião: rejeita com `AccessDenied` (redirect para o dashboard).
pub struct Require<C>(pub PhantomData<C>);

impl<C, S> FromRequestParts<S> for Require<C>
where
    C: Capability,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(ctx) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !C::granted_to(ctx.role) {
            tracing::warn!(
                username = %ctx.username,
                capability = C::name(),
                "Acesso negado"
            );
            return Err(AppError::AccessDenied);
        }

        Ok(Require(PhantomData))
    }
}

// ---
// CAPACIDADES
// ---

pub struct ManageProducts;
impl Capability for ManageProducts {
    fn name() -> &'static str { "products:manage" }
    fn granted_to(role: Role) -> bool { role.can_manage_products() }
}
