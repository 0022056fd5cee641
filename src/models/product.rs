// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Produto ---
// O único registro com regra de negócio: o par quantity/threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: Decimal,
    pub sku: String,
    pub threshold: i32, // Ponto de reposição
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Estoque baixo quando `quantity <= threshold` (limite inclusivo).
    /// Calculado sempre na leitura; nunca é gravado no banco.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.threshold
    }
}

// Campos já convertidos e validados, prontos para o repositório.
// A edição substitui todos eles de uma vez.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: Decimal,
    pub sku: String,
    pub threshold: i32,
}
