// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::product::Product;

// 1. Dashboard: todos os produtos + o contador do badge
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub products: Vec<Product>,
    pub low_stock: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>, // Ex: "access denied" depois de um redirect
}

// 2. Relatório: apenas os itens em risco
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub low_stock: Vec<Product>,
    pub count: usize,
}

// 3. Resposta das mutações de produto
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product: Product,
    pub notice: String,
}
