// src/services/inventory_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::{
        dashboard::{DashboardView, LowStockReport},
        product::{Product, ProductInput},
    },
    services::{csv_export::render_inventory_csv, stock_status::InventorySnapshot},
};

#[derive(Clone)]
pub struct InventoryService {
    product_repo: ProductRepository,
}

impl InventoryService {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    /// Uma consulta só; todas as visões saem deste snapshot.
    pub async fn load_snapshot<'e, E>(&self, executor: E) -> Result<InventorySnapshot, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = self.product_repo.get_all(executor).await?;
        Ok(InventorySnapshot::new(products))
    }

    // --- DASHBOARD ---
    pub async fn dashboard<'e, E>(
        &self,
        executor: E,
        notice: Option<String>,
    ) -> Result<DashboardView, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let snapshot = self.load_snapshot(executor).await?;
        let low_stock = snapshot.low_stock_count();

        Ok(DashboardView {
            products: snapshot.into_products(),
            low_stock,
            notice,
        })
    }

    // --- RELATÓRIO DE ESTOQUE BAIXO ---
    pub async fn low_stock_report<'e, E>(&self, executor: E) -> Result<LowStockReport, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let low_stock = self.load_snapshot(executor).await?.low_stock();
        let count = low_stock.len();
        Ok(LowStockReport { low_stock, count })
    }

    // --- EXPORTAÇÃO (inventário completo, sem filtro) ---
    pub async fn export_csv<'e, E>(&self, executor: E) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let snapshot = self.load_snapshot(executor).await?;
        tracing::debug!(rows = snapshot.products().len(), "Exportando inventário");
        Ok(render_inventory_csv(snapshot.products()))
    }

    // --- CRUD ---
    pub async fn get_product<'e, E>(&self, executor: E, id: i64) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.product_repo
            .find_by_id(executor, id)
            .await?
            .ok_or(AppError::ProductNotFound(id))
    }

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        input: &ProductInput,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = self.product_repo.create(executor, input).await?;
        tracing::info!(product_id = product.id, sku = %product.sku, "Produto criado");
        Ok(product)
    }

    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &ProductInput,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = self
            .product_repo
            .update(executor, id, input)
            .await?
            .ok_or(AppError::ProductNotFound(id))?;
        tracing::info!(product_id = id, "Produto atualizado");
        Ok(product)
    }

    pub async fn delete_product<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.product_repo.delete(executor, id).await? {
            return Err(AppError::ProductNotFound(id));
        }
        tracing::info!(product_id = id, "Produto removido");
        Ok(())
    }
}
