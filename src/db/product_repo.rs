// src/db/product_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::product::{Product, ProductInput},
};

const PRODUCT_COLUMNS: &str =
    "id, name, category, quantity, price, sku, threshold, created_at, updated_at";

// Sem pool próprio: todas as funções recebem o executor (pool, conexão ou transação).
#[derive(Clone, Default)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Leitura
    // ---

    /// Todos os produtos em ordem de criação.
    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    // ---
    // Escrita
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &ProductInput,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, category, quantity, price, sku, threshold)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.quantity)
        .bind(input.price)
        .bind(&input.sku)
        .bind(input.threshold)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    /// Substitui todos os campos. `None` quando o id não existe.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &ProductInput,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $2, category = $3, quantity = $4, price = $5,
                sku = $6, threshold = $7, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.quantity)
        .bind(input.price)
        .bind(&input.sku)
        .bind(input.threshold)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    /// `true` se alguma linha foi removida.
    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
