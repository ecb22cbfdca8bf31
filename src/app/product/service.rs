//! 商品业务服务

use sqlx::mysql::MySqlPool;

use super::model::Product;
use crate::core::error::CoreError;

const SELECT_PRODUCT: &str = "SELECT id, name, price, description, created_at FROM products";

#[derive(Clone)]
pub struct ProductService {
    pool: MySqlPool,
}

impl ProductService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list_products(&self, limit: u32, offset: u32) -> Result<Vec<Product>, CoreError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, CoreError> {
        sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("product {id} not found")))
    }
}
