//! Catalog administration.

use minimart_core::{Money, ProductId};
use serde::Deserialize;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Product;

/// Sort order for the staff catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC, id DESC",
            Self::PriceAsc => "price ASC, id ASC",
            Self::PriceDesc => "price DESC, id DESC",
        }
    }
}

/// Repository for staff operations on the catalog.
pub struct ProductAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductAdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally narrowed by a case-insensitive name
    /// fragment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        search: Option<&str>,
        sort: ProductSort,
    ) -> Result<Vec<Product>, RepositoryError> {
        let pattern = search
            .map(|s| format!("%{}%", s.replace('%', "\\%").replace('_', "\\_")));

        let sql = format!(
            r"
            SELECT id, name, price, qty, image_url, created_at, updated_at
            FROM products
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY {}
            ",
            sort.order_by()
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        price: Money,
        qty: i32,
        image_url: Option<&str>,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (name, price, qty, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, qty, image_url, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(price)
        .bind(qty)
        .bind(image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Update a product's name, price, or image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist,
    /// or `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        price: Money,
        image_url: Option<&str>,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET name = $2, price = $3, image_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, qty, image_url, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(product)
    }

    /// Adjust stock by a signed delta.
    ///
    /// The delta is applied in a single statement guarded against going
    /// negative, so restocks and corrections cannot race a checkout into
    /// a negative count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist,
    /// `RepositoryError::Conflict` if the decrement would drive the count
    /// negative, or `RepositoryError::Database` if the query fails.
    pub async fn adjust_stock(&self, id: ProductId, delta: i32) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET qty = qty + $2, updated_at = NOW()
            WHERE id = $1 AND qty + $2 >= 0
            RETURNING id, name, price, qty, image_url, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(self.pool)
        .await?;

        match product {
            Some(product) => Ok(product),
            None => {
                let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM products WHERE id = $1")
                    .bind(id)
                    .fetch_optional(self.pool)
                    .await?;
                match exists {
                    Some(_) => Err(RepositoryError::Conflict(
                        "stock cannot go below zero".to_string(),
                    )),
                    None => Err(RepositoryError::NotFound),
                }
            }
        }
    }

    /// Remove a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist,
    /// or `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
