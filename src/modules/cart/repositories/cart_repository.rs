// Cart persistence.
//
// A cart row carries a `version` column; every save of an existing cart must
// match the version it was loaded at, otherwise another request saved first
// and the write is rejected with a conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, Result};
use crate::modules::cart::models::{Cart, CartProduct};
use crate::modules::catalog::models::Product;
use crate::modules::catalog::repositories::qualified_product_columns;

/// Storage access for carts
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Load a cart with its lines and their products
    async fn find_by_cart_id(&self, cart_id: &str) -> Result<Option<Cart>>;

    /// Persist a cart and its lines, returning it with its id and new version
    async fn save(&self, cart: &Cart) -> Result<Cart>;
}

#[derive(Debug, FromRow)]
struct CartRow {
    id: i64,
    cart_id: String,
    status: String,
    version: i32,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct CartLineRow {
    line_quantity: i32,
    #[sqlx(flatten)]
    product: Product,
}

/// MySQL-backed cart repository
#[derive(Clone)]
pub struct MySqlCartRepository {
    pool: MySqlPool,
}

impl MySqlCartRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for MySqlCartRepository {
    async fn find_by_cart_id(&self, cart_id: &str) -> Result<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT id, cart_id, status, version, created_at_utc, updated_at_utc
            FROM carts
            WHERE cart_id = ?
            "#,
        )
        .bind(cart_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, CartLineRow>(&format!(
            r#"
            SELECT cp.quantity AS line_quantity, {}
            FROM cart_products cp
            JOIN products p ON p.id = cp.product_id
            WHERE cp.cart_id = ?
            ORDER BY cp.position, cp.id
            "#,
            qualified_product_columns("p")
        ))
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Cart {
            id: Some(row.id),
            cart_id: row.cart_id,
            products: lines
                .into_iter()
                .map(|line| CartProduct {
                    product_id: line.product.id,
                    quantity: line.line_quantity,
                    product: line.product,
                })
                .collect(),
            status: row.status,
            created_at_utc: row.created_at_utc,
            updated_at_utc: row.updated_at_utc,
            version: row.version,
        }))
    }

    async fn save(&self, cart: &Cart) -> Result<Cart> {
        let mut tx = self.pool.begin().await?;

        let (id, version) = match cart.id {
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO carts (cart_id, status, version, created_at_utc, updated_at_utc)
                    VALUES (?, ?, 0, ?, ?)
                    "#,
                )
                .bind(&cart.cart_id)
                .bind(&cart.status)
                .bind(cart.created_at_utc)
                .bind(cart.updated_at_utc)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if let Some(db_err) = e.as_database_error() {
                        if db_err.is_unique_violation() {
                            return AppError::conflict(format!(
                                "Cart '{}' already exists",
                                cart.cart_id
                            ));
                        }
                    }
                    AppError::Database(e)
                })?;

                (result.last_insert_id() as i64, 0)
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE carts
                    SET status = ?, updated_at_utc = ?, version = version + 1
                    WHERE id = ? AND version = ?
                    "#,
                )
                .bind(&cart.status)
                .bind(cart.updated_at_utc)
                .bind(id)
                .bind(cart.version)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::conflict(
                        "Cart was modified by another request; reload and retry",
                    ));
                }

                (id, cart.version + 1)
            }
        };

        sqlx::query("DELETE FROM cart_products WHERE cart_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if !cart.products.is_empty() {
            let mut builder = QueryBuilder::<MySql>::new(
                "INSERT INTO cart_products (cart_id, product_id, quantity, position) ",
            );
            builder.push_values(cart.products.iter().enumerate(), |mut row, (position, line)| {
                row.push_bind(id)
                    .push_bind(line.product_id)
                    .push_bind(line.quantity)
                    .push_bind(position as i32);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!(
            cart_id = %cart.cart_id,
            lines = cart.products.len(),
            version = version,
            "Cart saved"
        );

        let mut saved = cart.clone();
        saved.id = Some(id);
        saved.version = version;
        Ok(saved)
    }
}
