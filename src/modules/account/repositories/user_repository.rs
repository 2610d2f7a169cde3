use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::account::models::{Address, User};

const USER_COLUMNS: &str = "id, email, user_name, password_hash, account_type, tax_id, \
    business_name, business_type, delivery_notes, extras, tier, access_failed_count, \
    lockout_end";

/// Storage access for accounts, roles and addresses
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Case-insensitive lookup by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Insert a user, with an optional shipping address, atomically
    async fn create(&self, user: &User, address: Option<&Address>) -> Result<()>;

    /// Overwrite the profile columns of an existing user
    async fn update_profile(&self, user: &User) -> Result<()>;

    /// Count one failed login in a single atomic step
    ///
    /// When the counter reaches `max_attempts` it resets to zero and the
    /// account is locked until `lockout_end`. Returns the stored lockout end.
    async fn record_failed_access(
        &self,
        user_id: &str,
        max_attempts: i32,
        lockout_end: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>>;

    /// Clear the failed-login counter and any lockout
    async fn reset_access_failures(&self, user_id: &str) -> Result<()>;

    /// Create the role if it does not exist
    async fn ensure_role(&self, name: &str) -> Result<()>;

    /// Grant a role; granting an existing membership is a no-op
    async fn add_to_role(&self, user_id: &str, role: &str) -> Result<()>;

    async fn roles_for(&self, user_id: &str) -> Result<Vec<String>>;

    async fn find_address(&self, user_id: &str) -> Result<Option<Address>>;

    /// Insert or replace the user's single address
    async fn upsert_address(&self, user_id: &str, address: &Address) -> Result<()>;
}

/// MySQL-backed user repository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER(?)",
            USER_COLUMNS
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: &User, address: Option<&Address>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, user_name, password_hash, account_type, tax_id,
                business_name, business_type, delivery_notes, extras, tier,
                access_failed_count, lockout_end
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.user_name)
        .bind(&user.password_hash)
        .bind(user.account_type.to_string())
        .bind(&user.tax_id)
        .bind(&user.business_name)
        .bind(&user.business_type)
        .bind(&user.delivery_notes)
        .bind(Json(&user.extras))
        .bind(user.tier.to_string())
        .bind(user.access_failed_count)
        .bind(user.lockout_end)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Email '{}' is already taken.",
                        user.email
                    ));
                }
            }
            AppError::Database(e)
        })?;

        if let Some(address) = address {
            insert_or_replace_address(&mut *tx, &user.id, address).await?;
        }

        tx.commit().await?;

        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET account_type = ?, tax_id = ?, business_name = ?, business_type = ?,
                delivery_notes = ?, extras = ?, tier = ?
            WHERE id = ?
            "#,
        )
        .bind(user.account_type.to_string())
        .bind(&user.tax_id)
        .bind(&user.business_name)
        .bind(&user.business_type)
        .bind(&user.delivery_notes)
        .bind(Json(&user.extras))
        .bind(user.tier.to_string())
        .bind(&user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // MySQL reports zero for unchanged rows, so confirm the row exists
            if self.find_by_id(&user.id).await?.is_none() {
                return Err(AppError::not_found(format!("User {} not found", user.id)));
            }
        }

        Ok(())
    }

    async fn record_failed_access(
        &self,
        user_id: &str,
        max_attempts: i32,
        lockout_end: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let mut tx = self.pool.begin().await?;

        // MySQL applies SET assignments left to right: lockout_end must read
        // the counter before it is reset.
        sqlx::query(
            r#"
            UPDATE users SET
                lockout_end = IF(access_failed_count + 1 >= ?, ?, lockout_end),
                access_failed_count = IF(access_failed_count + 1 >= ?, 0, access_failed_count + 1)
            WHERE id = ?
            "#,
        )
        .bind(max_attempts)
        .bind(lockout_end)
        .bind(max_attempts)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let stored: Option<Option<DateTime<Utc>>> =
            sqlx::query_scalar("SELECT lockout_end FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(stored.flatten())
    }

    async fn reset_access_failures(&self, user_id: &str) -> Result<()> {
        sqlx::query("UPDATE users SET access_failed_count = 0, lockout_end = NULL WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ensure_role(&self, name: &str) -> Result<()> {
        sqlx::query("INSERT IGNORE INTO roles (id, name) VALUES (?, ?)")
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_to_role(&self, user_id: &str, role: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT IGNORE INTO user_roles (user_id, role_id)
            SELECT ?, id FROM roles WHERE name = ?
            "#,
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM roles WHERE name = ?")
                .bind(role)
                .fetch_optional(&self.pool)
                .await?;

            if exists.is_none() {
                return Err(AppError::internal(format!("Role '{}' does not exist", role)));
            }
        }

        Ok(())
    }

    async fn roles_for(&self, user_id: &str) -> Result<Vec<String>> {
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = ?
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    async fn find_address(&self, user_id: &str) -> Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            SELECT full_name, line1, line2, city, state, postal_code, country, phone_number
            FROM addresses
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn upsert_address(&self, user_id: &str, address: &Address) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_or_replace_address(&mut *conn, user_id, address).await
    }
}

async fn insert_or_replace_address(
    conn: &mut sqlx::MySqlConnection,
    user_id: &str,
    address: &Address,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO addresses (
            user_id, full_name, line1, line2, city, state, postal_code, country, phone_number
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            full_name = VALUES(full_name),
            line1 = VALUES(line1),
            line2 = VALUES(line2),
            city = VALUES(city),
            state = VALUES(state),
            postal_code = VALUES(postal_code),
            country = VALUES(country),
            phone_number = VALUES(phone_number)
        "#,
    )
    .bind(user_id)
    .bind(&address.full_name)
    .bind(&address.line1)
    .bind(&address.line2)
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.postal_code)
    .bind(&address.country)
    .bind(&address.phone_number)
    .execute(conn)
    .await?;

    Ok(())
}
