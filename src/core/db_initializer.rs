//! Startup schema migration and demo data seeding.

use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::account::{repositories::UserRepository, seed::seed_accounts};
use crate::modules::catalog::{repositories::ProductRepository, seed::seed_products};

/// Apply pending migrations from `./migrations`
pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Seed the demo catalog, roles and accounts; safe to run on every start
pub async fn seed(products: &dyn ProductRepository, users: &dyn UserRepository) -> Result<()> {
    let product_count = seed_products(products).await?;
    let created_accounts = seed_accounts(users).await?;

    tracing::info!(
        products = product_count,
        accounts_created = created_accounts,
        "Database seeding complete"
    );
    Ok(())
}

/// Migrate, then seed
pub async fn initialize(
    pool: &MySqlPool,
    products: &dyn ProductRepository,
    users: &dyn UserRepository,
) -> Result<()> {
    run_migrations(pool).await?;
    seed(products, users).await
}
