//! Demo roles and accounts loaded on startup.
//!
//! Existing accounts keep their password and address; role membership and
//! account type are brought back in line with the definitions below.

use crate::core::Result;
use crate::modules::account::models::{
    AccountType, Address, User, ROLE_ADMIN, ROLE_BUSINESS, ROLE_USER,
};
use crate::modules::account::repositories::UserRepository;
use crate::modules::account::services::hash_password;

pub const DEMO_PASSWORD: &str = "TestUser1";

pub const SEEDED_ROLES: [&str; 3] = [ROLE_USER, ROLE_BUSINESS, ROLE_ADMIN];

/// A demo account definition
#[derive(Debug, Clone)]
pub struct DemoAccount {
    pub email: &'static str,
    pub account_type: AccountType,
    pub role: &'static str,
    pub business_name: Option<&'static str>,
    pub tax_id: Option<&'static str>,
    pub address: Address,
}

fn address(
    full_name: &str,
    line1: &str,
    line2: Option<&str>,
    city: &str,
    state: &str,
    postal_code: &str,
    phone_number: &str,
) -> Address {
    Address {
        full_name: full_name.to_string(),
        line1: line1.to_string(),
        line2: line2.map(str::to_string),
        city: city.to_string(),
        state: state.to_string(),
        postal_code: postal_code.to_string(),
        country: "US".to_string(),
        phone_number: phone_number.to_string(),
    }
}

pub fn demo_accounts() -> Vec<DemoAccount> {
    vec![
        DemoAccount {
            email: "public@test.com",
            account_type: AccountType::Public,
            role: ROLE_USER,
            business_name: None,
            tax_id: None,
            address: address("Public User", "100 Public St", None, "New York", "NY", "10001", "555-000-0001"),
        },
        DemoAccount {
            email: "business@test.com",
            account_type: AccountType::Business,
            role: ROLE_BUSINESS,
            business_name: Some("NeoWasl Business LLC"),
            tax_id: Some("11-1111111"),
            address: address("Business Owner", "200 Business Ave", Some("Suite 10"), "Bronx", "NY", "10459", "555-100-0001"),
        },
        DemoAccount {
            email: "admin@test.com",
            account_type: AccountType::Admin,
            role: ROLE_ADMIN,
            business_name: None,
            tax_id: None,
            address: address("Admin User", "1 Admin Plaza", None, "New York", "NY", "10005", "555-900-0001"),
        },
    ]
}

/// Ensure the demo roles and accounts exist; returns how many accounts were created
pub async fn seed_accounts(repo: &dyn UserRepository) -> Result<usize> {
    for role in SEEDED_ROLES {
        repo.ensure_role(role).await?;
    }

    let mut created = 0;
    for account in demo_accounts() {
        if ensure_account(repo, &account).await? {
            created += 1;
        }
    }

    tracing::info!(created = created, "Demo accounts seeded");
    Ok(created)
}

async fn ensure_account(repo: &dyn UserRepository, account: &DemoAccount) -> Result<bool> {
    if let Some(mut existing) = repo.find_by_email(account.email).await? {
        repo.add_to_role(&existing.id, account.role).await?;

        if existing.account_type != account.account_type {
            existing.account_type = account.account_type;
            existing.business_name = account.business_name.map(str::to_string);
            existing.tax_id = account.tax_id.map(str::to_string);
            repo.update_profile(&existing).await?;
            tracing::info!(email = account.email, "Demo account type re-synced");
        }

        return Ok(false);
    }

    let mut user = User::new(account.email, hash_password(DEMO_PASSWORD)?);
    user.account_type = account.account_type;
    user.business_name = account.business_name.map(str::to_string);
    user.tax_id = account.tax_id.map(str::to_string);

    repo.create(&user, Some(&account.address)).await?;
    repo.add_to_role(&user.id, account.role).await?;

    tracing::debug!(email = account.email, role = account.role, "Demo account created");
    Ok(true)
}
