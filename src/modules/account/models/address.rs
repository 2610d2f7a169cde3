use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

pub const DEFAULT_COUNTRY: &str = "US";

/// Shipping address; one per account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub full_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            line1: String::new(),
            line2: None,
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            phone_number: String::new(),
        }
    }
}

impl Address {
    /// Enforce the column widths of the `addresses` table
    pub fn validate(&self) -> Result<()> {
        let limits: [(&str, &str, usize); 7] = [
            ("fullName", &self.full_name, 200),
            ("line1", &self.line1, 200),
            ("city", &self.city, 100),
            ("state", &self.state, 50),
            ("postalCode", &self.postal_code, 20),
            ("country", &self.country, 2),
            ("phoneNumber", &self.phone_number, 30),
        ];

        for (field, value, max) in limits {
            if value.chars().count() > max {
                return Err(AppError::validation(format!(
                    "{} cannot exceed {} characters",
                    field, max
                )));
            }
        }

        if let Some(line2) = &self.line2 {
            if line2.chars().count() > 200 {
                return Err(AppError::validation("line2 cannot exceed 200 characters"));
            }
        }

        Ok(())
    }
}
