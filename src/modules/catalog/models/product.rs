use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog product as stored and as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,

    /// Price in minor currency units (cents)
    pub price: i64,

    pub picture_url: String,

    #[serde(rename = "type")]
    pub product_type: String,

    pub brand: String,
    pub quantity_in_stock: i32,
    pub business_type: String,
    pub discount_amount: Option<Decimal>,
    pub discount_start_utc: Option<DateTime<Utc>>,
    pub discount_end_utc: Option<DateTime<Utc>>,

    #[sqlx(json)]
    pub tags: Vec<String>,

    pub is_active: bool,
    pub is_featured: bool,
    pub supplier: Option<String>,
    pub supplier_id: Option<i64>,
    pub sold_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product data used to insert or refresh catalog rows.
///
/// Rows are matched by `name`; an existing product keeps its id, stock and
/// sales counters.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: i64,
    pub picture_url: String,
    pub product_type: String,
    pub brand: String,
    pub quantity_in_stock: i32,
    pub business_type: String,
    pub discount_amount: Option<Decimal>,
    pub discount_start_utc: Option<DateTime<Utc>>,
    pub discount_end_utc: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub is_featured: bool,
}

impl NewProduct {
    pub fn new(
        name: &str,
        brand: &str,
        product_type: &str,
        category: &str,
        business_type: &str,
        price: i64,
        picture_url: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: String::new(),
            price,
            picture_url: picture_url.to_string(),
            product_type: product_type.to_string(),
            brand: brand.to_string(),
            quantity_in_stock: 100,
            business_type: business_type.to_string(),
            discount_amount: None,
            discount_start_utc: None,
            discount_end_utc: None,
            tags: Vec::new(),
            is_featured: false,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    pub fn discount(mut self, amount: Decimal, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.discount_amount = Some(amount);
        self.discount_start_utc = Some(start);
        self.discount_end_utc = Some(end);
        self
    }

    /// Materialize as a stored product with the given id
    pub fn into_product(self, id: i64, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            price: self.price,
            picture_url: self.picture_url,
            product_type: self.product_type,
            brand: self.brand,
            quantity_in_stock: self.quantity_in_stock,
            business_type: self.business_type,
            discount_amount: self.discount_amount,
            discount_start_utc: self.discount_start_utc,
            discount_end_utc: self.discount_end_utc,
            tags: self.tags,
            is_active: true,
            is_featured: self.is_featured,
            supplier: None,
            supplier_id: None,
            sold_quantity: 0,
            created_at,
            updated_at: None,
        }
    }
}
