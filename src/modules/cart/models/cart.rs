// Shopping cart aggregate.
//
// A cart is identified by the opaque id stored in the client's `CartId`
// cookie. Lines keep insertion order; each product appears at most once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::Product;

pub const CART_STATUS_ACTIVE: &str = "Active";

/// One product line in a cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub product_id: i64,
    pub quantity: i32,
    pub product: Product,
}

impl CartProduct {
    /// Line total in minor units
    pub fn total_price(&self) -> i64 {
        self.product.price * self.quantity as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// Database id, `None` until first saved
    pub id: Option<i64>,
    pub cart_id: String,
    pub products: Vec<CartProduct>,
    pub status: String,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
    /// Row version the cart was loaded at
    pub version: i32,
}

impl Cart {
    /// Start an empty cart under a freshly generated cart id
    pub fn new() -> Self {
        Self::with_cart_id(Uuid::new_v4().to_string())
    }

    pub fn with_cart_id(cart_id: String) -> Self {
        Self {
            id: None,
            cart_id,
            products: Vec::new(),
            status: CART_STATUS_ACTIVE.to_string(),
            created_at_utc: Utc::now(),
            updated_at_utc: None,
            version: 0,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// Existing lines are incremented; otherwise a new line is appended.
    pub fn add_product(&mut self, product: Product, quantity: i32) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than zero."));
        }

        match self.find_line_mut(product.id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| AppError::validation("Quantity is too large."))?;
            }
            None => self.products.push(CartProduct {
                product_id: product.id,
                quantity,
                product,
            }),
        }

        self.touch();
        Ok(())
    }

    /// Remove units of a product.
    ///
    /// Missing products are ignored. With no quantity, a non-positive one, or
    /// one covering the whole line, the line is dropped; otherwise it is
    /// decremented.
    pub fn remove_product(&mut self, product_id: i64, quantity: Option<i32>) {
        let Some(index) = self.products.iter().position(|p| p.product_id == product_id) else {
            return;
        };

        let line = &mut self.products[index];
        match quantity {
            Some(q) if q > 0 && q < line.quantity => line.quantity -= q,
            _ => {
                self.products.remove(index);
            }
        }

        self.touch();
    }

    /// Cart total in minor units
    pub fn total_amount(&self) -> i64 {
        self.products.iter().map(CartProduct::total_price).sum()
    }

    pub fn quantity_of(&self, product_id: i64) -> Option<i32> {
        self.products
            .iter()
            .find(|p| p.product_id == product_id)
            .map(|p| p.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn to_dto(&self) -> CartDto {
        CartDto {
            id: self.id.unwrap_or_default(),
            cart_id: self.cart_id.clone(),
            total_amount: self.total_amount(),
            products: self
                .products
                .iter()
                .map(|line| CartProductDto {
                    product_id: line.product_id,
                    name: line.product.name.clone(),
                    price: line.product.price,
                    total_price: line.total_price(),
                    picture_url: line.product.picture_url.clone(),
                    brand: line.product.brand.clone(),
                    product_type: line.product.product_type.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }

    fn find_line_mut(&mut self, product_id: i64) -> Option<&mut CartProduct> {
        self.products.iter_mut().find(|p| p.product_id == product_id)
    }

    fn touch(&mut self) {
        self.updated_at_utc = Some(Utc::now());
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    pub id: i64,
    pub cart_id: String,
    pub total_amount: i64,
    pub products: Vec<CartProductDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProductDto {
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub total_price: i64,
    pub picture_url: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub quantity: i32,
}
