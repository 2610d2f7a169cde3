use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::cart::models::Cart;
use crate::modules::cart::repositories::CartRepository;
use crate::modules::catalog::repositories::ProductRepository;

/// Outcome of adding to a cart
#[derive(Debug, Clone)]
pub struct CartUpdate {
    pub cart: Cart,
    /// True when the cart did not exist before this request
    pub created: bool,
}

/// Cart business logic
pub struct CartService {
    cart_repo: Arc<dyn CartRepository>,
    product_repo: Arc<dyn ProductRepository>,
}

impl CartService {
    pub fn new(cart_repo: Arc<dyn CartRepository>, product_repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            cart_repo,
            product_repo,
        }
    }

    /// Load the cart behind a cookie value; blank or unknown ids yield `None`
    pub async fn get_cart(&self, cart_id: Option<&str>) -> Result<Option<Cart>> {
        match non_blank(cart_id) {
            Some(cart_id) => self.cart_repo.find_by_cart_id(cart_id).await,
            None => Ok(None),
        }
    }

    /// Add units of a product, creating the cart when needed
    pub async fn add_item(
        &self,
        cart_id: Option<&str>,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartUpdate> {
        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than zero."));
        }

        let (mut cart, created) = match self.get_cart(cart_id).await? {
            Some(cart) => (cart, false),
            None => (Cart::new(), true),
        };

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::validation("Product not found."))?;

        cart.add_product(product, quantity)?;
        let cart = self.cart_repo.save(&cart).await?;

        tracing::info!(
            cart_id = %cart.cart_id,
            product_id = product_id,
            quantity = quantity,
            created = created,
            "Product added to cart"
        );

        Ok(CartUpdate { cart, created })
    }

    /// Remove units of a product; `None` when there is no cart
    pub async fn remove_item(
        &self,
        cart_id: Option<&str>,
        product_id: i64,
        quantity: Option<i32>,
    ) -> Result<Option<Cart>> {
        let Some(mut cart) = self.get_cart(cart_id).await? else {
            return Ok(None);
        };

        cart.remove_product(product_id, quantity);
        let cart = self.cart_repo.save(&cart).await?;

        tracing::info!(
            cart_id = %cart.cart_id,
            product_id = product_id,
            quantity = ?quantity,
            "Product removed from cart"
        );

        Ok(Some(cart))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
