mod cart;

pub use cart::{Cart, CartDto, CartProduct, CartProductDto, CART_STATUS_ACTIVE};
