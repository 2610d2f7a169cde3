/// Property-based tests for cart line arithmetic
///
/// Adds merge into one line per product; removals decrement or drop the
/// line; totals always equal the sum of price × quantity.
use chrono::Utc;
use proptest::prelude::*;

use storefront::cart::Cart;
use storefront::catalog::{NewProduct, Product};

fn product(id: i64, price: i64) -> Product {
    NewProduct::new(
        &format!("Product {}", id),
        "NetCore",
        "Hats",
        "Apparel",
        "B2C",
        price,
        "/images/products/hat.png",
    )
    .into_product(id, Utc::now())
}

proptest! {
    /// Property: repeated adds of one product produce a single line holding the sum
    #[test]
    fn test_adds_merge_into_one_line(quantities in prop::collection::vec(1i32..100, 1..20)) {
        let mut cart = Cart::new();
        for q in &quantities {
            cart.add_product(product(1, 250), *q).unwrap();
        }

        let expected: i32 = quantities.iter().sum();
        prop_assert_eq!(cart.products.len(), 1);
        prop_assert_eq!(cart.quantity_of(1), Some(expected));
        prop_assert_eq!(cart.total_amount(), 250 * expected as i64);
    }

    /// Property: non-positive quantities are rejected and leave the cart untouched
    #[test]
    fn test_non_positive_add_rejected(quantity in i32::MIN..=0) {
        let mut cart = Cart::new();
        prop_assert!(cart.add_product(product(1, 100), quantity).is_err());
        prop_assert!(cart.is_empty());
    }

    /// Property: removal decrements below the line quantity and drops the line otherwise
    #[test]
    fn test_remove_decrements_or_drops(start in 1i32..1000, remove in -10i32..1100) {
        let mut cart = Cart::new();
        cart.add_product(product(7, 10), start).unwrap();
        cart.remove_product(7, Some(remove));

        if remove > 0 && remove < start {
            prop_assert_eq!(cart.quantity_of(7), Some(start - remove));
        } else {
            prop_assert_eq!(cart.quantity_of(7), None);
        }
    }

    /// Property: the cart total is the sum of line totals
    #[test]
    fn test_total_is_sum_of_lines(
        lines in prop::collection::vec((1i64..50, 1i64..100_000, 1i32..20), 1..15)
    ) {
        let mut cart = Cart::new();
        for (id, price, quantity) in &lines {
            cart.add_product(product(*id, *price), *quantity).unwrap();
        }

        let by_lines: i64 = cart.products.iter().map(|l| l.product.price * l.quantity as i64).sum();
        prop_assert_eq!(cart.total_amount(), by_lines);
        prop_assert_eq!(cart.to_dto().total_amount, by_lines);
    }
}

#[test]
fn test_remove_missing_product_is_noop() {
    let mut cart = Cart::new();
    cart.add_product(product(1, 100), 2).unwrap();
    cart.remove_product(99, None);
    assert_eq!(cart.quantity_of(1), Some(2));
}

#[test]
fn test_lines_keep_insertion_order() {
    let mut cart = Cart::new();
    for id in [3, 1, 2, 1] {
        cart.add_product(product(id, 100), 1).unwrap();
    }
    let ids: Vec<i64> = cart.products.iter().map(|l| l.product_id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}
