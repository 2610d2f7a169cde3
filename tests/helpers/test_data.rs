// Test Data Factory
//
// A small catalog with known brands, types and prices, plus account payloads.

use serde_json::{json, Value};
use uuid::Uuid;

use storefront::catalog::NewProduct;

pub const TEST_PASSWORD: &str = "Passw0rdTest";

pub struct TestDataFactory;

impl TestDataFactory {
    /// Six products: three NetCore, two boards, one grocery item
    pub fn products() -> Vec<NewProduct> {
        vec![
            NewProduct::new("Blue Hat", "NetCore", "Hats", "Apparel", "B2C", 1500, "/images/products/hat-core1.png"),
            NewProduct::new("Angular Board", "Angular", "Boards", "Equipment", "B2C", 20000, "/images/products/sb-ang1.png")
                .tags(&["Fast"]),
            NewProduct::new("React Board", "React", "Boards", "Equipment", "B2C", 18000, "/images/products/sb-react1.png"),
            NewProduct::new("Core Gloves", "NetCore", "Gloves", "Apparel", "B2C", 1800, "/images/products/glove-code1.png"),
            NewProduct::new("Green Tea", "Leafy", "Tea", "Grocery", "Grocery", 500, "/images/products/tea1.png"),
            NewProduct::new("100% Cotton Hat", "NetCore", "Hats", "Apparel", "B2C", 2500, "/images/products/hat-core2.png"),
        ]
    }

    /// Email unique to one test run
    pub fn random_email() -> String {
        format!("user-{}@test.com", Uuid::new_v4().simple())
    }

    pub fn register_payload(email: &str) -> Value {
        json!({
            "email": email,
            "password": TEST_PASSWORD,
        })
    }

    pub fn address_payload() -> Value {
        json!({
            "fullName": "Test User",
            "line1": "1 Test Street",
            "city": "Albany",
            "state": "NY",
            "postalCode": "12207",
            "phoneNumber": "555-123-4567"
        })
    }
}
