//! Demo catalog loaded on startup.
//!
//! Products are upserted by name, so re-running the seed refreshes pricing,
//! classification and promotion fields without duplicating rows.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::catalog::models::NewProduct;
use crate::modules::catalog::repositories::ProductRepository;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetuer adipiscing elit. Maecenas porttitor \
    congue massa. Fusce posuere, magna sed pulvinar ultricies, purus lectus malesuada libero, \
    sit amet commodo magna eros quis urna.";

const FUSCE: &str = "Fusce posuere, magna sed pulvinar ultricies, purus lectus malesuada libero, \
    sit amet commodo magna eros quis urna.";

const IMAGE_HOST: &str = "https://neowaslstorage.blob.core.windows.net/images";

pub fn demo_products() -> Vec<NewProduct> {
    let now = Utc::now();

    vec![
        NewProduct::new("Angular Speedster Board 2000", "Angular", "Boards", "Equipment", "B2C", 20000, "/images/products/sb-ang1.png")
            .description(LOREM)
            .tags(&["Fast", "Angular", "New"])
            .featured(),
        // 2% off for the first month
        NewProduct::new("Green Angular Board 3000", "Angular", "Boards", "Equipment", "B2C", 15000, "/images/products/sb-ang2.png")
            .description("Nunc viverra imperdiet enim. Fusce est. Vivamus a tellus.")
            .discount(Decimal::new(30000, 2), now, now + Duration::days(30)),
        NewProduct::new("Core Board Speed Rush 3", "NetCore", "Boards", "Equipment", "B2C", 18000, "/images/products/sb-core1.png")
            .description("Suspendisse dui purus, scelerisque at, vulputate vitae, pretium mattis, nunc. Mauris eget neque at sem venenatis eleifend. Ut nonummy.")
            .tags(&["Core", "Speed"]),
        NewProduct::new("Net Core Super Board", "NetCore", "Boards", "Equipment", "B2C", 30000, "/images/products/sb-core2.png")
            .description("Pellentesque habitant morbi tristique senectus et netus et malesuada fames ac turpis egestas. Proin pharetra nonummy pede. Mauris et orci.")
            .featured(),
        NewProduct::new("React Board Super Whizzy Fast", "React", "Boards", "Equipment", "B2C", 25000, "/images/products/sb-react1.png")
            .description(LOREM)
            .tags(&["React", "Top Seller"]),
        NewProduct::new("Typescript Entry Board", "TypeScript", "Boards", "Beverages", "B2C", 12000, "/images/products/sb-ts1.png")
            .description(LOREM),
        NewProduct::new("Core Blue Hat", "NetCore", "Hats", "Beverages", "Merchandise", 1000, "/images/products/hat-core1.png")
            .description(FUSCE),
        NewProduct::new("Green React Woolen Hat", "React", "Hats", "Beverages", "Merchandise", 8000, "/images/products/hat-react1.png")
            .description(FUSCE)
            .tags(&["Winter", "Wool"]),
        NewProduct::new("Purple React Woolen Hat", "React", "Hats", "Beverages", "Merchandise", 1500, "/images/products/hat-react2.png")
            .description(FUSCE),
        NewProduct::new("Blue Code Gloves", "VS Code", "Gloves", "Beverages", "Merchandise", 1800, "/images/products/glove-code1.png")
            .description(FUSCE),
        NewProduct::new("Green Code Gloves", "VS Code", "Gloves", "Beverages", "Merchandise", 1500, "/images/products/glove-code2.png")
            .description(FUSCE),
        NewProduct::new("Purple React Gloves", "React", "Gloves", "Beverages", "Merchandise", 1600, "/images/products/glove-react1.png")
            .description(FUSCE),
        NewProduct::new("Green React Gloves", "React", "Gloves", "Beverages", "Merchandise", 1400, "/images/products/glove-react2.png")
            .description(FUSCE),
        NewProduct::new("Redis Red Boots", "Redis", "Boots", "Beverages", "Merchandise", 25000, "/images/products/boot-redis1.png")
            .description(FUSCE)
            .tags(&["Waterproof", "Red"]),
        NewProduct::new("Core Red Boots", "NetCore", "Boots", "Beverages", "Merchandise", 18999, "/images/products/boot-core2.png")
            .description(FUSCE),
        NewProduct::new("Core Purple Boots", "NetCore", "Boots", "Wraps", "Smoke", 19999, "/images/products/boot-core1.png")
            .description(FUSCE),
        NewProduct::new("Angular Purple Boots", "Angular", "Boots", "Wraps", "Smoke Gear", 15000, "/images/products/boot-ang2.png")
            .description(FUSCE),
        NewProduct::new("Angular Blue Boots", "Angular", "Boots", "Hookah", "Smoke Gear", 18000, "/images/products/boot-ang1.png")
            .description(FUSCE),
        NewProduct::new("ALOEVINE WATERMELON 16.9OZ 20CT", "AloeVine", "Beverages", "Beverages", "Grocery", 1999, &format!("{IMAGE_HOST}/beverages/ALOEDRINKWATERMELON16point9OZ20CT.png")),
        NewProduct::new("ALOEVINE KIWE 16.9OZ 20CT", "AloeVine", "Beverages", "Beverages", "Grocery", 1999, &format!("{IMAGE_HOST}/beverages/ALOEVINE KIWE 16.9OZ 20CT.jpg")),
        NewProduct::new("AIRHEADS BITES BOUCHEES ORIGINAL FRUIT 18CT", "Airheads", "Candy", "Beverages", "Grocery", 1599, &format!("{IMAGE_HOST}/candy/AIRHEADSBITESBOUCHEESORIGINALFRUIT18CT.jpg")),
        NewProduct::new("AIRHEADS XTREME RAINBOW 2OZ 18CT", "Airheads", "Candy", "Beverages", "Grocery", 2199, &format!("{IMAGE_HOST}/candy/AIRHEADSXTREMERAINBOW2oz18CT.jpg")),
        NewProduct::new("CHEEZ-IT ORIGINAL 45 CT", "Cheez-It", "Snacks", "Beverages", "Grocery", 1499, &format!("{IMAGE_HOST}/snack/CHEEZITOriginal45CT.jpg")),
        NewProduct::new("OVEN DELIGHTS FRENCH VANILLA DANISH 6CT", "Oven Delights", "Danish", "Beverages", "Grocery", 650, &format!("{IMAGE_HOST}/cakes/OVENDELIGHTSFRENCHVANILLADANISH6CT.jpg")),
        NewProduct::new("5 GUM SPEARMINT RAIN 10CT", "5 Gum", "Gum", "Gum", "Grocery", 1499, &format!("{IMAGE_HOST}/candy/5GUMSPEARMINTRAIN10CT.jpg")),
    ]
}

/// Upsert the demo catalog, returning the number of products written
pub async fn seed_products(repo: &dyn ProductRepository) -> Result<usize> {
    let products = demo_products();

    for product in &products {
        repo.upsert_by_name(product).await?;
    }

    tracing::info!(count = products.len(), "Catalog seeded");
    Ok(products.len())
}
