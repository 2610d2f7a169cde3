use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{PagedList, Result};
use crate::modules::catalog::models::{
    CatalogFilters, FilterCount, NewProduct, Product, ProductQuery, ProductSort,
};

const PRODUCT_COLUMNS: &str = "id, name, category, description, price, picture_url, \
    product_type, brand, quantity_in_stock, business_type, discount_amount, \
    discount_start_utc, discount_end_utc, tags, is_active, is_featured, supplier, \
    supplier_id, sold_quantity, created_at, updated_at";

/// Product column list qualified with a table alias, for joins
pub(crate) fn qualified_product_columns(alias: &str) -> String {
    PRODUCT_COLUMNS
        .split(',')
        .map(|column| format!("{}.{}", alias, column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Facet columns exposed by `filter_counts`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Brand,
    Type,
}

impl Facet {
    fn column(&self) -> &'static str {
        match self {
            Facet::Brand => "brand",
            Facet::Type => "product_type",
        }
    }
}

/// Storage access for catalog products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// One page of products matching the query, plus the total match count
    async fn list(&self, query: &ProductQuery) -> Result<PagedList<Product>>;

    /// Brand and type counts for products in the query's scope
    async fn filter_counts(&self, query: &ProductQuery) -> Result<CatalogFilters>;

    /// Insert a product or refresh the existing row with the same name
    async fn upsert_by_name(&self, product: &NewProduct) -> Result<i64>;
}

/// MySQL-backed product repository
#[derive(Clone)]
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn facet_counts(&self, facet: Facet, query: &ProductQuery) -> Result<Vec<FilterCount>> {
        let mut builder = facet_query(facet, query);
        let counts = builder
            .build_query_as::<FilterCount>()
            .fetch_all(&self.pool)
            .await?;

        Ok(counts)
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = ?",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list(&self, query: &ProductQuery) -> Result<PagedList<Product>> {
        let mut count_builder = count_query(query);
        let total_count: i64 = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut page_builder = page_query(query);
        let items = page_builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            total_count = total_count,
            returned = items.len(),
            page = query.pagination.page_number(),
            "Catalog page loaded"
        );

        Ok(PagedList::new(
            items,
            total_count.max(0) as u64,
            query.pagination,
        ))
    }

    async fn filter_counts(&self, query: &ProductQuery) -> Result<CatalogFilters> {
        let brands = self.facet_counts(Facet::Brand, query).await?;
        let types = self.facet_counts(Facet::Type, query).await?;

        Ok(CatalogFilters { brands, types })
    }

    async fn upsert_by_name(&self, product: &NewProduct) -> Result<i64> {
        // LAST_INSERT_ID(id) makes the existing row's id visible on update
        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, category, description, price, picture_url, product_type, brand,
                quantity_in_stock, business_type, discount_amount, discount_start_utc,
                discount_end_utc, tags, is_active, is_featured
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, TRUE, ?)
            ON DUPLICATE KEY UPDATE
                id = LAST_INSERT_ID(id),
                category = VALUES(category),
                business_type = VALUES(business_type),
                tags = VALUES(tags),
                is_featured = VALUES(is_featured),
                discount_amount = VALUES(discount_amount),
                discount_start_utc = VALUES(discount_start_utc),
                discount_end_utc = VALUES(discount_end_utc),
                price = VALUES(price),
                picture_url = VALUES(picture_url),
                brand = VALUES(brand),
                product_type = VALUES(product_type),
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.picture_url)
        .bind(&product.product_type)
        .bind(&product.brand)
        .bind(product.quantity_in_stock)
        .bind(&product.business_type)
        .bind(product.discount_amount)
        .bind(product.discount_start_utc)
        .bind(product.discount_end_utc)
        .bind(Json(&product.tags))
        .bind(product.is_featured)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }
}

/// Append the WHERE clause for the query's filters.
///
/// Returns `true` when a WHERE clause was written.
fn push_filters(builder: &mut QueryBuilder<'_, MySql>, query: &ProductQuery) -> bool {
    let mut has_where = false;

    if let Some(business_type) = &query.business_type {
        push_conjunction(builder, &mut has_where);
        builder
            .push("LOWER(business_type) = ")
            .push_bind(business_type.clone());
    }

    if let Some(category) = &query.category {
        push_conjunction(builder, &mut has_where);
        builder.push("LOWER(category) = ").push_bind(category.clone());
    }

    if let Some(search) = &query.search {
        push_conjunction(builder, &mut has_where);
        builder
            .push("name LIKE ")
            .push_bind(format!("%{}%", escape_like(search)));
    }

    if !query.brands.is_empty() {
        push_conjunction(builder, &mut has_where);
        builder.push("LOWER(brand) IN (");
        let mut values = builder.separated(", ");
        for brand in &query.brands {
            values.push_bind(brand.clone());
        }
        values.push_unseparated(")");
    }

    if !query.types.is_empty() {
        push_conjunction(builder, &mut has_where);
        builder.push("LOWER(product_type) IN (");
        let mut values = builder.separated(", ");
        for product_type in &query.types {
            values.push_bind(product_type.clone());
        }
        values.push_unseparated(")");
    }

    has_where
}

fn push_conjunction(builder: &mut QueryBuilder<'_, MySql>, has_where: &mut bool) {
    builder.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

fn push_order(builder: &mut QueryBuilder<'_, MySql>, sort: ProductSort) {
    // id breaks ties so pages never overlap
    builder.push(match sort {
        ProductSort::Name => " ORDER BY name ASC, id ASC",
        ProductSort::PriceAsc => " ORDER BY price ASC, id ASC",
        ProductSort::PriceDesc => " ORDER BY price DESC, id ASC",
    });
}

fn count_query(query: &ProductQuery) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filters(&mut builder, query);
    builder
}

fn page_query(query: &ProductQuery) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
    push_filters(&mut builder, query);
    push_order(&mut builder, query.sort);
    builder
        .push(" LIMIT ")
        .push_bind(query.pagination.page_size() as i64)
        .push(" OFFSET ")
        .push_bind(query.pagination.offset() as i64);
    builder
}

fn facet_query(facet: Facet, query: &ProductQuery) -> QueryBuilder<'static, MySql> {
    let column = facet.column();
    let mut builder = QueryBuilder::new(format!(
        "SELECT {column} AS name, COUNT(*) AS count FROM products"
    ));
    let has_where = push_filters(&mut builder, query);
    builder.push(if has_where { " AND " } else { " WHERE " });
    builder.push(format!(
        "{column} IS NOT NULL AND {column} <> '' GROUP BY {column} ORDER BY count DESC, name ASC"
    ));
    builder
}

/// Escape LIKE wildcards so a search term only matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
