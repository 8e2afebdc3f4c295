//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::{ProductRecord, ProductUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_PRODUCTS_BY_CATEGORY_SQL: &str = include_str!("sql/list_products_by_category.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        pool: &PgPool,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn list_products_by_category(
        &self,
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_BY_CATEGORY_SQL)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        pool: &PgPool,
        query: &str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(query)
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        pool: &PgPool,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        pool: &PgPool,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(product.category)
            .bind(product.stock)
            .bind(product.image_url)
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        pool: &PgPool,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let replace_image_url = update.image_url.is_some();

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.price)
            .bind(update.category)
            .bind(update.stock)
            .bind(replace_image_url)
            .bind(update.image_url.flatten())
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        pool: &PgPool,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            stock: row.try_get("stock")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
