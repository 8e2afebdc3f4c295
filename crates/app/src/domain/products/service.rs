//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    /// Feed the outcome into the connection status before handing it back.
    async fn observed<T>(
        &self,
        outcome: Result<T, sqlx::Error>,
    ) -> Result<T, ProductsServiceError> {
        self.db.observe(&outcome).await;

        Ok(outcome?)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        self.observed(self.repository.list_products(self.db.pool()).await)
            .await
    }

    async fn list_products_by_category(
        &self,
        category: String,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let outcome = self
            .repository
            .list_products_by_category(self.db.pool(), &category)
            .await;

        self.observed(outcome).await
    }

    async fn search_products(
        &self,
        query: String,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let outcome = self
            .repository
            .search_products(self.db.pool(), &query)
            .await;

        self.observed(outcome).await
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.observed(self.repository.get_product(self.db.pool(), product).await)
            .await
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let outcome = self
            .repository
            .create_product(self.db.pool(), product)
            .await;

        self.observed(outcome).await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let outcome = self
            .repository
            .update_product(self.db.pool(), product, update)
            .await;

        self.observed(outcome).await
    }

    async fn delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let outcome = self
            .repository
            .delete_product(self.db.pool(), product)
            .await;

        self.observed(outcome).await
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves products whose category matches exactly, newest first.
    async fn list_products_by_category(
        &self,
        category: String,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves products whose name contains `query`, ignoring case, newest first.
    async fn search_products(
        &self,
        query: String,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Overwrites the provided fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Permanently deletes a product, returning its last state.
    async fn delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
