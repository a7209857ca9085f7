use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::pagination::Pagination;
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product; an already-used token fails with `DuplicateToken`
    /// without touching the store.
    #[instrument(skip(self, input), fields(product_token = %input.product_token))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if self
            .repository
            .find_by_token(&input.product_token)
            .await?
            .is_some()
        {
            return Err(ProductError::DuplicateToken(input.product_token));
        }

        // the unique index still catches concurrent creates
        self.repository.insert(input).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, pagination: Pagination) -> ProductResult<Vec<Product>> {
        self.repository
            .find_page(pagination.limit, pagination.offset())
            .await
    }

    /// Absent ids are `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<()> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.ensure_exists(id).await?;
        self.repository.update_stock(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        self.ensure_exists(id).await?;

        if !self.repository.delete_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    async fn ensure_exists(&self, id: i32) -> ProductResult<()> {
        match self.repository.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::NotFound(id)),
        }
    }
}
