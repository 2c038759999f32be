use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
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

    /// List every product, ordered by id
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Get a product by ID
    #[instrument(skip(self), fields(product_id = id))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn products_priced_above(&self, limit: i32) -> ProductResult<Vec<Product>> {
        self.repository.find_by_price_greater_than(limit).await
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_name_like(fragment).await
    }

    /// Create a product; a client-supplied id is discarded.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, mut input: ProductInput) -> ProductResult<Option<Product>> {
        input.validate()?;
        input.id = None;

        self.repository.save(input).await
    }

    /// Overwrite the product named by `input.id`, inserting when there is none.
    #[instrument(skip(self, input), fields(product_id = ?input.id))]
    pub async fn save_product(&self, input: ProductInput) -> ProductResult<Option<Product>> {
        input.validate()?;

        self.repository.save(input).await
    }

    /// Delete a product; `false` when it did not exist
    #[instrument(skip(self), fields(product_id = id))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<bool> {
        self.repository.delete_by_id(id).await
    }
}
