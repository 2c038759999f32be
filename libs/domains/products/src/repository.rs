use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NameMatch, Product, ProductInput};

/// Repository trait for Product persistence
///
/// Every list comes back ordered by ascending id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Products whose price is strictly greater than `limit`
    async fn find_by_price_greater_than(&self, limit: i32) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `fragment`
    async fn find_by_name_like(&self, fragment: &str) -> ProductResult<Vec<Product>>;

    /// Insert or overwrite.
    ///
    /// An input without an id, or with an id that matches no row, is inserted
    /// under a storage-assigned id. `None` means the store reported nothing
    /// written.
    async fn save(&self, input: ProductInput) -> ProductResult<Option<Product>>;

    /// Delete a product by ID; `false` when there was nothing to delete
    async fn delete_by_id(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug)]
struct Store {
    rows: BTreeMap<i32, Product>,
    next_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
    name_match: NameMatch,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::with_name_match(NameMatch::default())
    }

    pub fn with_name_match(name_match: NameMatch) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
            name_match,
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn find_by_price_greater_than(&self, limit: i32) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|p| p.price > limit)
            .cloned()
            .collect())
    }

    async fn find_by_name_like(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|p| self.name_match.matches(&p.name, fragment))
            .cloned()
            .collect())
    }

    async fn save(&self, input: ProductInput) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;

        let target = input.id.filter(|id| store.rows.contains_key(id));

        // Same rule as the UNIQUE constraint: exact, case-sensitive
        let name_taken = store
            .rows
            .values()
            .any(|p| p.name == input.name && Some(p.id) != target);
        if name_taken {
            return Err(ProductError::DuplicateName(input.name));
        }

        let id = match target {
            Some(id) => id,
            None => {
                let id = store.next_id;
                store.next_id += 1;
                id
            }
        };

        let product = Product {
            id,
            name: input.name,
            price: input.price,
            buying_price: input.buying_price,
        };
        store.rows.insert(id, product.clone());

        tracing::debug!(product_id = id, "Saved product");
        Ok(Some(product))
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.rows.remove(&id).is_some())
    }
}
