use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> ProductResult<Option<Product>>;

    /// Insert a product; the store assigns the id
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// At most `limit` products after skipping `offset`, ordered by id ascending
    async fn find_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Overwrite stock; `NotFound` if the id does not exist
    async fn update_stock(&self, id: i32, input: UpdateProduct) -> ProductResult<()>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    products: BTreeMap<i32, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_token(&self, token: &str) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store
            .products
            .values()
            .find(|p| p.product_token == token)
            .cloned())
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        if store
            .products
            .values()
            .any(|p| p.product_token == input.product_token)
        {
            return Err(ProductError::DuplicateToken(input.product_token));
        }

        store.next_id += 1;
        let product = Product {
            id: store.next_id,
            product_token: input.product_token,
            name: input.name,
            price: input.price,
            stock: input.stock,
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn find_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(store
            .products
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn update_stock(&self, id: i32, input: UpdateProduct) -> ProductResult<()> {
        let mut store = self.store.write().await;
        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.stock = input.stock;

        tracing::info!(product_id = id, stock = input.stock, "Updated product stock");
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.products.remove(&id).is_some();

        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(token: &str) -> CreateProduct {
        CreateProduct {
            product_token: token.to_string(),
            name: format!("name-{}", token),
            price: 9.5,
            stock: 4,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let repo = InMemoryProductRepository::new();
        let a = repo.insert(input("a")).await.unwrap();
        let b = repo.insert(input("b")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.find_by_token("b").await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn test_duplicate_token_is_rejected() {
        let repo = InMemoryProductRepository::new();
        repo.insert(input("same")).await.unwrap();

        let err = repo.insert(input("same")).await.unwrap_err();
        assert!(matches!(err, ProductError::DuplicateToken(t) if t == "same"));
        assert_eq!(repo.find_page(10, 0).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_page_windows() {
        let repo = InMemoryProductRepository::new();
        for i in 0..25 {
            repo.insert(input(&format!("t{}", i))).await.unwrap();
        }

        let ids = |page: Vec<Product>| page.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(repo.find_page(10, 0).await.unwrap()), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(repo.find_page(10, 20).await.unwrap()), (21..=25).collect::<Vec<_>>());
        assert!(repo.find_page(10, 30).await.unwrap().is_empty());
        assert!(repo.find_page(u64::MAX, u64::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryProductRepository::new();
        let p = repo.insert(input("x")).await.unwrap();

        repo.update_stock(p.id, UpdateProduct { stock: 0 }).await.unwrap();
        assert_eq!(repo.find_by_id(p.id).await.unwrap().unwrap().stock, 0);

        assert!(matches!(
            repo.update_stock(99, UpdateProduct { stock: 1 }).await,
            Err(ProductError::NotFound(99))
        ));

        assert!(repo.delete_by_id(p.id).await.unwrap());
        assert!(!repo.delete_by_id(p.id).await.unwrap());
        assert!(repo.find_by_id(p.id).await.unwrap().is_none());
    }
}
