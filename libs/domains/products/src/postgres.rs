use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL bigint bound for LIMIT/OFFSET
const MAX_ROWS: u64 = i64::MAX as u64;

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// A lost race on the unique token index surfaces as a duplicate, not a 500.
fn map_insert_error(err: DbErr, token: &str) -> ProductError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ProductError::DuplicateToken(token.to_string())
        }
        _ => ProductError::Database(err),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_token(&self, token: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ProductToken.eq(token))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let token = input.product_token.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &token))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn find_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .limit(limit.min(MAX_ROWS))
            .offset(offset.min(MAX_ROWS))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update_stock(&self, id: i32, input: UpdateProduct) -> ProductResult<()> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Stock, Expr::value(input.stock))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = id, stock = input.stock, "Updated product stock");
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        let removed = result.rows_affected > 0;

        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}
