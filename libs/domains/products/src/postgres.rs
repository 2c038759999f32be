use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NameMatch, Product, ProductInput},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
    name_match: NameMatch,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection, name_match: NameMatch) -> Self {
        Self { db, name_match }
    }

    async fn insert(&self, input: ProductInput) -> ProductResult<Option<Product>> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ProductError::from_db(e, &name))?;

        tracing::info!(product_id = model.id, "Inserted product");
        Ok(Some(model.into()))
    }

    async fn overwrite(&self, id: i32, input: ProductInput) -> ProductResult<Option<Product>> {
        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(input.name.clone()),
            price: Set(input.price),
            buying_price: Set(input.buying_price),
        };

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = model.id, "Updated product");
                Ok(Some(model.into()))
            }
            // Row vanished between the lookup and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ProductError::from_db(e, &input.name)),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_price_greater_than(&self, limit: i32) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Price.gt(limit))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_name_like(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let query = entity::Entity::find();
        let query = match self.name_match {
            NameMatch::CaseSensitive => query.filter(entity::Column::Name.contains(fragment)),
            NameMatch::CaseInsensitive => query.filter(
                Expr::col((entity::Entity, entity::Column::Name)).ilike(format!("%{}%", fragment)),
            ),
        };

        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, input: ProductInput) -> ProductResult<Option<Product>> {
        let existing = match input.id {
            Some(id) => entity::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };

        match existing {
            Some(model) => self.overwrite(model.id, input).await,
            None => self.insert(input).await,
        }
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    fn model(id: i32, name: &str, price: i32) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            price,
            buying_price: 0,
        }
    }

    #[tokio::test]
    async fn test_find_by_price_greater_than_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3, "Monitor", 101), model(4, "Laptop", 200)]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone(), NameMatch::CaseSensitive);

        let found = repo.find_by_price_greater_than(100).await.unwrap();
        assert_eq!(found.iter().map(|p| p.price).collect::<Vec<_>>(), vec![101, 200]);

        assert_eq!(
            db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "products"."id", "products"."name", "products"."price", "products"."buying_price" FROM "products" WHERE "products"."price" > $1 ORDER BY "products"."id" ASC"#,
                [100i32.into()],
            )]
        );
    }

    #[tokio::test]
    async fn test_case_insensitive_search_uses_ilike() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Smartphone", 500)]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone(), NameMatch::CaseInsensitive);

        let found = repo.find_by_name_like("PHONE").await.unwrap();
        assert_eq!(found.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.as_str().contains("ILIKE"), "unexpected statement: {}", log);
    }

    #[tokio::test]
    async fn test_case_sensitive_search_uses_like() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db.clone(), NameMatch::CaseSensitive);

        assert!(repo.find_by_name_like("phone").await.unwrap().is_empty());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.as_str().contains("LIKE"));
        assert!(!log.as_str().contains("ILIKE"));
    }

    #[tokio::test]
    async fn test_search_passes_wildcards_through() {
        for name_match in [NameMatch::CaseSensitive, NameMatch::CaseInsensitive] {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(2, "Tablet", 300)]])
                .into_connection();
            let repo = PgProductRepository::new(db.clone(), name_match);

            let found = repo.find_by_name_like("Tab_et").await.unwrap();
            assert_eq!(found.len(), 1);

            // `_` reaches the server unescaped so LIKE treats it as a wildcard
            let log = format!("{:?}", db.into_transaction_log());
            assert!(log.as_str().contains("%Tab_et%"), "unexpected statement: {}", log);
        }
    }

    #[tokio::test]
    async fn test_save_without_id_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Laptop", 1200)]])
            .into_connection();
        let repo = PgProductRepository::new(db, NameMatch::CaseSensitive);

        let saved = repo.save(ProductInput::new("Laptop", 1200)).await.unwrap();
        assert_eq!(saved, Some(Product::from(model(1, "Laptop", 1200))));
    }

    #[tokio::test]
    async fn test_save_with_existing_id_updates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![model(1, "Laptop", 1200)],
                vec![model(1, "Laptop Pro", 1500)],
            ])
            .into_connection();
        let repo = PgProductRepository::new(db, NameMatch::CaseSensitive);

        let saved = repo
            .save(ProductInput::new("Laptop Pro", 1500).with_id(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(saved.price, 1500);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new(), vec![model(2, "Tablet", 300)]])
            .into_connection();
        let repo = PgProductRepository::new(db, NameMatch::CaseSensitive);

        let saved = repo
            .save(ProductInput::new("Tablet", 300).with_id(99))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.id, 2);
    }

    #[tokio::test]
    async fn test_save_reports_nothing_written() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Laptop", 1200)], Vec::new()])
            .into_connection();
        let repo = PgProductRepository::new(db, NameMatch::CaseSensitive);

        let saved = repo
            .save(ProductInput::new("Laptop", 1300).with_id(1))
            .await
            .unwrap();
        assert_eq!(saved, None);
    }

    #[tokio::test]
    async fn test_query_error_maps_to_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgProductRepository::new(db, NameMatch::CaseSensitive);

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, ProductError::Database(_)));
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgProductRepository::new(db, NameMatch::CaseSensitive);

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
    }
}
