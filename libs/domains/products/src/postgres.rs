use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ExprTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionError, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{product, product_option},
    error::{ProductError, ProductResult},
    models::{
        CreateProduct, CreateProductOption, Product, ProductFilter, ProductOption, UpdateProduct,
        UpdateProductOption,
    },
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: product::ActiveModel = input.into();

        let model = self.base.insert(active_model).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mut query = product::Entity::find();

        // Case-insensitive substring match on name
        if let Some(name) = filter.name {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(product::Column::Name)))
                    .like(format!("%{}%", name.to_lowercase())),
            );
        }

        // Apply pagination and ordering
        query = query
            .order_by_desc(product::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query.all(self.base.db()).await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        // Fetch existing product
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        // Convert to domain model and apply the full-record update
        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model = product::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            delivery_price: Set(product.delivery_price),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        };

        let updated_model = self.base.update(active_model).await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        // Delete options and the product atomically; the schema-level
        // ON DELETE CASCADE is a backstop for out-of-band deletes.
        let rows_affected = self
            .base
            .db()
            .transaction::<_, u64, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    product_option::Entity::delete_many()
                        .filter(product_option::Column::ProductId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = product::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) => ProductError::Database(e),
                TransactionError::Transaction(e) => ProductError::Database(e),
            })?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_options(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        let models = product_option::Entity::find()
            .filter(product_option::Column::ProductId.eq(product_id))
            .order_by_asc(product_option::Column::CreatedAt)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn get_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<Option<ProductOption>> {
        let model = product_option::Entity::find_by_id(option_id)
            .filter(product_option::Column::ProductId.eq(product_id))
            .one(self.base.db())
            .await?;

        Ok(model.map(|m| m.into()))
    }

    async fn create_option(
        &self,
        product_id: Uuid,
        input: CreateProductOption,
    ) -> ProductResult<ProductOption> {
        let active_model: product_option::ActiveModel = (product_id, input).into();

        let model = active_model.insert(self.base.db()).await?;

        tracing::info!(product_id = %product_id, option_id = %model.id, "Created product option");
        Ok(model.into())
    }

    async fn update_option(
        &self,
        product_id: Uuid,
        option_id: Uuid,
        input: UpdateProductOption,
    ) -> ProductResult<ProductOption> {
        let model = product_option::Entity::find_by_id(option_id)
            .filter(product_option::Column::ProductId.eq(product_id))
            .one(self.base.db())
            .await?
            .ok_or(ProductError::OptionNotFound(option_id))?;

        let mut option: ProductOption = model.into();
        option.apply_update(input);

        let active_model = product_option::ActiveModel {
            id: Set(option.id),
            product_id: Set(option.product_id),
            name: Set(option.name.clone()),
            description: Set(option.description.clone()),
            created_at: Set(option.created_at.into()),
            updated_at: Set(option.updated_at.into()),
        };

        let updated_model = active_model.update(self.base.db()).await?;

        tracing::info!(product_id = %product_id, option_id = %option_id, "Updated product option");
        Ok(updated_model.into())
    }

    async fn delete_option(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<bool> {
        let result = product_option::Entity::delete_many()
            .filter(product_option::Column::Id.eq(option_id))
            .filter(product_option::Column::ProductId.eq(product_id))
            .exec(self.base.db())
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %product_id, option_id = %option_id, "Deleted product option");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
