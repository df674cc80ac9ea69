//! Repository for the `subcategories` table.

use notty_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::subcategory::{
    CreateSubcategory, Subcategory, SubcategoryDeletion, UpdateSubcategory,
};

/// Column list for subcategories queries.
const COLUMNS: &str = "id, name, owner_id, parent_category_id";

/// Provides CRUD operations for subcategories.
pub struct SubcategoryRepo;

impl SubcategoryRepo {
    /// Create a subcategory under one of the owner's categories.
    ///
    /// Fails with [`StoreError::Integrity`] when the parent category does not
    /// exist or belongs to another user.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateSubcategory,
    ) -> Result<Subcategory, StoreError> {
        // The parent lookup and the insert are one statement, so a parent
        // deleted in between surfaces as a foreign-key violation instead.
        let query = format!(
            "INSERT INTO subcategories (name, owner_id, parent_category_id)
             SELECT $1, $2, c.id FROM categories c
             WHERE c.id = $3 AND c.owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(&input.name)
            .bind(owner_id)
            .bind(input.parent_category_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                StoreError::Integrity(format!(
                    "Parent category {} does not exist",
                    input.parent_category_id
                ))
            })
    }

    /// List the owner's subcategories, optionally only those under one category.
    pub async fn list(
        pool: &PgPool,
        owner_id: DbId,
        parent_category_id: Option<DbId>,
    ) -> Result<Vec<Subcategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subcategories
             WHERE owner_id = $1
               AND ($2::BIGINT IS NULL OR parent_category_id = $2)
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(owner_id)
            .bind(parent_category_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the owner's subcategories by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Subcategory>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM subcategories WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a subcategory. The parent category cannot be changed.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateSubcategory,
    ) -> Result<Option<Subcategory>, sqlx::Error> {
        let query = format!(
            "UPDATE subcategories SET name = $3
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subcategory, clearing `subcategory_id` on every note that
    /// pointed at it. The notes' `category_id` is left alone.
    pub async fn delete(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<SubcategoryDeletion, StoreError> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM subcategories WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Err(StoreError::NotFound {
                entity: "Subcategory",
                id,
            });
        }

        let notes_detached =
            sqlx::query("UPDATE notes SET subcategory_id = NULL WHERE subcategory_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(subcategory_id = id, notes_detached, "Subcategory deleted");
        Ok(SubcategoryDeletion { notes_detached })
    }
}
