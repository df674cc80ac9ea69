//! Repository for the `categories` table.

use notty_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::category::{Category, CategoryDeletion, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, owner_id";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Create a new category owned by `owner_id`, returning the created row.
    ///
    /// Duplicate names are allowed. Fails with [`StoreError::Integrity`] if
    /// the owner does not exist.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCategory,
    ) -> Result<Category, StoreError> {
        let query = format!(
            "INSERT INTO categories (name, owner_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(category)
    }

    /// List the owner's categories, ordered by name then id.
    pub async fn list(pool: &PgPool, owner_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE owner_id = $1 ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the owner's categories by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a category, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $3
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category in one transaction.
    ///
    /// Its subcategories are deleted, notes pointing at those subcategories
    /// lose their `subcategory_id`, and notes pointing at the category lose
    /// their `category_id`. Notes themselves always survive.
    pub async fn delete(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<CategoryDeletion, StoreError> {
        let mut tx = pool.begin().await?;

        // Row lock: concurrent writers that reference this category wait for us.
        let locked = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM categories WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Err(StoreError::NotFound {
                entity: "Category",
                id,
            });
        }

        let notes_detached_from_subcategory = sqlx::query(
            "UPDATE notes SET subcategory_id = NULL
             WHERE subcategory_id IN (
                 SELECT id FROM subcategories WHERE parent_category_id = $1
             )",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let notes_detached_from_category =
            sqlx::query("UPDATE notes SET category_id = NULL WHERE category_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        let subcategories_deleted =
            sqlx::query("DELETE FROM subcategories WHERE parent_category_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let summary = CategoryDeletion {
            subcategories_deleted,
            notes_detached_from_category,
            notes_detached_from_subcategory,
        };
        tracing::debug!(category_id = id, ?summary, "Category deleted");
        Ok(summary)
    }
}
