//! Repository for the `notes` table.

use notty_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::StoreError;
use crate::models::note::{Note, NoteFilter, NoteInput, PatchNote};

/// Column list for notes queries.
const COLUMNS: &str = "id, title, content, created_at, owner_id, category_id, subcategory_id";

/// Provides CRUD operations for notes.
///
/// `created_at` is set by the database default on insert and no update
/// statement here ever writes it; the same holds for `owner_id`.
pub struct NoteRepo;

impl NoteRepo {
    /// Create a note owned by `owner_id`.
    ///
    /// Either link may be absent. A present link must name a row owned by
    /// the same user, otherwise [`StoreError::Integrity`] is returned. The
    /// subcategory is not required to sit under the category.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &NoteInput,
    ) -> Result<Note, StoreError> {
        let mut tx = pool.begin().await?;

        lock_links(&mut tx, owner_id, input.category_id, input.subcategory_id).await?;

        let query = format!(
            "INSERT INTO notes (title, content, owner_id, category_id, subcategory_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(owner_id)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(note)
    }

    /// List the owner's notes, newest first, optionally filtered by link.
    pub async fn list(
        pool: &PgPool,
        owner_id: DbId,
        filter: NoteFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE owner_id = $1
               AND ($2::BIGINT IS NULL OR category_id = $2)
               AND ($3::BIGINT IS NULL OR subcategory_id = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(owner_id)
            .bind(filter.category_id)
            .bind(filter.subcategory_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find one of the owner's notes by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every editable field of a note (`PUT` semantics).
    ///
    /// Links omitted from `input` are cleared.
    pub async fn replace(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &NoteInput,
    ) -> Result<Note, StoreError> {
        let mut tx = pool.begin().await?;

        lock_note(&mut tx, owner_id, id).await?;
        lock_links(&mut tx, owner_id, input.category_id, input.subcategory_id).await?;

        let query = format!(
            "UPDATE notes SET
                title = $3,
                content = $4,
                category_id = $5,
                subcategory_id = $6
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound { entity: "Note", id })?;

        tx.commit().await?;
        Ok(note)
    }

    /// Apply a partial update (`PATCH` semantics). Only fields present in
    /// `input` change.
    pub async fn patch(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &PatchNote,
    ) -> Result<Note, StoreError> {
        let mut tx = pool.begin().await?;

        lock_note(&mut tx, owner_id, id).await?;
        lock_links(
            &mut tx,
            owner_id,
            input.category_id.flatten(),
            input.subcategory_id.flatten(),
        )
        .await?;

        let query = format!(
            "UPDATE notes SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                category_id = CASE WHEN $5 THEN $6 ELSE category_id END,
                subcategory_id = CASE WHEN $7 THEN $8 ELSE subcategory_id END
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(input.subcategory_id.is_some())
            .bind(input.subcategory_id.flatten())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound { entity: "Note", id })?;

        tx.commit().await?;
        Ok(note)
    }

    /// Delete one of the owner's notes.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: "Note", id });
        }
        Ok(())
    }
}

/// Lock one of the owner's notes for the rest of the transaction.
///
/// Must run before [`lock_links`]: an unknown note is `NotFound` whatever its
/// links say.
async fn lock_note(conn: &mut PgConnection, owner_id: DbId, id: DbId) -> Result<(), StoreError> {
    sqlx::query_scalar::<_, DbId>(
        "SELECT id FROM notes WHERE id = $1 AND owner_id = $2 FOR UPDATE",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StoreError::NotFound { entity: "Note", id })?;
    Ok(())
}

/// Check that each present link names a row owned by `owner_id`, holding a
/// key-share lock on it until the surrounding transaction ends so it cannot
/// be deleted underneath the write.
async fn lock_links(
    conn: &mut PgConnection,
    owner_id: DbId,
    category_id: Option<DbId>,
    subcategory_id: Option<DbId>,
) -> Result<(), StoreError> {
    if let Some(category_id) = category_id {
        let found = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM categories WHERE id = $1 AND owner_id = $2 FOR KEY SHARE",
        )
        .bind(category_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;
        if found.is_none() {
            return Err(StoreError::Integrity(format!("Category {category_id} does not exist")));
        }
    }

    if let Some(subcategory_id) = subcategory_id {
        let found = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM subcategories WHERE id = $1 AND owner_id = $2 FOR KEY SHARE",
        )
        .bind(subcategory_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;
        if found.is_none() {
            return Err(StoreError::Integrity(format!(
                "Subcategory {subcategory_id} does not exist"
            )));
        }
    }

    Ok(())
}
