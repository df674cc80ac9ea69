//! Database-level tests for the note store: ownership scoping, link
//! validation, and the cascade / nullify rules applied on delete.

use assert_matches::assert_matches;
use sqlx::PgPool;

use notty_core::types::DbId;
use notty_db::error::StoreError;
use notty_db::models::category::{CategoryDeletion, CreateCategory, UpdateCategory};
use notty_db::models::note::{NoteFilter, NoteInput, PatchNote};
use notty_db::models::subcategory::{CreateSubcategory, SubcategoryDeletion};
use notty_db::models::user::CreateUser;
use notty_db::repositories::{CategoryRepo, NoteRepo, SubcategoryRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        email: None,
        password_hash: "not-a-real-hash".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

async fn create_category(pool: &PgPool, owner: DbId, name: &str) -> DbId {
    let input = CreateCategory {
        name: name.to_string(),
    };
    CategoryRepo::create(pool, owner, &input)
        .await
        .expect("category creation should succeed")
        .id
}

async fn create_subcategory(pool: &PgPool, owner: DbId, name: &str, parent: DbId) -> DbId {
    let input = CreateSubcategory {
        name: name.to_string(),
        parent_category_id: parent,
    };
    SubcategoryRepo::create(pool, owner, &input)
        .await
        .expect("subcategory creation should succeed")
        .id
}

fn note_input(title: &str, category_id: Option<DbId>, subcategory_id: Option<DbId>) -> NoteInput {
    NoteInput {
        title: title.to_string(),
        content: format!("content of {title}"),
        category_id,
        subcategory_id,
    }
}

async fn count(pool: &PgPool, sql: &str, owner: DbId) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(owner)
        .fetch_one(pool)
        .await
        .expect("count query should succeed")
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_category_names_are_allowed(pool: PgPool) {
    let owner = create_user(&pool, "dupes").await;
    let a = create_category(&pool, owner, "Work").await;
    let b = create_category(&pool, owner, "Work").await;

    assert_ne!(a, b);
    let listed = CategoryRepo::list(&pool, owner).await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn category_for_missing_owner_is_integrity_error(pool: PgPool) {
    let input = CreateCategory {
        name: "Orphan".to_string(),
    };
    let result = CategoryRepo::create(&pool, 999_999, &input).await;
    assert_matches!(result, Err(StoreError::Integrity(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn subcategory_requires_existing_parent(pool: PgPool) {
    let owner = create_user(&pool, "parentless").await;
    let input = CreateSubcategory {
        name: "Reports".to_string(),
        parent_category_id: 424_242,
    };

    let result = SubcategoryRepo::create(&pool, owner, &input).await;
    assert_matches!(result, Err(StoreError::Integrity(msg)) if msg.contains("424242"));
}

#[sqlx::test(migrations = "./migrations")]
async fn subcategory_under_foreign_category_is_integrity_error(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let alice_work = create_category(&pool, alice, "Work").await;

    let input = CreateSubcategory {
        name: "Sneaky".to_string(),
        parent_category_id: alice_work,
    };
    let result = SubcategoryRepo::create(&pool, bob, &input).await;
    assert_matches!(result, Err(StoreError::Integrity(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn note_without_links_reads_back_absent(pool: PgPool) {
    let owner = create_user(&pool, "plain").await;
    let note = NoteRepo::create(&pool, owner, &note_input("Loose", None, None))
        .await
        .unwrap();

    let fetched = NoteRepo::find_by_id(&pool, owner, note.id)
        .await
        .unwrap()
        .expect("note should exist");
    assert!(fetched.category_id.is_none());
    assert!(fetched.subcategory_id.is_none());
    assert_eq!(fetched.owner_id, owner);
}

#[sqlx::test(migrations = "./migrations")]
async fn note_links_need_not_agree(pool: PgPool) {
    let owner = create_user(&pool, "mixer").await;
    let work = create_category(&pool, owner, "Work").await;
    let home = create_category(&pool, owner, "Home").await;
    let chores = create_subcategory(&pool, owner, "Chores", home).await;

    let note = NoteRepo::create(&pool, owner, &note_input("Odd", Some(work), Some(chores)))
        .await
        .expect("mismatched links are permitted");
    assert_eq!(note.category_id, Some(work));
    assert_eq!(note.subcategory_id, Some(chores));
}

#[sqlx::test(migrations = "./migrations")]
async fn note_with_missing_link_is_integrity_error(pool: PgPool) {
    let owner = create_user(&pool, "dangling").await;

    let result = NoteRepo::create(&pool, owner, &note_input("Bad", Some(31_337), None)).await;
    assert_matches!(result, Err(StoreError::Integrity(_)));

    let result = NoteRepo::create(&pool, owner, &note_input("Bad", None, Some(31_337))).await;
    assert_matches!(result, Err(StoreError::Integrity(_)));

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM notes WHERE owner_id = $1", owner).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn note_cannot_link_to_another_users_category(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let alice_work = create_category(&pool, alice, "Work").await;

    let result = NoteRepo::create(&pool, bob, &note_input("Mine", Some(alice_work), None)).await;
    assert_matches!(result, Err(StoreError::Integrity(_)));
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn edits_never_change_created_at(pool: PgPool) {
    let owner = create_user(&pool, "editor").await;
    let work = create_category(&pool, owner, "Work").await;
    let note = NoteRepo::create(&pool, owner, &note_input("Draft", None, None))
        .await
        .unwrap();

    let replaced = NoteRepo::replace(&pool, owner, note.id, &note_input("Final", Some(work), None))
        .await
        .unwrap();
    assert_eq!(replaced.title, "Final");
    assert_eq!(replaced.created_at, note.created_at);

    let patch = PatchNote {
        content: Some("rewritten".to_string()),
        ..Default::default()
    };
    let patched = NoteRepo::patch(&pool, owner, note.id, &patch).await.unwrap();
    assert_eq!(patched.content, "rewritten");
    assert_eq!(patched.title, "Final");
    assert_eq!(patched.category_id, Some(work));
    assert_eq!(patched.created_at, note.created_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_can_clear_and_set_links(pool: PgPool) {
    let owner = create_user(&pool, "patcher").await;
    let work = create_category(&pool, owner, "Work").await;
    let reports = create_subcategory(&pool, owner, "Reports", work).await;
    let note = NoteRepo::create(&pool, owner, &note_input("Q1", Some(work), None))
        .await
        .unwrap();

    let patch = PatchNote {
        category_id: Some(None),
        subcategory_id: Some(Some(reports)),
        ..Default::default()
    };
    let patched = NoteRepo::patch(&pool, owner, note.id, &patch).await.unwrap();
    assert_eq!(patched.category_id, None);
    assert_eq!(patched.subcategory_id, Some(reports));
}

#[sqlx::test(migrations = "./migrations")]
async fn replace_clears_omitted_links(pool: PgPool) {
    let owner = create_user(&pool, "replacer").await;
    let work = create_category(&pool, owner, "Work").await;
    let note = NoteRepo::create(&pool, owner, &note_input("Q1", Some(work), None))
        .await
        .unwrap();

    let replaced = NoteRepo::replace(&pool, owner, note.id, &note_input("Q1", None, None))
        .await
        .unwrap();
    assert_eq!(replaced.category_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn other_users_rows_are_not_found(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let work = create_category(&pool, alice, "Work").await;
    let note = NoteRepo::create(&pool, alice, &note_input("Private", None, None))
        .await
        .unwrap();

    assert!(CategoryRepo::find_by_id(&pool, bob, work).await.unwrap().is_none());
    assert!(NoteRepo::find_by_id(&pool, bob, note.id).await.unwrap().is_none());
    let rename = UpdateCategory {
        name: "Mine now".to_string(),
    };
    assert!(CategoryRepo::update(&pool, bob, work, &rename).await.unwrap().is_none());

    assert_matches!(
        NoteRepo::delete(&pool, bob, note.id).await,
        Err(StoreError::NotFound { entity: "Note", .. })
    );
    assert_matches!(
        CategoryRepo::delete(&pool, bob, work).await,
        Err(StoreError::NotFound { entity: "Category", .. })
    );
    assert!(NoteRepo::find_by_id(&pool, alice, note.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn editing_unknown_note_is_not_found_before_link_checks(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let alices_note = NoteRepo::create(&pool, alice, &note_input("Private", None, None))
        .await
        .unwrap();

    let bad_links = note_input("Edited", Some(12_345), None);
    let bad_patch = PatchNote {
        category_id: Some(Some(12_345)),
        ..Default::default()
    };

    assert_matches!(
        NoteRepo::replace(&pool, bob, 999_999, &bad_links).await,
        Err(StoreError::NotFound { entity: "Note", id: 999_999 })
    );
    assert_matches!(
        NoteRepo::patch(&pool, bob, 999_999, &bad_patch).await,
        Err(StoreError::NotFound { entity: "Note", id: 999_999 })
    );
    assert_matches!(
        NoteRepo::replace(&pool, bob, alices_note.id, &bad_links).await,
        Err(StoreError::NotFound { entity: "Note", .. })
    );
    assert_matches!(
        NoteRepo::patch(&pool, bob, alices_note.id, &bad_patch).await,
        Err(StoreError::NotFound { entity: "Note", .. })
    );

    // The owner still gets the link error.
    assert_matches!(
        NoteRepo::replace(&pool, alice, alices_note.id, &bad_links).await,
        Err(StoreError::Integrity(_))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_link(pool: PgPool) {
    let owner = create_user(&pool, "lister").await;
    let work = create_category(&pool, owner, "Work").await;
    let reports = create_subcategory(&pool, owner, "Reports", work).await;
    NoteRepo::create(&pool, owner, &note_input("A", Some(work), Some(reports)))
        .await
        .unwrap();
    NoteRepo::create(&pool, owner, &note_input("B", Some(work), None))
        .await
        .unwrap();
    NoteRepo::create(&pool, owner, &note_input("C", None, None))
        .await
        .unwrap();

    let all = NoteRepo::list(&pool, owner, NoteFilter::default(), 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let in_work = NoteRepo::list(
        &pool,
        owner,
        NoteFilter {
            category_id: Some(work),
            subcategory_id: None,
        },
        50,
        0,
    )
    .await
    .unwrap();
    assert_eq!(in_work.len(), 2);

    let in_reports = NoteRepo::list(
        &pool,
        owner,
        NoteFilter {
            category_id: None,
            subcategory_id: Some(reports),
        },
        50,
        0,
    )
    .await
    .unwrap();
    assert_eq!(in_reports.len(), 1);
    assert_eq!(in_reports[0].title, "A");

    let page = NoteRepo::list(&pool, owner, NoteFilter::default(), 2, 2)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}

// ---------------------------------------------------------------------------
// Deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_category_cascades_and_detaches(pool: PgPool) {
    let owner = create_user(&pool, "worker").await;
    let work = create_category(&pool, owner, "Work").await;
    let reports = create_subcategory(&pool, owner, "Reports", work).await;
    let memos = create_subcategory(&pool, owner, "Memos", work).await;
    let q1 = NoteRepo::create(&pool, owner, &note_input("Q1", Some(work), Some(reports)))
        .await
        .unwrap();
    let q2 = NoteRepo::create(&pool, owner, &note_input("Q2", Some(work), None))
        .await
        .unwrap();

    let summary = CategoryRepo::delete(&pool, owner, work).await.unwrap();
    assert_eq!(
        summary,
        CategoryDeletion {
            subcategories_deleted: 2,
            notes_detached_from_category: 2,
            notes_detached_from_subcategory: 1,
        }
    );

    assert!(SubcategoryRepo::find_by_id(&pool, owner, reports).await.unwrap().is_none());
    assert!(SubcategoryRepo::find_by_id(&pool, owner, memos).await.unwrap().is_none());

    let q1 = NoteRepo::find_by_id(&pool, owner, q1.id).await.unwrap().unwrap();
    assert_eq!(q1.category_id, None);
    assert_eq!(q1.subcategory_id, None);

    let q2 = NoteRepo::find_by_id(&pool, owner, q2.id).await.unwrap().unwrap();
    assert_eq!(q2.category_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_category_detaches_notes_in_other_categories_via_subcategory(pool: PgPool) {
    let owner = create_user(&pool, "crosslinker").await;
    let work = create_category(&pool, owner, "Work").await;
    let home = create_category(&pool, owner, "Home").await;
    let reports = create_subcategory(&pool, owner, "Reports", work).await;
    let note = NoteRepo::create(&pool, owner, &note_input("Mixed", Some(home), Some(reports)))
        .await
        .unwrap();

    CategoryRepo::delete(&pool, owner, work).await.unwrap();

    let note = NoteRepo::find_by_id(&pool, owner, note.id).await.unwrap().unwrap();
    assert_eq!(note.category_id, Some(home), "unrelated category link survives");
    assert_eq!(note.subcategory_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_subcategory_only_clears_subcategory_link(pool: PgPool) {
    let owner = create_user(&pool, "subber").await;
    let work = create_category(&pool, owner, "Work").await;
    let reports = create_subcategory(&pool, owner, "Reports", work).await;
    let note = NoteRepo::create(&pool, owner, &note_input("Q1", Some(work), Some(reports)))
        .await
        .unwrap();

    let summary = SubcategoryRepo::delete(&pool, owner, reports).await.unwrap();
    assert_eq!(summary, SubcategoryDeletion { notes_detached: 1 });

    let note = NoteRepo::find_by_id(&pool, owner, note.id).await.unwrap().unwrap();
    assert_eq!(note.category_id, Some(work));
    assert_eq!(note.subcategory_id, None);
    assert!(CategoryRepo::find_by_id(&pool, owner, work).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_missing_rows_is_not_found(pool: PgPool) {
    let owner = create_user(&pool, "ghosthunter").await;

    assert_matches!(
        CategoryRepo::delete(&pool, owner, 1_000).await,
        Err(StoreError::NotFound { entity: "Category", id: 1_000 })
    );
    assert_matches!(
        SubcategoryRepo::delete(&pool, owner, 1_000).await,
        Err(StoreError::NotFound { entity: "Subcategory", id: 1_000 })
    );
    assert_matches!(
        UserRepo::delete(&pool, 1_000_000).await,
        Err(StoreError::NotFound { entity: "User", .. })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_user_removes_everything_they_own(pool: PgPool) {
    let doomed = create_user(&pool, "doomed").await;
    let survivor = create_user(&pool, "survivor").await;

    let work = create_category(&pool, doomed, "Work").await;
    create_subcategory(&pool, doomed, "Reports", work).await;
    NoteRepo::create(&pool, doomed, &note_input("Q1", Some(work), None))
        .await
        .unwrap();
    NoteRepo::create(&pool, doomed, &note_input("Q2", None, None))
        .await
        .unwrap();

    let kept_category = create_category(&pool, survivor, "Home").await;
    let kept_input = note_input("Keep", Some(kept_category), None);
    let kept_note = NoteRepo::create(&pool, survivor, &kept_input).await.unwrap();

    let summary = UserRepo::delete(&pool, doomed).await.unwrap();
    assert_eq!(summary.notes_deleted, 2);
    assert_eq!(summary.subcategories_deleted, 1);
    assert_eq!(summary.categories_deleted, 1);

    assert!(UserRepo::find_by_id(&pool, doomed).await.unwrap().is_none());
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM notes WHERE owner_id = $1", doomed).await, 0);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM subcategories WHERE owner_id = $1", doomed).await,
        0
    );
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM categories WHERE owner_id = $1", doomed).await,
        0
    );

    let kept = NoteRepo::find_by_id(&pool, survivor, kept_note.id).await.unwrap().unwrap();
    assert_eq!(kept.category_id, Some(kept_category));
}

#[sqlx::test(migrations = "./migrations")]
async fn plain_sql_deletes_follow_the_same_rules(pool: PgPool) {
    let owner = create_user(&pool, "outsider").await;
    let work = create_category(&pool, owner, "Work").await;
    let reports = create_subcategory(&pool, owner, "Reports", work).await;
    let note = NoteRepo::create(&pool, owner, &note_input("Q1", Some(work), Some(reports)))
        .await
        .unwrap();

    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(work)
        .execute(&pool)
        .await
        .unwrap();

    let detached = NoteRepo::find_by_id(&pool, owner, note.id).await.unwrap().unwrap();
    assert_eq!(detached.category_id, None);
    assert_eq!(detached.subcategory_id, None);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM subcategories WHERE owner_id = $1", owner).await,
        0
    );

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(owner)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM notes WHERE owner_id = $1", owner).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn note_create_racing_category_delete_never_dangles(pool: PgPool) {
    let owner = create_user(&pool, "racer").await;

    for round in 0..20 {
        let category = create_category(&pool, owner, &format!("Round {round}")).await;
        let input = note_input("Racing", Some(category), None);

        let (created, deleted) = tokio::join!(
            NoteRepo::create(&pool, owner, &input),
            CategoryRepo::delete(&pool, owner, category),
        );

        deleted.expect("category delete should succeed");
        match created {
            Ok(note) => {
                let stored = NoteRepo::find_by_id(&pool, owner, note.id).await.unwrap().unwrap();
                assert_eq!(stored.category_id, None, "round {round}");
            }
            Err(err) => assert_matches!(err, StoreError::Integrity(_), "round {round}"),
        }
    }

    let dangling = count(
        &pool,
        "SELECT COUNT(*) FROM notes n
         WHERE n.owner_id = $1
           AND n.category_id IS NOT NULL
           AND NOT EXISTS (SELECT 1 FROM categories c WHERE c.id = n.category_id)",
        owner,
    )
    .await;
    assert_eq!(dangling, 0);
}

/// Work / Reports / Q1: after deleting "Work" the note survives with both
/// links absent.
#[sqlx::test(migrations = "./migrations")]
async fn work_reports_q1_scenario(pool: PgPool) {
    let user_a = create_user(&pool, "user_a").await;
    let work = create_category(&pool, user_a, "Work").await;
    let reports = create_subcategory(&pool, user_a, "Reports", work).await;
    let q1 = NoteRepo::create(&pool, user_a, &note_input("Q1", Some(work), Some(reports)))
        .await
        .unwrap();

    CategoryRepo::delete(&pool, user_a, work).await.unwrap();

    assert!(SubcategoryRepo::find_by_id(&pool, user_a, reports).await.unwrap().is_none());
    let q1 = NoteRepo::find_by_id(&pool, user_a, q1.id)
        .await
        .unwrap()
        .expect("Q1 must survive the category delete");
    assert_eq!(q1.category_id, None);
    assert_eq!(q1.subcategory_id, None);
}
