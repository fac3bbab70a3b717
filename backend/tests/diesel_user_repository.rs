//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Each test boots a private cluster through `pg-embedded-setup-unpriv`;
//! when that is impossible the test prints a `SKIP-TEST-CLUSTER` marker.

use blog_backend::domain::ports::{ConstraintKind, PostRepository, StoreError, UserRepository};
use blog_backend::domain::{NewUser, Patch, PostFields, UserChanges, UserId};
use blog_backend::outbound::persistence::{DieselPostRepository, DieselUserRepository};
use rstest::{fixture, rstest};

mod support;

use support::{TestDatabase, database_or_skip};

#[fixture]
fn database() -> Option<TestDatabase> {
    database_or_skip("blog_user_repository_test")
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        image_url: Some(format!("https://img.example.com/{name}.png")),
        bio: None,
    }
}

#[rstest]
fn create_find_and_list_round_trip(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: create_find_and_list_round_trip skipped");
        return;
    };
    let repo = DieselUserRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let ada = repo.create(new_user("Ada")).await.expect("create ada");
        let grace = repo.create(new_user("Grace")).await.expect("create grace");
        assert_ne!(ada.id, grace.id);

        let found = repo.find_by_id(ada.id).await.expect("find ada");
        assert_eq!(found, Some(ada.clone()));

        let all = repo.list().await.expect("list users");
        assert_eq!(all, vec![ada, grace]);

        let missing = repo.find_by_id(UserId::new(9_999)).await.expect("find missing");
        assert!(missing.is_none());
    });
}

#[rstest]
fn duplicate_email_reports_the_unique_constraint(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_email_reports_the_unique_constraint skipped");
        return;
    };
    let repo = DieselUserRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        repo.create(new_user("Ada")).await.expect("create ada");
        let err = repo
            .create(new_user("Ada"))
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(
            err,
            StoreError::constraint_violation(ConstraintKind::Unique, "users_email_key")
        );
    });
}

#[rstest]
fn update_distinguishes_absent_from_null(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: update_distinguishes_absent_from_null skipped");
        return;
    };
    let repo = DieselUserRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let ada = repo.create(new_user("Ada")).await.expect("create ada");

        let renamed = repo
            .update(
                ada.id,
                UserChanges {
                    name: Some("Ada L.".to_owned()),
                    bio: Patch::Value("Analyst".to_owned()),
                    ..UserChanges::default()
                },
            )
            .await
            .expect("rename");
        assert_eq!(renamed.name, "Ada L.");
        assert_eq!(renamed.bio.as_deref(), Some("Analyst"));
        assert_eq!(renamed.image_url, ada.image_url);

        let cleared = repo
            .update(
                ada.id,
                UserChanges {
                    image_url: Patch::Null,
                    ..UserChanges::default()
                },
            )
            .await
            .expect("clear image");
        assert_eq!(cleared.image_url, None);
        assert_eq!(cleared.bio.as_deref(), Some("Analyst"));

        let unchanged = repo
            .update(ada.id, UserChanges::default())
            .await
            .expect("empty update");
        assert_eq!(unchanged, cleared);
    });
}

#[rstest]
fn missing_rows_are_not_found(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: missing_rows_are_not_found skipped");
        return;
    };
    let repo = DieselUserRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let update = repo
            .update(
                UserId::new(41),
                UserChanges {
                    name: Some("Nobody".to_owned()),
                    ..UserChanges::default()
                },
            )
            .await;
        assert!(matches!(update, Err(StoreError::NotFound { .. })));

        let empty_update = repo.update(UserId::new(41), UserChanges::default()).await;
        assert!(matches!(empty_update, Err(StoreError::NotFound { .. })));

        let delete = repo.delete(UserId::new(41)).await;
        assert!(matches!(delete, Err(StoreError::NotFound { .. })));
    });
}

#[rstest]
fn authors_cannot_be_deleted_while_they_own_posts(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: authors_cannot_be_deleted_while_they_own_posts skipped");
        return;
    };
    let users = DieselUserRepository::new(db.pool.clone());
    let posts = DieselPostRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let ada = users.create(new_user("Ada")).await.expect("create ada");
        posts
            .create(
                PostFields {
                    title: "Notes".to_owned(),
                    body: "On the engine".to_owned(),
                    author_id: ada.id,
                },
                Vec::new(),
            )
            .await
            .expect("create post");

        let err = users.delete(ada.id).await.expect_err("restricted delete");
        assert_eq!(
            err,
            StoreError::constraint_violation(ConstraintKind::ForeignKey, "posts_author_id_fkey")
        );
        assert!(users.find_by_id(ada.id).await.expect("find ada").is_some());
    });
}
