//! Integration tests for `DieselTagRepository` against embedded PostgreSQL.

use blog_backend::domain::ports::{
    ConstraintKind, PostRepository, StoreError, TagRepository, UserRepository,
};
use blog_backend::domain::{NewTag, NewUser, PostFields, TagChanges, TagId};
use blog_backend::outbound::persistence::{
    DieselPostRepository, DieselTagRepository, DieselUserRepository,
};
use rstest::{fixture, rstest};

mod support;

use support::{TestDatabase, database_or_skip};

#[fixture]
fn database() -> Option<TestDatabase> {
    database_or_skip("blog_tag_repository_test")
}

fn tag(name: &str) -> NewTag {
    NewTag {
        name: name.to_owned(),
    }
}

#[rstest]
fn tags_are_listed_by_name_and_found_exactly(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: tags_are_listed_by_name_and_found_exactly skipped");
        return;
    };
    let repo = DieselTagRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let web = repo.create(tag("web")).await.expect("create web");
        let async_tag = repo.create(tag("async")).await.expect("create async");

        let names: Vec<String> = repo
            .list()
            .await
            .expect("list tags")
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        assert_eq!(names, vec!["async", "web"]);

        assert_eq!(
            repo.find_by_name("web").await.expect("find web"),
            Some(web.clone())
        );
        assert_eq!(repo.find_by_name("Web").await.expect("case sensitive"), None);
        assert_eq!(
            repo.find_by_id(async_tag.id).await.expect("find by id"),
            Some(async_tag)
        );
    });
}

#[rstest]
fn duplicate_names_report_the_unique_constraint(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_names_report_the_unique_constraint skipped");
        return;
    };
    let repo = DieselTagRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let rust = repo.create(tag("rust")).await.expect("create rust");
        let web = repo.create(tag("web")).await.expect("create web");
        let expected = StoreError::constraint_violation(ConstraintKind::Unique, "tags_name_key");

        let err = repo.create(tag("rust")).await.expect_err("duplicate create");
        assert_eq!(err, expected);

        let err = repo
            .rename(
                web.id,
                TagChanges {
                    name: Some(rust.name.clone()),
                },
            )
            .await
            .expect_err("rename onto an existing name");
        assert_eq!(err, expected);
    });
}

#[rstest]
fn rename_and_delete_missing_tags_are_not_found(database: Option<TestDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: rename_and_delete_missing_tags_are_not_found skipped");
        return;
    };
    let repo = DieselTagRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let missing = TagId::new(4_040);
        let rename = repo
            .rename(
                missing,
                TagChanges {
                    name: Some("ghost".to_owned()),
                },
            )
            .await;
        assert!(matches!(rename, Err(StoreError::NotFound { .. })));
        let delete = repo.delete(missing).await;
        assert!(matches!(delete, Err(StoreError::NotFound { .. })));
    });
}

#[rstest]
fn renaming_is_visible_through_linked_posts_and_deleting_unlinks(
    database: Option<TestDatabase>,
) {
    let Some(db) = database else {
        eprintln!(
            "SKIP-TEST-CLUSTER: renaming_is_visible_through_linked_posts_and_deleting_unlinks skipped"
        );
        return;
    };
    let tags = DieselTagRepository::new(db.pool.clone());
    let posts = DieselPostRepository::new(db.pool.clone());
    let users = DieselUserRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let author = users
            .create(NewUser {
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                image_url: None,
                bio: None,
            })
            .await
            .expect("create author");
        let old = tags.create(tag("old-name")).await.expect("create tag");
        let post = posts
            .create(
                PostFields {
                    title: "Tagged".to_owned(),
                    body: "..".to_owned(),
                    author_id: author.id,
                },
                vec![old.id],
            )
            .await
            .expect("create post")
            .post;

        let renamed = tags
            .rename(
                old.id,
                TagChanges {
                    name: Some("new-name".to_owned()),
                },
            )
            .await
            .expect("rename tag");
        assert_eq!(renamed.id, old.id);

        let detail = posts
            .find_detail(post.id)
            .await
            .expect("find post")
            .expect("post exists");
        assert_eq!(detail.tags, vec![renamed.clone()]);

        tags.delete(renamed.id).await.expect("delete tag");
        let detail = posts
            .find_detail(post.id)
            .await
            .expect("find post after tag delete")
            .expect("post survives");
        assert!(detail.tags.is_empty());
    });
}
