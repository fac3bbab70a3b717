//! Shape and bounding of the assembled projections.

use super::*;
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

use crate::domain::TagId;

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0)
        .single()
        .expect("valid timestamp")
}

fn user(id: i32, name: &str) -> User {
    User {
        id: UserId::new(id),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        image_url: Some(format!("https://img.example.com/{id}.png")),
        bio: None,
    }
}

fn post(id: i32, author: i32) -> Post {
    Post {
        id: PostId::new(id),
        title: format!("Post {id}"),
        body: "body".to_owned(),
        author_id: UserId::new(author),
        created_at: at(i64::from(id)),
        updated_at: at(i64::from(id)),
    }
}

fn comment(id: i32, post_id: i32, author: i32, seconds: i64) -> Comment {
    Comment {
        id: CommentId::new(id),
        body: format!("comment {id}"),
        author_id: UserId::new(author),
        post_id: PostId::new(post_id),
        created_at: at(seconds),
    }
}

fn tag(id: i32, name: &str) -> Tag {
    Tag {
        id: TagId::new(id),
        name: name.to_owned(),
    }
}

#[fixture]
fn related() -> RelatedRecords {
    RelatedRecords::default()
        .with_users([user(1, "Ada"), user(2, "Grace")])
        .with_post_tags([
            (PostId::new(1), tag(2, "rust")),
            (PostId::new(1), tag(1, "async")),
        ])
        .with_comment_counts([(PostId::new(1), 5)])
        .with_comments([
            comment(5, 1, 2, 50),
            comment(1, 1, 2, 10),
            comment(4, 1, 1, 40),
            comment(2, 1, 1, 10),
            comment(3, 1, 2, 30),
        ])
        .with_post_links([PostLink::from(&post(1, 1))])
}

#[rstest]
#[case(AuthorShape::Link, false, false, false)]
#[case(AuthorShape::Compact, false, true, false)]
#[case(AuthorShape::Contact, true, true, false)]
#[case(AuthorShape::Full, true, true, true)]
fn author_shapes_select_fields(
    #[case] shape: AuthorShape,
    #[case] email: bool,
    #[case] image: bool,
    #[case] bio: bool,
) {
    let view = AuthorView::project(&user(1, "Ada"), shape);
    assert_eq!(view.email.is_some(), email);
    assert_eq!(view.image_url.is_some(), image);
    assert_eq!(view.bio.is_some(), bio);
}

#[rstest]
fn full_author_serialises_null_bio() {
    let view = AuthorView::project(&user(1, "Ada"), AuthorShape::Full);
    let value = serde_json::to_value(view).expect("serialise author");
    assert_eq!(
        value,
        json!({
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "imageUrl": "https://img.example.com/1.png",
            "bio": null,
        })
    );
}

#[rstest]
fn summary_carries_counts_but_no_comments(related: RelatedRecords) {
    let summary = related.post_summary(post(1, 1)).expect("summary");
    assert_eq!(summary.comment_count, 5);
    assert_eq!(
        summary.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["async", "rust"]
    );
    assert!(summary.author.email.is_some());
    assert!(summary.author.bio.is_none());

    let value = serde_json::to_value(&summary).expect("serialise summary");
    assert!(value.get("comments").is_none());
    assert_eq!(value["commentCount"], json!(5));
    assert_eq!(value["authorId"], json!(1));
}

#[rstest]
fn detail_embeds_three_earliest_comments(related: RelatedRecords) {
    let detail = related.post_detail(post(1, 1)).expect("detail");
    let ids: Vec<i32> = detail.comments.iter().map(|c| c.id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(detail.comment_count, 5);
    assert!(detail.author.bio.is_some());
    assert!(detail.comments.iter().all(|c| c.author.email.is_none()));
}

#[rstest]
fn post_without_relations_projects_empty_collections() {
    let related = RelatedRecords::default().with_users([user(1, "Ada")]);
    let detail = related.post_detail(post(9, 1)).expect("detail");
    assert!(detail.tags.is_empty());
    assert!(detail.comments.is_empty());
    assert_eq!(detail.comment_count, 0);
}

#[rstest]
fn missing_author_is_reported() {
    let result = RelatedRecords::default().post_summary(post(1, 7));
    assert_eq!(
        result,
        Err(ProjectionError::MissingAuthor {
            user_id: UserId::new(7)
        })
    );
}

#[rstest]
#[case(ProjectionProfile::Summary, false)]
#[case(ProjectionProfile::Detail, true)]
fn comment_author_shape_follows_profile(
    related: RelatedRecords,
    #[case] profile: ProjectionProfile,
    #[case] email: bool,
) {
    let view = related
        .comment_view(comment(1, 1, 2, 10), profile)
        .expect("comment view");
    assert_eq!(view.author.email.is_some(), email);
    assert_eq!(view.post.title, "Post 1");
}

#[rstest]
fn comment_on_unknown_post_is_reported(related: RelatedRecords) {
    let result = related.comment_view(comment(1, 8, 2, 10), ProjectionProfile::Summary);
    assert_eq!(
        result,
        Err(ProjectionError::MissingPost {
            post_id: PostId::new(8)
        })
    );
}

#[rstest]
fn referenced_ids_are_distinct_and_sorted() {
    let posts = [post(1, 3), post(2, 1)];
    let comments = [comment(1, 1, 3, 0), comment(2, 2, 2, 0)];
    let users = referenced_user_ids(&posts, &comments);
    assert_eq!(users, vec![UserId::new(1), UserId::new(2), UserId::new(3)]);
    assert_eq!(
        referenced_post_ids(&comments),
        vec![PostId::new(1), PostId::new(2)]
    );
}

#[rstest]
fn link_profiles_carry_only_identity_and_label() {
    let ada = user(1, "Ada");
    let link = serde_json::to_value(UserLink::from(&ada)).expect("serialise user link");
    assert_eq!(link, json!({"id": 1, "name": "Ada"}));

    let post_link = serde_json::to_value(PostLink::from(&post(4, 1))).expect("serialise post link");
    assert_eq!(post_link, json!({"id": 4, "title": "Post 4"}));
}
