//! Info-feed visibility and chat membership.

mod support;

use koorplein::services::targeting_service::TargetingInput;
use koorplein::services::{chat_service, feed_service};
use support::{insert_chat, seed_standard_choir, setup_pool, strings, CHOIR_ID, MT_BOARD};

fn post_input(
    title: &str,
    include_all_active: bool,
    membership_types: &[&str],
    voice_groups: &[&str],
    voice_types: &[&str],
) -> feed_service::NewPostInput {
    feed_service::NewPostInput {
        title: title.to_string(),
        body: "Inhoud".to_string(),
        targeting: TargetingInput {
            include_all_active,
            target_membership_types: strings(membership_types),
            target_voice_groups: strings(voice_groups),
            target_voice_types: strings(voice_types),
        },
    }
}

// ---------------------------------------------------------------------------
// info feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_applies_the_full_predicate_per_post() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;

    // Visible to everyone via include-all.
    feed_service::create_post(&pool, CHOIR_ID, &post_input("alle", true, &[MT_BOARD], &[], &[]))
        .await
        .expect("post");
    // Visible to everyone via the empty-membership-list wildcard, despite
    // targeting only the basses.
    feed_service::create_post(&pool, CHOIR_ID, &post_input("wildcard", false, &[], &["g4"], &[]))
        .await
        .expect("post");
    // Visible to sopranos only.
    feed_service::create_post(
        &pool,
        CHOIR_ID,
        &post_input("sopranen", false, &[MT_BOARD], &["g1"], &[]),
    )
    .await
    .expect("post");

    let for_tenor = feed_service::list_feed_for_member(&pool, "member-c")
        .await
        .expect("feed")
        .expect("member");
    let titles: Vec<&str> = for_tenor.iter().map(|p| p.title.as_str()).collect();
    assert!(titles.contains(&"alle"));
    assert!(titles.contains(&"wildcard"));
    assert!(!titles.contains(&"sopranen"));

    let for_soprano = feed_service::list_feed_for_member(&pool, "member-a")
        .await
        .expect("feed")
        .expect("member");
    assert_eq!(for_soprano.len(), 3);
}

#[tokio::test]
async fn post_closure_is_materialized_at_write_time() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;

    feed_service::create_post(
        &pool,
        CHOIR_ID,
        &post_input("sectie", false, &[MT_BOARD], &["g1"], &[]),
    )
    .await
    .expect("post");

    // Bea is 1st soprano: the stored closure must already contain sop1, the
    // group expansion does not happen at read time.
    let feed = feed_service::list_feed_for_member(&pool, "member-b")
        .await
        .expect("feed")
        .expect("member");
    assert_eq!(feed.len(), 1);
}

#[tokio::test]
async fn feed_for_unknown_member_is_not_found() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;

    let result = feed_service::list_feed_for_member(&pool, "member-nope")
        .await
        .expect("call");
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// chats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn group_chat_admits_typed_and_untyped_section_members() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;
    insert_chat(&pool, "chat-sop", "Sopranen", Some("g1"), None, None).await;

    // Anna has no specific type, Bea is a 1st soprano; both are in.
    for member_id in ["member-a", "member-b"] {
        let chats = chat_service::list_chats_for_member(&pool, member_id)
            .await
            .expect("chats")
            .expect("member");
        assert_eq!(chats.len(), 1, "{member_id} should see the group chat");
        assert_eq!(chats[0].scope_label.as_deref(), Some("Sopraan"));
    }

    let for_tenor = chat_service::list_chats_for_member(&pool, "member-c")
        .await
        .expect("chats")
        .expect("member");
    assert!(for_tenor.is_empty());
}

#[tokio::test]
async fn type_chat_admits_only_that_exact_type() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;
    insert_chat(&pool, "chat-sop1", "1e Sopranen", Some("g1"), Some("sop1"), None).await;

    let for_typed = chat_service::list_chats_for_member(&pool, "member-b")
        .await
        .expect("chats")
        .expect("member");
    assert_eq!(for_typed.len(), 1);
    assert_eq!(for_typed[0].scope_label.as_deref(), Some("1e Sopraan"));

    // Anna is in the same group but has no specific type.
    let for_untyped = chat_service::list_chats_for_member(&pool, "member-a")
        .await
        .expect("chats")
        .expect("member");
    assert!(for_untyped.is_empty());
}

#[tokio::test]
async fn membership_type_list_admits_independently() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;
    support::insert_member(&pool, "member-e", "Eva", MT_BOARD, "g2", None).await;
    insert_chat(
        &pool,
        "chat-bestuur",
        "Bestuur",
        Some("g1"),
        None,
        Some(r#"["mt-board"]"#),
    )
    .await;

    // Eva is admitted via membership type, Anna via the voice group.
    for member_id in ["member-e", "member-a"] {
        let can_send = chat_service::can_member_send_message(&pool, member_id, "chat-bestuur")
            .await
            .expect("call")
            .expect("chat");
        assert!(can_send, "{member_id} should be in the chat");
    }

    let tenor = chat_service::can_member_send_message(&pool, "member-c", "chat-bestuur")
        .await
        .expect("call")
        .expect("chat");
    assert!(!tenor);
}

#[tokio::test]
async fn empty_membership_list_on_a_chat_admits_nobody() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;
    insert_chat(&pool, "chat-leeg", "Leeg", None, None, Some("[]")).await;

    for member_id in ["member-a", "member-b", "member-c"] {
        let can_send = chat_service::can_member_send_message(&pool, member_id, "chat-leeg")
            .await
            .expect("call")
            .expect("chat");
        assert!(!can_send);
    }
}

#[tokio::test]
async fn unknown_chat_is_not_found() {
    let pool = setup_pool().await;
    seed_standard_choir(&pool).await;

    let result = chat_service::can_member_send_message(&pool, "member-a", "chat-nope")
        .await
        .expect("call");
    assert!(result.is_none());
}
