use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{info_feed_repo, member_repo};
use crate::services::targeting_service::{self, id_list_to_json, TargetSpec, TargetingInput};

#[derive(Serialize)]
pub struct FeedPostView {
    pub post_id: String,
    pub title: String,
    pub body: String,
    pub published_at: String,
}

/// The info feed as one member sees it: every post of their choir whose
/// target addresses them, newest first. Visibility uses the full predicate,
/// including the include-all shortcut and the empty-membership-list
/// wildcard.
pub async fn list_feed_for_member(
    pool: &SqlitePool,
    member_id: &str,
) -> sqlx::Result<Option<Vec<FeedPostView>>> {
    let Some(member) = member_repo::get_active_member_by_id(pool, member_id).await? else {
        return Ok(None);
    };

    let mut conn = pool.acquire().await?;
    let posts = info_feed_repo::list_posts(&mut conn, &member.choir_id).await?;

    let views = posts
        .into_iter()
        .filter(|post| {
            let target = TargetSpec::from_stored(
                post.include_all_active,
                post.target_membership_types.as_deref(),
                post.target_voice_groups.as_deref(),
                post.target_voice_types.as_deref(),
            );
            targeting_service::is_member_eligible(&member, &target)
        })
        .map(|post| FeedPostView {
            post_id: post.post_id,
            title: post.title,
            body: post.body,
            published_at: post.published_at,
        })
        .collect();
    Ok(Some(views))
}

#[derive(Debug, Deserialize)]
pub struct NewPostInput {
    pub title: String,
    pub body: String,
    #[serde(flatten)]
    pub targeting: TargetingInput,
}

/// Publishes a post with its voice targeting stored both raw and expanded,
/// same materialization as events. Posts have no attendance, so there is
/// nothing to reconcile.
pub async fn create_post(
    pool: &SqlitePool,
    choir_id: &str,
    input: &NewPostInput,
) -> sqlx::Result<String> {
    let post_id = Uuid::new_v4().to_string();
    let mut tx = pool.begin().await?;

    let expanded = targeting_service::expand_targets(
        &mut tx,
        choir_id,
        &input.targeting.target_voice_groups,
        &input.targeting.target_voice_types,
    )
    .await?;

    let membership_types = id_list_to_json(&input.targeting.target_membership_types);
    let groups = id_list_to_json(&expanded.voice_group_ids);
    let selected = id_list_to_json(&input.targeting.target_voice_types);
    let closure = id_list_to_json(&expanded.voice_type_ids);

    info_feed_repo::insert_post(
        &mut tx,
        info_feed_repo::NewInfoFeedPost {
            post_id: &post_id,
            choir_id,
            title: &input.title,
            body: &input.body,
            include_all_active: input.targeting.include_all_active as i64,
            target_membership_types: &membership_types,
            target_voice_groups: &groups,
            target_voice_types_selected: &selected,
            target_voice_types: &closure,
        },
    )
    .await?;

    tx.commit().await?;
    Ok(post_id)
}
