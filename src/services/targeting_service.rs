use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, warn};

use crate::database::{event_repo, info_feed_repo, member_repo, voice_repo};
use crate::models::MemberRow;
use crate::services::attendance_service;

/// A target selection as attached to an event, feed post or chat.
///
/// The id lists are kept as deduplicated sets so membership checks are O(1)
/// and dangling ids stay inert: an id that matches no row simply never tests
/// true against a member.
#[derive(Debug, Clone, Default)]
pub struct TargetSpec {
    pub include_all_active: bool,
    pub membership_type_ids: HashSet<String>,
    pub voice_group_ids: HashSet<String>,
    pub voice_type_ids: HashSet<String>,
}

impl TargetSpec {
    pub fn from_stored(
        include_all_active: i64,
        membership_types_json: Option<&str>,
        voice_groups_json: Option<&str>,
        voice_types_json: Option<&str>,
    ) -> Self {
        TargetSpec {
            include_all_active: include_all_active != 0,
            membership_type_ids: parse_id_set(membership_types_json),
            voice_group_ids: parse_id_set(voice_groups_json),
            voice_type_ids: parse_id_set(voice_types_json),
        }
    }
}

/// Raw targeting as submitted by the event/post forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetingInput {
    #[serde(default)]
    pub include_all_active: bool,
    #[serde(default)]
    pub target_membership_types: Vec<String>,
    #[serde(default)]
    pub target_voice_groups: Vec<String>,
    #[serde(default)]
    pub target_voice_types: Vec<String>,
}

pub fn parse_id_set(json: Option<&str>) -> HashSet<String> {
    let Some(raw) = json else {
        return HashSet::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            warn!("Malformed target id list {:?}: {}", raw, e);
            HashSet::new()
        }
    }
}

pub fn id_set_to_json(ids: &HashSet<String>) -> String {
    let mut sorted: Vec<&String> = ids.iter().collect();
    sorted.sort();
    serde_json::to_string(&sorted).unwrap_or_else(|_| "[]".to_string())
}

pub fn id_list_to_json(ids: &[String]) -> String {
    let set: HashSet<String> = ids.iter().cloned().collect();
    id_set_to_json(&set)
}

pub struct ExpandedTargets {
    pub voice_group_ids: Vec<String>,
    pub voice_type_ids: Vec<String>,
}

/// Expands a raw voice selection into its closure: the explicitly chosen
/// types plus every active type under the chosen groups.
///
/// The group list is retained in the result because a member can sit directly
/// on a group without a specific type and must still match. Inactive or
/// unknown group ids contribute nothing.
pub async fn expand_targets(
    conn: &mut SqliteConnection,
    choir_id: &str,
    voice_group_ids: &[String],
    voice_type_ids: &[String],
) -> sqlx::Result<ExpandedTargets> {
    let group_set: HashSet<String> = voice_group_ids.iter().cloned().collect();
    let mut type_set: HashSet<String> = voice_type_ids.iter().cloned().collect();

    if !group_set.is_empty() {
        let groups_json = id_set_to_json(&group_set);
        let child_types =
            voice_repo::list_active_types_in_groups(conn, choir_id, &groups_json).await?;
        type_set.extend(child_types.into_iter().map(|t| t.type_id));
    }

    let mut voice_group_ids: Vec<String> = group_set.into_iter().collect();
    voice_group_ids.sort();
    let mut voice_type_ids: Vec<String> = type_set.into_iter().collect();
    voice_type_ids.sort();

    Ok(ExpandedTargets {
        voice_group_ids,
        voice_type_ids,
    })
}

/// Whether a member is addressed by a target. Evaluated as an OR over the
/// four targeting dimensions; the first matching clause decides.
///
/// An empty membership-type list means "no restriction" and matches every
/// member, it is not "matches nobody". Callers must only pass members that
/// already hold an active membership; that precondition is not re-checked
/// here.
pub fn is_member_eligible(member: &MemberRow, target: &TargetSpec) -> bool {
    if target.include_all_active {
        return true;
    }
    if target.membership_type_ids.is_empty()
        || target.membership_type_ids.contains(&member.membership_type_id)
    {
        return true;
    }
    if target.voice_group_ids.contains(&member.voice_group_id) {
        return true;
    }
    if let Some(voice_type_id) = &member.voice_type_id {
        if target.voice_type_ids.contains(voice_type_id) {
            return true;
        }
    }
    false
}

/// Chat variant of the predicate: no include-all shortcut, and an empty
/// membership-type list admits nobody through that clause. The voice clauses
/// are the same as in [`is_member_eligible`].
pub fn is_member_chat_eligible(member: &MemberRow, target: &TargetSpec) -> bool {
    if !target.membership_type_ids.is_empty()
        && target.membership_type_ids.contains(&member.membership_type_id)
    {
        return true;
    }
    if target.voice_group_ids.contains(&member.voice_group_id) {
        return true;
    }
    if let Some(voice_type_id) = &member.voice_type_id {
        if target.voice_type_ids.contains(voice_type_id) {
            return true;
        }
    }
    false
}

pub async fn get_eligible_members(
    conn: &mut SqliteConnection,
    choir_id: &str,
    target: &TargetSpec,
) -> sqlx::Result<Vec<MemberRow>> {
    let members = member_repo::list_active_members(conn, choir_id).await?;
    if target.include_all_active {
        return Ok(members);
    }
    Ok(members
        .into_iter()
        .filter(|m| is_member_eligible(m, target))
        .collect())
}

#[derive(Debug, Default)]
pub struct ReexpandReport {
    pub events_checked: u64,
    pub events_updated: u64,
    pub posts_checked: u64,
    pub posts_updated: u64,
    pub attendance_rows_created: u64,
}

/// Recomputes the stored voice-type closures of a choir from the raw
/// selections, for use after a hierarchy edit (type added to a group, type
/// de/re-activated). Events whose closure changed get their attendance
/// placeholders reconciled in the same transaction. Existing attendance rows
/// are never touched.
pub async fn reexpand_choir_targets(
    pool: &SqlitePool,
    choir_id: &str,
) -> sqlx::Result<ReexpandReport> {
    let mut report = ReexpandReport::default();
    let mut tx = pool.begin().await?;

    let types = voice_repo::list_active_types(&mut tx, choir_id).await?;
    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for t in types {
        children.entry(t.group_id).or_default().push(t.type_id);
    }

    let events = event_repo::list_events(&mut tx, choir_id).await?;
    for event in events {
        report.events_checked += 1;
        let closure = recompute_closure(
            &children,
            event.target_voice_groups.as_deref(),
            event.target_voice_types_selected.as_deref(),
        );
        let stored = parse_id_set(event.target_voice_types.as_deref());
        if closure != stored {
            event_repo::update_event_voice_closure(
                &mut tx,
                &event.event_id,
                &id_set_to_json(&closure),
            )
            .await?;
            report.events_updated += 1;
            let created =
                attendance_service::reconcile_event_attendance(&mut tx, &event.event_id)
                    .await?
                    .unwrap_or(0);
            report.attendance_rows_created += created;
        }
    }

    let posts = info_feed_repo::list_posts(&mut tx, choir_id).await?;
    for post in posts {
        report.posts_checked += 1;
        let closure = recompute_closure(
            &children,
            post.target_voice_groups.as_deref(),
            post.target_voice_types_selected.as_deref(),
        );
        let stored = parse_id_set(post.target_voice_types.as_deref());
        if closure != stored {
            info_feed_repo::update_post_voice_closure(
                &mut tx,
                &post.post_id,
                &id_set_to_json(&closure),
            )
            .await?;
            report.posts_updated += 1;
        }
    }

    tx.commit().await?;

    info!(
        "Re-expanded targets for choir {}: {}/{} events, {}/{} posts, {} attendance rows",
        choir_id,
        report.events_updated,
        report.events_checked,
        report.posts_updated,
        report.posts_checked,
        report.attendance_rows_created
    );
    Ok(report)
}

fn recompute_closure(
    children: &HashMap<String, Vec<String>>,
    voice_groups_json: Option<&str>,
    voice_types_selected_json: Option<&str>,
) -> HashSet<String> {
    let groups = parse_id_set(voice_groups_json);
    let mut closure = parse_id_set(voice_types_selected_json);
    for group_id in &groups {
        if let Some(type_ids) = children.get(group_id) {
            closure.extend(type_ids.iter().cloned());
        }
    }
    closure
}
