use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{chat_repo, member_repo, voice_repo};
use crate::models::ChatRow;
use crate::services::targeting_service::{self, TargetSpec};

#[derive(Serialize)]
pub struct ChatView {
    pub chat_id: String,
    pub name: String,
    // "Soprano" for a group chat, "1st Soprano" for a type chat, absent for
    // a membership-type-only chat.
    pub scope_label: Option<String>,
}

/// The chats a member belongs to. Chat membership is computed, not stored:
/// a voice-type chat admits exactly that type, a voice-group chat admits the
/// whole group (typed and untyped members alike), and a non-empty
/// membership-type list admits those members independently. There is no
/// include-all shortcut and no empty-list wildcard here.
pub async fn list_chats_for_member(
    pool: &SqlitePool,
    member_id: &str,
) -> sqlx::Result<Option<Vec<ChatView>>> {
    let Some(member) = member_repo::get_active_member_by_id(pool, member_id).await? else {
        return Ok(None);
    };

    let mut conn = pool.acquire().await?;
    let chats = chat_repo::list_chats(&mut conn, &member.choir_id).await?;

    let groups = voice_repo::list_active_groups(&mut conn, &member.choir_id).await?;
    let types = voice_repo::list_active_types(&mut conn, &member.choir_id).await?;
    let group_names: HashMap<String, String> =
        groups.into_iter().map(|g| (g.group_id, g.name)).collect();
    let type_names: HashMap<String, String> =
        types.into_iter().map(|t| (t.type_id, t.name)).collect();

    let views = chats
        .into_iter()
        .filter(|chat| {
            targeting_service::is_member_chat_eligible(&member, &chat_target_spec(chat))
        })
        .map(|chat| {
            let scope_label = match (&chat.voice_type_id, &chat.voice_group_id) {
                (Some(type_id), _) => type_names.get(type_id).cloned(),
                (None, Some(group_id)) => group_names.get(group_id).cloned(),
                (None, None) => None,
            };
            ChatView {
                chat_id: chat.chat_id,
                name: chat.name,
                scope_label,
            }
        })
        .collect();
    Ok(Some(views))
}

/// Sending is nothing more than being in the chat's eligible set. Returns
/// `None` when the chat is unknown or outside the member's choir.
pub async fn can_member_send_message(
    pool: &SqlitePool,
    member_id: &str,
    chat_id: &str,
) -> sqlx::Result<Option<bool>> {
    let Some(member) = member_repo::get_active_member_by_id(pool, member_id).await? else {
        return Ok(None);
    };

    let mut conn = pool.acquire().await?;
    let Some(chat) = chat_repo::get_chat_by_id(&mut conn, chat_id).await? else {
        return Ok(None);
    };
    if chat.choir_id != member.choir_id {
        return Ok(None);
    }
    Ok(Some(targeting_service::is_member_chat_eligible(
        &member,
        &chat_target_spec(&chat),
    )))
}

// A specific voice type narrows the chat to that type; only without one does
// the group admit its whole section.
fn chat_target_spec(chat: &ChatRow) -> TargetSpec {
    let mut target = TargetSpec {
        membership_type_ids: targeting_service::parse_id_set(chat.membership_type_ids.as_deref()),
        ..TargetSpec::default()
    };
    if let Some(type_id) = &chat.voice_type_id {
        target.voice_type_ids.insert(type_id.clone());
    } else if let Some(group_id) = &chat.voice_group_id {
        target.voice_group_ids.insert(group_id.clone());
    }
    target
}
