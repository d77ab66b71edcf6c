use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::member_repo;

#[derive(Clone, Debug)]
pub struct AuthenticatedMember {
    pub member_id: String,
    pub choir_id: String,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
}

// The auth gateway in front of us has already verified the token signature;
// here we only need the subject, and the member must still resolve to an
// active membership in some choir.
pub async fn require_member(
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&request).or_else(|| cookie_token(&request));

    if let Some(token) = token {
        // Parse JWT payload (middle part)
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() == 3 {
            if let Ok(payload_bytes) = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]) {
                if let Ok(payload) = serde_json::from_slice::<JwtPayload>(&payload_bytes) {
                    if let Ok(Some(member)) =
                        member_repo::get_active_member_by_id(&pool, &payload.sub).await
                    {
                        request.extensions_mut().insert(AuthenticatedMember {
                            member_id: member.member_id,
                            choir_id: member.choir_id,
                        });
                        return next.run(request).await;
                    }
                }
            }
        }
    }

    // No valid token, or the subject is no longer an active member
    Response::builder()
        .status(401)
        .body(axum::body::Body::from("Unauthorized"))
        .unwrap()
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

fn cookie_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find(|c| c.starts_with("access_token="))
                .and_then(|c| c.strip_prefix("access_token="))
                .map(|t| t.to_string())
        })
}
