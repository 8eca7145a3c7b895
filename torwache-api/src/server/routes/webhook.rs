use crate::{
    moderation::Moderator,
    server::{Result, ServerRouter},
};
use axum::{Router, body::Bytes, extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use std::sync::Arc;
use torwache_telegram::types::Update;
use tracing::{debug, warn};

pub fn routes() -> ServerRouter {
    Router::new().typed_post(webhook)
}

#[derive(TypedPath)]
#[typed_path("/api/webhook")]
struct WebhookPath;

/// Telegram retries deliveries that are not answered with 200, so bodies that don't parse
/// as an update are dropped instead of rejected.
#[axum::debug_handler(state = crate::server::ServerState)]
async fn webhook(
    _: WebhookPath,
    State(moderator): State<Arc<Moderator>>,
    body: Bytes,
) -> Result<StatusCode> {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(err) => {
            warn!(error = %err, "Dropping webhook body that is not an update");
            return Ok(StatusCode::OK);
        }
    };

    debug!(update_id = update.update_id, "Received update");
    moderator.handle_update(update).await?;
    Ok(StatusCode::OK)
}
