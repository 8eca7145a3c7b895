use crate::server::ServerRouter;
use axum::Router;
use axum_extra::routing::{RouterExt, TypedPath};

pub fn routes() -> ServerRouter {
    Router::new().typed_get(health)
}

#[derive(TypedPath)]
#[typed_path("/")]
struct HealthPath;

#[axum::debug_handler(state = crate::server::ServerState)]
async fn health(_: HealthPath) -> &'static str {
    "Bot is alive"
}
