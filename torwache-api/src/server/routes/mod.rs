use crate::server::ServerRouter;
use axum::Router;

mod health;
mod webhook;

pub fn routes() -> ServerRouter {
    Router::new()
        .merge(health::routes())
        .merge(webhook::routes())
}
