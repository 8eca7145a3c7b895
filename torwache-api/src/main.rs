use crate::{
    moderation::{ModerationConfig, Moderator},
    server::ServerState,
};
use serde::Deserialize;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};
use thiserror::Error;
use torwache_common::{
    model::user::{ChatTarget, UserId},
    snowflake::{ProcessId, WorkerId},
};
use torwache_store::MemoryStore;
use torwache_telegram::{BotClient, BotToken, client::DEFAULT_API_URL};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod moderation;
mod server;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("BOT_TOKEN is empty")]
    EmptyBotToken,
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    bot_token: BotToken,
    admin_id: i64,
    #[serde(default = "default_channel")]
    channel_username: String,
    #[serde(default = "default_server_address")]
    server_address: IpAddr,
    #[serde(default = "default_server_port")]
    server_port: u16,
    #[serde(default = "default_api_url")]
    telegram_api_url: String,
    #[serde(default)]
    worker_id: WorkerId,
    #[serde(default)]
    process_id: ProcessId,
}

impl Env {
    /// Blank values count as unset, like a missing variable.
    fn validate(mut self) -> Result<Self, InitError> {
        if self.bot_token.is_empty() {
            return Err(InitError::EmptyBotToken);
        }
        if self.channel_username.trim().is_empty() {
            self.channel_username = default_channel();
        }
        Ok(self)
    }

    fn channel(&self) -> ChatTarget {
        let Ok(channel) = self.channel_username.trim().parse::<ChatTarget>();
        channel
    }
}

fn default_channel() -> String {
    "@jumarket".to_owned()
}

fn default_server_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_server_port() -> u16 {
    3000
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "torwache_api=debug,\
                torwache_store=debug,\
                torwache_telegram=debug,\
                tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env::<Env>()?.validate()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let config = ModerationConfig {
        admin: UserId(env.admin_id),
        channel: env.channel(),
    };
    let api = BotClient::with_api_url(env.bot_token, env.telegram_api_url);
    let store = MemoryStore::new(env.worker_id, env.process_id);
    let moderator = Moderator::new(Arc::new(api), Arc::new(store), config);
    info!(
        admin = %moderator.config().admin,
        channel = %moderator.config().channel,
        "Moderation configured"
    );

    let tracing_layer = TraceLayer::new_for_http();
    let app = server::routes()
        .with_state(ServerState {
            moderator: Arc::new(moderator),
        })
        .layer(tracing_layer);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(InitError::TcpBind)?;
    info!(%server_address, "Listening for webhook updates");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InitError::TcpServe)?;

    Ok(())
}
