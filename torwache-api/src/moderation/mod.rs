//! The moderation workflow: submissions come in through direct messages, the admin
//! decides on them, and approved posts are relayed to the channel.

mod command;
mod messages;
mod router;
#[cfg(test)]
pub(crate) mod testing;
mod workflow;

use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};
use thiserror::Error;
use torwache_common::model::user::{ChatTarget, UserId};
use torwache_store::{PostStore, StoreError};
use torwache_telegram::{ApiError, MessagingApi};

pub type Result<T, E = ModerationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Delivering a message failed: {0}")]
    Delivery(#[from] ApiError),
    #[error("Post storage failed: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct ModerationConfig {
    /// The only user allowed to approve or reject posts.
    pub admin: UserId,
    /// Where approved posts are published.
    pub channel: ChatTarget,
}

pub struct Moderator {
    api: Arc<dyn MessagingApi>,
    store: Arc<dyn PostStore>,
    config: ModerationConfig,
}

impl Moderator {
    #[must_use]
    pub fn new(
        api: Arc<dyn MessagingApi>,
        store: Arc<dyn PostStore>,
        config: ModerationConfig,
    ) -> Self {
        Self { api, store, config }
    }

    #[must_use]
    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    fn is_admin(&self, user: UserId) -> bool {
        user == self.config.admin
    }

    async fn notify_admin(&self, text: &str) -> Result<()> {
        self.api
            .send_text(&self.config.admin.into(), text, None)
            .await?;
        Ok(())
    }
}

impl Debug for Moderator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Moderator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
