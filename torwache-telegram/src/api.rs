use crate::types::InlineKeyboardMarkup;
use async_trait::async_trait;
use thiserror::Error;
use torwache_common::model::{
    post::FileId,
    user::{ChatId, ChatTarget, MessageId},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to the Bot API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Bot API rejected {method} ({code:?}): {description}")]
    Rejected {
        method: &'static str,
        code: Option<i64>,
        description: String,
    },
}

/// Everything the relay needs from the messaging platform.
///
/// Text and captions are sent as HTML; callers escape user-supplied content.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    async fn send_text(
        &self,
        target: &ChatTarget,
        text: &str,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError>;

    async fn send_photo(
        &self,
        target: &ChatTarget,
        photo: &FileId,
        caption: &str,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError>;

    /// Stops the loading indicator on the pressed button.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), ApiError>;

    /// Removes all inline buttons from a message the bot sent earlier.
    async fn clear_reply_markup(&self, chat: ChatId, message: MessageId) -> Result<(), ApiError>;
}
