use crate::{
    api::{ApiError, MessagingApi},
    types::InlineKeyboardMarkup,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use torwache_common::model::{
    post::FileId,
    user::{ChatId, ChatTarget, MessageId},
};
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

const PARSE_MODE: &str = "HTML";

#[derive(Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(transparent)]
pub struct BotToken(String);

impl BotToken {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for BotToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BotToken").field(&"[redacted]").finish()
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a ChatTarget,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct SendPhoto<'a> {
    chat_id: &'a ChatTarget,
    photo: &'a FileId,
    caption: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
}

#[derive(Serialize)]
struct EditMessageReplyMarkup {
    chat_id: ChatId,
    message_id: MessageId,
    reply_markup: InlineKeyboardMarkup,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    error_code: Option<i64>,
    description: Option<String>,
}

/// [`MessagingApi`] backed by the Telegram Bot API over HTTPS.
#[derive(Clone, Debug)]
pub struct BotClient {
    http: Client,
    api_url: String,
    token: BotToken,
}

impl BotClient {
    #[must_use]
    pub fn new(token: BotToken) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    #[must_use]
    pub fn with_api_url(token: BotToken, api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }

        Self {
            http: Client::new(),
            api_url,
            token,
        }
    }

    async fn call<P>(&self, method: &'static str, payload: &P) -> Result<(), ApiError>
    where
        P: Serialize + Sync,
    {
        // The token is part of the path; strip urls from errors so it never ends up in logs.
        let url = format!("{}/bot{}/{method}", self.api_url, self.token.expose());
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        if body.ok {
            debug!(method, "Bot API call succeeded");
            Ok(())
        } else {
            warn!(method, %status, description = ?body.description, "Bot API call rejected");
            Err(ApiError::Rejected {
                method,
                code: body.error_code,
                description: body.description.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl MessagingApi for BotClient {
    async fn send_text(
        &self,
        target: &ChatTarget,
        text: &str,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError> {
        self.call(
            "sendMessage",
            &SendMessage {
                chat_id: target,
                text,
                parse_mode: PARSE_MODE,
                reply_markup: markup,
            },
        )
        .await
    }

    async fn send_photo(
        &self,
        target: &ChatTarget,
        photo: &FileId,
        caption: &str,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError> {
        self.call(
            "sendPhoto",
            &SendPhoto {
                chat_id: target,
                photo,
                caption,
                parse_mode: PARSE_MODE,
                reply_markup: markup,
            },
        )
        .await
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), ApiError> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQuery {
                callback_query_id: callback_id,
            },
        )
        .await
    }

    async fn clear_reply_markup(&self, chat: ChatId, message: MessageId) -> Result<(), ApiError> {
        self.call(
            "editMessageReplyMarkup",
            &EditMessageReplyMarkup {
                chat_id: chat,
                message_id: message,
                reply_markup: InlineKeyboardMarkup::empty(),
            },
        )
        .await
    }
}
