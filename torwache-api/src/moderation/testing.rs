//! Test doubles for driving the moderator without a real bot.

use crate::moderation::{ModerationConfig, Moderator};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use torwache_common::model::{
    post::FileId,
    user::{ChatId, ChatTarget, MessageId, Submitter, UserHandle, UserId},
};
use torwache_store::MemoryStore;
use torwache_telegram::{
    ApiError, MessagingApi,
    types::{CallbackQuery, Chat, InlineKeyboardMarkup, Message, Update, User},
};

pub const ADMIN: UserId = UserId(1000);
pub const USER: UserId = UserId(77);

pub fn channel() -> ChatTarget {
    ChatTarget::Username("@jumarket".to_owned())
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Sent {
    Text {
        target: ChatTarget,
        text: String,
        buttons: Option<InlineKeyboardMarkup>,
    },
    Photo {
        target: ChatTarget,
        photo: FileId,
        caption: String,
        buttons: Option<InlineKeyboardMarkup>,
    },
    CallbackAnswer(String),
    ClearedButtons {
        chat: ChatId,
        message: MessageId,
    },
}

impl Sent {
    fn target(&self) -> Option<&ChatTarget> {
        match self {
            Self::Text { target, .. } | Self::Photo { target, .. } => Some(target),
            Self::CallbackAnswer(_) | Self::ClearedButtons { .. } => None,
        }
    }
}

/// Records every call; methods named in `failing` are rejected without being recorded.
#[derive(Debug, Default)]
pub struct RecordingApi {
    sent: Mutex<Vec<Sent>>,
    failing: Mutex<Vec<&'static str>>,
}

impl RecordingApi {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn sent_to(&self, target: &ChatTarget) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|sent| sent.target() == Some(target))
            .collect()
    }

    pub fn clear(&self) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn fail(&self, method: &'static str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(method);
    }

    fn record(&self, method: &'static str, sent: Sent) -> Result<(), ApiError> {
        let failing = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&method);
        if failing {
            return Err(ApiError::Rejected {
                method,
                code: Some(400),
                description: "Bad Request: simulated failure".to_owned(),
            });
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sent);
        Ok(())
    }
}

#[async_trait]
impl MessagingApi for RecordingApi {
    async fn send_text(
        &self,
        target: &ChatTarget,
        text: &str,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError> {
        self.record(
            "send_text",
            Sent::Text {
                target: target.clone(),
                text: text.to_owned(),
                buttons: markup.cloned(),
            },
        )
    }

    async fn send_photo(
        &self,
        target: &ChatTarget,
        photo: &FileId,
        caption: &str,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError> {
        self.record(
            "send_photo",
            Sent::Photo {
                target: target.clone(),
                photo: photo.clone(),
                caption: caption.to_owned(),
                buttons: markup.cloned(),
            },
        )
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), ApiError> {
        self.record(
            "answer_callback",
            Sent::CallbackAnswer(callback_id.to_owned()),
        )
    }

    async fn clear_reply_markup(&self, chat: ChatId, message: MessageId) -> Result<(), ApiError> {
        self.record("clear_reply_markup", Sent::ClearedButtons { chat, message })
    }
}

pub fn fixture() -> (Moderator, Arc<RecordingApi>, Arc<MemoryStore>) {
    let api = Arc::new(RecordingApi::default());
    let store = Arc::new(MemoryStore::default());
    let moderator = Moderator::new(
        api.clone(),
        store.clone(),
        ModerationConfig {
            admin: ADMIN,
            channel: channel(),
        },
    );
    (moderator, api, store)
}

pub fn user(id: UserId) -> User {
    User {
        id,
        is_bot: false,
        first_name: if id == ADMIN { "Admin" } else { "Alice" }.to_owned(),
        username: (id == USER).then(|| "alice".to_owned()),
    }
}

pub fn submitter() -> Submitter {
    Submitter {
        id: USER,
        handle: UserHandle::Username("alice".to_owned()),
    }
}

pub fn message_update(from: UserId, text: &str) -> Update {
    Update {
        update_id: 1,
        message: Some(Message {
            message_id: MessageId(10),
            from: Some(user(from)),
            chat: Chat { id: from.into() },
            text: Some(text.to_owned()),
            ..Message::default()
        }),
        callback_query: None,
    }
}

pub fn callback_update(from: UserId, data: &str) -> Update {
    Update {
        update_id: 2,
        message: None,
        callback_query: Some(CallbackQuery {
            id: "cb-1".to_owned(),
            from: user(from),
            message: Some(Message {
                message_id: MessageId(20),
                chat: Chat { id: ADMIN.into() },
                ..Message::default()
            }),
            data: Some(data.to_owned()),
        }),
    }
}
