use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

/// A Telegram user id.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// A Telegram chat id. For private chats this equals the [`UserId`] of the other party.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChatId(pub i64);

/// A message id, unique within its chat.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl From<UserId> for ChatId {
    fn from(value: UserId) -> Self {
        Self(value.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Display for ChatId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Where an outgoing message goes: a numeric chat or a public `@username`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Id(ChatId),
    Username(String),
}

impl From<ChatId> for ChatTarget {
    fn from(value: ChatId) -> Self {
        Self::Id(value)
    }
}

impl From<UserId> for ChatTarget {
    fn from(value: UserId) -> Self {
        Self::Id(value.into())
    }
}

impl FromStr for ChatTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse() {
            Ok(id) => Self::Id(ChatId(id)),
            Err(_) if s.starts_with('@') => Self::Username(s.to_owned()),
            Err(_) => Self::Username(format!("@{s}")),
        })
    }
}

impl Display for ChatTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => Display::fmt(id, f),
            Self::Username(username) => f.write_str(username),
        }
    }
}

/// How a user is shown to others. Not an identity.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
pub enum UserHandle {
    Username(String),
    Name(String),
}

impl UserHandle {
    /// Prefers the `@username` and falls back to the first name for users without one.
    #[must_use]
    pub fn new(username: Option<&str>, first_name: &str) -> Self {
        match username.map(str::trim) {
            Some(username) if !username.is_empty() => Self::Username(username.to_owned()),
            _ => Self::Name(first_name.trim().to_owned()),
        }
    }
}

impl Default for UserHandle {
    fn default() -> Self {
        Self::Name(String::new())
    }
}

impl Display for UserHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username(username) => write!(f, "@{username}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Submitter {
    pub id: UserId,
    pub handle: UserHandle,
}
