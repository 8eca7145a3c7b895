use crate::model::{Id, user::Submitter};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

pub type PostId = Id<PostMarker>;

/// An opaque Telegram `file_id`, resolvable through the Bot API.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub submitter: Submitter,
    pub content: PostContent,
    pub status: PostStatus,
    pub submitted_at: UtcDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct PostContent {
    pub body: String,
    pub media: Option<FileId>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct CreatePost {
    pub submitter: Submitter,
    pub content: PostContent,
}

#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PostStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether a post in this status may move to `to`. Only `pending` has outgoing edges.
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        matches!((self, to), (Self::Pending, Self::Approved | Self::Rejected))
    }
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        })
    }
}

impl CreatePost {
    /// The pending post this submission becomes once it has an id.
    #[must_use]
    pub fn into_post(self, id: PostId, submitted_at: UtcDateTime) -> Post {
        Post {
            id,
            submitter: self.submitter,
            content: self.content,
            status: PostStatus::Pending,
            submitted_at,
        }
    }
}
