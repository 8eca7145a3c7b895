//! Moderation decisions and their encoding in inline button payloads.
//!
//! Buttons carry `action:<approve|reject>:<post id>`. Payloads are parsed into a
//! [`CallbackAction`] as soon as they arrive so nothing downstream touches the raw
//! string.

use crate::model::post::{PostId, PostStatus};
use std::fmt::{Display, Formatter};

const ACTION_PREFIX: &str = "action";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// The status a pending post ends up in.
    #[must_use]
    pub fn status(self) -> PostStatus {
        match self {
            Self::Approve => PostStatus::Approved,
            Self::Reject => PostStatus::Rejected,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum CallbackAction {
    Approve(PostId),
    Reject(PostId),
    Invalid,
}

impl CallbackAction {
    #[must_use]
    pub fn new(decision: Decision, id: PostId) -> Self {
        match decision {
            Decision::Approve => Self::Approve(id),
            Decision::Reject => Self::Reject(id),
        }
    }

    /// Never fails; anything that is not exactly `action:<decision>:<id>` is `Invalid`.
    #[must_use]
    pub fn parse(data: &str) -> Self {
        let parts: Vec<&str> = data.split(':').collect();
        let [prefix, decision, id] = parts.as_slice() else {
            return Self::Invalid;
        };
        if *prefix != ACTION_PREFIX {
            return Self::Invalid;
        }

        let decision = match *decision {
            "approve" => Decision::Approve,
            "reject" => Decision::Reject,
            _ => return Self::Invalid,
        };

        match id.parse() {
            Ok(id) => Self::new(decision, id),
            Err(_) => Self::Invalid,
        }
    }

    #[must_use]
    pub fn decision(self) -> Option<(Decision, PostId)> {
        match self {
            Self::Approve(id) => Some((Decision::Approve, id)),
            Self::Reject(id) => Some((Decision::Reject, id)),
            Self::Invalid => None,
        }
    }

    /// The button payload for this action. `Invalid` has none.
    #[must_use]
    pub fn encode(self) -> Option<String> {
        self.decision()
            .map(|(decision, id)| format!("{ACTION_PREFIX}:{decision}:{id}"))
    }
}
