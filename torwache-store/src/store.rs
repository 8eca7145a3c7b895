use async_trait::async_trait;
use thiserror::Error;
use torwache_common::{
    model::post::{CreatePost, Post, PostId, PostStatus},
    snowflake::SnowflakeTimestampError,
};

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not generate a post id: {0}")]
    IdGeneration(#[from] SnowflakeTimestampError),
    #[error("A post with id {0} already exists")]
    DuplicateId(PostId),
    #[error("A post cannot move from {from} to {to}")]
    InvalidTransition { from: PostStatus, to: PostStatus },
}

/// Result of a compare-and-swap on a post's status.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Transition {
    /// The status was swapped; carries the post as it is now.
    Applied(Post),
    /// The post exists but was not in the expected status.
    Conflict(PostStatus),
    Missing,
}

/// Keyed storage for posts.
///
/// Implementations must make [`PostStore::transition_post`] atomic per post: of
/// several concurrent calls expecting the same status, exactly one is `Applied`.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Assigns a fresh id and stores the submission as a pending post.
    async fn create_post(&self, post: CreatePost) -> Result<Post>;

    async fn fetch_post(&self, id: PostId) -> Result<Option<Post>>;

    /// Sets the status of `id` to `to` if and only if it currently is `from`.
    async fn transition_post(
        &self,
        id: PostId,
        from: PostStatus,
        to: PostStatus,
    ) -> Result<Transition>;
}
