use crate::store::{PostStore, Result, StoreError, Transition};
use async_trait::async_trait;
use std::collections::{HashMap, hash_map::Entry};
use tokio::sync::{Mutex, RwLock};
use torwache_common::{
    model::{
        TorwacheSnowflakeGenerator,
        post::{CreatePost, Post, PostId, PostStatus},
    },
    snowflake::{ProcessId, WorkerId},
};
use tracing::debug;

/// Posts kept in process memory. Everything is lost on restart.
#[derive(Debug)]
pub struct MemoryStore {
    posts: RwLock<HashMap<PostId, Post>>,
    snowflake_generator: Mutex<TorwacheSnowflakeGenerator>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(worker_id: WorkerId, process_id: ProcessId) -> Self {
        Self {
            posts: RwLock::default(),
            snowflake_generator: Mutex::new(TorwacheSnowflakeGenerator::new(worker_id, process_id)),
        }
    }

    pub async fn post_count(&self) -> usize {
        self.posts.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(WorkerId::default(), ProcessId::default())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, post: CreatePost) -> Result<Post> {
        let snowflake = self.snowflake_generator.lock().await.generate()?;
        let post = post.into_post(snowflake.into(), snowflake.created_at());

        match self.posts.write().await.entry(post.id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(post.id)),
            Entry::Vacant(entry) => {
                debug!(post_id = %post.id, "Stored new post");
                Ok(entry.insert(post).clone())
            }
        }
    }

    async fn fetch_post(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn transition_post(
        &self,
        id: PostId,
        from: PostStatus,
        to: PostStatus,
    ) -> Result<Transition> {
        if !from.can_transition_to(to) {
            return Err(StoreError::InvalidTransition { from, to });
        }

        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(Transition::Missing);
        };

        if post.status != from {
            debug!(post_id = %id, current = %post.status, expected = %from, "Status conflict");
            return Ok(Transition::Conflict(post.status));
        }

        post.status = to;
        debug!(post_id = %id, %from, %to, "Post transitioned");
        Ok(Transition::Applied(post.clone()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        memory::MemoryStore,
        store::{PostStore, StoreError, Transition},
    };
    use std::sync::Arc;
    use torwache_common::model::{
        post::{CreatePost, FileId, PostContent, PostId, PostStatus},
        user::{Submitter, UserHandle, UserId},
    };

    fn submission(body: &str) -> CreatePost {
        CreatePost {
            submitter: Submitter {
                id: UserId(7),
                handle: UserHandle::new(Some("alice"), "Alice"),
            },
            content: PostContent {
                body: body.to_owned(),
                media: Some(FileId("photo-1".to_owned())),
            },
        }
    }

    #[tokio::test]
    async fn created_posts_are_pending_and_retrievable() {
        let store = MemoryStore::default();

        let post = store.create_post(submission("hello")).await.unwrap();

        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.content.body, "hello");
        assert_eq!(store.fetch_post(post.id).await.unwrap(), Some(post));
        assert_eq!(store.post_count().await, 1);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = MemoryStore::default();

        let first = store.create_post(submission("a")).await.unwrap();
        let second = store.create_post(submission("b")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.post_count().await, 2);
    }

    #[tokio::test]
    async fn unknown_posts_are_missing() {
        let store = MemoryStore::default();
        let id = PostId::from(12_345);

        assert_eq!(store.fetch_post(id).await.unwrap(), None);
        assert_eq!(
            store
                .transition_post(id, PostStatus::Pending, PostStatus::Approved)
                .await
                .unwrap(),
            Transition::Missing
        );
    }

    #[tokio::test]
    async fn transition_happens_at_most_once() {
        let store = MemoryStore::default();
        let post = store.create_post(submission("hello")).await.unwrap();

        let first = store
            .transition_post(post.id, PostStatus::Pending, PostStatus::Rejected)
            .await
            .unwrap();
        match first {
            Transition::Applied(rejected) => assert_eq!(rejected.status, PostStatus::Rejected),
            other => panic!("expected the first transition to apply, got {other:?}"),
        }

        assert_eq!(
            store
                .transition_post(post.id, PostStatus::Pending, PostStatus::Approved)
                .await
                .unwrap(),
            Transition::Conflict(PostStatus::Rejected)
        );
        assert_eq!(
            store.fetch_post(post.id).await.unwrap().unwrap().status,
            PostStatus::Rejected
        );
    }

    #[tokio::test]
    async fn transitions_out_of_terminal_states_are_refused() {
        let store = MemoryStore::default();
        let post = store.create_post(submission("hello")).await.unwrap();

        let result = store
            .transition_post(post.id, PostStatus::Approved, PostStatus::Pending)
            .await;

        assert!(matches!(
            result,
            Err(StoreError::InvalidTransition {
                from: PostStatus::Approved,
                to: PostStatus::Pending
            })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_transitions_have_one_winner() {
        let store = Arc::new(MemoryStore::default());
        let id = store.create_post(submission("race")).await.unwrap().id;

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                let to = if i % 2 == 0 {
                    PostStatus::Approved
                } else {
                    PostStatus::Rejected
                };
                tokio::spawn(async move {
                    store
                        .transition_post(id, PostStatus::Pending, to)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut applied = 0;
        for task in tasks {
            if matches!(task.await.unwrap(), Transition::Applied(_)) {
                applied += 1;
            }
        }

        assert_eq!(applied, 1);
    }
}
