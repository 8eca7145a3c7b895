use crate::moderation::{Moderator, Result, messages};
use torwache_common::model::{
    action::Decision,
    post::{CreatePost, Post, PostContent, PostId, PostStatus},
    user::{ChatId, ChatTarget, MessageId, Submitter, UserId},
};
use torwache_store::Transition;
use tracing::{info, warn};

/// A message the bot sent earlier, e.g. the review prompt whose button was pressed.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct MessageRef {
    pub chat: ChatId,
    pub message: MessageId,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum DecisionOutcome {
    Unauthorized,
    NotFound,
    /// The post had left `pending` before this decision got to it.
    AlreadyDecided(PostStatus),
    Published,
    Rejected,
}

impl Moderator {
    /// Stores a new pending post, confirms it to the submitter and asks the admin for a decision.
    pub async fn submit(
        &self,
        submitter: Submitter,
        chat: ChatId,
        content: PostContent,
    ) -> Result<Post> {
        let post = self
            .store
            .create_post(CreatePost { submitter, content })
            .await?;
        info!(
            post_id = %post.id,
            submitter = %post.submitter.id,
            has_media = post.content.media.is_some(),
            "Post submitted for review"
        );

        self.api
            .send_text(&chat.into(), &messages::submitted(post.id), None)
            .await?;

        let admin: ChatTarget = self.config.admin.into();
        let prompt = messages::review_prompt(&post);
        let keyboard = messages::review_keyboard(post.id);
        match &post.content.media {
            Some(photo) => {
                self.api
                    .send_photo(&admin, photo, &prompt, Some(&keyboard))
                    .await?;
            }
            None => self.api.send_text(&admin, &prompt, Some(&keyboard)).await?,
        }

        Ok(post)
    }

    /// Applies the admin's decision to a pending post.
    ///
    /// The status is swapped before anything is sent, so a post is published at most once
    /// even if the same decision arrives twice or concurrently.
    pub async fn decide(
        &self,
        id: PostId,
        decision: Decision,
        actor: UserId,
        origin: Option<MessageRef>,
    ) -> Result<DecisionOutcome> {
        if !self.is_admin(actor) {
            self.refuse(actor).await?;
            return Ok(DecisionOutcome::Unauthorized);
        }

        let post = match self
            .store
            .transition_post(id, PostStatus::Pending, decision.status())
            .await?
        {
            Transition::Applied(post) => post,
            Transition::Missing => {
                info!(post_id = %id, %decision, "Decision on unknown post");
                self.notify_admin(&messages::not_found(&id.to_string()))
                    .await?;
                return Ok(DecisionOutcome::NotFound);
            }
            Transition::Conflict(current) => {
                info!(post_id = %id, %decision, %current, "Decision on already decided post");
                self.notify_admin(&messages::already_decided(id, current))
                    .await?;
                self.clear_buttons(origin).await;
                return Ok(DecisionOutcome::AlreadyDecided(current));
            }
        };

        let outcome = match decision {
            Decision::Approve => {
                self.publish(&post).await?;
                DecisionOutcome::Published
            }
            Decision::Reject => DecisionOutcome::Rejected,
        };
        info!(post_id = %id, %decision, "Post decided");

        self.api
            .send_text(
                &post.submitter.id.into(),
                &messages::submitter_notice(id, decision, &self.config.channel),
                None,
            )
            .await?;
        self.notify_admin(&messages::admin_confirmation(id, decision))
            .await?;
        self.clear_buttons(origin).await;

        Ok(outcome)
    }

    pub(crate) async fn refuse(&self, actor: UserId) -> Result<()> {
        warn!(%actor, "Moderation attempt by non-admin");
        self.api
            .send_text(&actor.into(), messages::UNAUTHORIZED, None)
            .await?;
        Ok(())
    }

    async fn publish(&self, post: &Post) -> Result<()> {
        let channel = &self.config.channel;
        let text = messages::channel_post(post);
        match &post.content.media {
            Some(photo) => self.api.send_photo(channel, photo, &text, None).await?,
            None => self.api.send_text(channel, &text, None).await?,
        }
        info!(post_id = %post.id, %channel, "Post published");
        Ok(())
    }

    /// Removes the review buttons so they cannot be pressed again. Purely cosmetic.
    async fn clear_buttons(&self, origin: Option<MessageRef>) {
        let Some(MessageRef { chat, message }) = origin else {
            return;
        };
        if let Err(err) = self.api.clear_reply_markup(chat, message).await {
            warn!(error = %err, %chat, "Could not remove review buttons");
        }
    }
}
