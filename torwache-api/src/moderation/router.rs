use crate::moderation::{
    Moderator, Result, command::MessageIntent, messages, workflow::MessageRef,
};
use torwache_common::model::{
    action::{CallbackAction, Decision},
    post::PostId,
    user::Submitter,
};
use torwache_telegram::types::{CallbackQuery, Message, Update, User};
use tracing::{debug, info};

/// The part of an update the relay acts on.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum InboundUpdate {
    Message { sender: User, message: Message },
    Callback(CallbackQuery),
    Ignored,
}

impl From<Update> for InboundUpdate {
    /// A message wins over a callback if an update somehow carries both.
    fn from(update: Update) -> Self {
        match update {
            Update {
                message: Some(message),
                ..
            } => match message.from.clone() {
                Some(sender) => Self::Message { sender, message },
                None => Self::Ignored,
            },
            Update {
                callback_query: Some(query),
                ..
            } => Self::Callback(query),
            _ => Self::Ignored,
        }
    }
}

impl Moderator {
    pub async fn handle_update(&self, update: Update) -> Result<()> {
        let update_id = update.update_id;
        match InboundUpdate::from(update) {
            InboundUpdate::Message { sender, message } => {
                self.handle_message(&sender, &message).await
            }
            InboundUpdate::Callback(query) => {
                self.api.answer_callback(&query.id).await?;
                self.handle_callback(&query).await
            }
            InboundUpdate::Ignored => {
                debug!(update_id, "Ignoring update without message or callback");
                Ok(())
            }
        }
    }

    async fn handle_message(&self, sender: &User, message: &Message) -> Result<()> {
        let chat = message.chat.id;
        match MessageIntent::classify(message) {
            MessageIntent::Greet => {
                self.api
                    .send_text(&chat.into(), &messages::greeting(&sender.first_name), None)
                    .await?;
            }
            MessageIntent::Submit(content) => {
                let submitter = Submitter {
                    id: sender.id,
                    handle: sender.handle(),
                };
                self.submit(submitter, chat, content).await?;
            }
            MessageIntent::Decide { decision, post } => {
                self.handle_decide_command(sender, decision, post.as_deref())
                    .await?;
            }
            MessageIntent::Fallback => {
                self.api
                    .send_text(&chat.into(), messages::FALLBACK, None)
                    .await?;
            }
        }
        Ok(())
    }

    async fn handle_decide_command(
        &self,
        sender: &User,
        decision: Decision,
        post: Option<&str>,
    ) -> Result<()> {
        if !self.is_admin(sender.id) {
            return self.refuse(sender.id).await;
        }

        let Some(raw_id) = post else {
            return self.notify_admin(&messages::usage(decision)).await;
        };
        let Ok(id) = raw_id.parse::<PostId>() else {
            info!(raw_id, %decision, "Decision command with malformed post id");
            return self.notify_admin(&messages::not_found(raw_id)).await;
        };

        self.decide(id, decision, sender.id, None).await?;
        Ok(())
    }

    async fn handle_callback(&self, query: &CallbackQuery) -> Result<()> {
        let data = query.data.as_deref().unwrap_or_default();
        let Some((decision, id)) = CallbackAction::parse(data).decision() else {
            debug!(data, from = %query.from.id, "Ignoring unknown callback data");
            return Ok(());
        };

        let origin = query.message.as_ref().map(|message| MessageRef {
            chat: message.chat.id,
            message: message.message_id,
        });
        let outcome = self.decide(id, decision, query.from.id, origin).await?;
        debug!(post_id = %id, ?outcome, "Handled review button");
        Ok(())
    }
}
