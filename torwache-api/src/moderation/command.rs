use torwache_common::model::{action::Decision, post::PostContent};
use torwache_telegram::types::Message;

const START: &str = "/start";
const POST: &str = "/post";
const APPROVE: &str = "/approve";
const REJECT: &str = "/reject";

/// What an inbound chat message asks the bot to do.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum MessageIntent {
    Greet,
    Submit(PostContent),
    /// `post` is the id exactly as typed, if one was given at all.
    Decide {
        decision: Decision,
        post: Option<String>,
    },
    Fallback,
}

/// Splits `/command@bot rest` into `("/command", "rest")`.
fn split_command(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with('/') {
        return None;
    }

    let (token, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let command = token.split_once('@').map_or(token, |(command, _bot)| command);
    Some((command, rest.trim()))
}

impl MessageIntent {
    pub fn classify(message: &Message) -> Self {
        let text = message.text.as_deref().unwrap_or_default();
        let command = split_command(text);

        if let Some((START, _)) = command {
            return Self::Greet;
        }

        if let Some(photo) = message.largest_photo()
            && text.trim().is_empty()
        {
            let caption = message.caption.as_deref().unwrap_or_default();
            let body = match split_command(caption) {
                Some((POST, rest)) => rest,
                _ => caption.trim(),
            };
            return Self::Submit(PostContent {
                body: body.to_owned(),
                media: Some(photo.file_id.clone()),
            });
        }

        match command {
            Some((POST, rest)) => Self::Submit(PostContent {
                body: rest.to_owned(),
                media: None,
            }),
            Some((APPROVE, rest)) => Self::decide(Decision::Approve, rest),
            Some((REJECT, rest)) => Self::decide(Decision::Reject, rest),
            _ => Self::Fallback,
        }
    }

    fn decide(decision: Decision, arguments: &str) -> Self {
        Self::Decide {
            decision,
            post: arguments.split_whitespace().next().map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::moderation::command::MessageIntent;
    use torwache_common::model::{
        action::Decision,
        post::{FileId, PostContent},
    };
    use torwache_telegram::types::{Message, PhotoSize};

    fn text(text: &str) -> Message {
        Message {
            text: Some(text.to_owned()),
            ..Message::default()
        }
    }

    fn photo(caption: Option<&str>) -> Message {
        Message {
            caption: caption.map(str::to_owned),
            photo: vec![
                PhotoSize {
                    file_id: FileId("thumb".to_owned()),
                    width: 90,
                    height: 90,
                },
                PhotoSize {
                    file_id: FileId("full".to_owned()),
                    width: 1280,
                    height: 1280,
                },
            ],
            ..Message::default()
        }
    }

    fn submission(body: &str, media: Option<&str>) -> MessageIntent {
        MessageIntent::Submit(PostContent {
            body: body.to_owned(),
            media: media.map(|id| FileId(id.to_owned())),
        })
    }

    #[test]
    fn post_command_strips_the_command() {
        assert_eq!(
            MessageIntent::classify(&text("/post hello world")),
            submission("hello world", None)
        );
        assert_eq!(
            MessageIntent::classify(&text("/post@relay_bot   spaced out  ")),
            submission("spaced out", None)
        );
        assert_eq!(
            MessageIntent::classify(&text("/post\nline one\nline two")),
            submission("line one\nline two", None)
        );
        assert_eq!(MessageIntent::classify(&text("/post")), submission("", None));
    }

    #[test]
    fn photos_are_submissions() {
        assert_eq!(
            MessageIntent::classify(&photo(None)),
            submission("", Some("full"))
        );
        assert_eq!(
            MessageIntent::classify(&photo(Some("nice bike"))),
            submission("nice bike", Some("full"))
        );
        assert_eq!(
            MessageIntent::classify(&photo(Some("/post nice bike"))),
            submission("nice bike", Some("full"))
        );
    }

    #[test]
    fn plain_text_is_not_a_submission() {
        assert_eq!(MessageIntent::classify(&text("hello")), MessageIntent::Fallback);
        assert_eq!(
            MessageIntent::classify(&text("/postcard please")),
            MessageIntent::Fallback
        );
        assert_eq!(
            MessageIntent::classify(&text("  /post hi")),
            MessageIntent::Fallback
        );
        assert_eq!(
            MessageIntent::classify(&Message::default()),
            MessageIntent::Fallback
        );
    }

    #[test]
    fn start_greets() {
        assert_eq!(MessageIntent::classify(&text("/start")), MessageIntent::Greet);
        assert_eq!(
            MessageIntent::classify(&text("/start@relay_bot deep-link")),
            MessageIntent::Greet
        );
    }

    #[test]
    fn decision_commands_keep_the_raw_id() {
        assert_eq!(
            MessageIntent::classify(&text("/approve 123 extra")),
            MessageIntent::Decide {
                decision: Decision::Approve,
                post: Some("123".to_owned())
            }
        );
        assert_eq!(
            MessageIntent::classify(&text("/reject abc")),
            MessageIntent::Decide {
                decision: Decision::Reject,
                post: Some("abc".to_owned())
            }
        );
        assert_eq!(
            MessageIntent::classify(&text("/reject")),
            MessageIntent::Decide {
                decision: Decision::Reject,
                post: None
            }
        );
    }
}
