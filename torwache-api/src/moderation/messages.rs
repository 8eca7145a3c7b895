//! Everything the bot says. All output is sent with HTML parse mode.

use torwache_common::model::{
    action::{CallbackAction, Decision},
    post::{Post, PostId, PostStatus},
    user::ChatTarget,
};
use torwache_telegram::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const UNAUTHORIZED: &str = "Only the admin can approve or reject posts.";

pub const FALLBACK: &str = "I received your message. To submit a post for the channel, \
    use /post &lt;description&gt; and attach a photo (optional).";

const APPROVE_LABEL: &str = "✅ Approve";
const REJECT_LABEL: &str = "❌ Reject";

/// Telegram counts these after entity parsing, so escapes count as one character.
const TEXT_LIMIT: usize = 4096;
const CAPTION_LIMIT: usize = 1024;

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn greeting(first_name: &str) -> String {
    let name = escape_html(first_name);
    format!(
        "Hello {name}! Use /post &lt;description&gt; and attach a photo (optional) \
        to post for approval."
    )
}

pub fn submitted(id: PostId) -> String {
    format!("Thanks! Your post is submitted for admin approval (post id: {id}).")
}

/// `header` and `body` are unescaped; the body is cut short so the whole message fits `limit`.
fn fit(header: &str, body: &str, limit: usize) -> String {
    let room = limit.saturating_sub(header.chars().count());
    if body.chars().count() <= room {
        return format!("{}{}", escape_html(header), escape_html(body));
    }

    let truncated: String = body.chars().take(room.saturating_sub(1)).collect();
    format!("{}{}…", escape_html(header), escape_html(&truncated))
}

fn limit_for(post: &Post) -> usize {
    if post.content.media.is_some() {
        CAPTION_LIMIT
    } else {
        TEXT_LIMIT
    }
}

pub fn review_prompt(post: &Post) -> String {
    let header = format!("New post (id: {}) from {}\n\n", post.id, post.submitter.handle);
    fit(&header, &post.content.body, limit_for(post))
}

pub fn review_keyboard(id: PostId) -> InlineKeyboardMarkup {
    let button = |label: &str, action: CallbackAction| {
        InlineKeyboardButton::callback(label, action.encode().unwrap_or_default())
    };

    InlineKeyboardMarkup::row(vec![
        button(APPROVE_LABEL, CallbackAction::Approve(id)),
        button(REJECT_LABEL, CallbackAction::Reject(id)),
    ])
}

pub fn channel_post(post: &Post) -> String {
    let header = format!("Post by {}\n\n", post.submitter.handle);
    fit(&header, &post.content.body, limit_for(post))
}

pub fn submitter_notice(id: PostId, decision: Decision, channel: &ChatTarget) -> String {
    match decision {
        Decision::Approve => format!(
            "Your post (id: {id}) has been approved and posted to {}.",
            escape_html(&channel.to_string())
        ),
        Decision::Reject => format!("Your post (id: {id}) has been rejected by the admin."),
    }
}

pub fn admin_confirmation(id: PostId, decision: Decision) -> String {
    match decision {
        Decision::Approve => format!("Post {id} approved and posted."),
        Decision::Reject => format!("Post {id} rejected."),
    }
}

/// Takes the raw id as typed, since it may not even be a valid id.
pub fn not_found(id: &str) -> String {
    format!("Post {} not found.", escape_html(id))
}

pub fn already_decided(id: PostId, status: PostStatus) -> String {
    format!("Post {id} was already {status}. Nothing was changed.")
}

pub fn usage(decision: Decision) -> String {
    format!("Usage: /{decision} &lt;post id&gt;")
}

#[cfg(test)]
mod tests {
    use crate::moderation::messages::{
        CAPTION_LIMIT, TEXT_LIMIT, channel_post, escape_html, review_keyboard, review_prompt,
    };
    use time::macros::utc_datetime;
    use torwache_common::model::{
        post::{FileId, Post, PostContent, PostId, PostStatus},
        user::{Submitter, UserHandle, UserId},
    };

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    fn post(handle: &str, body: &str, media: Option<&str>) -> Post {
        Post {
            id: PostId::from(5),
            submitter: Submitter {
                id: UserId(1),
                handle: UserHandle::new(None, handle),
            },
            content: PostContent {
                body: body.to_owned(),
                media: media.map(|id| FileId(id.to_owned())),
            },
            status: PostStatus::Pending,
            submitted_at: utc_datetime!(2026-10-19 08:15),
        }
    }

    #[test]
    fn prompt_escapes_user_content() {
        let post = post("<script>", "1 < 2", None);

        assert_eq!(
            review_prompt(&post),
            "New post (id: 5) from &lt;script&gt;\n\n1 &lt; 2"
        );
    }

    #[test]
    fn long_captions_are_cut_to_the_caption_limit() {
        let body = "<".repeat(CAPTION_LIMIT);
        let post = post("Bob", &body, Some("photo-1"));

        let prompt = review_prompt(&post);
        let shown = prompt.replace("&lt;", "<");
        assert_eq!(shown.chars().count(), CAPTION_LIMIT);
        assert!(shown.starts_with("New post (id: 5) from Bob\n\n<<<"));
        assert!(shown.ends_with("<…"));

        let published = channel_post(&post).replace("&lt;", "<");
        assert_eq!(published.chars().count(), CAPTION_LIMIT);
    }

    #[test]
    fn text_posts_use_the_message_limit() {
        let short = post("Bob", "hello", None);
        assert_eq!(channel_post(&short), "Post by Bob\n\nhello");

        let long = post("Bob", &"a".repeat(TEXT_LIMIT), None);
        let prompt = review_prompt(&long);
        assert_eq!(prompt.chars().count(), TEXT_LIMIT);
        assert!(prompt.ends_with("a…"));
    }

    #[test]
    fn keyboard_carries_both_actions() {
        let keyboard = review_keyboard(PostId::from(31));

        let data: Vec<_> = keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| button.callback_data.as_str())
            .collect();
        assert_eq!(data, ["action:approve:31", "action:reject:31"]);
    }
}
