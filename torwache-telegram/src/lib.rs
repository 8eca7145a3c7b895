pub mod api;
pub mod client;
pub mod types;

pub use api::{ApiError, MessagingApi};
pub use client::{BotClient, BotToken};
