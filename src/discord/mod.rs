//! All Discord-specific functionality

pub mod payload;
pub mod webhook;

pub use payload::{WebhookPayload, build_webhook_payload};
pub use webhook::{DealNotifier, DisabledNotifier, DiscordWebhook, notifier_from_config};
