//! Domain layer: identifiers, records, the webhook dispatcher and the
//! event bus.

pub mod dispatch;
pub mod event_bus;
pub mod github_event;
pub mod user_id;
pub mod user_settings;

pub use dispatch::{Notification, WebhookPayload, dispatch};
pub use event_bus::{EventBus, RecordedEvent};
pub use github_event::{EventKind, GitHubEvent};
pub use user_id::UserId;
pub use user_settings::{PushKeys, PushSubscription, UserSettings};
