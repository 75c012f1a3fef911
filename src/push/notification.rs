//! What the browser shows when a push arrives.
//!
//! The service worker served at `/sw.js` reads the pushed JSON and displays
//! its `title` and `body` with a fixed icon and badge.
//! [`DisplayedNotification`] is the same transformation on the server side,
//! used to document and test the contract.

use serde::Serialize;

use super::PushMessage;

/// Icon and badge shown with every notification.
pub const NOTIFICATION_ICON: &str = "/icon-192x192.png";

/// Service worker script handling `push` events.
pub const SERVICE_WORKER_JS: &str = include_str!("../../assets/sw.js");

/// Options passed to `registration.showNotification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedNotification {
    /// Notification headline.
    pub title: String,
    /// Notification text.
    pub body: String,
    /// Large icon URL.
    pub icon: &'static str,
    /// Monochrome badge URL.
    pub badge: &'static str,
}

impl DisplayedNotification {
    /// Decodes push data the way the service worker does.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the data is not a `{title, body}` object.
    pub fn from_push_data(data: &[u8]) -> Result<Self, serde_json::Error> {
        let message: PushMessage = serde_json::from_slice(data)?;
        Ok(message.into())
    }
}

impl From<PushMessage> for DisplayedNotification {
    fn from(message: PushMessage) -> Self {
        Self {
            title: message.title,
            body: message.body,
            icon: NOTIFICATION_ICON,
            badge: NOTIFICATION_ICON,
        }
    }
}
