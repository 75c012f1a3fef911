//! Service layer: business logic orchestration.
//!
//! [`NotificationService`] coordinates the settings store, the webhook
//! dispatcher, the push sender and the [`crate::domain::EventBus`].

pub mod notification_service;

pub use notification_service::NotificationService;
