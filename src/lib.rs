//! # octopulse
//!
//! Relays GitHub webhook events (stars, forks, follows) to a subscribed
//! browser via Web Push.
//!
//! A one-time setup stores the repository a user picked and the browser's
//! push subscription under a generated user id. GitHub then calls
//! `/api/webhook/{userId}`; each mapped delivery is recorded, pushed and
//! broadcast to live streams, and the client polls the event list.
//!
//! ## Architecture
//!
//! ```text
//! Browser / client (client/)        GitHub
//!     │                               │
//!     ├── REST Handlers (api/) ◄──────┘
//!     ├── Live stream (ws/)
//!     │
//!     ├── NotificationService (service/)
//!     │     ├── Webhook dispatcher (domain/)
//!     │     ├── PushSender (push/)
//!     │     └── EventBus (domain/)
//!     │
//!     ├── GitHub REST client (github)
//!     └── SettingsStore (store/: memory or PostgreSQL)
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod github;
pub mod push;
pub mod service;
pub mod store;
pub mod ws;
