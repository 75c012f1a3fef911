//! WebSocket layer: live stream of newly recorded events.
//!
//! `GET /api/events/{userId}/ws` upgrades to a WebSocket that forwards the
//! user's events as they are recorded. Polling the event list remains the
//! primary read path; the stream only carries events recorded after the
//! connection opened.

pub mod connection;
pub mod handler;
pub mod messages;
