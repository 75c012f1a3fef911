//! Maps GitHub webhook deliveries to notification records.
//!
//! The mapping is a static table keyed on the `X-GitHub-Event` header and
//! the payload's `action` field:
//!
//! | event    | action    | kind       | title           |
//! |----------|-----------|------------|-----------------|
//! | `star`   | `created` | `star`     | `New Star!`     |
//! | `watch`  | `started` | `star`     | `New Star!`     |
//! | `fork`   | any       | `follower` | `New Fork!`     |
//! | `follow` | `created` | `follower` | `New Follower!` |
//!
//! Everything else produces nothing. Payloads are decoded into a typed view
//! whose fields are all optional, so a malformed delivery is dropped rather
//! than reported.

use serde::Deserialize;

use super::{EventKind, GitHubEvent};

/// Account that triggered a delivery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sender {
    /// GitHub login, e.g. `"octocat"`.
    pub login: Option<String>,
}

/// Repository a delivery refers to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    /// Full name, e.g. `"octocat/hello-world"`.
    pub full_name: Option<String>,
}

/// The subset of a webhook payload the dispatcher reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    /// Activity type within the event, e.g. `"created"`.
    pub action: Option<String>,
    /// Repository the event happened on, absent for account events.
    pub repository: Option<Repository>,
    /// Account that performed the action.
    pub sender: Option<Sender>,
}

impl WebhookPayload {
    /// Decodes a raw request body.
    ///
    /// Bodies that are not a JSON object, or whose known fields have
    /// unexpected types, decode to an empty payload.
    #[must_use]
    pub fn decode(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    fn sender_login(&self) -> Option<&str> {
        self.sender.as_ref()?.login.as_deref()
    }

    fn repo_full_name(&self) -> Option<&str> {
        self.repository.as_ref()?.full_name.as_deref()
    }
}

/// A notification chosen by the dispatcher but not yet recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Notification category.
    pub kind: EventKind,
    /// Headline shown to the user.
    pub title: &'static str,
    /// Rendered description.
    pub body: String,
}

impl Notification {
    /// Stamps the notification with an id and timestamp.
    #[must_use]
    pub fn into_event(self) -> GitHubEvent {
        GitHubEvent::new(self.kind, self.title, self.body)
    }
}

/// Selects the notification for a delivery, if any.
///
/// Returns `None` for unmapped event/action pairs and for mapped events
/// missing a field the message needs.
#[must_use]
pub fn dispatch(event_type: &str, payload: &WebhookPayload) -> Option<Notification> {
    match (event_type, payload.action()) {
        ("star", Some("created")) | ("watch", Some("started")) => {
            let repo = payload.repo_full_name()?;
            let login = payload.sender_login()?;
            Some(Notification {
                kind: EventKind::Star,
                title: "New Star!",
                body: format!("Your repository {repo} received a new star from @{login}."),
            })
        }
        ("fork", _) => {
            let repo = payload.repo_full_name()?;
            let login = payload.sender_login()?;
            Some(Notification {
                kind: EventKind::Follower,
                title: "New Fork!",
                body: format!("@{login} forked your repository {repo}."),
            })
        }
        ("follow", Some("created")) => {
            let login = payload.sender_login()?;
            Some(Notification {
                kind: EventKind::Follower,
                title: "New Follower!",
                body: format!("You have a new follower: @{login}."),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> WebhookPayload {
        WebhookPayload::decode(json.to_string().as_bytes())
    }

    fn repo_event(action: &str) -> WebhookPayload {
        payload(serde_json::json!({
            "action": action,
            "repository": { "full_name": "octocat/hello-world", "id": 1296269 },
            "sender": { "login": "hubot", "id": 2 }
        }))
    }

    #[test]
    fn star_created_is_a_star() {
        let Some(n) = dispatch("star", &repo_event("created")) else {
            panic!("star/created should map");
        };
        assert_eq!(n.kind, EventKind::Star);
        assert_eq!(n.title, "New Star!");
        assert_eq!(
            n.body,
            "Your repository octocat/hello-world received a new star from @hubot."
        );
    }

    #[test]
    fn watch_started_is_a_star() {
        let Some(n) = dispatch("watch", &repo_event("started")) else {
            panic!("watch/started should map");
        };
        assert_eq!(n.kind, EventKind::Star);
    }

    #[test]
    fn star_deleted_is_ignored() {
        assert!(dispatch("star", &repo_event("deleted")).is_none());
    }

    #[test]
    fn fork_is_follower_styled() {
        let Some(n) = dispatch("fork", &repo_event("")) else {
            panic!("fork should map");
        };
        assert_eq!(n.kind, EventKind::Follower);
        assert_eq!(n.title, "New Fork!");
        assert!(n.body.contains("hubot"));
        assert!(n.body.contains("octocat/hello-world"));
    }

    #[test]
    fn fork_without_action_still_maps() {
        let p = payload(serde_json::json!({
            "repository": { "full_name": "octocat/hello-world" },
            "sender": { "login": "hubot" }
        }));
        assert!(dispatch("fork", &p).is_some());
    }

    #[test]
    fn follow_created_needs_only_sender() {
        let p = payload(serde_json::json!({
            "action": "created",
            "sender": { "login": "mona" }
        }));
        let Some(n) = dispatch("follow", &p) else {
            panic!("follow/created should map");
        };
        assert_eq!(n.kind, EventKind::Follower);
        assert_eq!(n.body, "You have a new follower: @mona.");
    }

    #[test]
    fn unmapped_events_are_ignored() {
        for event in ["issues", "issue", "push", "ping", "pull_request", ""] {
            assert!(dispatch(event, &repo_event("created")).is_none(), "{event}");
        }
    }

    #[test]
    fn mapped_event_missing_fields_fails_closed() {
        let no_repo = payload(serde_json::json!({
            "action": "created",
            "sender": { "login": "hubot" }
        }));
        assert!(dispatch("star", &no_repo).is_none());

        let no_sender = payload(serde_json::json!({
            "repository": { "full_name": "octocat/hello-world" }
        }));
        assert!(dispatch("fork", &no_sender).is_none());
    }

    #[test]
    fn non_json_body_decodes_to_empty_payload() {
        let p = WebhookPayload::decode(b"payload=%7B%7D");
        assert!(p.action.is_none());
        assert!(dispatch("star", &p).is_none());
    }

    #[test]
    fn wrongly_typed_fields_decode_to_empty_payload() {
        let p = payload(serde_json::json!({ "action": 42, "sender": "hubot" }));
        assert!(p.action.is_none());
        assert!(p.sender.is_none());
    }

    #[test]
    fn into_event_assigns_fresh_ids() {
        let Some(n) = dispatch("star", &repo_event("created")) else {
            panic!("star/created should map");
        };
        let a = n.clone().into_event();
        let b = n.into_event();
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "New Star!");
    }
}
