//! Push notification payloads.
//!
//! The service worker expects a JSON object with `title`, `body` and the
//! `url` to open when the notification is clicked.

use gobarber_core::alerts::AlertKind;
use gobarber_core::eligibility::Alert;
use gobarber_db::models::client::Client;
use serde::{Deserialize, Serialize};

/// URL opened by the aggregate summary and by operator sends without one.
pub const DEFAULT_URL: &str = "/";

/// JSON body delivered to every push endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    pub url: String,
}

impl PushPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
        }
    }

    /// Personalized payload for one client alert, linking to the client.
    pub fn for_client(client: &Client, alert: &Alert) -> Self {
        let name = &client.name;
        let (title, body) = match (alert.kind, alert.days) {
            (AlertKind::BirthdayToday, _) => (
                format!("Today is {name}'s birthday!"),
                "Call or send a message to congratulate them.".to_string(),
            ),
            (AlertKind::BirthdayIn3, days) => (
                format!("Birthday in {} day(s): {name}", days.unwrap_or_default()),
                "Prepare an offer or a reminder.".to_string(),
            ),
            (AlertKind::BirthdayIn7, days) => (
                format!("Upcoming birthday: {name}"),
                format!("{} day(s) until the birthday.", days.unwrap_or_default()),
            ),
            (AlertKind::NoCut15, None) => (
                format!("{name} has no cut on record"),
                "No cut recorded, consider reaching out.".to_string(),
            ),
            (AlertKind::NoCut15, Some(days)) => (
                format!("{name} has not had a cut in {days} days"),
                "Client without a cut for more than 15 days.".to_string(),
            ),
            (AlertKind::NoCut30, days) => (
                format!(
                    "{name} has not had a cut in {} days",
                    days.unwrap_or_default()
                ),
                "Client without a cut for more than 30 days.".to_string(),
            ),
        };

        Self {
            title,
            body,
            url: format!("/?client={}", client.id),
        }
    }
}
