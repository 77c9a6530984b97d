//! Aggregate summary construction.
//!
//! [`AlertBuckets::collect`] runs the eligibility evaluator over every
//! client and files each client name under the alert kinds it qualifies
//! for. [`AlertBuckets::summary`] renders the buckets into the single push
//! payload sent by the scheduler.

use chrono::NaiveDate;
use gobarber_core::alerts::AlertKind;
use gobarber_core::eligibility::evaluate;
use gobarber_core::preferences::AlertPreferences;
use gobarber_db::models::client::Client;

use crate::payload::{PushPayload, DEFAULT_URL};

/// Names listed per category before the rest are elided.
pub const PREVIEW_NAMES: usize = 5;

/// Separator between category phrases in the summary body.
const PHRASE_SEPARATOR: &str = " · ";

/// Client names grouped by alert kind, in [`AlertKind::ALL`] order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlertBuckets {
    names: [Vec<String>; AlertKind::ALL.len()],
}

impl AlertBuckets {
    /// Evaluate every client and bucket the results.
    ///
    /// A client whose dates cannot be parsed is logged and skipped; it never
    /// aborts the run.
    pub fn collect(clients: &[Client], today: NaiveDate, prefs: &AlertPreferences) -> Self {
        let mut buckets = Self::default();

        for client in clients {
            match evaluate(&client.birthday, client.last_cut.as_deref(), today, prefs) {
                Ok(alerts) => {
                    for alert in alerts {
                        buckets.push(alert.kind, client.name.clone());
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        client_id = client.id,
                        error = %e,
                        "Skipping client with invalid dates"
                    );
                }
            }
        }

        buckets
    }

    pub fn push(&mut self, kind: AlertKind, name: String) {
        self.names[kind.index()].push(name);
    }

    pub fn names(&self, kind: AlertKind) -> &[String] {
        &self.names[kind.index()]
    }

    pub fn count(&self, kind: AlertKind) -> usize {
        self.names[kind.index()].len()
    }

    /// Total alerts across every category.
    pub fn total(&self) -> usize {
        self.names.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Render the aggregate payload, or `None` when nothing is eligible.
    pub fn summary(&self) -> Option<PushPayload> {
        if self.is_empty() {
            return None;
        }

        let body = AlertKind::ALL
            .iter()
            .filter(|kind| self.count(**kind) > 0)
            .map(|kind| self.phrase(*kind))
            .collect::<Vec<_>>()
            .join(PHRASE_SEPARATOR);

        let total = self.total();
        let title = if total == 1 {
            "1 alert".to_string()
        } else {
            format!("{total} alerts")
        };

        Some(PushPayload {
            title,
            body,
            url: DEFAULT_URL.to_string(),
        })
    }

    /// `"<count> <label>: <first names>[...]"` for one category.
    fn phrase(&self, kind: AlertKind) -> String {
        let names = self.names(kind);
        let preview = names
            .iter()
            .take(PREVIEW_NAMES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let ellipsis = if names.len() > PREVIEW_NAMES { "..." } else { "" };

        format!("{} {}: {preview}{ellipsis}", names.len(), kind.summary_label())
    }
}

/// Evaluate all clients and build the aggregate summary in one step.
pub fn aggregate(
    clients: &[Client],
    today: NaiveDate,
    prefs: &AlertPreferences,
) -> Option<PushPayload> {
    AlertBuckets::collect(clients, today, prefs).summary()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
