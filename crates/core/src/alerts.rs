//! Client alert kinds and their summary labels.
//!
//! [`AlertKind`] is the closed set of conditions the notification engine
//! reports on. The declaration order of [`AlertKind::ALL`] is the order in
//! which categories appear in an aggregate summary.

use serde::{Deserialize, Serialize};

/// Dedup ledger event type for the scheduled aggregate summary.
pub const EVENT_DAILY_SUMMARY: &str = "daily_summary";

/// Birthday within this many days counts as "in 3 days".
pub const BIRTHDAY_SOON_DAYS: i64 = 3;

/// Birthday within this many days counts as "in 7 days".
pub const BIRTHDAY_UPCOMING_DAYS: i64 = 7;

/// More than this many days since the last cut is overdue.
pub const NO_CUT_OVERDUE_DAYS: i64 = 15;

/// More than this many days since the last cut is severely overdue.
pub const NO_CUT_SEVERE_DAYS: i64 = 30;

/// A condition that makes a client eligible for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    BirthdayToday,
    #[serde(rename = "birthday_in_3")]
    BirthdayIn3,
    #[serde(rename = "birthday_in_7")]
    BirthdayIn7,
    #[serde(rename = "no_cut_15")]
    NoCut15,
    #[serde(rename = "no_cut_30")]
    NoCut30,
}

impl AlertKind {
    /// Every kind, in summary precedence order.
    pub const ALL: [AlertKind; 5] = [
        AlertKind::BirthdayToday,
        AlertKind::BirthdayIn3,
        AlertKind::BirthdayIn7,
        AlertKind::NoCut15,
        AlertKind::NoCut30,
    ];

    /// Stable tag used in logs and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::BirthdayToday => "birthday_today",
            AlertKind::BirthdayIn3 => "birthday_in_3",
            AlertKind::BirthdayIn7 => "birthday_in_7",
            AlertKind::NoCut15 => "no_cut_15",
            AlertKind::NoCut30 => "no_cut_30",
        }
    }

    /// Category label shown after the count in a summary phrase.
    pub fn summary_label(self) -> &'static str {
        match self {
            AlertKind::BirthdayToday => "birthday(s) today",
            AlertKind::BirthdayIn3 => "birthday(s) within 3 days",
            AlertKind::BirthdayIn7 => "birthday(s) within 7 days",
            AlertKind::NoCut15 => "without a cut >15d",
            AlertKind::NoCut30 => "without a cut >30d",
        }
    }

    /// Position in [`AlertKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            AlertKind::BirthdayToday => 0,
            AlertKind::BirthdayIn3 => 1,
            AlertKind::BirthdayIn7 => 2,
            AlertKind::NoCut15 => 3,
            AlertKind::NoCut30 => 4,
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_precedence_order() {
        for (i, kind) in AlertKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        for kind in AlertKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
