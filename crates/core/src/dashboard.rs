//! Dashboard counters shown on the client list screen.
//!
//! These use wider windows than the notification categories: the
//! "upcoming birthdays" card looks two weeks ahead, and the two no-cut
//! cards are bands rather than exclusive buckets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::alerts::{NO_CUT_OVERDUE_DAYS, NO_CUT_SEVERE_DAYS};
use crate::dates::{days_between, days_until_this_years_occurrence, parse_date, parse_optional_date};

/// Birthdays this many days ahead (inclusive) count as upcoming.
pub const UPCOMING_BIRTHDAY_WINDOW_DAYS: i64 = 14;

/// Aggregated dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub total_clients: usize,
    /// Last cut between 16 and 30 days ago, or never recorded.
    pub no_cut_15: usize,
    /// Last cut more than 30 days ago, or never recorded.
    pub no_cut_30: usize,
    /// Birthday between today and the next 14 days.
    pub upcoming_birthdays: usize,
}

impl DashboardCounts {
    /// Fold one client into the counters.
    ///
    /// Dates that fail to parse simply do not contribute to that counter.
    pub fn add_client(&mut self, birthday: &str, last_cut: Option<&str>, today: NaiveDate) {
        self.total_clients += 1;

        match parse_optional_date(last_cut) {
            Ok(None) => {
                self.no_cut_15 += 1;
                self.no_cut_30 += 1;
            }
            Ok(Some(cut)) => {
                let since = days_between(cut, today);
                if since > NO_CUT_SEVERE_DAYS {
                    self.no_cut_30 += 1;
                } else if since > NO_CUT_OVERDUE_DAYS {
                    self.no_cut_15 += 1;
                }
            }
            Err(_) => {}
        }

        if let Ok(birthday) = parse_date(birthday) {
            let until = days_until_this_years_occurrence(birthday, today);
            if (0..=UPCOMING_BIRTHDAY_WINDOW_DAYS).contains(&until) {
                self.upcoming_birthdays += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bands_and_upcoming_birthdays() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut counts = DashboardCounts::default();

        counts.add_client("1990-06-10", Some("2024-05-10"), today); // 22 days, bday in 9
        counts.add_client("1990-01-01", Some("2024-03-01"), today); // severe
        counts.add_client("1990-06-20", None, today); // never cut, bday in 19
        counts.add_client("bad", Some("bad"), today);

        assert_eq!(
            counts,
            DashboardCounts {
                total_clients: 4,
                no_cut_15: 2,
                no_cut_30: 2,
                upcoming_birthdays: 1,
            }
        );
    }
}
