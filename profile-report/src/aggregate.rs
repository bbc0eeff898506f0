//! Aggregation of enrichment records by name, and the derived statistics.
//!
//! Records are keyed by name. A later record for the same name replaces the
//! earlier one outright but keeps the position where the name was first seen,
//! so traversal order (and with it ranking tie order) is reproducible.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use profile_enricher::EnrichmentRecord;

/// Host markers that make an app identifier local-only.
pub const LOOPBACK_MARKERS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Whether an app identifier points at a loopback host.
pub fn is_loopback_app(app: &str) -> bool {
    LOOPBACK_MARKERS.iter().any(|marker| app.contains(marker))
}

/// Latest enrichment record per name.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    users: Vec<EnrichmentRecord>,
    index: HashMap<String, usize>,
}

/// Number of distinct users of one public app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppUsage {
    pub app: String,
    pub users: usize,
}

/// Statistics over an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_users: usize,
    pub users_with_proofs: usize,
    pub users_with_proofs_nonexpired: usize,
    pub users_with_valid_proofs: usize,
    pub users_with_valid_proofs_nonexpired: usize,
    pub users_with_apps: usize,
    pub users_with_apps_nonexpired: usize,
    pub users_with_loopback_app: usize,
    /// Distinct public app identifiers, first-seen order
    pub public_apps: Vec<String>,
    /// Public apps by descending user count; ties keep first-seen order
    pub ranking: Vec<AppUsage>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an aggregation; later records win on duplicate names.
    pub fn from_records(records: impl IntoIterator<Item = EnrichmentRecord>) -> Self {
        let mut aggregation = Self::new();
        for record in records {
            aggregation.insert(record);
        }
        aggregation
    }

    /// Insert a record, replacing any earlier record with the same name.
    pub fn insert(&mut self, record: EnrichmentRecord) {
        match self.index.get(&record.name) {
            Some(&slot) => self.users[slot] = record,
            None => {
                self.index.insert(record.name.clone(), self.users.len());
                self.users.push(record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&EnrichmentRecord> {
        self.index.get(name).map(|&slot| &self.users[slot])
    }

    /// Records in first-seen name order.
    pub fn users(&self) -> &[EnrichmentRecord] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Count users matching `predicate`, overall and among non-expired names.
    fn count(&self, predicate: impl Fn(&EnrichmentRecord) -> bool) -> (usize, usize) {
        self.users
            .iter()
            .filter(|user| predicate(*user))
            .fold((0, 0), |(all, live), user| {
                (all + 1, if user.expired { live } else { live + 1 })
            })
    }

    /// Distinct app identifiers across all users, first-seen order.
    fn distinct_apps(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.users
            .iter()
            .flat_map(|user| user.app_list.iter().map(String::as_str))
            .filter(|app| seen.insert(*app))
            .collect()
    }

    pub fn summarize(&self) -> Summary {
        let (users_with_proofs, users_with_proofs_nonexpired) =
            self.count(|user| user.num_proofs > 0);
        let (users_with_valid_proofs, users_with_valid_proofs_nonexpired) =
            self.count(|user| user.valid_proofs > 0);
        let (users_with_apps, users_with_apps_nonexpired) =
            self.count(|user| !user.app_list.is_empty());
        let (users_with_loopback_app, _) =
            self.count(|user| user.app_list.iter().any(|app| is_loopback_app(app)));

        let public_apps: Vec<&str> = self
            .distinct_apps()
            .into_iter()
            .filter(|app| !is_loopback_app(app))
            .collect();

        // A user listing the same app twice still counts once
        let mut tally: HashMap<&str, usize> = HashMap::new();
        for user in &self.users {
            let apps: HashSet<&str> = user.app_list.iter().map(String::as_str).collect();
            for app in apps {
                *tally.entry(app).or_default() += 1;
            }
        }

        let mut ranking: Vec<AppUsage> = public_apps
            .iter()
            .map(|app| AppUsage {
                app: app.to_string(),
                users: tally.get(app).copied().unwrap_or_default(),
            })
            .collect();
        ranking.sort_by(|a, b| b.users.cmp(&a.users));

        Summary {
            total_users: self.users.len(),
            users_with_proofs,
            users_with_proofs_nonexpired,
            users_with_valid_proofs,
            users_with_valid_proofs_nonexpired,
            users_with_apps,
            users_with_apps_nonexpired,
            users_with_loopback_app,
            public_apps: public_apps.into_iter().map(str::to_string).collect(),
            ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: &str,
        expired: bool,
        num_proofs: usize,
        valid_proofs: usize,
        apps: &[&str],
    ) -> EnrichmentRecord {
        EnrichmentRecord {
            name: name.to_string(),
            address: format!("1{name}"),
            expired,
            num_proofs,
            valid_proofs,
            apps: apps.len(),
            app_list: apps.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_is_loopback_app() {
        assert!(is_loopback_app("http://localhost:3000"));
        assert!(is_loopback_app("http://127.0.0.1:8888"));
        assert!(!is_loopback_app("https://app1"));
        assert!(!is_loopback_app("https://127.0.0.2"));
    }

    #[test]
    fn test_last_record_wins() {
        let aggregation = Aggregation::from_records([
            record("alice", false, 1, 0, &[]),
            record("bob", false, 0, 0, &[]),
            record("alice", true, 3, 2, &["https://new"]),
        ]);

        assert_eq!(aggregation.len(), 2);
        let alice = aggregation.get("alice").unwrap();
        assert!(alice.expired);
        assert_eq!(alice.num_proofs, 3);
        assert_eq!(alice.app_list, vec!["https://new"]);
        // Replacement keeps alice's original position
        assert_eq!(aggregation.users()[0].name, "alice");
    }

    #[test]
    fn test_counts_raw_and_nonexpired() {
        let summary = Aggregation::from_records([
            record("a", false, 2, 1, &["https://x"]),
            record("b", true, 1, 1, &["https://x"]),
            record("c", true, 1, 0, &[]),
            record("d", false, 0, 0, &[]),
        ])
        .summarize();

        assert_eq!(summary.total_users, 4);
        assert_eq!((summary.users_with_proofs, summary.users_with_proofs_nonexpired), (3, 1));
        assert_eq!(
            (summary.users_with_valid_proofs, summary.users_with_valid_proofs_nonexpired),
            (2, 1)
        );
        assert_eq!((summary.users_with_apps, summary.users_with_apps_nonexpired), (2, 1));
    }

    #[test]
    fn test_ranking_example() {
        let summary = Aggregation::from_records([
            record("u1", false, 0, 0, &["https://app1"]),
            record("u2", false, 0, 0, &["https://app1", "http://localhost:3000"]),
        ])
        .summarize();

        assert_eq!(
            summary.ranking[0],
            AppUsage {
                app: "https://app1".to_string(),
                users: 2
            }
        );
        assert_eq!(summary.ranking.len(), 1);
        assert_eq!(summary.users_with_loopback_app, 1);
        assert_eq!(summary.public_apps, vec!["https://app1"]);
    }

    #[test]
    fn test_loopback_apps_excluded_from_public_views() {
        let summary = Aggregation::from_records([
            record("u1", false, 0, 0, &["http://127.0.0.1:8888", "https://a"]),
            record("u2", false, 0, 0, &["http://localhost:8080"]),
            record("u3", false, 0, 0, &["https://b"]),
        ])
        .summarize();

        assert_eq!(summary.public_apps, vec!["https://a", "https://b"]);
        assert!(summary.ranking.iter().all(|usage| !is_loopback_app(&usage.app)));
        assert_eq!(summary.users_with_loopback_app, 2);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let summary = Aggregation::from_records([
            record("u1", false, 0, 0, &["https://c", "https://a"]),
            record("u2", false, 0, 0, &["https://b", "https://a"]),
            record("u3", false, 0, 0, &["https://b"]),
        ])
        .summarize();

        let ranked: Vec<_> = summary
            .ranking
            .iter()
            .map(|usage| (usage.app.as_str(), usage.users))
            .collect();
        assert_eq!(
            ranked,
            vec![("https://a", 2), ("https://b", 2), ("https://c", 1)]
        );
    }

    #[test]
    fn test_duplicate_app_entries_count_once() {
        let summary = Aggregation::from_records([record(
            "u1",
            false,
            0,
            0,
            &["https://a", "https://a"],
        )])
        .summarize();

        assert_eq!(summary.ranking[0].users, 1);
        assert_eq!(summary.public_apps, vec!["https://a"]);
    }

    #[test]
    fn test_empty_aggregation() {
        let summary = Aggregation::new().summarize();

        assert_eq!(summary.total_users, 0);
        assert_eq!(summary.users_with_loopback_app, 0);
        assert!(summary.public_apps.is_empty());
        assert!(summary.ranking.is_empty());
    }
}
