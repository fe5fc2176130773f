use std::{cmp::Reverse, fs, path::PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How many entries the table retains.
pub const CAPACITY: usize = 10;

/// One recorded result: who scored how much, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: usize,
    /// Date of the session, serialized as `%Y-%m-%d`.
    pub date: NaiveDate,
}

/// The top results, ordered best first.
///
/// Kept sorted descending by score; equal scores keep their insertion
/// order, so an older result outranks a newer tie. Never holds more than
/// [`CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<ScoreEntry>,
}

impl HighScoreTable {
    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry, keeping order and dropping anything beyond the
    /// capacity. A stable sort keeps ties in insertion order.
    pub fn insert(&mut self, entry: ScoreEntry) {
        self.entries.push(entry);
        self.entries.sort_by_key(|entry| Reverse(entry.score));
        self.entries.truncate(CAPACITY);
    }

    /// Whether `score` would earn a place in the table.
    ///
    /// A tie with the current last entry does not qualify once the table
    /// is full: the older result keeps its seat.
    #[must_use]
    pub fn is_high_score(&self, score: usize) -> bool {
        if self.entries.len() < CAPACITY {
            return true;
        }
        self.entries.last().is_some_and(|last| score > last.score)
    }

    /// 1-based rank `score` would take, or `None` if it does not qualify.
    #[must_use]
    pub fn rank_of(&self, score: usize) -> Option<usize> {
        self.is_high_score(score)
            .then(|| self.entries.iter().filter(|entry| entry.score >= score).count() + 1)
    }
}

/// JSON-file persistence for the high-score table.
///
/// Loading never fails: a missing, unreadable or malformed file yields an
/// empty table, so score persistence can never take the game down.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn load(&self) -> HighScoreTable {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, table: &HighScoreTable) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(table)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Loads the table, inserts today's result and saves it back.
    pub fn record(&self, name: &str, score: usize) -> anyhow::Result<HighScoreTable> {
        let mut table = self.load();
        table.insert(ScoreEntry {
            name: name.to_owned(),
            score,
            date: chrono::Local::now().date_naive(),
        });
        self.save(&table)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: usize) -> ScoreEntry {
        ScoreEntry {
            name: name.to_owned(),
            score,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn entries_are_kept_in_descending_score_order() {
        let mut table = HighScoreTable::default();
        table.insert(entry("a", 300));
        table.insert(entry("b", 800));
        table.insert(entry("c", 100));

        let scores: Vec<_> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![800, 300, 100]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut table = HighScoreTable::default();
        table.insert(entry("first", 500));
        table.insert(entry("second", 500));
        table.insert(entry("third", 500));

        let names: Vec<_> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn table_never_exceeds_capacity() {
        let mut table = HighScoreTable::default();
        for score in 0..15 {
            table.insert(entry("p", score * 100));
        }
        assert_eq!(table.entries().len(), CAPACITY);
        assert_eq!(table.entries()[0].score, 1400, "best scores survive the cut");
        assert_eq!(table.entries()[CAPACITY - 1].score, 500);
    }

    #[test]
    fn any_score_qualifies_while_the_table_has_room() {
        let mut table = HighScoreTable::default();
        assert!(table.is_high_score(0));
        table.insert(entry("p", 1000));
        assert!(table.is_high_score(0));
    }

    #[test]
    fn full_table_rejects_scores_at_or_below_the_floor() {
        let mut table = HighScoreTable::default();
        for score in 1..=CAPACITY {
            table.insert(entry("p", score * 100));
        }
        assert!(table.is_high_score(150));
        assert!(!table.is_high_score(100), "a tie with the last seat does not qualify");
        assert!(!table.is_high_score(50));
    }

    #[test]
    fn rank_counts_strictly_better_and_tied_earlier_entries() {
        let mut table = HighScoreTable::default();
        table.insert(entry("a", 900));
        table.insert(entry("b", 700));
        table.insert(entry("c", 700));

        assert_eq!(table.rank_of(1000), Some(1));
        assert_eq!(table.rank_of(800), Some(2));
        assert_eq!(table.rank_of(700), Some(4), "a new tie slots in after existing ones");
    }

    #[test]
    fn table_round_trips_through_json() {
        let mut table = HighScoreTable::default();
        table.insert(entry("ada", 1200));
        table.insert(entry("brian", 400));

        let json = serde_json::to_string(&table).unwrap();
        let parsed: HighScoreTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
        assert!(json.contains("2024-03-01"), "dates serialize as plain dates");
    }

    #[test]
    fn load_falls_back_to_an_empty_table() {
        let store = ScoreStore::new(PathBuf::from("/nonexistent/blockfall/scores.json"));
        assert!(store.load().is_empty());
    }

    fn unique_store_path() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("blockfall_score_store_{nanos}"))
            .join("scores.json")
    }

    #[test]
    fn record_persists_across_loads() {
        let path = unique_store_path();
        let dir = path.parent().unwrap().to_path_buf();
        // The directory does not exist yet; save must create it.
        let store = ScoreStore::new(path);

        store.record("ada", 400).unwrap();
        store.record("brian", 1200).unwrap();
        store.record("grace", 400).unwrap();

        let table = store.load();
        let names: Vec<_> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["brian", "ada", "grace"], "order survives the file");

        let again = store.load();
        assert_eq!(again, table, "loading is repeatable");

        fs::remove_dir_all(dir).unwrap();
    }
}
