use crate::consts;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One line of the leaderboard
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreEntry {
    /// Local time at which the score was recorded, formatted with
    /// [`DATE_FORMAT`][consts::DATE_FORMAT]
    pub(crate) date: String,

    pub(crate) score: u32,
}

/// Handle on the file holding the top scores.
///
/// The file contains a JSON array of at most
/// [`LEADERBOARD_SIZE`][consts::LEADERBOARD_SIZE] [`ScoreEntry`] objects,
/// sorted by descending score, with no two entries for the same score.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    pub(crate) fn new(path: PathBuf) -> Leaderboard {
        Leaderboard { path }
    }

    /// Return the default leaderboard file path, or `None` if the local data
    /// directory could not be determined
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("scoresnake").join("leaderboard.json"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored entries.  A missing file is an empty leaderboard.
    pub(crate) fn load(&self) -> Result<Vec<ScoreEntry>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    /// Add `score` to the leaderboard, stamped with the current local time,
    /// and return the updated list of entries
    pub(crate) fn record(&self, score: u32) -> Result<Vec<ScoreEntry>, SaveError> {
        let date = chrono::Local::now()
            .format(consts::DATE_FORMAT)
            .to_string();
        self.record_at(score, date)
    }

    /// Add `score` to the leaderboard with the given timestamp and return the
    /// updated list of entries.
    ///
    /// If the current file cannot be read, it is treated as empty and will be
    /// overwritten.  If the leaderboard already has an entry for `score`, the
    /// existing entry is kept.  Only the top
    /// [`LEADERBOARD_SIZE`][consts::LEADERBOARD_SIZE] scores are retained.
    pub(crate) fn record_at(
        &self,
        score: u32,
        date: String,
    ) -> Result<Vec<ScoreEntry>, SaveError> {
        let mut entries = self.load().unwrap_or_else(|e| {
            log::warn!(
                "Treating leaderboard at {} as empty: {:#}",
                self.path.display(),
                anyhow::Error::new(e)
            );
            Vec::new()
        });
        if entries.iter().any(|entry| entry.score == score) {
            log::info!("Score {score} is already on the leaderboard");
        } else {
            log::info!("Recording score {score} at {date}");
            entries.push(ScoreEntry { date, score });
        }
        entries.sort_by_key(|entry| Reverse(entry.score));
        entries.dedup_by_key(|entry| entry.score);
        entries.truncate(consts::LEADERBOARD_SIZE);
        self.save(&entries)?;
        Ok(entries)
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save leaderboard to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize leaderboard")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write leaderboard file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read leaderboard from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read leaderboard file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize leaderboard")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DATE: &str = "2026-10-19 12:00:00";

    fn leaderboard_in(tmpdir: &TempDir) -> Leaderboard {
        Leaderboard::new(tmpdir.path().join("leaderboard.json"))
    }

    fn scores(entries: &[ScoreEntry]) -> Vec<u32> {
        entries.iter().map(|entry| entry.score).collect()
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        assert!(board.load().unwrap().is_empty());
    }

    #[test]
    fn record_first_score() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        let entries = board.record_at(4, String::from(DATE)).unwrap();
        let expected = vec![ScoreEntry {
            date: String::from(DATE),
            score: 4,
        }];
        assert_eq!(entries, expected);
        assert_eq!(board.load().unwrap(), expected);
        assert_eq!(
            fs_err::read_to_string(board.path()).unwrap(),
            "[{\"date\":\"2026-10-19 12:00:00\",\"score\":4}]\n"
        );
    }

    #[test]
    fn duplicate_score_kept_once() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        board
            .record_at(7, String::from("2026-10-19 12:00:00"))
            .unwrap();
        let entries = board
            .record_at(7, String::from("2026-10-19 13:00:00"))
            .unwrap();
        assert_eq!(
            entries,
            [ScoreEntry {
                date: String::from("2026-10-19 12:00:00"),
                score: 7,
            }]
        );
    }

    #[test]
    fn keeps_top_ten_in_descending_order() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        for score in [5, 3, 9, 3, 7, 1, 2, 4, 6, 8, 10] {
            let entries = board.record_at(score, String::from(DATE)).unwrap();
            assert!(
                entries.windows(2).all(|w| w[0].score > w[1].score),
                "entries not strictly descending: {entries:?}"
            );
        }
        assert_eq!(
            scores(&board.load().unwrap()),
            [10, 9, 8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn eleventh_distinct_score_drops_lowest() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        for score in 1..=11 {
            board.record_at(score, String::from(DATE)).unwrap();
        }
        assert_eq!(
            scores(&board.load().unwrap()),
            [11, 10, 9, 8, 7, 6, 5, 4, 3, 2]
        );
    }

    #[test]
    fn low_score_on_full_board_is_not_added() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        for score in 11..=20 {
            board.record_at(score, String::from(DATE)).unwrap();
        }
        let entries = board.record_at(3, String::from(DATE)).unwrap();
        assert_eq!(scores(&entries), (11..=20).rev().collect::<Vec<_>>());
    }

    #[test]
    fn malformed_file_is_replaced() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        fs_err::write(board.path(), "this is not JSON").unwrap();
        assert!(board.load().is_err());
        let entries = board.record_at(2, String::from(DATE)).unwrap();
        assert_eq!(scores(&entries), [2]);
        assert_eq!(scores(&board.load().unwrap()), [2]);
    }

    #[test]
    fn unsorted_file_is_normalized() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        fs_err::write(
            board.path(),
            r#"[{"date":"a","score":1},{"date":"b","score":6},{"date":"c","score":6}]"#,
        )
        .unwrap();
        let entries = board.record_at(4, String::from(DATE)).unwrap();
        assert_eq!(scores(&entries), [6, 4, 1]);
        assert_eq!(entries[0].date, "b");
    }

    #[test]
    fn creates_parent_directories() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = Leaderboard::new(tmpdir.path().join("foo").join("bar").join("scores.json"));
        board.record_at(1, String::from(DATE)).unwrap();
        assert_eq!(scores(&board.load().unwrap()), [1]);
    }

    #[test]
    fn record_stamps_current_time() {
        let tmpdir = tempfile::tempdir().unwrap();
        let board = leaderboard_in(&tmpdir);
        let entries = board.record(3).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(
            chrono::NaiveDateTime::parse_from_str(&entries[0].date, consts::DATE_FORMAT).is_ok(),
            "bad timestamp: {:?}",
            entries[0].date
        );
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let tmpdir = tempfile::tempdir().unwrap();
        // The leaderboard path is an existing directory
        let board = Leaderboard::new(tmpdir.path().to_path_buf());
        assert!(board.record_at(1, String::from(DATE)).is_err());
    }
}
