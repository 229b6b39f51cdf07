//! Flat-file score records: an append-only `name,score` log plus a single
//! record holding the current high score.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::ScoreError;

pub const DEFAULT_NAME: &str = "No Name";
const MAX_NAME_LEN: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
}

impl Default for HighScore {
    fn default() -> Self {
        HighScore { name: DEFAULT_NAME.to_string(), score: 0 }
    }
}

pub struct ScoreStore {
    scores_path: PathBuf,
    high_score_path: PathBuf,
}

impl ScoreStore {
    pub fn new(scores_path: impl Into<PathBuf>, high_score_path: impl Into<PathBuf>) -> Self {
        ScoreStore { scores_path: scores_path.into(), high_score_path: high_score_path.into() }
    }

    /// Never fails: a missing, unreadable or malformed record yields the default.
    pub fn load_high_score(&self) -> HighScore {
        let text = match fs::read_to_string(&self.high_score_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return HighScore::default(),
            Err(e) => {
                warn!("{}", io_error(&self.high_score_path, e));
                return HighScore::default();
            }
        };

        let first = text.lines().next().unwrap_or("");
        match parse_record(first, 1) {
            Ok(record) => {
                info!("Loaded high score {} by {}", record.score, record.name);
                record
            }
            Err(e) => {
                warn!("Ignoring {}: {}", self.high_score_path.display(), e);
                HighScore::default()
            }
        }
    }

    /// Replaces the high-score record. The outgoing holder moves to the score
    /// log so it still shows up in the listing.
    pub fn save_high_score(&self, record: &HighScore) -> Result<(), ScoreError> {
        let outgoing = self.load_high_score();
        if outgoing != HighScore::default() {
            self.append_score(&outgoing.name, outgoing.score)?;
        }

        fs::write(&self.high_score_path, format!("{},{}\n", record.name, record.score))
            .map_err(|e| io_error(&self.high_score_path, e))
    }

    pub fn append_score(&self, name: &str, score: u32) -> Result<(), ScoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.scores_path)
            .map_err(|e| io_error(&self.scores_path, e))?;

        writeln!(file, "{},{}", name, score).map_err(|e| io_error(&self.scores_path, e))
    }

    /// Every recorded score including the high-score holder, best first.
    /// Malformed lines are skipped.
    pub fn all_scores(&self) -> Result<Vec<HighScore>, ScoreError> {
        let high = self.load_high_score();
        let text = match fs::read_to_string(&self.scores_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(io_error(&self.scores_path, e)),
        };

        let mut scores: Vec<HighScore> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(i, line)| match parse_record(line, i + 1) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping line in {}: {}", self.scores_path.display(), e);
                    None
                }
            })
            .collect();

        if high != HighScore::default() {
            scores.push(high);
        }
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(scores)
    }
}

/// Parses one `name,score` line. The name is everything before the last comma.
pub fn parse_record(line: &str, line_no: usize) -> Result<HighScore, ScoreError> {
    let malformed = |reason: String| ScoreError::Malformed { line: line_no, reason };

    let (name, score) = line
        .rsplit_once(',')
        .ok_or_else(|| malformed("missing comma".to_string()))?;
    let score = score
        .trim()
        .parse::<u32>()
        .map_err(|e| malformed(format!("bad score {:?}: {}", score.trim(), e)))?;

    Ok(HighScore { name: name.trim().to_string(), score })
}

/// Strips characters that would break the record format.
pub fn sanitize_name(raw: &str) -> String {
    let name: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_control())
        .take(MAX_NAME_LEN)
        .collect();
    let name = name.trim();

    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    }
}

fn io_error(path: &Path, source: io::Error) -> ScoreError {
    ScoreError::Io { path: path.to_path_buf(), source }
}
