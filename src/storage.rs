use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use chrono::{SecondsFormat, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::error::{LantError, Result};
use crate::models::RoundResult;

/// One scored round as it is written to the results file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub language: String,
    pub board_x: usize,
    pub board_y: usize,
    pub dice_set: String,
    pub games_played: usize,
    pub average_score: f64,
    pub wordlist_size: usize,
    pub recorded_at: String,
}

impl RoundRecord {
    pub fn new(
        language: &str,
        board_size: usize,
        games_played: usize,
        wordlist_size: usize,
        result: &RoundResult,
    ) -> Self {
        RoundRecord {
            language: language.to_string(),
            board_x: board_size,
            board_y: board_size,
            dice_set: result.dice_set(),
            games_played,
            average_score: result.average,
            wordlist_size,
            recorded_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Best round per language and word list size
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub best_average: f64,
    pub rounds: usize,
    pub language: String,
    pub board_x: usize,
    pub board_y: usize,
    pub wordlist_size: usize,
    pub dice_set: String,
}

/// Append-only log of round results, one JSON object per line.
/// Every append is independent, so a failed write can simply be retried.
pub struct ResultsStore {
    path: PathBuf,
}

impl ResultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, err: impl ToString) -> LantError {
        LantError::Storage {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }

    pub fn record_round(&self, record: &RoundRecord) -> Result<()> {
        let mut line = serde_json::to_string(record).map_err(|e| self.storage_error(e))?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.storage_error(e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| self.storage_error(e))?;
        debug!("Recorded round {:.2} to {}", record.average_score, self.path.display());
        Ok(())
    }

    /// All recorded rounds; an absent file means nothing was recorded yet.
    pub fn load(&self) -> Result<Vec<RoundRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.storage_error(e)),
        };
        let mut records = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.storage_error(e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|e| self.storage_error(format!("line {}: {}", line_no + 1, e)))?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn breakdown(&self) -> Result<Vec<ReportRow>> {
        Ok(breakdown(&self.load()?))
    }
}

/// Group records by language and word list size, keeping the best scoring dice set.
pub fn breakdown(records: &[RoundRecord]) -> Vec<ReportRow> {
    let mut groups: BTreeMap<(String, usize), ReportRow> = BTreeMap::new();
    for record in records {
        let key = (record.language.clone(), record.wordlist_size);
        let row = groups.entry(key).or_insert_with(|| ReportRow {
            best_average: record.average_score,
            rounds: 0,
            language: record.language.clone(),
            board_x: record.board_x,
            board_y: record.board_y,
            wordlist_size: record.wordlist_size,
            dice_set: record.dice_set.clone(),
        });
        row.rounds += 1;
        if record.average_score > row.best_average {
            row.best_average = record.average_score;
            row.board_x = record.board_x;
            row.board_y = record.board_y;
            row.dice_set = record.dice_set.clone();
        }
    }
    groups.into_values().collect()
}

/// Render report rows as an aligned plain text table.
pub fn format_report(rows: &[ReportRow]) -> String {
    let header = [
        "best".to_string(),
        "rounds".to_string(),
        "language".to_string(),
        "board_x".to_string(),
        "board_y".to_string(),
        "wordlist".to_string(),
        "dice_set".to_string(),
    ];
    let body: Vec<[String; 7]> = rows
        .iter()
        .map(|row| {
            [
                format!("{:.2}", row.best_average),
                row.rounds.to_string(),
                row.language.clone(),
                row.board_x.to_string(),
                row.board_y.to_string(),
                row.wordlist_size.to_string(),
                row.dice_set.clone(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[String; 7]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let rule = widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("  ");

    let mut out = vec![render(&header), rule];
    out.extend(body.iter().map(render));
    out.join("\n")
}
