use std::env;
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::http_cache::app_cache_dir;

const STUDY_DB_FILE: &str = "study.db";

/// Study-log failure taxonomy. `BadInput` maps to a 400-class exit,
/// `NotFound` to a 404-class one.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("invalid input: {0}")]
    BadInput(String),
    #[error("study entry {0} not found")]
    NotFound(i64),
    #[error("study database error: {0}")]
    Db(#[from] rusqlite::Error),
}

/// One instructional-game entry as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyEntry {
    pub id: i64,
    pub title: String,
    pub eco_code: Option<String>,
    pub played: String,
    pub url: String,
    pub description: String,
    pub created_at: String,
}

/// Fields supplied when logging a new entry.
#[derive(Debug, Clone)]
pub struct NewStudyEntry {
    pub title: String,
    pub eco_code: Option<String>,
    pub played: String,
    pub url: String,
    pub description: String,
}

pub struct StudyLog {
    conn: Connection,
}

impl StudyLog {
    pub fn open_default() -> Result<Self, StudyError> {
        let path = study_db_path()
            .ok_or_else(|| StudyError::BadInput("no usable study database path".to_string()))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok();
        }
        Self::open(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StudyError> {
        Self::open(Connection::open_in_memory()?)
    }

    fn open(conn: Connection) -> Result<Self, StudyError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS studies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                eco_code TEXT,
                played TEXT NOT NULL,
                url TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(StudyLog { conn })
    }

    /// Validates and inserts a new entry, returning its id.
    pub fn add(&self, entry: NewStudyEntry) -> Result<i64, StudyError> {
        let title = entry.title.trim();
        if title.is_empty() {
            return Err(StudyError::BadInput("title must not be empty".to_string()));
        }
        let played = entry.played.trim();
        if NaiveDate::parse_from_str(played, "%Y-%m-%d").is_err() {
            return Err(StudyError::BadInput(format!(
                "played date '{played}' is not a YYYY-MM-DD date"
            )));
        }

        self.conn.execute(
            r#"
            INSERT INTO studies (title, eco_code, played, url, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                title,
                entry.eco_code.as_deref().map(str::trim),
                played,
                entry.url.trim(),
                entry.description.trim(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All entries, most recently played first.
    pub fn list(&self) -> Result<Vec<StudyEntry>, StudyError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, title, eco_code, played, url, description, created_at
            FROM studies
            ORDER BY played DESC, id DESC
            "#,
        )?;
        let rows = stmt.query_map([], row_to_entry)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn get(&self, id: i64) -> Result<StudyEntry, StudyError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, title, eco_code, played, url, description, created_at
            FROM studies
            WHERE id = ?1
            "#,
        )?;
        let mut rows = stmt.query_map(params![id], row_to_entry)?;
        match rows.next() {
            Some(row) => Ok(row?),
            None => Err(StudyError::NotFound(id)),
        }
    }
}

/// Entry ids arrive as CLI strings; anything non-numeric is a BadInput, not
/// a lookup miss.
pub fn parse_entry_id(raw: &str) -> Result<i64, StudyError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| StudyError::BadInput(format!("invalid study entry id '{raw}'")))
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<StudyEntry> {
    Ok(StudyEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        eco_code: row.get(2)?,
        played: row.get(3)?,
        url: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn study_db_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("SCOUT_STUDY_DB")
        && !custom.trim().is_empty()
    {
        return Some(PathBuf::from(custom));
    }
    app_cache_dir().map(|dir| dir.join(STUDY_DB_FILE))
}
