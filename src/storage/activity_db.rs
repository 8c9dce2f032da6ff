use std::path::Path;

use rusqlite::{Connection, Result as SqliteResult};
use thiserror::Error;

use crate::calendar::{CalendarDate, ViewState};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("Failed to prepare database directory: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredActivity {
    pub id: i64,
    /// ISO `YYYY-MM-DD`, as written by [`ActivityDb::insert`].
    pub date: String,
    pub activity: String,
}

/// The `(date, activity)` table behind the activity service.
pub struct ActivityDb {
    conn: Connection,
}

impl ActivityDb {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Self::new(Connection::open(path)?);
        db.initialize()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        let db = Self::new(Connection::open_in_memory()?);
        db.initialize()?;
        Ok(db)
    }

    pub fn initialize(&self) -> Result<(), DbError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS activities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                activity TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_activities_date ON activities (date)",
            [],
        )?;

        Ok(())
    }

    pub fn insert(&self, date: CalendarDate, activity: &str) -> Result<i64, DbError> {
        self.conn.execute(
            "INSERT INTO activities (date, activity) VALUES (?1, ?2)",
            rusqlite::params![date.iso(), activity],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_month(&self, view: ViewState) -> Result<Vec<StoredActivity>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, activity FROM activities
             WHERE date >= ?1 AND date <= ?2
             ORDER BY id",
        )?;
        let rows = stmt.query_map(
            [view.first_day().iso(), view.last_day().iso()],
            Self::map_row,
        )?;
        Ok(rows.collect::<SqliteResult<Vec<_>>>()?)
    }

    pub fn list_all(&self) -> Result<Vec<StoredActivity>, DbError> {
        let mut stmt = self.conn.prepare("SELECT id, date, activity FROM activities ORDER BY id")?;
        let rows = stmt.query_map([], Self::map_row)?;
        Ok(rows.collect::<SqliteResult<Vec<_>>>()?)
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }

    fn map_row(row: &rusqlite::Row<'_>) -> SqliteResult<StoredActivity> {
        Ok(StoredActivity {
            id: row.get(0)?,
            date: row.get(1)?,
            activity: row.get(2)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> ActivityDb {
        ActivityDb::open_in_memory().unwrap()
    }

    fn date(key: &str) -> CalendarDate {
        CalendarDate::parse_key(key).unwrap()
    }

    #[test]
    fn creates_database_schema() {
        let conn = Connection::open_in_memory().unwrap();
        let db = ActivityDb::new(conn);

        db.initialize().unwrap();

        assert!(db.table_exists("activities"));
    }

    #[test]
    fn insert_returns_increasing_ids() {
        let db = create_test_db();

        let first = db.insert(date("2024-1-15"), "Dentist").unwrap();
        let second = db.insert(date("2024-1-15"), "Dentist").unwrap();

        assert!(second > first);
    }

    #[test]
    fn stores_dates_as_iso() {
        let db = create_test_db();
        db.insert(date("2024-3-7"), "Taxes").unwrap();

        let rows = db.list_all().unwrap();

        assert_eq!(rows[0].date, "2024-03-07");
        assert_eq!(rows[0].activity, "Taxes");
    }

    #[test]
    fn list_month_filters_by_month_and_year() {
        let db = create_test_db();
        db.insert(date("2024-1-1"), "New year").unwrap();
        db.insert(date("2024-1-31"), "Month end").unwrap();
        db.insert(date("2024-2-1"), "February").unwrap();
        db.insert(date("2023-1-15"), "Last year").unwrap();

        let january = ViewState::new(0, 2024).unwrap();
        let rows = db.list_month(january).unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.activity.as_str()).collect();
        assert_eq!(names, ["New year", "Month end"]);
    }

    #[test]
    fn list_month_keeps_insertion_order() {
        let db = create_test_db();
        db.insert(date("2024-1-20"), "Later day first").unwrap();
        db.insert(date("2024-1-2"), "Earlier day second").unwrap();

        let rows = db.list_month(ViewState::new(0, 2024).unwrap()).unwrap();

        assert_eq!(rows[0].activity, "Later day first");
        assert_eq!(rows[1].activity, "Earlier day second");
    }

    #[test]
    fn open_creates_file_and_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("activities.db");

        let db = ActivityDb::open(&path).unwrap();
        db.insert(date("2024-1-15"), "Dentist").unwrap();

        assert!(path.exists());
    }
}
