use crate::domain::DomainStats;
use crate::scraper::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

#[derive(Debug)]
pub struct ScrapeRun {
    pub id: i64,
    pub domain: String,
    pub started_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
    pub pages_fetched: Option<i64>,
    pub listings_written: Option<i64>,
    pub success: bool,
}

pub fn start_scrape_run(conn: &Connection, domain: &str, now: NaiveDateTime) -> Result<i64> {
    conn.execute(
        "INSERT INTO scrape_runs (domain, started_at, success) VALUES (?, ?, 0)",
        params![domain, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn end_scrape_run(
    conn: &Connection,
    run_id: i64,
    now: NaiveDateTime,
    stats: &DomainStats,
) -> Result<()> {
    conn.execute(
        "UPDATE scrape_runs SET finished_at = ?, pages_fetched = ?, listings_seen = ?, listings_skipped = ?, listings_written = ?, success = 1 WHERE id = ?",
        params![
            now,
            stats.pages_fetched as i64,
            stats.listings_seen as i64,
            stats.listings_skipped as i64,
            stats.listings_written as i64,
            run_id
        ],
    )?;
    Ok(())
}

pub fn get_recent_scrapes(conn: &Connection) -> Result<Vec<ScrapeRun>> {
    let mut stmt = conn.prepare(
        "SELECT id, domain, started_at, finished_at, pages_fetched, listings_written, success FROM scrape_runs ORDER BY id DESC LIMIT 50",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ScrapeRun {
            id: row.get(0)?,
            domain: row.get(1)?,
            started_at: row.get(2)?,
            finished_at: row.get(3)?,
            pages_fetched: row.get(4)?,
            listings_written: row.get(5)?,
            success: row.get(6)?,
        })
    })?;

    let mut runs = Vec::new();
    for r in rows {
        runs.push(r?);
    }
    Ok(runs)
}
