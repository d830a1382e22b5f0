use crate::db::connection::open_db;
use crate::db::scrapes::{end_scrape_run, get_recent_scrapes, start_scrape_run};
use crate::domain::{DomainStats, ListingRecord};
use crate::output::RowSink;
use crate::scraper::{Result, ScraperError};
use chrono::Local;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

/// Appends rows to the `listings` table and logs each domain in `scrape_runs`.
///
/// Rows are never updated; a listing seen twice in one crawl is stored twice,
/// same as in the CSV output.
pub struct SqliteSink {
    conn: Connection,
    domain: Option<String>,
    run_id: Option<i64>,
    finished_runs: Vec<i64>,
}

impl SqliteSink {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Expects the schema to be applied already.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            domain: None,
            run_id: None,
            finished_runs: Vec::new(),
        }
    }
}

impl RowSink for SqliteSink {
    fn begin_domain(&mut self, domain: &str) -> Result<()> {
        let now = Local::now().naive_local();
        self.run_id = Some(start_scrape_run(&self.conn, domain, now)?);
        self.domain = Some(domain.to_string());
        Ok(())
    }

    fn write_row(&mut self, record: &ListingRecord) -> Result<()> {
        let domain = self
            .domain
            .as_deref()
            .ok_or_else(|| ScraperError::Config("row written before any domain began".into()))?;
        let now = Local::now().naive_local();

        self.conn.execute(
            r#"
            INSERT INTO listings
                (domain, pid, dt, url, title, price, neighb, beds, sqft,
                 lat, lng, accuracy, address, scraped_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                domain,
                record.pid,
                record.dt,
                record.url,
                record.title,
                record.price,
                record.neighb,
                record.beds,
                record.sqft,
                record.lat,
                record.lng,
                record.accuracy,
                record.address,
                now,
            ],
        )?;
        Ok(())
    }

    fn end_domain(&mut self, stats: &DomainStats) -> Result<()> {
        if let Some(run_id) = self.run_id.take() {
            end_scrape_run(&self.conn, run_id, Local::now().naive_local(), stats)?;
            self.finished_runs.push(run_id);
        }
        self.domain = None;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        for run in get_recent_scrapes(&self.conn)?
            .iter()
            .filter(|r| self.finished_runs.contains(&r.id))
        {
            info!(
                "📊 {} : {} pages, {} listings (started {}, finished {:?}, success {})",
                run.domain,
                run.pages_fetched.unwrap_or(0),
                run.listings_written.unwrap_or(0),
                run.started_at,
                run.finished_at,
                run.success
            );
        }
        Ok(())
    }
}
